use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use string_wave::animation;
use string_wave::cli::{Cli, Command};
use string_wave::compare::Comparison;
use string_wave::config::AppConfig;
use string_wave::intake::ParameterIntake;
use string_wave::plot::SvgFigure;
use string_wave::static_plot;
use string_wave::Wave;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn plot(wave: &Wave, cfg: &AppConfig) -> Result<()> {
    let out = &cfg.render.out_dir;
    let gif = out.join("wave_animation.gif");
    animation::render_gif(wave, &cfg.animation, &gif, cfg.render.size())
        .with_context(|| format!("failed to render animation to {}", gif.display()))?;

    let svg = out.join("wave_static.svg");
    static_plot::render_svg(wave, &cfg.static_plot, &svg, cfg.render.size())
        .with_context(|| format!("failed to render static profile to {}", svg.display()))?;
    Ok(())
}

fn compare(wave: &Wave, cfg: &AppConfig, t_max: Option<f64>, dx: Option<f64>) -> Result<()> {
    let mut integrator = cfg.integrator.integrator();
    if let Some(t) = t_max {
        integrator.t_max = t;
    }
    if let Some(dx) = dx {
        integrator.dx = dx;
    }
    let cmp = Comparison::run(wave, &integrator).context("integration failed")?;
    println!(
        "t = {:.6} s, max |leapfrog - closed form| = {:.3e} m",
        cmp.time, cmp.max_error
    );

    let path = cfg.render.out_dir.join("wave_compare.svg");
    let mut figure = SvgFigure::new(&path, cfg.render.size());
    cmp.plot(&mut figure)
        .with_context(|| format!("failed to render comparison to {}", path.display()))?;
    info!(path = %figure.path().display(), "wrote comparison");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = AppConfig::load_or_default(&cli.config);
    if let Some(dir) = &cli.out_dir {
        cfg.render.out_dir = dir.clone();
    }

    let stdin = io::stdin();
    let wave = ParameterIntake::new(stdin.lock(), io::stdout())
        .read(&cli.wave.preset())
        .context("invalid wave parameters")?;
    let p = &wave.params;
    info!(
        kind = wave.kind.name(),
        velocity = p.velocity(),
        frequency = p.frequency(),
        period = p.period(),
        "string ready"
    );

    match cli.command.unwrap_or(Command::Plot) {
        Command::Plot => plot(&wave, &cfg),
        Command::Compare { t_max, dx } => compare(&wave, &cfg, t_max, dx),
    }
}
