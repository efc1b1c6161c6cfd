use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::intake::Preset;
use crate::model::WaveKind;

/// Standing and travelling waves on a string
#[derive(Parser, Debug)]
#[command(name = "string-wave", author, version, about)]
pub struct Cli {
    /// Path to config TOML
    #[arg(long, default_value = "string_wave.toml")]
    pub config: PathBuf,

    /// Directory for rendered figures (overrides config)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub wave: WaveArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// String parameters; anything left out is asked for on the terminal.
#[derive(Args, Debug, Clone, Default)]
pub struct WaveArgs {
    /// String length in metres
    #[arg(long, global = true)]
    pub length: Option<f64>,

    /// Wave amplitude in metres
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub amplitude: Option<f64>,

    /// String tension (weight) in newtons
    #[arg(long, global = true)]
    pub weight: Option<f64>,

    /// Linear mass density in kg/m
    #[arg(long, global = true)]
    pub density: Option<f64>,

    /// Vibration mode number
    #[arg(long, global = true)]
    pub mode: Option<u32>,

    /// Wave type
    #[arg(long, value_enum, global = true)]
    pub kind: Option<KindArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Standing,
    Travelling,
}

impl From<KindArg> for WaveKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Standing => WaveKind::Standing,
            KindArg::Travelling => WaveKind::Travelling,
        }
    }
}

impl WaveArgs {
    pub fn preset(&self) -> Preset {
        Preset {
            length: self.length,
            amplitude: self.amplitude,
            weight: self.weight,
            density: self.density,
            mode: self.mode,
            kind: self.kind.map(WaveKind::from),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Render the animation and the static profile (default)
    Plot,

    /// Integrate the string with the leapfrog scheme and compare with the closed form
    Compare {
        /// Integration horizon in seconds (overrides config)
        #[arg(long)]
        t_max: Option<f64>,

        /// Target space step in metres (overrides config)
        #[arg(long)]
        dx: Option<f64>,
    },
}
