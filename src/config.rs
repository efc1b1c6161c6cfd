use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::fdm::Integrator;
use crate::sampler::{ANIMATION_POINTS, STATIC_DX};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "RenderConfig::default_width")]
    pub width: u32,
    #[serde(default = "RenderConfig::default_height")]
    pub height: u32,
}

impl RenderConfig {
    fn default_out_dir() -> PathBuf {
        PathBuf::from("target/plots")
    }
    fn default_width() -> u32 {
        800
    }
    fn default_height() -> u32 {
        500
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            out_dir: Self::default_out_dir(),
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    /// Frames per playback cycle.
    #[serde(default = "AnimationConfig::default_frames")]
    pub frames: usize,
    #[serde(default = "AnimationConfig::default_interval_ms")]
    pub interval_ms: u32,
    /// Sample points along the string.
    #[serde(default = "AnimationConfig::default_points")]
    pub points: usize,
}

impl AnimationConfig {
    fn default_frames() -> usize {
        100
    }
    fn default_interval_ms() -> u32 {
        50
    }
    fn default_points() -> usize {
        ANIMATION_POINTS
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: Self::default_frames(),
            interval_ms: Self::default_interval_ms(),
            points: Self::default_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticPlotConfig {
    #[serde(default = "StaticPlotConfig::default_dx")]
    pub dx: f64,
}

impl StaticPlotConfig {
    fn default_dx() -> f64 {
        STATIC_DX
    }
}

impl Default for StaticPlotConfig {
    fn default() -> Self {
        Self {
            dx: Self::default_dx(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegratorConfig {
    #[serde(default = "IntegratorConfig::default_dt")]
    pub dt: f64,
    #[serde(default = "IntegratorConfig::default_dx")]
    pub dx: f64,
    #[serde(default = "IntegratorConfig::default_t_max")]
    pub t_max: f64,
    #[serde(default = "IntegratorConfig::default_courant")]
    pub courant: f64,
}

impl IntegratorConfig {
    fn default_dt() -> f64 {
        Integrator::default().dt
    }
    fn default_dx() -> f64 {
        Integrator::default().dx
    }
    fn default_t_max() -> f64 {
        Integrator::default().t_max
    }
    fn default_courant() -> f64 {
        Integrator::default().courant
    }

    pub fn integrator(&self) -> Integrator {
        Integrator {
            dt: self.dt,
            dx: self.dx,
            t_max: self.t_max,
            courant: self.courant,
        }
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            dt: Self::default_dt(),
            dx: Self::default_dx(),
            t_max: Self::default_t_max(),
            courant: Self::default_courant(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub static_plot: StaticPlotConfig,
    #[serde(default)]
    pub integrator: IntegratorConfig,
}

impl AppConfig {
    /// Replaces values the renderers cannot use by their defaults. Integrator
    /// settings are checked by the integrator itself.
    fn sanitized(mut self) -> Self {
        if self.render.width == 0 || self.render.height == 0 {
            warn!(
                "render size {}x{} is empty. Using {}x{}.",
                self.render.width,
                self.render.height,
                RenderConfig::default_width(),
                RenderConfig::default_height()
            );
            self.render.width = RenderConfig::default_width();
            self.render.height = RenderConfig::default_height();
        }
        if self.animation.frames == 0 {
            warn!("animation.frames = 0. Using {}.", AnimationConfig::default_frames());
            self.animation.frames = AnimationConfig::default_frames();
        }
        if self.animation.points < 2 {
            warn!(
                "animation.points = {} cannot span the string. Using {}.",
                self.animation.points,
                AnimationConfig::default_points()
            );
            self.animation.points = AnimationConfig::default_points();
        }
        let dx = self.static_plot.dx;
        if !(dx.is_finite() && dx > 0.) {
            warn!("static_plot.dx = {} is not a positive spacing. Using {}.", dx, STATIC_DX);
            self.static_plot.dx = StaticPlotConfig::default_dx();
        }
        self
    }

    /// Reads `path`, falling back to the defaults when the file is missing,
    /// unreadable or malformed, and per field when a value is out of range.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("failed to parse config {}: {}. Using defaults.", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                warn!("failed to read config {}: {}. Using defaults.", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_or_default(dir.path().join("absent.toml"));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.animation.frames, 100);
        assert_eq!(cfg.animation.interval_ms, 50);
        assert_eq!(cfg.animation.points, 100);
        assert_eq!(cfg.static_plot.dx, 0.1);
        assert_eq!(cfg.integrator.integrator(), Integrator::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.toml");
        fs::write(
            &path,
            "[render]\nout_dir = \"out\"\n\n[animation]\nframes = 24\n",
        )
        .unwrap();
        let cfg = AppConfig::load_or_default(&path);
        assert_eq!(cfg.render.out_dir, PathBuf::from("out"));
        assert_eq!(cfg.render.width, 800);
        assert_eq!(cfg.animation.frames, 24);
        assert_eq!(cfg.animation.interval_ms, 50);
        assert_eq!(cfg.integrator, IntegratorConfig::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[animation\nframes = ").unwrap();
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn unusable_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.toml");
        let text = "[render]\nwidth = 0\n\n\
                    [animation]\nframes = 0\npoints = 1\n\n\
                    [static_plot]\ndx = 0.0\n";
        fs::write(&path, text).unwrap();
        let cfg = AppConfig::load_or_default(&path);
        assert_eq!(cfg.render.size(), (800, 500));
        assert_eq!(cfg.animation.frames, 100);
        assert_eq!(cfg.animation.points, 100);
        assert_eq!(cfg.static_plot.dx, 0.1);

        fs::write(&path, "[static_plot]\ndx = -0.5\n").unwrap();
        assert_eq!(AppConfig::load_or_default(&path).static_plot.dx, 0.1);

        fs::write(&path, "[static_plot]\ndx = nan\n").unwrap();
        assert_eq!(AppConfig::load_or_default(&path).static_plot.dx, 0.1);

        fs::write(&path, "[static_plot]\ndx = 0.05\n").unwrap();
        assert_eq!(AppConfig::load_or_default(&path).static_plot.dx, 0.05);
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let cfg: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
