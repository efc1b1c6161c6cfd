//! Static profile of the string at rest time `t = 0`.
use std::path::Path;

use ndarray::Array1;
use plotters::style::GREEN;
use tracing::info;

use crate::config::StaticPlotConfig;
use crate::error::{PlotError, WaveError};
use crate::model::Wave;
use crate::plot::{Chart, PlotSurface, Series, SvgFigure};
use crate::sampler::{self, Grid};

pub const TITLE: &str = "Wave profile sampled at t = 0";

/// A one-shot sample of the closed-form solution on the coarse grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticProfile {
    pub grid: Grid,
    pub ys: Array1<f64>,
}

impl StaticProfile {
    pub fn sample(wave: &Wave, config: &StaticPlotConfig) -> Result<Self, WaveError> {
        let grid = Grid::stepped(wave.params.length(), config.dx)?;
        let ys = sampler::evaluate(wave, &grid, 0.);
        Ok(StaticProfile { grid, ys })
    }

    pub fn chart(&self) -> Chart {
        Chart::profile(TITLE, &self.grid, self.ys.view())
    }

    /// Hands the profile to `surface` as a single figure.
    pub fn plot<S: PlotSurface>(&self, surface: &mut S) -> Result<(), PlotError> {
        let series = [Series::new(self.grid.positions(), self.ys.view(), GREEN)];
        surface.present(&self.chart(), &series)
    }
}

/// Samples `wave` at `t = 0` and writes the figure to `path`.
pub fn render_svg(
    wave: &Wave,
    config: &StaticPlotConfig,
    path: &Path,
    size: (u32, u32),
) -> Result<StaticProfile, PlotError> {
    let profile = StaticProfile::sample(wave, config)?;
    let mut figure = SvgFigure::new(path, size);
    profile.plot(&mut figure)?;
    info!(points = profile.grid.len(), path = %path.display(), "wrote static profile");
    Ok(profile)
}
