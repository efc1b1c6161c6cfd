//! Leapfrog integration set against the closed form.
use ndarray::Array1;
use plotters::style::{BLUE, RED};
use tracing::info;

use crate::error::{PlotError, WaveError};
use crate::fdm::{self, Integrator};
use crate::model::Wave;
use crate::plot::{Chart, PlotSurface, Series};
use crate::sampler::{self, Grid};

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub time: f64,
    pub max_error: f64,
    pub grid: Grid,
    pub numeric: Array1<f64>,
    pub analytic: Array1<f64>,
}

impl Comparison {
    /// Integrates `wave` up to the integrator horizon and samples the closed
    /// form at the time of the last snapshot.
    pub fn run(wave: &Wave, integrator: &Integrator) -> Result<Self, WaveError> {
        let grid = integrator.grid(wave.params.length());
        let mut snapshots = integrator.integrate(wave)?;
        let last = match snapshots.pop() {
            Some(s) => s,
            None => {
                return Err(WaveError::invalid(
                    "t_max",
                    integrator.t_max,
                    "no snapshot produced",
                ))
            }
        };
        let max_error = fdm::max_error(wave, &grid, &last);
        let analytic = sampler::evaluate(wave, &grid, last.time);
        info!(time = last.time, max_error, "integrated string");
        Ok(Comparison {
            time: last.time,
            max_error,
            grid,
            numeric: last.ys,
            analytic,
        })
    }

    pub fn plot<S: PlotSurface>(&self, surface: &mut S) -> Result<(), PlotError> {
        let title = format!("Leapfrog vs closed form at t = {:.4} s", self.time);
        let chart = Chart::profile(&title, &self.grid, self.analytic.view());
        let series = [
            Series::new(self.grid.positions(), self.analytic.view(), RED).labelled("closed form"),
            Series::new(self.grid.positions(), self.numeric.view(), BLUE).labelled("leapfrog"),
        ];
        surface.present(&chart, &series)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::WaveParameters;
    use crate::plot::Recorder;

    #[test]
    fn fundamental_mode_agrees() {
        let p = WaveParameters::new(1.0, 0.05, 10.0, 0.01, 1).unwrap();
        let it = Integrator {
            dx: 0.01,
            t_max: 0.2,
            ..Integrator::default()
        };
        let cmp = Comparison::run(&Wave::standing(p), &it).unwrap();
        assert!((cmp.time - 0.2).abs() < 1e-9);
        assert_eq!(cmp.numeric.len(), cmp.grid.len());
        assert!(cmp.max_error < 1e-3, "error {}", cmp.max_error);

        let mut rec = Recorder::default();
        cmp.plot(&mut rec).unwrap();
        assert_eq!(rec.curves[0].len(), 2);
        assert_eq!(rec.curves[0][0].1, cmp.analytic.to_vec());
    }

    #[test]
    fn propagates_bad_settings() {
        let p = WaveParameters::new(1.0, 0.05, 10.0, 0.01, 1).unwrap();
        let it = Integrator {
            courant: 2.,
            ..Integrator::default()
        };
        assert!(Comparison::run(&Wave::standing(p), &it).is_err());
    }
}
