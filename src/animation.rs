//! Animated string: the analytic profile re-sampled at advancing time.
use std::path::Path;

use ndarray::{Array1, ArrayView1};
use plotters::style::BLUE;
use tracing::{debug, info};

use crate::config::AnimationConfig;
use crate::error::PlotError;
use crate::model::Wave;
use crate::plot::{Chart, GifAnimation, PlotSurface, Series};
use crate::sampler::{self, Grid};
use crate::timing::timed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// One produced frame. `ys` borrows the runner's buffer, which is overwritten
/// by the next tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub index: usize,
    pub time: f64,
    pub ys: ArrayView1<'a, f64>,
}

/// Produces frames `0, 1, ..., frames - 1, 0, ...` while running.
#[derive(Debug, Clone)]
pub struct AnimationRunner {
    wave: Wave,
    grid: Grid,
    ys: Array1<f64>,
    chart: Chart,
    frames: usize,
    next: usize,
    state: RunState,
}

impl AnimationRunner {
    pub fn new(wave: Wave, config: &AnimationConfig) -> Self {
        let grid = Grid::linspace(wave.params.length(), config.points);
        let ys = sampler::evaluate(&wave, &grid, 0.);
        AnimationRunner {
            chart: Chart::animation(&wave.params),
            wave,
            grid,
            ys,
            frames: config.frames.max(1),
            next: 0,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Frames in one playback cycle.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Current content of the y buffer.
    pub fn samples(&self) -> ArrayView1<f64> {
        self.ys.view()
    }

    /// `index * period / frames`. A slack string has an infinite period and
    /// never moves, so every frame sits at `t = 0`.
    pub fn frame_time(&self, index: usize) -> f64 {
        let period = self.wave.params.period();
        if period.is_finite() {
            index as f64 * period / self.frames as f64
        } else {
            0.
        }
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
    }

    /// Stops producing frames. The next `start` resumes where it stopped.
    pub fn stop(&mut self) {
        self.state = RunState::Idle;
    }

    fn advance(&mut self) -> Option<(usize, f64)> {
        if self.state != RunState::Running {
            return None;
        }
        let index = self.next;
        let time = self.frame_time(index);
        #[cfg(not(feature = "parallel"))]
        sampler::evaluate_into(&self.wave, &self.grid, time, self.ys.view_mut());
        #[cfg(feature = "parallel")]
        sampler::par_evaluate_into(&self.wave, &self.grid, time, self.ys.view_mut());
        self.next = (index + 1) % self.frames;
        debug!(index, time, "animation frame");
        Some((index, time))
    }

    /// Samples the next frame, or `None` while idle.
    pub fn tick(&mut self) -> Option<Frame<'_>> {
        let (index, time) = self.advance()?;
        Some(Frame {
            index,
            time,
            ys: self.ys.view(),
        })
    }

    /// Plays one full cycle into `surface` and returns to idle. A surface
    /// error ends the cycle early.
    pub fn run_cycle<S: PlotSurface>(&mut self, surface: &mut S) -> Result<usize, PlotError> {
        self.start();
        let mut shown = 0;
        while shown < self.frames {
            if self.advance().is_none() {
                break;
            }
            let series = [Series::new(self.grid.positions(), self.ys.view(), BLUE)];
            if let Err(err) = surface.present(&self.chart, &series) {
                self.stop();
                return Err(err);
            }
            shown += 1;
        }
        self.stop();
        Ok(shown)
    }
}

/// Renders one playback cycle of `wave` as an animated GIF and logs how long
/// it took.
pub fn render_gif(
    wave: &Wave,
    config: &AnimationConfig,
    path: &Path,
    size: (u32, u32),
) -> Result<usize, PlotError> {
    timed("render_gif", || -> Result<usize, PlotError> {
        let mut runner = AnimationRunner::new(*wave, config);
        let mut gif = GifAnimation::create(path, size, config.interval_ms)?;
        let shown = runner.run_cycle(&mut gif)?;
        info!(frames = gif.frames(), path = %path.display(), "wrote animation");
        Ok(shown)
    })
}
