//! Transverse waves on a string.
//!
//! A string of length `L`, tension `mg` and linear mass density `u` vibrating
//! in mode `n`, either as a standing wave `A sin(kx) cos(ωt)` or as a
//! travelling wave `A sin(kx - ωt)`, with `k = nπ/L` and `ω = 2π/T`.
//!
//! - `model`: wave parameters and the closed-form displacement
//! - `sampler`: position grids and their displacement samples
//! - `animation`: frame-by-frame re-sampling at advancing time
//! - `static_plot`: a single sample at `t = 0`
//! - `fdm`: explicit leapfrog integration of the string equation
//!
//! Rendering goes through the `plot::PlotSurface` trait.
pub mod animation;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod fdm;
pub mod intake;
pub mod model;
pub mod plot;
pub mod sampler;
pub mod static_plot;
pub mod timing;

pub use crate::error::{IntakeError, PlotError, WaveError};
pub use crate::model::{Displacement, Wave, WaveKind, WaveParameters};
pub use crate::sampler::{evaluate, evaluate_into, Grid};
