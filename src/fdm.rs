//! Finite difference method for the string equation `y_tt = c² y_xx` with
//! Dirichlet boundary data.
use ndarray::Array1;
use tracing::debug;

use crate::error::WaveError;
use crate::model::{Displacement, Wave};
use crate::sampler::Grid;

fn wave_step_sub(u: &[f64], v: &[f64], w: &mut [f64], rows: (usize, usize), mu: f64) {
    let (rs, re) = rows;
    let n = v.len();
    debug_assert!(rs >= 1 && rs < re && re < n);
    debug_assert_eq!(u.len(), n);
    debug_assert_eq!(w.len(), re - rs);

    let cc = 2. - 2. * mu;
    for (j, wj) in w.iter_mut().enumerate() {
        let i = rs + j;
        *wj = cc * v[i] - u[i] + mu * (v[i - 1] + v[i + 1]);
    }
}

/// Performs one step of the central difference scheme for the string equation.
///
/// The discretization is the standard central 2nd order difference in both space and time.
///
/// - `u`: value at step `n - 1`
/// - `v`: value at step `n`
/// - `w`: computed value at step `n + 1`
/// - `ends`: prescribed values of `w` at the first and the last node
/// - `mu`: c²τ²/h², where τ is the time step and h is the space step
pub fn wave_step(u: &[f64], v: &[f64], w: &mut [f64], ends: (f64, f64), mu: f64) {
    let n = v.len();
    assert_eq!(u.len(), n);
    assert_eq!(w.len(), n);
    assert!(n >= 2, "the string needs at least its two end nodes");

    if n > 2 {
        wave_step_sub(u, v, &mut w[1..n - 1], (1, n - 1), mu);
    }
    w[0] = ends.0;
    w[n - 1] = ends.1;
}

/// Same as `wave_step`, splitting the interior across the rayon pool.
///
/// Only pays off for very fine grids.
#[cfg(feature = "parallel")]
pub fn wave_step_parallel(u: &[f64], v: &[f64], w: &mut [f64], ends: (f64, f64), mu: f64) {
    let n = v.len();
    assert_eq!(u.len(), n);
    assert_eq!(w.len(), n);
    assert!(n >= 2, "the string needs at least its two end nodes");

    fn inner(u: &[f64], v: &[f64], w: &mut [f64], rows: (usize, usize), mu: f64) {
        let elems_per_thread = 200 * 1024;
        let (row_start, row_end) = rows;
        if row_end - row_start > 1 && w.len() > elems_per_thread {
            let mid = (row_start + row_end) / 2;
            let (left, right) = w.split_at_mut(mid - row_start);
            rayon::join(
                || inner(u, v, left, (row_start, mid), mu),
                || inner(u, v, right, (mid, row_end), mu),
            );
        } else {
            wave_step_sub(u, v, w, rows, mu);
        }
    }

    if n > 2 {
        inner(u, v, &mut w[1..n - 1], (1, n - 1), mu);
    }
    w[0] = ends.0;
    w[n - 1] = ends.1;
}

/// Time step actually used by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Space step `h`.
    pub h: f64,
    /// Internal time step `τ`.
    pub tau: f64,
    /// Internal steps per output interval.
    pub substeps: usize,
    /// `(cτ/h)²`
    pub mu: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub ys: Array1<f64>,
}

/// Explicit leapfrog integration of the string, started from the analytic
/// profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Output interval.
    pub dt: f64,
    /// Target space step; snapped so the grid ends exactly at `L`.
    pub dx: f64,
    pub t_max: f64,
    /// Upper bound on `cτ/h`, in `(0, 1]`.
    pub courant: f64,
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator {
            dt: 0.01,
            dx: 0.1,
            t_max: 2.,
            courant: 0.9,
        }
    }
}

impl Integrator {
    fn validate(&self) -> Result<(), WaveError> {
        if !(self.dt.is_finite() && self.dt > 0.) {
            return Err(WaveError::invalid("dt", self.dt, "must be finite and positive"));
        }
        if !(self.dx.is_finite() && self.dx > 0.) {
            return Err(WaveError::invalid("dx", self.dx, "must be finite and positive"));
        }
        if !(self.t_max.is_finite() && self.t_max >= 0.) {
            return Err(WaveError::invalid("t_max", self.t_max, "must be finite and non-negative"));
        }
        if !(self.courant > 0. && self.courant <= 1.) {
            return Err(WaveError::invalid("courant", self.courant, "must lie in (0, 1]"));
        }
        Ok(())
    }

    /// Grid with at least three nodes, end nodes at `0` and `length`.
    pub fn grid(&self, length: f64) -> Grid {
        let intervals = ((length / self.dx).round() as usize).max(2);
        Grid::linspace(length, intervals + 1)
    }

    pub fn plan(&self, wave: &Wave) -> Result<StepPlan, WaveError> {
        self.validate()?;
        let length = wave.params.length();
        let intervals = self.grid(length).len() - 1;
        let h = length / intervals as f64;
        let c = wave.params.velocity();

        let substeps = if c > 0. {
            let tau_max = self.courant * h / c;
            ((self.dt / tau_max).ceil() as usize).max(1)
        } else {
            1
        };
        let tau = self.dt / substeps as f64;
        let mu = (c * tau / h).powi(2);
        debug!(h, tau, substeps, mu, "planned leapfrog step");
        Ok(StepPlan {
            h,
            tau,
            substeps,
            mu,
        })
    }

    /// Integrates up to `t_max`, returning the profile at every multiple of
    /// `dt` (including `t = 0`).
    pub fn integrate(&self, wave: &Wave) -> Result<Vec<Snapshot>, WaveError> {
        let plan = self.plan(wave)?;
        let grid = self.grid(wave.params.length());
        let xs = grid.positions();
        let n = xs.len();
        let outputs = (self.t_max / self.dt + 1e-9).floor() as usize;
        let last = xs[n - 1];

        let sample = |t: f64| -> Vec<f64> { xs.iter().map(|&x| wave.displacement(x, t)).collect() };

        let mut u = sample(0.);
        let mut v = sample(plan.tau);
        let mut w = vec![0.; n];

        let mut snapshots = Vec::with_capacity(outputs + 1);
        snapshots.push(Snapshot {
            time: 0.,
            ys: Array1::from(u.clone()),
        });
        if outputs == 0 {
            return Ok(snapshots);
        }
        if plan.substeps == 1 {
            snapshots.push(Snapshot {
                time: plan.tau,
                ys: Array1::from(v.clone()),
            });
        }

        // `v` holds level 1
        let total = outputs * plan.substeps;
        for step in 2..=total {
            let t = step as f64 * plan.tau;
            let ends = (wave.displacement(0., t), wave.displacement(last, t));
            #[cfg(feature = "parallel")]
            wave_step_parallel(&u, &v, &mut w, ends, plan.mu);
            #[cfg(not(feature = "parallel"))]
            wave_step(&u, &v, &mut w, ends, plan.mu);

            std::mem::swap(&mut u, &mut v);
            std::mem::swap(&mut v, &mut w);

            if step % plan.substeps == 0 {
                snapshots.push(Snapshot {
                    time: t,
                    ys: Array1::from(v.clone()),
                });
            }
        }
        Ok(snapshots)
    }
}

/// Largest absolute difference between a snapshot and the analytic solution.
pub fn max_error(wave: &Wave, grid: &Grid, snapshot: &Snapshot) -> f64 {
    grid.positions()
        .iter()
        .zip(snapshot.ys.iter())
        .map(|(&x, &y)| (y - wave.displacement(x, snapshot.time)).abs())
        .fold(0., f64::max)
}
