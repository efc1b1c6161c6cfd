//! Position grids along the string and their displacement samples.
use ndarray::{Array1, ArrayView1, ArrayViewMut1, Zip};

use crate::error::WaveError;
use crate::model::Displacement;

/// Default spacing of the static grid.
pub const STATIC_DX: f64 = 0.1;
/// Default point count of the animation grid.
pub const ANIMATION_POINTS: usize = 100;
/// Largest grid `Grid::stepped` agrees to build.
pub const MAX_POINTS: usize = 1 << 24;

/// Ordered sample positions. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Array1<f64>,
}

impl Grid {
    /// `floor(length / dx) + 1` points at `i * dx`.
    ///
    /// The last point is not clamped to `length`, so it overshoots by less than
    /// `dx` whenever `length` is not a multiple of `dx`.
    pub fn stepped(length: f64, dx: f64) -> Result<Grid, WaveError> {
        if !(dx.is_finite() && dx > 0.) {
            return Err(WaveError::invalid("dx", dx, "must be finite and positive"));
        }
        if !(length.is_finite() && length >= 0.) {
            return Err(WaveError::invalid("length", length, "must be finite and non-negative"));
        }
        let intervals = (length / dx).floor();
        if intervals >= MAX_POINTS as f64 {
            return Err(WaveError::invalid("dx", dx, "too fine for the string length"));
        }
        let count = intervals as usize + 1;
        Ok(Grid {
            xs: Array1::from_shape_fn(count, |i| i as f64 * dx),
        })
    }

    /// `count` evenly spaced points covering `[0, length]` inclusive.
    pub fn linspace(length: f64, count: usize) -> Grid {
        Grid {
            xs: Array1::linspace(0., length, count),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn positions(&self) -> ArrayView1<f64> {
        self.xs.view()
    }

    /// `(first, last)` position, `(0, 0)` for an empty grid.
    pub fn span(&self) -> (f64, f64) {
        match (self.xs.first(), self.xs.last()) {
            (Some(&a), Some(&b)) => (a, b),
            _ => (0., 0.),
        }
    }
}

/// Samples `wave` at every grid position at time `t`.
pub fn evaluate<W: Displacement>(wave: &W, grid: &Grid, t: f64) -> Array1<f64> {
    grid.xs.mapv(|x| wave.displacement(x, t))
}

/// Same as `evaluate`, but overwrites `ys` in place.
pub fn evaluate_into<W: Displacement>(wave: &W, grid: &Grid, t: f64, ys: ArrayViewMut1<f64>) {
    assert_eq!(ys.len(), grid.len());
    Zip::from(ys)
        .and(&grid.xs)
        .for_each(|y, &x| *y = wave.displacement(x, t));
}

/// Same as `evaluate_into`, splitting the grid across the rayon pool.
#[cfg(feature = "parallel")]
pub fn par_evaluate_into<W>(wave: &W, grid: &Grid, t: f64, ys: ArrayViewMut1<f64>)
where
    W: Displacement + Sync,
{
    assert_eq!(ys.len(), grid.len());
    Zip::from(ys)
        .and(&grid.xs)
        .par_for_each(|y, &x| *y = wave.displacement(x, t));
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Wave, WaveParameters};

    #[test]
    fn stepped_grid_count() {
        let g = Grid::stepped(2.0, STATIC_DX).unwrap();
        assert_eq!(g.len(), 21);
        let (a, b) = g.span();
        assert_eq!(a, 0.);
        assert!((b - 2.0).abs() < 1e-12);

        assert_eq!(Grid::stepped(1.0, STATIC_DX).unwrap().len(), 11);
        for &l in &[0.35, 1.7, 3.14159, 10.] {
            let g = Grid::stepped(l, STATIC_DX).unwrap();
            assert_eq!(g.len(), (l / STATIC_DX).floor() as usize + 1);
        }
    }

    #[test]
    fn stepped_grid_overshoot_is_kept() {
        // floor(0.25 / 0.1) + 1 = 3 points: 0.0, 0.1, 0.2
        let g = Grid::stepped(0.25, STATIC_DX).unwrap();
        assert_eq!(g.len(), 3);
        assert!((g.span().1 - 0.2).abs() < 1e-12);

        // last point is i * dx even when it does not land on the length
        let g = Grid::stepped(0.95, 0.3).unwrap();
        assert_eq!(g.len(), 4);
        assert!((g.span().1 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn stepped_grid_rejects_bad_spacing() {
        for &dx in &[0., -0.1, f64::NAN, f64::INFINITY] {
            match Grid::stepped(1.0, dx) {
                Err(WaveError::InvalidParameter { name, .. }) => assert_eq!(name, "dx"),
                other => panic!("dx = {}: unexpected {:?}", dx, other),
            }
        }
        // floor(L / dx) would saturate the point count
        assert!(Grid::stepped(1.0, 1e-300).is_err());
        assert!(Grid::stepped(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn linspace_grid() {
        let g = Grid::linspace(1.0, ANIMATION_POINTS);
        assert_eq!(g.len(), 100);
        for (i, &x) in g.positions().iter().enumerate() {
            assert!((x - i as f64 / 99.).abs() < 1e-12, "x[{}] = {}", i, x);
        }
        assert_eq!(g.span().0, 0.);
        assert!((g.span().1 - 1.).abs() < 1e-12);

        let g = Grid::linspace(3.5, ANIMATION_POINTS);
        assert_eq!(g.len(), 100);
        assert!((g.span().1 - 3.5).abs() < 1e-12);
    }

    #[test]
    fn evaluate_matches_pointwise() {
        let w = Wave::travelling(WaveParameters::new(1.0, 0.05, 10.0, 0.01, 2).unwrap());
        let g = Grid::linspace(1.0, ANIMATION_POINTS);
        let t = 0.013;
        let ys = evaluate(&w, &g, t);
        assert_eq!(ys.len(), g.len());
        for (&x, &y) in g.positions().iter().zip(ys.iter()) {
            assert_eq!(y, w.displacement(x, t));
        }

        let mut buf = Array1::from_elem(g.len(), 7.);
        evaluate_into(&w, &g, t, buf.view_mut());
        assert_eq!(buf, ys);
    }

    #[test]
    fn static_sample_at_rest() {
        let w = Wave::standing(WaveParameters::new(2.0, 0.1, 10.0, 0.01, 1).unwrap());
        let g = Grid::stepped(2.0, STATIC_DX).unwrap();
        let ys = evaluate(&w, &g, 0.);
        assert!(ys[0].abs() < 1e-15);
        assert!((ys[10] - 0.1).abs() < 1e-12);
        assert!(ys[20].abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn evaluate_into_checks_length() {
        let w = Wave::standing(WaveParameters::new(1.0, 0.05, 10.0, 0.01, 1).unwrap());
        let g = Grid::linspace(1.0, 10);
        let mut buf = Array1::zeros(9);
        evaluate_into(&w, &g, 0., buf.view_mut());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_serial() {
        let w = Wave::standing(WaveParameters::new(1.0, 0.05, 10.0, 0.01, 3).unwrap());
        let g = Grid::linspace(1.0, 10_000);
        let mut a = Array1::zeros(g.len());
        let mut b = Array1::zeros(g.len());
        evaluate_into(&w, &g, 0.02, a.view_mut());
        par_evaluate_into(&w, &g, 0.02, b.view_mut());
        assert_eq!(a, b);
    }
}
