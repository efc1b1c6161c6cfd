//! Analytic displacement of a vibrating string.
//!
//! The wave speed follows from the tension and the linear mass density,
//! `c = sqrt(mg / u)`, and the fundamental frequency of a string of length `L`
//! fixed at both ends is `c / 2L`.
use std::f64::consts::PI;

use crate::error::WaveError;

/// Anything that can report the transverse displacement of the string at
/// position `x` and time `t`.
pub trait Displacement {
    fn displacement(&self, x: f64, t: f64) -> f64;
}

/// Physical parameters of the string. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    length: f64,
    amplitude: f64,
    weight: f64,
    density: f64,
    mode: u32,
}

impl WaveParameters {
    /// - `length`: string length `L` in metres, `L > 0`
    /// - `amplitude`: peak displacement `A` in metres
    /// - `weight`: tension `mg` in newtons, `mg >= 0`
    /// - `density`: linear mass density `u` in kg/m, `u > 0`
    /// - `mode`: vibration mode `n`; `n = 0` gives a flat string
    pub fn new(
        length: f64,
        amplitude: f64,
        weight: f64,
        density: f64,
        mode: u32,
    ) -> Result<Self, WaveError> {
        if !length.is_finite() || length <= 0. {
            return Err(WaveError::invalid("length", length, "must be finite and positive"));
        }
        if !amplitude.is_finite() {
            return Err(WaveError::invalid("amplitude", amplitude, "must be finite"));
        }
        if !weight.is_finite() || weight < 0. {
            return Err(WaveError::invalid("weight", weight, "must be finite and non-negative"));
        }
        if !density.is_finite() || density <= 0. {
            return Err(WaveError::invalid("density", density, "must be finite and positive"));
        }
        Ok(WaveParameters {
            length,
            amplitude,
            weight,
            density,
            mode,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Propagation speed `sqrt(mg / u)`.
    pub fn velocity(&self) -> f64 {
        (self.weight / self.density).sqrt()
    }

    pub fn frequency(&self) -> f64 {
        self.velocity() / (2. * self.length)
    }

    /// `1 / frequency`; infinite for a slack string.
    pub fn period(&self) -> f64 {
        1. / self.frequency()
    }

    /// `k = nπ / L`
    pub fn wavenumber(&self) -> f64 {
        self.mode as f64 * PI / self.length
    }

    /// `ω = 2π / period`
    pub fn angular_frequency(&self) -> f64 {
        2. * PI / self.period()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveKind {
    #[default]
    Standing,
    Travelling,
}

impl WaveKind {
    pub fn name(self) -> &'static str {
        match self {
            WaveKind::Standing => "standing",
            WaveKind::Travelling => "travelling",
        }
    }
}

/// A string vibrating in one of the two supported patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub params: WaveParameters,
    pub kind: WaveKind,
}

impl Wave {
    pub fn new(params: WaveParameters, kind: WaveKind) -> Self {
        Wave { params, kind }
    }

    pub fn standing(params: WaveParameters) -> Self {
        Wave::new(params, WaveKind::Standing)
    }

    pub fn travelling(params: WaveParameters) -> Self {
        Wave::new(params, WaveKind::Travelling)
    }
}

impl Displacement for Wave {
    /// Evaluates the closed form for any real `x` and `t`, including positions
    /// outside `[0, L]`.
    #[inline]
    fn displacement(&self, x: f64, t: f64) -> f64 {
        let k = self.params.wavenumber();
        let omega = self.params.angular_frequency();
        let a = self.params.amplitude;
        match self.kind {
            WaveKind::Standing => a * (k * x).sin() * (omega * t).cos(),
            WaveKind::Travelling => a * (k * x - omega * t).sin(),
        }
    }
}
