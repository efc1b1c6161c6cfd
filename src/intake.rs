//! Reading the string parameters from a line-oriented terminal.
use std::io::{BufRead, Write};

use tracing::warn;

use crate::error::IntakeError;
use crate::model::{Wave, WaveKind, WaveParameters};

/// Values already known before prompting; only the missing ones are asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Preset {
    pub length: Option<f64>,
    pub amplitude: Option<f64>,
    pub weight: Option<f64>,
    pub density: Option<f64>,
    pub mode: Option<u32>,
    pub kind: Option<WaveKind>,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Any,
    NonNegative,
    Positive,
}

impl Bound {
    fn admits(self, value: f64) -> bool {
        value.is_finite()
            && match self {
                Bound::Any => true,
                Bound::NonNegative => value >= 0.,
                Bound::Positive => value > 0.,
            }
    }
}

fn invalid(field: &'static str, value: &str) -> IntakeError {
    IntakeError::InvalidInput {
        field,
        value: value.to_string(),
    }
}

/// Maps the menu answer to a wave kind: `2` is travelling, everything else
/// standing.
pub fn parse_selector(text: &str) -> WaveKind {
    if text.trim() == "2" {
        WaveKind::Travelling
    } else {
        WaveKind::Standing
    }
}

/// Prompts on `output`, answers are read from `input`. Fails on the first bad
/// answer.
pub struct ParameterIntake<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ParameterIntake<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ParameterIntake { input, output }
    }

    fn ask(&mut self, field: &'static str, prompt: &str) -> Result<String, IntakeError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(invalid(field, ""));
        }
        Ok(line.trim().to_string())
    }

    fn scalar(
        &mut self,
        preset: Option<f64>,
        field: &'static str,
        prompt: &str,
        bound: Bound,
    ) -> Result<f64, IntakeError> {
        let value = match preset {
            Some(v) => v,
            None => {
                let text = self.ask(field, prompt)?;
                text.parse::<f64>().map_err(|_| invalid(field, &text))?
            }
        };
        if bound.admits(value) {
            Ok(value)
        } else {
            Err(invalid(field, &value.to_string()))
        }
    }

    fn mode(&mut self, preset: Option<u32>) -> Result<u32, IntakeError> {
        let mode = match preset {
            Some(n) => n,
            None => {
                let text = self.ask("mode", "Vibration mode number (positive integer): ")?;
                text.parse::<u32>().map_err(|_| invalid("mode", &text))?
            }
        };
        if mode == 0 {
            warn!("mode 0 gives a flat string");
        }
        Ok(mode)
    }

    fn kind(&mut self, preset: Option<WaveKind>) -> Result<WaveKind, IntakeError> {
        if let Some(kind) = preset {
            return Ok(kind);
        }
        writeln!(self.output, "Select the wave type:")?;
        writeln!(self.output, "1. Standing")?;
        writeln!(self.output, "2. Travelling")?;
        // a closed input simply keeps the default
        let answer = match self.ask("wave type", "Enter 1 or 2: ") {
            Ok(text) => text,
            Err(IntakeError::InvalidInput { .. }) => String::new(),
            Err(err) => return Err(err),
        };
        Ok(parse_selector(&answer))
    }

    /// Asks for length, amplitude, weight, density, mode and the wave type,
    /// in that order, skipping everything `preset` already provides.
    pub fn read(&mut self, preset: &Preset) -> Result<Wave, IntakeError> {
        let length = self.scalar(
            preset.length,
            "length",
            "String length in metres: ",
            Bound::Positive,
        )?;
        let amplitude = self.scalar(
            preset.amplitude,
            "amplitude",
            "Wave amplitude in metres: ",
            Bound::Any,
        )?;
        let weight = self.scalar(
            preset.weight,
            "weight",
            "String tension (weight) in newtons: ",
            Bound::NonNegative,
        )?;
        let density = self.scalar(
            preset.density,
            "density",
            "Linear mass density of the string (kg/m): ",
            Bound::Positive,
        )?;
        let mode = self.mode(preset.mode)?;
        let kind = self.kind(preset.kind)?;

        let params = WaveParameters::new(length, amplitude, weight, density, mode)?;
        Ok(Wave::new(params, kind))
    }
}
