use crate::foundation::error::{CanopyError, CanopyResult};
use serde::{Deserialize, Serialize};

/// Oscillator waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Sine wave.
    #[default]
    Sine,
    /// Square wave, high for the first half of each cycle.
    Square,
    /// Triangle wave with the same peaks and zero crossings as the sine.
    Triangle,
}

impl Waveform {
    /// Unit waveform in `[-1, 1]` at cycle position `x` in `[0, 1)`.
    pub fn shape(self, x: f64) -> f64 {
        match self {
            Self::Sine => (std::f64::consts::TAU * x).sin(),
            Self::Square => {
                if x < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Triangle => {
                if x < 0.25 {
                    4.0 * x
                } else if x < 0.75 {
                    2.0 - 4.0 * x
                } else {
                    4.0 * x - 4.0
                }
            }
        }
    }
}

/// Oscillator producing `offset + amplitude * waveform(cycle position)`.
///
/// Amplitude and offset are the stored representation. The min/max view is derived on read and
/// converted back on write, so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeriodicVariation {
    /// Waveform shape.
    pub periodic_type: Waveform,
    /// Half of the peak-to-peak swing.
    pub amplitude: f64,
    /// Center value.
    pub offset: f64,
    /// Cycle length in seconds (`> 0`).
    pub period: f64,
    /// Time shift in seconds added before wrapping into the cycle.
    pub phase: f64,
}

impl Default for PeriodicVariation {
    fn default() -> Self {
        Self {
            periodic_type: Waveform::Sine,
            amplitude: 0.5,
            offset: 0.5,
            period: 1.0,
            phase: 0.0,
        }
    }
}

impl PeriodicVariation {
    /// Build an oscillator from amplitude and offset.
    pub fn new(periodic_type: Waveform, amplitude: f64, offset: f64, period: f64) -> Self {
        Self {
            periodic_type,
            amplitude,
            offset,
            period,
            phase: 0.0,
        }
    }

    /// Build an oscillator swinging between `min` and `max`.
    pub fn from_min_max(periodic_type: Waveform, min: f64, max: f64, period: f64) -> Self {
        let mut v = Self::new(periodic_type, 0.0, 0.0, period);
        v.set_min_max(min, max);
        v
    }

    /// Builder-style phase setter.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Lowest value of the swing.
    pub fn min(&self) -> f64 {
        self.offset - self.amplitude
    }

    /// Highest value of the swing.
    pub fn max(&self) -> f64 {
        self.offset + self.amplitude
    }

    /// Set both ends of the swing.
    pub fn set_min_max(&mut self, min: f64, max: f64) {
        self.amplitude = (max - min) / 2.0;
        self.offset = (max + min) / 2.0;
    }

    /// Move the low end of the swing, keeping the high end.
    pub fn set_min(&mut self, min: f64) {
        let max = self.max();
        self.set_min_max(min, max);
    }

    /// Move the high end of the swing, keeping the low end.
    pub fn set_max(&mut self, max: f64) {
        let min = self.min();
        self.set_min_max(min, max);
    }

    /// Oscillator value at `time` seconds; independent of the segment duration.
    pub fn value_at(&self, time: f64) -> CanopyResult<f64> {
        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(CanopyError::animation(format!(
                "periodic period must be > 0, got {}",
                self.period
            )));
        }
        let x = (time + self.phase).rem_euclid(self.period) / self.period;
        Ok(self.offset + self.amplitude * self.periodic_type.shape(x))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/periodic.rs"]
mod tests;
