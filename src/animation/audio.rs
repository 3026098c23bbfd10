use crate::{
    animation::variation::SampleCtx,
    foundation::error::{CanopyError, CanopyResult},
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Precomputed audio analysis envelope indexed by transport time.
///
/// Values are amplitudes in `[0, 1]` sampled at `sample_rate` values per second, starting at
/// transport time 0.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSignal {
    sample_rate: f64,
    samples: Vec<f32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioSignalDef {
    sample_rate: f64,
    samples: Vec<f32>,
}

impl AudioSignal {
    /// Wrap an analysis envelope sampled at `sample_rate` values per second.
    pub fn new(sample_rate: f64, samples: Vec<f32>) -> CanopyResult<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(CanopyError::validation(format!(
                "audio signal sample rate must be > 0, got {sample_rate}"
            )));
        }
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Compute a peak-normalized RMS envelope from mono PCM.
    ///
    /// `pcm_rate` is the PCM sample rate in Hz; the envelope has `envelope_rate` values per
    /// second.
    pub fn from_pcm_rms(pcm: &[f32], pcm_rate: u32, envelope_rate: f64) -> CanopyResult<Self> {
        if pcm_rate == 0 {
            return Err(CanopyError::validation("pcm sample rate must be > 0"));
        }
        if !envelope_rate.is_finite() || envelope_rate <= 0.0 {
            return Err(CanopyError::validation(format!(
                "envelope rate must be > 0, got {envelope_rate}"
            )));
        }
        let window = ((f64::from(pcm_rate) / envelope_rate).round() as usize).max(1);

        let mut samples: Vec<f32> = pcm
            .chunks(window)
            .map(|chunk| {
                let sum_sq: f32 = chunk.iter().map(|s| s * s).sum();
                (sum_sq / chunk.len() as f32).sqrt()
            })
            .collect();

        let peak = samples.iter().copied().fold(0.0f32, f32::max);
        if peak > 0.0 {
            for s in &mut samples {
                *s /= peak;
            }
        }

        tracing::debug!(
            pcm_len = pcm.len(),
            window,
            envelope_len = samples.len(),
            "computed rms envelope"
        );
        Self::new(f64::from(pcm_rate) / window as f64, samples)
    }

    /// Parse `{ "sampleRate": .., "samples": [..] }` from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CanopyResult<Self> {
        let def: AudioSignalDef = serde_json::from_reader(r)
            .map_err(|e| CanopyError::serde(format!("parse audio analysis JSON: {e}")))?;
        Self::new(def.sample_rate, def.samples)
    }

    /// Parse an audio analysis JSON file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanopyResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CanopyError::validation(format!("open audio analysis '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Envelope values per second.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Raw envelope values.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Length of the analysed audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Amplitude at transport `time`, linearly interpolated and clamped to `[0, 1]`.
    ///
    /// Times before the start or past the end hold the first or last value; an empty envelope
    /// is silent.
    pub fn amplitude(&self, time: f64) -> f64 {
        let Some(last) = self.samples.len().checked_sub(1) else {
            return 0.0;
        };
        let pos = if time.is_nan() {
            0.0
        } else {
            (time * self.sample_rate).clamp(0.0, last as f64)
        };
        let i0 = pos.floor() as usize;
        let i1 = (i0 + 1).min(last);
        let t = pos - i0 as f64;
        let a = f64::from(self.samples[i0]);
        let b = f64::from(self.samples[i1]);
        (a + (b - a) * t).clamp(0.0, 1.0)
    }
}

/// Audio-reactive variation: `offset + scale * amplitude(global time)`.
///
/// Without loaded audio data the variation rests at `offset`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioVariation {
    /// Multiplier applied to the amplitude.
    pub scale: f64,
    /// Value at silence.
    pub offset: f64,
}

impl Default for AudioVariation {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl AudioVariation {
    /// Value for the frame described by `ctx`.
    pub fn value_at(&self, ctx: &SampleCtx<'_>) -> f64 {
        match ctx.audio {
            Some(signal) => self.offset + self.scale * signal.amplitude(ctx.global_time),
            None => self.offset,
        }
    }
}
