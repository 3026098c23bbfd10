use crate::{
    animation::{
        audio::{AudioSignal, AudioVariation},
        ease::Easing,
        palette::Palette,
        periodic::PeriodicVariation,
        spline::SplineVariation,
    },
    foundation::color::Rgba,
    foundation::error::{CanopyError, CanopyResult},
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
/// Sampling context shared by every variation evaluated in one frame.
///
/// `global_time` is read once per frame so all parameters of a block see the same instant.
pub struct SampleCtx<'a> {
    /// Transport time in seconds for this frame.
    pub global_time: f64,
    /// Audio analysis, when loaded.
    pub audio: Option<&'a AudioSignal>,
}

impl SampleCtx<'static> {
    /// Context without audio data, with `global_time` set to `t`.
    pub fn at(t: f64) -> Self {
        Self {
            global_time: t,
            audio: None,
        }
    }
}

/// Interpolation contract for variation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` (not clamped).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: f64::lerp(&a.r, &b.r, t),
            g: f64::lerp(&a.g, &b.g, t),
            b: f64::lerp(&a.b, &b.b, t),
            a: f64::lerp(&a.a, &b.a, t),
        }
    }
}

/// Concrete value produced by a variation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Scalar uniform value.
    Scalar(f64),
    /// 4-component color uniform value.
    Color(Rgba),
}

impl Value {
    /// Kind of this value.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// The scalar, if this is a scalar value.
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// The color, if this is a color value.
    pub fn as_color(self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(c),
            Self::Scalar(_) => None,
        }
    }
}

/// The type of value a variation produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Produces [`Value::Scalar`].
    Scalar,
    /// Produces [`Value::Color`].
    Color,
}

impl ValueKind {
    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Color => "color",
        }
    }
}

/// One animated segment of a parameter timeline.
///
/// Fields are edited in place by the editing layer. `duration` is only checked when the
/// variation is evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct Variation {
    /// Segment length in seconds (`> 0`).
    pub duration: f64,
    /// Kind-specific parameters.
    pub kind: VariationKind,
}

/// Closed set of variation kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum VariationKind {
    /// Constant scalar.
    Flat(FlatVariation),
    /// Scalar linear ramp.
    Linear(LinearVariation),
    /// Color linear ramp.
    Linear4(Linear4Variation),
    /// Oscillator.
    Periodic(PeriodicVariation),
    /// Control-point curve.
    Spline(SplineVariation),
    /// Eased scalar ramp.
    Easing(EasingVariation),
    /// Gradient sweep.
    Palette(PaletteVariation),
    /// Audio-reactive scalar.
    Audio(AudioVariation),
}

/// Stored tag of each variation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariationTag {
    /// `"flat"`
    Flat,
    /// `"linear"`
    Linear,
    /// `"linear4"`
    Linear4,
    /// `"periodic"`
    Periodic,
    /// `"spline"`
    Spline,
    /// `"easing"`
    Easing,
    /// `"palette"`
    Palette,
    /// `"audio"`
    Audio,
}

impl VariationTag {
    /// Every tag, in catalog order.
    pub const ALL: [VariationTag; 8] = [
        Self::Flat,
        Self::Linear,
        Self::Linear4,
        Self::Periodic,
        Self::Spline,
        Self::Easing,
        Self::Palette,
        Self::Audio,
    ];

    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Linear => "linear",
            Self::Linear4 => "linear4",
            Self::Periodic => "periodic",
            Self::Spline => "spline",
            Self::Easing => "easing",
            Self::Palette => "palette",
            Self::Audio => "audio",
        }
    }

    /// Parse a stored tag.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Label shown next to the parameter name in the editor.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Linear => "Linear",
            Self::Linear4 => "Color",
            Self::Periodic => "Periodic",
            Self::Spline => "Spline",
            Self::Easing => "Easing",
            Self::Palette => "Palette",
            Self::Audio => "Audio",
        }
    }

    /// Type of value variations of this kind produce.
    pub fn output_kind(self) -> ValueKind {
        match self {
            Self::Linear4 | Self::Palette => ValueKind::Color,
            Self::Flat
            | Self::Linear
            | Self::Periodic
            | Self::Spline
            | Self::Easing
            | Self::Audio => ValueKind::Scalar,
        }
    }
}

/// Constant value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatVariation {
    /// Value held for the whole segment.
    pub value: f64,
}

/// Scalar ramp from `from` to `to` across the segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearVariation {
    /// Value at the segment start.
    pub from: f64,
    /// Value approached at the segment end.
    pub to: f64,
}

/// Per-channel color ramp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Linear4Variation {
    /// Color at the segment start.
    pub from: Rgba,
    /// Color approached at the segment end.
    pub to: Rgba,
}

/// Scalar ramp shaped by a named easing curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EasingVariation {
    /// Curve applied to segment progress.
    pub easing_type: Easing,
    /// Value at the segment start.
    pub from: f64,
    /// Value at the segment end.
    pub to: f64,
}

/// Sweep across a palette's gradient over the segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteVariation {
    /// Gradient being sampled.
    pub palette: Palette,
}

impl Variation {
    /// Build a variation from its parts.
    pub fn new(duration: f64, kind: VariationKind) -> Self {
        Self { duration, kind }
    }

    /// Constant `value`.
    pub fn flat(duration: f64, value: f64) -> Self {
        Self::new(duration, VariationKind::Flat(FlatVariation { value }))
    }

    /// Linear ramp `from -> to`.
    pub fn linear(duration: f64, from: f64, to: f64) -> Self {
        Self::new(duration, VariationKind::Linear(LinearVariation { from, to }))
    }

    /// Color ramp `from -> to`.
    pub fn linear4(duration: f64, from: Rgba, to: Rgba) -> Self {
        Self::new(duration, VariationKind::Linear4(Linear4Variation { from, to }))
    }

    /// Oscillator.
    pub fn periodic(duration: f64, periodic: PeriodicVariation) -> Self {
        Self::new(duration, VariationKind::Periodic(periodic))
    }

    /// Control-point curve.
    pub fn spline(duration: f64, spline: SplineVariation) -> Self {
        Self::new(duration, VariationKind::Spline(spline))
    }

    /// Eased ramp `from -> to`.
    pub fn easing(duration: f64, easing_type: Easing, from: f64, to: f64) -> Self {
        Self::new(
            duration,
            VariationKind::Easing(EasingVariation {
                easing_type,
                from,
                to,
            }),
        )
    }

    /// Gradient sweep.
    pub fn palette(duration: f64, palette: Palette) -> Self {
        Self::new(duration, VariationKind::Palette(PaletteVariation { palette }))
    }

    /// Audio-reactive value `offset + scale * amplitude`.
    pub fn audio(duration: f64, scale: f64, offset: f64) -> Self {
        Self::new(duration, VariationKind::Audio(AudioVariation { scale, offset }))
    }

    /// Stored tag of this variation's kind.
    pub fn tag(&self) -> VariationTag {
        self.kind.tag()
    }

    /// Editor label for this variation.
    pub fn display_name(&self) -> &'static str {
        self.tag().display_name()
    }

    /// Type of value this variation produces.
    pub fn output_kind(&self) -> ValueKind {
        self.tag().output_kind()
    }

    /// Sample this variation `local_time` seconds after the segment starts.
    ///
    /// `local_time` is expected in `[0, duration]`; the closed end is the final instant used by
    /// end-of-timeline hold.
    pub fn value_at(&self, local_time: f64, ctx: &SampleCtx<'_>) -> CanopyResult<Value> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(CanopyError::InvalidDuration(self.duration));
        }
        let progress = local_time / self.duration;

        let value = match &self.kind {
            VariationKind::Flat(v) => Value::Scalar(v.value),
            VariationKind::Linear(v) => Value::Scalar(f64::lerp(&v.from, &v.to, progress)),
            VariationKind::Linear4(v) => Value::Color(Rgba::lerp(&v.from, &v.to, progress)),
            VariationKind::Periodic(v) => Value::Scalar(v.value_at(local_time)?),
            VariationKind::Spline(v) => Value::Scalar(v.value_at(progress)),
            VariationKind::Easing(v) => {
                Value::Scalar(f64::lerp(&v.from, &v.to, v.easing_type.apply(progress)))
            }
            VariationKind::Palette(v) => Value::Color(v.palette.sample(progress)),
            VariationKind::Audio(v) => Value::Scalar(v.value_at(ctx)),
        };
        Ok(value)
    }
}

impl VariationKind {
    /// Stored tag of this kind.
    pub fn tag(&self) -> VariationTag {
        match self {
            Self::Flat(_) => VariationTag::Flat,
            Self::Linear(_) => VariationTag::Linear,
            Self::Linear4(_) => VariationTag::Linear4,
            Self::Periodic(_) => VariationTag::Periodic,
            Self::Spline(_) => VariationTag::Spline,
            Self::Easing(_) => VariationTag::Easing,
            Self::Palette(_) => VariationTag::Palette,
            Self::Audio(_) => VariationTag::Audio,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/variation.rs"]
mod tests;
