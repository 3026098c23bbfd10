use crate::{
    animation::{
        palette::Palette,
        variation::{Value, ValueKind},
    },
    foundation::color::Rgba,
};

/// Live value of one shader uniform.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// `float` uniform.
    Scalar(f64),
    /// `vec4` color uniform.
    Color(Rgba),
    /// Gradient uniform.
    Palette(Palette),
    /// Uniform bound outside the engine (e.g. an input texture).
    External,
}

impl ParamValue {
    /// Short kind name used in errors and listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Color(_) => "color",
            Self::Palette(_) => "palette",
            Self::External => "external",
        }
    }

    /// Return `true` when variations producing `kind` can drive this value.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (Self::Scalar(_), ValueKind::Scalar) | (Self::Color(_), ValueKind::Color)
        )
    }

    /// Return `true` when `other` holds the same kind of value.
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Write a sampled value in place. Returns `false` (and leaves `self` alone) on a kind
    /// mismatch.
    pub fn apply(&mut self, value: Value) -> bool {
        match (self, value) {
            (Self::Scalar(s), Value::Scalar(v)) => {
                *s = v;
                true
            }
            (Self::Color(c), Value::Color(v)) => {
                c.set(v.r, v.g, v.b, v.a);
                true
            }
            _ => false,
        }
    }

    /// The scalar, if this is a scalar uniform.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// The color, if this is a color uniform.
    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// One parameter declared by a pattern: display name, value and UI hints.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternParam {
    /// Human-readable label.
    pub name: String,
    /// Current value.
    pub value: ParamValue,
    /// Lower bound hint for editors.
    pub min: Option<f64>,
    /// Upper bound hint for editors.
    pub max: Option<f64>,
    /// Step hint for editors.
    pub step: Option<f64>,
}

impl PatternParam {
    /// Parameter with no UI hints.
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
            min: None,
            max: None,
            step: None,
        }
    }

    /// Scalar parameter.
    pub fn scalar(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, ParamValue::Scalar(value))
    }

    /// Color parameter.
    pub fn color(name: impl Into<String>, value: Rgba) -> Self {
        Self::new(name, ParamValue::Color(value))
    }

    /// Gradient parameter.
    pub fn palette(name: impl Into<String>, value: Palette) -> Self {
        Self::new(name, ParamValue::Palette(value))
    }

    /// Externally bound parameter.
    pub fn external(name: impl Into<String>) -> Self {
        Self::new(name, ParamValue::External)
    }

    /// Set the lower bound hint.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound hint.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the step hint.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}
