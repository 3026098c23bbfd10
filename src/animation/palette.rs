use crate::{
    animation::variation::Lerp,
    foundation::color::Rgba,
    foundation::error::{CanopyError, CanopyResult},
};
use serde::{Deserialize, Serialize};

/// One color stop of a [`Palette`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient in `[0, 1]`.
    pub position: f64,
    /// Stop color.
    pub color: Rgba,
}

impl ColorStop {
    /// Build a stop.
    pub fn new(position: f64, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Gradient defined by color stops.
///
/// Stops are edited individually and are not kept sorted; sampling always interprets them by
/// position. A palette with fewer than two stops still samples: no stops yield
/// [`Rgba::TRANSPARENT`] and a single stop yields its color everywhere.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStopDef>", into = "Vec<ColorStopDef>")]
pub struct Palette {
    /// Color stops, in editing order.
    pub stops: Vec<ColorStop>,
}

impl Palette {
    /// Build a palette from stops.
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    /// Spread `colors` evenly across `[0, 1]`.
    pub fn evenly_spaced(colors: &[Rgba]) -> Self {
        let n = colors.len();
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let position = if n > 1 {
                    i as f64 / (n - 1) as f64
                } else {
                    0.0
                };
                ColorStop::new(position, color)
            })
            .collect();
        Self { stops }
    }

    /// Return `true` when the palette has at least two stops.
    pub fn is_well_formed(&self) -> bool {
        self.stops.len() >= 2
    }

    /// Sample the gradient at `position` (clamped to `[0, 1]`).
    ///
    /// Interpolates linearly between the nearest stop at or below `position` and the nearest
    /// stop at or above it. Positions outside the stops' span take the closest end color.
    pub fn sample(&self, position: f64) -> Rgba {
        let p = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };

        match self.stops.as_slice() {
            [] => return Rgba::TRANSPARENT,
            [only] => return only.color,
            _ => {}
        }

        let mut lower: Option<&ColorStop> = None;
        let mut upper: Option<&ColorStop> = None;
        for stop in &self.stops {
            if stop.position <= p && lower.is_none_or(|l| stop.position >= l.position) {
                lower = Some(stop);
            }
            if stop.position >= p && upper.is_none_or(|u| stop.position < u.position) {
                upper = Some(stop);
            }
        }

        match (lower, upper) {
            (Some(l), Some(u)) => {
                let span = u.position - l.position;
                if span <= f64::EPSILON {
                    l.color
                } else {
                    Rgba::lerp(&l.color, &u.color, (p - l.position) / span)
                }
            }
            (Some(l), None) => l.color,
            (None, Some(u)) => u.color,
            (None, None) => Rgba::TRANSPARENT,
        }
    }
}

/// Stored form of a color stop: `{position, colorHex}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStopDef {
    /// Position along the gradient.
    pub position: f64,
    /// `#rrggbb` or `#rrggbbaa`.
    pub color_hex: String,
}

impl TryFrom<Vec<ColorStopDef>> for Palette {
    type Error = CanopyError;

    fn try_from(defs: Vec<ColorStopDef>) -> CanopyResult<Self> {
        let stops = defs
            .into_iter()
            .map(|d| Ok(ColorStop::new(d.position, Rgba::from_hex(&d.color_hex)?)))
            .collect::<CanopyResult<Vec<_>>>()?;
        Ok(Self { stops })
    }
}

impl From<Palette> for Vec<ColorStopDef> {
    fn from(p: Palette) -> Self {
        p.stops
            .into_iter()
            .map(|s| ColorStopDef {
                position: s.position,
                color_hex: s.color.to_hex(),
            })
            .collect()
    }
}
