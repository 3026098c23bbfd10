use crate::animation::variation::Lerp;
use serde::{Deserialize, Serialize};

/// Control point of a [`SplineCurve`], both coordinates normally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    /// Segment progress.
    pub x: f64,
    /// Curve value.
    pub y: f64,
}

impl SplinePoint {
    /// Build a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Smooth curve through user-edited control points.
///
/// Points are kept sorted by `x` so the curve is a function of progress. Between points the
/// curve is a cubic Hermite segment with finite-difference (Catmull-Rom style) tangents, which
/// passes through every control point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SplinePoint>", into = "Vec<SplinePoint>")]
pub struct SplineCurve {
    points: Vec<SplinePoint>, // sorted by x, finite
}

impl Default for SplineCurve {
    fn default() -> Self {
        Self::new(vec![SplinePoint::new(0.0, 0.0), SplinePoint::new(1.0, 1.0)])
    }
}

impl From<Vec<SplinePoint>> for SplineCurve {
    fn from(points: Vec<SplinePoint>) -> Self {
        Self::new(points)
    }
}

impl From<SplineCurve> for Vec<SplinePoint> {
    fn from(c: SplineCurve) -> Self {
        c.points
    }
}

impl SplineCurve {
    /// Build a curve; non-finite points are dropped and the rest sorted by `x`.
    pub fn new(mut points: Vec<SplinePoint>) -> Self {
        points.retain(|p| p.x.is_finite() && p.y.is_finite());
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    /// Control points, sorted by `x`.
    pub fn points(&self) -> &[SplinePoint] {
        &self.points
    }

    /// Replace all control points.
    pub fn set_points(&mut self, points: Vec<SplinePoint>) {
        *self = Self::new(points);
    }

    /// Add a control point, returning its index after sorting.
    pub fn insert(&mut self, point: SplinePoint) -> Option<usize> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let idx = self.points.partition_point(|p| p.x <= point.x);
        self.points.insert(idx, point);
        Some(idx)
    }

    /// Move the point at `index`, returning its new index.
    pub fn move_point(&mut self, index: usize, point: SplinePoint) -> Option<usize> {
        if index >= self.points.len() {
            return None;
        }
        self.points.remove(index);
        self.insert(point)
    }

    /// Remove the point at `index`.
    pub fn remove(&mut self, index: usize) -> Option<SplinePoint> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    /// Evaluate the curve at progress `u`.
    ///
    /// `u` outside the points' `x` span holds the nearest end point. An empty curve is 0 and a
    /// single point is constant.
    pub fn evaluate(&self, u: f64) -> f64 {
        let pts = &self.points;
        let (first, last) = match pts.as_slice() {
            [] => return 0.0,
            [only] => return only.y,
            [first, .., last] => (*first, *last),
        };
        if u.is_nan() || u <= first.x {
            return first.y;
        }
        if u >= last.x {
            return last.y;
        }

        let i = pts
            .partition_point(|p| p.x <= u)
            .saturating_sub(1)
            .min(pts.len() - 2);
        let (p0, p1) = (pts[i], pts[i + 1]);
        let h = p1.x - p0.x;
        if h <= 0.0 {
            return p1.y;
        }

        let s = (u - p0.x) / h;
        let m0 = self.tangent(i);
        let m1 = self.tangent(i + 1);

        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        h00 * p0.y + h10 * h * m0 + h01 * p1.y + h11 * h * m1
    }

    fn tangent(&self, k: usize) -> f64 {
        let pts = &self.points;
        let last = pts.len() - 1;
        let (a, b) = if k == 0 {
            (0, 1)
        } else if k == last {
            (last - 1, last)
        } else {
            (k - 1, k + 1)
        };
        let dx = pts[b].x - pts[a].x;
        if dx <= 0.0 {
            0.0
        } else {
            (pts[b].y - pts[a].y) / dx
        }
    }
}

/// Curve variation: progress through the segment drives the curve, and the curve's output is
/// mapped onto `[domain_min, domain_max]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplineVariation {
    /// Control-point curve.
    #[serde(rename = "points")]
    pub curve: SplineCurve,
    /// Output for curve value 0.
    pub domain_min: f64,
    /// Output for curve value 1.
    pub domain_max: f64,
}

impl Default for SplineVariation {
    fn default() -> Self {
        Self {
            curve: SplineCurve::default(),
            domain_min: 0.0,
            domain_max: 1.0,
        }
    }
}

impl SplineVariation {
    /// Build a spline variation.
    pub fn new(points: Vec<SplinePoint>, domain_min: f64, domain_max: f64) -> Self {
        Self {
            curve: SplineCurve::new(points),
            domain_min,
            domain_max,
        }
    }

    /// Value at segment progress `progress` in `[0, 1]`.
    pub fn value_at(&self, progress: f64) -> f64 {
        f64::lerp(
            &self.domain_min,
            &self.domain_max,
            self.curve.evaluate(progress),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spline.rs"]
mod tests;
