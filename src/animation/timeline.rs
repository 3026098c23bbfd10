use crate::{
    animation::variation::{SampleCtx, Value, Variation},
    foundation::error::CanopyResult,
};

/// Stable handle to one segment of a [`ParameterTimeline`].
///
/// Handles stay valid across inserts and deletes of other segments and are never reused
/// within a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariationId(pub(crate) u32);

#[derive(Clone, Debug)]
struct Segment {
    id: VariationId,
    variation: Variation,
}

/// Ordered, gapless sequence of variations animating one parameter.
///
/// Segment `i` starts where segment `i - 1` ends; the first starts at 0. The order is whatever
/// the editor made it; nothing here reorders segments.
#[derive(Clone, Debug, Default)]
pub struct ParameterTimeline {
    segments: Vec<Segment>,
    next_id: u32,
}

impl ParameterTimeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline holding `variations` in order.
    pub fn from_variations(variations: impl IntoIterator<Item = Variation>) -> Self {
        let mut timeline = Self::new();
        for v in variations {
            timeline.push(v);
        }
        timeline
    }

    fn alloc_id(&mut self) -> VariationId {
        let id = VariationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Return `true` when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment durations.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.variation.duration).sum()
    }

    /// Segments in order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (VariationId, &Variation)> {
        self.segments.iter().map(|s| (s.id, &s.variation))
    }

    /// Variations in order.
    pub fn variations(&self) -> impl Iterator<Item = &Variation> {
        self.segments.iter().map(|s| &s.variation)
    }

    /// Index of the segment with handle `id`.
    pub fn position(&self, id: VariationId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Segment with handle `id`.
    pub fn get(&self, id: VariationId) -> Option<&Variation> {
        self.segments
            .iter()
            .find(|s| s.id == id)
            .map(|s| &s.variation)
    }

    /// Mutable segment with handle `id`, for in-place field edits.
    pub fn get_mut(&mut self, id: VariationId) -> Option<&mut Variation> {
        self.segments
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.variation)
    }

    /// Append a segment at the end.
    pub fn push(&mut self, variation: Variation) -> VariationId {
        let id = self.alloc_id();
        self.segments.push(Segment { id, variation });
        id
    }

    /// Insert `variation` right after the segment `after`.
    ///
    /// Returns `None` (and leaves the timeline untouched) when `after` is not present.
    pub fn insert_after(
        &mut self,
        after: VariationId,
        variation: Variation,
    ) -> Option<VariationId> {
        let idx = self.position(after)?;
        let id = self.alloc_id();
        self.segments.insert(idx + 1, Segment { id, variation });
        Some(id)
    }

    /// Insert a deep copy of segment `id` right after it.
    pub fn duplicate(&mut self, id: VariationId) -> Option<VariationId> {
        let copy = self.get(id)?.clone();
        self.insert_after(id, copy)
    }

    /// Remove segment `id`. Unknown handles are a no-op.
    pub fn remove(&mut self, id: VariationId) -> Option<Variation> {
        let idx = self.position(id)?;
        Some(self.segments.remove(idx).variation)
    }

    /// Locate the segment covering `time` and the time elapsed inside it.
    ///
    /// Segments cover half-open intervals `[start, start + duration)`. Times at or past the end
    /// hold the last segment's final instant (`local == duration`); negative times and NaN map
    /// to the start of the first segment.
    pub fn segment_at(&self, time: f64) -> Option<(usize, f64)> {
        let last = self.segments.len().checked_sub(1)?;
        if time.is_nan() || time <= 0.0 {
            return Some((0, 0.0));
        }

        let mut start = 0.0;
        for (i, seg) in self.segments.iter().enumerate() {
            let end = start + seg.variation.duration;
            if time < end {
                return Some((i, time - start));
            }
            start = end;
        }
        Some((last, self.segments[last].variation.duration))
    }

    /// Resolve the parameter value at timeline `time`.
    ///
    /// Returns `Ok(None)` for an empty timeline so callers fall back to the static default.
    pub fn value_at(&self, time: f64, ctx: &SampleCtx<'_>) -> CanopyResult<Option<Value>> {
        let Some((idx, local)) = self.segment_at(time) else {
            return Ok(None);
        };
        self.segments[idx].variation.value_at(local, ctx).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
