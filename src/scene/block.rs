use crate::{
    animation::{
        audio::AudioSignal,
        timeline::{ParameterTimeline, VariationId},
        variation::{SampleCtx, Variation},
    },
    foundation::error::{CanopyError, CanopyResult},
    pattern::{
        catalog::PatternCatalog,
        param::{ParamValue, PatternParam},
        template::{Pattern, TIME_UNIFORM},
    },
};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
struct StaticParam {
    default: ParamValue,
    value: ParamValue,
}

/// A pattern placed on the show timeline, with per-parameter animation.
///
/// The block owns a deep copy of its pattern. That copy holds the live uniform values read by
/// the renderer and is rewritten in place by [`Block::update`]. Static values (what a parameter
/// shows when it is not animated) are tracked separately so deleting the last variation can
/// restore them.
#[derive(Clone, Debug)]
pub struct Block {
    pattern: Pattern,
    statics: BTreeMap<String, StaticParam>,
    timelines: BTreeMap<String, ParameterTimeline>,
    /// Show time at which the block starts, in seconds.
    pub start_time: f64,
    /// Block length in seconds.
    pub duration: f64,
    /// Extra shift subtracted from show time before computing block-local time.
    pub render_offset: f64,
}

impl Block {
    /// Place a copy of `pattern` at `start_time` for `duration` seconds.
    pub fn new(pattern: &Pattern, start_time: f64, duration: f64) -> Self {
        let pattern = pattern.clone();
        let statics = pattern
            .user_params()
            .map(|(uniform, p)| {
                (
                    uniform.to_owned(),
                    StaticParam {
                        default: p.value.clone(),
                        value: p.value.clone(),
                    },
                )
            })
            .collect();
        Self {
            pattern,
            statics,
            timelines: BTreeMap::new(),
            start_time,
            duration,
            render_offset: 0.0,
        }
    }

    /// Place catalog pattern `name`; fails with [`CanopyError::UnknownPattern`].
    pub fn from_catalog(
        catalog: &PatternCatalog,
        name: &str,
        start_time: f64,
        duration: f64,
    ) -> CanopyResult<Self> {
        Ok(Self::new(catalog.require(name)?, start_time, duration))
    }

    /// The block's pattern, holding the live uniform values.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Live uniforms as last written by [`Block::update`].
    pub fn uniforms(&self) -> &BTreeMap<String, PatternParam> {
        self.pattern.params()
    }

    /// Block-local time for show time `global_time`, clamped to `[0, duration)`.
    pub fn local_time(&self, global_time: f64) -> f64 {
        let local = global_time - self.start_time - self.render_offset;
        if local.is_nan() || local <= 0.0 {
            return 0.0;
        }
        if self.duration.is_finite() && self.duration > 0.0 {
            local.min(self.duration.next_down())
        } else {
            local
        }
    }

    /// Evaluate every animated parameter for show time `global_time`.
    ///
    /// All timelines are sampled at the same block-local time. A failing timeline leaves its
    /// parameter at the previous value; the remaining parameters are still updated and the
    /// first error is returned.
    pub fn update(&mut self, global_time: f64, audio: Option<&AudioSignal>) -> CanopyResult<()> {
        let local = self.local_time(global_time);
        if let Some(time) = self.pattern.param_mut(TIME_UNIFORM) {
            time.value = ParamValue::Scalar(local);
        }

        let ctx = SampleCtx { global_time, audio };
        let mut first_err = None;
        for (uniform, timeline) in &self.timelines {
            let Some(param) = self.pattern.param_mut(uniform) else {
                continue;
            };
            match timeline.value_at(local, &ctx) {
                Ok(Some(value)) => {
                    if !param.value.apply(value) {
                        tracing::trace!(uniform = %uniform, "skipping value of mismatched kind");
                    }
                }
                Ok(None) => {
                    if let Some(s) = self.statics.get(uniform) {
                        param.value.clone_from(&s.value);
                    }
                }
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn check_kind(&self, uniform: &str, variation: &Variation) -> CanopyResult<()> {
        let param = self
            .statics
            .get(uniform)
            .ok_or_else(|| CanopyError::unknown_parameter(self.pattern.name(), uniform))?;
        let found = variation.output_kind();
        if param.value.accepts(found) {
            Ok(())
        } else {
            Err(CanopyError::ValueKindMismatch {
                uniform: uniform.to_owned(),
                expected: param.value.kind_name(),
                found: found.name(),
            })
        }
    }

    /// Append `variation` to the timeline of `uniform`, creating the timeline if needed.
    pub fn add_variation(
        &mut self,
        uniform: &str,
        variation: Variation,
    ) -> CanopyResult<VariationId> {
        self.check_kind(uniform, &variation)?;
        Ok(self
            .timelines
            .entry(uniform.to_owned())
            .or_default()
            .push(variation))
    }

    /// Insert `variation` right after segment `after` of `uniform`'s timeline.
    ///
    /// `Ok(None)` when the timeline or the segment does not exist.
    pub fn insert_variation_after(
        &mut self,
        uniform: &str,
        after: VariationId,
        variation: Variation,
    ) -> CanopyResult<Option<VariationId>> {
        self.check_kind(uniform, &variation)?;
        Ok(self
            .timelines
            .get_mut(uniform)
            .and_then(|t| t.insert_after(after, variation)))
    }

    /// Insert a copy of segment `id` right after it.
    pub fn duplicate_variation(&mut self, uniform: &str, id: VariationId) -> Option<VariationId> {
        self.timelines.get_mut(uniform)?.duplicate(id)
    }

    /// Remove segment `id`. Removing the last segment un-animates the parameter and restores
    /// its static value.
    pub fn delete_variation(&mut self, uniform: &str, id: VariationId) -> Option<Variation> {
        let timeline = self.timelines.get_mut(uniform)?;
        let removed = timeline.remove(id)?;
        if timeline.is_empty() {
            self.timelines.remove(uniform);
            self.restore_static(uniform);
        }
        Some(removed)
    }

    fn restore_static(&mut self, uniform: &str) {
        if let (Some(s), Some(param)) = (self.statics.get(uniform), self.pattern.param_mut(uniform))
        {
            param.value.clone_from(&s.value);
        }
    }

    /// Timeline animating `uniform`, if any.
    pub fn timeline(&self, uniform: &str) -> Option<&ParameterTimeline> {
        self.timelines.get(uniform)
    }

    /// Mutable timeline for in-place segment edits.
    ///
    /// Segments pushed through this handle skip the kind check done by
    /// [`Block::add_variation`]; values of the wrong kind are ignored at update time.
    pub fn timeline_mut(&mut self, uniform: &str) -> Option<&mut ParameterTimeline> {
        self.timelines.get_mut(uniform)
    }

    /// Animated uniforms and their timelines.
    pub fn timelines(&self) -> impl Iterator<Item = (&str, &ParameterTimeline)> {
        self.timelines.iter().map(|(k, t)| (k.as_str(), t))
    }

    /// Return `true` when `uniform` has at least one variation.
    pub fn is_animated(&self, uniform: &str) -> bool {
        self.timelines.get(uniform).is_some_and(|t| !t.is_empty())
    }

    /// Static value of `uniform`.
    pub fn param_value(&self, uniform: &str) -> Option<&ParamValue> {
        self.statics.get(uniform).map(|s| &s.value)
    }

    /// Static value of `uniform` as declared by the pattern.
    pub fn default_value(&self, uniform: &str) -> Option<&ParamValue> {
        self.statics.get(uniform).map(|s| &s.default)
    }

    /// Edit the static value of `uniform`. Unanimated parameters show it immediately.
    pub fn set_param_value(&mut self, uniform: &str, value: ParamValue) -> CanopyResult<()> {
        let s = self
            .statics
            .get_mut(uniform)
            .ok_or_else(|| CanopyError::unknown_parameter(self.pattern.name(), uniform))?;
        if !s.default.same_kind(&value) {
            return Err(CanopyError::ValueKindMismatch {
                uniform: uniform.to_owned(),
                expected: s.default.kind_name(),
                found: value.kind_name(),
            });
        }
        s.value = value;
        if !self.is_animated(uniform) {
            self.restore_static(uniform);
        }
        Ok(())
    }

    /// User parameters as `(uniform, default, static value)`, sorted by uniform.
    pub(crate) fn static_params(&self) -> impl Iterator<Item = (&str, &ParamValue, &ParamValue)> {
        self.statics
            .iter()
            .map(|(k, s)| (k.as_str(), &s.default, &s.value))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/block.rs"]
mod tests;
