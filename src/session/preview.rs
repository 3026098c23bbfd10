use crate::{
    animation::{audio::AudioSignal, timeline::VariationId, variation::Variation},
    foundation::error::{CanopyError, CanopyResult},
    pattern::param::{ParamValue, PatternParam},
    scene::block::Block,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// Playback clock state, read once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transport {
    /// Show time in seconds.
    pub current_time: f64,
    /// Whether playback is running.
    pub playing: bool,
}

impl Transport {
    /// Running transport at `current_time`.
    pub fn playing(current_time: f64) -> Self {
        Self {
            current_time,
            playing: true,
        }
    }

    /// Paused transport at `current_time`.
    pub fn paused(current_time: f64) -> Self {
        Self {
            current_time,
            playing: false,
        }
    }
}

/// Options controlling how a [`PreviewSession`] drives its block.
#[derive(Clone, Debug, Default)]
pub struct PreviewOpts {
    /// Re-evaluate every frame even while paused and idle.
    pub refresh_when_paused: bool,
    /// Return the first failed edit from [`PreviewSession::frame`] instead of logging it.
    /// The failing batch is discarded as a whole and the block is left untouched.
    pub strict_edits: bool,
}

/// Timeline edit queued by the editor and applied between frames.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockEdit {
    /// Append a variation.
    AddVariation {
        /// Target uniform.
        uniform: String,
        /// New segment.
        variation: Variation,
    },
    /// Insert a variation after an existing segment.
    InsertAfter {
        /// Target uniform.
        uniform: String,
        /// Segment to insert after.
        after: VariationId,
        /// New segment.
        variation: Variation,
    },
    /// Copy a segment in place.
    Duplicate {
        /// Target uniform.
        uniform: String,
        /// Segment to copy.
        id: VariationId,
    },
    /// Remove a segment.
    Delete {
        /// Target uniform.
        uniform: String,
        /// Segment to remove.
        id: VariationId,
    },
    /// Change a segment's duration.
    SetDuration {
        /// Target uniform.
        uniform: String,
        /// Segment to change.
        id: VariationId,
        /// New duration in seconds.
        duration: f64,
    },
    /// Change a parameter's static value.
    SetParam {
        /// Target uniform.
        uniform: String,
        /// New value.
        value: ParamValue,
    },
}

/// Frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Frames that ran a block update.
    pub frames_evaluated: u64,
    /// Paused frames that reused the previous values.
    pub frames_reused: u64,
    /// Edits applied to the block.
    pub edits_applied: u64,
    /// Edits that failed or targeted a missing segment.
    pub edits_rejected: u64,
}

/// Frame driver for previewing one block.
///
/// Edits are queued with [`PreviewSession::queue_edit`] and applied together at the start of
/// the next frame, so a frame never observes a half-applied edit batch.
pub struct PreviewSession {
    block: Block,
    audio: Option<Arc<AudioSignal>>,
    pending: VecDeque<BlockEdit>,
    last_time: Option<f64>,
    opts: PreviewOpts,
    stats: PreviewStats,
}

impl PreviewSession {
    /// Start previewing `block`.
    pub fn new(block: Block, opts: PreviewOpts) -> Self {
        Self {
            block,
            audio: None,
            pending: VecDeque::new(),
            last_time: None,
            opts,
            stats: PreviewStats::default(),
        }
    }

    /// Queue an edit for the next frame.
    pub fn queue_edit(&mut self, edit: BlockEdit) {
        self.pending.push_back(edit);
    }

    /// Number of edits waiting for the next frame.
    pub fn pending_edits(&self) -> usize {
        self.pending.len()
    }

    /// Attach (or detach) audio analysis. Takes effect on the next frame.
    pub fn set_audio(&mut self, audio: Option<Arc<AudioSignal>>) {
        self.audio = audio;
        self.last_time = None;
    }

    /// Apply pending edits, then evaluate the block once at the transport's time.
    ///
    /// Returns the live uniforms for the renderer.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame(
        &mut self,
        transport: Transport,
    ) -> CanopyResult<&BTreeMap<String, PatternParam>> {
        let edited = self.apply_pending()?;

        let time = transport.current_time;
        let stale = self.last_time != Some(time);
        if transport.playing || self.opts.refresh_when_paused || edited || stale {
            let audio = self.audio.as_deref();
            self.last_time = Some(time);
            self.block.update(time, audio)?;
            self.stats.frames_evaluated += 1;
        } else {
            self.stats.frames_reused += 1;
        }
        Ok(self.block.uniforms())
    }

    fn apply_pending(&mut self) -> CanopyResult<bool> {
        if self.pending.is_empty() {
            return Ok(false);
        }
        if self.opts.strict_edits {
            return self.apply_pending_strict();
        }

        let mut edited = false;
        while let Some(edit) = self.pending.pop_front() {
            match apply_edit(&mut self.block, edit) {
                Ok(true) => {
                    self.stats.edits_applied += 1;
                    edited = true;
                }
                Ok(false) => {
                    self.stats.edits_rejected += 1;
                    tracing::debug!("edit targeted a missing segment, ignored");
                }
                Err(e) => {
                    self.stats.edits_rejected += 1;
                    tracing::warn!(error = %e, "edit rejected");
                }
            }
        }
        if edited {
            self.last_time = None;
        }
        Ok(edited)
    }

    /// Apply the whole batch to a staged copy and swap it in only if every edit succeeds.
    fn apply_pending_strict(&mut self) -> CanopyResult<bool> {
        let mut staged = self.block.clone();
        let (mut applied, mut missed) = (0, 0);
        while let Some(edit) = self.pending.pop_front() {
            match apply_edit(&mut staged, edit) {
                Ok(true) => applied += 1,
                Ok(false) => {
                    missed += 1;
                    tracing::debug!("edit targeted a missing segment, ignored");
                }
                Err(e) => {
                    let discarded = self.pending.len() as u64;
                    self.pending.clear();
                    self.stats.edits_rejected += applied + missed + discarded + 1;
                    tracing::warn!(error = %e, discarded, "edit batch rejected");
                    return Err(e);
                }
            }
        }

        self.stats.edits_applied += applied;
        self.stats.edits_rejected += missed;
        if applied == 0 {
            return Ok(false);
        }
        self.block = staged;
        self.last_time = None;
        Ok(true)
    }

    /// Live uniforms as of the last evaluated frame.
    pub fn uniforms(&self) -> &BTreeMap<String, PatternParam> {
        self.block.uniforms()
    }

    /// Block being previewed.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Frame statistics so far.
    pub fn stats(&self) -> PreviewStats {
        self.stats
    }

    /// End the session, returning the edited block.
    pub fn into_block(self) -> Block {
        self.block
    }
}

/// Apply one edit. `Ok(false)` means the target segment or timeline does not exist.
fn apply_edit(block: &mut Block, edit: BlockEdit) -> CanopyResult<bool> {
    match edit {
        BlockEdit::AddVariation { uniform, variation } => {
            block.add_variation(&uniform, variation)?;
            Ok(true)
        }
        BlockEdit::InsertAfter {
            uniform,
            after,
            variation,
        } => Ok(block
            .insert_variation_after(&uniform, after, variation)?
            .is_some()),
        BlockEdit::Duplicate { uniform, id } => {
            Ok(block.duplicate_variation(&uniform, id).is_some())
        }
        BlockEdit::Delete { uniform, id } => Ok(block.delete_variation(&uniform, id).is_some()),
        BlockEdit::SetDuration {
            uniform,
            id,
            duration,
        } => {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(CanopyError::InvalidDuration(duration));
            }
            let Some(v) = block.timeline_mut(&uniform).and_then(|t| t.get_mut(id)) else {
                return Ok(false);
            };
            v.duration = duration;
            Ok(true)
        }
        BlockEdit::SetParam { uniform, value } => {
            block.set_param_value(&uniform, value)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
