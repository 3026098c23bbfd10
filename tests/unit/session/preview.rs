use super::*;
use crate::foundation::color::Rgba;
use crate::pattern::catalog::PatternCatalog;

fn session(opts: PreviewOpts) -> PreviewSession {
    let block = Block::from_catalog(&PatternCatalog::builtin(), "Pulse", 0.0, 10.0).unwrap();
    PreviewSession::new(block, opts)
}

fn scale(s: &PreviewSession) -> f64 {
    s.uniforms()["u_scale"].value.as_scalar().unwrap()
}

fn add(uniform: &str, variation: Variation) -> BlockEdit {
    BlockEdit::AddVariation {
        uniform: uniform.to_owned(),
        variation,
    }
}

#[test]
fn edits_apply_at_next_frame() {
    let mut s = session(PreviewOpts::default());
    s.queue_edit(add("u_scale", Variation::linear(2.0, 0.0, 10.0)));
    assert_eq!(s.pending_edits(), 1);
    assert_eq!(scale(&s), 1.0);

    let uniforms = s.frame(Transport::playing(1.0)).unwrap();
    assert_eq!(uniforms["u_scale"].value.as_scalar(), Some(5.0));
    assert_eq!(s.pending_edits(), 0);
    assert_eq!(s.stats().edits_applied, 1);
}

#[test]
fn paused_idle_frames_reuse_values() {
    let mut s = session(PreviewOpts::default());
    s.frame(Transport::paused(1.0)).unwrap();
    s.frame(Transport::paused(1.0)).unwrap();
    s.frame(Transport::paused(1.0)).unwrap();
    assert_eq!(s.stats().frames_evaluated, 1);
    assert_eq!(s.stats().frames_reused, 2);

    s.frame(Transport::paused(2.0)).unwrap();
    assert_eq!(s.stats().frames_evaluated, 2);
}

#[test]
fn paused_edit_triggers_reevaluation() {
    let mut s = session(PreviewOpts::default());
    s.frame(Transport::paused(1.0)).unwrap();
    s.queue_edit(add("u_scale", Variation::flat(5.0, 3.0)));
    s.frame(Transport::paused(1.0)).unwrap();
    assert_eq!(scale(&s), 3.0);
    assert_eq!(s.stats().frames_evaluated, 2);
}

#[test]
fn refresh_when_paused_evaluates_every_frame() {
    let mut s = session(PreviewOpts {
        refresh_when_paused: true,
        ..PreviewOpts::default()
    });
    for _ in 0..3 {
        s.frame(Transport::paused(0.5)).unwrap();
    }
    assert_eq!(s.stats().frames_evaluated, 3);
}

#[test]
fn failed_edits_are_counted_and_skipped() {
    let mut s = session(PreviewOpts::default());
    s.queue_edit(add("u_nope", Variation::flat(1.0, 0.0)));
    s.queue_edit(add("u_scale", Variation::linear4(1.0, Rgba::BLACK, Rgba::WHITE)));
    s.queue_edit(add("u_scale", Variation::flat(1.0, 2.0)));
    s.frame(Transport::playing(0.0)).unwrap();
    assert_eq!(s.stats().edits_rejected, 2);
    assert_eq!(s.stats().edits_applied, 1);
    assert_eq!(scale(&s), 2.0);
}

#[test]
fn strict_edits_surface_errors() {
    let mut s = session(PreviewOpts {
        strict_edits: true,
        ..PreviewOpts::default()
    });
    s.queue_edit(add("u_nope", Variation::flat(1.0, 0.0)));
    s.queue_edit(add("u_scale", Variation::flat(1.0, 2.0)));
    let err = s.frame(Transport::playing(0.0)).unwrap_err();
    assert!(matches!(err, CanopyError::UnknownParameter { .. }));
    assert_eq!(s.pending_edits(), 0);
    assert_eq!(s.stats().edits_rejected, 2);
}

#[test]
fn strict_batch_is_all_or_nothing() {
    let mut s = session(PreviewOpts {
        strict_edits: true,
        ..PreviewOpts::default()
    });
    s.queue_edit(add("u_scale", Variation::flat(1.0, 2.0)));
    s.queue_edit(add("u_nope", Variation::flat(1.0, 0.0)));
    assert!(s.frame(Transport::playing(0.0)).is_err());

    s.frame(Transport::playing(0.1)).unwrap();
    assert!(!s.block().is_animated("u_scale"));
    assert_eq!(scale(&s), 1.0);
    assert_eq!(s.stats().edits_applied, 0);

    s.queue_edit(add("u_scale", Variation::flat(1.0, 2.0)));
    s.queue_edit(add("u_waviness", Variation::flat(1.0, 0.5)));
    s.frame(Transport::playing(0.2)).unwrap();
    assert_eq!(scale(&s), 2.0);
    assert!(s.block().is_animated("u_waviness"));
    assert_eq!(s.stats().edits_applied, 2);
}

#[test]
fn segment_edits_by_id() {
    let mut s = session(PreviewOpts::default());
    s.queue_edit(add("u_scale", Variation::linear(2.0, 0.0, 10.0)));
    s.frame(Transport::playing(0.0)).unwrap();
    let (id, _) = s.block().timeline("u_scale").unwrap().iter().next().unwrap();

    s.queue_edit(BlockEdit::SetDuration {
        uniform: "u_scale".to_owned(),
        id,
        duration: 4.0,
    });
    s.frame(Transport::playing(1.0)).unwrap();
    assert_eq!(scale(&s), 2.5);

    s.queue_edit(BlockEdit::Duplicate {
        uniform: "u_scale".to_owned(),
        id,
    });
    s.queue_edit(BlockEdit::InsertAfter {
        uniform: "u_scale".to_owned(),
        after: id,
        variation: Variation::flat(1.0, 9.0),
    });
    s.frame(Transport::playing(4.5)).unwrap();
    assert_eq!(scale(&s), 9.0);
    assert_eq!(s.block().timeline("u_scale").unwrap().len(), 3);

    s.queue_edit(BlockEdit::SetDuration {
        uniform: "u_scale".to_owned(),
        id,
        duration: 0.0,
    });
    s.frame(Transport::playing(4.5)).unwrap();
    assert_eq!(s.stats().edits_rejected, 1);
}

#[test]
fn deleting_everything_reverts_to_static_value() {
    let mut s = session(PreviewOpts::default());
    s.queue_edit(BlockEdit::SetParam {
        uniform: "u_scale".to_owned(),
        value: ParamValue::Scalar(4.0),
    });
    s.queue_edit(add("u_scale", Variation::flat(1.0, 8.0)));
    s.frame(Transport::playing(0.0)).unwrap();
    assert_eq!(scale(&s), 8.0);

    let (id, _) = s.block().timeline("u_scale").unwrap().iter().next().unwrap();
    s.queue_edit(BlockEdit::Delete {
        uniform: "u_scale".to_owned(),
        id,
    });
    s.frame(Transport::playing(0.1)).unwrap();
    assert_eq!(scale(&s), 4.0);
    assert!(s.into_block().timeline("u_scale").is_none());
}

#[test]
fn audio_attaches_between_frames() {
    let mut s = session(PreviewOpts::default());
    s.queue_edit(add("u_saturation", Variation::audio(10.0, 1.0, 0.0)));
    s.frame(Transport::paused(0.5)).unwrap();
    assert_eq!(s.uniforms()["u_saturation"].value.as_scalar(), Some(0.0));

    let signal = AudioSignal::new(1.0, vec![1.0, 1.0]).unwrap();
    s.set_audio(Some(Arc::new(signal)));
    s.frame(Transport::paused(0.5)).unwrap();
    assert_eq!(s.uniforms()["u_saturation"].value.as_scalar(), Some(1.0));
}
