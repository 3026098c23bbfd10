use super::*;
use crate::animation::periodic::{PeriodicVariation, Waveform};
use crate::foundation::error::CanopyError;

fn scalar(t: &ParameterTimeline, time: f64) -> f64 {
    t.value_at(time, &SampleCtx::at(time))
        .unwrap()
        .unwrap()
        .as_scalar()
        .unwrap()
}

fn up_down() -> ParameterTimeline {
    ParameterTimeline::from_variations([
        Variation::linear(2.0, 0.0, 10.0),
        Variation::linear(3.0, 10.0, 0.0),
    ])
}

#[test]
fn two_linear_segments_scenario() {
    let t = up_down();
    assert_eq!(scalar(&t, 0.0), 0.0);
    assert_eq!(scalar(&t, 1.0), 5.0);
    assert_eq!(scalar(&t, 2.0), 10.0);
    assert!((scalar(&t, 3.5) - 5.0).abs() < 1e-12);
    assert_eq!(scalar(&t, 10.0), 0.0);
}

#[test]
fn segment_lookup_uses_cumulative_starts() {
    let t = ParameterTimeline::from_variations([
        Variation::linear(1.5, 0.0, 3.0),
        Variation::periodic(2.0, PeriodicVariation::new(Waveform::Sine, 1.0, 0.0, 1.0)),
        Variation::flat(0.5, 7.0),
    ]);
    let starts = [0.0, 1.5, 3.5];
    for i in 0..100 {
        let time = i as f64 * 0.04;
        let (idx, local) = t.segment_at(time).unwrap();
        assert!((local - (time - starts[idx])).abs() < 1e-12);
        let seg = t.variations().nth(idx).unwrap();
        let expected = seg
            .value_at(time - starts[idx], &SampleCtx::at(time))
            .unwrap()
            .as_scalar()
            .unwrap();
        assert_eq!(scalar(&t, time), expected);
    }
}

#[test]
fn negative_and_nan_times_clamp_to_start() {
    let t = up_down();
    assert_eq!(scalar(&t, -4.0), 0.0);
    assert_eq!(t.segment_at(f64::NAN), Some((0, 0.0)));
}

#[test]
fn empty_timeline_yields_none() {
    let t = ParameterTimeline::new();
    assert!(t.is_empty());
    assert!(t.value_at(1.0, &SampleCtx::at(1.0)).unwrap().is_none());
    assert_eq!(t.segment_at(1.0), None);
}

#[test]
fn insert_after_places_segment_and_ignores_unknown_ids() {
    let mut t = ParameterTimeline::new();
    let a = t.push(Variation::flat(1.0, 1.0));
    let c = t.push(Variation::flat(1.0, 3.0));
    let b = t.insert_after(a, Variation::flat(1.0, 2.0)).unwrap();

    let ids: Vec<VariationId> = t.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert_eq!(scalar(&t, 1.5), 2.0);

    let removed = t.remove(b).unwrap();
    assert_eq!(removed, Variation::flat(1.0, 2.0));
    assert!(t.insert_after(b, Variation::flat(1.0, 9.0)).is_none());
    assert!(t.remove(b).is_none());
    assert!(t.duplicate(b).is_none());
    assert_eq!(t.len(), 2);
}

#[test]
fn duplicate_then_delete_original_preserves_values() {
    let mut t = up_down();
    let before: Vec<f64> = (0..60).map(|i| scalar(&t, i as f64 * 0.1)).collect();

    let first = t.iter().next().map(|(id, _)| id).unwrap();
    let copy = t.duplicate(first).unwrap();
    assert_eq!(t.position(copy), Some(1));
    assert_eq!(t.get(copy), t.get(first));
    assert_eq!(t.total_duration(), 7.0);

    t.remove(first);
    let after: Vec<f64> = (0..60).map(|i| scalar(&t, i as f64 * 0.1)).collect();
    assert_eq!(before, after);
}

#[test]
fn duplicate_is_independent_of_original() {
    let mut t = up_down();
    let first = t.iter().next().map(|(id, _)| id).unwrap();
    let copy = t.duplicate(first).unwrap();
    t.get_mut(first).unwrap().duration = 4.0;
    assert_eq!(t.get(copy).unwrap().duration, 2.0);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut t = ParameterTimeline::new();
    let a = t.push(Variation::flat(1.0, 0.0));
    t.remove(a);
    let b = t.push(Variation::flat(1.0, 0.0));
    assert_ne!(a, b);
}

#[test]
fn invalid_duration_surfaces_on_evaluation() {
    let mut t = up_down();
    let first = t.iter().next().map(|(id, _)| id).unwrap();
    t.get_mut(first).unwrap().duration = 0.0;
    let err = t.value_at(0.0, &SampleCtx::at(0.0)).unwrap_err();
    assert!(matches!(err, CanopyError::InvalidDuration(d) if d == 0.0));
}
