use super::*;

fn unit(periodic_type: Waveform) -> PeriodicVariation {
    PeriodicVariation::new(periodic_type, 1.0, 0.0, 1.0)
}

#[test]
fn sine_starts_at_offset_and_peaks_at_quarter_period() {
    let v = unit(Waveform::Sine);
    assert!(v.value_at(0.0).unwrap().abs() < 1e-12);
    assert!((v.value_at(0.25).unwrap() - 1.0).abs() < 1e-12);
    assert!((v.value_at(0.75).unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn output_repeats_every_period() {
    let v = PeriodicVariation::new(Waveform::Triangle, 2.0, 3.0, 0.8).with_phase(0.1);
    for i in 0..20 {
        let t = i as f64 * 0.037;
        let a = v.value_at(t).unwrap();
        let b = v.value_at(t + 0.8 * 3.0).unwrap();
        assert!((a - b).abs() < 1e-9, "t={t}");
    }
}

#[test]
fn square_and_triangle_shapes() {
    let sq = unit(Waveform::Square);
    assert_eq!(sq.value_at(0.1).unwrap(), 1.0);
    assert_eq!(sq.value_at(0.6).unwrap(), -1.0);

    let tri = unit(Waveform::Triangle);
    assert!((tri.value_at(0.125).unwrap() - 0.5).abs() < 1e-12);
    assert!((tri.value_at(0.25).unwrap() - 1.0).abs() < 1e-12);
    assert!((tri.value_at(0.5).unwrap()).abs() < 1e-12);
    assert!((tri.value_at(0.75).unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn phase_shifts_time() {
    let v = unit(Waveform::Sine).with_phase(0.25);
    assert!((v.value_at(0.0).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn negative_time_wraps_into_cycle() {
    let v = unit(Waveform::Sine);
    let a = v.value_at(-0.75).unwrap();
    assert!((a - 1.0).abs() < 1e-12);
}

#[test]
fn min_max_is_a_derived_view() {
    let mut v = PeriodicVariation::from_min_max(Waveform::Sine, 0.2, 0.6, 1.0);
    assert!((v.amplitude - 0.2).abs() < 1e-12);
    assert!((v.offset - 0.4).abs() < 1e-12);

    v.set_max(1.0);
    assert!((v.min() - 0.2).abs() < 1e-12);
    assert!((v.max() - 1.0).abs() < 1e-12);

    v.amplitude = 0.1;
    assert!((v.min() - 0.5).abs() < 1e-12);
    assert!((v.max() - 0.7).abs() < 1e-12);

    v.set_min(0.0);
    assert!((v.max() - 0.7).abs() < 1e-12);
    assert!((v.offset - 0.35).abs() < 1e-12);
}

#[test]
fn non_positive_period_is_an_error() {
    let mut v = unit(Waveform::Sine);
    v.period = 0.0;
    assert!(matches!(v.value_at(0.3), Err(CanopyError::Animation(_))));
}

#[test]
fn serde_uses_camel_case_fields() {
    let v = unit(Waveform::Square).with_phase(0.5);
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["periodicType"], "square");
    assert_eq!(json["phase"], 0.5);
    let back: PeriodicVariation = serde_json::from_value(json).unwrap();
    assert_eq!(back, v);
}
