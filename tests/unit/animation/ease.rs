use super::*;

#[test]
fn every_curve_hits_its_endpoints() {
    for e in Easing::ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{} at 0", e.name());
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{} at 1", e.name());
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Easing::EaseInQuad.apply(-1.0), 0.0);
    assert_eq!(Easing::EaseInQuad.apply(2.0), 1.0);
}

#[test]
fn in_out_curves_are_symmetric_at_midpoint() {
    for e in [
        Easing::EaseInOutSine,
        Easing::EaseInOutQuad,
        Easing::EaseInOutCubic,
        Easing::EaseInOutQuart,
        Easing::EaseInOutQuint,
        Easing::EaseInOutCirc,
        Easing::EaseInOutBounce,
    ] {
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9, "{}", e.name());
    }
}

#[test]
fn quad_matches_closed_form() {
    assert!((Easing::EaseInQuad.apply(0.5) - 0.25).abs() < 1e-12);
    assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-12);
}

#[test]
fn back_overshoots_below_zero() {
    assert!(Easing::EaseInBack.apply(0.2) < 0.0);
    assert!(Easing::EaseOutBack.apply(0.8) > 1.0);
}

#[test]
fn names_roundtrip_through_serde() {
    for e in Easing::ALL {
        assert_eq!(Easing::from_name(e.name()), Some(e));
        let s = serde_json::to_string(&e).unwrap();
        assert_eq!(s, format!("\"{}\"", e.name()));
        let back: Easing = serde_json::from_str(&s).unwrap();
        assert_eq!(back, e);
    }
    assert_eq!(Easing::from_name("easeSideways"), None);
}
