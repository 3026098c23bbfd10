use super::*;
use crate::animation::variation::{Value, ValueKind};
use crate::foundation::color::Rgba;
use crate::pattern::param::{ParamValue, PatternParam};
use crate::pattern::template::{BASE_UNIFORMS, TEXTURE_UNIFORM, TIME_UNIFORM};

#[test]
fn builtin_catalog_lists_patterns_by_name() {
    let catalog = PatternCatalog::builtin();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(
        names,
        vec!["Globules", "Gradient", "Melt", "Pulse", "SunCycle"]
    );
    assert_eq!(catalog.len(), 5);
    assert!(!catalog.is_empty());
}

#[test]
fn every_pattern_carries_base_uniforms() {
    let catalog = PatternCatalog::builtin();
    for pattern in catalog.iter() {
        for uniform in BASE_UNIFORMS {
            assert!(pattern.param(uniform).is_some(), "{} {uniform}", pattern.name());
        }
        assert_eq!(
            pattern.param(TIME_UNIFORM).unwrap().value,
            ParamValue::Scalar(0.0)
        );
        assert_eq!(
            pattern.param(TEXTURE_UNIFORM).unwrap().value,
            ParamValue::External
        );
        assert!(pattern.user_params().all(|(k, _)| !BASE_UNIFORMS.contains(&k)));
    }
}

#[test]
fn pulse_defaults_and_hints() {
    let catalog = PatternCatalog::builtin();
    let pulse = catalog.require("Pulse").unwrap();
    let colors = pulse.param("u_number_colors").unwrap();
    assert_eq!(colors.name, "Number of Colors");
    assert_eq!(colors.value.as_scalar(), Some(4.0));
    assert_eq!((colors.min, colors.max, colors.step), (Some(1.0), Some(20.0), Some(1.0)));
    assert_eq!(pulse.param("u_time_factor").unwrap().value.as_scalar(), Some(0.4));
    assert_eq!(pulse.user_params().count(), 13);
}

#[test]
fn unknown_pattern_is_reported() {
    let catalog = PatternCatalog::builtin();
    assert!(catalog.get("Nope").is_none());
    let err = catalog.require("Nope").unwrap_err();
    assert!(matches!(err, CanopyError::UnknownPattern(name) if name == "Nope"));
}

#[test]
fn register_replaces_by_name() {
    let mut catalog = PatternCatalog::new();
    let first = Pattern::new("A", "a.frag", [("u_x", PatternParam::scalar("X", 1.0))]);
    assert!(catalog.register(first).is_none());
    let second = Pattern::new("A", "b.frag", [("u_x", PatternParam::scalar("X", 2.0))]);
    let old = catalog.register(second);
    assert_eq!(old.unwrap().shader(), "a.frag");
    assert_eq!(catalog.require("A").unwrap().shader(), "b.frag");
    assert_eq!(catalog.len(), 1);
}

#[test]
fn clones_are_independent() {
    let catalog = PatternCatalog::builtin();
    let mut copy = catalog.require("SunCycle").unwrap().clone();
    let sun = copy.param_mut("u_sun_color").unwrap();
    assert!(sun.value.apply(Value::Color(Rgba::BLACK)));
    assert_ne!(
        catalog.require("SunCycle").unwrap().param("u_sun_color").unwrap().value,
        ParamValue::Color(Rgba::BLACK)
    );
}

#[test]
fn param_values_accept_matching_kinds_only() {
    let mut scalar = ParamValue::Scalar(0.0);
    assert!(scalar.accepts(ValueKind::Scalar));
    assert!(!scalar.accepts(ValueKind::Color));
    assert!(!scalar.apply(Value::Color(Rgba::WHITE)));
    assert!(scalar.apply(Value::Scalar(2.5)));
    assert_eq!(scalar, ParamValue::Scalar(2.5));

    assert!(!ParamValue::External.accepts(ValueKind::Scalar));
    let gradient = PatternCatalog::builtin();
    let palette = &gradient.require("Gradient").unwrap().param("u_palette").unwrap().value;
    assert_eq!(palette.kind_name(), "palette");
    assert!(!palette.accepts(ValueKind::Color));
}
