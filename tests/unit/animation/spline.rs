use super::*;

fn pts(xy: &[(f64, f64)]) -> Vec<SplinePoint> {
    xy.iter().map(|&(x, y)| SplinePoint::new(x, y)).collect()
}

#[test]
fn two_points_reproduce_a_line() {
    let c = SplineCurve::default();
    for i in 0..=10 {
        let u = i as f64 / 10.0;
        assert!((c.evaluate(u) - u).abs() < 1e-12, "u={u}");
    }
}

#[test]
fn passes_through_control_points() {
    let c = SplineCurve::new(pts(&[(0.0, 0.2), (0.3, 0.9), (0.6, 0.1), (1.0, 0.5)]));
    for p in c.points() {
        assert!((c.evaluate(p.x) - p.y).abs() < 1e-12);
    }
}

#[test]
fn output_need_not_be_monotonic() {
    let c = SplineCurve::new(pts(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]));
    assert!(c.evaluate(0.25) > 0.0);
    assert!(c.evaluate(0.5) > c.evaluate(0.75));
}

#[test]
fn points_are_sorted_and_filtered() {
    let c = SplineCurve::new(pts(&[(1.0, 1.0), (f64::NAN, 0.5), (0.0, 0.0), (0.5, 0.7)]));
    let xs: Vec<f64> = c.points().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 0.5, 1.0]);
}

#[test]
fn out_of_span_holds_end_points() {
    let c = SplineCurve::new(pts(&[(0.2, 0.3), (0.8, 0.9)]));
    assert_eq!(c.evaluate(0.0), 0.3);
    assert_eq!(c.evaluate(1.0), 0.9);
}

#[test]
fn degenerate_curves() {
    assert_eq!(SplineCurve::new(vec![]).evaluate(0.5), 0.0);
    assert_eq!(SplineCurve::new(pts(&[(0.4, 0.6)])).evaluate(0.9), 0.6);
}

#[test]
fn editing_keeps_order() {
    let mut c = SplineCurve::default();
    assert_eq!(c.insert(SplinePoint::new(0.5, 0.2)), Some(1));
    assert_eq!(c.move_point(1, SplinePoint::new(0.9, 0.2)), Some(1));
    assert_eq!(c.move_point(0, SplinePoint::new(0.95, 0.0)), Some(1));
    let xs: Vec<f64> = c.points().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.9, 0.95, 1.0]);
    assert!(c.remove(7).is_none());
}

#[test]
fn variation_maps_curve_onto_domain() {
    let v = SplineVariation::new(pts(&[(0.0, 0.0), (1.0, 1.0)]), 10.0, 20.0);
    assert!((v.value_at(0.0) - 10.0).abs() < 1e-12);
    assert!((v.value_at(0.5) - 15.0).abs() < 1e-12);
    assert!((v.value_at(1.0) - 20.0).abs() < 1e-12);
}

#[test]
fn serde_stores_points_and_domain() {
    let v = SplineVariation::new(pts(&[(0.0, 0.1), (1.0, 0.4)]), -1.0, 1.0);
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["domainMin"], -1.0);
    assert_eq!(json["points"][1]["y"], 0.4);
    let back: SplineVariation = serde_json::from_value(json).unwrap();
    assert_eq!(back, v);
}
