use super::*;
use kurbo::PathEl;

fn pts(v: &[(f64, f64)]) -> Vec<Point> {
    v.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn empty_and_single_point_paths() {
    assert!(build_path(&[], CurveKind::Step).elements().is_empty());

    let p = build_path(&pts(&[(3.0, 4.0)]), CurveKind::Step);
    assert_eq!(p.elements(), &[PathEl::MoveTo(Point::new(3.0, 4.0))]);
}

#[test]
fn step_turns_at_midpoint_and_finishes_last_run() {
    let p = build_path(&pts(&[(0.0, 0.0), (40.0, 30.0)]), CurveKind::Step);
    assert_eq!(
        p.elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(20.0, 0.0)),
            PathEl::LineTo(Point::new(20.0, 30.0)),
            PathEl::LineTo(Point::new(40.0, 30.0)),
        ]
    );
}

#[test]
fn step_before_goes_vertical_first() {
    let p = build_path(&pts(&[(0.0, 0.0), (40.0, 30.0)]), CurveKind::StepBefore);
    assert_eq!(
        p.elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(0.0, 30.0)),
            PathEl::LineTo(Point::new(40.0, 30.0)),
        ]
    );
}

#[test]
fn step_after_goes_horizontal_first() {
    let p = build_path(&pts(&[(0.0, 0.0), (40.0, 30.0)]), CurveKind::StepAfter);
    assert_eq!(
        p.elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(40.0, 0.0)),
            PathEl::LineTo(Point::new(40.0, 30.0)),
        ]
    );
}

#[test]
fn linear_connects_points_directly() {
    let p = build_path(
        &pts(&[(0.0, 0.0), (3.0, 4.0), (6.0, 0.0)]),
        CurveKind::Linear,
    );
    assert_eq!(p.elements().len(), 3);
}

#[test]
fn curve_kind_json_names() {
    let k: CurveKind = serde_json::from_str("\"step_before\"").unwrap();
    assert_eq!(k, CurveKind::StepBefore);
    assert_eq!(CurveKind::default(), CurveKind::Step);
}
