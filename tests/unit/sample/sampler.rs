use super::*;
use crate::geometry::curve::CurveKind;

/// A straight 100px path where arc length equals x.
fn hundred() -> PathGeometry {
    PathGeometry::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
        ],
        CurveKind::Step,
    )
    .unwrap()
}

fn xs(s: &SampleSet) -> Vec<f64> {
    s.points.iter().map(|p| (p.x * 1e6).round() / 1e6).collect()
}

#[test]
fn arc_range_is_half_open() {
    let v: Vec<f64> = arc_range(0.0, 100.0, 10.0).collect();
    assert_eq!(v.len(), 10);
    assert_eq!(v[0], 0.0);
    assert_eq!(v[9], 90.0);

    assert_eq!(arc_range(10.0, 100.0, 10.0).count(), 9);
    assert_eq!(arc_range(5.0, 100.0, 10.0).count(), 10);
    assert_eq!(arc_range(100.0, 100.0, 10.0).count(), 0);
    assert_eq!(arc_range(150.0, 100.0, 10.0).count(), 0);
}

#[test]
fn arc_range_rejects_bad_steps() {
    assert_eq!(arc_range(0.0, 100.0, 0.0).count(), 0);
    assert_eq!(arc_range(0.0, 100.0, -1.0).count(), 0);
    assert_eq!(arc_range(0.0, 100.0, f64::NAN).count(), 0);
    assert_eq!(arc_range(f64::NAN, 100.0, 1.0).count(), 0);
}

#[test]
fn zero_offset_yields_exactly_count_points() {
    let g = hundred();
    let s = sample(&g, 10, 0.0);
    assert_eq!(s.len(), 10);
    assert_eq!(s.step, 10.0);
    assert_eq!(
        xs(&s),
        vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]
    );
}

#[test]
fn half_step_offset_keeps_all_points() {
    let s = sample(&hundred(), 10, 5.0);
    assert_eq!(
        xs(&s),
        vec![5.0, 15.0, 25.0, 35.0, 45.0, 55.0, 65.0, 75.0, 85.0, 95.0]
    );
}

#[test]
fn full_step_offset_drops_the_last_point() {
    let s = sample(&hundred(), 10, 10.0);
    assert_eq!(
        xs(&s),
        vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]
    );
}

#[test]
fn count_degrades_only_at_a_full_step() {
    let g = hundred();
    for offset in [0.0, 0.5, 3.0, 9.0, 9.999] {
        assert_eq!(sample(&g, 10, offset).len(), 10, "offset={offset}");
    }
    assert_eq!(sample(&g, 10, 10.0).len(), 9);
    assert_eq!(sample(&g, 10, 20.0).len(), 8);
    assert_eq!(sample(&g, 10, 100.0).len(), 0);
}

#[test]
fn count_matches_half_open_formula() {
    let g = PathGeometry::new(
        vec![
            Point::new(600.0, 40.0),
            Point::new(410.0, 220.0),
            Point::new(250.0, 90.0),
            Point::new(30.0, 300.0),
        ],
        CurveKind::Step,
    )
    .unwrap();
    let step = g.total_length() / 7.0;
    for offset in [0.0, step * 0.25, step * 0.5, step * 0.99] {
        let expected = (((g.total_length() - offset) / step).ceil() as usize).min(7);
        assert_eq!(sample(&g, 7, offset).len(), expected);
    }
}

#[test]
fn zero_offset_never_exceeds_count_when_step_rounds_down() {
    // total / (total / 7) rounds to just above 7 for this length.
    let g = PathGeometry::new(
        vec![Point::new(3607.978621671572, 0.0), Point::new(0.0, 0.0)],
        CurveKind::Linear,
    )
    .unwrap();
    let s = sample(&g, 7, 0.0);
    assert_eq!(s.len(), 7);
    let last = s.points[6];
    assert!((last.x - (g.total_length() - 6.0 * s.step)).abs() < 1e-6);
}

#[test]
fn zero_offset_yields_count_across_lengths() {
    for total in [1.0, 3.3, 97.1, 640.0, 1234.5678, 3607.978621671572, 99_999.7] {
        let g = PathGeometry::new(
            vec![Point::new(total, 0.0), Point::new(0.0, 0.0)],
            CurveKind::Linear,
        )
        .unwrap();
        for count in 1..=40 {
            assert_eq!(
                sample(&g, count, 0.0).len(),
                count,
                "total={total} count={count}"
            );
        }
    }
}

#[test]
fn sampling_is_bit_identical() {
    let g = PathGeometry::new(
        vec![
            Point::new(300.0, 80.0),
            Point::new(210.0, 140.0),
            Point::new(90.0, 60.0),
        ],
        CurveKind::Step,
    )
    .unwrap();
    let a = sample(&g, 10, 3.25);
    let b = sample(&g, 10, 3.25);
    assert_eq!(a.points.len(), b.points.len());
    for (p, q) in a.points.iter().zip(&b.points) {
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn degenerate_geometry_is_a_noop_frame() {
    let g = PathGeometry::new(vec![Point::new(4.0, 4.0), Point::new(4.0, 4.0)], CurveKind::Step)
        .unwrap();
    assert_eq!(step_length(&g, 10), None);
    let s = sample(&g, 10, 0.0);
    assert!(s.is_empty());
    assert_eq!(s.step, 0.0);
}

#[test]
fn zero_count_is_a_noop_frame() {
    assert!(sample(&hundred(), 0, 0.0).is_empty());
}
