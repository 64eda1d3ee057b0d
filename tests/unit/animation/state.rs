use super::*;

#[test]
fn rejects_non_finite_speed() {
    assert!(AnimationState::new(Duration::ZERO, f64::NAN).is_err());
    assert!(AnimationState::new(Duration::ZERO, f64::INFINITY).is_err());
    assert!(AnimationState::new(Duration::ZERO, -3.0).is_ok());
}

#[test]
fn elapsed_saturates_before_start() {
    let s = AnimationState::new(Duration::from_secs(5), 100.0).unwrap();
    assert_eq!(s.elapsed(Duration::from_secs(2)), Duration::ZERO);
    assert_eq!(s.elapsed(Duration::from_secs(7)), Duration::from_secs(2));
    assert_eq!(s.distance(Duration::from_secs(7)), 200.0);
}

#[test]
fn offset_wraps_into_step() {
    let s = AnimationState::new(Duration::ZERO, 500.0).unwrap();
    // 0.25s * 500 = 125 -> 125 mod 40 = 5
    assert_eq!(s.offset(Duration::from_millis(250), 40.0), Some(5.0));
    assert_eq!(s.offset(Duration::ZERO, 40.0), Some(0.0));
}

#[test]
fn offset_stays_in_range() {
    let s = AnimationState::new(Duration::ZERO, 333.3).unwrap();
    let step = 17.25;
    for ms in (0..5_000).step_by(7) {
        let o = s.offset(Duration::from_millis(ms), step).unwrap();
        assert!((0.0..step).contains(&o), "offset {o} out of range at {ms}ms");
    }
}

#[test]
fn negative_speed_still_lands_in_range() {
    let s = AnimationState::new(Duration::ZERO, -500.0).unwrap();
    let o = s.offset(Duration::from_millis(250), 40.0).unwrap();
    assert!((0.0..40.0).contains(&o));
    assert_eq!(o, 35.0);
}

#[test]
fn offset_undefined_for_zero_step() {
    let s = AnimationState::new(Duration::ZERO, 500.0).unwrap();
    assert_eq!(s.offset(Duration::from_secs(1), 0.0), None);
    assert_eq!(s.offset(Duration::from_secs(1), f64::NAN), None);
}
