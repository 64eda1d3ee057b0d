use super::*;

#[test]
fn fixed_rate_yields_range_in_order() {
    let fps = Fps::new(10, 1).unwrap();
    let range = FrameRange::new(FrameIndex(3), FrameIndex(6)).unwrap();
    let mut s = FixedRateScheduler::new(fps, range);
    assert_eq!(s.remaining(), 3);

    let ticks: Vec<FrameTick> = std::iter::from_fn(|| s.next_frame()).collect();
    assert_eq!(
        ticks.iter().map(|t| t.index.0).collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
    assert_eq!(ticks[0].time, Duration::from_millis(300));
    assert_eq!(ticks[2].time, Duration::from_millis(500));
    assert!(s.next_frame().is_none());
}

#[test]
fn fixed_rate_empty_range_never_ticks() {
    let fps = Fps::new(30, 1).unwrap();
    let range = FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap();
    let mut s = FixedRateScheduler::new(fps, range);
    assert!(s.next_frame().is_none());
}

#[test]
fn halt_handle_is_shared_between_clones() {
    let a = HaltHandle::new();
    let b = a.clone();
    assert!(!b.is_halted());
    a.halt();
    assert!(b.is_halted());
}

#[test]
fn realtime_stops_when_halted() {
    let mut s = RealtimeScheduler::new(Fps::new(1000, 1).unwrap());
    let first = s.next_frame().unwrap();
    assert_eq!(first.index, FrameIndex(0));
    s.halt_handle().halt();
    assert!(s.next_frame().is_none());
}

#[test]
fn realtime_paces_and_respects_limit() {
    let mut s = RealtimeScheduler::new(Fps::new(200, 1).unwrap())
        .with_limit(Some(Duration::from_millis(60)));
    let mut ticks = Vec::new();
    while let Some(t) = s.next_frame() {
        ticks.push(t);
    }
    assert!(!ticks.is_empty());
    // Frames are at least one interval apart, so a 60ms budget at 5ms/frame caps the count.
    assert!(ticks.len() <= 13, "got {} frames", ticks.len());
    for pair in ticks.windows(2) {
        assert_eq!(pair[1].index.0, pair[0].index.0 + 1);
        assert!(pair[1].time >= pair[0].time + Duration::from_millis(5));
    }
    assert!(s.clock().now() >= Duration::from_millis(60));
}
