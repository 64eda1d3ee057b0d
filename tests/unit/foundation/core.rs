use super::*;

#[test]
fn frame_range_counts_half_open() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(!r.is_empty());
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(
        FrameRange::new(FrameIndex(3), FrameIndex(3))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frames_to_duration_is_exact() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.frames_to_duration(3), Duration::from_millis(300));

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.frames_to_duration(30), Duration::from_millis(1001));
    assert_eq!(ntsc.to_string(), "30000/1001");

    assert_eq!(Fps::default().interval(), Duration::from_nanos(16_666_666));
}

#[test]
fn canvas_u16_bounds() {
    assert_eq!(
        Canvas {
            width: 64,
            height: 32
        }
        .to_u16()
        .unwrap(),
        (64, 32)
    );
    assert!(
        Canvas {
            width: 0,
            height: 32
        }
        .to_u16()
        .is_err()
    );
    assert!(
        Canvas {
            width: 70_000,
            height: 32
        }
        .to_u16()
        .is_err()
    );
}

#[test]
fn canvas_parity_and_display() {
    let c = Canvas {
        width: 96,
        height: 64,
    };
    assert!(c.is_even());
    assert_eq!(c.to_string(), "96x64");
    assert!(
        !Canvas {
            width: 31,
            height: 20
        }
        .is_even()
    );
}

#[test]
fn premul_rounds_channels() {
    let c = Rgba8Premul::from_straight([255, 128, 0, 128]);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::from_straight([9, 9, 9, 0]).to_array(), [0, 0, 0, 0]);
    assert_eq!(Rgba8Premul::from_straight([255; 4]), Rgba8Premul::WHITE);
}
