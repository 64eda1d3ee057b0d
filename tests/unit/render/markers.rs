use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 48,
        height: 32,
    }
}

fn alpha_at(layer: &MarkerLayer, x: u32, y: u32) -> u8 {
    let i = ((y * layer.canvas().width + x) * 4 + 3) as usize;
    layer.pixels()[i]
}

#[test]
fn marker_path_has_one_subpath_per_point() {
    let points = [Point::new(5.0, 5.0), Point::new(20.0, 5.0), Point::new(9.0, 9.0)];
    let path = marker_path(&points, 3.0);
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 3);
}

#[test]
fn draw_empty_leaves_layer_blank() {
    let mut layer = MarkerLayer::new(canvas(), MarkerStyle::default()).unwrap();
    layer.draw(&[]);
    assert_eq!(layer.drawn(), 0);
    assert!(layer.pixels().iter().all(|&b| b == 0));
}

#[test]
fn draw_fills_marker_centers_only() {
    let mut layer = MarkerLayer::new(canvas(), MarkerStyle::default()).unwrap();
    layer.draw(&[Point::new(10.5, 10.5), Point::new(30.5, 20.5)]);
    assert_eq!(layer.drawn(), 2);
    assert_eq!(alpha_at(&layer, 10, 10), 255);
    assert_eq!(alpha_at(&layer, 30, 20), 255);
    assert_eq!(alpha_at(&layer, 0, 0), 0);
    assert_eq!(alpha_at(&layer, 20, 28), 0);
}

#[test]
fn draw_clears_previous_frame() {
    let mut layer = MarkerLayer::new(canvas(), MarkerStyle::default()).unwrap();
    layer.draw(&[Point::new(10.5, 10.5)]);
    assert_eq!(alpha_at(&layer, 10, 10), 255);

    layer.draw(&[Point::new(30.5, 20.5)]);
    assert_eq!(alpha_at(&layer, 10, 10), 0);
    assert_eq!(alpha_at(&layer, 30, 20), 255);

    layer.draw(&[]);
    assert!(layer.pixels().iter().all(|&b| b == 0));
}

#[test]
fn overlapping_markers_share_one_fill() {
    let style = MarkerStyle {
        radius: 3.0,
        color: [0, 0, 0, 128],
    };
    let mut layer = MarkerLayer::new(canvas(), style).unwrap();
    let p = Point::new(10.5, 10.5);
    layer.draw(&[p, p]);
    let a = alpha_at(&layer, 10, 10);
    // Two separate fills would stack to ~192.
    assert!((120..=136).contains(&a), "alpha {a}");
}

#[test]
fn rejects_bad_canvas_and_radius() {
    assert!(
        MarkerLayer::new(
            Canvas {
                width: 0,
                height: 4
            },
            MarkerStyle::default()
        )
        .is_err()
    );
    assert!(
        MarkerLayer::new(
            canvas(),
            MarkerStyle {
                radius: f64::NAN,
                ..MarkerStyle::default()
            }
        )
        .is_err()
    );
}
