use egui::{Color32, pos2};
use formula_sketch::{CanvasError, Mode, RasterImage, StrokeCanvas, StrokeSegment};

// Helper to draw a polyline as one stroke
fn draw(canvas: &mut StrokeCanvas, points: &[(f32, f32)]) -> Vec<StrokeSegment> {
    let (x, y) = points[0];
    canvas.begin_stroke(x, y);
    let segments = points[1..]
        .iter()
        .map(|&(x, y)| canvas.extend_stroke(x, y).unwrap())
        .collect();
    canvas.end_stroke();
    segments
}

#[test]
fn test_horizontal_line_in_draw_mode() {
    let mut canvas = StrokeCanvas::new(400, 200);
    draw(&mut canvas, &[(10.0, 10.0), (50.0, 10.0)]);
    let raster = canvas.raster();

    // Exactly four rows, 8..=11, along the whole run
    for x in [10, 30, 49] {
        for y in 8..=11 {
            assert_eq!(raster.pixel(x, y), Some(Color32::BLACK), "pixel ({x}, {y})");
        }
        assert_eq!(raster.pixel(x, 7), Some(Color32::WHITE));
        assert_eq!(raster.pixel(x, 12), Some(Color32::WHITE));
    }
    let rows = (0..200).filter(|&y| raster.pixel(30, y) == Some(Color32::BLACK)).count();
    assert_eq!(rows, 4);

    // No caps past the endpoints
    assert_eq!(raster.pixel(8, 10), Some(Color32::WHITE));
    assert_eq!(raster.pixel(52, 10), Some(Color32::WHITE));
    let cols: Vec<u32> = (0..400)
        .filter(|&x| raster.pixel(x, 10) == Some(Color32::BLACK))
        .collect();
    assert_eq!(cols.first(), Some(&10));
    assert_eq!(cols.last(), Some(&49));
    assert_eq!(raster.pixel(200, 100), Some(Color32::WHITE));
    assert_eq!(raster.pixel(0, 0), Some(Color32::WHITE));
}

#[test]
fn test_raster_is_reproducible_from_segments() {
    let mut canvas = StrokeCanvas::new(120, 80);
    let mut segments = draw(&mut canvas, &[(5.0, 5.0), (60.0, 40.0), (100.0, 10.0)]);
    canvas.toggle_eraser();
    segments.extend(draw(&mut canvas, &[(50.0, 0.0), (50.0, 79.0)]));
    canvas.toggle_eraser();
    segments.extend(draw(&mut canvas, &[(10.0, 70.0), (110.0, 70.0)]));

    let mut replay = RasterImage::new(120, 80);
    for segment in &segments {
        replay.draw_segment(segment);
    }
    assert_eq!(&replay, canvas.raster());
}

#[test]
fn test_eraser_removes_ink() {
    let mut canvas = StrokeCanvas::new(100, 50);
    draw(&mut canvas, &[(10.0, 25.0), (90.0, 25.0)]);
    assert_eq!(canvas.raster().pixel(50, 25), Some(Color32::BLACK));

    canvas.toggle_eraser();
    let erased = draw(&mut canvas, &[(50.0, 0.0), (50.0, 49.0)]);
    assert_eq!(erased[0].color(), Color32::WHITE);
    assert_eq!(erased[0].width(), 8.0);
    assert_eq!(canvas.raster().pixel(50, 25), Some(Color32::WHITE));
    assert_eq!(canvas.raster().pixel(20, 25), Some(Color32::BLACK));
}

#[test]
fn test_double_toggle_restores_segment_style() {
    let mut canvas = StrokeCanvas::new(50, 50);
    canvas.toggle_eraser();
    canvas.toggle_eraser();
    assert_eq!(canvas.mode(), Mode::Draw);

    canvas.begin_stroke(0.0, 0.0);
    let segment = canvas.extend_stroke(10.0, 10.0).unwrap();
    assert_eq!(segment, StrokeSegment::new(pos2(0.0, 0.0), pos2(10.0, 10.0), Color32::BLACK, 4.0));
}

#[test]
fn test_clear_matches_fresh_canvas() {
    let mut canvas = StrokeCanvas::new(64, 32);
    draw(&mut canvas, &[(0.0, 0.0), (63.0, 31.0)]);
    canvas.toggle_eraser();
    canvas.begin_stroke(5.0, 5.0);

    canvas.clear();

    assert_eq!(canvas.raster(), &RasterImage::new(64, 32));
    assert!(canvas.surface().is_empty());
    assert_eq!(canvas.mode(), Mode::Draw);
    assert_eq!(canvas.extend_stroke(1.0, 1.0), Err(CanvasError::NoActiveStroke));
}

#[test]
fn test_surface_and_raster_stay_in_sync() {
    let mut canvas = StrokeCanvas::new(50, 50);
    assert!(canvas.extend_stroke(10.0, 10.0).is_err());
    assert!(canvas.surface().is_empty());
    assert!(canvas.raster().is_blank());

    draw(&mut canvas, &[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]);
    // One line plus two caps per segment
    assert_eq!(canvas.surface().len(), 6);
    assert!(!canvas.raster().is_blank());
}
