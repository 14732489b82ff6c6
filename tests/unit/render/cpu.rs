use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];

fn red_pixel() -> RasterImage {
    RasterImage::new(1, 1, RED.to_vec()).unwrap()
}

fn assert_near(actual: Option<[u8; 4]>, expected: [u8; 4]) {
    let actual = actual.expect("pixel in bounds");
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "expected ~{expected:?}, got {actual:?}");
    }
}

#[test]
fn new_surface_is_transparent_and_rejects_bad_sizes() {
    let mut s = CpuSurface::new(3, 2).unwrap();
    assert_eq!(s.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(3, 0), None);
    assert!(CpuSurface::new(0, 1).is_err());
    assert!(matches!(
        CpuSurface::new(70_000, 1),
        Err(GaugeError::Validation(_))
    ));
}

#[test]
fn fill_rect_covers_only_the_rect() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let c = Rgba8Premul::from_straight_rgba(0, 0, 255, 255);
    s.fill_rect(Rect::new(1.0, 1.0, 3.0, 3.0), c).unwrap();
    assert_near(s.pixel(1, 1), [0, 0, 255, 255]);
    assert_near(s.pixel(2, 2), [0, 0, 255, 255]);
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn translucent_fill_stays_premultiplied() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    let c = Rgba8Premul::from_straight_rgba(255, 0, 0, 128);
    s.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), c).unwrap();
    assert_near(s.pixel(0, 0), [128, 0, 0, 128]);
}

#[test]
fn draw_image_at_integer_offset_copies_pixels() {
    let src = RasterImage::new(2, 1, vec![10, 20, 30, 255, 0, 0, 0, 0]).unwrap();
    let mut s = CpuSurface::new(5, 5).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 5.0, 5.0),
        Rgba8Premul::from_straight_rgba(1, 1, 1, 255),
    )
    .unwrap();
    s.draw_image(&src, Point::new(2.0, 3.0)).unwrap();
    assert_near(s.pixel(2, 3), [10, 20, 30, 255]);
    // outside the blit the backdrop is untouched
    assert_near(s.pixel(1, 3), [1, 1, 1, 255]);
    assert_near(s.pixel(4, 3), [1, 1, 1, 255]);
}

#[test]
fn later_draws_cover_earlier_ones() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    let full = Rect::new(0.0, 0.0, 2.0, 2.0);
    s.fill_rect(full, Rgba8Premul::from_straight_rgba(0, 255, 0, 255))
        .unwrap();
    assert_near(s.pixel(0, 0), [0, 255, 0, 255]);

    s.draw_image(&red_pixel(), Point::new(1.0, 1.0)).unwrap();
    assert_near(s.pixel(1, 1), RED);
    assert_near(s.pixel(0, 0), [0, 255, 0, 255]);
}

#[test]
fn draw_image_clips_at_surface_edges() {
    let src = RasterImage::solid(4, 4, Rgba8Premul::from_straight_rgba(9, 9, 9, 255)).unwrap();
    let mut s = CpuSurface::new(3, 3).unwrap();
    s.draw_image(&src, Point::new(-2.0, 1.0)).unwrap();
    s.draw_image(&src, Point::new(10.0, 10.0)).unwrap();
    assert_near(s.pixel(0, 1), [9, 9, 9, 255]);
    assert_near(s.pixel(1, 2), [9, 9, 9, 255]);
    assert_eq!(s.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn half_turn_about_center_mirrors_the_blit() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.save();
    s.rotate_about(180.0, Point::new(2.0, 2.0));
    s.draw_image(&red_pixel(), Point::ZERO).unwrap();
    s.restore().unwrap();

    assert_near(s.pixel(3, 3), RED);
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn quarter_turn_is_clockwise_in_screen_space() {
    // (3,0) relative to the pivot ends up below it after +90 degrees.
    let mut s = CpuSurface::new(8, 8).unwrap();
    s.save();
    s.rotate_about(90.0, Point::new(4.0, 4.0));
    s.draw_image(&red_pixel(), Point::new(6.0, 3.0)).unwrap();
    s.restore().unwrap();

    assert_near(s.pixel(4, 6), RED);
    assert_eq!(s.pixel(6, 3), Some([0, 0, 0, 0]));
}

#[test]
fn restore_returns_to_the_unrotated_frame() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.save();
    s.rotate_about(33.0, Point::new(2.0, 2.0));
    assert_ne!(s.transform(), Affine::IDENTITY);
    s.restore().unwrap();
    assert_eq!(s.transform(), Affine::IDENTITY);
    assert!(matches!(s.restore(), Err(GaugeError::Render(_))));
}

#[test]
fn draws_after_restore_are_not_rotated() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.save();
    s.rotate_about(180.0, Point::new(2.0, 2.0));
    s.restore().unwrap();
    s.draw_image(&red_pixel(), Point::ZERO).unwrap();

    assert_near(s.pixel(0, 0), RED);
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn rotated_blit_has_antialiased_edges() {
    let src = RasterImage::solid(6, 6, Rgba8Premul::from_straight_rgba(200, 200, 200, 255)).unwrap();
    let mut s = CpuSurface::new(16, 16).unwrap();
    s.save();
    s.rotate_about(30.0, Point::new(8.0, 8.0));
    s.draw_image(&src, Point::new(5.0, 5.0)).unwrap();
    s.restore().unwrap();

    let frame = s.into_frame();
    let partial = frame
        .data
        .chunks_exact(4)
        .any(|px| px[3] > 0 && px[3] < 255);
    assert!(partial, "expected anti-aliased edge pixels");
}

#[test]
fn into_frame_is_premultiplied_row_major() {
    let mut s = CpuSurface::new(3, 2).unwrap();
    s.draw_image(&red_pixel(), Point::new(2.0, 1.0)).unwrap();
    let frame = s.into_frame();
    assert_eq!((frame.width, frame.height), (3, 2));
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 3 * 2 * 4);
    let last = &frame.data[(3 + 2) * 4..];
    assert!(last[0] >= 253 && last[3] >= 253, "{last:?}");
    assert_eq!(&frame.data[..4], &[0, 0, 0, 0]);
}

#[test]
fn into_straight_demultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 2,
        data: vec![64, 32, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let straight = frame.into_straight();
    assert!(!straight.premultiplied);
    assert_eq!(&straight.data[..4], &[128, 64, 0, 128]);
    assert_eq!(&straight.data[4..], &[10, 20, 30, 255]);
}
