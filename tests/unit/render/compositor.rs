use super::*;
use crate::{
    foundation::core::Rgba8Premul,
    gauge::digits::DigitPair,
    render::surface::{RecordingSurface, SurfaceOp},
};

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RasterImage {
    RasterImage::solid(w, h, Rgba8Premul::from_straight_rgba(rgb[0], rgb[1], rgb[2], 255)).unwrap()
}

fn face() -> FuelGaugeFace {
    let assets = FaceAssets::from_images(
        solid(50, 50, [1, 1, 1]),
        solid(4, 20, [2, 2, 2]),
        solid(10, 410, [3, 3, 3]),
        solid(10, 410, [4, 4, 4]),
    );
    FuelGaugeFace::new(assets, FaceLayout::default()).unwrap()
}

fn t(hour: u8, minute: u8) -> TimeSample {
    TimeSample::new(hour, minute).unwrap()
}

#[test]
fn new_rejects_invalid_layout() {
    let assets = face().assets().clone();
    let layout = FaceLayout {
        digit_pitch_px: -3,
        ..FaceLayout::default()
    };
    assert!(FuelGaugeFace::new(assets, layout).is_err());
}

#[test]
fn digit_placements_scroll_strips_by_pitch() {
    let f = face();
    let vp = Viewport::new(320, 320).unwrap();
    let p = f.digit_placements(vp, t(9, 45));

    assert_eq!(
        p.map(|d| d.digit),
        [0, 9, 4, 5],
        "hour tens, hour units, minute tens, minute units"
    );
    assert_eq!(p[0].at, Point::new(160.0 - 54.0, 160.0 + 58.0));
    assert_eq!(p[1].at, Point::new(160.0 - 27.0, 160.0 + 58.0 - 41.0 * 9.0));
    assert_eq!(p[2].at, Point::new(160.0 - 1.0, 160.0 + 58.0 - 41.0 * 4.0));
    assert_eq!(p[3].at, Point::new(160.0 + 24.0, 160.0 + 58.0 - 41.0 * 5.0));
    assert_eq!(
        p.map(|d| d.variant),
        [
            DigitVariant::Light,
            DigitVariant::Light,
            DigitVariant::Light,
            DigitVariant::Dark
        ]
    );
}

#[test]
fn digit_placements_follow_decomposed_pairs() {
    let f = face();
    let vp = Viewport::new(100, 100).unwrap();
    let p = f.digit_placements(vp, t(23, 0));
    let hours = DigitPair(p[0].digit, p[1].digit);
    let minutes = DigitPair(p[2].digit, p[3].digit);
    assert_eq!(hours, DigitPair(1, 2));
    assert_eq!(minutes, DigitPair(0, 0));
}

#[test]
fn nine_oclock_frame_issues_layers_in_order() {
    let mut f = face();
    let vp = Viewport::new(320, 320).unwrap();
    let mut surface = RecordingSurface::new(320, 320);
    f.render(&mut surface, vp, t(9, 0)).unwrap();

    let ops = surface.ops();
    assert_eq!(ops.len(), 10);

    match &ops[0] {
        SurfaceOp::Fill { rect, color } => {
            assert_eq!(*rect, Rect::new(0.0, 0.0, 320.0, 320.0));
            assert_eq!(*color, Rgba8Premul::from_straight_rgba(0, 0, 0, 255));
        }
        other => panic!("expected backdrop fill, got {other:?}"),
    }

    let expected_digits = [
        (&f.assets().digits_light, Point::new(106.0, 218.0)),
        (&f.assets().digits_light, Point::new(133.0, 218.0 - 41.0 * 9.0)),
        (&f.assets().digits_light, Point::new(159.0, 218.0)),
        (&f.assets().digits_dark, Point::new(184.0, 218.0)),
    ];
    for (op, (strip, at)) in ops[1..5].iter().zip(expected_digits) {
        match op {
            SurfaceOp::DrawImage { image, at: got } => {
                assert!(image.shares_pixels_with(strip));
                assert_eq!(*got, at);
            }
            other => panic!("expected digit blit, got {other:?}"),
        }
    }

    match &ops[5] {
        SurfaceOp::DrawImage { image, at } => {
            assert_eq!((image.width, image.height), (320, 320));
            assert_eq!(*at, Point::ZERO);
        }
        other => panic!("expected background blit, got {other:?}"),
    }

    assert_eq!(ops[6], SurfaceOp::Save);
    match &ops[7] {
        SurfaceOp::Rotate { degrees, pivot } => {
            assert!((degrees - 104.55).abs() < 1e-9);
            assert_eq!(*pivot, Point::new(160.0, 160.0));
        }
        other => panic!("expected rotation, got {other:?}"),
    }
    match &ops[8] {
        SurfaceOp::DrawImage { image, at } => {
            assert!(image.shares_pixels_with(&f.assets().needle));
            assert_eq!(*at, Point::new(20.0, 20.0));
        }
        other => panic!("expected needle blit, got {other:?}"),
    }
    assert_eq!(ops[9], SurfaceOp::Restore);
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn rotation_never_accumulates_across_frames() {
    let mut f = face();
    let vp = Viewport::new(64, 64).unwrap();
    let mut surface = RecordingSurface::new(64, 64);
    for _ in 0..3 {
        f.render(&mut surface, vp, t(10, 30)).unwrap();
        assert_eq!(surface.save_depth(), 0);
    }
    let rotations = surface
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Rotate { .. }))
        .count();
    assert_eq!(rotations, 3);
}

#[test]
fn background_is_scaled_once_per_viewport() {
    let mut f = face();
    let mut surface = RecordingSurface::new(80, 80);
    let small = Viewport::new(80, 80).unwrap();
    let large = Viewport::new(120, 90).unwrap();

    f.render(&mut surface, small, t(11, 0)).unwrap();
    f.render(&mut surface, small, t(11, 1)).unwrap();
    assert_eq!(f.background_cache().rebuild_count(), 1);

    f.render(&mut surface, large, t(11, 2)).unwrap();
    assert_eq!(f.background_cache().rebuild_count(), 2);
    assert_eq!(f.background_cache().cached_viewport(), Some(large));
}
