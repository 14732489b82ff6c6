use super::*;

#[test]
fn time_sample_rejects_out_of_range_fields() {
    assert!(TimeSample::new(23, 59).is_ok());
    assert!(TimeSample::new(24, 0).is_err());
    assert!(TimeSample::new(0, 60).is_err());
}

#[test]
fn time_sample_parse_and_display() {
    let t = TimeSample::parse("09:05").unwrap();
    assert_eq!((t.hour(), t.minute()), (9, 5));
    assert_eq!(t.to_string(), "09:05");

    assert!(TimeSample::parse("0905").is_err());
    assert!(TimeSample::parse("25:00").is_err());
    assert!(TimeSample::parse("ab:cd").is_err());
}

#[test]
fn viewport_requires_positive_dimensions_and_halves_center() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());

    let v = Viewport::new(321, 320).unwrap();
    assert_eq!(v.center(), Point::new(160.0, 160.0));
}

#[test]
fn raster_new_checks_buffer_length() {
    assert!(RasterImage::new(2, 2, vec![0; 16]).is_ok());
    assert!(RasterImage::new(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::new(0, 2, vec![]).is_err());
}

#[test]
fn raster_from_straight_premultiplies() {
    let img = RasterImage::from_straight_rgba8(1, 1, vec![100, 50, 200, 128]).unwrap();
    assert_eq!(
        img.pixel(0, 0).unwrap(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );

    let clear = RasterImage::from_straight_rgba8(1, 1, vec![9, 9, 9, 0]).unwrap();
    assert_eq!(clear.pixel(0, 0).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn raster_clone_shares_pixels() {
    let a = RasterImage::solid(3, 2, Rgba8Premul::from_straight_rgba(1, 2, 3, 255)).unwrap();
    let b = a.clone();
    assert!(a.shares_pixels_with(&b));
    assert_eq!(b.pixel(2, 1), Some([1, 2, 3, 255]));
    assert_eq!(b.pixel(3, 0), None);
}

#[test]
fn premul_color_demultiplies_to_straight() {
    let c = Rgba8Premul {
        r: 64,
        g: 32,
        b: 0,
        a: 128,
    };
    assert_eq!(c.to_straight_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_straight_array(), [0, 0, 0, 0]);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 255).to_straight_array(),
        [10, 20, 30, 255]
    );
}
