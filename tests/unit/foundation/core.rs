use super::*;

#[test]
fn default_fps_period_is_one_sixtieth() {
    let p = Fps::default().frame_period();
    assert_eq!(p, Duration::from_nanos(16_666_666));
    assert!(p > Duration::from_millis(16) && p < Duration::from_millis(17));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30000, 1001).unwrap().as_f64(), 30000.0 / 1001.0);
}

#[test]
fn canvas_default_and_frame_size() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1280, 720));
    assert_eq!(c.frame_bytes(), Some(1280 * 720 * 4));
    assert_eq!(Canvas::new(3, 2).unwrap().alloc_rgba8().unwrap(), vec![0u8; 24]);
}

#[test]
fn oversized_canvas_fails_to_allocate() {
    let c = Canvas::new(u32::MAX, u32::MAX).unwrap();
    assert_eq!(c.frame_bytes(), None);
    assert!(matches!(
        c.alloc_rgba8(),
        Err(RicochetError::ResourceInitFailure(_))
    ));
}

#[test]
fn canvas_rejects_empty() {
    assert!(matches!(
        Canvas::new(0, 10),
        Err(RicochetError::InvalidGeometry(_))
    ));
    assert!(Canvas::new(1, 1).is_ok());
}

#[test]
fn opaque_premul_is_identity() {
    let c = Rgb8::new(10, 200, 30).opaque();
    assert!(c.is_opaque());
    assert_eq!(c.to_premul(), [10, 200, 30, 255]);
}

#[test]
fn half_alpha_premul_scales_channels() {
    let c = Rgba8::new(200, 100, 0, 128);
    assert!(!c.is_opaque());
    assert_eq!(c.to_premul(), [100, 50, 0, 128]);
}
