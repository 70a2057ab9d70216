use super::*;

#[test]
fn texture_rejects_wrong_byte_count() {
    assert!(LabelTexture::new(2, 2, vec![0; 16]).is_ok());
    assert!(matches!(
        LabelTexture::new(2, 2, vec![0; 15]),
        Err(RicochetError::ResourceInitFailure(_))
    ));
}

#[test]
fn solid_texture_is_premultiplied() {
    let t = LabelTexture::solid(3, 1, Rgba8::new(200, 100, 0, 128));
    assert_eq!(t.size(), Size::new(3.0, 1.0));
    assert_eq!(&t.data()[..4], &[100, 50, 0, 128]);
    assert_eq!(t.data().len(), 12);
}

#[test]
fn block_labels_scale_with_char_count() {
    let mut f = BlockLabelFactory {
        advance: 8,
        line_height: 16,
        color: Rgb8::WHITE.opaque(),
    };
    let t = f.render_label("R1").unwrap();
    assert_eq!((t.width(), t.height()), (16, 16));
    let empty = f.render_label("").unwrap();
    assert_eq!((empty.width(), empty.height()), (8, 16));
}

#[test]
fn missing_font_file_is_resource_failure() {
    let err = FontLabelFactory::from_path(
        Path::new("tests/data/does-not-exist.ttf"),
        24.0,
        Rgb8::WHITE,
    )
    .err()
    .expect("missing font must fail");
    assert!(matches!(err, RicochetError::ResourceInitFailure(_)));
}

#[test]
fn garbage_font_bytes_are_resource_failure() {
    let res = FontLabelFactory::from_bytes(b"not a font".to_vec(), 24.0, Rgb8::WHITE);
    assert!(matches!(res, Err(RicochetError::ResourceInitFailure(_))));
}

#[test]
fn non_positive_font_size_is_rejected() {
    let res = FontLabelFactory::from_bytes(Vec::new(), 0.0, Rgb8::WHITE);
    assert!(matches!(res, Err(RicochetError::InvalidGeometry(_))));
}

fn fixture_font() -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf");
    std::fs::read(&path).unwrap()
}

#[test]
fn font_labels_are_sized_to_the_text() {
    let mut f = FontLabelFactory::from_bytes(fixture_font(), 24.0, Rgb8::WHITE).unwrap();
    let short = f.render_label("C").unwrap();
    let long = f.render_label("CGreen").unwrap();
    assert!(short.width() > 1 && short.height() > 1);
    assert!(long.width() > short.width());
    assert_eq!(long.height(), short.height());
    assert_eq!(long.data().len(), long.width() as usize * long.height() as usize * 4);
    assert!(long.data().chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn font_labels_use_the_requested_color() {
    let mut f = FontLabelFactory::from_bytes(fixture_font(), 32.0, Rgb8::new(255, 0, 0)).unwrap();
    let tex = f.render_label("M").unwrap();
    let solid: Vec<&[u8]> = tex.data().chunks_exact(4).filter(|px| px[3] == 255).collect();
    assert!(!solid.is_empty());
    assert!(solid.iter().all(|px| px[0] == 255 && px[1] == 0 && px[2] == 0));
}
