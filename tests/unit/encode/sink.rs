use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "ricochet_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::default(),
    }
}

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: px.repeat(2),
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    assert!(sink.config().is_none());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([1, 2, 3, 255])).unwrap();
    sink.push_frame(FrameIndex(1), &frame([4, 5, 6, 255])).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(&cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
    assert_eq!(&sink.frames()[1].1.data[..4], &[4, 5, 6, 255]);
}

#[test]
fn begin_resets_in_memory_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([0, 0, 0, 255])).unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
}

#[test]
fn boxed_sink_forwards() {
    let mut sink: Box<dyn FrameSink> = Box::new(NullSink::new());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([0, 0, 0, 255])).unwrap();
    sink.end().unwrap();
}

#[test]
fn null_sink_counts_frames() {
    let mut sink = NullSink::new();
    sink.begin(cfg()).unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &frame([0, 0, 0, 255])).unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.frames(), 3);
}

#[test]
fn png_sequence_writes_unpremultiplied_frames() {
    let dir = temp_dir("png_sequence");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(7), &frame([128, 0, 0, 128])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.written(), 1);

    let path = sink.frame_path(FrameIndex(7));
    assert!(path.ends_with("frame_000007.png"));
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn png_sequence_rejects_short_buffers() {
    let dir = temp_dir("png_short");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    let bad = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 4],
        premultiplied: true,
    };
    let err = sink.push_frame(FrameIndex(0), &bad).unwrap_err();
    assert!(matches!(err, RicochetError::Output(_)));
    std::fs::remove_dir_all(&dir).unwrap();
}
