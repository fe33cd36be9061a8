use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 3,
        height: 2,
        fps: 30,
    }
}

#[test]
fn in_memory_sink_restarts_on_begin() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(0, &FrameRGBA::new(3, 2, false)).unwrap();
    sink.end().unwrap();
    assert!(sink.is_ended());
    assert_eq!(sink.frames().len(), 1);

    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
}

#[test]
fn png_sequence_names_frames_by_index() {
    let dir = std::env::temp_dir().join(format!("pulse-sink-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(0, &FrameRGBA::new(3, 2, false)).unwrap();
    sink.push_frame(1, &FrameRGBA::new(3, 2, false)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    assert!(dir.join("frame-00000.png").is_file());
    assert!(dir.join("frame-00001.png").is_file());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_rejects_wrong_size_and_missing_begin() {
    let dir = std::env::temp_dir().join(format!("pulse-sink-bad-{}", std::process::id()));
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink.push_frame(0, &FrameRGBA::new(3, 2, false)).is_err());
    sink.begin(cfg()).unwrap();
    assert!(sink.push_frame(0, &FrameRGBA::new(2, 2, false)).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
