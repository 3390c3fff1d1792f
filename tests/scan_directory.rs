//! End-to-end: config file, directory walk, probing and reports on disk

use std::path::Path;
use tts_duration::config::Config;
use tts_duration::probe::{walk, Prober, Status};
use tts_duration::report;

fn mp3_frames(count: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..count {
        data.extend([0xFF, 0xFB, 0x90, 0x00]);
        data.extend(vec![0u8; 413]);
    }
    data
}

fn write(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, bytes).expect("write");
}

#[test]
fn scan_directory_and_write_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    // A synthesized reply with an ID3v2 tag up front and ID3v1 at the end
    let mut tagged = b"ID3\x03\x00\x00\x00\x00\x02\x00".to_vec();
    tagged.extend(vec![0u8; 256]);
    tagged.extend(mp3_frames(10));
    tagged.extend(b"TAG");
    tagged.extend(vec![b' '; 125]);

    write(&root.join("audio/reply.mp3"), &tagged);
    write(&root.join("audio/chunks/part1.mp3"), &mp3_frames(100));
    write(&root.join("audio/broken.mp3"), &[0x42; 500]);
    write(&root.join("audio/readme.txt"), b"ignored by the extension filter");
    write(
        &root.join("mp3dur.toml"),
        b"log_level = \"debug\"\nreport = \"reports/durations.json\"\n",
    );

    let config = Config::discover(None, root).expect("config");
    assert_eq!(config.log_level, "debug");

    let files = walk::collect_files(&[root.join("audio")], &config);
    assert_eq!(files.len(), 3);

    let results = Prober::new().probe_all(&files);
    let by_name = |name: &str| {
        results
            .iter()
            .find(|r| r.file_name == name)
            .unwrap_or_else(|| panic!("{name} was probed"))
    };

    assert_eq!(by_name("reply.mp3").duration_ms, Some(261));
    assert_eq!(by_name("part1.mp3").duration_ms, Some(2612));
    assert_eq!(by_name("broken.mp3").status, Status::Unknown);

    let report_path = root.join(config.report.as_deref().expect("report path"));
    report::generate(&report_path, &results).expect("report");

    let text = std::fs::read_to_string(&report_path).expect("read report");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["summary"]["total"], 3);
    assert_eq!(value["summary"]["measured"], 2);
    assert_eq!(value["summary"]["unknown"], 1);
    assert_eq!(value["summary"]["total_duration_ms"], 261 + 2612);
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    let err = Config::discover(Some(&missing), dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}

#[test]
fn missing_implicit_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::discover(None, dir.path()).expect("defaults");
    assert_eq!(config, Config::default());
}
