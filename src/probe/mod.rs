pub mod walk;

use crate::audio::{AudioFormat, AudioMetadata};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Outcome of probing one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_path: String,
    pub file_name: String,
    pub status: Status,
    pub format: Option<AudioFormat>,
    pub size_bytes: usize,
    pub duration_ms: Option<u64>,
    pub frames: usize,
    pub sample_rate: Option<u32>,
    pub bitrate_kbps: Option<u32>,
    pub is_vbr: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Duration was computed
    Measured,
    /// MP3, but not a single frame decoded
    Unknown,
    /// Not a format this tool measures
    Unsupported,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so table columns can set a width
        f.pad(match self {
            Status::Measured => "MEASURED",
            Status::Unknown => "UNKNOWN",
            Status::Unsupported => "UNSUPPORTED",
            Status::Error => "ERROR",
        })
    }
}

impl FileReport {
    fn empty(file_path: String, file_name: String, status: Status) -> Self {
        Self {
            file_path,
            file_name,
            status,
            format: None,
            size_bytes: 0,
            duration_ms: None,
            frames: 0,
            sample_rate: None,
            bitrate_kbps: None,
            is_vbr: false,
            error: None,
        }
    }
}

/// Reads files and describes them the way a synthesis response would.
#[derive(Debug, Clone, Default)]
pub struct Prober {
    /// Use this format for every file instead of guessing from the extension
    pub format_override: Option<AudioFormat>,
}

impl Prober {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: Option<AudioFormat>) -> Self {
        self.format_override = format;
        self
    }

    /// Probe a single file. Failures end up in the report, never as an `Err`.
    pub fn probe<P: AsRef<Path>>(&self, path: P) -> FileReport {
        let path = path.as_ref();
        let file_path = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.clone());

        let data = match std::fs::read(path) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(path = %file_path, error = %e, "failed to read file");
                let mut report = FileReport::empty(file_path, file_name, Status::Error);
                report.error = Some(format!("Failed to read file: {e}"));
                return report;
            }
        };

        let format = self.format_override.or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(AudioFormat::from_extension)
        });

        match format {
            Some(format) => self.describe(file_path, file_name, format, &data),
            None => {
                tracing::debug!(path = %file_path, "no audio format for extension");
                let mut report = FileReport::empty(file_path, file_name, Status::Unsupported);
                report.size_bytes = data.len();
                report
            }
        }
    }

    fn describe(
        &self,
        file_path: String,
        file_name: String,
        format: AudioFormat,
        data: &[u8],
    ) -> FileReport {
        let (meta, scan) = AudioMetadata::inspect(format, data);

        let status = match (&scan, meta.duration_ms) {
            (None, _) => Status::Unsupported,
            (Some(_), Some(_)) => Status::Measured,
            (Some(_), None) => Status::Unknown,
        };

        let mut report = FileReport::empty(file_path, file_name, status);
        report.format = Some(meta.format);
        report.size_bytes = meta.size_bytes;
        report.duration_ms = meta.duration_ms;

        if let Some(scan) = scan {
            report.frames = scan.frame_count;
            report.sample_rate = scan.sample_rate();
            report.bitrate_kbps = scan.first_frame.map(|h| h.bitrate / 1000);
            report.is_vbr = scan.is_vbr();

            if status == Status::Unknown {
                tracing::warn!(
                    path = %report.file_path,
                    size_bytes = report.size_bytes,
                    "no MPEG frames found, duration unknown"
                );
            } else {
                tracing::debug!(
                    path = %report.file_path,
                    frames = scan.frame_count,
                    duration_ms = ?report.duration_ms,
                    tag_bytes = scan.tag_bytes,
                    skipped_bytes = scan.skipped_bytes,
                    "measured"
                );
            }
        }

        report
    }

    pub fn probe_all<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<FileReport> {
        paths.iter().map(|p| self.probe(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mp3_frames(count: usize) -> Vec<u8> {
        let mut data = Vec::new();
        for _ in 0..count {
            data.extend([0xFF, 0xFB, 0x90, 0x00]);
            data.extend(vec![0u8; 413]);
        }
        data
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(bytes).expect("write");
        path
    }

    #[test]
    fn test_probe_mp3_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_temp(&dir, "hello.mp3", &mp3_frames(100));

        let report = Prober::new().probe(&path);
        assert_eq!(report.status, Status::Measured);
        assert_eq!(report.file_name, "hello.mp3");
        assert_eq!(report.format, Some(AudioFormat::Mp3));
        assert_eq!(report.duration_ms, Some(2612));
        assert_eq!(report.frames, 100);
        assert_eq!(report.sample_rate, Some(44100));
        assert_eq!(report.bitrate_kbps, Some(128));
        assert!(!report.is_vbr);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_probe_mp3_without_frames() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_temp(&dir, "silence.mp3", &[0x55; 500]);

        let report = Prober::new().probe(&path);
        assert_eq!(report.status, Status::Unknown);
        assert_eq!(report.duration_ms, None);
        assert_eq!(report.size_bytes, 500);
    }

    #[test]
    fn test_probe_other_formats_are_not_measured() {
        let dir = tempfile::tempdir().expect("tempdir");
        // MP3 bytes behind a .wav name: the caller's format decides
        let path = write_temp(&dir, "speech.wav", &mp3_frames(3));
        let report = Prober::new().probe(&path);
        assert_eq!(report.status, Status::Unsupported);
        assert_eq!(report.format, Some(AudioFormat::Wav));
        assert_eq!(report.duration_ms, None);

        let path = write_temp(&dir, "notes.txt", b"hello");
        let report = Prober::new().probe(&path);
        assert_eq!(report.status, Status::Unsupported);
        assert_eq!(report.format, None);
        assert_eq!(report.size_bytes, 5);
    }

    #[test]
    fn test_probe_format_override() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_temp(&dir, "chunk.bin", &mp3_frames(10));
        let report = Prober::new().with_format(Some(AudioFormat::Mp3)).probe(&path);
        assert_eq!(report.status, Status::Measured);
        assert_eq!(report.duration_ms, Some(261));
    }

    #[test]
    fn test_probe_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = Prober::new().probe(dir.path().join("gone.mp3"));
        assert_eq!(report.status, Status::Error);
        assert!(report
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Failed to read file")));
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&Status::Measured).expect("serialize");
        assert_eq!(json, "\"MEASURED\"");
        assert_eq!(Status::Unsupported.to_string(), "UNSUPPORTED");
    }
}
