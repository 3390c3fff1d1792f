//! Audio payload metadata attached to a synthesis response

use crate::mp3::{self, StreamScan};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output encodings a speech provider can hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Opus,
    Aac,
    Flac,
    Pcm,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported audio format: {0}")]
    Unsupported(String),
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Opus,
        AudioFormat::Aac,
        AudioFormat::Flac,
        AudioFormat::Pcm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Opus => "opus",
            AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Pcm => "pcm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Opus => "audio/ogg",
            AudioFormat::Aac => "audio/aac",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Pcm => "audio/pcm",
        }
    }

    /// Guess the format from a file extension, case-insensitive, no dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" | "mpga" => Some(AudioFormat::Mp3),
            "wav" | "wave" => Some(AudioFormat::Wav),
            "opus" | "ogg" | "oga" => Some(AudioFormat::Opus),
            "aac" | "m4a" => Some(AudioFormat::Aac),
            "flac" => Some(AudioFormat::Flac),
            "pcm" | "raw" => Some(AudioFormat::Pcm),
            _ => None,
        }
    }

    /// Map a `Content-Type` value, parameters ignored.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "audio/mpeg" | "audio/mp3" | "audio/mpeg3" => Some(AudioFormat::Mp3),
            "audio/wav" | "audio/wave" | "audio/x-wav" => Some(AudioFormat::Wav),
            "audio/ogg" | "audio/opus" => Some(AudioFormat::Opus),
            "audio/aac" | "audio/mp4" => Some(AudioFormat::Aac),
            "audio/flac" | "audio/x-flac" => Some(AudioFormat::Flac),
            "audio/pcm" | "audio/l16" => Some(AudioFormat::Pcm),
            _ => None,
        }
    }

    /// Only MP3 can be measured from its bytes here.
    pub fn supports_duration(&self) -> bool {
        matches!(self, AudioFormat::Mp3)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        AudioFormat::from_extension(name)
            .or_else(|| AudioFormat::from_mime(name))
            .ok_or_else(|| FormatError::Unsupported(name.to_owned()))
    }
}

/// Metadata about a synthesized audio payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub format: AudioFormat,
    pub size_bytes: usize,
    /// Left unset for formats that can't be measured, or MP3 with no frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl AudioMetadata {
    /// Describe a finished payload. The MP3 estimator only runs for MP3.
    pub fn describe(format: AudioFormat, audio: &[u8]) -> Self {
        Self::inspect(format, audio).0
    }

    /// Like [`describe`](Self::describe), also handing back the frame scan
    /// when one was run.
    pub fn inspect(format: AudioFormat, audio: &[u8]) -> (Self, Option<StreamScan>) {
        let scan = format.supports_duration().then(|| mp3::scan_stream(audio));
        let meta = Self {
            format,
            size_bytes: audio.len(),
            duration_ms: scan.as_ref().and_then(StreamScan::duration_ms),
        };
        (meta, scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp3_frames(count: usize) -> Vec<u8> {
        let mut data = Vec::new();
        for _ in 0..count {
            data.extend([0xFF, 0xFB, 0x90, 0x00]);
            data.extend(vec![0u8; 413]);
        }
        data
    }

    #[test]
    fn test_describe_mp3() {
        let audio = mp3_frames(10);
        let meta = AudioMetadata::describe(AudioFormat::Mp3, &audio);
        assert_eq!(meta.size_bytes, 4170);
        assert_eq!(meta.duration_ms, Some(261));
    }

    #[test]
    fn test_describe_leaves_other_formats_unset() {
        // Same bytes, but the caller says WAV: no estimate is attempted
        let audio = mp3_frames(10);
        for format in AudioFormat::ALL {
            let meta = AudioMetadata::describe(format, &audio);
            assert_eq!(meta.duration_ms.is_some(), format == AudioFormat::Mp3, "{format}");
        }
    }

    #[test]
    fn test_inspect_returns_scan_for_mp3_only() {
        let audio = mp3_frames(3);
        let (meta, scan) = AudioMetadata::inspect(AudioFormat::Mp3, &audio);
        let scan = scan.expect("mp3 is scanned");
        assert_eq!(scan.frame_count, 3);
        assert_eq!(meta.duration_ms, scan.duration_ms());

        let (meta, scan) = AudioMetadata::inspect(AudioFormat::Flac, &audio);
        assert!(scan.is_none());
        assert_eq!(meta.duration_ms, None);
    }

    #[test]
    fn test_describe_unreadable_mp3() {
        let meta = AudioMetadata::describe(AudioFormat::Mp3, b"not audio at all");
        assert_eq!(meta.duration_ms, None);
        assert_eq!(meta.size_bytes, 16);
    }

    #[test]
    fn test_metadata_json_shape() {
        let meta = AudioMetadata::describe(AudioFormat::Mp3, &mp3_frames(1));
        let json = serde_json::to_value(&meta).expect("serialize");
        assert_eq!(json["format"], "mp3");
        assert_eq!(json["duration_ms"], 26);

        let meta = AudioMetadata::describe(AudioFormat::Opus, &[0u8; 8]);
        let json = serde_json::to_value(&meta).expect("serialize");
        assert!(json.get("duration_ms").is_none());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_extension("ogg"), Some(AudioFormat::Opus));
        assert_eq!(AudioFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_format_from_mime() {
        assert_eq!(AudioFormat::from_mime("audio/mpeg"), Some(AudioFormat::Mp3));
        assert_eq!(
            AudioFormat::from_mime("Audio/L16; rate=24000"),
            Some(AudioFormat::Pcm)
        );
        assert_eq!(AudioFormat::from_mime("application/json"), None);
        for format in AudioFormat::ALL {
            assert_eq!(AudioFormat::from_mime(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("flac".parse::<AudioFormat>(), Ok(AudioFormat::Flac));
        assert_eq!(" audio/wav ".parse::<AudioFormat>(), Ok(AudioFormat::Wav));
        assert_eq!(
            "midi".parse::<AudioFormat>(),
            Err(FormatError::Unsupported("midi".to_string()))
        );
    }
}
