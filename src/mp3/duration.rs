//! Playback duration of an MP3 elementary stream, from frame headers alone
//!
//! Walks the buffer once: skip ID3 blocks, find the next sync, decode the
//! header, add its samples and jump a whole frame. Anything that fails to
//! decode costs exactly one byte, so corrupted regions are stepped over until
//! the next real frame lines up again.

use super::frame::{self, FrameHeader, HEADER_LEN};
use super::tag;

/// Buffers shorter than one frame header are never scanned.
pub const MIN_STREAM_LEN: usize = HEADER_LEN;

/// What one pass over a buffer found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamScan {
    pub frame_count: usize,
    pub total_samples: u64,
    /// Duration is measured against this frame's sample rate
    pub first_frame: Option<FrameHeader>,
    /// Bytes consumed by ID3v2 and ID3v1 blocks
    pub tag_bytes: usize,
    /// Bytes stepped over while looking for a frame
    pub skipped_bytes: usize,
    pub min_bitrate: u32,
    pub max_bitrate: u32,
}

impl StreamScan {
    fn record(&mut self, header: &FrameHeader) {
        if self.first_frame.is_none() {
            self.first_frame = Some(*header);
            self.min_bitrate = header.bitrate;
            self.max_bitrate = header.bitrate;
        }
        self.frame_count += 1;
        self.total_samples += u64::from(header.samples_per_frame);
        self.min_bitrate = self.min_bitrate.min(header.bitrate);
        self.max_bitrate = self.max_bitrate.max(header.bitrate);
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.first_frame.map(|h| h.sample_rate)
    }

    /// Bitrate changed between frames.
    pub fn is_vbr(&self) -> bool {
        self.min_bitrate != self.max_bitrate
    }

    /// Rounded milliseconds, or `None` if no frame was decoded.
    pub fn duration_ms(&self) -> Option<u64> {
        let rate = u64::from(self.sample_rate()?);
        Some((self.total_samples * 1000 + rate / 2) / rate)
    }
}

/// Next offset at or after `from` that is either a frame sync or the start of
/// an ID3v1 block, whichever comes first.
pub fn next_candidate(data: &[u8], from: usize) -> Option<usize> {
    let sync = frame::find_sync(data, from);
    // A "TAG" can't overlap the 0xFF that opens a sync, so searching up to
    // the sync is enough.
    let end = sync.unwrap_or(data.len());
    tag::find_id3v1(data, from, end).or(sync)
}

/// Scan `data` frame by frame. Never panics; garbage just yields an empty scan.
pub fn scan_stream(data: &[u8]) -> StreamScan {
    let mut scan = StreamScan::default();
    if data.len() < MIN_STREAM_LEN {
        return scan;
    }

    let mut cursor = 0;
    while cursor < data.len() {
        // Metadata always wins over sync at the same offset
        let after_tag = tag::skip_metadata(data, cursor);
        if after_tag > cursor {
            scan.tag_bytes += after_tag - cursor;
            cursor = after_tag;
            continue;
        }

        let Some(candidate) = next_candidate(data, cursor) else {
            scan.skipped_bytes += data.len() - cursor;
            break;
        };
        scan.skipped_bytes += candidate - cursor;
        cursor = candidate;

        if tag::is_id3v1_at(data, cursor) {
            continue;
        }

        match FrameHeader::read_at(data, cursor) {
            Some(header) => {
                scan.record(&header);
                cursor += header.frame_size;
            }
            None => {
                scan.skipped_bytes += 1;
                cursor += 1;
            }
        }
    }

    scan
}

/// Playback duration of an MP3 buffer in milliseconds.
///
/// `None` when the buffer is too short or holds no decodable frame.
pub fn estimate_duration_ms(data: &[u8]) -> Option<u64> {
    scan_stream(data).duration_ms()
}
