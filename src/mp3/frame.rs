//! MPEG audio frame header decoding
//!
//! Every frame of an MP3 elementary stream starts with a sync word (11 bits
//! of 1s) followed by the fields that say how long the frame is.
//! Frame header structure (4 bytes):
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//!
//! A = sync (11 bits)
//! B = MPEG version (2 bits): 00=2.5, 01=reserved, 10=2, 11=1
//! C = Layer (2 bits): 00=reserved, 01=III, 10=II, 11=I
//! D = Protection bit (0 = CRC follows the header)
//! E = Bitrate index (4 bits)
//! F = Sample rate index (2 bits)
//! G = Padding bit
//! H = Private bit
//! I = Channel mode (2 bits)
//! J = Mode extension (2 bits)
//! K = Copyright
//! L = Original
//! M = Emphasis (2 bits)

use std::fmt;

/// Length of a frame header in bytes.
pub const HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

impl fmt::Display for MpegVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpegVersion::Mpeg1 => write!(f, "MPEG-1"),
            MpegVersion::Mpeg2 => write!(f, "MPEG-2"),
            MpegVersion::Mpeg25 => write!(f, "MPEG-2.5"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Layer1,
    Layer2,
    Layer3,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Layer1 => write!(f, "Layer I"),
            Layer::Layer2 => write!(f, "Layer II"),
            Layer::Layer3 => write!(f, "Layer III"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

/// A decoded frame header plus the sizes derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    /// A 16-bit CRC follows the header
    pub protected: bool,
    /// Bits per second
    pub bitrate: u32,
    /// Hz
    pub sample_rate: u32,
    pub padding: bool,
    pub channel_mode: ChannelMode,
    /// Whole frame in bytes, header included
    pub frame_size: usize,
    pub samples_per_frame: u32,
}

// Bitrate lookup tables (kbps)
// Index 0 = free format, 15 = bad. Both decode as 0 and are rejected.
const BITRATES_V1_L1: [u32; 16] = [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0];
const BITRATES_V1_L2: [u32; 16] = [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0];
const BITRATES_V1_L3: [u32; 16] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0];
const BITRATES_V2_L1: [u32; 16] = [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0];
// MPEG-2 and 2.5 share one table for Layers II and III
const BITRATES_V2_L23: [u32; 16] = [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0];

// Sample rate lookup tables (Hz), index 3 is reserved
const SAMPLE_RATES_V1: [u32; 4] = [44100, 48000, 32000, 0];
const SAMPLE_RATES_V2: [u32; 4] = [22050, 24000, 16000, 0];
const SAMPLE_RATES_V25: [u32; 4] = [11025, 12000, 8000, 0];

fn bitrate_kbps(version: MpegVersion, layer: Layer, index: usize) -> u32 {
    let table = match (version, layer) {
        (MpegVersion::Mpeg1, Layer::Layer1) => &BITRATES_V1_L1,
        (MpegVersion::Mpeg1, Layer::Layer2) => &BITRATES_V1_L2,
        (MpegVersion::Mpeg1, Layer::Layer3) => &BITRATES_V1_L3,
        (_, Layer::Layer1) => &BITRATES_V2_L1,
        _ => &BITRATES_V2_L23,
    };
    table[index & 0x0F]
}

fn sample_rate_hz(version: MpegVersion, index: usize) -> u32 {
    let table = match version {
        MpegVersion::Mpeg1 => &SAMPLE_RATES_V1,
        MpegVersion::Mpeg2 => &SAMPLE_RATES_V2,
        MpegVersion::Mpeg25 => &SAMPLE_RATES_V25,
    };
    table[index & 0x03]
}

fn samples_per_frame(version: MpegVersion, layer: Layer) -> u32 {
    match (version, layer) {
        (_, Layer::Layer1) => 384,
        (_, Layer::Layer2) => 1152,
        (MpegVersion::Mpeg1, Layer::Layer3) => 1152,
        (_, Layer::Layer3) => 576,
    }
}

impl FrameHeader {
    /// Decode a 4-byte frame header.
    ///
    /// Returns `None` for a missing sync word or any reserved field value.
    pub fn parse(header: [u8; HEADER_LEN]) -> Option<Self> {
        if !is_sync(header[0], header[1]) {
            return None;
        }

        // MPEG version (bits 4-3 of byte 1)
        let version = match (header[1] >> 3) & 0x03 {
            0 => MpegVersion::Mpeg25,
            2 => MpegVersion::Mpeg2,
            3 => MpegVersion::Mpeg1,
            _ => return None,
        };

        // Layer (bits 2-1 of byte 1)
        let layer = match (header[1] >> 1) & 0x03 {
            1 => Layer::Layer3,
            2 => Layer::Layer2,
            3 => Layer::Layer1,
            _ => return None,
        };

        let protected = header[1] & 0x01 == 0;

        // Bitrate index (bits 7-4 of byte 2)
        let bitrate = bitrate_kbps(version, layer, (header[2] >> 4) as usize) * 1000;
        if bitrate == 0 {
            return None;
        }

        // Sample rate index (bits 3-2 of byte 2)
        let sample_rate = sample_rate_hz(version, ((header[2] >> 2) & 0x03) as usize);
        if sample_rate == 0 {
            return None;
        }

        let padding = header[2] & 0x02 != 0;

        let channel_mode = match header[3] >> 6 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };

        let samples_per_frame = samples_per_frame(version, layer);

        // Layer I counts in 4-byte slots, Layers II and III in single bytes
        let pad = u32::from(padding);
        let frame_bytes = match layer {
            Layer::Layer1 => (12 * bitrate / sample_rate + pad) * 4,
            _ => (samples_per_frame / 8) * bitrate / sample_rate + pad,
        };
        let frame_size = frame_bytes as usize;

        // A frame can't be shorter than its own header
        if frame_size < HEADER_LEN {
            return None;
        }

        Some(FrameHeader {
            version,
            layer,
            protected,
            bitrate,
            sample_rate,
            padding,
            channel_mode,
            frame_size,
            samples_per_frame,
        })
    }

    /// Decode the header starting at `offset`, if 4 bytes are available there.
    pub fn read_at(data: &[u8], offset: usize) -> Option<Self> {
        let end = offset.checked_add(HEADER_LEN)?;
        let bytes: [u8; HEADER_LEN] = data.get(offset..end)?.try_into().ok()?;
        Self::parse(bytes)
    }
}

/// True when the two bytes carry the 11-bit frame sync.
#[inline]
pub fn is_sync(first: u8, second: u8) -> bool {
    first == 0xFF && (second & 0xE0) == 0xE0
}

/// Offset of the next sync pattern at or after `from`.
pub fn find_sync(data: &[u8], from: usize) -> Option<usize> {
    data.get(from..)?
        .windows(2)
        .position(|pair| is_sync(pair[0], pair[1]))
        .map(|i| from + i)
}
