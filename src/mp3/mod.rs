pub mod duration;
pub mod frame;
pub mod tag;

pub use duration::{estimate_duration_ms, scan_stream, StreamScan};
pub use frame::{ChannelMode, FrameHeader, Layer, MpegVersion};
