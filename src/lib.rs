//! Playback duration for synthesized speech audio.
//!
//! The core is [`mp3::estimate_duration_ms`], which walks MPEG frame headers
//! in an MP3 buffer and sums their samples without decoding any audio.
//! [`audio::AudioMetadata`] wraps it in the shape a speech-synthesis response
//! carries, running the estimator only for MP3 payloads.

pub mod audio;
pub mod config;
pub mod mp3;
pub mod probe;
pub mod report;

pub use audio::{AudioFormat, AudioMetadata};
pub use mp3::estimate_duration_ms;
