//! Transcoder Adapters

mod passthrough;

pub use passthrough::PassthroughTranscoder;
