//! Command Handlers

mod synthesize_handlers;

pub use synthesize_handlers::{SynthesizeHandler, SynthesizeResult};
