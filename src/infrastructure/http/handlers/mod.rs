//! HTTP Handlers

mod audio;
mod ping;
mod project;
mod stream;
mod synthesize;

pub use audio::*;
pub use ping::*;
pub use project::*;
pub use stream::*;
pub use synthesize::*;
