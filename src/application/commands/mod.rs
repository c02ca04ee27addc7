//! 应用层 - 命令（写操作）

mod synthesize_commands;

pub mod handlers;

pub use synthesize_commands::*;
