//! 应用层 - 查询（读操作）

mod project_queries;

pub mod handlers;

pub use project_queries::*;
