//! 核心数据模型模块
//!
//! 定义入站请求、搜索查询文档和搜索结果的数据结构。

pub mod hit;
pub mod inbound;
pub mod query;

pub use hit::*;
pub use inbound::*;
pub use query::*;
