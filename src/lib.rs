//! Docsearch - 托管 OpenSearch 的全文检索适配服务
//!
//! 从 HTTP 请求中提取搜索词，构造固定结构的 multi_match 查询，
//! 通过 SigV4 签名的 HTTPS 请求提交到搜索域，并将命中结果扁平化为精简的 JSON。

pub mod api;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod observability;
pub mod services;
