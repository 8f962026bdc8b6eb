//! 服务模块

pub mod search;
pub mod term_extractor;

pub use search::{SearchService, SearchServiceImpl, create_search_service};
pub use term_extractor::extract_search_term;
