//! Fixed data sets served by the directory endpoints / 固定数据集
//!
//! Each submodule owns its typed records, a lazily built `Directory`, a query
//! struct deserializable from URL parameters, and a `search` entry point.

pub mod cities;
pub mod communities;
pub mod jobs;
pub mod languages;
pub mod universities;

pub use cities::{City, CityQuery};
pub use communities::{Community, CommunityQuery};
pub use jobs::{Job, JobQuery};
pub use languages::{Language, LanguageQuery};
pub use universities::{University, UniversityQuery};

/// Borrow the free-text part of a query / 取查询关键词
pub(crate) fn search_text(search: &Option<String>) -> &str {
    search.as_deref().unwrap_or("")
}
