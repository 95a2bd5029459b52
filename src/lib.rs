// src/lib.rs
//! Job postings analytics: loads a CSV of postings, derives per-record
//! features and aggregates keyword, company and location statistics.

pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod logging;
pub mod report;
pub mod types;
pub mod utils;

pub use crate::config::AnalysisConfig;
pub use crate::core::aggregator::{
    keyword_frequencies, keyword_pair_frequencies, top_keyword_pairs, top_keywords, CountTable,
    KeywordSource,
};
pub use crate::core::dataset::Dataset;
pub use crate::core::filter::{JobFilter, WorkType};
pub use crate::types::record::JobRecord;
