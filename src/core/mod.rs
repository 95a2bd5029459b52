// src/core/mod.rs
//! Loading, filtering and aggregation over job postings

pub mod aggregator;
pub mod dataset;
pub mod filter;
pub mod insights;
pub mod stats;

pub use aggregator::CountTable;
pub use dataset::Dataset;
pub use filter::{JobFilter, WorkType};
