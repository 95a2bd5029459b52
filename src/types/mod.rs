// src/types/mod.rs
pub mod record;
pub mod report;

pub use record::{JobRecord, RawJobRow};
