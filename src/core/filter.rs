// src/core/filter.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::dataset::Dataset;
use crate::types::record::JobRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    #[default]
    All,
    #[value(name = "remote")]
    RemoteOnly,
    #[value(name = "onsite")]
    OnsiteOnly,
}

impl WorkType {
    pub fn matches(self, record: &JobRecord) -> bool {
        match self {
            WorkType::All => true,
            WorkType::RemoteOnly => record.is_remote,
            WorkType::OnsiteOnly => !record.is_remote,
        }
    }
}

/// Category and work-type selection over a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobFilter {
    /// `None` selects every category.
    pub category: Option<String>,
    pub work_type: WorkType,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        // "All" is the dashboard's catch-all choice
        self.category = category.filter(|c| !c.eq_ignore_ascii_case("all"));
        self
    }

    pub fn with_work_type(mut self, work_type: WorkType) -> Self {
        self.work_type = work_type;
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.work_type == WorkType::All
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        let category_ok = match &self.category {
            Some(wanted) => record.category_name() == Some(wanted.as_str()),
            None => true,
        };
        category_ok && self.work_type.matches(record)
    }

    /// Records passing the filter, in dataset order. The dataset is untouched.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a JobRecord> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }
}
