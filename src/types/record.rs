// src/types/record.rs
//! Job posting rows as read from the CSV and their normalized form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils;

/// Column names of the postings file, in file order.
pub const COLUMNS: [&str; 7] = [
    "company",
    "category",
    "location",
    "date_posted",
    "keywords",
    "job_description",
    "post_link",
];

// ===== Raw CSV Row =====

/// One CSV row before normalization. Empty cells and missing columns are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct RawJobRow {
    pub company: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<String>,
    pub keywords: Option<String>,
    pub job_description: Option<String>,
    pub post_link: Option<String>,
}

impl RawJobRow {
    /// Column values paired with their names, for missing-value accounting.
    pub fn cells(&self) -> [(&'static str, Option<&str>); 7] {
        [
            (COLUMNS[0], self.company.as_deref()),
            (COLUMNS[1], self.category.as_deref()),
            (COLUMNS[2], self.location.as_deref()),
            (COLUMNS[3], self.date_posted.as_deref()),
            (COLUMNS[4], self.keywords.as_deref()),
            (COLUMNS[5], self.job_description.as_deref()),
            (COLUMNS[6], self.post_link.as_deref()),
        ]
    }
}

// ===== Normalized Record =====

/// A job posting with its derived attributes. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub company: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<NaiveDate>,
    pub raw_keywords: Option<String>,
    pub job_description: Option<String>,
    pub post_link: Option<String>,
    /// Lowercase, trimmed, non-empty tokens in file order.
    pub keyword_list: Vec<String>,
    pub is_remote: bool,
    pub has_salary: bool,
}

impl JobRecord {
    /// Normalize a raw row. Returns the record and whether a present date
    /// failed to parse.
    pub fn from_raw(raw: RawJobRow) -> (Self, bool) {
        let RawJobRow {
            company,
            category,
            location,
            date_posted,
            keywords,
            job_description,
            post_link,
        } = raw;

        let parsed_date = date_posted.as_deref().and_then(utils::parse_posted_date);
        let unparsed_date = date_posted.is_some() && parsed_date.is_none();

        let keyword_list = keywords
            .as_deref()
            .map(utils::split_keywords)
            .unwrap_or_default();
        let is_remote = location.as_deref().map(utils::is_remote_location).unwrap_or(false);
        let has_salary = job_description
            .as_deref()
            .map(utils::mentions_salary)
            .unwrap_or(false);

        let record = Self {
            company: utils::non_blank(company),
            category: utils::non_blank(category),
            location: utils::non_blank(location),
            date_posted: parsed_date,
            raw_keywords: keywords,
            job_description,
            post_link,
            keyword_list,
            is_remote,
            has_salary,
        };

        (record, unparsed_date)
    }

    /// Test and builder helper: a record holding only a keyword list.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            company: None,
            category: None,
            location: None,
            date_posted: None,
            raw_keywords: None,
            job_description: None,
            post_link: None,
            keyword_list: keywords.into_iter().map(Into::into).collect(),
            is_remote: false,
            has_salary: false,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// `YYYY-MM-DD`, or `N/A` when the date is absent.
    pub fn date_label(&self) -> String {
        self.date_posted
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}
