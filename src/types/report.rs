// src/types/report.rs
//! Serializable report payloads handed to the renderers.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::aggregator::{KeywordCount, PairCount};
use crate::core::dataset::LoadStats;
use crate::core::filter::JobFilter;

// ===== Shared Entries =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSummary {
    pub first: NaiveDate,
    pub last: NaiveDate,
    /// Postings per day, ascending by date.
    pub per_day: Vec<(NaiveDate, usize)>,
}

/// Summary statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityChecks {
    pub duplicate_rows: usize,
    pub empty_descriptions: usize,
    pub empty_keywords: usize,
    pub valid_urls: usize,
}

/// First posting of the file, for eyeballing the raw data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePosting {
    pub company: String,
    pub category: String,
    pub location: String,
    pub date_posted: String,
    pub keywords: String,
    /// First 500 characters of the description.
    pub description_preview: String,
}

// ===== Overview Report =====

#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    pub source: Option<String>,
    pub rows: usize,
    pub columns: Vec<String>,
    pub load: LoadStats,
    pub dates: Option<DateSummary>,
    pub unique_companies: usize,
    pub top_companies: Vec<ValueCount>,
    pub unique_categories: usize,
    pub categories: Vec<ValueCount>,
    pub unique_locations: usize,
    pub top_locations: Vec<ValueCount>,
    pub total_keywords: usize,
    pub top_keywords: Vec<KeywordCount>,
    pub description_length: Option<Describe>,
    pub description_mentions: Vec<MentionCount>,
    pub salary_mentions: usize,
    pub quality: QualityChecks,
    pub remote_indicator_jobs: usize,
    pub remote_indicator_pct: f64,
    /// Raw keyword cells of the first postings that have one.
    pub sample_keywords: Vec<String>,
    pub sample_posting: Option<SamplePosting>,
}

// ===== Dashboard Report =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_jobs: usize,
    pub companies: usize,
    pub unique_skills: usize,
    pub remote_pct: f64,
    pub salary_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HottestSkill {
    pub keyword: String,
    pub count: usize,
    pub pct_of_jobs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub hottest_skill: Option<HottestSkill>,
    pub remote_jobs: usize,
    pub remote_pct: f64,
    pub top_employer: Option<ValueCount>,
    pub salary_jobs: usize,
    pub salary_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub company: String,
    pub category: String,
    pub location: String,
    pub remote: bool,
    pub salary_info: bool,
    pub date_posted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub filter: JobFilter,
    pub metrics: DashboardMetrics,
    pub top_skills: Vec<KeywordCount>,
    pub top_pairs: Vec<PairCount>,
    pub remote_split: RemoteSplit,
    pub top_companies: Vec<ValueCount>,
    pub categories: Vec<ValueCount>,
    pub top_onsite_locations: Vec<ValueCount>,
    pub insights: Insights,
    pub listings: Vec<ListingRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteSplit {
    pub onsite: usize,
    pub remote: usize,
}

// ===== Keyword Reports =====

#[derive(Debug, Clone, Serialize)]
pub struct SkillsReport {
    pub filter: JobFilter,
    pub jobs: usize,
    pub unique_skills: usize,
    pub skills: Vec<KeywordCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairsReport {
    pub filter: JobFilter,
    pub jobs: usize,
    pub pairs: Vec<PairCount>,
}
