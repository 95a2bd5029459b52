// src/core/stats.rs
//! Exploratory statistics over the whole dataset.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::config::AnalysisConfig;
use crate::core::aggregator::{self, CountTable};
use crate::core::dataset::Dataset;
use crate::types::record::{JobRecord, COLUMNS};
use crate::types::report::{
    DateSummary, Describe, MentionCount, OverviewReport, QualityChecks, SamplePosting,
    ValueCount,
};
use crate::utils;

/// Count the present values of a text column.
pub fn value_counts<'a, I>(values: I) -> CountTable<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values.into_iter().flatten().collect()
}

/// The `n` most common values, count descending.
pub fn top_values(table: &CountTable<&str>, n: NonZeroUsize) -> Vec<ValueCount> {
    table
        .top(n)
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Every value, count descending.
pub fn all_values(table: &CountTable<&str>) -> Vec<ValueCount> {
    table
        .sorted_desc()
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

pub fn date_summary(records: &[JobRecord]) -> Option<DateSummary> {
    let mut per_day: BTreeMap<_, usize> = BTreeMap::new();
    for date in records.iter().filter_map(|r| r.date_posted) {
        *per_day.entry(date).or_insert(0) += 1;
    }

    let first = *per_day.keys().next()?;
    let last = *per_day.keys().next_back()?;
    Some(DateSummary {
        first,
        last,
        per_day: per_day.into_iter().collect(),
    })
}

/// Count, mean, sample std, min, quartiles and max. Quartiles interpolate
/// linearly between closest ranks.
pub fn describe(values: &[f64]) -> Option<Describe> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    });

    Some(Describe {
        count,
        mean,
        std,
        min: sorted[0],
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Descriptions mentioning each term, case-insensitively.
pub fn description_mentions(records: &[JobRecord], terms: &[String]) -> Vec<MentionCount> {
    terms
        .iter()
        .map(|term| MentionCount {
            term: term.clone(),
            count: records
                .iter()
                .filter_map(|r| r.job_description.as_deref())
                .filter(|d| utils::contains_ignore_case(d, term))
                .count(),
        })
        .collect()
}

pub fn quality_checks(dataset: &Dataset) -> QualityChecks {
    let records = dataset.records();
    QualityChecks {
        duplicate_rows: dataset.stats().duplicate_rows,
        empty_descriptions: records
            .iter()
            .filter(|r| r.job_description.as_deref().map_or(true, |d| d.trim().is_empty()))
            .count(),
        empty_keywords: records.iter().filter(|r| r.raw_keywords.is_none()).count(),
        valid_urls: records
            .iter()
            .filter(|r| r.post_link.as_deref().is_some_and(|l| l.starts_with("http")))
            .count(),
    }
}

const SAMPLE_KEYWORD_CELLS: usize = 10;
const DESCRIPTION_PREVIEW_CHARS: usize = 500;

pub fn sample_posting(record: &JobRecord) -> SamplePosting {
    SamplePosting {
        company: record.company_name().unwrap_or_default().to_string(),
        category: record.category_name().unwrap_or_default().to_string(),
        location: record.location_name().unwrap_or_default().to_string(),
        date_posted: record.date_label(),
        keywords: record.raw_keywords.clone().unwrap_or_default(),
        description_preview: utils::truncate_chars(
            record.job_description.as_deref().unwrap_or_default(),
            DESCRIPTION_PREVIEW_CHARS,
        ),
    }
}

/// Build the exploratory overview of the full dataset.
pub fn overview(dataset: &Dataset, config: &AnalysisConfig) -> OverviewReport {
    let records = dataset.records();

    let companies = value_counts(records.iter().map(JobRecord::company_name));
    let categories = value_counts(records.iter().map(JobRecord::category_name));
    let locations = value_counts(records.iter().map(JobRecord::location_name));
    let keywords = aggregator::keyword_frequencies(records);

    let lengths: Vec<f64> = records
        .iter()
        .filter_map(|r| r.job_description.as_deref())
        .map(|d| d.chars().count() as f64)
        .collect();

    let remote_indicator_jobs = records
        .iter()
        .filter(|r| r.location_name().is_some_and(utils::has_remote_indicator))
        .count();

    OverviewReport {
        source: dataset.source().map(|p| p.display().to_string()),
        rows: dataset.len(),
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        load: dataset.stats().clone(),
        dates: date_summary(records),
        unique_companies: companies.len(),
        top_companies: top_values(&companies, config.overview_companies),
        unique_categories: categories.len(),
        categories: all_values(&categories),
        unique_locations: locations.len(),
        top_locations: top_values(&locations, config.overview_locations),
        total_keywords: keywords.total(),
        top_keywords: aggregator::top_keywords(records, config.overview_keywords),
        description_length: describe(&lengths),
        description_mentions: description_mentions(records, &config.mention_terms),
        salary_mentions: records
            .iter()
            .filter_map(|r| r.job_description.as_deref())
            .filter(|d| utils::mentions_salary_amount(d))
            .count(),
        quality: quality_checks(dataset),
        remote_indicator_jobs,
        remote_indicator_pct: utils::percentage(remote_indicator_jobs, dataset.len()),
        sample_keywords: records
            .iter()
            .filter_map(|r| r.raw_keywords.clone())
            .take(SAMPLE_KEYWORD_CELLS)
            .collect(),
        sample_posting: records.first().map(sample_posting),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
company,category,location,date_posted,keywords,job_description,post_link
Acme,Backend,Remote,2024-01-02,\"Python, AWS\",Python dev; pay $120k,https://a.example/1
Beta,Data,Berlin,2024-01-03,\"python,sql\",SQL and AWS,https://b.example/2
Acme,Backend,Worldwide,2024-01-02,rust,,https://a.example/3
Gamma,Data,New York,2024-01-05,,JavaScript role,ftp://c.example/4
";

    fn dataset() -> Dataset {
        Dataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_value_counts_skips_absent() {
        let table = value_counts(vec![Some("a"), None, Some("b"), Some("a")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_date_summary() {
        let summary = date_summary(dataset().records()).unwrap();
        assert_eq!(summary.first, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(summary.last, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(summary.per_day.len(), 3);
        assert_eq!(summary.per_day[0].1, 2);

        assert!(date_summary(&[]).is_none());
    }

    #[test]
    fn test_describe_matches_linear_quantiles() {
        let stats = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.p25, 1.75);
        assert_eq!(stats.p50, 2.5);
        assert_eq!(stats.p75, 3.25);
        assert_eq!(stats.max, 4.0);
        let std = stats.std.unwrap();
        assert!((std - 1.290_994).abs() < 1e-5);

        let single = describe(&[7.0]).unwrap();
        assert_eq!(single.std, None);
        assert_eq!(single.p75, 7.0);

        assert!(describe(&[]).is_none());
    }

    #[test]
    fn test_overview() {
        let dataset = dataset();
        let report = overview(&dataset, &AnalysisConfig::default());

        assert_eq!(report.rows, 4);
        assert_eq!(report.unique_companies, 3);
        assert_eq!(report.top_companies[0].value, "Acme");
        assert_eq!(report.top_companies[0].count, 2);
        assert_eq!(report.unique_categories, 2);
        assert_eq!(report.total_keywords, 5);
        assert_eq!(report.top_keywords[0].keyword, "python");
        assert_eq!(report.top_keywords[0].count, 2);
        assert_eq!(report.salary_mentions, 1);
        assert_eq!(report.remote_indicator_jobs, 2);
        assert_eq!(report.remote_indicator_pct, 50.0);

        let mentions: Vec<(&str, usize)> = report
            .description_mentions
            .iter()
            .map(|m| (m.term.as_str(), m.count))
            .collect();
        assert_eq!(
            mentions,
            vec![("remote", 0), ("python", 1), ("javascript", 1), ("aws", 1)]
        );

        assert_eq!(
            report.quality,
            QualityChecks {
                duplicate_rows: 0,
                empty_descriptions: 1,
                empty_keywords: 1,
                valid_urls: 3,
            }
        );
        assert_eq!(report.description_length.unwrap().count, 3);

        assert_eq!(report.sample_keywords, vec!["Python, AWS", "python,sql", "rust"]);
        let sample = report.sample_posting.unwrap();
        assert_eq!(sample.company, "Acme");
        assert_eq!(sample.category, "Backend");
        assert_eq!(sample.location, "Remote");
        assert_eq!(sample.date_posted, "2024-01-02");
        assert_eq!(sample.keywords, "Python, AWS");
        assert_eq!(sample.description_preview, "Python dev; pay $120k");
    }

    #[test]
    fn test_sample_posting_truncates_description() {
        let mut record = JobRecord::with_keywords(["rust"]);
        record.job_description = Some("x".repeat(600));

        let sample = sample_posting(&record);
        assert_eq!(sample.description_preview.chars().count(), 503);
        assert!(sample.description_preview.ends_with("..."));
        assert_eq!(sample.date_posted, "N/A");
    }

    #[test]
    fn test_overview_of_empty_dataset() {
        let report = overview(&Dataset::from_records(Vec::new()), &AnalysisConfig::default());
        assert!(report.sample_posting.is_none());
        assert!(report.sample_keywords.is_empty());
        assert!(report.dates.is_none());
    }
}
