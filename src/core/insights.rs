// src/core/insights.rs
//! Dashboard metrics, breakdowns and headline insights over a filtered view.

use crate::config::AnalysisConfig;
use crate::core::aggregator;
use crate::core::filter::JobFilter;
use crate::core::stats;
use crate::types::record::JobRecord;
use crate::types::report::{
    DashboardMetrics, DashboardReport, HottestSkill, Insights, ListingRow, RemoteSplit,
};
use crate::utils;

pub fn metrics(view: &[&JobRecord]) -> DashboardMetrics {
    let total = view.len();
    let companies = stats::value_counts(view.iter().map(|r| r.company_name()));
    let remote = view.iter().filter(|r| r.is_remote).count();
    let salary = view.iter().filter(|r| r.has_salary).count();

    DashboardMetrics {
        total_jobs: total,
        companies: companies.len(),
        unique_skills: aggregator::keyword_frequencies(view).len(),
        remote_pct: utils::percentage(remote, total),
        salary_pct: utils::percentage(salary, total),
    }
}

pub fn remote_split(view: &[&JobRecord]) -> RemoteSplit {
    let remote = view.iter().filter(|r| r.is_remote).count();
    RemoteSplit {
        onsite: view.len() - remote,
        remote,
    }
}

pub fn insights(view: &[&JobRecord]) -> Insights {
    let total = view.len();
    let remote_jobs = view.iter().filter(|r| r.is_remote).count();
    let salary_jobs = view.iter().filter(|r| r.has_salary).count();

    let hottest_skill = aggregator::keyword_frequencies(view)
        .most_common()
        .map(|(keyword, count)| HottestSkill {
            keyword: keyword.to_string(),
            count,
            pct_of_jobs: utils::percentage(count, total),
        });

    let top_employer = stats::top_values(
        &stats::value_counts(view.iter().map(|r| r.company_name())),
        std::num::NonZeroUsize::MIN,
    )
    .into_iter()
    .next();

    Insights {
        hottest_skill,
        remote_jobs,
        remote_pct: utils::percentage(remote_jobs, total),
        top_employer,
        salary_jobs,
        salary_pct: utils::percentage(salary_jobs, total),
    }
}

fn listing_row(record: &JobRecord) -> ListingRow {
    ListingRow {
        company: record.company_name().unwrap_or_default().to_string(),
        category: record.category_name().unwrap_or_default().to_string(),
        location: record.location_name().unwrap_or_default().to_string(),
        remote: record.is_remote,
        salary_info: record.has_salary,
        date_posted: record.date_label(),
    }
}

/// Assemble the dashboard for an already-filtered view. Returns `None` when
/// the view is empty.
pub fn dashboard(
    view: &[&JobRecord],
    filter: &JobFilter,
    config: &AnalysisConfig,
) -> Option<DashboardReport> {
    if view.is_empty() {
        return None;
    }

    let companies = stats::value_counts(view.iter().map(|r| r.company_name()));
    let categories = stats::value_counts(view.iter().map(|r| r.category_name()));
    let onsite_locations = stats::value_counts(
        view.iter()
            .filter(|r| !r.is_remote)
            .map(|r| r.location_name()),
    );

    Some(DashboardReport {
        filter: filter.clone(),
        metrics: metrics(view),
        top_skills: aggregator::top_keywords(view, config.top_skills),
        top_pairs: aggregator::top_keyword_pairs(view, config.top_pairs),
        remote_split: remote_split(view),
        top_companies: stats::top_values(&companies, config.top_companies),
        categories: stats::all_values(&categories),
        top_onsite_locations: stats::top_values(&onsite_locations, config.top_locations),
        insights: insights(view),
        listings: view
            .iter()
            .take(config.listing_limit.get())
            .map(|r| listing_row(r))
            .collect(),
    })
}
