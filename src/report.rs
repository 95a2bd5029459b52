// src/report.rs
//! Text and JSON rendering of the report payloads.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

use crate::core::aggregator::{KeywordCount, PairCount};
use crate::core::filter::{JobFilter, WorkType};
use crate::types::report::{
    DashboardReport, OverviewReport, PairsReport, SkillsReport, ValueCount,
};
use crate::utils;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

fn section(out: &mut String, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "=== {} ===", title)?;
    Ok(())
}

fn filter_label(filter: &JobFilter) -> String {
    let category = filter.category.as_deref().unwrap_or("All");
    let work_type = match filter.work_type {
        WorkType::All => "All",
        WorkType::RemoteOnly => "Remote Only",
        WorkType::OnsiteOnly => "On-site Only",
    };
    format!("Category: {} | Work Type: {}", category, work_type)
}

fn value_table(out: &mut String, rows: &[ValueCount]) -> Result<()> {
    for row in rows {
        writeln!(out, "  {:<40} {:>6}", utils::truncate_chars(&row.value, 37), row.count)?;
    }
    Ok(())
}

fn keyword_table(out: &mut String, rows: &[KeywordCount]) -> Result<()> {
    for row in rows {
        writeln!(out, "  {:<30} {:>6}", row.keyword, row.count)?;
    }
    Ok(())
}

fn pair_lines(out: &mut String, rows: &[PairCount]) -> Result<()> {
    for row in rows {
        writeln!(out, "  {} + {}: {} jobs", row.keyword_a, row.keyword_b, row.count)?;
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn render_overview(report: &OverviewReport) -> Result<String> {
    let mut out = String::new();

    section(&mut out, "DATASET OVERVIEW")?;
    if let Some(source) = &report.source {
        writeln!(out, "Source: {}", source)?;
    }
    writeln!(out, "Shape: ({}, {})", report.rows, report.columns.len())?;
    writeln!(out, "Columns: {}", report.columns.join(", "))?;
    writeln!(
        out,
        "Rows read: {} | skipped: {} | unparsed dates: {}",
        report.load.rows_read, report.load.rows_skipped, report.load.unparsed_dates
    )?;

    section(&mut out, "MISSING VALUES")?;
    for (column, missing) in &report.load.missing_values {
        writeln!(out, "  {:<20} {:>6}", column, missing)?;
    }

    section(&mut out, "DATE ANALYSIS")?;
    match &report.dates {
        Some(dates) => {
            writeln!(out, "Date range: {} to {}", dates.first, dates.last)?;
            writeln!(out, "Jobs by date:")?;
            for (date, count) in &dates.per_day {
                writeln!(out, "  {} {:>6}", date, count)?;
            }
        }
        None => writeln!(out, "No parseable dates")?,
    }

    section(&mut out, "COMPANIES")?;
    writeln!(out, "Unique companies: {}", report.unique_companies)?;
    value_table(&mut out, &report.top_companies)?;

    section(&mut out, "CATEGORIES")?;
    writeln!(out, "Unique categories: {}", report.unique_categories)?;
    value_table(&mut out, &report.categories)?;

    section(&mut out, "LOCATIONS")?;
    writeln!(out, "Unique locations: {}", report.unique_locations)?;
    value_table(&mut out, &report.top_locations)?;

    section(&mut out, "KEYWORDS")?;
    writeln!(out, "Total keywords extracted: {}", report.total_keywords)?;
    keyword_table(&mut out, &report.top_keywords)?;

    section(&mut out, "JOB DESCRIPTIONS")?;
    match &report.description_length {
        Some(d) => {
            writeln!(out, "Length (characters):")?;
            writeln!(out, "  count {:>10}", d.count)?;
            writeln!(out, "  mean  {:>10.1}", d.mean)?;
            match d.std {
                Some(std) => writeln!(out, "  std   {:>10.1}", std)?,
                None => writeln!(out, "  std   {:>10}", "N/A")?,
            }
            writeln!(out, "  min   {:>10.1}", d.min)?;
            writeln!(out, "  25%   {:>10.1}", d.p25)?;
            writeln!(out, "  50%   {:>10.1}", d.p50)?;
            writeln!(out, "  75%   {:>10.1}", d.p75)?;
            writeln!(out, "  max   {:>10.1}", d.max)?;
        }
        None => writeln!(out, "No job descriptions")?,
    }
    for mention in &report.description_mentions {
        writeln!(out, "Descriptions mentioning '{}': {}", mention.term, mention.count)?;
    }
    writeln!(out, "Descriptions mentioning salary/compensation: {}", report.salary_mentions)?;

    section(&mut out, "DATA QUALITY")?;
    writeln!(out, "Duplicate rows: {}", report.quality.duplicate_rows)?;
    writeln!(out, "Empty job descriptions: {}", report.quality.empty_descriptions)?;
    writeln!(out, "Empty keywords: {}", report.quality.empty_keywords)?;
    writeln!(out, "Valid URLs in post_link: {}", report.quality.valid_urls)?;

    section(&mut out, "REMOTE WORK")?;
    writeln!(out, "Jobs with remote indicators in location: {}", report.remote_indicator_jobs)?;
    writeln!(out, "Percentage of remote jobs: {:.1}%", report.remote_indicator_pct)?;

    section(&mut out, "SAMPLE DATA FOR INSPECTION")?;
    for (i, keywords) in report.sample_keywords.iter().enumerate() {
        writeln!(out, "Sample keywords {}: {:?}", i + 1, keywords)?;
    }
    match &report.sample_posting {
        Some(sample) => {
            writeln!(out, "Sample job posting:")?;
            writeln!(out, "Company: {}", sample.company)?;
            writeln!(out, "Category: {}", sample.category)?;
            writeln!(out, "Location: {}", sample.location)?;
            writeln!(out, "Date: {}", sample.date_posted)?;
            writeln!(out, "Keywords: {}", sample.keywords)?;
            writeln!(out, "Description preview: {}", sample.description_preview)?;
        }
        None => writeln!(out, "No postings")?,
    }

    Ok(out)
}

pub fn render_dashboard(report: &DashboardReport) -> Result<String> {
    let mut out = String::new();
    let m = &report.metrics;

    writeln!(out, "Tech Job Market Analytics")?;
    writeln!(out, "{}", filter_label(&report.filter))?;

    section(&mut out, "KEY METRICS")?;
    writeln!(out, "  Total Jobs     {:>8}", m.total_jobs)?;
    writeln!(out, "  Companies      {:>8}", m.companies)?;
    writeln!(out, "  Unique Skills  {:>8}", m.unique_skills)?;
    writeln!(out, "  Remote Jobs    {:>7.1}%", m.remote_pct)?;
    writeln!(out, "  With Salary    {:>7.1}%", m.salary_pct)?;

    section(&mut out, "MOST IN-DEMAND SKILLS")?;
    keyword_table(&mut out, &report.top_skills)?;

    section(&mut out, "TOP SKILL PAIRS")?;
    pair_lines(&mut out, &report.top_pairs)?;

    section(&mut out, "REMOTE VS ON-SITE")?;
    writeln!(out, "  On-site {:>6}", report.remote_split.onsite)?;
    writeln!(out, "  Remote  {:>6}", report.remote_split.remote)?;

    section(&mut out, "TOP HIRING COMPANIES")?;
    value_table(&mut out, &report.top_companies)?;

    section(&mut out, "JOB CATEGORIES")?;
    value_table(&mut out, &report.categories)?;

    if !report.top_onsite_locations.is_empty() {
        section(&mut out, "TOP ON-SITE LOCATIONS")?;
        value_table(&mut out, &report.top_onsite_locations)?;
    }

    section(&mut out, "KEY MARKET INSIGHTS")?;
    let insights = &report.insights;
    match &insights.hottest_skill {
        Some(skill) => writeln!(
            out,
            "Hottest Skill: {} appears in {} job postings ({:.1}% of all jobs)",
            skill.keyword.to_uppercase(),
            skill.count,
            skill.pct_of_jobs
        )?,
        None => writeln!(out, "Hottest Skill: N/A")?,
    }
    writeln!(
        out,
        "Remote Work: {} jobs ({:.1}%) offer remote work opportunities",
        insights.remote_jobs, insights.remote_pct
    )?;
    match &insights.top_employer {
        Some(employer) => writeln!(
            out,
            "Top Employer: {} is actively hiring with {} job postings",
            employer.value, employer.count
        )?,
        None => writeln!(out, "Top Employer: N/A")?,
    }
    writeln!(
        out,
        "Salary Transparency: {} jobs ({:.1}%) mention salary information",
        insights.salary_jobs, insights.salary_pct
    )?;

    section(&mut out, "SAMPLE JOB LISTINGS")?;
    writeln!(
        out,
        "  {:<25} {:<20} {:<25} {:<7} {:<7} {:<10}",
        "Company", "Category", "Location", "Remote", "Salary", "Posted"
    )?;
    writeln!(out, "  {}", "-".repeat(99))?;
    for row in &report.listings {
        writeln!(
            out,
            "  {:<25} {:<20} {:<25} {:<7} {:<7} {:<10}",
            utils::truncate_chars(&row.company, 22),
            utils::truncate_chars(&row.category, 17),
            utils::truncate_chars(&row.location, 22),
            yes_no(row.remote),
            yes_no(row.salary_info),
            row.date_posted
        )?;
    }

    Ok(out)
}

pub fn render_skills(report: &SkillsReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", filter_label(&report.filter))?;
    writeln!(
        out,
        "Jobs: {} | Unique skills: {}",
        report.jobs, report.unique_skills
    )?;
    section(&mut out, "TOP SKILLS")?;
    keyword_table(&mut out, &report.skills)?;
    Ok(out)
}

pub fn render_pairs(report: &PairsReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", filter_label(&report.filter))?;
    writeln!(out, "Jobs: {}", report.jobs)?;
    section(&mut out, "TOP SKILL PAIRS")?;
    pair_lines(&mut out, &report.pairs)?;
    Ok(out)
}

pub fn render_categories(categories: &[String]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Job categories ({}):", categories.len())?;
    for category in categories {
        writeln!(out, "  {}", category)?;
    }
    Ok(out)
}
