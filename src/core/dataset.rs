// src/core/dataset.rs
//! Dataset loading - CSV ingestion and record normalization.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::types::record::{JobRecord, RawJobRow, COLUMNS};
use crate::utils;

/// Bookkeeping gathered while reading the file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub duplicate_rows: usize,
    pub unparsed_dates: usize,
    /// Absent or empty cells per column, in file column order.
    pub missing_values: Vec<(String, usize)>,
}

/// The loaded postings. Immutable once built; filters borrow from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<JobRecord>,
    source: Option<PathBuf>,
    stats: LoadStats,
}

impl Dataset {
    /// Read and normalize the CSV at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Data file not found: {}", path.display());
        }

        let content = utils::read_file_content(path).await?;
        let mut dataset = Self::from_reader(content.as_bytes())
            .with_context(|| format!("Failed to load dataset: {}", path.display()))?;
        dataset.source = Some(path.to_path_buf());

        app_log!(
            info,
            "Loaded {} records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Build a dataset from CSV text with a header row. Undecodable rows and
    /// rows with more fields than the header are skipped and counted.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers().context("Failed to read CSV header")?.clone();
        for column in COLUMNS {
            if !headers.iter().any(|h| h == column) {
                app_log!(warn, "Column '{}' missing from header, treating as empty", column);
            }
        }

        let mut records = Vec::new();
        let mut stats = LoadStats::default();
        let mut missing: BTreeMap<usize, usize> = BTreeMap::new();
        let mut seen: HashSet<RawJobRow> = HashSet::new();

        for (idx, result) in reader.records().enumerate() {
            stats.rows_read += 1;
            let decoded = result.map_err(anyhow::Error::from).and_then(|record| {
                if record.len() > headers.len() {
                    anyhow::bail!(
                        "{} fields, header has {}",
                        record.len(),
                        headers.len()
                    );
                }
                Ok(record.deserialize::<RawJobRow>(Some(&headers))?)
            });
            let raw = match decoded {
                Ok(raw) => raw,
                Err(e) => {
                    stats.rows_skipped += 1;
                    app_log!(warn, "Skipping row {}: {}", idx + 1, e);
                    continue;
                }
            };

            for (col, (_, value)) in raw.cells().into_iter().enumerate() {
                if value.map_or(true, |v| v.trim().is_empty()) {
                    *missing.entry(col).or_insert(0) += 1;
                }
            }

            if !seen.insert(raw.clone()) {
                stats.duplicate_rows += 1;
            }

            let (record, unparsed_date) = JobRecord::from_raw(raw);
            if unparsed_date {
                stats.unparsed_dates += 1;
                app_log!(debug, "Unparseable date_posted at row {}", idx + 1);
            }
            records.push(record);
        }

        stats.missing_values = COLUMNS
            .iter()
            .enumerate()
            .map(|(col, name)| (name.to_string(), missing.get(&col).copied().unwrap_or(0)))
            .collect();

        if stats.rows_skipped > 0 {
            app_log!(warn, "{} rows could not be decoded", stats.rows_skipped);
        }
        if stats.unparsed_dates > 0 {
            app_log!(warn, "{} dates could not be parsed", stats.unparsed_dates);
        }

        Ok(Self {
            records,
            source: None,
            stats,
        })
    }

    /// Wrap already-normalized records.
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        let stats = LoadStats {
            rows_read: records.len(),
            missing_values: COLUMNS.iter().map(|c| (c.to_string(), 0)).collect(),
            ..LoadStats::default()
        };
        Self {
            records,
            source: None,
            stats,
        }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Sorted distinct categories, for filter choices.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.category_name())
            .map(str::to_string)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort();
        categories
    }
}
