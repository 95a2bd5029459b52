// src/cli.rs
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::app_log;
use crate::config::AnalysisConfig;
use crate::core::aggregator;
use crate::core::dataset::Dataset;
use crate::core::filter::{JobFilter, WorkType};
use crate::core::{insights, stats};
use crate::report::{self, OutputFormat};
use crate::types::report::{PairsReport, SkillsReport};

#[derive(Parser)]
#[command(name = "job-analytics")]
#[command(about = "Explore a CSV of tech job postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Postings CSV; overrides the configured data path
    #[arg(long, global = true)]
    pub data_path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Job category to keep ("All" keeps every category)
    #[arg(long)]
    pub category: Option<String>,

    /// Work type to keep
    #[arg(long, value_enum, default_value_t = WorkType::All)]
    pub work_type: WorkType,
}

impl FilterArgs {
    pub fn to_filter(&self) -> JobFilter {
        JobFilter::new()
            .with_category(self.category.clone())
            .with_work_type(self.work_type)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Exploratory overview of the whole dataset
    Overview,
    /// Most frequent skills
    Skills {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of skills to show
        #[arg(long)]
        top: Option<NonZeroUsize>,
    },
    /// Skills most often requested together
    Pairs {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of pairs to show
        #[arg(long)]
        top: Option<NonZeroUsize>,
    },
    /// Metrics, breakdowns, insights and sample listings
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List the job categories available for filtering
    Categories,
}

/// Run one subcommand against a loaded dataset, returning the rendered output.
/// `None` means the filter matched no jobs.
pub fn run_command(
    command: &Command,
    dataset: &Dataset,
    config: &AnalysisConfig,
    format: OutputFormat,
) -> Result<Option<String>> {
    let rendered = match command {
        Command::Overview => {
            let report = stats::overview(dataset, config);
            match format {
                OutputFormat::Text => report::render_overview(&report)?,
                OutputFormat::Json => report::to_json(&report)?,
            }
        }

        Command::Skills { filter, top } => {
            let filter = filter.to_filter();
            let view = filter.apply(dataset);
            if view.is_empty() {
                return Ok(None);
            }
            let n = top.unwrap_or(config.top_skills);
            let report = SkillsReport {
                jobs: view.len(),
                unique_skills: aggregator::keyword_frequencies(&view).len(),
                skills: aggregator::top_keywords(&view, n),
                filter,
            };
            match format {
                OutputFormat::Text => report::render_skills(&report)?,
                OutputFormat::Json => report::to_json(&report)?,
            }
        }

        Command::Pairs { filter, top } => {
            let filter = filter.to_filter();
            let view = filter.apply(dataset);
            if view.is_empty() {
                return Ok(None);
            }
            let n = top.unwrap_or(config.top_pairs);
            let report = PairsReport {
                jobs: view.len(),
                pairs: aggregator::top_keyword_pairs(&view, n),
                filter,
            };
            match format {
                OutputFormat::Text => report::render_pairs(&report)?,
                OutputFormat::Json => report::to_json(&report)?,
            }
        }

        Command::Dashboard { filter } => {
            let filter = filter.to_filter();
            let view = filter.apply(dataset);
            let Some(report) = insights::dashboard(&view, &filter, config) else {
                return Ok(None);
            };
            match format {
                OutputFormat::Text => report::render_dashboard(&report)?,
                OutputFormat::Json => report::to_json(&report)?,
            }
        }

        Command::Categories => {
            let categories = dataset.categories();
            match format {
                OutputFormat::Text => report::render_categories(&categories)?,
                OutputFormat::Json => report::to_json(&categories)?,
            }
        }
    };

    Ok(Some(rendered))
}

/// Load the dataset and print the subcommand's report to stdout.
pub async fn handle_command(cli: Cli, default_data_path: PathBuf, config: AnalysisConfig) -> Result<()> {
    let data_path = cli.data_path.clone().unwrap_or(default_data_path);
    let dataset = Dataset::load(&data_path).await?;

    match run_command(&cli.command, &dataset, &config, cli.format)? {
        Some(output) => {
            println!("{}", output);
        }
        None => {
            app_log!(warn, "No jobs match the selected filters");
            println!("No jobs match your filters. Please adjust your selection.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const SAMPLE: &str = "\
company,category,location,date_posted,keywords,job_description,post_link
Acme,Backend,Remote,2024-01-02,\"Python, AWS\",Pay $100k,https://a.example/1
Beta,Data,Berlin,2024-01-03,\"python,sql\",SQL work,https://b.example/2
";

    fn dataset() -> Dataset {
        Dataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard_filters() {
        let cli = Cli::try_parse_from([
            "job-analytics",
            "dashboard",
            "--category",
            "Data",
            "--work-type",
            "onsite",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Dashboard { filter } => {
                assert_eq!(filter.category.as_deref(), Some("Data"));
                assert_eq!(filter.work_type, WorkType::OnsiteOnly);
            }
            _ => panic!("expected dashboard command"),
        }
    }

    #[test]
    fn test_parse_rejects_zero_top() {
        let result = Cli::try_parse_from(["job-analytics", "skills", "--top", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_skills() {
        let command = Command::Skills {
            filter: FilterArgs::default(),
            top: NonZeroUsize::new(1),
        };
        let output = run_command(&command, &dataset(), &AnalysisConfig::default(), OutputFormat::Text)
            .unwrap()
            .unwrap();

        assert!(output.contains("python"));
        assert!(!output.contains("sql "));
    }

    #[test]
    fn test_run_pairs_json() {
        let command = Command::Pairs {
            filter: FilterArgs::default(),
            top: None,
        };
        let output = run_command(&command, &dataset(), &AnalysisConfig::default(), OutputFormat::Json)
            .unwrap()
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["pairs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_run_with_no_matches() {
        let command = Command::Dashboard {
            filter: FilterArgs {
                category: Some("Design".to_string()),
                work_type: WorkType::All,
            },
        };
        let output =
            run_command(&command, &dataset(), &AnalysisConfig::default(), OutputFormat::Text).unwrap();
        assert!(output.is_none());
    }

    #[test]
    fn test_run_overview_and_dashboard_text() {
        let dataset = dataset();
        let config = AnalysisConfig::default();

        let overview = run_command(&Command::Overview, &dataset, &config, OutputFormat::Text)
            .unwrap()
            .unwrap();
        assert!(overview.contains("Shape: (2, 7)"));
        assert!(overview.contains("=== SAMPLE DATA FOR INSPECTION ==="));
        assert!(overview.contains("Company: Acme"));
        assert!(overview.contains("Description preview: Pay $100k"));

        let dashboard = run_command(
            &Command::Dashboard {
                filter: FilterArgs::default(),
            },
            &dataset,
            &config,
            OutputFormat::Text,
        )
        .unwrap()
        .unwrap();
        assert!(dashboard.contains("Hottest Skill: PYTHON appears in 2 job postings (100.0% of all jobs)"));
    }
}
