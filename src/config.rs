// src/config.rs
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Result sizes and search terms used by the reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub top_skills: NonZeroUsize,
    pub top_pairs: NonZeroUsize,
    pub top_companies: NonZeroUsize,
    pub top_locations: NonZeroUsize,
    pub overview_keywords: NonZeroUsize,
    pub overview_companies: NonZeroUsize,
    pub overview_locations: NonZeroUsize,
    pub listing_limit: NonZeroUsize,
    /// Terms counted in job descriptions by the overview.
    pub mention_terms: Vec<String>,
}

const fn limit(value: usize) -> NonZeroUsize {
    match NonZeroUsize::new(value) {
        Some(v) => v,
        None => NonZeroUsize::MIN,
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_skills: limit(20),
            top_pairs: limit(10),
            top_companies: limit(15),
            top_locations: limit(10),
            overview_keywords: limit(30),
            overview_companies: limit(15),
            overview_locations: limit(20),
            listing_limit: limit(100),
            mention_terms: ["remote", "python", "javascript", "aws"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_skills(mut self, n: NonZeroUsize) -> Self {
        self.top_skills = n;
        self
    }

    pub fn with_top_pairs(mut self, n: NonZeroUsize) -> Self {
        self.top_pairs = n;
        self
    }

    pub fn with_top_companies(mut self, n: NonZeroUsize) -> Self {
        self.top_companies = n;
        self
    }

    pub fn with_top_locations(mut self, n: NonZeroUsize) -> Self {
        self.top_locations = n;
        self
    }

    pub fn with_listing_limit(mut self, n: NonZeroUsize) -> Self {
        self.listing_limit = n;
        self
    }

    pub fn with_mention_terms(mut self, terms: Vec<String>) -> Self {
        self.mention_terms = terms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_skills.get(), 20);
        assert_eq!(config.top_pairs.get(), 10);
        assert_eq!(config.listing_limit.get(), 100);
        assert_eq!(config.mention_terms.len(), 4);
    }

    #[test]
    fn test_builder_overrides() {
        let five = NonZeroUsize::new(5).unwrap();
        let config = AnalysisConfig::new()
            .with_top_skills(five)
            .with_mention_terms(vec!["rust".to_string()]);

        assert_eq!(config.top_skills, five);
        assert_eq!(config.top_pairs.get(), 10);
        assert_eq!(config.mention_terms, vec!["rust"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AnalysisConfig = serde_yaml::from_str("top_pairs: 3\n").unwrap();
        assert_eq!(config.top_pairs.get(), 3);
        assert_eq!(config.top_skills.get(), 20);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result: Result<AnalysisConfig, _> = serde_yaml::from_str("top_skills: 0\n");
        assert!(result.is_err());
    }
}
