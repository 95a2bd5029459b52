// src/core/aggregator.rs
//! Keyword frequency and co-occurrence aggregation.
//!
//! Every function here is pure: tables are rebuilt from whatever view the
//! caller passes in and nothing is retained between calls. Ties in the
//! descending-count ordering keep first-seen order, so results are
//! reproducible for a given input sequence.

use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::types::record::JobRecord;

// ===== Input Seam =====

/// Anything that carries a normalized keyword list.
pub trait KeywordSource {
    fn keywords(&self) -> &[String];
}

impl KeywordSource for JobRecord {
    fn keywords(&self) -> &[String] {
        &self.keyword_list
    }
}

impl KeywordSource for Vec<String> {
    fn keywords(&self) -> &[String] {
        self
    }
}

impl KeywordSource for [String] {
    fn keywords(&self) -> &[String] {
        self
    }
}

impl<T: KeywordSource + ?Sized> KeywordSource for &T {
    fn keywords(&self) -> &[String] {
        (**self).keywords()
    }
}

// ===== Count Table =====

/// Occurrence counts per key, remembering the order keys were first seen.
#[derive(Debug, Clone)]
pub struct CountTable<K> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
    total: usize,
}

impl<K> Default for CountTable<K> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> CountTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: K) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
        self.total += 1;
    }

    /// Count for `key`, 0 if never seen.
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// All entries by count descending, ties in first-seen order.
    pub fn sorted_desc(&self) -> Vec<(K, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// At most `n` entries by count descending.
    pub fn top(&self, n: NonZeroUsize) -> Vec<(K, usize)> {
        let mut sorted = self.sorted_desc();
        sorted.truncate(n.get());
        sorted
    }

    /// The single most frequent entry.
    pub fn most_common(&self) -> Option<(K, usize)> {
        self.top(NonZeroUsize::MIN).into_iter().next()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for CountTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.increment(key);
        }
        table
    }
}

// ===== Result Entries =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// An unordered keyword pair, stored with `keyword_a <= keyword_b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub keyword_a: String,
    pub keyword_b: String,
    pub count: usize,
}

impl PairCount {
    pub fn pair(&self) -> (&str, &str) {
        (&self.keyword_a, &self.keyword_b)
    }
}

// ===== Aggregation =====

/// Count every keyword occurrence across all records.
pub fn keyword_frequencies<R: KeywordSource>(records: &[R]) -> CountTable<&str> {
    records
        .iter()
        .flat_map(|record| record.keywords().iter().map(String::as_str))
        .collect()
}

/// Count co-occurring keyword pairs within each record.
///
/// Pairs come from index combinations `i < j` of one record's list, so a
/// keyword repeated within a record yields a self-pair and repeats its pairs
/// with the other keywords.
pub fn keyword_pair_frequencies<R: KeywordSource>(records: &[R]) -> CountTable<(&str, &str)> {
    let mut table = CountTable::new();
    for record in records {
        let keywords = record.keywords();
        if keywords.len() < 2 {
            continue;
        }
        for (i, first) in keywords.iter().enumerate() {
            for second in &keywords[i + 1..] {
                table.increment(canonical_pair(first, second));
            }
        }
    }
    table
}

fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The `n` most frequent keywords, count descending.
pub fn top_keywords<R: KeywordSource>(records: &[R], n: NonZeroUsize) -> Vec<KeywordCount> {
    keyword_frequencies(records)
        .top(n)
        .into_iter()
        .map(|(keyword, count)| KeywordCount {
            keyword: keyword.to_string(),
            count,
        })
        .collect()
}

/// The `n` most frequent co-occurring keyword pairs, count descending.
pub fn top_keyword_pairs<R: KeywordSource>(records: &[R], n: NonZeroUsize) -> Vec<PairCount> {
    keyword_pair_frequencies(records)
        .top(n)
        .into_iter()
        .map(|((a, b), count)| PairCount {
            keyword_a: a.to_string(),
            keyword_b: b.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lists(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|kws| kws.iter().map(|k| k.to_string()).collect())
            .collect()
    }

    fn n(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).unwrap()
    }

    #[test]
    fn test_top_keywords_counts_across_records() {
        let records = lists(&[&["python", "aws"], &["python", "docker"], &["python"]]);
        let top = top_keywords(&records, n(2));

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].keyword, "python");
        assert_eq!(top[0].count, 3);
        assert!(top[1].keyword == "aws" || top[1].keyword == "docker");
        assert_eq!(top[1].count, 1);
    }

    #[test]
    fn test_top_keyword_pairs_canonical_order() {
        let records = lists(&[&["python", "aws"]]);
        let pairs = top_keyword_pairs(&records, n(5));

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pair(), ("aws", "python"));
        assert_eq!(pairs[0].count, 1);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Vec<String>> = Vec::new();
        assert!(top_keywords(&records, n(3)).is_empty());
        assert!(top_keyword_pairs(&records, n(3)).is_empty());

        let blank = lists(&[&[], &[]]);
        assert!(top_keywords(&blank, n(3)).is_empty());
        assert!(top_keyword_pairs(&blank, n(3)).is_empty());
    }

    #[test]
    fn test_repeated_keyword_pairs_by_position() {
        let records = lists(&[&["go", "go", "rust"]]);
        let pairs = top_keyword_pairs(&records, n(5));

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].pair(), ("go", "rust"));
        assert_eq!(pairs[0].count, 2);
        assert_eq!(pairs[1].pair(), ("go", "go"));
        assert_eq!(pairs[1].count, 1);
    }

    #[test]
    fn test_top_keyword_pairs_truncates_to_n() {
        let records = lists(&[&["a", "b", "c"], &["a", "b"], &["c", "d"]]);
        let pairs = top_keyword_pairs(&records, n(2));

        assert_eq!(keyword_pair_frequencies(&records).len(), 4);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].pair(), ("a", "b"));
        assert_eq!(pairs[0].count, 2);
        assert_eq!(pairs[1].pair(), ("a", "c"));
        assert_eq!(pairs[1].count, 1);
    }

    #[test]
    fn test_pairs_never_cross_records() {
        let records = lists(&[&["rust"], &["go"], &["sql", "rust"]]);
        let table = keyword_pair_frequencies(&records);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&("rust", "sql")), 1);
        assert_eq!(table.get(&("go", "rust")), 0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = lists(&[&["kafka"], &["scala"], &["java", "scala", "kafka"]]);
        let top = top_keywords(&records, n(3));

        let names: Vec<&str> = top.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(names, vec!["kafka", "scala", "java"]);
    }

    #[test]
    fn test_accepts_job_records_and_views() {
        let records = vec![
            JobRecord::with_keywords(["sql", "python"]),
            JobRecord::with_keywords(["python"]),
        ];
        let view: Vec<&JobRecord> = records.iter().collect();

        assert_eq!(top_keywords(&records, n(1)), top_keywords(&view, n(1)));
        assert_eq!(top_keywords(&view, n(1))[0].keyword, "python");
    }

    #[test]
    fn test_count_table_value_counts() {
        let table: CountTable<&str> = ["a", "b", "a", "c", "b", "a"].into_iter().collect();

        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
        assert_eq!(table.get("a"), 3);
        assert_eq!(table.get("z"), 0);
        assert_eq!(table.most_common(), Some(("a", 3)));
        assert_eq!(table.top(n(2)), vec![("a", 3), ("b", 2)]);
    }

    fn keyword_lists() -> impl Strategy<Value = Vec<Vec<String>>> {
        prop::collection::vec(prop::collection::vec("[a-e]{1,2}", 0..6), 0..12)
    }

    proptest! {
        #[test]
        fn top_keywords_is_bounded_and_descending(records in keyword_lists(), limit in 1usize..8) {
            let top = top_keywords(&records, n(limit));

            prop_assert!(top.len() <= limit);
            prop_assert!(top.iter().all(|e| e.count > 0));
            prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        }

        #[test]
        fn top_keyword_pairs_is_bounded_and_descending(records in keyword_lists(), limit in 1usize..4) {
            let top = top_keyword_pairs(&records, n(limit));
            let distinct = keyword_pair_frequencies(&records).len();

            prop_assert_eq!(top.len(), distinct.min(limit));
            prop_assert!(top.iter().all(|e| e.count > 0));
            prop_assert!(top.iter().all(|e| e.keyword_a <= e.keyword_b));
            prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        }

        #[test]
        fn keyword_counts_ignore_record_order(records in keyword_lists()) {
            let mut reversed = records.clone();
            reversed.reverse();

            let forward: HashMap<&str, usize> =
                keyword_frequencies(&records).iter().map(|(k, c)| (*k, c)).collect();
            let backward: HashMap<&str, usize> =
                keyword_frequencies(&reversed).iter().map(|(k, c)| (*k, c)).collect();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn full_top_sums_to_occurrences(records in keyword_lists()) {
            let occurrences: usize = records.iter().map(Vec::len).sum();
            let distinct = keyword_frequencies(&records).len().max(1);

            let sum: usize = top_keywords(&records, n(distinct)).iter().map(|e| e.count).sum();
            prop_assert_eq!(sum, occurrences);
        }

        #[test]
        fn pair_increments_per_record(keywords in prop::collection::vec("[a-c]{1,2}", 0..8)) {
            let k = keywords.len();
            let table = keyword_pair_frequencies(std::slice::from_ref(&keywords));

            prop_assert_eq!(table.total(), k * k.saturating_sub(1) / 2);
            prop_assert!(table.iter().all(|((a, b), _)| a <= b));
        }

        #[test]
        fn repeated_calls_are_identical(records in keyword_lists(), limit in 1usize..8) {
            prop_assert_eq!(top_keywords(&records, n(limit)), top_keywords(&records, n(limit)));
            prop_assert_eq!(
                top_keyword_pairs(&records, n(limit)),
                top_keyword_pairs(&records, n(limit))
            );
        }
    }
}
