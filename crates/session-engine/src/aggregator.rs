//! Per-class detection aggregation

use std::collections::{HashMap, HashSet};

/// Cumulative per-class observation counts for the current session.
///
/// A class crosses the threshold at most once per session: once reported it
/// enters the sent set and produces no further signal until `reset`.
/// Invariant: a label is in the sent set only if its count has exceeded the
/// threshold at some point this session.
#[derive(Debug)]
pub struct DetectionAggregator {
    counts: HashMap<String, u32>,
    sent: HashSet<String>,
    threshold: u32,
}

impl DetectionAggregator {
    pub fn new(threshold: u32) -> Self {
        Self {
            counts: HashMap::new(),
            sent: HashSet::new(),
            threshold,
        }
    }

    /// Fold one frame's class labels into the counts and return the labels
    /// that newly crossed the threshold on this call.
    ///
    /// A label crosses when its cumulative count is strictly greater than
    /// the threshold. Labels are returned in sorted order so multi-crossing
    /// frames emit deterministically.
    pub fn observe<'a, I>(&mut self, labels: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for label in labels {
            *self.counts.entry(label.to_string()).or_insert(0) += 1;
        }

        let mut crossed: Vec<String> = self
            .counts
            .iter()
            .filter(|(label, &count)| count > self.threshold && !self.sent.contains(*label))
            .map(|(label, _)| label.clone())
            .collect();
        crossed.sort();

        for label in &crossed {
            self.sent.insert(label.clone());
        }
        crossed
    }

    /// Cumulative count for a label this session
    pub fn count(&self, label: &str) -> u32 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Whether any observations are held
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.sent.is_empty()
    }

    /// Clear counts and the sent set. Called exactly when a session ends.
    pub fn reset(&mut self) {
        self.counts.clear();
        self.sent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let mut agg = DetectionAggregator::new(10);

        // Counts 1..=10: nothing crosses at exactly the threshold
        for _ in 0..10 {
            assert!(agg.observe(["cup"]).is_empty());
        }
        assert_eq!(agg.count("cup"), 10);

        // Count 11: strictly greater, exactly one crossing
        assert_eq!(agg.observe(["cup"]), vec!["cup".to_string()]);
    }

    #[test]
    fn test_at_most_once_per_session() {
        let mut agg = DetectionAggregator::new(10);

        for _ in 0..11 {
            agg.observe(["cup"]);
        }
        // Keep observing well past the threshold: no further signal
        for _ in 0..50 {
            assert!(agg.observe(["cup"]).is_empty());
        }
        assert_eq!(agg.count("cup"), 61);
    }

    #[test]
    fn test_multiple_labels_cross_sorted() {
        let mut agg = DetectionAggregator::new(2);

        agg.observe(["mug", "bottle"]);
        agg.observe(["mug", "bottle"]);
        let crossed = agg.observe(["mug", "bottle"]);
        assert_eq!(crossed, vec!["bottle".to_string(), "mug".to_string()]);
    }

    #[test]
    fn test_batch_counts_each_prediction() {
        let mut agg = DetectionAggregator::new(10);

        // Three cups in one frame count three sightings
        agg.observe(["cup", "cup", "cup"]);
        assert_eq!(agg.count("cup"), 3);

        // Crossing can happen mid-batch evaluation: 3 + 4 + 4 = 11
        agg.observe(["cup", "cup", "cup", "cup"]);
        assert_eq!(
            agg.observe(["cup", "cup", "cup", "cup"]),
            vec!["cup".to_string()]
        );
    }

    #[test]
    fn test_reset_allows_reporting_again() {
        let mut agg = DetectionAggregator::new(10);

        for _ in 0..11 {
            agg.observe(["cup"]);
        }
        agg.reset();
        assert!(agg.is_empty());
        assert_eq!(agg.count("cup"), 0);

        // Next session starts from zero and can report the same label
        for _ in 0..10 {
            assert!(agg.observe(["cup"]).is_empty());
        }
        assert_eq!(agg.observe(["cup"]), vec!["cup".to_string()]);
    }
}
