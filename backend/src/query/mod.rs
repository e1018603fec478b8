//! Read-only aggregations over a listings [`Table`](crate::models::Table).
//!
//! Every function borrows the table and never mutates it, so any number of
//! request handlers can run them concurrently on the same `Arc<Table>`.
//!
//! Ordering is deterministic: groups are kept in first-occurrence order and
//! all ranking sorts are stable, so ties keep that order.

pub mod compare;
pub mod counts;
pub mod filter;
pub mod insights;
pub mod salary;

pub use compare::{compare_domains, summarize_domain, MISSING_DOMAINS, TOP_N};
pub use counts::{all_domains, all_locations, company_hiring, jobs_by_city, top_domains};
pub use filter::{filter_listings, FilterParams, ALL};
pub use insights::key_insights;
pub use salary::{salary_insights, salary_ranges};

use std::collections::HashMap;

use crate::models::Listing;

/// Default number of rows returned by the ranking queries.
pub const DEFAULT_LIMIT: usize = 10;

/// Groups keyed by a string, in first-occurrence order.
pub(crate) struct Groups<'a, T> {
    index: HashMap<&'a str, usize>,
    groups: Vec<(&'a str, T)>,
}

impl<'a, T: Default> Groups<'a, T> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Accumulator for `key`, created on first sight.
    pub(crate) fn entry(&mut self, key: &'a str) -> &mut T {
        let groups = &mut self.groups;
        let idx = *self.index.entry(key).or_insert_with(|| {
            groups.push((key, T::default()));
            groups.len() - 1
        });
        &mut self.groups[idx].1
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(&'a str, T)> {
        self.groups.iter()
    }

    pub(crate) fn into_vec(self) -> Vec<(&'a str, T)> {
        self.groups
    }
}

/// Running sum of one salary column.
///
/// Keeps an incremental mean next to the plain sum: the sum is exact for
/// ordinary data, the incremental mean stays finite when the sum overflows.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ColumnSum {
    sum: f64,
    running: f64,
}

impl ColumnSum {
    fn add(&mut self, value: f64, count: usize) {
        let n = count as f64;
        self.sum += value;
        self.running += value / n - self.running / n;
    }

    fn mean(&self, count: usize) -> f64 {
        let mean = self.sum / count as f64;
        if mean.is_finite() {
            mean
        } else {
            self.running
        }
    }
}

/// Running salary sums for one group.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SalarySums {
    pub count: usize,
    min: ColumnSum,
    max: ColumnSum,
    avg: ColumnSum,
}

impl SalarySums {
    pub(crate) fn add(&mut self, listing: &Listing) {
        self.count += 1;
        self.min.add(listing.min_salary, self.count);
        self.max.add(listing.max_salary, self.count);
        self.avg.add(listing.avg_salary, self.count);
    }

    /// Mean of `column`; `None` for an empty group or a non-finite result.
    fn mean(&self, column: &ColumnSum) -> Option<f64> {
        (self.count > 0)
            .then(|| column.mean(self.count))
            .filter(|mean| mean.is_finite())
    }

    pub(crate) fn mean_min(&self) -> Option<f64> {
        self.mean(&self.min)
    }

    pub(crate) fn mean_max(&self) -> Option<f64> {
        self.mean(&self.max)
    }

    pub(crate) fn mean_avg(&self) -> Option<f64> {
        self.mean(&self.avg)
    }
}

/// Count occurrences of each key, most frequent first.
pub(crate) fn value_counts<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut groups: Groups<'a, usize> = Groups::new();
    for key in keys {
        *groups.entry(key) += 1;
    }
    let mut counts = groups.into_vec();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Distinct keys in first-occurrence order.
pub(crate) fn distinct<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut groups: Groups<'a, ()> = Groups::new();
    for key in keys {
        groups.entry(key);
    }
    groups.into_vec().into_iter().map(|(k, _)| k.to_string()).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_stable_ties() {
        let counts = value_counts(["b", "a", "c", "a", "b", "d"]);
        assert_eq!(counts, vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_distinct_first_occurrence() {
        assert_eq!(distinct(["x", "y", "x", "z", "y"]), vec!["x", "y", "z"]);
        assert!(distinct(std::iter::empty::<&str>()).is_empty());
    }

    #[test]
    fn test_salary_sums_mean() {
        let mut sums = SalarySums::default();
        assert_eq!(sums.mean_avg(), None);

        sums.add(&Listing::new("A", "B", "C", 10.0, 30.0, 20.0));
        sums.add(&Listing::new("A", "B", "C", 20.0, 50.0, 35.0));
        assert_eq!(sums.mean_min(), Some(15.0));
        assert_eq!(sums.mean_max(), Some(40.0));
        assert_eq!(sums.mean_avg(), Some(27.5));
    }

    #[test]
    fn test_salary_sums_mean_near_f64_max() {
        let mut sums = SalarySums::default();
        sums.add(&Listing::new("A", "B", "C", 1e308, 1.5e308, 1.25e308));
        sums.add(&Listing::new("A", "B", "C", 1.5e308, 1.7e308, 1.6e308));

        let min = sums.mean_min().unwrap();
        let avg = sums.mean_avg().unwrap();
        assert!(min.is_finite() && avg.is_finite());
        assert!((min - 1.25e308).abs() < 1e295);
        assert!((avg - 1.425e308).abs() < 1e295);
        assert!(sums.mean_max().unwrap().is_finite());
    }
}
