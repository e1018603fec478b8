//! Dataset-wide headline numbers, computed in a single pass.

use super::{Groups, SalarySums};
use crate::models::{KeyInsights, Table};

/// Headline summary of the whole table.
///
/// On an empty table every name is `None` and every number zero.
pub fn key_insights(table: &Table) -> KeyInsights {
    let mut domains: Groups<'_, SalarySums> = Groups::new();
    let mut companies: Groups<'_, usize> = Groups::new();
    let mut locations: Groups<'_, usize> = Groups::new();
    let mut overall = SalarySums::default();

    for listing in table {
        domains.entry(&listing.job_title).add(listing);
        *companies.entry(&listing.company) += 1;
        *locations.entry(&listing.location) += 1;
        overall.add(listing);
    }

    let top_paying_domain = first_max_by(domains.iter(), |sums| sums.mean_avg().unwrap_or(0.0));
    let top_hiring_domain = first_max_by(domains.iter(), |sums| sums.count as f64);
    let top_hiring_company = first_max_by(companies.iter(), |count| *count as f64);
    let top_location = first_max_by(locations.iter(), |count| *count as f64);

    KeyInsights {
        top_paying_domain,
        top_hiring_domain,
        top_hiring_company,
        top_location,
        avg_internship_salary: overall.mean_avg().unwrap_or(0.0),
        total_companies: companies.len(),
        total_domains: domains.len(),
        total_listings: table.len(),
    }
}

/// Key with the largest score; the earliest wins ties.
fn first_max_by<'g, 'a: 'g, T: 'g>(
    groups: impl Iterator<Item = &'g (&'a str, T)>,
    score: impl Fn(&T) -> f64,
) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for (key, value) in groups {
        let s = score(value);
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((*key, s));
        }
    }
    best.map(|(key, _)| key.to_string())
}
