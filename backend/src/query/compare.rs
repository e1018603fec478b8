//! Side-by-side statistics for two job titles.

use super::{value_counts, SalarySums};
use crate::error::{QueryError, QueryResult};
use crate::models::{DomainComparison, DomainSummary, RankedCounts, Table};

/// Companies and locations listed per compared domain.
pub const TOP_N: usize = 5;

/// Error message when either domain is missing.
pub const MISSING_DOMAINS: &str = "Both domains are required for comparison";

/// Compare two job titles.
///
/// Both must be present and non-empty, otherwise
/// [`QueryError::MissingParameter`]. A title with no listings yields a zero
/// count and `None` means.
pub fn compare_domains(
    table: &Table,
    domain1: Option<&str>,
    domain2: Option<&str>,
) -> QueryResult<DomainComparison> {
    match (non_empty(domain1), non_empty(domain2)) {
        (Some(d1), Some(d2)) => Ok(DomainComparison {
            domain1: summarize_domain(table, d1),
            domain2: summarize_domain(table, d2),
        }),
        _ => Err(QueryError::MissingParameter(MISSING_DOMAINS.to_string())),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Statistics for the listings with exactly this job title.
pub fn summarize_domain(table: &Table, domain: &str) -> DomainSummary {
    let rows: Vec<_> = table.iter().filter(|l| l.job_title == domain).collect();

    let mut sums = SalarySums::default();
    for listing in &rows {
        sums.add(listing);
    }

    let top = |counts: Vec<(&str, usize)>| {
        RankedCounts(
            counts
                .into_iter()
                .take(TOP_N)
                .map(|(k, c)| (k.to_string(), c))
                .collect(),
        )
    };

    DomainSummary {
        name: domain.to_string(),
        count: rows.len(),
        avg_salary: sums.mean_avg(),
        min_salary: sums.mean_min(),
        max_salary: sums.mean_max(),
        top_companies: top(value_counts(rows.iter().map(|l| l.company.as_str()))),
        top_locations: top(value_counts(rows.iter().map(|l| l.location.as_str()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;
    use crate::query::fixtures::sample_table;

    #[test]
    fn test_compare_two_domains() {
        let table = sample_table();
        let cmp = compare_domains(&table, Some("Web Development"), Some("Data Science")).unwrap();

        assert_eq!(cmp.domain1.name, "Web Development");
        assert_eq!(cmp.domain1.count, 3);
        assert_eq!(cmp.domain1.top_companies.0, vec![("Acme".to_string(), 2), ("Globex".to_string(), 1)]);
        assert_eq!(cmp.domain1.top_locations.get("Bangalore"), Some(2));

        assert_eq!(cmp.domain2.count, 2);
        assert_eq!(cmp.domain2.avg_salary, Some(15000.0));
        assert_eq!(cmp.domain2.min_salary, Some(11000.0));
        assert_eq!(cmp.domain2.max_salary, Some(19000.0));
    }

    #[test]
    fn test_missing_domain() {
        let table = sample_table();

        let err = compare_domains(&table, Some(""), Some("X")).unwrap_err();
        assert_eq!(err, QueryError::MissingParameter(MISSING_DOMAINS.to_string()));

        assert!(compare_domains(&table, Some("X"), None).is_err());
        assert!(compare_domains(&table, None, None).is_err());
    }

    #[test]
    fn test_unknown_domain_has_no_means() {
        let cmp = compare_domains(&sample_table(), Some("Astronomy"), Some("Marketing")).unwrap();

        assert_eq!(cmp.domain1.count, 0);
        assert_eq!(cmp.domain1.avg_salary, None);
        assert!(cmp.domain1.top_companies.is_empty());

        let json = serde_json::to_value(&cmp).unwrap();
        assert!(json["domain1"]["avg_salary"].is_null());
        assert_eq!(json["domain2"]["top_locations"]["Work From Home"], 1);
    }

    #[test]
    fn test_top_companies_capped() {
        let table: Table = (0..8)
            .map(|i| Listing::new("Dev", format!("Company {i}"), "Pune", 0.0, 0.0, 0.0))
            .collect();

        let summary = summarize_domain(&table, "Dev");
        assert_eq!(summary.count, 8);
        assert_eq!(summary.top_companies.len(), TOP_N);
        assert_eq!(summary.top_companies.0[0].0, "Company 0");
    }
}
