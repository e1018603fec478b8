//! Salary means grouped by job title.

use super::{Groups, SalarySums};
use crate::models::{DomainSalary, SalaryRange, Table};

fn by_domain(table: &Table) -> Groups<'_, SalarySums> {
    let mut groups: Groups<'_, SalarySums> = Groups::new();
    for listing in table {
        groups.entry(listing.job_title.as_str()).add(listing);
    }
    groups
}

/// Job titles with the highest mean `avg_salary`.
pub fn salary_insights(table: &Table, limit: usize) -> Vec<DomainSalary> {
    let mut means: Vec<DomainSalary> = by_domain(table)
        .into_vec()
        .into_iter()
        .filter_map(|(domain, sums)| {
            sums.mean_avg().map(|avg_salary| DomainSalary {
                domain: domain.to_string(),
                avg_salary,
            })
        })
        .collect();

    means.sort_by(|a, b| b.avg_salary.total_cmp(&a.avg_salary));
    means.truncate(limit);
    means
}

/// Mean min, max and average salary for every job title.
pub fn salary_ranges(table: &Table) -> Vec<SalaryRange> {
    by_domain(table)
        .into_vec()
        .into_iter()
        .filter_map(|(domain, sums)| {
            Some(SalaryRange {
                domain: domain.to_string(),
                min_salary: sums.mean_min()?,
                max_salary: sums.mean_max()?,
                avg_salary: sums.mean_avg()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;
    use crate::query::all_domains;
    use crate::query::fixtures::sample_table;
    use crate::query::DEFAULT_LIMIT;

    #[test]
    fn test_salary_insights_sorted_by_mean() {
        let insights = salary_insights(&sample_table(), DEFAULT_LIMIT);

        let names: Vec<_> = insights.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(names, vec!["Data Science", "Graphic Design", "Web Development", "Marketing"]);
        assert_eq!(insights[0].avg_salary, 15000.0);
        assert!((insights[2].avg_salary - 14500.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_salary_insights_limit_and_ties() {
        let table: Table = vec![
            Listing::new("B", "X", "P", 0.0, 0.0, 100.0),
            Listing::new("A", "X", "P", 0.0, 0.0, 100.0),
            Listing::new("C", "X", "P", 0.0, 0.0, 50.0),
        ]
        .into_iter()
        .collect();

        let insights = salary_insights(&table, 2);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].domain, "B");
        assert_eq!(insights[1].domain, "A");
    }

    #[test]
    fn test_salary_ranges_one_row_per_domain() {
        let table = sample_table();
        let ranges = salary_ranges(&table);

        let domains: Vec<_> = ranges.iter().map(|r| r.domain.clone()).collect();
        assert_eq!(domains, all_domains(&table));

        let web = &ranges[0];
        assert_eq!(web.domain, "Web Development");
        assert!((web.min_salary - 10000.0 / 3.0).abs() < 1e-9);
        assert!((web.max_salary - 19000.0 / 3.0).abs() < 1e-9);

        let data = &ranges[1];
        assert_eq!(data.min_salary, 11000.0);
        assert_eq!(data.max_salary, 19000.0);
        assert_eq!(data.avg_salary, 15000.0);
    }

    #[test]
    fn test_empty_table() {
        assert!(salary_insights(&Table::empty(), DEFAULT_LIMIT).is_empty());
        assert!(salary_ranges(&Table::empty()).is_empty());
    }
}
