//! Listing counts per job title, city and company, and distinct value lists.

use super::{distinct, value_counts};
use crate::models::{CityCount, CompanyCount, DomainCount, Table};

/// Most frequent job titles.
pub fn top_domains(table: &Table, limit: usize) -> Vec<DomainCount> {
    value_counts(table.iter().map(|l| l.job_title.as_str()))
        .into_iter()
        .take(limit)
        .map(|(domain, count)| DomainCount {
            domain: domain.to_string(),
            count,
        })
        .collect()
}

/// Cities with the most listings.
pub fn jobs_by_city(table: &Table, limit: usize) -> Vec<CityCount> {
    value_counts(table.iter().map(|l| l.location.as_str()))
        .into_iter()
        .take(limit)
        .map(|(city, count)| CityCount {
            city: city.to_string(),
            count,
        })
        .collect()
}

/// Companies with the most listings.
pub fn company_hiring(table: &Table, limit: usize) -> Vec<CompanyCount> {
    value_counts(table.iter().map(|l| l.company.as_str()))
        .into_iter()
        .take(limit)
        .map(|(company, count)| CompanyCount {
            company: company.to_string(),
            count,
        })
        .collect()
}

/// Every job title, once, in the order first seen.
pub fn all_domains(table: &Table) -> Vec<String> {
    distinct(table.iter().map(|l| l.job_title.as_str()))
}

/// Every location, once, in the order first seen.
pub fn all_locations(table: &Table) -> Vec<String> {
    distinct(table.iter().map(|l| l.location.as_str()))
}
