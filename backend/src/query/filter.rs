//! Subsets of the table by job title, location and minimum salary.

use crate::error::{QueryError, QueryResult};
use crate::models::{Listing, Table};

/// Filter value meaning "do not filter on this field".
pub const ALL: &str = "All";

/// Optional filters, as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub domain: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<String>,
}

/// First value of `name` among decoded query pairs; repeats are ignored.
pub fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
}

impl FilterParams {
    /// Filters from decoded query pairs, first value wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        FilterParams {
            domain: first_value(pairs, "domain"),
            location: first_value(pairs, "location"),
            min_salary: first_value(pairs, "min_salary"),
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn min_salary(mut self, min_salary: impl Into<String>) -> Self {
        self.min_salary = Some(min_salary.into());
        self
    }
}

/// Absent, empty and `"All"` all mean no constraint.
fn selected(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL)
}

fn parse_min_salary(value: &Option<String>) -> QueryResult<Option<f64>> {
    match value.as_deref().filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| QueryError::InvalidParameter {
                name: "min_salary".to_string(),
                value: raw.to_string(),
            }),
    }
}

/// Listings matching every given filter, in table order.
///
/// Fails with [`QueryError::InvalidParameter`] when `min_salary` is not a number.
pub fn filter_listings<'a>(table: &'a Table, params: &FilterParams) -> QueryResult<Vec<&'a Listing>> {
    let domain = selected(&params.domain);
    let location = selected(&params.location);
    let min_salary = parse_min_salary(&params.min_salary)?;

    Ok(table
        .iter()
        .filter(|l| domain.map_or(true, |d| l.job_title == d))
        .filter(|l| location.map_or(true, |loc| l.location == loc))
        .filter(|l| min_salary.map_or(true, |min| l.avg_salary >= min))
        .collect())
}
