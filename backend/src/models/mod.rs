//! Domain models for the listings analytics service.
//!
//! - [`Listing`] - One cleaned job/internship record
//! - [`Table`] - The immutable, ordered collection of listings
//! - Aggregate records returned by the query layer ([`DomainCount`],
//!   [`SalaryRange`], [`DomainComparison`], [`KeyInsights`], ...)

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

// =============================================================================
// Listing
// =============================================================================

/// A single job or internship listing after cleaning.
///
/// Serializes with the source CSV headers so filtered rows look like the
/// records they were read from. Columns the service does not interpret are
/// kept in [`Listing::extra`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    pub min_salary: f64,
    pub max_salary: f64,
    pub avg_salary: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Listing {
    /// Create a listing with no extra columns.
    pub fn new(
        job_title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        min_salary: f64,
        max_salary: f64,
        avg_salary: f64,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            company: company.into(),
            location: location.into(),
            min_salary,
            max_salary,
            avg_salary,
            extra: BTreeMap::new(),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// Ordered, read-only collection of listings.
///
/// Built once by the loader and shared behind an `Arc`; nothing mutates it.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Table {
    listings: Vec<Listing>,
}

impl Table {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// The degraded-mode table used when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }
}

impl FromIterator<Listing> for Table {
    fn from_iter<I: IntoIterator<Item = Listing>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}

// =============================================================================
// Counts
// =============================================================================

/// Number of listings for one job title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

/// Number of listings in one city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Number of listings posted by one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyCount {
    pub company: String,
    pub count: usize,
}

/// Ranked `(value, count)` pairs that serialize as a JSON object in rank order.
///
/// `{"Google": 3, "Acme": 1}` rather than an array, keeping the ranking
/// even though JSON objects are unordered in general.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedCounts(pub Vec<(String, usize)>);

impl RankedCounts {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }
}

impl Serialize for RankedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

// =============================================================================
// Salaries
// =============================================================================

/// Mean advertised salary for one job title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainSalary {
    pub domain: String,
    pub avg_salary: f64,
}

/// Mean salary bounds for one job title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryRange {
    pub domain: String,
    pub min_salary: f64,
    pub max_salary: f64,
    pub avg_salary: f64,
}

// =============================================================================
// Comparison
// =============================================================================

/// Statistics for one side of a domain comparison.
///
/// Means are `None` when no listing has this job title.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DomainSummary {
    pub name: String,
    pub count: usize,
    pub avg_salary: Option<f64>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub top_companies: RankedCounts,
    pub top_locations: RankedCounts,
}

/// Side-by-side statistics for two job titles.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DomainComparison {
    pub domain1: DomainSummary,
    pub domain2: DomainSummary,
}

// =============================================================================
// Key Insights
// =============================================================================

/// Dataset-wide summary.
///
/// Every `Option` is `None` and every number is zero for an empty table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyInsights {
    pub top_paying_domain: Option<String>,
    pub top_hiring_domain: Option<String>,
    pub top_hiring_company: Option<String>,
    pub top_location: Option<String>,
    pub avg_internship_salary: f64,
    pub total_companies: usize,
    pub total_domains: usize,
    pub total_listings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_uses_source_headers() {
        let mut listing = Listing::new("Data Science", "Acme", "Pune", 1000.0, 3000.0, 2000.0);
        listing.extra.insert("Duration".into(), "3 Months".into());

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["Job Title"], "Data Science");
        assert_eq!(json["Company"], "Acme");
        assert_eq!(json["Location"], "Pune");
        assert_eq!(json["avg_salary"], 2000.0);
        assert_eq!(json["Duration"], "3 Months");
    }

    #[test]
    fn test_ranked_counts_keep_rank_order() {
        let counts = RankedCounts(vec![("Zeta".into(), 5), ("Alpha".into(), 2)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"Zeta":5,"Alpha":2}"#);
        assert_eq!(counts.get("Alpha"), Some(2));
        assert_eq!(counts.get("Beta"), None);
    }

    #[test]
    fn test_table_from_iter() {
        let table: Table = vec![
            Listing::new("A", "X", "P", 0.0, 0.0, 0.0),
            Listing::new("B", "Y", "Q", 0.0, 0.0, 0.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.listings()[1].job_title, "B");
        assert!(Table::empty().is_empty());
    }

    #[test]
    fn test_empty_insights_serialize_nulls() {
        let json = serde_json::to_value(KeyInsights::default()).unwrap();
        assert!(json["top_paying_domain"].is_null());
        assert_eq!(json["total_listings"], 0);
        assert_eq!(json["avg_internship_salary"], 0.0);
    }
}
