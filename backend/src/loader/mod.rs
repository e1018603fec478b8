//! Load a listings CSV into a cleaned, immutable [`Table`].
//!
//! Cleaning, in order:
//!
//! 1. Empty salary cells become 0.
//! 2. Salary cells that are not finite numbers become 0.
//! 3. A zero `avg_salary` is replaced by the midpoint of `min_salary` and
//!    `max_salary` when both are positive.
//! 4. `Location` keeps only the part before the first comma, trimmed.
//! 5. `Job Title` is trimmed.

use std::collections::BTreeMap;
use std::path::Path;

use crate::api::logs::{log_error, log_info, log_success};
use crate::error::{LoadError, LoadResult};
use crate::models::{Listing, Table};
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult};

pub const JOB_TITLE: &str = "Job Title";
pub const COMPANY: &str = "Company";
pub const LOCATION: &str = "Location";
pub const MIN_SALARY: &str = "min_salary";
pub const MAX_SALARY: &str = "max_salary";
pub const AVG_SALARY: &str = "avg_salary";

/// Columns a listings CSV must have.
pub const REQUIRED_COLUMNS: [&str; 6] = [JOB_TITLE, COMPANY, LOCATION, MIN_SALARY, MAX_SALARY, AVG_SALARY];

/// A loaded table together with what the parser detected.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub table: Table,
    pub encoding: String,
    pub delimiter: char,
    pub columns: Vec<String>,
}

/// Load a listings CSV, degrading to an empty table on any failure.
///
/// The failure is logged rather than returned, so every query still has a
/// table to run against.
pub fn load<P: AsRef<Path>>(path: P) -> Table {
    let path = path.as_ref();
    match try_load(path) {
        Ok(table) => table,
        Err(e) => {
            log_error(format!("Error loading data from {}: {}", path.display(), e));
            Table::empty()
        }
    }
}

/// Load a listings CSV, returning the failure to the caller.
pub fn try_load<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    load_report(path).map(|report| report.table)
}

/// Load a listings CSV and keep the detected encoding, delimiter and columns.
pub fn load_report<P: AsRef<Path>>(path: P) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    log_info(format!("Loading listings from {}", path.display()));

    let parsed = parse_csv_file_auto(path)?;
    let report = build_report(parsed)?;

    log_success(format!("Successfully loaded data with {} records", report.table.len()));
    Ok(report)
}

/// Load listings from raw CSV bytes.
pub fn load_bytes(bytes: &[u8]) -> LoadResult<Table> {
    let parsed = parse_bytes_auto(bytes)?;
    from_parsed(&parsed)
}

/// Map parsed CSV rows to cleaned listings.
pub fn from_parsed(parsed: &ParseResult) -> LoadResult<Table> {
    let columns = ColumnIndex::resolve(parsed)?;
    Ok(parsed.rows.iter().map(|row| columns.listing(row)).collect())
}

fn build_report(parsed: ParseResult) -> LoadResult<LoadReport> {
    let table = from_parsed(&parsed)?;
    Ok(LoadReport {
        table,
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        columns: parsed.headers,
    })
}

/// Positions of the interpreted columns in a parsed file.
struct ColumnIndex {
    job_title: usize,
    company: usize,
    location: usize,
    min_salary: usize,
    max_salary: usize,
    avg_salary: usize,
    extra: Vec<(usize, String)>,
}

impl ColumnIndex {
    fn resolve(parsed: &ParseResult) -> LoadResult<Self> {
        let find = |name: &str| {
            parsed
                .column(name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let extra = parsed
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty() && !REQUIRED_COLUMNS.contains(&h.as_str()))
            .map(|(i, h)| (i, h.clone()))
            .collect();

        Ok(Self {
            job_title: find(JOB_TITLE)?,
            company: find(COMPANY)?,
            location: find(LOCATION)?,
            min_salary: find(MIN_SALARY)?,
            max_salary: find(MAX_SALARY)?,
            avg_salary: find(AVG_SALARY)?,
            extra,
        })
    }

    fn listing(&self, row: &[String]) -> Listing {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let min_salary = parse_salary(cell(self.min_salary));
        let max_salary = parse_salary(cell(self.max_salary));
        let avg_salary = derive_avg_salary(min_salary, max_salary, parse_salary(cell(self.avg_salary)));

        let extra: BTreeMap<String, String> = self
            .extra
            .iter()
            .map(|(i, name)| (name.clone(), cell(*i).to_string()))
            .collect();

        Listing {
            job_title: cell(self.job_title).trim().to_string(),
            company: cell(self.company).to_string(),
            location: primary_location(cell(self.location)),
            min_salary,
            max_salary,
            avg_salary,
            extra,
        }
    }
}

/// Parse a salary cell. Empty, non-numeric and non-finite values become 0.
pub fn parse_salary(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Midpoint of the bounds when the average is missing and both bounds are known.
pub fn derive_avg_salary(min_salary: f64, max_salary: f64, avg_salary: f64) -> f64 {
    if avg_salary == 0.0 && min_salary > 0.0 && max_salary > 0.0 {
        min_salary / 2.0 + max_salary / 2.0
    } else {
        avg_salary
    }
}

/// `"Bangalore, Karnataka"` -> `"Bangalore"`.
pub fn primary_location(raw: &str) -> String {
    raw.split(',').next().unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Job Title,Company,Location,min_salary,max_salary,avg_salary";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cleaning_round_trip() {
        let csv = format!("{HEADER}\nA ,Acme,\"X, Y\",10,20,0\n");
        let table = load_bytes(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        let listing = &table.listings()[0];
        assert_eq!(listing.job_title, "A");
        assert_eq!(listing.location, "X");
        assert_eq!(listing.avg_salary, 15.0);
        assert_eq!(listing.min_salary, 10.0);
        assert_eq!(listing.max_salary, 20.0);
    }

    #[test]
    fn test_missing_and_non_numeric_salaries_become_zero() {
        let csv = format!("{HEADER}\nDev,Acme,Pune,,abc,\nOps,Beta,Delhi,NaN,inf,12\n");
        let table = load_bytes(csv.as_bytes()).unwrap();

        let first = &table.listings()[0];
        assert_eq!((first.min_salary, first.max_salary, first.avg_salary), (0.0, 0.0, 0.0));

        let second = &table.listings()[1];
        assert_eq!((second.min_salary, second.max_salary, second.avg_salary), (0.0, 0.0, 12.0));
    }

    #[test]
    fn test_avg_not_derived_when_present_or_bound_missing() {
        assert_eq!(derive_avg_salary(10.0, 20.0, 18.0), 18.0);
        assert_eq!(derive_avg_salary(0.0, 20.0, 0.0), 0.0);
        assert_eq!(derive_avg_salary(10.0, 0.0, 0.0), 0.0);
        assert_eq!(derive_avg_salary(5000.0, 10000.0, 0.0), 7500.0);
    }

    #[test]
    fn test_derived_avg_stays_finite_for_huge_bounds() {
        let csv = format!("{HEADER}\nA,B,C,1e308,1.5e308,0\n");
        let table = load_bytes(csv.as_bytes()).unwrap();

        let avg = table.listings()[0].avg_salary;
        assert!(avg.is_finite());
        assert!((avg - 1.25e308).abs() < 1e295);

        let json = serde_json::to_value(&table.listings()[0]).unwrap();
        assert!(json["avg_salary"].is_f64());
    }

    #[test]
    fn test_utf8_names_not_redecoded() {
        let csv = format!("{HEADER}\nWeb Development,Zoë Labs,Pune,1,2,0\n");
        let table = load_bytes(csv.as_bytes()).unwrap();
        assert_eq!(table.listings()[0].company, "Zoë Labs");

        let file = write_csv(&format!("\u{feff}{HEADER}\nDéveloppeur,Société Générale,Paris,1,2,0\n"));
        let report = load_report(file.path()).unwrap();
        assert_eq!(report.encoding, "utf-8");
        assert_eq!(report.table.listings()[0].job_title, "Développeur");
        assert_eq!(report.table.listings()[0].company, "Société Générale");
    }

    #[test]
    fn test_delimiter_only_row_kept() {
        let csv = format!("{HEADER}\nDev,Acme,Pune,1,2,0\n,,,,,\n");
        let table = load_bytes(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let blank = &table.listings()[1];
        assert_eq!(blank.job_title, "");
        assert_eq!(blank.company, "");
        assert_eq!((blank.min_salary, blank.max_salary, blank.avg_salary), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_primary_location() {
        assert_eq!(primary_location("Bangalore, Karnataka"), "Bangalore");
        assert_eq!(primary_location("  Work From Home "), "Work From Home");
        assert_eq!(primary_location(""), "");
        assert_eq!(primary_location(",Mumbai"), "");
    }

    #[test]
    fn test_extra_columns_carried() {
        let csv = "Job Title,Duration,Company,Location,min_salary,max_salary,avg_salary\n\
                   Dev,6 Months,Acme,Pune,1,2,0\n";
        let table = load_bytes(csv.as_bytes()).unwrap();

        let listing = &table.listings()[0];
        assert_eq!(listing.extra.get("Duration").map(String::as_str), Some("6 Months"));
        assert_eq!(listing.extra.len(), 1);
        assert_eq!(listing.avg_salary, 1.5);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Job Title,Company,min_salary,max_salary,avg_salary\nDev,Acme,1,2,3\n";
        let err = load_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Location"));
    }

    #[test]
    fn test_load_from_file() {
        let file = write_csv(&format!("{HEADER}\nDev,Acme,Pune,100,200,150\nQA,Beta,Delhi,,,\n"));

        let report = load_report(file.path()).unwrap();
        assert_eq!(report.table.len(), 2);
        assert_eq!(report.delimiter, ',');
        assert_eq!(report.columns.len(), 6);

        assert_eq!(load(file.path()).len(), 2);
    }

    #[test]
    fn test_load_missing_file_degrades_to_empty() {
        let table = load("/no/such/dir/CleanedData.csv");
        assert!(table.is_empty());
        assert!(try_load("/no/such/dir/CleanedData.csv").is_err());
    }

    #[test]
    fn test_load_malformed_file_degrades_to_empty() {
        let file = write_csv("this is not,a listings file\n1,2\n");
        assert!(load(file.path()).is_empty());
    }
}
