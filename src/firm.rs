//! Disclosed firm data loaded from a CSV export of the adviser spreadsheet.
//!
//! The export is expected to carry one row per firm with the column headers
//! used by the regulatory filing extract (`Firm Name`, `Main Office City`,
//! `Total AUM`, ...). Columns not listed on [`FirmRecord`] are ignored.

use crate::error::{ReportError, Result};
use crate::utils::{format_currency, format_thousands};
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmRecord {
    #[serde(rename = "Firm Name")]
    pub name: String,

    #[serde(rename = "Main Office City", default)]
    pub city: Option<String>,

    #[serde(rename = "Main Office Country", default)]
    pub country: Option<String>,

    #[serde(rename = "Discretionary AUM", default, deserialize_with = "de_number")]
    pub discretionary_aum: Option<f64>,

    #[serde(rename = "Non-Discretionary AUM", default, deserialize_with = "de_number")]
    pub non_discretionary_aum: Option<f64>,

    #[serde(rename = "Total AUM", default, deserialize_with = "de_number")]
    pub total_aum: Option<f64>,

    #[serde(rename = "Total Employees", default, deserialize_with = "de_number")]
    pub total_employees: Option<u64>,

    #[serde(
        rename = "Investment Advisory Employees",
        default,
        deserialize_with = "de_number"
    )]
    pub advisory_employees: Option<u64>,
}

impl FirmRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: None,
            country: None,
            discretionary_aum: None,
            non_discretionary_aum: None,
            total_aum: None,
            total_employees: None,
            advisory_employees: None,
        }
    }

    /// `"City, Country"`, or whichever half is known.
    pub fn location(&self) -> Option<String> {
        match (non_blank(&self.city), non_blank(&self.country)) {
            (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(country)) => Some(country.to_string()),
            (None, None) => None,
        }
    }

    /// Labelled disclosed fields in display order; unknown values are skipped.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = Vec::new();

        if let Some(location) = self.location() {
            lines.push(("Home office location", location));
        }
        if let Some(value) = self.discretionary_aum {
            lines.push(("Discretionary AUM", format_currency(value)));
        }
        if let Some(value) = self.non_discretionary_aum {
            lines.push(("Non-Discretionary AUM", format_currency(value)));
        }
        if let Some(value) = self.total_aum {
            lines.push(("Total AUM", format_currency(value)));
        }
        if let Some(count) = self.total_employees {
            lines.push(("Total employees", format_thousands(count as f64)));
        }
        if let Some(count) = self.advisory_employees {
            lines.push(("Investment advisory employees", format_thousands(count as f64)));
        }

        lines
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

// Spreadsheet exports often keep currency symbols and digit grouping.
fn de_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let cleaned = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(value)) => value.to_string(),
        Some(RawNumber::Text(value)) => value.trim().replace([',', '$'], ""),
        None => return Ok(None),
    };

    if cleaned.is_empty() {
        return Ok(None);
    }

    cleaned
        .parse::<T>()
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid number '{}': {}", cleaned, e)))
}

/// Firm records keyed by name, remembering file order for selection lists.
#[derive(Debug, Clone, Default)]
pub struct FirmDirectory {
    order: Vec<String>,
    records: HashMap<String, FirmRecord>,
}

impl FirmDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading firm data from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut directory = Self::new();
        for row in csv_reader.deserialize::<FirmRecord>() {
            let record = row?;
            if record.name.trim().is_empty() {
                debug!("Skipping firm row without a name");
                continue;
            }
            directory.insert(record);
        }

        info!("Loaded {} firms", directory.len());
        Ok(directory)
    }

    /// Adds or replaces a record. A replaced name keeps its original position.
    pub fn insert(&mut self, record: FirmRecord) {
        let name = record.name.clone();
        if self.records.insert(name.clone(), record).is_some() {
            warn!("Duplicate firm '{}': keeping the later row", name);
        } else {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FirmRecord> {
        self.records.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&FirmRecord> {
        self.get(name)
            .ok_or_else(|| ReportError::FirmNotFound(name.to_string()))
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FirmRecord> {
        self.order.iter().filter_map(|name| self.records.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Firm Name,Main Office City,Main Office Country,Discretionary AUM,Non-Discretionary AUM,Total AUM,Total Employees,Investment Advisory Employees,CRD Number
Acme Capital,Boston,United States,\"1,250,000,000\",,\"$1,300,000,000\",42,18,100001
Blue Harbor Advisors,Toronto,Canada,500000000,25000000,525000000,,,100002
";

    #[test]
    fn test_load_directory() {
        let directory = FirmDirectory::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.names(),
            &["Acme Capital".to_string(), "Blue Harbor Advisors".to_string()]
        );

        let acme = directory.get("Acme Capital").unwrap();
        assert_eq!(acme.discretionary_aum, Some(1_250_000_000.0));
        assert_eq!(acme.non_discretionary_aum, None);
        assert_eq!(acme.total_aum, Some(1_300_000_000.0));
        assert_eq!(acme.total_employees, Some(42));
        assert_eq!(acme.location().as_deref(), Some("Boston, United States"));

        let harbor = directory.get("Blue Harbor Advisors").unwrap();
        assert_eq!(harbor.total_employees, None);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let data = "Firm Name,Total AUM\nAcme Capital,lots\n";
        let err = FirmDirectory::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::Csv(_)));
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let data = "Firm Name,Total AUM\nAcme,1\nBeta,2\nAcme,3\n";
        let directory = FirmDirectory::from_reader(data.as_bytes()).unwrap();
        assert_eq!(directory.names(), &["Acme".to_string(), "Beta".to_string()]);
        assert_eq!(directory.get("Acme").unwrap().total_aum, Some(3.0));
    }

    #[test]
    fn test_require_missing_firm() {
        let directory = FirmDirectory::new();
        assert!(matches!(
            directory.require("Nobody"),
            Err(ReportError::FirmNotFound(_))
        ));
    }

    #[test]
    fn test_summary_lines() {
        let mut record = FirmRecord::new("Acme Capital");
        record.city = Some("Boston".to_string());
        record.total_aum = Some(1_300_000_000.0);
        record.total_employees = Some(1200);

        let lines = record.summary_lines();
        assert_eq!(
            lines,
            vec![
                ("Home office location", "Boston".to_string()),
                ("Total AUM", "$1,300,000,000".to_string()),
                ("Total employees", "1,200".to_string()),
            ]
        );
    }
}
