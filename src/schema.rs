use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single cell as read from an input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Missing,
    Text(String),
    Number(f64),
}

impl RawValue {
    /// Text rendering used by the normalizer and the year extractor.
    /// Integral numbers render without a fractional part (`2021.0` -> `"2021"`).
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Missing => None,
            RawValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            RawValue::Number(value) => Some(Cow::Owned(value.to_string())),
        }
    }

    /// Categorical value for the Sector/Ministry fields.
    pub fn as_label(&self) -> Option<String> {
        self.as_text().map(Cow::into_owned)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Missing, Into::into)
    }
}

/// One input file held in memory: header names in file order and
/// rectangular rows (every row has exactly `headers.len()` cells).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    /// Builds a table, padding short rows with missing cells and
    /// truncating long ones.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, RawValue::Missing);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &RawValue> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }
}

/// A standardized budget line. `year` and `allocation_cr` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Sector")]
    pub sector: Option<String>,
    #[serde(rename = "Ministry")]
    pub ministry: Option<String>,
    #[serde(rename = "Allocation_Cr")]
    pub allocation_cr: f64,
}

/// Grouping key for sectors. A missing sector is its own group and
/// orders after every named sector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectorKey {
    Named(String),
    Missing,
}

impl SectorKey {
    pub fn name(&self) -> Option<&str> {
        match self {
            SectorKey::Named(name) => Some(name.as_str()),
            SectorKey::Missing => None,
        }
    }
}

impl From<Option<&str>> for SectorKey {
    fn from(sector: Option<&str>) -> Self {
        sector.map_or(SectorKey::Missing, |name| SectorKey::Named(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorYearTotal {
    pub sector: SectorKey,
    pub year: i32,
    pub sum_allocation_cr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(rename = "Sector")]
    pub sector: Option<String>,
    #[serde(rename = "Next_Year")]
    pub next_year: i32,
    #[serde(rename = "Predicted_Allocation_Cr")]
    pub predicted_allocation_cr: f64,
}
