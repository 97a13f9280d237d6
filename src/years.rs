use crate::config::DEFAULT_KNOWN_YEARS;
use crate::schema::RawValue;

/// Maps year-like cells (`"FY 2023-24"`, `2022`, `"2021-22"`) onto a closed,
/// ordered set of fiscal years. Years outside the set are never recognised.
#[derive(Debug, Clone, PartialEq)]
pub struct YearExtractor {
    known_years: Vec<(i32, String)>,
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new(&DEFAULT_KNOWN_YEARS)
    }
}

impl YearExtractor {
    pub fn new(known_years: &[i32]) -> Self {
        Self {
            known_years: known_years.iter().map(|y| (*y, y.to_string())).collect(),
        }
    }

    pub fn known_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.known_years.iter().map(|(year, _)| *year)
    }

    /// First known year (in set order) whose digits occur in the cell text.
    pub fn parse_year(&self, value: &RawValue) -> Option<i32> {
        let text = value.as_text()?;
        self.known_years
            .iter()
            .find(|(_, literal)| text.contains(literal.as_str()))
            .map(|(year, _)| *year)
    }
}
