use crate::config::PipelineConfig;
use crate::error::{BudgetError, Result};
use crate::schema::RawValue;
use regex::{Regex, RegexBuilder};

/// Turns currency-formatted cells (`"₹1,234.5 Cr"`) into plain numbers.
#[derive(Debug, Clone)]
pub struct NumericNormalizer {
    symbols: Vec<String>,
    units: Vec<Regex>,
}

impl Default for NumericNormalizer {
    fn default() -> Self {
        Self::new(&["₹", ","], &["crore", "cr"]).expect("default unit patterns are valid")
    }
}

impl NumericNormalizer {
    /// Units are matched case-insensitively and stripped longest-first, so
    /// `"crore"` is never reduced to a dangling `"e"` by `"cr"`.
    pub fn new<S: AsRef<str>, U: AsRef<str>>(symbols: &[S], units: &[U]) -> Result<Self> {
        let mut ordered: Vec<&str> = units.iter().map(AsRef::as_ref).collect();
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let units = ordered
            .into_iter()
            .map(|unit| {
                RegexBuilder::new(&regex::escape(unit))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        BudgetError::InvalidConfig(format!("unit suffix '{}': {}", unit, e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            symbols: symbols.iter().map(|s| s.as_ref().to_string()).collect(),
            units,
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(&config.currency_symbols, &config.unit_suffixes)
    }

    pub fn normalize_value(&self, value: &RawValue) -> Option<f64> {
        match value {
            RawValue::Missing => None,
            RawValue::Number(n) => n.is_finite().then_some(*n),
            RawValue::Text(text) => self.parse_text(text),
        }
    }

    /// Normalizes a column. Output has the same length and order as the input;
    /// anything that does not parse becomes `None`.
    pub fn normalize<'a, I>(&self, values: I) -> Vec<Option<f64>>
    where
        I: IntoIterator<Item = &'a RawValue>,
    {
        values.into_iter().map(|v| self.normalize_value(v)).collect()
    }

    pub fn parse_text(&self, text: &str) -> Option<f64> {
        let mut cleaned = text.to_string();
        for symbol in &self.symbols {
            cleaned = cleaned.replace(symbol.as_str(), "");
        }
        for unit in &self.units {
            cleaned = unit.replace_all(&cleaned, "").into_owned();
        }

        cleaned
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }
}
