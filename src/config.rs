use crate::error::{BudgetError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const DEFAULT_KNOWN_YEARS: [i32; 4] = [2021, 2022, 2023, 2024];

const DEFAULT_NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct PipelineConfig {
    #[schemars(description = "Directory scanned for input tables")]
    pub raw_dir: PathBuf,

    #[schemars(description = "Directory receiving the clean dataset and the forecast")]
    pub output_dir: PathBuf,

    #[schemars(description = "Glob pattern, relative to raw_dir, selecting input files")]
    pub file_pattern: String,

    pub clean_file_name: String,

    pub forecast_file_name: String,

    #[schemars(
        description = "Ordered closed set of fiscal years recognised in year cells. The first year whose digits appear in a cell wins."
    )]
    pub known_years: Vec<i32>,

    #[schemars(description = "Lowercase substrings identifying the year column")]
    pub year_keywords: Vec<String>,

    #[schemars(description = "Lowercase substrings identifying the sector column")]
    pub sector_keywords: Vec<String>,

    #[schemars(description = "Lowercase substrings identifying the ministry column")]
    pub ministry_keywords: Vec<String>,

    #[schemars(description = "Literal glyphs removed from numeric cells (currency sign, thousands separator)")]
    pub currency_symbols: Vec<String>,

    #[schemars(
        description = "Unit substrings removed case-insensitively from numeric cells. Longer units are always stripped before shorter ones."
    )]
    pub unit_suffixes: Vec<String>,

    #[schemars(description = "Exact cell texts read as missing values")]
    pub na_values: Vec<String>,

    #[schemars(
        description = "If true, a file that cannot be read as a table is skipped with a warning instead of aborting the run"
    )]
    pub skip_unreadable_files: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("raw"),
            output_dir: PathBuf::from("output"),
            file_pattern: "*.csv".to_string(),
            clean_file_name: "union_budget_clean.csv".to_string(),
            forecast_file_name: "sector_forecast.csv".to_string(),
            known_years: DEFAULT_KNOWN_YEARS.to_vec(),
            year_keywords: strings(&["year", "fy", "fiscal"]),
            sector_keywords: strings(&["sector"]),
            ministry_keywords: strings(&["ministry", "department", "dept"]),
            currency_symbols: strings(&["₹", ","]),
            unit_suffixes: strings(&["crore", "cr"]),
            na_values: strings(&DEFAULT_NA_VALUES),
            skip_unreadable_files: false,
        }
    }
}

impl PipelineConfig {
    /// Loads a JSON config file. Absent fields take their defaults.
    /// The result is validated and keywords are lower-cased.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: PipelineConfig = serde_json::from_reader(reader)?;
        config.validated()
    }

    pub fn validated(mut self) -> Result<Self> {
        self.validate()?;
        for keywords in [
            &mut self.year_keywords,
            &mut self.sector_keywords,
            &mut self.ministry_keywords,
        ] {
            for keyword in keywords.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.known_years.is_empty() {
            return Err(BudgetError::InvalidConfig(
                "known_years must list at least one year".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(year) = self.known_years.iter().find(|y| !seen.insert(**y)) {
            return Err(BudgetError::InvalidConfig(format!(
                "known_years lists {} more than once",
                year
            )));
        }

        for (field, keywords) in [
            ("year_keywords", &self.year_keywords),
            ("sector_keywords", &self.sector_keywords),
            ("ministry_keywords", &self.ministry_keywords),
        ] {
            if keywords.is_empty() || keywords.iter().any(|k| k.is_empty()) {
                return Err(BudgetError::InvalidConfig(format!(
                    "{} must contain at least one non-empty keyword",
                    field
                )));
            }
        }

        if self.unit_suffixes.iter().any(|u| u.is_empty())
            || self.currency_symbols.iter().any(|s| s.is_empty())
        {
            return Err(BudgetError::InvalidConfig(
                "currency_symbols and unit_suffixes may not contain empty strings".to_string(),
            ));
        }

        if self.clean_file_name.trim().is_empty() || self.forecast_file_name.trim().is_empty() {
            return Err(BudgetError::InvalidConfig(
                "output file names may not be empty".to_string(),
            ));
        }

        if self.clean_file_name == self.forecast_file_name {
            return Err(BudgetError::InvalidConfig(
                "clean_file_name and forecast_file_name must differ".to_string(),
            ));
        }

        Ok(())
    }

    pub fn clean_path(&self) -> PathBuf {
        self.output_dir.join(&self.clean_file_name)
    }

    pub fn forecast_path(&self) -> PathBuf {
        self.output_dir.join(&self.forecast_file_name)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PipelineConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
