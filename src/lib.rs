//! # Budget Forecast
//!
//! Turns a directory of heterogeneous government budget tables into one clean
//! dataset and a per-sector forecast of next year's allocation.
//!
//! ## Core Concepts
//!
//! - **Numeric normalization**: currency glyphs, thousands separators and crore
//!   units are stripped before parsing; junk cells become missing values
//! - **Column inference**: year, sector and ministry columns are found by
//!   keyword substrings in the headers; the allocation column is the densest
//!   numeric one
//! - **Closed year set**: years are recognised only from a configured list
//!   (2021-2024 by default)
//! - **Forecasting**: each sector's yearly totals feed an AR(1) fit; when the
//!   fit is rejected the last observed value is repeated
//!
//! ## Example
//!
//! ```rust,no_run
//! use budget_forecast::*;
//!
//! let config = PipelineConfig {
//!     raw_dir: "raw".into(),
//!     output_dir: "output".into(),
//!     ..Default::default()
//! };
//!
//! let summary = run_pipeline(config).unwrap();
//! println!("{} sectors forecast", summary.sectors_forecast);
//! ```

pub mod aggregate;
pub mod columns;
pub mod config;
pub mod error;
pub mod forecast;
pub mod ingestion;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod schema;
pub mod years;

pub use aggregate::{group_by_sector, sum_by_sector_year, SectorSeries};
pub use columns::{find_column, select_allocation_column, ColumnRef};
pub use config::{PipelineConfig, DEFAULT_KNOWN_YEARS};
pub use error::{BudgetError, FitError, Result};
pub use forecast::{forecast_all, forecast_next, forecast_sector, Ar1Fit, ForecastOutcome, SectorForecast};
pub use ingestion::{discover_files, TableReader};
pub use normalize::NumericNormalizer;
pub use output::{write_clean_dataset, write_forecasts, CLEAN_HEADERS, FORECAST_HEADERS};
pub use pipeline::{BudgetPipeline, PipelineOutput, RunSummary};
pub use processor::{FileProcessor, InferredColumns, ProcessedTable};
pub use schema::*;
pub use years::YearExtractor;

pub fn run_pipeline(config: PipelineConfig) -> Result<RunSummary> {
    BudgetPipeline::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_processing() {
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(
            raw.path().join("a.csv"),
            "Year,Sector,Amount(Rs Cr)\n2021,Health,₹100 cr\n2022,Health,150cr\n",
        )
        .unwrap();

        let config = PipelineConfig {
            raw_dir: raw.path().to_path_buf(),
            output_dir: out.path().join("output"),
            ..Default::default()
        };
        let summary = run_pipeline(config).unwrap();

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.clean_rows, 2);
        assert_eq!(summary.sectors_forecast, 1);
        assert_eq!(summary.fallbacks, 1);
        assert!(summary.clean_path.exists());
        assert!(summary.forecast_path.exists());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PipelineConfig {
            known_years: vec![],
            ..Default::default()
        };
        assert!(matches!(
            BudgetPipeline::new(config),
            Err(BudgetError::InvalidConfig(_))
        ));
    }
}
