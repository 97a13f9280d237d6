use crate::aggregate::{group_by_sector, sum_by_sector_year};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::forecast::{forecast_all, SectorForecast};
use crate::ingestion::discover_files;
use crate::output::{write_clean_dataset_file, write_forecasts_file};
use crate::processor::FileProcessor;
use crate::schema::{CleanRecord, ForecastRecord};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: Vec<PathBuf>,
    pub clean_rows: usize,
    pub rows_dropped: usize,
    pub sectors_forecast: usize,
    pub fitted: usize,
    pub fallbacks: usize,
    pub clean_path: PathBuf,
    pub forecast_path: PathBuf,
}

/// In-memory result of a run, before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub clean: Vec<CleanRecord>,
    pub forecasts: Vec<SectorForecast>,
}

impl PipelineOutput {
    pub fn forecast_records(&self) -> Vec<ForecastRecord> {
        self.forecasts.iter().map(|f| f.record.clone()).collect()
    }
}

pub struct BudgetPipeline {
    config: PipelineConfig,
    processor: FileProcessor,
}

impl BudgetPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let config = config.validated()?;
        let processor = FileProcessor::new(&config)?;
        Ok(Self { config, processor })
    }

    /// Creates the output directory. Called once at the start of `run`.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        Ok(())
    }

    /// Reads, standardizes and forecasts every discovered file without
    /// touching the output directory.
    pub fn build(&self) -> Result<(PipelineOutput, RunSummary)> {
        let files = discover_files(&self.config.raw_dir, &self.config.file_pattern)?;
        info!(
            "Found {} input files in {}",
            files.len(),
            self.config.raw_dir.display()
        );
        if files.is_empty() {
            warn!("No input files matched; outputs will contain headers only");
        }

        let mut summary = RunSummary {
            clean_path: self.config.clean_path(),
            forecast_path: self.config.forecast_path(),
            ..Default::default()
        };
        let mut clean = Vec::new();

        for path in files {
            let processed = match self.processor.process_file(&path) {
                Ok(processed) => processed,
                Err(e) if self.config.skip_unreadable_files => {
                    warn!("Skipping {}: {}", path.display(), e);
                    summary.files_skipped.push(path);
                    continue;
                }
                Err(e) => return Err(e),
            };

            debug!(
                "{}: kept {} of {} rows",
                path.display(),
                processed.records.len(),
                processed.rows_read
            );
            summary.files_processed += 1;
            summary.rows_dropped += processed.rows_dropped();
            clean.extend(processed.records);
        }

        let totals = sum_by_sector_year(&clean);
        let forecasts = forecast_all(&group_by_sector(&totals));

        summary.clean_rows = clean.len();
        summary.sectors_forecast = forecasts.len();
        summary.fallbacks = forecasts.iter().filter(|f| f.outcome.is_fallback()).count();
        summary.fitted = summary.sectors_forecast - summary.fallbacks;

        Ok((PipelineOutput { clean, forecasts }, summary))
    }

    pub fn run(&self) -> Result<RunSummary> {
        self.init()?;
        let (output, summary) = self.build()?;

        write_clean_dataset_file(&summary.clean_path, &output.clean)?;
        write_forecasts_file(&summary.forecast_path, &output.forecast_records())?;

        info!(
            "Wrote {} clean rows to {} and {} sector forecasts ({} fitted, {} fallback) to {}",
            summary.clean_rows,
            summary.clean_path.display(),
            summary.sectors_forecast,
            summary.fitted,
            summary.fallbacks,
            summary.forecast_path.display()
        );

        Ok(summary)
    }
}
