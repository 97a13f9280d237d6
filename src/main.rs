use anyhow::{Context, Result};
use budget_forecast::{BudgetPipeline, PipelineConfig};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) if path == "--schema" => {
            println!("{}", PipelineConfig::schema_as_json()?);
            return Ok(());
        }
        Some(path) => PipelineConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => PipelineConfig::default(),
    };

    let pipeline = BudgetPipeline::new(config).context("Invalid configuration")?;
    let summary = pipeline.run().context("Budget pipeline failed")?;

    println!(
        "Processed {} files ({} skipped): {} clean rows, {} sector forecasts",
        summary.files_processed,
        summary.files_skipped.len(),
        summary.clean_rows,
        summary.sectors_forecast
    );
    println!("Clean dataset: {}", summary.clean_path.display());
    println!("Forecast:      {}", summary.forecast_path.display());

    Ok(())
}
