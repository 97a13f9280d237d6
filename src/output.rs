use crate::error::Result;
use crate::schema::{CleanRecord, ForecastRecord};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const CLEAN_HEADERS: [&str; 4] = ["Year", "Sector", "Ministry", "Allocation_Cr"];
pub const FORECAST_HEADERS: [&str; 3] = ["Sector", "Next_Year", "Predicted_Allocation_Cr"];

/// Headers are written explicitly so an empty dataset still gets its header row.
fn write_rows<W: Write, T: Serialize>(writer: W, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_clean_dataset<W: Write>(writer: W, records: &[CleanRecord]) -> Result<()> {
    write_rows(writer, &CLEAN_HEADERS, records)
}

pub fn write_forecasts<W: Write>(writer: W, forecasts: &[ForecastRecord]) -> Result<()> {
    write_rows(writer, &FORECAST_HEADERS, forecasts)
}

pub fn write_clean_dataset_file(path: &Path, records: &[CleanRecord]) -> Result<()> {
    write_clean_dataset(std::fs::File::create(path)?, records)
}

pub fn write_forecasts_file(path: &Path, forecasts: &[ForecastRecord]) -> Result<()> {
    write_forecasts(std::fs::File::create(path)?, forecasts)
}
