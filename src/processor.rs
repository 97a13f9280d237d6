use crate::columns::{find_column, select_allocation_column, ColumnRef};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ingestion::TableReader;
use crate::normalize::NumericNormalizer;
use crate::schema::{CleanRecord, RawTable};
use crate::years::YearExtractor;
use log::debug;
use std::path::Path;

/// Which source columns fed each semantic field of one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InferredColumns {
    pub year: Option<String>,
    pub sector: Option<String>,
    pub ministry: Option<String>,
    pub allocation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTable {
    pub records: Vec<CleanRecord>,
    pub columns: InferredColumns,
    pub rows_read: usize,
}

impl ProcessedTable {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.records.len()
    }
}

/// Standardizes one heterogeneous table into `CleanRecord`s.
pub struct FileProcessor {
    reader: TableReader,
    normalizer: NumericNormalizer,
    years: YearExtractor,
    year_keywords: Vec<String>,
    sector_keywords: Vec<String>,
    ministry_keywords: Vec<String>,
}

impl FileProcessor {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            reader: TableReader::new(&config.na_values),
            normalizer: NumericNormalizer::from_config(config)?,
            years: YearExtractor::new(&config.known_years),
            year_keywords: config.year_keywords.clone(),
            sector_keywords: config.sector_keywords.clone(),
            ministry_keywords: config.ministry_keywords.clone(),
        })
    }

    pub fn process_file(&self, path: &Path) -> Result<ProcessedTable> {
        let table = self.reader.read_path(path)?;
        let processed = self.process_table(&table);

        debug!(
            "{}: year={:?} sector={:?} ministry={:?} allocation={:?}",
            path.display(),
            processed.columns.year,
            processed.columns.sector,
            processed.columns.ministry,
            processed.columns.allocation
        );

        Ok(processed)
    }

    /// Rows without a recognised year or a parseable allocation are dropped.
    /// An uninferred sector or ministry column leaves that field `None`.
    pub fn process_table(&self, table: &RawTable) -> ProcessedTable {
        let year_col = find_column(&table.headers, &self.year_keywords);
        let sector_col = find_column(&table.headers, &self.sector_keywords);
        let ministry_col = find_column(&table.headers, &self.ministry_keywords);
        let alloc_col =
            select_allocation_column(table, &self.normalizer, year_col.map(|c| c.index));

        let records = table
            .rows
            .iter()
            .filter_map(|row| {
                let year = year_col.and_then(|c| self.years.parse_year(&row[c.index]))?;
                let allocation_cr =
                    alloc_col.and_then(|c| self.normalizer.normalize_value(&row[c.index]))?;

                Some(CleanRecord {
                    year,
                    sector: sector_col.and_then(|c| row[c.index].as_label()),
                    ministry: ministry_col.and_then(|c| row[c.index].as_label()),
                    allocation_cr,
                })
            })
            .collect();

        let name = |c: Option<ColumnRef<'_>>| c.map(|c| c.name.to_string());

        ProcessedTable {
            records,
            columns: InferredColumns {
                year: name(year_col),
                sector: name(sector_col),
                ministry: name(ministry_col),
                allocation: name(alloc_col),
            },
            rows_read: table.len(),
        }
    }
}
