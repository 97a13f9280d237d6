use crate::schema::{CleanRecord, SectorKey, SectorYearTotal};
use std::collections::BTreeMap;

/// Sums allocations per (sector, year). A missing sector is its own group.
///
/// Values inside a group are added in ascending order, so the totals are
/// bit-identical however the input rows were ordered.
pub fn sum_by_sector_year(records: &[CleanRecord]) -> Vec<SectorYearTotal> {
    let mut groups: BTreeMap<(SectorKey, i32), Vec<f64>> = BTreeMap::new();

    for record in records {
        groups
            .entry((SectorKey::from(record.sector.as_deref()), record.year))
            .or_default()
            .push(record.allocation_cr);
    }

    groups
        .into_iter()
        .map(|((sector, year), mut values)| {
            values.sort_by(f64::total_cmp);
            SectorYearTotal {
                sector,
                year,
                sum_allocation_cr: values.iter().sum(),
            }
        })
        .collect()
}

/// One sector's yearly totals, ascending by year.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSeries {
    pub sector: SectorKey,
    pub years: Vec<i32>,
    pub values: Vec<f64>,
}

impl SectorSeries {
    pub fn last_year(&self) -> Option<i32> {
        self.years.iter().copied().max()
    }
}

/// Collapses totals across years into one series per sector,
/// named sectors first in ascending order, the missing sector last.
pub fn group_by_sector(totals: &[SectorYearTotal]) -> Vec<SectorSeries> {
    let mut by_sector: BTreeMap<&SectorKey, Vec<(i32, f64)>> = BTreeMap::new();

    for total in totals {
        by_sector
            .entry(&total.sector)
            .or_default()
            .push((total.year, total.sum_allocation_cr));
    }

    by_sector
        .into_iter()
        .map(|(sector, mut points)| {
            points.sort_by_key(|(year, _)| *year);
            let (years, values) = points.into_iter().unzip();
            SectorSeries {
                sector: sector.clone(),
                years,
                values,
            }
        })
        .collect()
}
