use crate::normalize::NumericNormalizer;
use crate::schema::RawTable;

/// A header picked by one of the inference heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub index: usize,
    pub name: &'a str,
}

/// Returns the first header, in column order, whose lower-cased name contains
/// any of `keywords`. Keywords are expected in lower case.
pub fn find_column<'a, S, K>(columns: &'a [S], keywords: &[K]) -> Option<ColumnRef<'a>>
where
    S: AsRef<str>,
    K: AsRef<str>,
{
    columns
        .iter()
        .map(|c| (c.as_ref(), c.as_ref().to_lowercase()))
        .enumerate()
        .find(|(_, (_, lowered))| keywords.iter().any(|k| lowered.contains(k.as_ref())))
        .map(|(index, (name, _))| ColumnRef { index, name })
}

/// Picks the allocation column: the one with the most cells that survive
/// numeric normalization. Every column is a candidate, including the
/// inferred year column, which can win outright when it is strictly denser.
/// On equal counts a non-year column beats the year column, then the
/// earliest column wins.
pub fn select_allocation_column<'a>(
    table: &'a RawTable,
    normalizer: &NumericNormalizer,
    year_column: Option<usize>,
) -> Option<ColumnRef<'a>> {
    let mut best: Option<(usize, (usize, bool))> = None;

    for index in 0..table.width() {
        let count = table
            .column(index)
            .filter(|v| normalizer.normalize_value(v).is_some())
            .count();
        let rank = (count, year_column != Some(index));

        if best.map_or(true, |(_, best_rank)| rank > best_rank) {
            best = Some((index, rank));
        }
    }

    best.map(|(index, _)| ColumnRef {
        index,
        name: table.headers[index].as_str(),
    })
}
