//! Full-table scans that pull values out of the wide layout.
//!
//! Every extractor consumes a row stream once. Country-scoped scans return on
//! the first matching row that settles the answer; aggregate scans read to
//! the end.

use crate::config::TableLayout;
use crate::error::QueryError;
use crate::filter::RowFilter;
use crate::models::Cell;
use crate::stats::YearAggregate;

/// Rightmost populated value of a row.
///
/// Blank cells are skipped. The first non-blank cell decides: a number is
/// returned, anything else means the row has no recent value.
pub fn latest_in_row<S: AsRef<str>>(row: &[S]) -> Option<f64> {
    for cell in row.iter().rev() {
        match Cell::parse(cell.as_ref()) {
            Cell::Blank => continue,
            Cell::Number(v) => return Some(v),
            Cell::Text => return None,
        }
    }
    None
}

/// Cell at `year`, if the row has one.
pub fn cell_for_year<S: AsRef<str>>(row: &[S], layout: &TableLayout, year: i32) -> Cell {
    layout
        .year_column(year)
        .and_then(|col| row.get(col))
        .map_or(Cell::Blank, |c| Cell::parse(c.as_ref()))
}

/// Most recent value for the filtered country.
pub fn latest<I, S>(rows: I, filter: &RowFilter<'_>) -> Result<Option<f64>, QueryError>
where
    I: IntoIterator<Item = Result<Vec<S>, QueryError>>,
    S: AsRef<str>,
{
    for row in rows {
        let row = row?;
        if !filter.matches(&row) {
            continue;
        }
        if let Some(v) = latest_in_row(&row) {
            return Ok(Some(v));
        }
    }
    Ok(None)
}

/// Value in `year` for the filtered country. The first matching row answers,
/// even when its cell carries no number.
pub fn value_for_year<I, S>(
    rows: I,
    filter: &RowFilter<'_>,
    layout: &TableLayout,
    year: i32,
) -> Result<Option<f64>, QueryError>
where
    I: IntoIterator<Item = Result<Vec<S>, QueryError>>,
    S: AsRef<str>,
{
    for row in rows {
        let row = row?;
        if filter.matches(&row) {
            return Ok(cell_for_year(&row, layout, year).number());
        }
    }
    Ok(None)
}

/// Accumulate the `year` column over every row the filter admits.
pub fn aggregate_for_year<I, S>(
    rows: I,
    filter: &RowFilter<'_>,
    layout: &TableLayout,
    year: i32,
) -> Result<YearAggregate, QueryError>
where
    I: IntoIterator<Item = Result<Vec<S>, QueryError>>,
    S: AsRef<str>,
{
    let mut agg = YearAggregate::default();
    for row in rows {
        let row = row?;
        if filter.matches(&row) {
            agg.push(cell_for_year(&row, layout, year));
        }
    }
    Ok(agg)
}
