//! Descriptive statistics and non-missing counts over canonical tables.
//!
//! `describe` covers every column, not just the numeric ones: numeric
//! columns get count/mean/std/min/percentiles/max, string-like columns get
//! count/unique/top/freq, and anything else still reports its non-missing
//! count. Stat rows are the union of what the described columns need.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatchOptions;

use crate::error::{Error, Result};
use crate::format::format_cell;
use crate::table::{CanonicalTable, TableIndex};

/// Stat rows of a numeric-only summary table, in output order.
const NUMERIC_STAT_ROWS: [&str; 10] = [
    "count", "mean", "std", "min", "5%", "25%", "50%", "75%", "95%", "max",
];

/// Stat rows contributed by string-like columns, in output order. When both
/// kinds of column are present the numeric rows follow these, `count` shared.
const CATEGORICAL_STAT_ROWS: [&str; 4] = ["count", "unique", "top", "freq"];

/// Percentiles reported by [`describe`], in stat-row order.
const PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// How [`describe`] treats a column dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    /// Numeric stats: count, mean, std, min, percentiles, max.
    Numeric,
    /// Occurrence stats: count, unique, top, freq.
    Categorical,
    /// Non-missing count only.
    Other,
}

/// Whether a column dtype supports numeric descriptive statistics.
#[must_use]
pub fn is_summarizable(dt: &DataType) -> bool {
    matches!(
        dt,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn column_kind(dt: &DataType) -> ColumnKind {
    if is_summarizable(dt) {
        ColumnKind::Numeric
    } else if matches!(
        dt,
        DataType::Boolean | DataType::Utf8 | DataType::LargeUtf8 | DataType::Dictionary(_, _)
    ) {
        ColumnKind::Categorical
    } else {
        ColumnKind::Other
    }
}

/// Non-null values of a numeric column, widened to `f64`.
pub(crate) fn numeric_values(array: &ArrayRef) -> Result<Vec<f64>> {
    let cast = arrow::compute::cast(array, &DataType::Float64)?;
    let floats = cast
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| Error::schema_mismatch("cast to Float64 produced a non-float array"))?;
    Ok(floats.iter().flatten().collect())
}

/// Descriptive statistics over every column, preserving the source column
/// order. Numeric columns get the numeric stat rows; boolean, string and
/// categorical columns get `count`/`unique`/`top`/`freq`; every other dtype
/// reports only its non-missing count. Rows are the union of what the
/// present columns need, `count` first. Returns `None` for a zero-column
/// table, the one input with nothing at all to describe.
///
/// # Errors
///
/// Returns an error if an arrow kernel fails while widening a column.
pub fn describe(table: &CanonicalTable) -> Result<Option<CanonicalTable>> {
    if table.num_columns() == 0 {
        return Ok(None);
    }
    let schema = table.schema();
    let kinds: Vec<ColumnKind> = schema
        .fields()
        .iter()
        .map(|f| column_kind(f.data_type()))
        .collect();

    if kinds.contains(&ColumnKind::Categorical) {
        mixed_describe(table, &kinds).map(Some)
    } else {
        numeric_describe(table, &kinds).map(Some)
    }
}

/// Summary with `Float64` output columns: no string-like column is present,
/// so every cell is numeric. `Other` columns carry only their count.
fn numeric_describe(table: &CanonicalTable, kinds: &[ColumnKind]) -> Result<CanonicalTable> {
    let has_numeric = kinds.contains(&ColumnKind::Numeric);
    let rows: Vec<&str> = if has_numeric {
        NUMERIC_STAT_ROWS.to_vec()
    } else {
        vec!["count"]
    };

    let schema = table.schema();
    let mut fields = Vec::with_capacity(table.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());
    for (i, field) in schema.fields().iter().enumerate() {
        let stats = match kinds[i] {
            ColumnKind::Numeric => column_stats(&numeric_values(table.column(i))?),
            _ => {
                let mut stats = vec![Some(non_null_count(table.column(i)) as f64)];
                stats.resize(rows.len(), None);
                stats
            }
        };
        fields.push(Field::new(field.name(), DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(stats)));
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    let labels = rows.iter().map(ToString::to_string).collect();
    Ok(CanonicalTable::with_index(batch, TableIndex::Labels(labels)))
}

/// Summary with `Utf8` output columns: `top` cells carry values from the
/// described column, so everything renders as text. Cells a column kind does
/// not produce stay null.
fn mixed_describe(table: &CanonicalTable, kinds: &[ColumnKind]) -> Result<CanonicalTable> {
    let has_numeric = kinds.contains(&ColumnKind::Numeric);
    let mut rows: Vec<&str> = CATEGORICAL_STAT_ROWS.to_vec();
    if has_numeric {
        rows.extend(&NUMERIC_STAT_ROWS[1..]);
    }

    let schema = table.schema();
    let mut fields = Vec::with_capacity(table.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());
    for (i, field) in schema.fields().iter().enumerate() {
        let column = table.column(i);
        let mut cells: Vec<Option<String>> = match kinds[i] {
            ColumnKind::Numeric => {
                let stats = column_stats(&numeric_values(column)?);
                let mut cells = vec![stats[0].map(|c| (c as u64).to_string()), None, None, None];
                cells.extend(stats[1..].iter().map(|s| s.map(|v| v.to_string())));
                cells
            }
            ColumnKind::Categorical => {
                let occurrence = occurrence_stats(column);
                vec![
                    Some(occurrence.count.to_string()),
                    Some(occurrence.unique.to_string()),
                    occurrence.top,
                    occurrence.freq.map(|f| f.to_string()),
                ]
            }
            ColumnKind::Other => vec![Some(non_null_count(column).to_string())],
        };
        cells.resize(rows.len(), None);
        fields.push(Field::new(field.name(), DataType::Utf8, true));
        columns.push(Arc::new(StringArray::from(cells)));
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    let labels = rows.iter().map(ToString::to_string).collect();
    Ok(CanonicalTable::with_index(batch, TableIndex::Labels(labels)))
}

fn non_null_count(column: &ArrayRef) -> usize {
    column.len() - column.null_count()
}

/// Occurrence stats of a string-like column.
struct OccurrenceStats {
    count: usize,
    unique: usize,
    top: Option<String>,
    freq: Option<u64>,
}

/// Count non-null cell texts. `top` is the most frequent value; ties go to
/// the first value encountered.
fn occurrence_stats(column: &ArrayRef) -> OccurrenceStats {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for row in 0..column.len() {
        if column.is_null(row) {
            continue;
        }
        let text = format_cell(column.as_ref(), row);
        match counts.iter_mut().find(|(value, _)| *value == text) {
            Some((_, count)) => *count += 1,
            None => counts.push((text, 1)),
        }
    }

    let mut top: Option<(String, u64)> = None;
    for (value, count) in &counts {
        let replaces = top.as_ref().map_or(true, |(_, best)| *count > *best);
        if replaces {
            top = Some((value.clone(), *count));
        }
    }

    OccurrenceStats {
        count: non_null_count(column),
        unique: counts.len(),
        top: top.as_ref().map(|(value, _)| value.clone()),
        freq: top.map(|(_, count)| count),
    }
}

/// Stats for one numeric column, in [`NUMERIC_STAT_ROWS`] order. `std` needs
/// at least two values; everything except `count` needs at least one.
fn column_stats(values: &[f64]) -> Vec<Option<f64>> {
    let n = values.len();
    let mut stats = Vec::with_capacity(NUMERIC_STAT_ROWS.len());
    stats.push(Some(n as f64));

    if n == 0 {
        stats.resize(NUMERIC_STAT_ROWS.len(), None);
        return stats;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    stats.push(Some(mean));

    // Sample standard deviation, ddof = 1.
    let std = if n > 1 {
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Some((sum_sq / (n - 1) as f64).sqrt())
    } else {
        None
    };
    stats.push(std);

    stats.push(Some(sorted[0]));
    for p in PERCENTILES {
        stats.push(Some(percentile(&sorted, p)));
    }
    stats.push(Some(sorted[n - 1]));
    stats
}

/// Linearly interpolated percentile over pre-sorted values.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

/// One-row table of per-column non-missing value counts.
///
/// Columns mirror the source columns; each cell is the `u64` count of
/// non-null values in that column.
///
/// # Errors
///
/// Returns an error if the counts batch cannot be assembled.
pub fn non_missing_counts(table: &CanonicalTable) -> Result<CanonicalTable> {
    let schema = table.schema();
    let mut fields = Vec::with_capacity(table.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());
    for (i, field) in schema.fields().iter().enumerate() {
        let count = non_null_count(table.column(i)) as u64;
        fields.push(Field::new(field.name(), DataType::UInt64, false));
        columns.push(Arc::new(UInt64Array::from(vec![count])));
    }

    let options = RecordBatchOptions::new().with_row_count(Some(1));
    let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;
    Ok(CanonicalTable::new(batch))
}
