//! Per-column value-occurrence descriptors.
//!
//! Boolean columns and low-cardinality numeric columns get exact
//! value-to-count pairs; higher-cardinality numeric columns get a 5-bin
//! equal-width histogram; everything else gets an empty descriptor. Each
//! descriptor is serialized as a textual mapping tagged with the
//! visualization kind, and all per-column descriptors join with `;`.

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::datatypes::DataType;

use crate::error::Result;
use crate::stats::numeric_values;
use crate::table::CanonicalTable;

/// Number of equal-width bins for high-cardinality numeric columns. Also the
/// distinct-value cutoff below which exact counts are reported instead.
pub const HISTOGRAM_BINS: usize = 5;

/// Visualization-kind tag on every descriptor, exact-count ones included.
pub const HISTOGRAM_KIND: &str = "histogram";

/// Separator inside a bin label, between the lower and upper edge.
const BIN_LABEL_SEPARATOR: &str = " — ";

/// One descriptor per column, `;`-joined.
///
/// # Errors
///
/// Returns an error if a numeric column cannot be widened for counting.
pub fn occurrence_descriptors(table: &CanonicalTable) -> Result<String> {
    let mut descriptors = Vec::with_capacity(table.num_columns());
    for i in 0..table.num_columns() {
        descriptors.push(column_descriptor(table.column(i))?);
    }
    Ok(descriptors.join(";"))
}

fn column_descriptor(array: &ArrayRef) -> Result<String> {
    let pairs = match array.data_type() {
        DataType::Boolean => boolean_counts(array),
        dt if is_integer(dt) => numeric_pairs(array, true)?,
        dt if is_float(dt) => numeric_pairs(array, false)?,
        _ => Vec::new(),
    };
    Ok(serialize_descriptor(&pairs))
}

fn is_integer(dt: &DataType) -> bool {
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
    )
}

fn is_float(dt: &DataType) -> bool {
    matches!(dt, DataType::Float32 | DataType::Float64)
}

/// Exact counts over non-missing booleans, `false` before `true`. Only
/// values that occur are reported.
fn boolean_counts(array: &ArrayRef) -> Vec<(String, u64)> {
    let Some(booleans) = array.as_any().downcast_ref::<BooleanArray>() else {
        return Vec::new();
    };
    let trues = booleans.true_count() as u64;
    let non_null = (booleans.len() - booleans.null_count()) as u64;
    let falses = non_null - trues;

    let mut pairs = Vec::new();
    if falses > 0 {
        pairs.push(("false".to_string(), falses));
    }
    if trues > 0 {
        pairs.push(("true".to_string(), trues));
    }
    pairs
}

/// Exact counts for at most [`HISTOGRAM_BINS`] distinct values, otherwise
/// equal-width bins. Nulls and non-finite values are excluded.
fn numeric_pairs(array: &ArrayRef, integer: bool) -> Result<Vec<(String, u64)>> {
    let mut values: Vec<f64> = numeric_values(array)?
        .into_iter()
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return Ok(Vec::new());
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut runs: Vec<(f64, u64)> = Vec::new();
    for &v in &values {
        match runs.last_mut() {
            Some((last, count)) if *last == v => *count += 1,
            _ => runs.push((v, 1)),
        }
    }

    if runs.len() <= HISTOGRAM_BINS {
        return Ok(runs
            .into_iter()
            .map(|(v, count)| (format_value(v, integer), count))
            .collect());
    }
    Ok(binned_counts(&values, integer))
}

/// 5-bin equal-width histogram over sorted values. The last bin is closed on
/// both sides so the maximum lands in bin 4.
fn binned_counts(sorted: &[f64], integer: bool) -> Vec<(String, u64)> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let width = (max - min) / HISTOGRAM_BINS as f64;

    let mut counts = vec![0u64; HISTOGRAM_BINS];
    for &v in sorted {
        let bin = (((v - min) / width).floor() as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    (0..HISTOGRAM_BINS)
        .map(|i| {
            let lower = min + width * i as f64;
            let upper = min + width * (i + 1) as f64;
            let label = format!(
                "{}{}{}",
                format_edge(lower, integer),
                BIN_LABEL_SEPARATOR,
                format_edge(upper, integer)
            );
            (label, counts[i])
        })
        .collect()
}

/// Exact-count key text: integers render without a fraction.
fn format_value(v: f64, integer: bool) -> String {
    if integer {
        (v as i64).to_string()
    } else {
        v.to_string()
    }
}

/// Bin-edge text: integer columns truncate toward zero, float columns round
/// to one decimal place.
fn format_edge(edge: f64, integer: bool) -> String {
    if integer {
        (edge as i64).to_string()
    } else {
        format!("{edge:.1}")
    }
}

/// Textual mapping `{"histogram": {"k": n, ...}}`, key order preserved.
fn serialize_descriptor(pairs: &[(String, u64)]) -> String {
    let entries: Vec<String> = pairs
        .iter()
        .map(|(key, count)| format!("\"{key}\": {count}"))
        .collect();
    format!("{{\"{HISTOGRAM_KIND}\": {{{}}}}}", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableLike;
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use std::sync::Arc;

    fn single_column(array: ArrayRef) -> CanonicalTable {
        TableLike::column(array, Some("c")).to_canonical().unwrap()
    }

    #[test]
    fn test_boolean_exact_counts() {
        let table = single_column(Arc::new(BooleanArray::from(vec![true, true, false])));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {\"false\": 1, \"true\": 2}}");
    }

    #[test]
    fn test_boolean_absent_value_omitted() {
        let table = single_column(Arc::new(BooleanArray::from(vec![true, true])));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {\"true\": 2}}");
    }

    #[test]
    fn test_integer_low_cardinality_exact_counts() {
        let table = single_column(Arc::new(Int64Array::from(vec![3, 1, 3, 2, 1, 3])));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {\"1\": 2, \"2\": 1, \"3\": 3}}");
    }

    #[test]
    fn test_integer_seven_distinct_bins() {
        let table = single_column(Arc::new(Int64Array::from(vec![0, 1, 2, 3, 4, 5, 10])));
        let out = occurrence_descriptors(&table).unwrap();

        // 7 distinct values over [0, 10]: five bins of width 2.
        assert_eq!(
            out,
            "{\"histogram\": {\"0 — 2\": 2, \"2 — 4\": 2, \"4 — 6\": 2, \"6 — 8\": 0, \"8 — 10\": 1}}"
        );
    }

    #[test]
    fn test_float_bins_round_to_one_decimal() {
        let values: Vec<f64> = vec![0.0, 0.25, 0.5, 1.0, 1.5, 2.0, 2.5];
        let table = single_column(Arc::new(Float64Array::from(values)));
        let out = occurrence_descriptors(&table).unwrap();
        assert!(out.contains("\"0.0 — 0.5\""));
        assert!(out.contains("\"2.0 — 2.5\""));
    }

    #[test]
    fn test_float_low_cardinality_display_keys() {
        let table = single_column(Arc::new(Float64Array::from(vec![2.5, 2.5, 0.5])));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {\"0.5\": 1, \"2.5\": 2}}");
    }

    #[test]
    fn test_bin_counts_conserve_non_missing_total() {
        let values: Vec<Option<f64>> = (0..20)
            .map(|i| if i % 5 == 0 { None } else { Some(i as f64) })
            .collect();
        let non_missing = values.iter().flatten().count() as u64;
        let table = single_column(Arc::new(Float64Array::from(values)));
        let out = occurrence_descriptors(&table).unwrap();

        let total: u64 = out
            .split(": ")
            .filter_map(|chunk| {
                chunk
                    .trim_end_matches(['}', ','])
                    .split(',')
                    .next()
                    .and_then(|n| n.trim().parse::<u64>().ok())
            })
            .sum();
        assert_eq!(total, non_missing);
    }

    #[test]
    fn test_non_finite_excluded() {
        let table = single_column(Arc::new(Float64Array::from(vec![
            1.0,
            f64::NAN,
            f64::INFINITY,
            1.0,
        ])));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {\"1\": 2}}");
    }

    #[test]
    fn test_unsupported_dtype_empty_descriptor() {
        let table = single_column(Arc::new(StringArray::from(vec!["a", "b"])));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {}}");
    }

    #[test]
    fn test_descriptors_join_with_semicolon() {
        let grid = TableLike::grid(vec![vec![1.0, 2.0], vec![1.0, 3.0]])
            .to_canonical()
            .unwrap();
        let out = occurrence_descriptors(&grid).unwrap();
        let parts: Vec<&str> = out.split(';').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.starts_with("{\"histogram\": ")));
    }

    #[test]
    fn test_empty_column_empty_descriptor() {
        let table = single_column(Arc::new(Int64Array::from(Vec::<i64>::new())));
        let out = occurrence_descriptors(&table).unwrap();
        assert_eq!(out, "{\"histogram\": {}}");
    }
}
