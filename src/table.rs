//! Table-like input shapes and the canonical table they normalize into.
//!
//! Four shapes are accepted: a 2-D labeled frame of record batches, a 1-D
//! labeled column, a raw numeric grid, and a categorical vector. Every query
//! operation first normalizes its input to a [`CanonicalTable`] via
//! [`TableLike::to_canonical`], then works against that single representation.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, DictionaryArray, Float64Array, Int32Array, RecordBatch, StringArray,
};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Int32Type, Schema, SchemaRef};

use crate::error::{Error, Result};

/// Placeholder column name for an unnamed 1-D column.
pub const UNNAMED_COLUMN: &str = "<unnamed>";

/// A table-like value as handed over by the debugger.
#[derive(Debug, Clone)]
pub enum TableLike {
    /// 2-D labeled table: record batches sharing one schema.
    Frame(Frame),
    /// 1-D labeled column: values plus an optional name.
    Column(Column),
    /// Raw untyped 2-D numeric grid.
    Grid(Grid),
    /// Finite categorical vector: codes into a fixed category set.
    Categorical(Categorical),
}

/// 2-D labeled table backing.
#[derive(Debug, Clone)]
pub struct Frame {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
}

/// 1-D labeled column backing.
#[derive(Debug, Clone)]
pub struct Column {
    values: ArrayRef,
    name: Option<String>,
}

/// Raw numeric grid backing, row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<f64>>,
}

/// Categorical vector backing: dictionary codes plus the category set.
#[derive(Debug, Clone)]
pub struct Categorical {
    codes: Vec<Option<i32>>,
    categories: Vec<String>,
}

impl TableLike {
    /// Wrap record batches as a 2-D labeled table.
    ///
    /// # Errors
    ///
    /// Returns an error if `batches` is empty or the batches disagree on
    /// schema.
    pub fn frame(batches: Vec<RecordBatch>) -> Result<Self> {
        if batches.is_empty() {
            return Err(Error::EmptyFrame);
        }
        let schema = batches[0].schema();
        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "batch {i} schema differs from batch 0"
                )));
            }
        }
        Ok(Self::Frame(Frame { batches, schema }))
    }

    /// Wrap a 1-D column with an optional name.
    #[must_use]
    pub fn column(values: ArrayRef, name: Option<&str>) -> Self {
        Self::Column(Column {
            values,
            name: name.map(ToString::to_string),
        })
    }

    /// Wrap a raw numeric grid, row-major. Rectangularity is checked during
    /// canonicalization.
    #[must_use]
    pub fn grid(rows: Vec<Vec<f64>>) -> Self {
        Self::Grid(Grid { rows })
    }

    /// Wrap a categorical vector. Code validity is checked during
    /// canonicalization.
    #[must_use]
    pub fn categorical(codes: Vec<Option<i32>>, categories: Vec<String>) -> Self {
        Self::Categorical(Categorical { codes, categories })
    }

    /// Run-time type identifier of the wrapped shape.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Frame(_) => std::any::type_name::<Frame>(),
            Self::Column(_) => std::any::type_name::<Column>(),
            Self::Grid(_) => std::any::type_name::<Grid>(),
            Self::Categorical(_) => std::any::type_name::<Categorical>(),
        }
    }

    /// Number of rows, computed without canonicalizing.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Frame(f) => f.batches.iter().map(RecordBatch::num_rows).sum(),
            Self::Column(c) => c.values.len(),
            Self::Grid(g) => g.rows.len(),
            Self::Categorical(c) => c.codes.len(),
        }
    }

    /// Normalize into the canonical 2-D labeled table.
    ///
    /// Lossless in row order and values: a column becomes a single-column
    /// table named after the column (or [`UNNAMED_COLUMN`]), a grid gets
    /// positional column names, a categorical becomes one dictionary-encoded
    /// column named `"0"`, and a frame passes through with its batches
    /// coalesced.
    ///
    /// # Errors
    ///
    /// Returns an error for a ragged grid, a categorical code outside the
    /// category set, or an arrow failure while coalescing batches.
    pub fn to_canonical(&self) -> Result<CanonicalTable> {
        let batch = match self {
            Self::Frame(f) => concat_batches(&f.schema, &f.batches)?,
            Self::Column(c) => {
                let name = c.name.as_deref().unwrap_or(UNNAMED_COLUMN);
                single_column_batch(name, Arc::clone(&c.values))?
            }
            Self::Grid(g) => grid_batch(&g.rows)?,
            Self::Categorical(c) => {
                let column = categorical_column(&c.codes, &c.categories)?;
                single_column_batch("0", column)?
            }
        };
        Ok(CanonicalTable::new(batch))
    }
}

fn single_column_batch(name: &str, values: ArrayRef) -> Result<RecordBatch> {
    let field = Field::new(name, values.data_type().clone(), true);
    let schema = Arc::new(Schema::new(vec![field]));
    RecordBatch::try_new(schema, vec![values]).map_err(Error::Arrow)
}

fn grid_batch(rows: &[Vec<f64>]) -> Result<RecordBatch> {
    let width = rows.first().map_or(0, Vec::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(Error::RaggedGrid {
                row: i,
                got: row.len(),
                expected: width,
            });
        }
    }
    if width == 0 {
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    }

    let mut fields = Vec::with_capacity(width);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(width);
    for col in 0..width {
        let values: Float64Array = rows.iter().map(|row| Some(row[col])).collect();
        fields.push(Field::new(col.to_string(), DataType::Float64, true));
        columns.push(Arc::new(values));
    }
    let schema = Arc::new(Schema::new(fields));
    RecordBatch::try_new(schema, columns).map_err(Error::Arrow)
}

fn categorical_column(codes: &[Option<i32>], categories: &[String]) -> Result<ArrayRef> {
    for &code in codes.iter().flatten() {
        let in_range = usize::try_from(code).is_ok_and(|c| c < categories.len());
        if !in_range {
            return Err(Error::CategoryOutOfRange {
                code,
                categories: categories.len(),
            });
        }
    }
    let keys = Int32Array::from(codes.to_vec());
    let values: ArrayRef = Arc::new(StringArray::from_iter_values(
        categories.iter().map(String::as_str),
    ));
    let dictionary = DictionaryArray::<Int32Type>::try_new(keys, values)?;
    Ok(Arc::new(dictionary))
}

/// Row-index labels of a canonical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIndex {
    /// Positional integer labels `start..start + rows`.
    Range {
        /// Label of the first row.
        start: usize,
    },
    /// Explicit string labels, one per row.
    Labels(Vec<String>),
}

impl TableIndex {
    /// Dtype tag of the index labels.
    #[must_use]
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Range { .. } => DataType::Int64,
            Self::Labels(_) => DataType::Utf8,
        }
    }

    /// Label of row `row`, as text.
    #[must_use]
    pub fn label(&self, row: usize) -> String {
        match self {
            Self::Range { start } => (start + row).to_string(),
            Self::Labels(labels) => labels.get(row).cloned().unwrap_or_default(),
        }
    }

    fn slice(&self, offset: usize, length: usize) -> Self {
        match self {
            Self::Range { start } => Self::Range {
                start: start + offset,
            },
            Self::Labels(labels) => {
                let end = (offset + length).min(labels.len());
                let offset = offset.min(labels.len());
                Self::Labels(labels[offset..end].to_vec())
            }
        }
    }
}

/// The normalized 2-D labeled-rows x labeled-columns representation.
///
/// Backed by a single coalesced [`RecordBatch`] plus row-index labels.
/// Read-only: slicing and derived tables produce new values.
#[derive(Debug, Clone)]
pub struct CanonicalTable {
    batch: RecordBatch,
    index: TableIndex,
}

impl CanonicalTable {
    /// Wrap a batch with a fresh positional index.
    #[must_use]
    pub fn new(batch: RecordBatch) -> Self {
        Self {
            batch,
            index: TableIndex::Range { start: 0 },
        }
    }

    /// Wrap a batch with explicit index labels.
    #[must_use]
    pub fn with_index(batch: RecordBatch, index: TableIndex) -> Self {
        Self { batch, index }
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in schema order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Schema of the backing batch.
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Column `i` of the backing batch.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds, as [`RecordBatch::column`] does.
    #[must_use]
    pub fn column(&self, i: usize) -> &ArrayRef {
        self.batch.column(i)
    }

    /// Row-index labels.
    #[must_use]
    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    /// Positional row slice `[start, end)`. An absent bound leaves that side
    /// open. Bounds clamp to the row count; inverted bounds yield an empty
    /// table. Row labels are preserved.
    #[must_use]
    pub fn slice_rows(&self, start: Option<usize>, end: Option<usize>) -> Self {
        let rows = self.num_rows();
        let start = start.unwrap_or(0).min(rows);
        let end = end.unwrap_or(rows).min(rows);
        let length = end.saturating_sub(start);
        Self {
            batch: self.batch.slice(start, length),
            index: self.index.slice(start, length),
        }
    }

    /// First `min(n, rows)` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        self.slice_rows(Some(0), Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;

    fn two_column_batch(ids: Vec<i64>, names: Vec<&str>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(ids)),
                Arc::new(StringArray::from(names)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_frame_rejects_no_batches() {
        assert!(matches!(TableLike::frame(vec![]), Err(Error::EmptyFrame)));
    }

    #[test]
    fn test_frame_rejects_schema_mismatch() {
        let a = two_column_batch(vec![1], vec!["x"]);
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
        let b = RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![2i64]))]).unwrap();
        assert!(matches!(
            TableLike::frame(vec![a, b]),
            Err(Error::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_frame_coalesces_batches() {
        let a = two_column_batch(vec![1, 2], vec!["x", "y"]);
        let b = two_column_batch(vec![3], vec!["z"]);
        let table = TableLike::frame(vec![a, b]).unwrap();
        assert_eq!(table.row_count(), 3);

        let canonical = table.to_canonical().unwrap();
        assert_eq!(canonical.num_rows(), 3);
        assert_eq!(canonical.num_columns(), 2);
        assert_eq!(canonical.column_names(), vec!["id", "name"]);
    }

    #[test]
    fn test_named_column_keeps_name() {
        let values: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
        let canonical = TableLike::column(values, Some("score"))
            .to_canonical()
            .unwrap();
        assert_eq!(canonical.column_names(), vec!["score"]);
        assert_eq!(canonical.num_rows(), 3);
    }

    #[test]
    fn test_unnamed_column_gets_placeholder() {
        let values: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
        let canonical = TableLike::column(values, None).to_canonical().unwrap();
        assert_eq!(canonical.column_names(), vec![UNNAMED_COLUMN]);
    }

    #[test]
    fn test_grid_positional_names() {
        let grid = TableLike::grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(grid.row_count(), 2);

        let canonical = grid.to_canonical().unwrap();
        assert_eq!(canonical.column_names(), vec!["0", "1"]);
        assert_eq!(canonical.column(0).data_type(), &DataType::Float64);
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let grid = TableLike::grid(vec![vec![1.0, 2.0], vec![3.0]]);
        let err = grid.to_canonical().unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedGrid {
                row: 1,
                got: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_empty_grid() {
        let canonical = TableLike::grid(vec![]).to_canonical().unwrap();
        assert_eq!(canonical.num_rows(), 0);
        assert_eq!(canonical.num_columns(), 0);
    }

    #[test]
    fn test_categorical_resolves_to_dictionary() {
        let table = TableLike::categorical(
            vec![Some(0), Some(1), None, Some(0)],
            vec!["red".to_string(), "green".to_string()],
        );
        assert_eq!(table.row_count(), 4);

        let canonical = table.to_canonical().unwrap();
        assert_eq!(canonical.column_names(), vec!["0"]);
        assert!(matches!(
            canonical.column(0).data_type(),
            DataType::Dictionary(_, _)
        ));
        assert_eq!(canonical.column(0).null_count(), 1);
    }

    #[test]
    fn test_categorical_code_out_of_range() {
        let table = TableLike::categorical(vec![Some(5)], vec!["only".to_string()]);
        assert!(matches!(
            table.to_canonical().unwrap_err(),
            Error::CategoryOutOfRange {
                code: 5,
                categories: 1
            }
        ));
    }

    #[test]
    fn test_slice_preserves_labels() {
        let batch = two_column_batch(vec![10, 20, 30, 40], vec!["a", "b", "c", "d"]);
        let canonical = TableLike::frame(vec![batch]).unwrap().to_canonical().unwrap();

        let sliced = canonical.slice_rows(Some(1), Some(3));
        assert_eq!(sliced.num_rows(), 2);
        assert_eq!(sliced.index().label(0), "1");
        assert_eq!(sliced.index().label(1), "2");
    }

    #[test]
    fn test_slice_open_bounds() {
        let batch = two_column_batch(vec![1, 2, 3], vec!["a", "b", "c"]);
        let canonical = TableLike::frame(vec![batch]).unwrap().to_canonical().unwrap();

        assert_eq!(canonical.slice_rows(None, None).num_rows(), 3);
        assert_eq!(canonical.slice_rows(Some(1), None).num_rows(), 2);
        assert_eq!(canonical.slice_rows(None, Some(2)).num_rows(), 2);
    }

    #[test]
    fn test_slice_clamps_and_inverts_empty() {
        let batch = two_column_batch(vec![1, 2, 3], vec!["a", "b", "c"]);
        let canonical = TableLike::frame(vec![batch]).unwrap().to_canonical().unwrap();

        assert_eq!(canonical.slice_rows(Some(1), Some(100)).num_rows(), 2);
        assert_eq!(canonical.slice_rows(Some(2), Some(1)).num_rows(), 0);
        assert_eq!(canonical.slice_rows(Some(50), Some(60)).num_rows(), 0);
    }

    #[test]
    fn test_head_caps_at_row_count() {
        let batch = two_column_batch(vec![1, 2], vec!["a", "b"]);
        let canonical = TableLike::frame(vec![batch]).unwrap().to_canonical().unwrap();
        assert_eq!(canonical.head(5).num_rows(), 2);
        assert_eq!(canonical.head(1).num_rows(), 1);
    }

    #[test]
    fn test_label_index_dtype() {
        let index = TableIndex::Labels(vec!["count".to_string(), "mean".to_string()]);
        assert_eq!(index.dtype(), DataType::Utf8);
        assert_eq!(index.label(1), "mean");

        let positional = TableIndex::Range { start: 0 };
        assert_eq!(positional.dtype(), DataType::Int64);
    }

    #[test]
    fn test_type_names_distinguish_shapes() {
        let column = TableLike::column(Arc::new(Int64Array::from(vec![1])) as ArrayRef, None);
        let grid = TableLike::grid(vec![]);
        assert!(column.type_name().contains("Column"));
        assert!(grid.type_name().contains("Grid"));
        assert_ne!(column.type_name(), grid.type_name());
    }
}
