//! The table inspector: debugger-facing query operations over table-like
//! values.
//!
//! Every operation canonicalizes its input first, then queries the canonical
//! table. Rendering operations scope-override the inspector's display
//! configuration for the duration of the call; the override is restored on
//! every exit path.

use crate::config::{ConfigOverride, DisplayConfig, LEGACY_MAX_COLWIDTH};
use crate::error::Result;
use crate::format::dtype_name;
use crate::histogram::occurrence_descriptors;
use crate::html::{quote_for_transport, render_html};
use crate::stats::{describe, non_missing_counts};
use crate::table::{CanonicalTable, TableLike};

/// Separator between dtype entries in a [`TableInspector::column_dtypes`]
/// listing. Literal token consumed by the debugger front end.
pub const COLUMN_TYPE_SEPARATOR: &str = "__pydev_table_column_type_val__";

/// Rows shown by [`TableInspector::preview_html`].
pub const PREVIEW_ROWS: usize = 5;

/// An external interactive display surface.
///
/// [`TableInspector::render_interactive`] hands the sliced table and the
/// in-force display configuration to an implementation of this trait instead
/// of returning text.
pub trait DisplaySink {
    /// Present the table on the interactive surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the table.
    fn display(&mut self, table: &CanonicalTable, config: &DisplayConfig) -> Result<()>;
}

/// Formats table-like values for a debugger's variable inspector.
///
/// Holds the display configuration that rendering operations temporarily
/// override. Construction chooses between the uncapped column-width override
/// and the fixed legacy ceiling.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use mostrar::{TableInspector, TableLike};
///
/// let values: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
/// let column = TableLike::column(values, Some("score"));
///
/// let mut inspector = TableInspector::new();
/// assert_eq!(inspector.row_count(&column), "3");
/// let html = inspector.render(&column, None, None).unwrap();
/// assert!(html.contains("score"));
/// ```
#[derive(Debug)]
pub struct TableInspector {
    config: DisplayConfig,
    legacy_colwidth: bool,
}

impl Default for TableInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableInspector {
    /// Inspector with the library-default display configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DisplayConfig::default(),
            legacy_colwidth: false,
        }
    }

    /// Inspector starting from an explicit display configuration.
    #[must_use]
    pub fn with_config(config: DisplayConfig) -> Self {
        Self {
            config,
            legacy_colwidth: false,
        }
    }

    /// Use the fixed legacy column-width ceiling instead of "no limit" when
    /// rendering. Needed for rendering targets that reject an uncapped width.
    #[must_use]
    pub fn legacy_colwidth(mut self, enabled: bool) -> Self {
        self.legacy_colwidth = enabled;
        self
    }

    /// The ambient display configuration.
    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Run-time type identifier of the input, as text.
    #[must_use]
    pub fn type_name(&self, table: &TableLike) -> String {
        table.type_name().to_string()
    }

    /// Number of rows, as decimal text.
    #[must_use]
    pub fn row_count(&self, table: &TableLike) -> String {
        table.row_count().to_string()
    }

    /// First [`PREVIEW_ROWS`] rows as a quoted HTML fragment, rendered with
    /// unlimited columns and the ambient column-width setting. Does not touch
    /// the shared configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails.
    pub fn preview_html(&self, table: &TableLike) -> Result<String> {
        let head = table.to_canonical()?.head(PREVIEW_ROWS);
        let config = DisplayConfig {
            max_columns: None,
            max_col_width: self.config.max_col_width,
        };
        Ok(quote_for_transport(&render_html(&head, &config)))
    }

    /// Row-index dtype followed by each column dtype, with
    /// [`COLUMN_TYPE_SEPARATOR`] before every column entry. The separator
    /// after the index dtype is emitted even for a zero-column table.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails.
    pub fn column_dtypes(&self, table: &TableLike) -> Result<String> {
        let canonical = table.to_canonical()?;
        let schema = canonical.schema();
        let dtypes: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| dtype_name(f.data_type()))
            .collect();
        Ok(format!(
            "{}{}{}",
            dtype_name(&canonical.index().dtype()),
            COLUMN_TYPE_SEPARATOR,
            dtypes.join(COLUMN_TYPE_SEPARATOR)
        ))
    }

    /// Positional row slice `[start, end)` of the canonical table. An absent
    /// bound means no slicing on that side.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails.
    pub fn slice_rows(
        &self,
        table: &TableLike,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<CanonicalTable> {
        Ok(table.to_canonical()?.slice_rows(start, end))
    }

    /// Render to a quoted HTML fragment under the scoped configuration
    /// override. Slices `[start, end)` first when both bounds are given.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails. The prior configuration is
    /// restored either way.
    pub fn render(
        &mut self,
        table: &TableLike,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<String> {
        let mut canonical = table.to_canonical()?;
        if let (Some(start), Some(end)) = (start, end) {
            canonical = canonical.slice_rows(Some(start), Some(end));
        }
        Ok(self.render_quoted(&canonical))
    }

    /// Descriptive statistics over the canonical table, rendered like
    /// [`TableInspector::render`]. Every column is described in the original
    /// column order: numeric columns with numeric stats, string-like columns
    /// with occurrence stats, the rest with their non-missing count. Yields
    /// the empty string when statistics cannot be computed at all.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails; statistics failures
    /// degrade to `""` instead.
    pub fn column_summary_stats(&mut self, table: &TableLike) -> Result<String> {
        let canonical = table.to_canonical()?;
        match describe(&canonical) {
            Ok(Some(summary)) => Ok(self.render_quoted(&summary)),
            Ok(None) | Err(_) => Ok(String::new()),
        }
    }

    /// Per-column non-missing value counts as a one-row table, rendered like
    /// [`TableInspector::render`].
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization or count assembly fails.
    pub fn value_counts_per_column(&mut self, table: &TableLike) -> Result<String> {
        let counts = non_missing_counts(&table.to_canonical()?)?;
        Ok(self.render_quoted(&counts))
    }

    /// Per-column occurrence descriptors, `;`-joined.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization or value widening fails.
    pub fn value_occurrence_histograms(&self, table: &TableLike) -> Result<String> {
        occurrence_descriptors(&table.to_canonical()?)
    }

    /// Slice `[start, end)` and hand the result to the interactive display
    /// sink under the scoped configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails or the sink rejects the
    /// table. The prior configuration is restored either way.
    pub fn render_interactive(
        &mut self,
        table: &TableLike,
        start: usize,
        end: usize,
        sink: &mut dyn DisplaySink,
    ) -> Result<()> {
        let sliced = table.to_canonical()?.slice_rows(Some(start), Some(end));
        let width = self.width_override();
        let guard = ConfigOverride::apply(&mut self.config, None, width);
        let config = guard.config();
        sink.display(&sliced, &config)
    }

    fn render_quoted(&mut self, table: &CanonicalTable) -> String {
        let width = self.width_override();
        let guard = ConfigOverride::apply(&mut self.config, None, width);
        let config = guard.config();
        quote_for_transport(&render_html(table, &config))
    }

    fn width_override(&self) -> Option<usize> {
        if self.legacy_colwidth {
            Some(LEGACY_MAX_COLWIDTH)
        } else {
            None
        }
    }
}
