//! mostrar - Table formatting for debugger variable inspectors
//!
//! A presentation adapter over Arrow: normalizes heterogeneous table-like
//! inputs (labeled frames, 1-D columns, raw numeric grids, categorical
//! vectors) into one canonical 2-D representation, then answers read-only
//! display queries against it: shape, dtypes, HTML previews, descriptive
//! statistics, value counts, and per-column histograms.
//!
//! # Design Principles
//!
//! 1. **Normalize, then query** - every operation works against one
//!    canonical table shape
//! 2. **Pure Rust** - Arrow `RecordBatch` throughout, no FFI
//! 3. **Read-only** - queries never mutate the caller's data; derived tables
//!    are fresh values
//! 4. **Scoped configuration** - display-limit overrides always restore,
//!    on every exit path
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use mostrar::{TableInspector, TableLike};
//!
//! let values: ArrayRef = Arc::new(Int64Array::from(vec![10, 20, 30]));
//! let column = TableLike::column(values, Some("score"));
//!
//! let inspector = TableInspector::new();
//! assert_eq!(inspector.row_count(&column), "3");
//!
//! // Quoted HTML fragment of the first rows
//! let preview = inspector.preview_html(&column).unwrap();
//! assert!(preview.contains("score"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::similar_names,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::map_unwrap_or)]

pub mod config;
pub mod error;
pub mod format;
pub mod histogram;
pub mod html;
pub mod inspector;
pub mod stats;
pub mod table;

// Re-exports for convenience
// Re-export arrow types commonly needed
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use config::{ConfigOverride, DisplayConfig, LEGACY_MAX_COLWIDTH};
pub use error::{Error, Result};
pub use histogram::{HISTOGRAM_BINS, HISTOGRAM_KIND};
pub use inspector::{DisplaySink, TableInspector, COLUMN_TYPE_SEPARATOR, PREVIEW_ROWS};
pub use table::{CanonicalTable, TableIndex, TableLike, UNNAMED_COLUMN};
