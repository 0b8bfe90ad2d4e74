//! HTML fragment rendering of canonical tables.
//!
//! Produces the `<table border="1" class="dataframe">` fragment shape with a
//! header row and one body row per table row. Wide tables elide middle
//! columns under `max_columns`; long cells truncate under `max_col_width`.

use crate::config::DisplayConfig;
use crate::format::{format_cell, truncate_cell};
use crate::table::CanonicalTable;

/// Elision marker for hidden columns and truncated cells.
const ELLIPSIS: &str = "...";

/// Escape `&`, `<` and `>` for embedding in HTML text.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a rendered fragment as a string literal for transport.
///
/// Wraps in double quotes and backslash-escapes quotes and control
/// characters, so the fragment survives line-oriented protocols unchanged.
#[must_use]
pub fn quote_for_transport(html: &str) -> String {
    format!("{html:?}")
}

/// One rendered column position: a data column or the elision marker.
enum RenderColumn {
    Data(usize),
    Elision,
}

/// Column positions to render under a `max_columns` limit.
///
/// A table wider than the limit shows the leading half and trailing half of
/// its columns with a single elision column between.
fn rendered_columns(total: usize, max_columns: Option<usize>) -> Vec<RenderColumn> {
    match max_columns {
        Some(max) if total > max => {
            let lead = max.div_ceil(2);
            let trail = max / 2;
            let mut columns: Vec<RenderColumn> = (0..lead).map(RenderColumn::Data).collect();
            columns.push(RenderColumn::Elision);
            columns.extend((total - trail..total).map(RenderColumn::Data));
            columns
        }
        _ => (0..total).map(RenderColumn::Data).collect(),
    }
}

fn cell_text(table: &CanonicalTable, row: usize, col: usize, config: &DisplayConfig) -> String {
    let text = format_cell(table.column(col).as_ref(), row);
    match config.max_col_width {
        Some(width) => truncate_cell(&text, width),
        None => text,
    }
}

/// Render `table` as an HTML fragment under the given display limits.
#[must_use]
pub fn render_html(table: &CanonicalTable, config: &DisplayConfig) -> String {
    let columns = rendered_columns(table.num_columns(), config.max_columns);
    let names = table.column_names();

    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n");
    html.push_str("  <thead>\n    <tr>\n      <th></th>\n");
    for column in &columns {
        match column {
            RenderColumn::Data(i) => {
                html.push_str("      <th>");
                html.push_str(&escape_html(names[*i]));
                html.push_str("</th>\n");
            }
            RenderColumn::Elision => {
                html.push_str("      <th>");
                html.push_str(ELLIPSIS);
                html.push_str("</th>\n");
            }
        }
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in 0..table.num_rows() {
        html.push_str("    <tr>\n      <th>");
        html.push_str(&escape_html(&table.index().label(row)));
        html.push_str("</th>\n");
        for column in &columns {
            match column {
                RenderColumn::Data(i) => {
                    html.push_str("      <td>");
                    html.push_str(&escape_html(&cell_text(table, row, *i, config)));
                    html.push_str("</td>\n");
                }
                RenderColumn::Elision => {
                    html.push_str("      <td>");
                    html.push_str(ELLIPSIS);
                    html.push_str("</td>\n");
                }
            }
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}
