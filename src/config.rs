//! Display configuration and scoped overrides.
//!
//! Rendering operations override the display limits for the duration of a
//! single call and must restore the previous values on every exit path,
//! including early returns. [`ConfigOverride`] encodes that contract as an
//! RAII guard.

/// Column-width ceiling used for legacy rendering targets whose HTML
/// primitive rejects an uncapped width setting.
pub const LEGACY_MAX_COLWIDTH: usize = 100_000;

/// Display limits consulted by the HTML renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Maximum number of columns rendered before elision. `None` is unlimited.
    pub max_columns: Option<usize>,
    /// Maximum cell text width in characters. `None` is uncapped.
    pub max_col_width: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_columns: Some(20),
            max_col_width: Some(50),
        }
    }
}

impl DisplayConfig {
    /// Configuration with no column or width limits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_columns: None,
            max_col_width: None,
        }
    }
}

/// Scoped override of a [`DisplayConfig`].
///
/// Snapshots the current settings on construction, applies the overrides,
/// and restores the snapshot when dropped. Dropping on an error return or a
/// panic restores the settings all the same.
#[derive(Debug)]
pub struct ConfigOverride<'a> {
    config: &'a mut DisplayConfig,
    saved: DisplayConfig,
}

impl<'a> ConfigOverride<'a> {
    /// Override `config` with the given limits until the guard drops.
    #[must_use]
    pub fn apply(
        config: &'a mut DisplayConfig,
        max_columns: Option<usize>,
        max_col_width: Option<usize>,
    ) -> Self {
        let saved = *config;
        config.max_columns = max_columns;
        config.max_col_width = max_col_width;
        Self { config, saved }
    }

    /// The settings currently in force.
    #[must_use]
    pub fn config(&self) -> DisplayConfig {
        *self.config
    }
}

impl Drop for ConfigOverride<'_> {
    fn drop(&mut self) {
        *self.config = self.saved;
    }
}
