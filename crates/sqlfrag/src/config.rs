//! Builder configuration.
//!
//! The process-wide default placeholder format is read once, when a builder is
//! constructed; after that it travels with the builder's snapshots. Changing
//! the default never affects builders that already exist.

use crate::placeholder::PlaceholderFormat;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

static DEFAULT_PLACEHOLDER_FORMAT: RwLock<PlaceholderFormat> =
    RwLock::new(PlaceholderFormat::Question);

/// Set the placeholder format used by builders created afterwards through
/// [`select`](crate::select), [`insert`](crate::insert), etc.
pub fn set_default_placeholder_format(format: PlaceholderFormat) {
    let mut guard = DEFAULT_PLACEHOLDER_FORMAT
        .write()
        .unwrap_or_else(|e| e.into_inner());
    *guard = format;
}

/// The current process-wide default placeholder format.
pub fn default_placeholder_format() -> PlaceholderFormat {
    *DEFAULT_PLACEHOLDER_FORMAT
        .read()
        .unwrap_or_else(|e| e.into_inner())
}

/// Configuration for a [`StatementBuilder`](crate::StatementBuilder).
///
/// Deserializable, so it can live in an application's config file:
///
/// ```ignore
/// let cfg: QbConfig = serde_json::from_str(r#"{ "placeholder_format": "dollar" }"#)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QbConfig {
    /// Placeholder format for rendered statements.
    pub placeholder_format: PlaceholderFormat,
}

impl QbConfig {
    /// Create a new configuration with defaults (`?` placeholders).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration reflecting the current process-wide default.
    pub fn current() -> Self {
        Self {
            placeholder_format: default_placeholder_format(),
        }
    }

    /// Set the placeholder format.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.placeholder_format = format;
        self
    }
}
