//! Serialization options.

use serde::{Deserialize, Serialize};

/// Options threaded into every top-level serialization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Emit `(newline line "file")` in front of marked statements.
    pub include_line_markers: bool,
}

impl Options {
    pub fn with_line_markers(mut self, include: bool) -> Self {
        self.include_line_markers = include;
        self
    }

    pub fn from_json(config: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(config)
    }
}
