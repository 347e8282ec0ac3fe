//! Recommended side of a binary market.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side of a binary market the model recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
    /// No trade; never emitted as an analysis.
    Skip,
}

impl Side {
    /// Lenient parse of a model-supplied side.
    ///
    /// Anything other than YES or NO (any case, surrounding whitespace allowed)
    /// reads as [`Side::Skip`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "YES" => Self::Yes,
            "NO" => Self::No,
            _ => Self::Skip,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
