//! Clinical thyroid categories derived from TSH

use std::fmt;

use serde::{Deserialize, Serialize};

/// Thyroid function category of a TSH value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThyroidStatus {
    /// TSH above the upper reference limit
    Hypothyroid,
    /// TSH below the lower reference limit
    Hyperthyroid,
    /// TSH within the reference interval
    Euthyroid,
    /// TSH on a threshold that the boundary policy leaves uncategorised
    Unclassified,
}

impl ThyroidStatus {
    /// All categories in report order
    pub const ALL: [Self; 4] = [
        Self::Hypothyroid,
        Self::Hyperthyroid,
        Self::Euthyroid,
        Self::Unclassified,
    ];

    /// Get the display name for this category
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Hypothyroid => "Hypothyroid",
            Self::Hyperthyroid => "Hyperthyroid",
            Self::Euthyroid => "Euthyroid",
            Self::Unclassified => "Boundary/Unclassified",
        }
    }
}

impl fmt::Display for ThyroidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
