//! Sex strata used for the stratified analysis

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sex stratum of a test record
///
/// Only records whose `Gender` matches one of the configured codes exactly
/// belong to a stratum; everything else is left out of the stratified
/// analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Both strata in output order
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Suffix used in output file names
    #[must_use]
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Match a raw `Gender` value against the configured codes
    #[must_use]
    pub fn from_code(value: &str, male_code: &str, female_code: &str) -> Option<Self> {
        if value == male_code {
            Some(Self::Male)
        } else if value == female_code {
            Some(Self::Female)
        } else {
            None
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}
