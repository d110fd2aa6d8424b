// ============================================================
// Layer 3 — Match Format
// ============================================================
// The three cricket match formats, each backed by its own
// dataset file inside the data directory.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    T20,
    #[serde(rename = "ODI")]
    Odi,
    Test,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::T20, Format::Odi, Format::Test];

    /// File name of this format's dataset, relative to the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Format::T20  => "t20.csv",
            Format::Odi  => "ODI data.csv",
            Format::Test => "test.csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Format::T20  => "T20",
            Format::Odi  => "ODI",
            Format::Test => "Test",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Format::T20.to_string(), "T20");
        assert_eq!(Format::Odi.to_string(), "ODI");
        assert_eq!(Format::Test.to_string(), "Test");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Format::T20.file_name(), "t20.csv");
        assert_eq!(Format::Odi.file_name(), "ODI data.csv");
        assert_eq!(Format::Test.file_name(), "test.csv");
    }
}
