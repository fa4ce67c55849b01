//! Splitter selection.

use std::fmt;
use std::str::FromStr;

use embedkit_core::ExtractError;
use serde::{Deserialize, Serialize};

/// Which splitting strategy to run. Parsed from the `text_splitter` param.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSplitterKind {
    /// Split on blank lines, breaking oversized paragraphs at whitespace.
    Char,
    /// Split on paragraphs, then lines, words and finally characters.
    #[default]
    Recursive,
}

impl TextSplitterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSplitterKind::Char => "char",
            TextSplitterKind::Recursive => "recursive",
        }
    }
}

impl fmt::Display for TextSplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextSplitterKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(TextSplitterKind::Char),
            "recursive" => Ok(TextSplitterKind::Recursive),
            other => Err(ExtractError::UnsupportedConfig(format!(
                "unknown text_splitter '{other}' (expected 'char' or 'recursive')"
            ))),
        }
    }
}
