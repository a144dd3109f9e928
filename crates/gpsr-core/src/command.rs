//! Command records and their category tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag influencing which grammar branch produced a command.
///
/// Serializes to the wire tags the generator understands: `"people"`,
/// `"objects"`, or the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Objects,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Objects => "objects",
            Category::Unspecified => "",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated task command together with its alternative phrasings.
///
/// `command` and `kind` are fixed at generation time. `phrasings` starts
/// empty and is only ever replaced wholesale by a successful rephrase —
/// a failed rephrase leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub command: String,
    #[serde(default)]
    pub phrasings: Vec<String>,
    #[serde(default)]
    pub kind: Category,
}

impl CommandRecord {
    pub fn new(command: impl Into<String>, kind: Category) -> Self {
        Self {
            command: command.into(),
            phrasings: Vec::new(),
            kind,
        }
    }

    pub fn has_phrasings(&self) -> bool {
        !self.phrasings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_to_wire_tags() {
        assert_eq!(serde_json::to_string(&Category::People).unwrap(), "\"people\"");
        assert_eq!(serde_json::to_string(&Category::Objects).unwrap(), "\"objects\"");
        assert_eq!(serde_json::to_string(&Category::Unspecified).unwrap(), "\"\"");
    }

    #[test]
    fn category_display_matches_as_str() {
        assert_eq!(Category::People.to_string(), "people");
        assert_eq!(Category::Unspecified.to_string(), "");
    }

    #[test]
    fn new_record_has_no_phrasings() {
        let record = CommandRecord::new("fetch me a coke", Category::Objects);
        assert!(!record.has_phrasings());
        assert_eq!(record.kind, Category::Objects);
    }
}
