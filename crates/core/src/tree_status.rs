//! Tree lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a canonical tree, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStatus {
    Active,
    Removed,
}

impl TreeStatus {
    /// Database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TreeStatus::Active => "active",
            TreeStatus::Removed => "removed",
        }
    }

    /// Parse the database representation. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(TreeStatus::Active),
            "removed" => Some(TreeStatus::Removed),
            _ => None,
        }
    }

    /// Status implied by an inspection's `tree_removed` flag.
    ///
    /// An absent flag leaves the current status untouched.
    pub fn from_removal_flag(tree_removed: Option<bool>) -> Option<Self> {
        tree_removed.map(|removed| {
            if removed {
                TreeStatus::Removed
            } else {
                TreeStatus::Active
            }
        })
    }
}

impl std::fmt::Display for TreeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
