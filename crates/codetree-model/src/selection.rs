//! Tri-state selection value.

use serde::{Deserialize, Serialize};

/// Checkbox state of a node.
///
/// `Indeterminate` is only ever derived from children; nothing sets it
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl Selection {
    /// State of a parent given its direct children.
    ///
    /// No children counts as all-unchecked.
    pub fn from_children<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Selection>,
    {
        let mut any_checked = false;
        let mut any_unchecked = false;
        for child in children {
            match child {
                Selection::Checked => any_checked = true,
                Selection::Unchecked => any_unchecked = true,
                Selection::Indeterminate => return Selection::Indeterminate,
            }
            if any_checked && any_unchecked {
                return Selection::Indeterminate;
            }
        }
        if any_checked {
            Selection::Checked
        } else {
            Selection::Unchecked
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Selection::Checked
        } else {
            Selection::Unchecked
        }
    }

    pub fn is_checked(self) -> bool {
        self == Selection::Checked
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
            Self::Indeterminate => "indeterminate",
        }
    }
}
