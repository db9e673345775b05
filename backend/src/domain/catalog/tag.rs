//! Product tags.

use crate::domain::identifiers::TagValue;

use super::DisplayText;

/// Stored tag. Both `name` and `value` are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: DisplayText,
    pub value: TagValue,
}

/// Tag creation request; the value is derived from `name` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub name: DisplayText,
    pub value: Option<TagValue>,
}

/// Tag insert with a resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: DisplayText,
    pub value: TagValue,
}

/// Partial tag update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<DisplayText>,
    pub value: Option<TagValue>,
}
