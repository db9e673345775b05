//! Characteristic templates and their items.
//!
//! A template groups named characteristics (`"Sole"`, `"Upper"`) that
//! products link to individually.

use super::DisplayText;

/// One characteristic inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicItem {
    pub id: i32,
    pub template_id: i32,
    pub name: DisplayText,
    pub label: String,
    pub value: String,
}

/// Stored template with its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicTemplate {
    pub id: i32,
    pub name: DisplayText,
    pub description: Option<String>,
    pub items: Vec<CharacteristicItem>,
}

/// Item as supplied on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicItemDraft {
    pub name: DisplayText,
    pub label: String,
    pub value: String,
}

/// Template creation request. Template names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicTemplateDraft {
    pub name: DisplayText,
    pub description: Option<String>,
    pub items: Vec<CharacteristicItemDraft>,
}

/// Partial template update. `items`, when present, replaces every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacteristicTemplatePatch {
    pub name: Option<DisplayText>,
    pub description: Option<String>,
    pub items: Option<Vec<CharacteristicItemDraft>>,
}
