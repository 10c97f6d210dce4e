//! Form field value objects

use crate::upload::SelectedFile;
use serde::{Deserialize, Serialize};

/// Value carried by a named form entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    File(SelectedFile),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// One named entry of a form; repeatable sections share a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text entry
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: FieldValue::Text(value.to_string()),
        }
    }

    /// Create a new file entry
    pub fn file(name: &str, file: SelectedFile) -> Self {
        Self {
            name: name.to_string(),
            value: FieldValue::File(file),
        }
    }

    /// Get the text value (returns empty string for file entries)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::File(_) => "",
        }
    }

    /// Get the selected file, if this is a file entry
    pub fn as_file(&self) -> Option<&SelectedFile> {
        match &self.value {
            FieldValue::File(f) => Some(f),
            FieldValue::Text(_) => None,
        }
    }

    /// Whether the trimmed text value is empty
    pub fn is_blank(&self) -> bool {
        self.as_text().trim().is_empty()
    }
}
