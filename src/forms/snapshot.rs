//! Point-in-time copy of a form's entries

use super::field::{FieldValue, FormField};
use crate::upload::SelectedFile;
use serde::{Deserialize, Serialize};

/// Entries of a form plus its declared action, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSnapshot {
    pub fn new(action: Option<&str>) -> Self {
        Self {
            action: action.map(str::to_string),
            fields: Vec::new(),
        }
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.push(FormField::text(name, value));
        self
    }

    pub fn with_file(mut self, name: &str, file: SelectedFile) -> Self {
        self.fields.push(FormField::file(name, file));
        self
    }

    /// All entries sharing `name`
    pub fn entries<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormField> + 'a {
        self.fields.iter().filter(move |f| f.name == name)
    }

    /// First entry named `name`
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Text values of every entry named `name`
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries(name).map(FormField::as_text)
    }

    /// Text entries as `(name, value)` pairs
    pub fn text_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|f| match &f.value {
                FieldValue::Text(v) => Some((f.name.clone(), v.clone())),
                FieldValue::File(_) => None,
            })
            .collect()
    }

    /// File entries as `(name, file)` pairs
    pub fn files(&self) -> impl Iterator<Item = (&str, &SelectedFile)> {
        self.fields
            .iter()
            .filter_map(|f| f.as_file().map(|file| (f.name.as_str(), file)))
    }

    pub fn has_files(&self) -> bool {
        self.files().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample() -> FormSnapshot {
        FormSnapshot::new(Some("/bots/new"))
            .with_text("plan_names[]", "Semanal")
            .with_text("plan_names[]", "Mensal")
            .with_text("token", "1:abc")
    }

    #[test]
    fn test_values_keep_document_order() {
        let form = sample();
        let names: Vec<&str> = form.values("plan_names[]").collect();
        assert_eq!(names, vec!["Semanal", "Mensal"]);
    }

    #[test]
    fn test_field_returns_first_match() {
        let form = sample();
        assert_eq!(form.field("token").unwrap().as_text(), "1:abc");
        assert!(form.field("missing").is_none());
    }

    #[test]
    fn test_field_outlives_lookup_key() {
        let form = sample();
        let found = {
            let key = format!("{}n", "toke");
            form.field(&key)
        };
        assert_eq!(found.map(FormField::as_text), Some("1:abc"));
    }

    #[test]
    fn test_text_pairs_skip_files() {
        let form = FormSnapshot::new(None)
            .with_text("name", "Bot")
            .with_file(
                "welcome_audio",
                SelectedFile {
                    name: "hi.ogg".to_string(),
                    mime: "audio/ogg".to_string(),
                    size: 3,
                    path: PathBuf::from("hi.ogg"),
                },
            );
        assert_eq!(
            form.text_pairs(),
            vec![("name".to_string(), "Bot".to_string())]
        );
        assert!(form.has_files());
    }

    #[test]
    fn test_deserialize_form_description() {
        let json = r#"{
            "action": "/bots/new",
            "fields": [
                {"name": "token", "value": "1:abc"},
                {"name": "welcome_image", "value": {"name": "a.png", "mime": "image/png", "size": 4, "path": "a.png"}}
            ]
        }"#;
        let form: FormSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(form.action.as_deref(), Some("/bots/new"));
        assert_eq!(form.field("token").unwrap().as_text(), "1:abc");
        assert!(form.field("welcome_image").unwrap().as_file().is_some());
    }
}
