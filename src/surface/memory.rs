//! In-memory page used by the headless binary and by tests

use super::traits::{Display, UiSurface};
use crate::forms::{FieldValue, FormField, FormSnapshot};
use crate::upload::SelectedFile;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// A single addressable location of the in-memory page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub value: String,
    pub html: String,
    pub classes: BTreeSet<String>,
    pub display: Option<Display>,
    pub disabled: bool,
    pub pointer_events: bool,
    pub attributes: HashMap<String, String>,
    /// File held by a file input
    pub file: Option<SelectedFile>,
}

impl Element {
    pub fn new() -> Self {
        Self {
            pointer_events: true,
            ..Default::default()
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::new()
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::new()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.display.is_some_and(|d| d.is_visible())
    }

    pub fn class_name(&self) -> String {
        self.classes.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

/// A redirect that was requested through [`UiSurface::schedule_redirect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRedirect {
    pub url: String,
    pub delay: Duration,
}

#[derive(Debug, Default)]
struct PageState {
    elements: HashMap<String, Element>,
    forms: HashMap<String, FormSnapshot>,
    alerts: Vec<String>,
    redirects: Vec<ScheduledRedirect>,
    scrolls: usize,
    location: String,
}

/// [`UiSurface`] backed by a map of locators to [`Element`]s
#[derive(Debug, Default)]
pub struct MemorySurface {
    page: Mutex<PageState>,
}

/// Locators of the standard bot form page
const BOT_FORM_LOCATORS: &[&str] = &[
    "errorDisplay",
    "errorTitle",
    "errorMessage",
    "successDisplay",
    "successTitle",
    "successMessage",
    "loadingOverlay",
    "loadingMessage",
    "step1",
    "step2",
    "step3",
    "step4",
    "submitBtn",
    "submitSpinner",
    "cancelBtn",
];

impl MemorySurface {
    pub fn new(location: &str) -> Self {
        Self {
            page: Mutex::new(PageState {
                location: location.to_string(),
                ..Default::default()
            }),
        }
    }

    /// A page carrying every slot of the default configuration
    pub fn bot_form_page(location: &str) -> Self {
        let surface = Self::new(location);
        for locator in BOT_FORM_LOCATORS {
            surface.insert(locator, Element::new());
        }
        surface.insert("submitText", Element::with_text("Criar Bot"));
        surface
    }

    fn page(&self) -> MutexGuard<'_, PageState> {
        // A panicked test thread must not poison every later assertion
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_element<F>(&self, locator: &str, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        match self.page().elements.get_mut(locator) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }

    pub fn insert(&self, locator: &str, element: Element) {
        self.page().elements.insert(locator.to_string(), element);
    }

    pub fn remove(&self, locator: &str) {
        self.page().elements.remove(locator);
    }

    pub fn insert_form(&self, selector: &str, form: FormSnapshot) {
        self.page().forms.insert(selector.to_string(), form);
    }

    /// Copy of an element, for inspection
    pub fn element(&self, locator: &str) -> Option<Element> {
        self.page().elements.get(locator).cloned()
    }

    pub fn is_visible(&self, locator: &str) -> bool {
        self.element(locator).is_some_and(|e| e.is_visible())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.page().alerts.clone()
    }

    pub fn redirects(&self) -> Vec<ScheduledRedirect> {
        self.page().redirects.clone()
    }

    pub fn scroll_count(&self) -> usize {
        self.page().scrolls
    }
}

impl UiSurface for MemorySurface {
    fn exists(&self, locator: &str) -> bool {
        self.page().elements.contains_key(locator)
    }

    fn text(&self, locator: &str) -> Option<String> {
        self.page().elements.get(locator).map(|e| e.text.clone())
    }

    fn set_text(&self, locator: &str, text: &str) -> bool {
        self.with_element(locator, |e| e.text = text.to_string())
    }

    fn value(&self, locator: &str) -> Option<String> {
        self.page().elements.get(locator).map(|e| e.value.clone())
    }

    fn set_value(&self, locator: &str, value: &str) -> bool {
        self.with_element(locator, |e| e.value = value.to_string())
    }

    fn set_display(&self, locator: &str, display: Display) -> bool {
        self.with_element(locator, |e| e.display = Some(display))
    }

    fn set_disabled(&self, locator: &str, disabled: bool) -> bool {
        self.with_element(locator, |e| e.disabled = disabled)
    }

    fn is_disabled(&self, locator: &str) -> bool {
        self.page()
            .elements
            .get(locator)
            .is_some_and(|e| e.disabled)
    }

    fn set_pointer_events(&self, locator: &str, enabled: bool) -> bool {
        self.with_element(locator, |e| e.pointer_events = enabled)
    }

    fn attribute(&self, locator: &str, name: &str) -> Option<String> {
        self.page()
            .elements
            .get(locator)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&self, locator: &str, name: &str, value: &str) -> bool {
        self.with_element(locator, |e| {
            e.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn set_class(&self, locator: &str, class: &str) -> bool {
        self.with_element(locator, |e| {
            e.classes = class.split_whitespace().map(str::to_string).collect();
        })
    }

    fn add_class(&self, locator: &str, class: &str) -> bool {
        self.with_element(locator, |e| {
            e.classes.insert(class.to_string());
        })
    }

    fn remove_class(&self, locator: &str, class: &str) -> bool {
        self.with_element(locator, |e| {
            e.classes.remove(class);
        })
    }

    fn set_html(&self, locator: &str, html: &str) -> bool {
        self.with_element(locator, |e| e.html = html.to_string())
    }

    fn scroll_to_top(&self) {
        self.page().scrolls += 1;
    }

    fn alert(&self, message: &str) {
        self.page().alerts.push(message.to_string());
    }

    fn set_file(&self, locator: &str, file: Option<&SelectedFile>) -> bool {
        self.with_element(locator, |e| e.file = file.cloned())
    }

    /// Entries named after an input take the input's current state; a file
    /// entry whose input no longer holds a file is left out.
    fn read_form(&self, selector: &str) -> Option<FormSnapshot> {
        let page = self.page();
        let form = page.forms.get(selector)?;
        let fields = form
            .fields
            .iter()
            .filter_map(|field| {
                let Some(input) = page.elements.get(&field.name) else {
                    return Some(field.clone());
                };
                match (&input.file, &field.value) {
                    (Some(file), _) => Some(FormField::file(&field.name, file.clone())),
                    (None, FieldValue::File(_)) => None,
                    (None, FieldValue::Text(_)) => Some(FormField::text(&field.name, &input.value)),
                }
            })
            .collect();
        Some(FormSnapshot {
            action: form.action.clone(),
            fields,
        })
    }

    fn location(&self) -> String {
        self.page().location.clone()
    }

    fn schedule_redirect(&self, url: &str, delay: Duration) {
        self.page().redirects.push(ScheduledRedirect {
            url: url.to_string(),
            delay,
        });
    }
}
