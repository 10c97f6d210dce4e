//! Trait abstraction over the page the form lives in

use crate::forms::FormSnapshot;
use crate::upload::SelectedFile;
use std::time::Duration;

/// CSS-like display modes the helpers toggle between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
    InlineBlock,
}

impl Display {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Display::None)
    }
}

/// Get/set operations on locations of the page, addressed by opaque locators.
///
/// Setters return `false` when the locator does not resolve; getters return
/// `None`. Callers treat an unresolved locator as "nothing to do", never as
/// an error, so partial page templates keep working.
pub trait UiSurface: Send + Sync {
    /// Whether the locator resolves to anything
    fn exists(&self, locator: &str) -> bool;

    /// Text content of a location
    fn text(&self, locator: &str) -> Option<String>;

    /// Replace the text content of a location
    fn set_text(&self, locator: &str, text: &str) -> bool;

    /// Current value of an input location
    fn value(&self, locator: &str) -> Option<String>;

    /// Replace the value of an input location
    fn set_value(&self, locator: &str, value: &str) -> bool;

    /// Change how a location is displayed
    fn set_display(&self, locator: &str, display: Display) -> bool;

    /// Enable or disable a control
    fn set_disabled(&self, locator: &str, disabled: bool) -> bool;

    /// Whether a control is disabled (absent controls are never disabled)
    fn is_disabled(&self, locator: &str) -> bool;

    /// Allow or block pointer interaction with a location
    fn set_pointer_events(&self, locator: &str, enabled: bool) -> bool;

    /// Read an attribute
    fn attribute(&self, locator: &str, name: &str) -> Option<String>;

    /// Write an attribute
    fn set_attribute(&self, locator: &str, name: &str, value: &str) -> bool;

    /// Replace the full class list
    fn set_class(&self, locator: &str, class: &str) -> bool;

    /// Add one class to the class list
    fn add_class(&self, locator: &str, class: &str) -> bool;

    /// Remove one class from the class list
    fn remove_class(&self, locator: &str, class: &str) -> bool;

    /// Replace the inner markup of a location
    fn set_html(&self, locator: &str, html: &str) -> bool;

    /// Scroll the viewport back to the top, smoothly
    fn scroll_to_top(&self);

    /// Show a blocking alert to the user
    fn alert(&self, message: &str);

    /// Attach or detach the file held by a file input
    fn set_file(&self, locator: &str, file: Option<&SelectedFile>) -> bool;

    /// Snapshot of every named field of a form, as its inputs hold them now
    fn read_form(&self, selector: &str) -> Option<FormSnapshot>;

    /// Current page location
    fn location(&self) -> String;

    /// Navigate to `url` once `delay` has passed
    fn schedule_redirect(&self, url: &str, delay: Duration);
}
