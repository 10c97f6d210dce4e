//! Notification and busy/progress surfaces

mod loading;
mod notifications;

pub use loading::{render_step, BusyIndicator, FALLBACK_SUBMIT_TEXT, ORIGINAL_TEXT_ATTR};
pub use notifications::Notifier;
