//! Botform - helpers behind the bot configuration forms
//!
//! Notification and busy surfaces, section validators, Bot API
//! verification of the bot token and its groups, the submission flow and
//! attachment rules, all driven through the [`surface::UiSurface`] page
//! abstraction.

pub mod app;
pub mod config;
pub mod forms;
pub mod state;
pub mod submit;
pub mod surface;
pub mod telegram;
pub mod ui;
pub mod upload;

pub use app::{EventOutcome, FormKit, UiEvent};
