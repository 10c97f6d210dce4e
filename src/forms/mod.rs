//! Form domain layer
//!
//! Snapshots of the bot form and the pure validators that run over them.

mod credentials;
mod field;
mod snapshot;
mod validators;

pub use credentials::{format_group_id, validate_group_id, validate_telegram_token};
pub use field::{FieldValue, FormField};
pub use snapshot::FormSnapshot;
pub use validators::{
    parse_float, validate_offer_section, validate_plan_section, OfferFieldNames, PlanSelectors,
    SectionValidationResult, ValidationFailure, MIN_PRICE,
};
