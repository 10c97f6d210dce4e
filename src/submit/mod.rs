//! Submission orchestration: local checks, Bot API verification, POST and redirect

mod error;
mod options;
mod orchestrator;
mod transport;

pub use error::{classify_save_error, classify_verified_error, ErrorNotice, SubmitError};
pub use options::{CredentialFields, FormVariant, SubmitOptions, REDIRECT_DELAY};
pub use orchestrator::{SubmissionOrchestrator, SubmitOutcome};
pub use transport::{FormTransport, HttpFormTransport, SubmitResponse, TransportError};

#[cfg(test)]
pub use transport::MockFormTransport;
