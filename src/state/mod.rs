//! Submission and progress state

mod steps;
mod submission;

pub use steps::*;
pub use submission::*;
