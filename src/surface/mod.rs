//! Page abstraction the helpers read from and write to

mod memory;
mod traits;

pub use memory::{Element, MemorySurface, ScheduledRedirect};
pub use traits::{Display, UiSurface};
