//! Core types, traits, and errors shared across the ReplyKit widget engine.

pub mod error;
pub mod traits;
pub mod types;

pub use error::WidgetError;
pub use traits::{Mount, SuggestionHandler};
pub use types::{MountId, Reply};
