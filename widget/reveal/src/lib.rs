//! Character-by-character reveal of assistant replies.
//!
//! Plays a reply into a mount point one character per timer tick, then swaps
//! in the formatted render from the `markup` crate and wires up suggestion
//! controls. At most one animation runs per mount; starting a new reveal
//! cancels any animation still pending against the same mount.

pub mod pacing;
pub mod scheduler;
pub mod transcript;

pub use pacing::Pacing;
pub use scheduler::{OnSuggestion, RevealOutcome, RevealScheduler};
pub use transcript::TranscriptBuffer;
