//! Markup-to-HTML engine for assistant replies.
//!
//! Converts the markup subset emitted by the assistant backend (fenced code,
//! inline code/bold/italic, links, loose list lines) into safe HTML for chat
//! bubbles, plus a plain-text rendering path for voice and notification
//! previews.

pub mod escape;
pub mod fence;
pub mod inline;
pub mod ir;
pub mod renderer;

pub use ir::{Block, BlockParser, ListType};
pub use renderer::{Renderer, render};
