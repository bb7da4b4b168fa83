use thiserror::Error;

/// Errors surfaced by widget mount points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The mount's backing element is gone (panel closed, node removed).
    #[error("mount detached")]
    MountDetached,

    #[error("no suggestion control at index {0}")]
    NoSuchSuggestion(usize),
}
