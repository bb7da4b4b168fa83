use std::sync::Arc;

use crate::error::WidgetError;
use crate::types::MountId;

/// Callback invoked when a rendered suggestion control is activated.
pub type SuggestionHandler = Arc<dyn Fn() + Send + Sync>;

/// A place replies are displayed — the stand-in for the DOM insertion point.
///
/// Implementations are expected to be cheap interior-mutability wrappers; the
/// reveal scheduler calls into these methods once per animation tick.
/// Mutating calls on a detached mount return [`WidgetError::MountDetached`];
/// scrolling a detached mount is a no-op.
pub trait Mount: Send + Sync {
    /// Stable identity of this mount, used to serialize reveals against it.
    fn id(&self) -> MountId;

    /// Append a run of plain text to the live (unformatted) content.
    fn append_text(&self, chunk: &str) -> Result<(), WidgetError>;

    /// Replace the mount's entire content with rendered HTML.
    fn set_html(&self, html: &str) -> Result<(), WidgetError>;

    /// Append one actionable suggestion control after the content.
    fn add_suggestion(
        &self,
        label: &str,
        on_activate: SuggestionHandler,
    ) -> Result<(), WidgetError>;

    /// Keep the newest content in view.
    fn scroll_to_latest(&self);
}
