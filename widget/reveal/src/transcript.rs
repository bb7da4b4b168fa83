//! In-memory mount: the reference transcript target and test double.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use replykit_core::{Mount, MountId, SuggestionHandler, WidgetError};

/// Accumulates what a chat bubble would show: the live plain-text run during
/// an animation, the final HTML after it, and any suggestion controls.
///
/// In a non-browser embedding this is the widget's output surface; tests use
/// it to observe scheduler behavior. `detach` models the backing element
/// being removed (panel closed, component torn down).
pub struct TranscriptBuffer {
    id: MountId,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    live_text: String,
    html: String,
    suggestions: Vec<SuggestionControl>,
    scrolls: u64,
    detached: bool,
}

struct SuggestionControl {
    label: String,
    on_activate: SuggestionHandler,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self {
            id: MountId::new(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Mark the mount as gone; subsequent mutation fails with
    /// [`WidgetError::MountDetached`].
    pub fn detach(&self) {
        self.lock().detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.lock().detached
    }

    /// The unformatted text revealed so far. Empty once the final HTML has
    /// been installed.
    pub fn live_text(&self) -> String {
        self.lock().live_text.clone()
    }

    /// The formatted content, if a reveal has completed.
    pub fn html(&self) -> String {
        self.lock().html.clone()
    }

    pub fn suggestion_labels(&self) -> Vec<String> {
        self.lock()
            .suggestions
            .iter()
            .map(|control| control.label.clone())
            .collect()
    }

    /// Number of scroll adjustments requested so far.
    pub fn scroll_count(&self) -> u64 {
        self.lock().scrolls
    }

    /// Activate the `index`-th suggestion control, as a user click would.
    pub fn activate_suggestion(&self, index: usize) -> Result<(), WidgetError> {
        let handler = {
            let inner = self.lock();
            if inner.detached {
                return Err(WidgetError::MountDetached);
            }
            let control = inner
                .suggestions
                .get(index)
                .ok_or(WidgetError::NoSuchSuggestion(index))?;
            Arc::clone(&control.on_activate)
        };
        handler();
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The buffer holds no invariant that a panicked writer could break.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TranscriptBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mount for TranscriptBuffer {
    fn id(&self) -> MountId {
        self.id
    }

    fn append_text(&self, chunk: &str) -> Result<(), WidgetError> {
        let mut inner = self.lock();
        if inner.detached {
            return Err(WidgetError::MountDetached);
        }
        inner.live_text.push_str(chunk);
        Ok(())
    }

    fn set_html(&self, html: &str) -> Result<(), WidgetError> {
        let mut inner = self.lock();
        if inner.detached {
            return Err(WidgetError::MountDetached);
        }
        inner.live_text.clear();
        inner.html = html.to_string();
        Ok(())
    }

    fn add_suggestion(
        &self,
        label: &str,
        on_activate: SuggestionHandler,
    ) -> Result<(), WidgetError> {
        let mut inner = self.lock();
        if inner.detached {
            return Err(WidgetError::MountDetached);
        }
        inner.suggestions.push(SuggestionControl {
            label: label.to_string(),
            on_activate,
        });
        Ok(())
    }

    fn scroll_to_latest(&self) {
        let mut inner = self.lock();
        if !inner.detached {
            inner.scrolls += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn set_html_clears_the_live_text() {
        let mount = TranscriptBuffer::new();
        mount.append_text("typing...").unwrap();
        mount.set_html("<p>typed</p>").unwrap();
        assert!(mount.live_text().is_empty());
        assert_eq!(mount.html(), "<p>typed</p>");
    }

    #[test]
    fn detached_mount_rejects_mutation() {
        let mount = TranscriptBuffer::new();
        mount.detach();
        assert_eq!(mount.append_text("x"), Err(WidgetError::MountDetached));
        assert_eq!(mount.set_html("<p></p>"), Err(WidgetError::MountDetached));
        // Scrolling is a no-op rather than an error.
        mount.scroll_to_latest();
        assert_eq!(mount.scroll_count(), 0);
    }

    #[test]
    fn suggestion_controls_invoke_their_handler() {
        let mount = TranscriptBuffer::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        mount
            .add_suggestion(
                "More",
                Arc::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
        mount.activate_suggestion(0).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(
            mount.activate_suggestion(5),
            Err(WidgetError::NoSuchSuggestion(5))
        );
    }
}
