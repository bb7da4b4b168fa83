//! The reveal scheduler: one cancellable timed animation per mount.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use replykit_core::{Mount, MountId, Reply, SuggestionHandler};

use crate::pacing::Pacing;

/// Callback that feeds an activated suggestion back into the send pipeline,
/// exactly as if the user had typed and submitted it.
pub type OnSuggestion = Arc<dyn Fn(&str) + Send + Sync>;

/// How a reveal animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Full text revealed and the formatted render installed.
    Completed,
    /// Superseded by a newer reveal on the same mount, or cancelled
    /// externally.
    Cancelled,
    /// The mount went away mid-animation; resolved early, nothing installed.
    Detached,
}

/// Progress of one in-flight animation. Owned by a single reveal call and
/// dropped when it resolves.
struct RevealState {
    index: usize,
    total: usize,
    delay: Duration,
}

struct ActiveReveal {
    generation: u64,
    token: CancellationToken,
}

/// Drives character reveals, guaranteeing at most one live animation per
/// mount: starting a reveal cancels any animation still pending against the
/// same mount, so two replies can never interleave into one bubble.
pub struct RevealScheduler {
    pacing: Pacing,
    generations: AtomicU64,
    active: Mutex<HashMap<MountId, ActiveReveal>>,
}

impl RevealScheduler {
    pub fn new() -> Self {
        Self::with_pacing(Pacing::default())
    }

    pub fn with_pacing(pacing: Pacing) -> Self {
        Self {
            pacing,
            generations: AtomicU64::new(0),
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Animate `reply.text` into `mount` one character per tick, then swap
    /// in the formatted render and suggestion controls.
    ///
    /// Resolves once the full text has been displayed, or early on
    /// cancellation or mount detachment. A zero-length reply schedules no
    /// ticks and goes straight to the formatted render.
    pub async fn reveal(
        &self,
        reply: &Reply,
        mount: Arc<dyn Mount>,
        on_suggestion: OnSuggestion,
    ) -> RevealOutcome {
        let mount_id = mount.id();
        let (generation, token) = self.begin(mount_id).await;
        let outcome = self.run(reply, mount.as_ref(), &token, on_suggestion).await;
        self.finish(mount_id, generation).await;
        debug!(mount = %mount_id, ?outcome, "reveal resolved");
        outcome
    }

    /// Cancel the animation pending against `mount_id`, if any.
    pub async fn cancel(&self, mount_id: MountId) -> bool {
        let mut active = self.active.lock().await;
        match active.remove(&mount_id) {
            Some(entry) => {
                debug!(mount = %mount_id, "reveal cancelled");
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every pending animation (component teardown).
    pub async fn cancel_all(&self) {
        let mut active = self.active.lock().await;
        for (_, entry) in active.drain() {
            entry.token.cancel();
        }
    }

    /// Register a fresh token for the mount, cancelling any predecessor.
    async fn begin(&self, mount_id: MountId) -> (u64, CancellationToken) {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        let mut active = self.active.lock().await;
        let entry = ActiveReveal {
            generation,
            token: token.clone(),
        };
        if let Some(previous) = active.insert(mount_id, entry) {
            debug!(mount = %mount_id, "superseding pending reveal");
            previous.token.cancel();
        }
        (generation, token)
    }

    /// Deregister, unless a newer reveal has already replaced the entry.
    async fn finish(&self, mount_id: MountId, generation: u64) {
        let mut active = self.active.lock().await;
        if active
            .get(&mount_id)
            .is_some_and(|entry| entry.generation == generation)
        {
            active.remove(&mount_id);
        }
    }

    async fn run(
        &self,
        reply: &Reply,
        mount: &dyn Mount,
        token: &CancellationToken,
        on_suggestion: OnSuggestion,
    ) -> RevealOutcome {
        let chars: Vec<char> = reply.text.chars().collect();
        let mut state = RevealState {
            index: 0,
            total: chars.len(),
            delay: self.pacing.per_char_delay(chars.len()),
        };
        info!(
            mount = %mount.id(),
            chars = state.total,
            delay_ms = state.delay.as_millis() as u64,
            "reveal started"
        );

        let mut buf = [0u8; 4];
        while state.index < state.total {
            if token.is_cancelled() {
                return RevealOutcome::Cancelled;
            }
            let chunk = chars[state.index].encode_utf8(&mut buf);
            if mount.append_text(chunk).is_err() {
                return RevealOutcome::Detached;
            }
            mount.scroll_to_latest();
            state.index += 1;
            tokio::select! {
                _ = token.cancelled() => return RevealOutcome::Cancelled,
                _ = time::sleep(state.delay) => {}
            }
        }

        // A superseding reveal may have started during the last tick; its
        // final content must not be clobbered.
        if token.is_cancelled() {
            return RevealOutcome::Cancelled;
        }
        if mount.set_html(&markup::render(&reply.text)).is_err() {
            return RevealOutcome::Detached;
        }
        if !reply.suggestions.is_empty() {
            for label in &reply.suggestions {
                let feed = Arc::clone(&on_suggestion);
                let text = label.clone();
                let handler: SuggestionHandler = Arc::new(move || feed(&text));
                if mount.add_suggestion(label, handler).is_err() {
                    return RevealOutcome::Detached;
                }
            }
            mount.scroll_to_latest();
        }
        RevealOutcome::Completed
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new()
    }
}
