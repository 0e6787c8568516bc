//! Render sink: the boundary between the core and whatever displays results.
//!
//! The orchestrator calls these methods while holding its session lock, so an
//! implementation must not call back into the orchestrator.

use std::sync::Mutex;

use crate::roster::UserId;

/// Receives display updates for the active session.
pub trait RenderSink: Send + Sync + 'static {
    /// The displayed "current user" changed. Called on every user change.
    fn on_user_changed(&self, user: UserId);
    fn on_player_name(&self, name: &str);
    /// A character card resolved. Fetching `image_url` is up to the sink.
    fn on_card_resolved(&self, display_name: &str, image_url: &str);
    /// Remove every card rendered so far.
    fn on_clear_all(&self);
    fn on_error(&self, message: &str);
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    UserChanged(UserId),
    PlayerName(String),
    Card { name: String, image_url: String },
    ClearAll,
    Error(String),
}

/// Sink that records every call in order. For headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.lock().clone()
    }

    /// Card names currently on screen (cards since the last clear).
    pub fn visible_cards(&self) -> Vec<String> {
        let events = self.lock();
        let start = events
            .iter()
            .rposition(|e| *e == SinkEvent::ClearAll)
            .map_or(0, |i| i + 1);
        events[start..]
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Card { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: SinkEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SinkEvent>> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RenderSink for MemorySink {
    fn on_user_changed(&self, user: UserId) {
        self.push(SinkEvent::UserChanged(user));
    }

    fn on_player_name(&self, name: &str) {
        self.push(SinkEvent::PlayerName(name.to_string()));
    }

    fn on_card_resolved(&self, display_name: &str, image_url: &str) {
        self.push(SinkEvent::Card {
            name: display_name.to_string(),
            image_url: image_url.to_string(),
        });
    }

    fn on_clear_all(&self) {
        self.push(SinkEvent::ClearAll);
    }

    fn on_error(&self, message: &str) {
        self.push(SinkEvent::Error(message.to_string()));
    }
}
