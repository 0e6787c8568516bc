//! Refresh orchestration: one active resolution session at a time.
//!
//! [`RefreshOrchestrator::change_user`] cancels the active session, clears the
//! sink, and spawns a new session task. Session tasks deliver through
//! [`Shared::deliver`], which re-checks ownership under the same lock that
//! `change_user` takes, so a superseded session can never render after the
//! clear that replaced it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::control::CancelToken;
use crate::fetch::Transport;
use crate::roster::{EntityDetail, Resolution, RosterEvent, RosterResolver, UserId};
use crate::sink::RenderSink;


type SessionId = u64;

/// Live state of the active session.
struct ActiveSession {
    id: SessionId,
    user: UserId,
    cancel: CancelToken,
    rendered: Vec<EntityDetail>,
    task: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct Slot {
    active: Option<ActiveSession>,
    last_id: SessionId,
}

struct Shared<T, S> {
    resolver: RosterResolver<T>,
    sink: Arc<S>,
    slot: Mutex<Slot>,
}

impl<T, S: RenderSink> Shared<T, S> {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Render `event` if session `id` still owns the sink. Returns false once it doesn't.
    fn deliver(&self, id: SessionId, event: RosterEvent) -> bool {
        let mut slot = self.lock();
        let Some(active) = slot
            .active
            .as_mut()
            .filter(|a| a.id == id && !a.cancel.is_cancelled())
        else {
            tracing::debug!(session = id, "dropping result of superseded session");
            return false;
        };
        match event {
            RosterEvent::PlayerName(name) => self.sink.on_player_name(&name),
            RosterEvent::Entity(detail) => {
                self.sink
                    .on_card_resolved(&detail.display_name, &detail.image_url);
                active.rendered.push(detail);
            }
            RosterEvent::Failed(err) => self.sink.on_error(&err.to_string()),
        }
        true
    }
}

/// Owns the active-user state and the single active session.
///
/// `change_user` must be called from within a tokio runtime.
pub struct RefreshOrchestrator<T, S> {
    shared: Arc<Shared<T, S>>,
}

impl<T: Transport, S: RenderSink> RefreshOrchestrator<T, S> {
    pub fn new(resolver: RosterResolver<T>, sink: Arc<S>) -> Self {
        Self {
            shared: Arc::new(Shared {
                resolver,
                sink,
                slot: Mutex::new(Slot::default()),
            }),
        }
    }

    /// Switch to `user`: cancel and clear the previous session, then start
    /// resolving `user` in the background. Returns immediately.
    pub fn change_user(&self, user: UserId) {
        let mut slot = self.shared.lock();
        if let Some(previous) = slot.active.take() {
            previous.cancel.cancel();
            tracing::debug!(
                session = previous.id,
                user = previous.user,
                rendered = previous.rendered.len(),
                "session superseded"
            );
        }
        self.shared.sink.on_clear_all();
        self.shared.sink.on_user_changed(user);

        slot.last_id += 1;
        let id = slot.last_id;
        let cancel = CancelToken::new();
        let resolution = self.shared.resolver.resolve(user, cancel.clone());
        tracing::info!(session = id, user, "starting roster refresh");

        // The task blocks on the slot lock until this call releases it.
        let task = tokio::spawn(run_session(Arc::clone(&self.shared), id, resolution));
        slot.active = Some(ActiveSession {
            id,
            user,
            cancel,
            rendered: Vec::new(),
            task: Some(task),
        });
    }

    /// User of the active session, if any.
    pub fn current_user(&self) -> Option<UserId> {
        self.shared.lock().active.as_ref().map(|a| a.user)
    }

    /// Cards rendered so far by the active session, in delivery order.
    pub fn rendered(&self) -> Vec<EntityDetail> {
        self.shared
            .lock()
            .active
            .as_ref()
            .map(|a| a.rendered.clone())
            .unwrap_or_default()
    }

    /// Wait for the active session's task to finish. Returns at once if there
    /// is none or it was already awaited.
    pub async fn wait(&self) {
        let task = self
            .shared
            .lock()
            .active
            .as_mut()
            .and_then(|a| a.task.take());
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "session task ended abnormally");
            }
        }
    }

    /// Cancel the active session. Rendered state stays readable until the next change.
    pub fn shutdown(&self) {
        if let Some(active) = self.shared.lock().active.as_ref() {
            active.cancel.cancel();
            tracing::debug!(session = active.id, "session cancelled on shutdown");
        }
    }
}

async fn run_session<T: Transport, S: RenderSink>(
    shared: Arc<Shared<T, S>>,
    id: SessionId,
    mut resolution: Resolution<T>,
) {
    let user = resolution.user();
    let mut delivered = 0usize;
    while let Some(event) = resolution.next().await {
        if !shared.deliver(id, event) {
            return;
        }
        delivered += 1;
    }
    tracing::info!(session = id, user, delivered, "roster refresh finished");
}
