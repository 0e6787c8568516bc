//! Lazy roster resolution.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use super::error::ResolutionError;
use super::model::{parse_character, parse_roster};
use super::{Endpoints, EntityId, RosterEvent, UserId, UNKNOWN_PLAYER};
use crate::config::{ConfigError, RosterConfig};
use crate::control::CancelToken;
use crate::fetch::{Fetcher, Transport};

/// Resolves rosters against the roster service and the character API.
#[derive(Debug)]
pub struct RosterResolver<T> {
    fetcher: Fetcher<T>,
    endpoints: Endpoints,
    inter_entity_delay: Duration,
}

impl<T> Clone for RosterResolver<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            endpoints: self.endpoints.clone(),
            inter_entity_delay: self.inter_entity_delay,
        }
    }
}

impl<T: Transport> RosterResolver<T> {
    pub fn new(fetcher: Fetcher<T>, endpoints: Endpoints, inter_entity_delay: Duration) -> Self {
        Self {
            fetcher,
            endpoints,
            inter_entity_delay,
        }
    }

    /// Build from validated config values.
    pub fn from_config(cfg: &RosterConfig, transport: Arc<T>) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Fetcher::new(transport, cfg.retry_policy()?),
            cfg.endpoints()?,
            cfg.inter_entity_delay()?,
        ))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Start a resolution for `user`. Nothing is fetched until the first `next()`.
    pub fn resolve(&self, user: UserId, cancel: CancelToken) -> Resolution<T> {
        Resolution {
            resolver: self.clone(),
            user,
            cancel,
            state: State::Roster,
        }
    }

    /// `None` when the fetch was cancelled; nothing is reported for it.
    async fn fetch_entity(&self, id: EntityId, cancel: &CancelToken) -> Option<RosterEvent> {
        let url = self.endpoints.detail_url(id);
        let parsed = match self.fetcher.fetch(&url, cancel).await {
            Ok(body) => parse_character(&body).map_err(|e| ResolutionError::entity(id, e)),
            Err(e) if e.is_cancelled() => return None,
            Err(e) => Err(ResolutionError::entity(id, e)),
        };
        Some(match parsed {
            Ok(detail) => RosterEvent::Entity(detail),
            Err(err) => {
                tracing::warn!(entity = id, error = %err, "skipping character");
                RosterEvent::Failed(err)
            }
        })
    }
}

enum State {
    /// Roster not fetched yet.
    Roster,
    /// Walking the roster's ids; `paced` once the first id has been handled.
    Entities {
        ids: std::vec::IntoIter<EntityId>,
        paced: bool,
    },
    Done,
}

/// Single-use sequence of [`RosterEvent`]s for one user.
///
/// Order: `PlayerName`, then one `Entity` or `Failed` per roster id in roster
/// order. A roster failure yields a single `Failed` and ends the sequence.
/// Once the cancel token is seen the sequence ends and stays ended.
pub struct Resolution<T> {
    resolver: RosterResolver<T>,
    user: UserId,
    cancel: CancelToken,
    state: State,
}

impl<T: Transport> Resolution<T> {
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Next event, or `None` when the roster is exhausted, failed, or cancelled.
    pub async fn next(&mut self) -> Option<RosterEvent> {
        if self.observe_cancel() {
            return None;
        }
        match mem::replace(&mut self.state, State::Done) {
            State::Roster => {
                let event = self.load_roster().await;
                if self.observe_cancel() {
                    return None;
                }
                event
            }
            State::Entities { mut ids, paced } => {
                let id = ids.next()?;
                if paced {
                    tokio::time::sleep(self.resolver.inter_entity_delay).await;
                    if self.observe_cancel() {
                        return None;
                    }
                }
                let event = self.resolver.fetch_entity(id, &self.cancel).await;
                if self.observe_cancel() {
                    return None;
                }
                self.state = State::Entities { ids, paced: true };
                event
            }
            State::Done => None,
        }
    }

    /// Fetch and parse the roster, setting up the entity walk.
    ///
    /// `None` when the fetch was cancelled.
    async fn load_roster(&mut self) -> Option<RosterEvent> {
        let url = self.resolver.endpoints.roster_url(self.user);
        let doc = match self.resolver.fetcher.fetch(&url, &self.cancel).await {
            Ok(body) => parse_roster(&body).map_err(|e| ResolutionError::roster(self.user, e)),
            Err(e) if e.is_cancelled() => return None,
            Err(e) => Err(ResolutionError::roster(self.user, e)),
        };
        let doc = match doc {
            Ok(doc) => doc,
            Err(err) => {
                tracing::error!(user = self.user, error = %err, "roster unavailable");
                return Some(RosterEvent::Failed(err));
            }
        };

        let name = doc.name.unwrap_or_else(|| UNKNOWN_PLAYER.to_string());
        match doc.cards {
            Some(cards) if !cards.is_empty() => {
                tracing::debug!(user = self.user, cards = cards.len(), "roster loaded");
                self.state = State::Entities {
                    ids: cards.into_iter(),
                    paced: false,
                };
            }
            _ => tracing::warn!(user = self.user, "player has no cards"),
        }
        Some(RosterEvent::PlayerName(name))
    }

    /// True (and the sequence is finished) once the token is cancelled.
    fn observe_cancel(&mut self) -> bool {
        if !self.cancel.is_cancelled() {
            return false;
        }
        if !matches!(self.state, State::Done) {
            tracing::debug!(user = self.user, "resolution cancelled");
        }
        self.state = State::Done;
        true
    }
}
