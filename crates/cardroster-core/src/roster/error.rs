use std::fmt;

use thiserror::Error;

use super::{EntityId, UserId};
use crate::retry::FetchError;

/// A body arrived but could not be turned into the expected document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Document or payload was JSON `null` (not found).
    #[error("document is null")]
    Null,
}

/// Why a roster or character produced no data.
#[derive(Debug, Error)]
pub enum UnavailableReason {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// Fatal to the resolution; nothing follows.
    RosterUnavailable { user: UserId },
    /// Local to one character; resolution moves on to the next id.
    EntityUnavailable { id: EntityId },
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RosterUnavailable { user } => write!(f, "roster for user {} unavailable", user),
            Self::EntityUnavailable { id } => write!(f, "character {} unavailable", id),
        }
    }
}

#[derive(Debug, Error)]
#[error("{kind}: {reason}")]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    #[source]
    pub reason: UnavailableReason,
}

impl ResolutionError {
    pub(crate) fn roster(user: UserId, reason: impl Into<UnavailableReason>) -> Self {
        Self {
            kind: ResolutionErrorKind::RosterUnavailable { user },
            reason: reason.into(),
        }
    }

    pub(crate) fn entity(id: EntityId, reason: impl Into<UnavailableReason>) -> Self {
        Self {
            kind: ResolutionErrorKind::EntityUnavailable { id },
            reason: reason.into(),
        }
    }
}
