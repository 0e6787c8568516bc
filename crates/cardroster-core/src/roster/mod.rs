//! Roster resolution: roster document, then each referenced character.
//!
//! [`RosterResolver::resolve`] returns a [`Resolution`], a lazy single-use
//! sequence of [`RosterEvent`]s. Characters are fetched one at a time with a
//! fixed pause between them to stay under the detail API's rate limit.

mod error;
mod model;
mod resolve;


pub use error::{ParseError, ResolutionError, ResolutionErrorKind, UnavailableReason};
pub use model::{parse_character, parse_roster, EntityDetail, RosterDocument};
pub use resolve::{Resolution, RosterResolver};

/// Roster owner; maps to `{roster_base}/{id}`.
pub type UserId = u32;

/// Character id in the detail API; maps to `{detail_base}{id}`.
pub type EntityId = u64;

/// Shown when the roster has no usable player name.
pub const UNKNOWN_PLAYER: &str = "(unknown)";

/// One item produced by a [`Resolution`].
#[derive(Debug)]
pub enum RosterEvent {
    /// Player display name, emitted once right after the roster is parsed.
    PlayerName(String),
    /// A character resolved successfully.
    Entity(EntityDetail),
    /// Roster-level (last item) or entity-level (skipped, sequence continues) failure.
    Failed(ResolutionError),
}

/// Normalized base URLs for the two services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    roster_base: String,
    detail_base: String,
}

impl Endpoints {
    /// The roster base loses any trailing `/`; the detail base gains one.
    pub fn new(roster_base: &str, detail_base: &str) -> Self {
        let roster_base = roster_base.trim().trim_end_matches('/').to_string();
        let mut detail_base = detail_base.trim().to_string();
        if !detail_base.ends_with('/') {
            detail_base.push('/');
        }
        Self {
            roster_base,
            detail_base,
        }
    }

    pub fn roster_url(&self, user: UserId) -> String {
        format!("{}/{}", self.roster_base, user)
    }

    pub fn detail_url(&self, id: EntityId) -> String {
        format!("{}{}", self.detail_base, id)
    }
}
