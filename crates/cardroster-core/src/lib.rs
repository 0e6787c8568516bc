//! cardroster core: fetch a player's roster, resolve each card's character,
//! and render results through a [`sink::RenderSink`].
//!
//! Layers, leaves first: [`retry`] and [`fetch`] (retrying GET), [`roster`]
//! (lazy per-user resolution), [`session`] (one cancellable session at a time).

pub mod config;
pub mod logging;

pub mod control;
pub mod fetch;
pub mod retry;
pub mod roster;
pub mod session;
pub mod sink;

#[cfg(test)]
mod testing;

pub use session::RefreshOrchestrator;
