//! Game controller built on top of [`crate::core`].
//!
//! - [`GameSession`] - owns one game and advances it by commands and time
//! - [`GameConfig`] - board size, seed, timing and scoring settings
//! - [`PieceGenerator`] - seeded piece source with a choice of [`Randomizer`]
//! - [`GameEvent`] / [`Command`] - what comes out of and goes into a session
//! - [`Snapshot`] - renderer-facing copy of a session

pub use self::{
    config::*, event::*, game_session::*, game_stats::*, piece_generator::*, snapshot::*,
};

mod config;
mod event;
mod game_session;
mod game_stats;
mod piece_generator;
mod snapshot;
