//! Falling-block puzzle engine.
//!
//! The crate is split into two layers:
//!
//! - [`core`] - pure data: shape catalog, board, pieces and the collision check
//! - [`engine`] - the game controller that turns commands and elapsed time into
//!   state transitions, scores and events
//!
//! Rendering, audio and input handling live outside the crate. A driver calls
//! [`GameSession::step`] once per frame, draws [`GameSession::snapshot`] and
//! reacts to [`GameSession::drain_events`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must have at least one row")]
    ZeroRows,
    #[display("board must have at least one column")]
    ZeroColumns,
    #[display("board of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
}
