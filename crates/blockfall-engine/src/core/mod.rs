//! Core data structures: shapes, board, pieces and collision.
//!
//! - [`PieceKind`] / [`RotationState`] - the immutable shape catalog
//! - [`Board`] - settled blocks with line clearing
//! - [`Piece`] - a tetromino at an anchor and rotation index
//! - [`can_place`] / [`drop_distance`] - the legality predicate shared by every
//!   move, and how far a piece can fall

pub use self::{board::*, collision::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod collision;
pub(crate) mod piece;
pub(crate) mod shape;
