use serde::{Deserialize, Serialize};

use super::shape::{Color, PieceKind, RotationState};

/// Absolute or anchor position on the board, in `(row, col)` order.
///
/// Rows grow downwards. Negative rows lie above the visible board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A tetromino at a specific anchor and orientation.
///
/// Pieces are immutable values: movement and rotation return new `Piece`s and
/// never touch the shape tables the piece refers to.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind, Position};
///
/// let piece = Piece::spawn(PieceKind::I, 10);
/// assert_eq!(piece.anchor(), Position::new(0, 3));
///
/// let moved = piece.left().down();
/// assert_eq!(moved.anchor(), Position::new(1, 2));
/// assert_eq!(piece.anchor(), Position::new(0, 3));
///
/// let rotated = piece.rotated();
/// assert_eq!(rotated.rotation(), 1);
/// assert_eq!(rotated.rotated().rotation(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: usize,
    anchor: Position,
    color: Color,
}

impl Piece {
    /// Creates a piece of `kind` in its spawn orientation at `anchor`.
    #[must_use]
    pub fn new(kind: PieceKind, anchor: Position) -> Self {
        Self {
            kind,
            rotation: 0,
            anchor,
            color: kind.color(),
        }
    }

    /// Creates a piece at the spawn position of a board `board_cols` wide.
    ///
    /// The spawn orientation's bounding box is centered horizontally (rounding
    /// towards the left edge) and its top row sits on row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_cols: usize) -> Self {
        let width = kind.rotation_state(0).width();
        let half_board = i32::try_from(board_cols / 2).unwrap_or(i32::MAX);
        let half_width = i32::try_from(width / 2).unwrap_or(0);
        Self::new(kind, Position::new(0, half_board - half_width))
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Index into [`PieceKind::rotation_states`], always below the state count.
    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn rotation_state(&self) -> &'static RotationState {
        self.kind.rotation_state(self.rotation)
    }

    /// Returns the absolute board positions of the four cells.
    #[must_use]
    pub fn cells(&self) -> [Position; 4] {
        self.rotation_state().offsets().map(|offset| {
            Position::new(
                self.anchor.row + i32::from(offset.row),
                self.anchor.col + i32::from(offset.col),
            )
        })
    }

    #[must_use]
    pub fn with_offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            anchor: Position::new(self.anchor.row + d_row, self.anchor.col + d_col),
            ..self
        }
    }

    /// Returns the piece in rotation state `index`, taken modulo the state count.
    #[must_use]
    pub fn with_rotation(self, index: usize) -> Self {
        Self {
            rotation: index % self.kind.state_count(),
            ..self
        }
    }

    /// Rotates one step clockwise around the same anchor.
    #[must_use]
    pub fn rotated(self) -> Self {
        self.with_rotation(self.rotation + 1)
    }

    #[must_use]
    pub fn left(self) -> Self {
        self.with_offset(0, -1)
    }

    #[must_use]
    pub fn right(self) -> Self {
        self.with_offset(0, 1)
    }

    #[must_use]
    pub fn down(self) -> Self {
        self.with_offset(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_anchor_is_centered() {
        // I is four wide, O two wide, the rest three wide.
        let cols: Vec<_> = PieceKind::ALL
            .iter()
            .map(|&k| Piece::spawn(k, 10).anchor().col)
            .collect();
        assert_eq!(cols, [3, 4, 4, 4, 4, 4, 4]);
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, 10);
            assert_eq!(piece.anchor().row, 0);
            assert_eq!(piece.rotation(), 0);
            assert_eq!(piece.cells().iter().map(|p| p.row).min(), Some(0));
        }
    }

    #[test]
    fn test_spawn_on_narrow_board_goes_negative() {
        assert_eq!(Piece::spawn(PieceKind::I, 1).anchor().col, -2);
    }

    #[test]
    fn test_cells_follow_anchor() {
        let piece = Piece::new(PieceKind::O, Position::new(5, 7));
        let mut cells = piece.cells();
        cells.sort();
        assert_eq!(
            cells,
            [
                Position::new(5, 7),
                Position::new(5, 8),
                Position::new(6, 7),
                Position::new(6, 8),
            ]
        );
    }

    #[test]
    fn test_with_offset_keeps_original() {
        let piece = Piece::spawn(PieceKind::T, 10);
        let moved = piece.with_offset(3, -2);
        assert_eq!(moved.anchor(), Position::new(3, 2));
        assert_eq!(piece.anchor(), Position::new(0, 4));
        assert_eq!(moved.kind(), piece.kind());
        assert_eq!(moved.rotation(), piece.rotation());
    }

    #[test]
    fn test_with_rotation_wraps() {
        let piece = Piece::spawn(PieceKind::J, 10);
        assert_eq!(piece.with_rotation(6).rotation(), 2);
        let piece = Piece::spawn(PieceKind::S, 10);
        assert_eq!(piece.with_rotation(3).rotation(), 1);
        let piece = Piece::spawn(PieceKind::O, 10);
        assert_eq!(piece.rotated().rotation(), 0);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, 10);
            let rotated = piece.rotated().rotated().rotated().rotated();
            assert_eq!(rotated, piece);
        }
    }

    #[test]
    fn test_rotation_does_not_alter_catalog() {
        let before = *PieceKind::L.rotation_state(0);
        let piece = Piece::spawn(PieceKind::L, 10).rotated().rotated();
        assert_ne!(piece.cells(), Piece::spawn(PieceKind::L, 10).cells());
        assert_eq!(*PieceKind::L.rotation_state(0), before);
        assert_eq!(Piece::spawn(PieceKind::L, 10).rotation_state(), &before);
    }

    #[test]
    fn test_color_defaults_to_kind() {
        let piece = Piece::spawn(PieceKind::Z, 10);
        assert_eq!(piece.color(), PieceKind::Z.color());
        assert_eq!(piece.rotated().left().down().color(), PieceKind::Z.color());
    }
}
