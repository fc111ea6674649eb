use super::{board::Board, piece::Piece};

/// Checks whether `piece` may legally occupy `board`.
///
/// Every cell of the piece must be unblocked under the extended bounds of
/// [`Board::is_filled`]: inside the side walls, above the floor, and not on a
/// settled block. Cells above row 0 only need to be inside the walls, so a piece
/// entirely above the board is placeable whatever the board holds.
///
/// This is the single legality check used for movement, rotation and spawning.
#[must_use]
pub fn can_place(board: &Board, piece: &Piece) -> bool {
    piece
        .cells()
        .iter()
        .all(|cell| !board.is_filled(cell.row, cell.col))
}

/// Number of rows `piece` can fall before it would collide.
///
/// `piece` itself is assumed to be placeable; the result is the hard-drop
/// distance and moving the piece down by it lands on the stack or the floor.
#[must_use]
pub fn drop_distance(board: &Board, piece: &Piece) -> usize {
    let mut fallen = *piece;
    let mut rows = 0;
    loop {
        fallen = fallen.down();
        if !can_place(board, &fallen) {
            return rows;
        }
        rows += 1;
    }
}
