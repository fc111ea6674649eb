use serde::{Deserialize, Serialize};

use crate::core::{
    piece::{Piece, Position},
    shape::{Color, PieceKind},
};

use super::SessionState;

/// A piece as a renderer sees it: absolute cells plus color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub rotation: usize,
    pub cells: [Position; 4],
    pub color: Color,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            cells: piece.cells(),
            color: piece.color(),
        }
    }
}

/// Read-only copy of everything needed to draw one frame.
///
/// `board` is indexed `[row][col]` with row 0 at the top; `None` is an empty
/// cell. The falling piece is not part of `board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub board: Vec<Vec<Option<Color>>>,
    pub current: PieceView,
    pub next: PieceView,
    pub score: usize,
    pub state: SessionState,
}

impl Snapshot {
    /// Renders the board with the falling piece overlaid, `#` for settled
    /// blocks, `@` for the falling piece and `.` for empty cells.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut grid: Vec<Vec<char>> = self
            .board
            .iter()
            .map(|row| row.iter().map(|c| if c.is_some() { '#' } else { '.' }).collect())
            .collect();
        for cell in self.current.cells {
            let (Ok(row), Ok(col)) = (usize::try_from(cell.row), usize::try_from(cell.col)) else {
                continue;
            };
            if let Some(c) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *c = '@';
            }
        }
        let mut text = String::with_capacity(self.rows * (self.cols + 1));
        for row in grid {
            text.extend(row);
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_view_matches_piece() {
        let piece = Piece::new(PieceKind::T, Position::new(3, 2)).rotated();
        let view = PieceView::from(&piece);
        assert_eq!(view.kind, PieceKind::T);
        assert_eq!(view.rotation, 1);
        assert_eq!(view.cells, piece.cells());
        assert_eq!(view.color, PieceKind::T.color());
    }

    #[test]
    fn test_to_text_overlays_current_piece() {
        let color = PieceKind::O.color();
        let snapshot = Snapshot {
            rows: 3,
            cols: 4,
            board: vec![vec![None; 4], vec![None; 4], vec![Some(color), None, None, None]],
            current: PieceView::from(&Piece::new(PieceKind::O, Position::new(0, 2))),
            next: PieceView::from(&Piece::new(PieceKind::I, Position::new(0, 0))),
            score: 0,
            state: SessionState::Playing,
        };
        assert_eq!(snapshot.to_text(), "..@@\n..@@\n#...\n");
    }

    #[test]
    fn test_serializes_colors_as_grid() {
        let snapshot = Snapshot {
            rows: 1,
            cols: 2,
            board: vec![vec![Some(PieceKind::I.color()), None]],
            current: PieceView::from(&Piece::new(PieceKind::I, Position::new(-1, 0))),
            next: PieceView::from(&Piece::new(PieceKind::O, Position::new(0, 0))),
            score: 100,
            state: SessionState::GameOver,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["score"], 100);
        assert_eq!(json["state"], "GameOver");
        assert!(json["board"][0][1].is_null());
        let parsed: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
