use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

use super::shape::Color;

/// A single board cell.
///
/// The board only ever holds settled blocks; the falling piece is an overlay and
/// never written here until it locks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// Fixed-size occupancy grid of `rows × cols` cells, row 0 at the top.
///
/// Coordinates are signed so that pieces may poke above the visible area while
/// spawning. [`Board::is_filled`] extends the grid as follows:
///
/// - columns outside `0..cols` are blocked (side walls),
/// - rows at or below `rows` are blocked (floor),
/// - rows above 0 are open.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, PieceKind};
///
/// let mut board = Board::new(20, 10).unwrap();
/// assert!(!board.is_filled(19, 0));
/// assert!(board.is_filled(20, 0));
/// assert!(board.is_filled(0, -1));
/// assert!(!board.is_filled(-3, 4));
///
/// for col in 0..10 {
///     board.set_cell(19, col, PieceKind::I.color());
/// }
/// assert_eq!(board.clear_full_rows(), 1);
/// assert!(!board.is_filled(19, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    // Row-major, `row * cols + col`.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// Fails if either dimension is zero or the board does not fit in signed
    /// 32-bit coordinates.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if cols == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        let len = rows
            .checked_mul(cols)
            .filter(|len| i32::try_from(*len).is_ok())
            .ok_or(ConfigError::TooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; len],
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Checks whether `(row, col)` is blocked, with walls, floor and open sky
    /// beyond the grid as described on [`Board`].
    #[must_use]
    pub fn is_filled(&self, row: i32, col: i32) -> bool {
        let Ok(col) = usize::try_from(col) else {
            return true;
        };
        if col >= self.cols {
            return true;
        }
        let Ok(row) = usize::try_from(row) else {
            return false;
        };
        if row >= self.rows {
            return true;
        }
        self.cells[row * self.cols + col].is_filled()
    }

    /// Fills an empty cell with `color`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid or the cell is already filled.
    /// Either case means a piece was locked at an illegal position.
    pub fn set_cell(&mut self, row: i32, col: i32, color: Color) {
        let Some(i) = self.index(row, col) else {
            panic!(
                "cell ({row}, {col}) is outside the {}x{} board",
                self.rows, self.cols
            );
        };
        assert!(
            self.cells[i].is_empty(),
            "cell ({row}, {col}) is already filled"
        );
        self.cells[i] = Cell::Filled(color);
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Checks whether every column of `row` is filled.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.rows && self.row_cells(row).iter().all(|c| c.is_filled())
    }

    fn row_cells(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..][..self.cols]
    }

    /// Removes every full row and compacts the rows above it downwards.
    ///
    /// Each surviving row moves down by the number of removed rows below it and
    /// the same number of empty rows is inserted at the top. Returns the number of
    /// rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.cols;
        let mut count = 0;
        for row in (0..self.rows).rev() {
            if self.is_row_full(row) {
                count += 1;
                continue;
            }
            if count > 0 {
                let src = row * width;
                self.cells.copy_within(src..src + width, src + count * width);
            }
        }
        self.cells[..count * width].fill(Cell::Empty);
        count
    }

    /// Iterates over the rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.cols)
    }

    /// Copies the grid into nested rows of colors, `None` for empty cells.
    #[must_use]
    pub fn color_grid(&self) -> Vec<Vec<Option<Color>>> {
        self.iter_rows()
            .map(|row| row.iter().map(|c| c.color()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
