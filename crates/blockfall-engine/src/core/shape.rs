use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// RGB color of a piece or a locked cell.
///
/// Formats as a lowercase hex triplet, e.g. `#0f9bd7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Offset of a single cell from a piece anchor, in `(row, col)` order.
///
/// Offsets are never negative: they are measured from the top-left corner of the
/// orientation's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellOffset {
    pub row: u8,
    pub col: u8,
}

/// One orientation of a tetromino: four cell offsets plus the bounding box size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    offsets: [CellOffset; 4],
    height: u8,
    width: u8,
}

impl RotationState {
    /// Cell offsets in row-major order.
    #[must_use]
    pub const fn offsets(&self) -> &[CellOffset; 4] {
        &self.offsets
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }
}

/// The seven tetromino types.
///
/// Each kind owns an immutable, precomputed list of rotation states (see
/// [`PieceKind::rotation_states`]). Nothing in the crate can modify these tables;
/// a piece only stores an index into them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
        Self::T,
    ];

    /// Returns the distinct rotation states of this kind, spawn orientation first.
    ///
    /// Each successive state is the previous one rotated 90° clockwise. Symmetric
    /// kinds have fewer states: O has one, I/S/Z have two, J/L/T have four.
    ///
    /// # Example
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::O.rotation_states().len(), 1);
    /// assert_eq!(PieceKind::I.rotation_states().len(), 2);
    /// assert_eq!(PieceKind::T.rotation_states().len(), 4);
    /// ```
    #[must_use]
    pub fn rotation_states(self) -> &'static [RotationState] {
        let shape = &SHAPES[self as usize];
        &shape.states[..shape.state_count]
    }

    #[must_use]
    pub fn state_count(self) -> usize {
        SHAPES[self as usize].state_count
    }

    /// Returns the rotation state at `index`, wrapping modulo the state count.
    #[must_use]
    pub fn rotation_state(self, index: usize) -> &'static RotationState {
        let states = self.rotation_states();
        &states[index % states.len()]
    }

    /// Canonical color for pieces of this kind.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::rgb(15, 155, 215),
            PieceKind::O => Color::rgb(227, 159, 2),
            PieceKind::S => Color::rgb(89, 177, 1),
            PieceKind::Z => Color::rgb(215, 15, 55),
            PieceKind::J => Color::rgb(33, 65, 198),
            PieceKind::L => Color::rgb(227, 91, 2),
            PieceKind::T => Color::rgb(175, 41, 138),
        }
    }
}

/// Shape matrix of at most 4×4 cells, used only while building [`SHAPES`].
#[derive(Clone, Copy)]
struct Footprint {
    height: usize,
    width: usize,
    cells: [[bool; 4]; 4],
}

impl Footprint {
    const fn new<const H: usize, const W: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(H <= 4 && W <= 4);
        let mut cells = [[false; 4]; 4];
        let mut row = 0;
        while row < H {
            let mut col = 0;
            while col < W {
                cells[row][col] = rows[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self {
            height: H,
            width: W,
            cells,
        }
    }

    /// Rotates the matrix 90° clockwise; the result is again anchored at its top-left.
    const fn rotated_clockwise(&self) -> Self {
        let mut cells = [[false; 4]; 4];
        let mut row = 0;
        while row < self.width {
            let mut col = 0;
            while col < self.height {
                cells[row][col] = self.cells[self.height - 1 - col][row];
                col += 1;
            }
            row += 1;
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    const fn to_state(&self) -> RotationState {
        let mut offsets = [CellOffset { row: 0, col: 0 }; 4];
        let mut count = 0;
        let mut row = 0;
        while row < self.height {
            let mut col = 0;
            while col < self.width {
                if self.cells[row][col] {
                    assert!(count < 4, "tetromino has more than four cells");
                    offsets[count] = CellOffset {
                        row: row as u8,
                        col: col as u8,
                    };
                    count += 1;
                }
                col += 1;
            }
            row += 1;
        }
        assert!(count == 4, "tetromino has fewer than four cells");
        RotationState {
            offsets,
            height: self.height as u8,
            width: self.width as u8,
        }
    }
}

struct ShapeDefinition {
    states: [RotationState; 4],
    state_count: usize,
}

/// Builds all four clockwise rotations of `spawn`; only the first `state_count`
/// of them are distinct and exposed.
const fn define(state_count: usize, spawn: Footprint) -> ShapeDefinition {
    let mut states = [spawn.to_state(); 4];
    let mut footprint = spawn;
    let mut i = 1;
    while i < 4 {
        footprint = footprint.rotated_clockwise();
        states[i] = footprint.to_state();
        i += 1;
    }
    ShapeDefinition {
        states,
        state_count,
    }
}

// Indexed by `PieceKind as usize`.
static SHAPES: [ShapeDefinition; PieceKind::LEN] = [
    // I-piece
    define(2, Footprint::new([[1, 1, 1, 1]])),
    // O-piece
    define(1, Footprint::new([[1, 1], [1, 1]])),
    // S-piece
    define(2, Footprint::new([[0, 1, 1], [1, 1, 0]])),
    // Z-piece
    define(2, Footprint::new([[1, 1, 0], [0, 1, 1]])),
    // J-piece
    define(4, Footprint::new([[1, 0, 0], [1, 1, 1]])),
    // L-piece
    define(4, Footprint::new([[0, 0, 1], [1, 1, 1]])),
    // T-piece
    define(4, Footprint::new([[0, 1, 0], [1, 1, 1]])),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn offset_set(state: &RotationState) -> HashSet<(u8, u8)> {
        state.offsets().iter().map(|o| (o.row, o.col)).collect()
    }

    #[test]
    fn test_state_counts_follow_symmetry() {
        let counts: Vec<_> = PieceKind::ALL.iter().map(|k| k.state_count()).collect();
        assert_eq!(counts, [2, 1, 2, 2, 4, 4, 4]);
    }

    #[test]
    fn test_exposed_states_are_distinct() {
        for kind in PieceKind::ALL {
            let states = kind.rotation_states();
            let distinct: HashSet<_> = states
                .iter()
                .map(|s| {
                    let mut cells: Vec<_> = offset_set(s).into_iter().collect();
                    cells.sort_unstable();
                    cells
                })
                .collect();
            assert_eq!(distinct.len(), states.len(), "{kind} has duplicate states");
        }
    }

    #[test]
    fn test_rotation_cycle_closes_after_state_count() {
        // The rotation following the last exposed state must be the spawn state.
        for kind in PieceKind::ALL {
            let shape = &SHAPES[kind as usize];
            for i in shape.state_count..4 {
                assert_eq!(
                    offset_set(&shape.states[i]),
                    offset_set(&shape.states[i % shape.state_count]),
                    "{kind} state {i} does not repeat the cycle"
                );
            }
        }
    }

    #[test]
    fn test_every_state_has_four_cells_inside_its_box() {
        for kind in PieceKind::ALL {
            for state in kind.rotation_states() {
                assert_eq!(offset_set(state).len(), 4);
                for o in state.offsets() {
                    assert!(usize::from(o.row) < state.height());
                    assert!(usize::from(o.col) < state.width());
                }
                // The bounding box is tight: first row and first column are used.
                assert!(state.offsets().iter().any(|o| o.row == 0));
                assert!(state.offsets().iter().any(|o| o.col == 0));
            }
        }
    }

    #[test]
    fn test_i_piece_orientations() {
        let states = PieceKind::I.rotation_states();
        assert_eq!((states[0].height(), states[0].width()), (1, 4));
        assert_eq!((states[1].height(), states[1].width()), (4, 1));
        assert_eq!(
            offset_set(&states[1]),
            [(0, 0), (1, 0), (2, 0), (3, 0)].into_iter().collect()
        );
    }

    #[test]
    fn test_t_piece_rotates_clockwise() {
        let states = PieceKind::T.rotation_states();
        // .#.    #.
        // ###    ##
        //        #.
        assert_eq!(
            offset_set(&states[0]),
            [(0, 1), (1, 0), (1, 1), (1, 2)].into_iter().collect()
        );
        assert_eq!(
            offset_set(&states[1]),
            [(0, 0), (1, 0), (1, 1), (2, 0)].into_iter().collect()
        );
    }

    #[test]
    fn test_rotation_state_wraps() {
        assert_eq!(
            PieceKind::T.rotation_state(5),
            PieceKind::T.rotation_state(1)
        );
        assert_eq!(
            PieceKind::O.rotation_state(3),
            PieceKind::O.rotation_state(0)
        );
    }

    #[test]
    fn test_piece_kind_from_str() {
        assert_eq!("T".parse::<PieceKind>().ok(), Some(PieceKind::T));
        assert!("X".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(PieceKind::I.color().to_string(), "#0f9bd7");
    }
}
