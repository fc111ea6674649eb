use serde::{Deserialize, Serialize};

/// Discrete player input accepted by [`GameSession`](super::GameSession).
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
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Restart,
}

impl Command {
    pub const ALL: [Self; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
        Self::Restart,
    ];
}

/// Something observable that happened while processing a command or tick.
///
/// Events are buffered by the session in emission order. They carry no
/// presentation data; an audio or effects layer decides what each one means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum GameEvent {
    /// The falling piece moved left, right or down because of a command.
    PieceMoved,
    /// The falling piece changed orientation.
    PieceRotated,
    /// A hard drop moved the piece down by `rows` before locking.
    PieceHardDropped { rows: usize },
    /// The falling piece was written into the board.
    PieceLocked,
    /// One or more rows were removed.
    LinesCleared(usize),
    /// A new piece could not be placed; the session is over.
    GameOver,
    /// The session was reset to a fresh board.
    Restarted,
}
