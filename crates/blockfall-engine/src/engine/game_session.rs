use std::{mem, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{
        board::Board,
        collision::{can_place, drop_distance},
        piece::Piece,
    },
};

use super::{Command, GameConfig, GameEvent, GameStats, PieceGenerator, PieceView, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Summary of what a command, tick or step did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Rows removed by line clears.
    pub lines_cleared: usize,
    /// Score gained.
    pub score_delta: usize,
    /// Whether at least one piece was locked into the board.
    pub piece_locked: bool,
    /// Whether the session is over after processing.
    pub game_over: bool,
}

impl TickResult {
    /// Combines this result with one produced afterwards.
    #[must_use]
    pub fn merge(self, later: Self) -> Self {
        Self {
            lines_cleared: self.lines_cleared + later.lines_cleared,
            score_delta: self.score_delta + later.score_delta,
            piece_locked: self.piece_locked || later.piece_locked,
            game_over: later.game_over,
        }
    }
}

/// The game controller: owns the board, the falling and next pieces, the score
/// and the gravity timer.
///
/// A piece cycles through these phases:
///
/// 1. **Spawning** - the preview piece becomes current and a new preview is
///    drawn. If the new piece cannot be placed the session is over and the
///    board is left untouched.
/// 2. **Falling** - commands move or rotate the piece when the result is legal
///    and are ignored otherwise. Gravity moves it down once per drop interval.
/// 3. **Locking** - after a hard drop, or when gravity cannot move it any
///    further, the piece is written into the board.
/// 4. **Line clearing** - full rows are removed and scored, then the next
///    piece spawns.
///
/// Only locking, line clearing and spawning happen back to back inside a
/// single call, so between calls the session is always either falling
/// ([`SessionState::Playing`]) or over ([`SessionState::GameOver`]). After game
/// over only [`Command::Restart`] has an effect.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, GameConfig, GameSession};
///
/// let config = GameConfig {
///     seed: Some(1),
///     ..GameConfig::default()
/// };
/// let mut session = GameSession::new(config).unwrap();
///
/// let result = session.step([Command::MoveLeft, Command::HardDrop], Duration::from_millis(16));
/// assert!(result.piece_locked);
/// assert_eq!(session.stats().completed_pieces(), 1);
///
/// for event in session.drain_events() {
///     println!("{event:?}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    current: Piece,
    next: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    state: SessionState,
    gravity_elapsed: Duration,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a session and spawns its first piece.
    ///
    /// The stored configuration records the seed actually used, so a session
    /// created without a seed can be reproduced from [`Self::config`].
    pub fn new(mut config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols)?;
        let mut generator = PieceGenerator::new(config.randomizer, config.seed);
        config.seed = Some(generator.seed());
        let current = Piece::spawn(generator.pop_next(), board.cols());
        let next = Piece::spawn(generator.pop_next(), board.cols());

        log::debug!(
            "new session: {}x{} board, seed {}, {} randomizer",
            config.rows,
            config.cols,
            generator.seed(),
            generator.randomizer()
        );

        let mut session = Self {
            config,
            board,
            current,
            next,
            generator,
            stats: GameStats::new(),
            state: SessionState::Playing,
            gravity_elapsed: Duration::ZERO,
            events: Vec::new(),
        };
        session.check_spawn();
        Ok(session)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Time accumulated towards the next gravity step.
    #[must_use]
    pub fn gravity_elapsed(&self) -> Duration {
        self.gravity_elapsed
    }

    /// Events emitted since the last [`Self::drain_events`], oldest first.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Removes and returns the buffered events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Read-only view for a renderer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            board: self.board.color_grid(),
            current: PieceView::from(&self.current),
            next: PieceView::from(&self.next),
            score: self.stats.score(),
            state: self.state,
        }
    }

    /// Applies one command.
    ///
    /// Moves and rotations that would collide are ignored. While the session is
    /// over every command except [`Command::Restart`] is ignored.
    pub fn handle_command(&mut self, command: Command) -> TickResult {
        let mut result = TickResult::default();
        match command {
            Command::Restart => self.restart(),
            _ if self.state.is_game_over() => {
                log::trace!("ignoring {command} after game over");
            }
            Command::MoveLeft => self.try_move(self.current.left()),
            Command::MoveRight => self.try_move(self.current.right()),
            Command::SoftDrop => self.try_move(self.current.down()),
            Command::Rotate => self.try_rotate(),
            Command::HardDrop => self.hard_drop(&mut result),
        }
        result.game_over = self.state.is_game_over();
        result
    }

    /// Advances the gravity timer by `elapsed`.
    ///
    /// Once the accumulated time exceeds the drop interval the timer resets and
    /// the piece moves down one row, or locks if it cannot. At most one gravity
    /// step happens per call.
    pub fn tick(&mut self, elapsed: Duration) -> TickResult {
        let mut result = TickResult::default();
        if self.state.is_playing() {
            self.gravity_elapsed = self.gravity_elapsed.saturating_add(elapsed);
            if self.gravity_elapsed > self.config.drop_interval() {
                self.gravity_elapsed = Duration::ZERO;
                let fallen = self.current.down();
                if can_place(&self.board, &fallen) {
                    self.current = fallen;
                } else {
                    self.lock_and_spawn(&mut result);
                }
            }
        }
        result.game_over = self.state.is_game_over();
        result
    }

    /// Applies `commands` in order, then advances gravity by `elapsed`.
    pub fn step<I>(&mut self, commands: I, elapsed: Duration) -> TickResult
    where
        I: IntoIterator<Item = Command>,
    {
        let mut result = TickResult::default();
        for command in commands {
            result = result.merge(self.handle_command(command));
        }
        result.merge(self.tick(elapsed))
    }

    fn try_move(&mut self, piece: Piece) {
        if can_place(&self.board, &piece) {
            self.current = piece;
            self.events.push(GameEvent::PieceMoved);
        } else {
            log::trace!("move to {} blocked", piece.anchor());
        }
    }

    fn try_rotate(&mut self) {
        let rotated = self.current.rotated();
        if rotated == self.current {
            return;
        }
        if can_place(&self.board, &rotated) {
            self.current = rotated;
            self.events.push(GameEvent::PieceRotated);
        } else {
            log::trace!(
                "rotation of {} to state {} blocked",
                rotated.kind(),
                rotated.rotation()
            );
        }
    }

    fn hard_drop(&mut self, result: &mut TickResult) {
        let rows = drop_distance(&self.board, &self.current);
        self.current = self
            .current
            .with_offset(i32::try_from(rows).expect("drop distance fits board rows"), 0);
        self.events.push(GameEvent::PieceHardDropped { rows });
        self.lock_and_spawn(result);
    }

    fn lock_and_spawn(&mut self, result: &mut TickResult) {
        self.lock_piece();
        result.piece_locked = true;

        let lines = self.board.clear_full_rows();
        let delta = self
            .stats
            .complete_piece_drop(lines, self.config.points_per_line);
        if lines > 0 {
            log::debug!("cleared {lines} lines for {delta} points");
            self.events.push(GameEvent::LinesCleared(lines));
        }
        result.lines_cleared += lines;
        result.score_delta += delta;

        self.spawn_next();
    }

    /// Writes the current piece into the board.
    ///
    /// # Panics
    ///
    /// Panics if the piece overlaps a settled block or lies partly outside the
    /// grid, which would mean an illegal move slipped through.
    fn lock_piece(&mut self) {
        let piece = self.current;
        assert!(
            can_place(&self.board, &piece) && piece.cells().iter().all(|c| c.row >= 0),
            "cannot lock {} at {} (rotation {})",
            piece.kind(),
            piece.anchor(),
            piece.rotation()
        );
        for cell in piece.cells() {
            self.board.set_cell(cell.row, cell.col, piece.color());
        }
        log::debug!("locked {} at {}", piece.kind(), piece.anchor());
        self.events.push(GameEvent::PieceLocked);
    }

    fn spawn_next(&mut self) {
        let preview = Piece::spawn(self.generator.pop_next(), self.board.cols());
        self.current = mem::replace(&mut self.next, preview);
        self.gravity_elapsed = Duration::ZERO;
        self.check_spawn();
    }

    fn check_spawn(&mut self) {
        if can_place(&self.board, &self.current) {
            log::debug!("spawned {}", self.current.kind());
            return;
        }
        log::info!(
            "game over: {} cannot spawn, final score {}",
            self.current.kind(),
            self.stats.score()
        );
        self.state = SessionState::GameOver;
        self.events.push(GameEvent::GameOver);
    }

    fn restart(&mut self) {
        log::info!("restarting session");
        self.board.clear();
        self.stats = GameStats::new();
        self.state = SessionState::Playing;
        self.gravity_elapsed = Duration::ZERO;
        self.current = Piece::spawn(self.generator.pop_next(), self.board.cols());
        self.next = Piece::spawn(self.generator.pop_next(), self.board.cols());
        self.events.push(GameEvent::Restarted);
        self.check_spawn();
    }
}
