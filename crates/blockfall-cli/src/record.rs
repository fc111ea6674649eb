use std::time::Duration;

use anyhow::Context as _;
use blockfall_engine::{
    Command, GameConfig, GameEvent, GameSession, GameStats, Snapshot, TickResult,
};
use serde::{Deserialize, Serialize};

/// One frame of input fed to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Commands applied in order before gravity
    #[serde(default)]
    pub commands: Vec<Command>,
    /// Time since the previous frame, in milliseconds
    pub elapsed_ms: u64,
}

/// Everything observable about one processed frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame number (0-indexed)
    pub frame: usize,
    #[serde(flatten)]
    pub input: ScriptFrame,
    pub result: TickResult,
    /// Events emitted while processing the frame, in order
    pub events: Vec<GameEvent>,
}

/// Recorded headless session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Configuration actually used, including the resolved seed
    pub config: GameConfig,
    pub frames: Vec<FrameRecord>,
    pub final_stats: GameStats,
    pub final_snapshot: Snapshot,
}

impl SessionRecord {
    pub fn print_summary(&self) {
        let stats = &self.final_stats;
        eprintln!(
            "Played {} frames on a {}x{} board (seed {})",
            self.frames.len(),
            self.config.cols,
            self.config.rows,
            self.config
                .seed
                .map_or_else(|| "none".to_owned(), |seed| seed.to_string())
        );
        eprintln!("  State:          {:?}", self.final_snapshot.state);
        eprintln!("  Score:          {}", stats.score());
        eprintln!("  Pieces locked:  {}", stats.completed_pieces());
        eprintln!("  Lines cleared:  {}", stats.total_cleared_lines());
        let [_, singles, doubles, triples, quads] = *stats.line_cleared_counter();
        eprintln!("  Clears (1/2/3/4): {singles}/{doubles}/{triples}/{quads}");
    }
}

/// Drives a [`GameSession`] frame by frame and records what happens.
#[derive(Debug)]
pub struct Recorder {
    session: GameSession,
    frames: Vec<FrameRecord>,
}

impl Recorder {
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        let session = GameSession::new(config).context("Failed to start game session")?;
        Ok(Self {
            session,
            frames: vec![],
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn play_frame(&mut self, input: ScriptFrame) -> TickResult {
        let result = self.session.step(
            input.commands.iter().copied(),
            Duration::from_millis(input.elapsed_ms),
        );
        let events = self.session.drain_events().collect();
        self.frames.push(FrameRecord {
            frame: self.frames.len(),
            input,
            result,
            events,
        });
        result
    }

    pub fn finish(self) -> SessionRecord {
        SessionRecord {
            config: self.session.config().clone(),
            frames: self.frames,
            final_stats: self.session.stats().clone(),
            final_snapshot: self.session.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_script_frame_commands_default_to_empty() {
        let frame: ScriptFrame = serde_json::from_str(r#"{ "elapsed_ms": 16 }"#).unwrap();
        assert!(frame.commands.is_empty());

        let frame: ScriptFrame =
            serde_json::from_str(r#"{ "commands": ["MoveLeft", "HardDrop"], "elapsed_ms": 0 }"#)
                .unwrap();
        assert_eq!(frame.commands, [Command::MoveLeft, Command::HardDrop]);
    }

    #[test]
    fn test_recorder_numbers_frames_and_keeps_events() {
        let mut recorder = Recorder::new(config()).unwrap();
        recorder.play_frame(ScriptFrame {
            commands: vec![],
            elapsed_ms: 16,
        });
        let result = recorder.play_frame(ScriptFrame {
            commands: vec![Command::HardDrop],
            elapsed_ms: 16,
        });
        assert!(result.piece_locked);

        let record = recorder.finish();
        assert_eq!(record.frames.len(), 2);
        assert_eq!(record.frames[1].frame, 1);
        assert!(record.frames[0].events.is_empty());
        assert!(record.frames[1].events.contains(&GameEvent::PieceLocked));
        assert_eq!(record.final_stats.completed_pieces(), 1);
        assert_eq!(record.config.seed, Some(9));
    }

    #[test]
    fn test_record_json_shape() {
        let mut recorder = Recorder::new(config()).unwrap();
        recorder.play_frame(ScriptFrame {
            commands: vec![Command::Rotate],
            elapsed_ms: 5,
        });
        let json = serde_json::to_value(recorder.finish()).unwrap();
        assert_eq!(json["config"]["seed"], 9);
        assert_eq!(json["frames"][0]["commands"][0], "Rotate");
        assert_eq!(json["frames"][0]["elapsed_ms"], 5);
        assert_eq!(json["frames"][0]["result"]["piece_locked"], false);
        assert_eq!(json["final_snapshot"]["rows"], 20);
    }
}
