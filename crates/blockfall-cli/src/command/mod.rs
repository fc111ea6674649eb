use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{GameConfig, Randomizer};
use clap::{Parser, Subcommand};

use crate::{record::SessionRecord, util};

use self::{auto_play::AutoPlayArg, run::RunArg};

mod auto_play;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Replay a scripted sequence of frames
    Run(#[clap(flatten)] RunArg),
    /// Play with pseudo-random input until game over
    AutoPlay(#[clap(flatten)] AutoPlayArg),
}

/// Game settings shared by every mode.
///
/// Values from `--config` are loaded first; individual options override them.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameConfigArg {
    /// Game configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of board rows
    #[arg(long)]
    rows: Option<usize>,
    /// Number of board columns
    #[arg(long)]
    cols: Option<usize>,
    /// Seed for piece generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Gravity interval in milliseconds
    #[arg(long)]
    drop_interval_ms: Option<u64>,
    /// Score awarded per cleared row
    #[arg(long)]
    points_per_line: Option<usize>,
    /// Piece randomizer: `uniform` or `seven-bag`
    #[arg(long)]
    randomizer: Option<Randomizer>,
}

impl GameConfigArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json("game config", Some(path.as_path()))?,
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(drop_interval_ms) = self.drop_interval_ms {
            config.drop_interval_ms = drop_interval_ms;
        }
        if let Some(points_per_line) = self.points_per_line {
            config.points_per_line = points_per_line;
        }
        if let Some(randomizer) = self.randomizer {
            config.randomizer = randomizer;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// Options for reporting a finished session.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Output file path for the session record (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the final board to stderr
    #[arg(long)]
    print_board: bool,
}

impl ReportArg {
    pub(crate) fn report(&self, record: &SessionRecord) -> anyhow::Result<()> {
        util::Output::save_json(record, self.output.as_deref())?;
        record.print_summary();
        if self.print_board {
            eprintln!();
            eprint!("{}", record.final_snapshot.to_text());
        }
        Ok(())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
    }
    Ok(())
}
