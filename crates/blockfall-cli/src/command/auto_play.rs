use blockfall_engine::Command;
use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{
    command::{GameConfigArg, ReportArg},
    record::{Recorder, ScriptFrame},
};

/// Commands the driver picks from, weighted towards sideways moves and
/// rotations so pieces spread across the board.
const DRIVER_COMMANDS: [(Command, u32); 5] = [
    (Command::MoveLeft, 6),
    (Command::MoveRight, 6),
    (Command::Rotate, 4),
    (Command::SoftDrop, 3),
    (Command::HardDrop, 1),
];

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    pub(super) config: GameConfigArg,
    /// Maximum number of frames to play
    #[arg(long, default_value_t = 10_000)]
    pub(super) frames: usize,
    /// Simulated time per frame in milliseconds
    #[arg(long, default_value_t = 16)]
    pub(super) frame_ms: u64,
    /// Seed for the input driver (random when omitted)
    #[arg(long)]
    pub(super) driver_seed: Option<u64>,
    #[clap(flatten)]
    pub(super) report: ReportArg,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        config,
        frames,
        frame_ms,
        driver_seed,
        report,
    } = arg;

    let config = config.resolve()?;
    let driver_seed = driver_seed.unwrap_or_else(|| rand::rng().random());
    log::info!("driver seed {driver_seed}");
    let mut driver = Pcg32::seed_from_u64(driver_seed);

    let mut recorder = Recorder::new(config)?;
    for _ in 0..*frames {
        let commands = random_commands(&mut driver);
        let result = recorder.play_frame(ScriptFrame {
            commands,
            elapsed_ms: *frame_ms,
        });
        if result.game_over {
            break;
        }
    }

    report.report(&recorder.finish())
}

/// Zero to two commands, with an idle frame half of the time.
fn random_commands<R>(rng: &mut R) -> Vec<Command>
where
    R: rand::Rng,
{
    if rng.random_bool(0.5) {
        return vec![];
    }
    let count = rng.random_range(1..=2_usize);
    (0..count)
        .map(|_| {
            DRIVER_COMMANDS
                .choose_weighted(&mut *rng, |(_, weight)| *weight)
                .map(|(command, _)| *command)
                .expect("driver weights should be positive")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_commands_never_restart() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut seen = 0;
        for _ in 0..1000 {
            let commands = random_commands(&mut rng);
            assert!(commands.len() <= 2);
            assert!(!commands.contains(&Command::Restart));
            seen += commands.len();
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_driver_reaches_game_over() {
        let mut driver = Pcg32::seed_from_u64(42);
        let mut recorder = Recorder::new(blockfall_engine::GameConfig {
            rows: 8,
            cols: 6,
            seed: Some(42),
            ..blockfall_engine::GameConfig::default()
        })
        .unwrap();
        let mut over = false;
        for _ in 0..100_000 {
            let result = recorder.play_frame(ScriptFrame {
                commands: random_commands(&mut driver),
                elapsed_ms: 100,
            });
            if result.game_over {
                over = true;
                break;
            }
        }
        assert!(over);
        assert!(recorder.session().state().is_game_over());
    }
}
