use std::path::PathBuf;

use crate::{
    command::{GameConfigArg, ReportArg},
    record::{Recorder, ScriptFrame},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    pub(super) config: GameConfigArg,
    /// Script file: a JSON array of `{ "commands": [...], "elapsed_ms": n }`
    /// frames (stdin when omitted)
    #[arg(long)]
    script: Option<PathBuf>,
    #[clap(flatten)]
    pub(super) report: ReportArg,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        config,
        script,
        report,
    } = arg;

    let config = config.resolve()?;
    let script: Vec<ScriptFrame> = util::read_json("script", script.as_deref())?;
    log::info!("replaying {} frames", script.len());

    let mut recorder = Recorder::new(config)?;
    for frame in script {
        recorder.play_frame(frame);
    }

    report.report(&recorder.finish())
}
