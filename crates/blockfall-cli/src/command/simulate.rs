use std::path::PathBuf;

use blockfall_engine::{Command, GameConfig, GameSession, PieceSeed, Snapshot};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{command::GameConfigArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) config: GameConfigArg,
    /// Seed for the random command stream (random if omitted)
    #[clap(long)]
    input_seed: Option<u64>,
    /// Stop after this many ticks even if the game is still running
    #[clap(long, default_value_t = 10_000)]
    max_ticks: usize,
    /// Most commands sent between two ticks
    #[clap(long, default_value_t = 3)]
    max_commands_per_tick: usize,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    config: GameConfig,
    piece_seed: PieceSeed,
    input_seed: u64,
    ticks: usize,
    commands_sent: usize,
    commands_rejected: usize,
    final_state: Snapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = arg.config.game_config()?;
    let piece_seed = arg.config.seed().unwrap_or_else(|| rand::rng().random());
    let input_seed = arg.input_seed.unwrap_or_else(|| rand::rng().random());

    let report = simulate(
        config,
        piece_seed,
        input_seed,
        arg.max_ticks,
        arg.max_commands_per_tick,
    );
    eprintln!(
        "Simulated {} ticks: score {}, level {}{}",
        report.ticks,
        report.final_state.score(),
        report.final_state.level(),
        if report.final_state.is_game_over() {
            ", game over"
        } else {
            ""
        },
    );

    util::write_report(&report, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}

fn simulate(
    config: GameConfig,
    piece_seed: PieceSeed,
    input_seed: u64,
    max_ticks: usize,
    max_commands_per_tick: usize,
) -> SimulationReport {
    let mut session = GameSession::with_seed(config, piece_seed);
    let mut rng = Pcg32::seed_from_u64(input_seed);
    let mut ticks = 0;
    let mut commands_sent = 0;
    let mut commands_rejected = 0;

    while ticks < max_ticks && !session.is_game_over() {
        for _ in 0..rng.random_range(0..=max_commands_per_tick) {
            let command = Command::ALL[rng.random_range(0..Command::ALL.len())];
            commands_sent += 1;
            if session.command(command).is_err() {
                commands_rejected += 1;
            }
        }
        session.tick();
        ticks += 1;
    }

    SimulationReport {
        config,
        piece_seed,
        input_seed,
        ticks,
        commands_sent,
        commands_rejected,
        final_state: session.snapshot(),
    }
}
