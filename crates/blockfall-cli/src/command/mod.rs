use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{GameConfig, PieceSeed};
use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};
use crate::util;

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a seeded game with random input and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

/// Game settings shared by all modes.
///
/// Flags override values read from `--config`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameConfigArg {
    /// JSON file with a game config (`rows`, `cols`, `initial_interval_ms`, `lookahead`)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of board rows
    #[clap(long)]
    rows: Option<usize>,
    /// Number of board columns
    #[clap(long)]
    cols: Option<usize>,
    /// Initial gravity interval in milliseconds
    #[clap(long)]
    interval_ms: Option<u64>,
    /// Number of upcoming pieces shown
    #[clap(long)]
    lookahead: Option<usize>,
    /// Seed for the piece sequence (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
}

impl GameConfigArg {
    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        let base = match &self.config {
            Some(path) => util::read_game_config(path)?,
            None => GameConfig::default(),
        };
        let config = GameConfig::new(
            self.rows.unwrap_or(base.rows()),
            self.cols.unwrap_or(base.cols()),
            self.interval_ms.unwrap_or(base.initial_interval_ms()),
            self.lookahead.unwrap_or(base.lookahead()),
        )
        .context("Invalid game config")?;
        Ok(config)
    }

    pub(crate) fn seed(&self) -> Option<PieceSeed> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = CommandArgs::try_parse_from([
            "blockfall", "play", "--rows", "12", "--cols", "6", "--seed", "42",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        let config = arg.config.game_config().unwrap();
        assert_eq!((config.rows(), config.cols()), (12, 6));
        assert_eq!(config.initial_interval_ms(), 500);
        assert_eq!(config.lookahead(), 3);
        assert_eq!(arg.config.seed(), Some(PieceSeed::from(42)));
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let args = CommandArgs::try_parse_from(["blockfall", "simulate", "--interval-ms", "0"])
            .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate mode");
        };
        let err = arg.config.game_config().unwrap_err();
        assert!(format!("{err:#}").contains("must be positive"), "{err:#}");
    }

    #[test]
    fn test_config_file_with_overrides() {
        let path = std::env::temp_dir().join(format!("blockfall-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "rows": 15, "lookahead": 1 }"#).unwrap();

        let arg = GameConfigArg {
            config: Some(path.clone()),
            lookahead: Some(4),
            ..GameConfigArg::default()
        };
        let config = arg.game_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.rows(), 15);
        assert_eq!(config.cols(), 10);
        assert_eq!(config.lookahead(), 4);
    }

    #[test]
    fn test_missing_config_file() {
        let arg = GameConfigArg {
            config: Some(PathBuf::from("/nonexistent/blockfall.json")),
            ..GameConfigArg::default()
        };
        let err = arg.game_config().unwrap_err();
        assert!(err.to_string().contains("Failed to open game config file"));
    }
}
