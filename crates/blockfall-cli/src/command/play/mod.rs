use blockfall_engine::GameSession;

use crate::{command::GameConfigArg, tui::Tui};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(super) config: GameConfigArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.config.game_config()?;
    let session = match arg.config.seed() {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    };

    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    let score = app.session().stats().score();
    if app.session().is_game_over() {
        println!("Game over! Score: {score}");
    } else {
        println!("Final score: {score}");
    }
    Ok(())
}
