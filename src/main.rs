use anyhow::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::sync::mpsc;

use grantgen::config::AppConfig;
use grantgen::core::logging;
use grantgen::tui::app::AppState;
use grantgen::tui::services::Services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();

    // Keep the guard alive for the life of the process so buffered log
    // lines are flushed on exit.
    let _log_guard = logging::init_tui(&config.data_dir());
    log::info!("{} {} starting", grantgen::NAME, grantgen::VERSION);

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableBracketedPaste)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(config, event_tx);
    let mut app = AppState::new(services, event_rx);

    let result = app.run(&mut terminal).await;

    let _ = execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    log::info!("{} exiting", grantgen::NAME);
    result
}
