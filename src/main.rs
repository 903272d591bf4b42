use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use launchdeck::config::AppConfig;
use launchdeck::core::routes::Route;
use launchdeck::tui::app::AppState;
use launchdeck::tui::services::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // File logging only; the terminal belongs to ratatui
    let _log_guard = launchdeck::core::logging::init_tui();
    log::info!("LaunchDeck v{} starting", launchdeck::VERSION);

    let config = AppConfig::load();

    // Optional start path, e.g. `launchdeck /campaigns/abc`
    let start = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path).map_err(|e| {
            eprintln!("Error: {e}");
            e
        })?,
        None => Route::Home,
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx)?;
    let mut app = AppState::new(event_rx, services, start);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("TUI exited with error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("LaunchDeck exiting");
    Ok(())
}
