mod app;
mod config;
mod event;
mod state;
mod ui;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use morphclock::MorphError;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::App;
use crate::config::{CliArgs, Config};
use crate::event::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Restore the terminal before any panic report reaches it
    install_panic_hook();

    let config = config::load(&cli)?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = init_logging(&config)?;

    info!("morphclock starting");

    let mut app = App::new(&config).wrap_err("Failed to set up digits")?;

    let state_path = state::state_path();
    if config.display.save_state {
        restore_session(&mut app, &state_path);
    }

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| MorphError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let mut event_handler = EventHandler::new(config.tick_rate_ms());

    // ── Main event loop ───────────────────────────────────────────────
    loop {
        if app.take_dirty() {
            terminal.draw(|f| ui::draw(f, &mut app))?;
        }

        match event_handler.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }
    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if config.display.save_state {
        if let Err(e) = state::save(&state_path, &app.session()) {
            warn!("Failed to save state: {e}");
            eprintln!("morphclock: could not save state: {e}");
        }
    }

    info!("morphclock exiting");
    Ok(())
}

fn restore_session(app: &mut App, path: &Path) {
    match state::load(path) {
        Ok(Some(session)) => {
            if let Err(e) = app.restore(&session) {
                warn!("Ignoring saved state: {e}");
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable state at {}: {e}", path.display()),
    }
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to the configured log file. Nothing is logged when no
/// file is configured, since stdout belongs to the UI.
fn init_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = config.log_path() else {
        return Ok(None);
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| MorphError::Config(format!("Not a log file path: {}", path.display())))?;
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
