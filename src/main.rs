use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use authtui::config::{get_config_path, Config};
use authtui::messages::Msg;
use authtui::services::{backup, migration, otp, AccountDb, Services, SystemClock};
use authtui::{ui, utils, App, Collaborators};

/// Terminal OTP account manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/authtui-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (jk, gg/G, ^D/^U)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the account database
    #[arg(long)]
    db: Option<PathBuf>,
}

/// Route tracing output to the debug log file
fn init_logging() -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
        .context("Failed to open debug log")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("authtui=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        init_logging()?;
        tracing::info!("debug mode enabled");
    }

    let config_path = get_config_path(args.config)?;
    tracing::debug!(?config_path, "loading config");
    let config = Config::load(config_path.as_deref())?;

    let mut app_config = config.app_config();
    if args.vim {
        app_config.vim_mode = true;
    }

    let db_path = args
        .db
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(AccountDb::default_path);
    tracing::debug!(db = %db_path.display(), "opening database");
    let db = AccountDb::new(&db_path)?;

    let collaborators = Collaborators {
        services: Services {
            persistence: Arc::new(db),
            crypto: Arc::new(backup::Unconfigured),
            remote: Arc::new(backup::Unconfigured),
        },
        engine: Arc::new(otp::Totp),
        decoder: Arc::new(migration::Unsupported),
        clock: Arc::new(SystemClock),
    };

    let mut app = App::load(app_config, collaborators).await?;
    app.start_scheduler();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Let queued saves land before exiting
    app.shutdown().await;

    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.model.ui.should_quit {
            break;
        }

        // Ticks and worker results (non-blocking)
        app.drain_background();

        // Short poll keeps the countdown moving without input
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => app.update(Msg::Key(key)),
                Event::Mouse(mouse) => app.update(Msg::Mouse(mouse)),
                _ => {}
            }
        }

        // Let spawned tasks run between frames
        tokio::task::yield_now().await;
    }
    Ok(())
}
