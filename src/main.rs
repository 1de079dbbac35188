//! peertop — live table of a Bitcoin node's peers.
//!
//! Runs `bitcoin-cli getpeerinfo` every refresh interval (15s by default)
//! and redraws an htop-style table of the node's connections. Peers that do
//! not advertise NODE_NETWORK (they cannot serve historical blocks) are
//! highlighted.
//!
//! Keys: `r` refresh now, arrows/PgUp/PgDn scroll, `q`/Esc/Ctrl+C quit.

mod app;
mod color_scheme;
mod config;
mod input;
mod peers;
mod signals;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Cli, MonitorConfig};
use peers::{PeerFetcher, Snapshot};
use signals::ShutdownFlag;

/// Longest single input wait, so a shutdown signal is noticed promptly
const POLL_SLICE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = MonitorConfig::from_cli(Cli::parse());
    init_logging(&config)?;

    let fetcher = PeerFetcher::new(config.cli.clone());

    if config.once {
        return print_once(&fetcher);
    }

    // Fail fast when the client is not installed at all; any later failure
    // is shown in the table for that cycle only.
    let first = fetcher.fetch();
    if let Err(e) = &first {
        if e.is_missing_program() {
            error!(error = %e, "node client not found");
            eprintln!("Error: {}", e);
            eprintln!("Make sure bitcoin-cli is on your PATH or pass --cli <path>");
            std::process::exit(1);
        }
    }

    let mut app = App::new(&config);
    app.apply_fetch(first, Local::now());

    let shutdown = ShutdownFlag::new();
    signals::install(shutdown.clone())?;

    // Setup terminal
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut app, &fetcher, &shutdown);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!(error = %e, "terminal failure");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!(refreshes = app.refresh_count, failures = app.failure_count, "exiting");
    Ok(())
}

/// Refresh loop: draw, wait for input until the next refresh is due,
/// refresh, repeat until the app is stopped.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetcher: &PeerFetcher,
    shutdown: &ShutdownFlag,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.is_running() {
        app.visible_rows = ui::table_rows(terminal.size()?.height);
        app.clamp_scroll();

        terminal.draw(|f| ui::draw(f, app))?;

        // Wait for input until the next refresh is due, in short slices
        let timeout = app
            .refresh_interval
            .saturating_sub(last_refresh.elapsed())
            .min(POLL_SLICE);
        if event::poll(timeout)? {
            match event::read()? {
                // On Windows, crossterm fires Press and Release; only handle Press
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_input(app, key);
                }
                // Terminal resize - redrawn on the next iteration
                _ => {}
            }
        }

        app.handle_shutdown(shutdown);
        if !app.is_running() {
            break;
        }

        if app.refresh_requested || last_refresh.elapsed() >= app.refresh_interval {
            app.refresh(fetcher);
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Put the terminal back before the default panic message is printed
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        previous(info);
    }));
}

/// `--once`: print a single plain-text table and exit
fn print_once(fetcher: &PeerFetcher) -> Result<()> {
    let peers = fetcher
        .fetch()
        .context("Error fetching peer info")?;
    let snapshot = Snapshot::new(peers, Local::now());
    print!("{}", ui::plain::render_plain(&snapshot));
    Ok(())
}

/// Diagnostics go to `--log-file` only, since the terminal belongs to the UI
fn init_logging(config: &MonitorConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    info!(interval_secs = config.refresh_interval.as_secs(), cli = %config.cli.display(), "starting");
    Ok(())
}
