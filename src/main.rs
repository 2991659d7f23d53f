use std::{io, time::Duration};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use taskbot::{
    app::{self, input::handle_event, ui::draw, App, Session, Transcript},
    notify::ConsoleNotifier,
    persistence::{self, FileStore},
    Cli, Cmd,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, matches!(cli.cmd, Some(Cmd::Tui)));

    let data_path = match cli.data_file {
        Some(path) => path,
        None => persistence::default_path()?,
    };
    let store = FileStore::new(data_path);

    match cli.cmd {
        Some(Cmd::Exec { words }) => {
            let mut notifier = ConsoleNotifier::new(io::stdout());
            let mut session = Session::open(store, &mut notifier)?;
            session.handle_line(&words.join(" "), &mut notifier);
        }
        Some(Cmd::Tui) => launch_tui(store)?,
        Some(Cmd::Console) | None => {
            let mut notifier = ConsoleNotifier::new(io::stdout());
            let mut session = Session::open(store, &mut notifier)?;
            app::console::run(&mut session, io::stdin().lock(), io::stdout())?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins. Otherwise quiet, and silent under the TUI so the screen stays clean.
fn init_logging(verbose: bool, tui: bool) {
    let default = match (tui, verbose) {
        (true, _) => "off",
        (false, true) => "warn,taskbot=debug",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn launch_tui(store: FileStore) -> Result<()> {
    // Load before touching the terminal so a load failure prints normally
    let mut transcript = Transcript::default();
    let session = match Session::open(store, &mut transcript) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", taskbot::notify::FILE_ERROR);
            return Err(e.into());
        }
    };
    session.greet(&mut transcript);
    let mut app = App::new(session, transcript);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure proper teardown even on panic
    let _guard = TerminalGuard;

    while app.running {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            if let Event::Key(_) | Event::Resize(_, _) = ev {
                if !handle_event(&mut app, ev) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Restores the terminal on drop (even if we return early)
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Try best-effort cleanup; ignore errors at shutdown
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}
