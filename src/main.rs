use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use focusflow::{
    alert::DesktopAlerter,
    app::App,
    clock::{Clock, SystemClock},
    config::{self, Args, Config},
    engine::TimerEngine,
    logging,
    shell::SessionShell,
    store::{FileStore, KeyValueStore},
    ui,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Upper bound on how long the loop sleeps, so the screen keeps redrawing
/// while paused and after resizes.
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Restores the terminal on every way out of `main`, panics included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), SetTitle(""), LeaveAlternateScreen);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let dir = config::state_dir(&args);

    if let Err(e) = logging::init(&dir, args.log_level.as_deref()) {
        eprintln!("focusflow: logging disabled: {e}");
    }
    tracing::info!(dir = %dir.display(), "starting");

    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::new(&dir));
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let settings = Config::resolve(&dir, &args);
    let shell = SessionShell::new(store.clone(), clock.clone(), settings, DesktopAlerter);

    let engine = if args.fresh {
        TimerEngine::new(store, clock, shell)
    } else {
        TimerEngine::restore(store, clock, shell)
    };
    let mut app = App::new(engine, dir);

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let res = run(&mut terminal, &mut app);
    terminal.show_cursor()?;
    drop(guard);

    if let Err(e) = &res {
        tracing::error!(error = %e, "exiting on error");
    }
    tracing::info!("exiting");
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App<DesktopAlerter>) -> Result<()> {
    let mut shown_title = String::new();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let title = app.title();
        if title != shown_title {
            execute!(io::stdout(), SetTitle(&title))?;
            shown_title = title;
        }

        let timeout = app
            .engine
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(REDRAW_INTERVAL)
            .min(REDRAW_INTERVAL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        app.engine.poll(Instant::now());
    }
}

