mod app;
mod data;
mod event;
mod handler;
mod ui;

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::data::DataDir;
use crate::event::{Event, EventHandler};
use crate::handler::handle_key_events;

const TICK_RATE: Duration = Duration::from_millis(50);

/// Log to a file, not stderr: the alternate screen owns the terminal.
fn init_tracing() -> Result<()> {
    let file = File::create("dashboard-tui.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let mut app = App::new(&symbol, DataDir::from_env(), Instant::now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut events = EventHandler::new(TICK_RATE);
    let result = run(&mut terminal, &mut app, &mut events);

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    while app.active {
        terminal.draw(|frame| ui::render(app, frame))?;
        match events.next()? {
            Event::Tick => app.tick(Instant::now()),
            Event::Key(key) => handle_key_events(key, app, Instant::now()),
            Event::Resize => app.coordinator.window_resized(),
        }
    }
    Ok(())
}
