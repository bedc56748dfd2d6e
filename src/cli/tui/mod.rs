//! Terminal user interface for idcat.
//!
//! First screen picks a directory; second screen shows its catalog and
//! looks up identifiers. Closing the UI ends the program.

pub mod app;
pub mod event;
pub mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::catalog::FilenameSource;

use self::app::App;
use self::event::{Event, EventHandler};

/// Run the TUI until the user quits
pub async fn run(source: Arc<dyn FilenameSource>, directory: Option<PathBuf>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, directory);
    let mut events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run the application loop
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next().await {
            Event::Key(key) => app.handle_key(key).await,
            Event::Tick => {}
        }
    }

    Ok(())
}
