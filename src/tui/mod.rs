//! Terminal UI
//!
//! Interactive host for the risk wizard.

pub mod app;
pub mod events;
pub mod modal;
pub mod render;

pub use app::App;
pub use events::{EventHandler, TuiEvent};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Run the wizard until the user quits
pub async fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.handle_event(TuiEvent::Resize(size.width, size.height));

    let mut events = EventHandler::new();
    EventHandler::start_terminal_listener(events.sender());

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| render::render(f, app))?;

        let Some(event) = events.next().await else {
            tracing::debug!("Event channel closed");
            break;
        };
        app.handle_event(event);

        if app.should_quit {
            tracing::info!("Quitting at step {:?}", app.session.step());
            break;
        }
    }
    Ok(())
}
