use super::App;
use crate::event_handler::EventHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::{panic, time::Duration};

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal.clear()?;
    terminal.draw(|frame| app.render(frame))?;

    while !app.should_exit {
        let tui_poll = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            EventHandler::read()
        };

        tokio::select! {
            maybe_event = tui_poll => {
                if let Some(event) = maybe_event? {
                    app.handle_event(event);
                    terminal.draw(|frame| app.render(frame))?;
                }
            }
            changed = app.updates.changed() => {
                match changed {
                    Ok(()) => {
                        if app.refresh() {
                            terminal.draw(|frame| app.render(frame))?;
                        }
                    }
                    Err(_) => {
                        tracing::warn!("transcript store closed");
                        app.should_exit = true;
                    }
                }
            }
        }
    }

    app.shutdown();

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}
