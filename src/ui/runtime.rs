use crate::effects::UiCommandSender;
use crate::session::Session;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::time::Duration;

/// Drive the UI until the user quits or a shutdown signal arrives.
///
/// `events` must be the handler whose sender the effects worker posts to.
pub fn run(session: Session, commands: UiCommandSender, events: EventHandler) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let mut app = App::new(session);
    app.set_command_sender(commands);
    app.start();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Paste(text)) => app.on_paste(&text),
            Ok(AppEvent::Effect {
                generation,
                outcome,
            }) => app.on_effect(generation, outcome),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(..)) => {}
            Ok(AppEvent::Shutdown) => {
                tracing::info!("shutdown requested");
                app.request_quit();
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
