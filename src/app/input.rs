use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::persistence::Store;

const PAGE: usize = 10;

/// Returns `false` once the app should close.
pub fn handle_event<S: Store>(app: &mut App<S>, ev: Event) -> bool {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => handle_key(app, code, modifiers),
        _ => true,
    }
}

fn handle_key<S: Store>(app: &mut App<S>, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc => return false,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return false,

        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),

        // transcript scrolling
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::PageDown => app.scroll_down(PAGE),

        _ => {}
    }
    app.running
}
