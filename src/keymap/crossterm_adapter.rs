//! Adapter to convert crossterm key events to our KeyChord type

use crossterm::event::{KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::{KeyChord, KeyCode, Modifiers};

/// Convert a crossterm key event to a KeyChord
///
/// Returns None for releases and for keys we have no code for (media keys,
/// bare modifiers and the like).
pub fn keychord_from_crossterm(event: &KeyEvent) -> Option<KeyChord> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let m = event.modifiers;
    let mods = Modifiers::new(
        m.contains(KeyModifiers::CONTROL),
        m.contains(KeyModifiers::SHIFT),
        m.contains(KeyModifiers::ALT),
        m.contains(KeyModifiers::SUPER) || m.contains(KeyModifiers::META),
    );

    let key = match event.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Escape,
        CtKeyCode::Tab => KeyCode::Tab,
        // Terminals report Shift-Tab as its own key
        CtKeyCode::BackTab => {
            return Some(KeyChord::new(KeyCode::Tab, mods.union(Modifiers::SHIFT)))
        }
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        CtKeyCode::Insert => KeyCode::Insert,
        CtKeyCode::F(n) if (1..=24).contains(&n) => KeyCode::F(n),
        _ => return None,
    };

    Some(KeyChord::new(key, mods))
}
