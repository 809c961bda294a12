//! The basic keymap: what a key does when no binding says otherwise

use super::state::State;
use crate::action::Action;
use crate::keymap::{KeyChord, KeyCode, Modifiers};

/// Apply the built-in meaning of `key` to `state`
///
/// Printable characters are inserted at the dot, Enter commits the line and
/// Ctrl-D on an empty line ends input. Anything else is reported as unbound.
pub fn classify(key: KeyChord, state: &mut State) -> Action {
    let plain = key.mods.is_empty() || key.mods == Modifiers::SHIFT;
    match key.key {
        KeyCode::Enter if plain => Action::CommitCode,
        KeyCode::Char('D') if key.mods == Modifiers::CTRL && state.buffer.is_empty() => {
            Action::CommitEof
        }
        KeyCode::Backspace if plain => {
            state.buffer.delete_before_dot();
            Action::NoAction
        }
        KeyCode::Char('H') if key.mods == Modifiers::CTRL => {
            state.buffer.delete_before_dot();
            Action::NoAction
        }
        KeyCode::Left if plain => {
            state.buffer.move_left();
            Action::NoAction
        }
        KeyCode::Right if plain => {
            state.buffer.move_right();
            Action::NoAction
        }
        KeyCode::Home if plain => {
            state.buffer.move_home();
            Action::NoAction
        }
        KeyCode::End if plain => {
            state.buffer.move_end();
            Action::NoAction
        }
        KeyCode::Tab if plain => {
            state.buffer.insert_at_dot("\t");
            Action::NoAction
        }
        KeyCode::Char(c) if plain && !c.is_control() => {
            let mut utf8 = [0u8; 4];
            state.buffer.insert_at_dot(c.encode_utf8(&mut utf8));
            Action::NoAction
        }
        _ => {
            state.add_note(format!("Unbound: {}", key));
            Action::NoAction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Notes;
    use std::sync::Arc;

    fn state() -> State {
        State::new(Arc::new(Notes::new()))
    }

    #[test]
    fn test_chars_are_inserted() {
        let mut st = state();
        assert_eq!(classify(KeyChord::char('l'), &mut st), Action::NoAction);
        assert_eq!(classify(KeyChord::char('s'), &mut st), Action::NoAction);
        assert_eq!(classify(KeyChord::char(' '), &mut st), Action::NoAction);
        assert_eq!(st.buffer.content, "ls ");
    }

    #[test]
    fn test_enter_commits_code() {
        let mut st = state();
        assert_eq!(
            classify(KeyChord::key(KeyCode::Enter), &mut st),
            Action::CommitCode
        );
    }

    #[test]
    fn test_ctrl_d_only_ends_empty_input() {
        let mut st = state();
        assert_eq!(classify(KeyChord::ctrl('d'), &mut st), Action::CommitEof);

        st.buffer.insert_at_dot("x");
        assert_eq!(classify(KeyChord::ctrl('d'), &mut st), Action::NoAction);
        assert_eq!(st.notes().snapshot(), vec!["Unbound: Ctrl-D"]);
    }

    #[test]
    fn test_backspace_and_movement() {
        let mut st = state();
        for c in "abc".chars() {
            classify(KeyChord::char(c), &mut st);
        }
        classify(KeyChord::key(KeyCode::Left), &mut st);
        classify(KeyChord::key(KeyCode::Backspace), &mut st);
        assert_eq!(st.buffer.content, "ac");
        classify(KeyChord::key(KeyCode::Home), &mut st);
        classify(KeyChord::char('>'), &mut st);
        assert_eq!(st.buffer.content, ">ac");
    }

    #[test]
    fn test_unknown_chord_is_noted() {
        let mut st = state();
        classify(KeyChord::alt('x'), &mut st);
        assert!(st.buffer.is_empty());
        assert_eq!(st.notes().snapshot(), vec!["Unbound: Alt-x"]);
    }
}
