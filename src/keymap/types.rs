//! Core types for the keymap system: KeyChord, Modifiers, KeyCode

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Remove the modifiers in other
    #[inline]
    pub const fn difference(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    /// Prefix form used by key display strings, e.g. `Ctrl-Alt-`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl() {
            f.write_str("Ctrl-")?;
        }
        if self.alt() {
            f.write_str("Alt-")?;
        }
        if self.shift() {
            f.write_str("Shift-")?;
        }
        if self.meta() {
            f.write_str("Meta-")?;
        }
        Ok(())
    }
}

/// A key code representing a logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A character key
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    /// Sentinel key of the fallback entry in a binding table. Never produced
    /// by a real key press.
    Default,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Default => write!(f, "Default"),
        }
    }
}

/// The identity of a single key press: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyChord {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl KeyChord {
    /// Table key of the fallback entry
    pub const DEFAULT: KeyChord = KeyChord {
        key: KeyCode::Default,
        mods: Modifiers::NONE,
    };

    /// Create a new chord
    ///
    /// Character keys are normalized: Shift is folded into the character
    /// (`Shift-a` is `A`), and letters chorded with Ctrl are uppercase so that
    /// `Ctrl-x` and `Ctrl-X` are the same chord.
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        match key {
            KeyCode::Char(c) if mods.shift() || mods.ctrl() => match single_upper(c) {
                Some(upper) => Self {
                    key: KeyCode::Char(upper),
                    mods: mods.difference(Modifiers::SHIFT),
                },
                // No one-char uppercase form; Shift stays part of the chord
                None => Self {
                    key: KeyCode::Char(c),
                    mods,
                },
            },
            key => Self { key, mods },
        }
    }

    /// Create a chord with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create an unmodified character chord
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Ctrl chord, e.g. `KeyChord::ctrl('x')` is `Ctrl-X`
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// Create an Alt chord
    pub fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::ALT)
    }

    /// Whether this is the fallback sentinel
    pub fn is_default(&self) -> bool {
        self.key == KeyCode::Default
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mods, self.key)
    }
}

/// Uppercase form of `c` when it is a single character
fn single_upper(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::META));
    }

    #[test]
    fn test_chord_display() {
        assert_eq!(KeyChord::ctrl('x').to_string(), "Ctrl-X");
        assert_eq!(KeyChord::alt('b').to_string(), "Alt-b");
        assert_eq!(KeyChord::char('a').to_string(), "a");
        assert_eq!(KeyChord::key(KeyCode::F(5)).to_string(), "F5");
        assert_eq!(
            KeyChord::new(KeyCode::Enter, Modifiers::CTRL | Modifiers::ALT).to_string(),
            "Ctrl-Alt-Enter"
        );
        assert_eq!(KeyChord::DEFAULT.to_string(), "Default");
    }

    #[test]
    fn test_ctrl_chord_case_insensitive() {
        assert_eq!(KeyChord::ctrl('x'), KeyChord::ctrl('X'));
        assert_ne!(KeyChord::char('x'), KeyChord::char('X'));
    }

    #[test]
    fn test_shift_folds_into_char() {
        let chord = KeyChord::new(KeyCode::Char('a'), Modifiers::SHIFT);
        assert_eq!(chord, KeyChord::char('A'));
        assert_eq!(chord.to_string(), "A");

        let chord = KeyChord::new(KeyCode::Tab, Modifiers::SHIFT);
        assert_eq!(chord.to_string(), "Shift-Tab");
    }

    #[test]
    fn test_shift_folds_into_non_ascii_char() {
        let chord = KeyChord::new(KeyCode::Char('é'), Modifiers::SHIFT);
        assert_eq!(chord, KeyChord::char('É'));
        assert_eq!(KeyChord::ctrl('ж'), KeyChord::ctrl('Ж'));

        // 'ß' uppercases to "SS", so Shift is kept
        let chord = KeyChord::new(KeyCode::Char('ß'), Modifiers::SHIFT);
        assert_eq!(chord.to_string(), "Shift-ß");
        assert_ne!(chord, KeyChord::char('ß'));
    }

    #[test]
    fn test_default_sentinel() {
        assert!(KeyChord::DEFAULT.is_default());
        assert!(!KeyChord::char('d').is_default());
    }
}
