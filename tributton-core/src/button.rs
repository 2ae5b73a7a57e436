//! Button identities, key codes and events
//!
//! A button driver emits a [`KeyEvent`] carrying the key code it was
//! registered with. The mapper resolves that code back to a [`ButtonId`],
//! which indexes the fixed per-button tables.

/// Number of buttons (and LEDs) on the board
pub const BUTTON_COUNT: usize = 3;

/// Logical button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    A,
    B,
    C,
}

impl ButtonId {
    /// All buttons in table order
    pub const ALL: [ButtonId; BUTTON_COUNT] = [ButtonId::A, ButtonId::B, ButtonId::C];

    /// Table index for this button
    pub const fn index(self) -> usize {
        match self {
            ButtonId::A => 0,
            ButtonId::B => 1,
            ButtonId::C => 2,
        }
    }

    /// Button for a table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase name used for `[channel.<name>]` config sections
    pub const fn name(self) -> &'static str {
        match self {
            ButtonId::A => "a",
            ButtonId::B => "b",
            ButtonId::C => "c",
        }
    }

    /// Parse a config section name ("a", "b", "c", case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Key code emitted by this button's driver in the default layout
    pub const fn default_key(self) -> KeyCode {
        match self {
            ButtonId::A => KeyCode::A,
            ButtonId::B => KeyCode::B,
            ButtonId::C => KeyCode::C,
        }
    }
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    Pressed,
    Released,
}

impl ButtonAction {
    /// LED level that corresponds to this action
    pub const fn led_on(self) -> bool {
        matches!(self, ButtonAction::Pressed)
    }
}

/// Key code carried by a key event
///
/// Letter codes follow the Android numbering (`KEYCODE_A` = 29 through
/// `KEYCODE_Z` = 54) so layouts port across unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const A: KeyCode = KeyCode(29);
    pub const B: KeyCode = KeyCode(30);
    pub const C: KeyCode = KeyCode(31);

    /// Key code for an ASCII letter
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_alphabetic() {
            let offset = letter.to_ascii_uppercase() as u16 - 'A' as u16;
            Some(KeyCode(Self::A.0 + offset))
        } else {
            None
        }
    }

    /// The letter this code stands for, if it is a letter code
    pub fn letter(self) -> Option<char> {
        let z = Self::A.0 + 25;
        if (Self::A.0..=z).contains(&self.0) {
            Some((b'A' + (self.0 - Self::A.0) as u8) as char)
        } else {
            None
        }
    }
}

/// Event emitted by a button driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub code: KeyCode,
    pub action: ButtonAction,
}

impl KeyEvent {
    pub const fn down(code: KeyCode) -> Self {
        Self {
            code,
            action: ButtonAction::Pressed,
        }
    }

    pub const fn up(code: KeyCode) -> Self {
        Self {
            code,
            action: ButtonAction::Released,
        }
    }
}

/// Event resolved to a board button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: ButtonId,
    pub action: ButtonAction,
}

impl ButtonEvent {
    pub const fn pressed(button: ButtonId) -> Self {
        Self {
            button,
            action: ButtonAction::Pressed,
        }
    }

    pub const fn released(button: ButtonId) -> Self {
        Self {
            button,
            action: ButtonAction::Released,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, b) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
            assert_eq!(ButtonId::from_index(i), Some(*b));
        }
        assert_eq!(ButtonId::from_index(3), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(ButtonId::from_name("b"), Some(ButtonId::B));
        assert_eq!(ButtonId::from_name("C"), Some(ButtonId::C));
        assert_eq!(ButtonId::from_name("d"), None);
    }

    #[test]
    fn test_key_letters() {
        assert_eq!(KeyCode::from_letter('a'), Some(KeyCode::A));
        assert_eq!(KeyCode::from_letter('C'), Some(KeyCode::C));
        assert_eq!(KeyCode::from_letter('Z'), Some(KeyCode(54)));
        assert_eq!(KeyCode::from_letter('1'), None);
        assert_eq!(KeyCode::B.letter(), Some('B'));
        assert_eq!(KeyCode(54).letter(), Some('Z'));
        assert_eq!(KeyCode(62).letter(), None);
    }

    #[test]
    fn test_default_keys() {
        assert_eq!(ButtonId::A.default_key(), KeyCode::A);
        assert_eq!(ButtonId::C.default_key(), KeyCode::C);
    }

    #[test]
    fn test_action_level() {
        assert!(ButtonAction::Pressed.led_on());
        assert!(!ButtonAction::Released.led_on());
    }
}
