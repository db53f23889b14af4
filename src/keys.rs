//! Key names, macOS virtual keycodes and modifier chords.
//!
//! Keys are written in presets as lowercase names (`"a"`, `"space"`,
//! `"up"`), optionally combined with modifiers: `"command+s"`,
//! `"control+space"`.

/// macOS virtual keycode (`kVK_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(pub u16);

pub const KEY_LEFT: KeyCode = KeyCode(0x7B);
pub const KEY_RIGHT: KeyCode = KeyCode(0x7C);
pub const KEY_DOWN: KeyCode = KeyCode(0x7D);
pub const KEY_UP: KeyCode = KeyCode(0x7E);

/// Virtual keycodes for the key names presets may use.
const KEYCODES: &[(&str, u16)] = &[
    ("a", 0x00),
    ("s", 0x01),
    ("d", 0x02),
    ("f", 0x03),
    ("h", 0x04),
    ("g", 0x05),
    ("z", 0x06),
    ("x", 0x07),
    ("c", 0x08),
    ("v", 0x09),
    ("b", 0x0B),
    ("q", 0x0C),
    ("w", 0x0D),
    ("e", 0x0E),
    ("r", 0x0F),
    ("y", 0x10),
    ("t", 0x11),
    ("1", 0x12),
    ("2", 0x13),
    ("3", 0x14),
    ("4", 0x15),
    ("6", 0x16),
    ("5", 0x17),
    ("9", 0x19),
    ("7", 0x1A),
    ("8", 0x1C),
    ("0", 0x1D),
    ("o", 0x1F),
    ("u", 0x20),
    ("i", 0x22),
    ("p", 0x23),
    ("return", 0x24),
    ("l", 0x25),
    ("j", 0x26),
    ("k", 0x28),
    ("n", 0x2D),
    ("m", 0x2E),
    ("tab", 0x30),
    ("space", 0x31),
    ("delete", 0x33),
    ("escape", 0x35),
    ("left", 0x7B),
    ("right", 0x7C),
    ("down", 0x7D),
    ("up", 0x7E),
];

/// Look up the virtual keycode for a key name (case-insensitive).
pub fn keycode_for(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_ascii_lowercase();
    KEYCODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, code)| KeyCode(code))
}

/// Modifier keys held together with a chord's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Modifiers {
    pub command: bool,
    pub control: bool,
    pub shift: bool,
    pub option: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.command || self.control || self.shift || self.option)
    }

    /// Set the modifier named `name`; returns false if it is not a modifier.
    fn set_by_name(&mut self, name: &str) -> bool {
        match name {
            "command" | "cmd" => self.command = true,
            "control" | "ctrl" => self.control = true,
            "shift" => self.shift = true,
            "option" | "alt" => self.option = true,
            _ => return false,
        }
        true
    }
}

/// One key plus zero or more modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::default(),
        }
    }

    /// Parse `"key"` or `"mod+mod+key"`.
    ///
    /// Returns `None` for unknown names, for a chord with only modifiers,
    /// and for a chord naming more than one regular key.
    pub fn parse(s: &str) -> Option<KeyChord> {
        let mut modifiers = Modifiers::default();
        let mut code = None;

        for part in s.split('+') {
            let part = part.trim().to_ascii_lowercase();
            if part.is_empty() {
                return None;
            }
            if modifiers.set_by_name(&part) {
                continue;
            }
            if code.is_some() {
                return None;
            }
            code = Some(keycode_for(&part)?);
        }

        code.map(|code| KeyChord { code, modifiers })
    }
}

/// Mouse button synthesized by click cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    #[default]
    Right,
    Middle,
}

impl MouseButton {
    /// Parse `left`/`right`/`middle`; an empty name means the default (right).
    pub fn parse(s: &str) -> Option<MouseButton> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Some(MouseButton::default()),
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}
