//! Raw pointer and keyboard input, normalised for the interaction engine.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn zoom(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// The pointer left the canvas.
    Leave,
    Wheel {
        position: Point,
        delta: Vec2,
        modifiers: Modifiers,
    },
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Escape,
    Delete,
    Backspace,
    Enter,
    Shift,
    Control,
    Alt,
    /// Cmd on macOS, the Windows key elsewhere.
    Meta,
    /// A printable key, lowercased.
    Char(char),
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name (`" "`, `"Escape"`, `"Delete"`, `"v"`...).
    pub fn from_name(name: &str) -> Key {
        match name {
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Enter" => Key::Enter,
            "Shift" => Key::Shift,
            "Control" | "Ctrl" => Key::Control,
            "Alt" | "Option" => Key::Alt,
            "Meta" | "OS" | "Command" | "Cmd" => Key::Meta,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }

    /// Whether this key deletes the selection.
    pub fn is_delete(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Keyboard event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer and key state between events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Last known pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Whether the pointer is over the canvas.
    pub pointer_inside: bool,
    pressed_buttons: HashSet<MouseButton>,
    pressed_keys: HashSet<Key>,
    pub modifiers: Modifiers,
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            pointer_inside: false,
            pressed_buttons: HashSet::new(),
            pressed_keys: HashSet::new(),
            modifiers: Modifiers::default(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.double_click_detected = false;
        match *event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pointer_inside = true;
                self.pressed_buttons.insert(button);
                if button == MouseButton::Left {
                    self.detect_double_click(position);
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                self.pointer_inside = true;
            }
            PointerEvent::Leave => {
                self.pointer_inside = false;
                self.pressed_buttons.clear();
            }
            PointerEvent::Wheel {
                position,
                modifiers,
                ..
            } => {
                self.pointer_position = position;
                self.modifiers = modifiers;
            }
        }
    }

    fn detect_double_click(&mut self, position: Point) {
        let now = Instant::now();
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position)
        {
            let elapsed = now.duration_since(last_time).as_millis();
            if elapsed < DOUBLE_CLICK_TIME_MS && position.distance(last_pos) < DOUBLE_CLICK_DISTANCE {
                self.double_click_detected = true;
                // A third click starts a new pair.
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// Record a key event. Modifier keys update [`Self::modifiers`].
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let (key, down) = match event {
            KeyEvent::Pressed(key) => (key, true),
            KeyEvent::Released(key) => (key, false),
        };
        match key {
            Key::Shift => self.modifiers.shift = down,
            Key::Control => self.modifiers.ctrl = down,
            Key::Alt => self.modifiers.alt = down,
            Key::Meta => self.modifiers.meta = down,
            _ if down => {
                self.pressed_keys.insert(key.clone());
            }
            _ => {
                self.pressed_keys.remove(key);
            }
        }
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn is_key_pressed(&self, key: &Key) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Spacebar held as a momentary pan modifier.
    pub fn space_held(&self) -> bool {
        self.is_key_pressed(&Key::Space)
    }

    /// Whether the most recent pointer-down completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("V"), Key::Char('v'));
        assert_eq!(Key::from_name("F5"), Key::Other("F5".to_string()));
        assert!(Key::from_name("Backspace").is_delete());
        assert_eq!(Key::from_name("Control"), Key::Control);
        assert!(Key::from_name("Shift").is_modifier());
    }

    #[test]
    fn test_button_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(10.0, 10.0));
        assert!(input.is_button_pressed(MouseButton::Left));
        input.handle_pointer_event(&up(10.0, 10.0));
        assert!(!input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_leave_releases_buttons() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(10.0, 10.0));
        input.handle_pointer_event(&PointerEvent::Leave);
        assert!(!input.is_button_pressed(MouseButton::Left));
        assert!(!input.pointer_inside);
    }

    #[test]
    fn test_space_held() {
        let mut input = InputState::new();
        input.handle_key_event(&KeyEvent::Pressed(Key::Space));
        assert!(input.space_held());
        input.handle_key_event(&KeyEvent::Released(Key::Space));
        assert!(!input.space_held());
    }

    #[test]
    fn test_modifier_keys_track_modifiers() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Wheel {
            position: Point::new(10.0, 10.0),
            delta: Vec2::new(0.0, -100.0),
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        });
        assert!(input.modifiers.zoom());

        input.handle_key_event(&KeyEvent::Released(Key::from_name("Control")));
        assert!(!input.modifiers.zoom());

        input.handle_key_event(&KeyEvent::Pressed(Key::from_name("Meta")));
        assert!(input.modifiers.meta);
        assert!(!input.is_key_pressed(&Key::Meta));
        input.handle_key_event(&KeyEvent::Released(Key::Meta));
        assert!(!input.modifiers.zoom());
    }

    #[test]
    fn test_double_click_detection() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(100.0, 100.0));
        assert!(!input.is_double_click());
        input.handle_pointer_event(&up(100.0, 100.0));
        input.handle_pointer_event(&down(101.0, 100.0));
        assert!(input.is_double_click());
        input.handle_pointer_event(&up(101.0, 100.0));
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_double_click_too_far() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(100.0, 100.0));
        input.handle_pointer_event(&up(100.0, 100.0));
        input.handle_pointer_event(&down(200.0, 200.0));
        assert!(!input.is_double_click());
    }
}
