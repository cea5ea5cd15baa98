//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub hold: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, hold: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            hold,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Wheel", "Hold Space").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        parts.push(self.key);
        let combo = parts.join("+");
        if self.hold {
            format!("Hold {}", combo)
        } else {
            combo
        }
    }
}

/// Registry of the canvas keyboard surface.
///
/// Shortcuts are ignored while a text field has focus.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("V", false, false, "Select tool"),
            Shortcut::new("H", false, false, "Pan tool"),
            Shortcut::new("R", false, false, "Rectangle"),
            Shortcut::new("O", false, false, "Circle"),
            Shortcut::new("T", false, false, "Text"),
            Shortcut::new("N", false, false, "Sticky note"),
            Shortcut::new("Space", false, true, "Pan while held"),
            Shortcut::new("Delete", false, false, "Delete selected element"),
            Shortcut::new("Backspace", false, false, "Delete selected element"),
            Shortcut::new("Escape", false, false, "Cancel connector or current gesture"),
            Shortcut::new("Wheel", true, false, "Zoom"),
            Shortcut::new("Wheel", false, false, "Pan"),
        ]
    }

    /// All shortcuts as aligned text.
    pub fn format_all() -> String {
        let mut out = String::from("Keyboard shortcuts\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:16} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_core::ToolKind;

    #[test]
    fn test_letter_shortcuts_select_tools() {
        for shortcut in ShortcutRegistry::all() {
            if shortcut.key.len() == 1 {
                assert!(
                    ToolKind::from_shortcut(shortcut.key).is_some(),
                    "{} has no tool",
                    shortcut.key
                );
            }
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Wheel", true, false, "").format(), "Ctrl+Wheel");
        assert_eq!(Shortcut::new("Space", false, true, "").format(), "Hold Space");
        assert!(ShortcutRegistry::format_all().contains("Sticky note"));
    }
}
