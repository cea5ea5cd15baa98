//! Tool palette for the whiteboard.

use serde::{Deserialize, Serialize};

use crate::elements::ElementKind;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Connector,
    /// One-shot placement of an element kind.
    Place(ElementKind),
}

impl ToolKind {
    /// The element kind this tool places, if it is a placement tool.
    pub fn placeable(&self) -> Option<ElementKind> {
        match self {
            ToolKind::Place(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Single-letter tool shortcut (case-insensitive).
    pub fn from_shortcut(key: &str) -> Option<ToolKind> {
        match key.to_ascii_lowercase().as_str() {
            "v" => Some(ToolKind::Select),
            "h" => Some(ToolKind::Pan),
            "r" => Some(ToolKind::Place(ElementKind::Rectangle)),
            "o" => Some(ToolKind::Place(ElementKind::Circle)),
            "t" => Some(ToolKind::Place(ElementKind::Text)),
            "n" => Some(ToolKind::Place(ElementKind::StickyNote)),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
            ToolKind::Connector => "connector",
            ToolKind::Place(kind) => kind.as_str(),
        }
    }
}
