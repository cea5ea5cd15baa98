//! Directed connectors between elements.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Element, ElementId};

/// Unique identifier for connectors.
pub type ConnectorId = Uuid;

/// Path style for connector lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Straight,
    Curved,
    Orthogonal,
}

/// Optional per-connector presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_start: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_end: Option<bool>,
}

/// A directed edge from `source_id` to `target_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: ConnectorId,
    pub source_id: ElementId,
    pub target_id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ConnectorStyle>,
}

impl Connector {
    pub fn new(source_id: ElementId, target_id: ElementId) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id,
            target_id,
            source_point: None,
            target_point: None,
            style: None,
        }
    }

    /// Whether either end refers to `id`.
    pub fn references(&self, id: ElementId) -> bool {
        self.source_id == id || self.target_id == id
    }

    /// Centre-to-centre segment between the two ends.
    ///
    /// Returns `None` when either end no longer exists; callers skip the
    /// connector instead of failing.
    pub fn endpoints(&self, elements: &[Element]) -> Option<(Point, Point)> {
        let source = elements.iter().find(|e| e.id == self.source_id);
        let target = elements.iter().find(|e| e.id == self.target_id);
        match (source, target) {
            (Some(s), Some(t)) => Some((s.center(), t.center())),
            _ => {
                log::warn!("Skipping connector {} with a dangling end", self.id);
                None
            }
        }
    }

    pub fn apply(&mut self, patch: ConnectorPatch) {
        if let Some(source_id) = patch.source_id {
            self.source_id = source_id;
        }
        if let Some(target_id) = patch.target_id {
            self.target_id = target_id;
        }
        if let Some(source_point) = patch.source_point {
            self.source_point = source_point;
        }
        if let Some(target_point) = patch.target_point {
            self.target_point = target_point;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
    }
}

/// Partial update for a connector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorPatch {
    pub source_id: Option<ElementId>,
    pub target_id: Option<ElementId>,
    pub source_point: Option<Option<Point>>,
    pub target_point: Option<Option<Point>>,
    pub style: Option<Option<ConnectorStyle>>,
}
