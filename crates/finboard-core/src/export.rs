//! JSON export of the whiteboard with canvas metadata.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements::{Connector, Element};
use crate::store::Store;

/// Export format version.
pub const EXPORT_VERSION: &str = "1.1.0";
pub const EXPORT_SCHEMA_VERSION: u32 = 1;
/// Padding used when framing content.
pub const DEFAULT_BOUNDS_PADDING: f64 = 50.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Axis-aligned box around all elements, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBounds {
    fn from_rect(rect: Rect) -> Self {
        Self {
            min_x: rect.x0,
            min_y: rect.y0,
            max_x: rect.x1,
            max_y: rect.y1,
            width: rect.width(),
            height: rect.height(),
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Bounding box of all elements grown by `padding` on every side.
///
/// An empty board frames a default 800x600 area.
pub fn calculate_content_bounds(elements: &[Element], padding: f64) -> ContentBounds {
    let Some(first) = elements.first() else {
        return ContentBounds::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
    };
    let union = elements
        .iter()
        .skip(1)
        .fold(first.bounds(), |acc, el| acc.union(el.bounds()));
    ContentBounds::from_rect(union.inflate(padding, padding))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasInfo {
    pub scale: f64,
    pub offset: Vec2,
    pub bounds: ContentBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatistics {
    pub total_elements: usize,
    pub total_connectors: usize,
    /// Count per element kind, keyed by wire name.
    pub elements_by_type: BTreeMap<String, usize>,
}

impl ExportStatistics {
    pub fn collect(elements: &[Element], connectors: &[Connector]) -> Self {
        let mut elements_by_type = BTreeMap::new();
        for el in elements {
            *elements_by_type
                .entry(el.kind().as_str().to_string())
                .or_insert(0) += 1;
        }
        Self {
            total_elements: elements.len(),
            total_connectors: connectors.len(),
            elements_by_type,
        }
    }
}

/// The exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub version: String,
    pub schema_version: u32,
    pub timestamp: DateTime<Utc>,
    pub exported_by: String,
    pub canvas: CanvasInfo,
    pub statistics: ExportStatistics,
    pub elements: Vec<Element>,
    pub connectors: Vec<Connector>,
}

impl JsonExport {
    /// Capture the store's current document and view.
    pub fn from_store(store: &Store) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            schema_version: EXPORT_SCHEMA_VERSION,
            timestamp: Utc::now(),
            exported_by: store.current_user().to_string(),
            canvas: CanvasInfo {
                scale: store.scale(),
                offset: store.offset(),
                bounds: calculate_content_bounds(store.elements(), 0.0),
            },
            statistics: ExportStatistics::collect(store.elements(), store.connectors()),
            elements: store.elements().to_vec(),
            connectors: store.connectors().to_vec(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!(
            "Exported {} element(s) to {}",
            self.statistics.total_elements,
            path.display()
        );
        Ok(())
    }
}

/// Default file name for an export made on `date`: `whiteboard-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("whiteboard-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;

    #[test]
    fn test_bounds_empty_board() {
        let b = calculate_content_bounds(&[], DEFAULT_BOUNDS_PADDING);
        assert_eq!(b.to_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!((b.width - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_with_padding() {
        let elements = vec![
            Element::new(ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0),
            Element::new(ElementKind::Circle, 300.0, -50.0, 100.0, 100.0),
        ];
        let b = calculate_content_bounds(&elements, DEFAULT_BOUNDS_PADDING);
        assert!((b.min_x + 50.0).abs() < 1e-9);
        assert!((b.min_y + 100.0).abs() < 1e-9);
        assert!((b.max_x - 450.0).abs() < 1e-9);
        assert!((b.max_y - 150.0).abs() < 1e-9);
        assert!((b.width - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_statistics() {
        let mut store = Store::new();
        let a = Element::new(ElementKind::StickyNote, 0.0, 0.0, 200.0, 200.0);
        let b = Element::new(ElementKind::StickyNote, 300.0, 0.0, 200.0, 200.0);
        let c = Element::new(ElementKind::KycBadge, 0.0, 300.0, 150.0, 60.0);
        let (a_id, c_id) = (a.id, c.id);
        store.add_element(a);
        store.add_element(b);
        store.add_element(c);
        store.add_connector(Connector::new(a_id, c_id));

        let export = JsonExport::from_store(&store);
        assert_eq!(export.statistics.total_elements, 3);
        assert_eq!(export.statistics.total_connectors, 1);
        assert_eq!(export.statistics.elements_by_type.get("sticky-note"), Some(&2));
        assert_eq!(export.statistics.elements_by_type.get("kyc-badge"), Some(&1));
        assert_eq!(export.statistics.elements_by_type.len(), 2);
    }

    #[test]
    fn test_export_document_shape() {
        let mut store = Store::new();
        store.add_element(Element::new(ElementKind::Text, 10.0, 10.0, 150.0, 50.0));
        store.set_scale(1.5);

        let json: serde_json::Value =
            serde_json::from_str(&JsonExport::from_store(&store).to_json().unwrap()).unwrap();
        assert_eq!(json["version"], EXPORT_VERSION);
        assert_eq!(json["schemaVersion"], 1);
        assert_eq!(json["exportedBy"], "You");
        assert_eq!(json["canvas"]["scale"], 1.5);
        assert_eq!(json["canvas"]["bounds"]["minX"], 10.0);
        assert_eq!(json["elements"][0]["type"], "text");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        JsonExport::from_store(&Store::new()).write_to(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"totalElements\": 0"));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "whiteboard-2024-03-07.json");
    }
}
