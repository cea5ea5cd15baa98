//! Element and connector definitions for the whiteboard.

mod connector;
mod data;

pub use connector::{Connector, ConnectorId, ConnectorPatch, ConnectorStyle, LineStyle};
pub use data::{
    ApiEndpointData, CardGatewayData, CardIssuanceData, CardNetwork, CardType, Column,
    DatabaseTableData, DigitalWalletData, ElementData, FinancialCardData, HttpMethod,
    IncidentTimelineData, KycBadgeData, NoteColor, PaymentProviderData, Priority, ServiceStatus,
    Severity, StatusTrackerData, StickyNoteData, TimelineEvent, TransactionNodeData,
    VerificationStatus, WalletStatus,
};

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Minimum width/height of an element, enforced when resizing.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// The closed set of placeable element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Text,
    FinancialCard,
    TransactionNode,
    KycBadge,
    ApiEndpoint,
    PaymentProvider,
    CardGateway,
    DigitalWallet,
    CardIssuance,
    StickyNote,
    DatabaseTable,
    PaymentFlow,
    IncidentTimeline,
    StatusTracker,
}

impl ElementKind {
    pub const ALL: [ElementKind; 16] = [
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Text,
        ElementKind::FinancialCard,
        ElementKind::TransactionNode,
        ElementKind::KycBadge,
        ElementKind::ApiEndpoint,
        ElementKind::PaymentProvider,
        ElementKind::CardGateway,
        ElementKind::DigitalWallet,
        ElementKind::CardIssuance,
        ElementKind::StickyNote,
        ElementKind::DatabaseTable,
        ElementKind::PaymentFlow,
        ElementKind::IncidentTimeline,
        ElementKind::StatusTracker,
    ];

    /// Stable name used in storage and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Text => "text",
            ElementKind::FinancialCard => "financial-card",
            ElementKind::TransactionNode => "transaction-node",
            ElementKind::KycBadge => "kyc-badge",
            ElementKind::ApiEndpoint => "api-endpoint",
            ElementKind::PaymentProvider => "payment-provider",
            ElementKind::CardGateway => "card-gateway",
            ElementKind::DigitalWallet => "digital-wallet",
            ElementKind::CardIssuance => "card-issuance",
            ElementKind::StickyNote => "sticky-note",
            ElementKind::DatabaseTable => "database-table",
            ElementKind::PaymentFlow => "payment-flow",
            ElementKind::IncidentTimeline => "incident-timeline",
            ElementKind::StatusTracker => "status-tracker",
        }
    }

    /// Size of a freshly placed element (also the ghost preview size).
    pub fn default_size(&self) -> Size {
        let (w, h) = match self {
            ElementKind::FinancialCard => (240.0, 160.0),
            ElementKind::TransactionNode => (200.0, 80.0),
            ElementKind::KycBadge => (140.0, 32.0),
            ElementKind::ApiEndpoint => (220.0, 40.0),
            ElementKind::PaymentProvider => (200.0, 120.0),
            ElementKind::CardGateway => (240.0, 140.0),
            ElementKind::DigitalWallet => (220.0, 140.0),
            ElementKind::CardIssuance => (240.0, 150.0),
            ElementKind::StickyNote => (180.0, 180.0),
            ElementKind::DatabaseTable => (200.0, 250.0),
            ElementKind::IncidentTimeline => (300.0, 300.0),
            ElementKind::StatusTracker => (250.0, 180.0),
            ElementKind::PaymentFlow => (400.0, 120.0),
            ElementKind::Rectangle | ElementKind::Circle | ElementKind::Text => (100.0, 100.0),
        };
        Size::new(w, h)
    }

    /// Style applied at placement time.
    pub fn default_style(&self) -> Option<ElementStyle> {
        match self {
            ElementKind::Rectangle | ElementKind::Circle => Some(ElementStyle {
                background_color: Some("#1e293b".to_string()),
                border_color: Some("#64ffda".to_string()),
                border_width: Some(2.0),
                ..Default::default()
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation override for generic shapes and text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// A placed diagram node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawElement", into = "RawElement")]
pub struct Element {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub content: Option<String>,
    pub label: Option<String>,
    pub style: Option<ElementStyle>,
    /// Kind-specific payload; also determines the element's kind.
    pub data: ElementData,
}

impl Element {
    /// Create an element of `kind` with default payload and style.
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            content: None,
            label: None,
            style: kind.default_style(),
            data: ElementData::default_for(kind),
        }
    }

    /// Create a default-size element of `kind` centred on a world point.
    pub fn centered_at(kind: ElementKind, center: Point) -> Self {
        let size = kind.default_size();
        Self::new(
            kind,
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a world point lies on this element.
    ///
    /// Circles use their inscribed ellipse; every other kind its box.
    pub fn hit_test(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        match self.kind() {
            ElementKind::Circle => {
                let rx = self.width / 2.0;
                let ry = self.height / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let c = self.center();
                let nx = (point.x - c.x) / rx;
                let ny = (point.y - c.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            _ => true,
        }
    }

    /// Merge a partial update into this element.
    pub fn apply(&mut self, patch: ElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
        if let Some(data) = patch.data {
            if data.kind() == self.kind() {
                self.data = data;
            } else {
                log::warn!(
                    "Ignoring {} payload for {} element {}",
                    data.kind(),
                    self.kind(),
                    self.id
                );
            }
        }
    }
}

/// Partial update for an element. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<Option<String>>,
    pub label: Option<Option<String>>,
    pub style: Option<Option<ElementStyle>>,
    /// Replacement payload; must be of the element's own kind.
    pub data: Option<ElementData>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Default::default()
        }
    }

    pub fn data(data: ElementData) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }
}

/// Storage shape of an element: `type` plus a loosely-typed `data` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<ElementStyle>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        let data = ElementData::from_value(raw.kind, raw.data).unwrap_or_else(|e| {
            log::warn!(
                "Malformed {} payload on element {}, using defaults: {}",
                raw.kind,
                raw.id,
                e
            );
            ElementData::default_for(raw.kind)
        });
        Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            content: raw.content,
            label: raw.label,
            style: raw.style,
            data,
        }
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let kind = element.kind();
        let data = element.data.to_value().ok();
        Self {
            id: element.id,
            kind,
            x: element.x,
            y: element.y,
            width: element.width,
            height: element.height,
            content: element.content,
            label: element.label,
            style: element.style,
            data,
        }
    }
}
