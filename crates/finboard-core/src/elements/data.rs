//! Kind-specific element payloads.
//!
//! Every payload struct is `#[serde(default)]`, so a stored payload that is
//! missing fields is completed field by field from the kind's defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ElementKind;

/// Verification state shown by transaction nodes and KYC badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    #[default]
    Pending,
    Rejected,
}

/// Operational state of an external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Active,
    Maintenance,
    Down,
}

/// State of a wallet account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    #[default]
    Active,
    Frozen,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Virtual,
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardNetwork {
    #[default]
    Visa,
    Mastercard,
}

/// Sticky note paper color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
    Orange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Critical,
    Warning,
    Info,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialCardData {
    pub value: String,
    /// Percentage change; negative values render as a downward trend.
    pub trend: f64,
}

impl Default for FinancialCardData {
    fn default() -> Self {
        Self {
            value: "$2.4M".to_string(),
            trend: 12.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionNodeData {
    pub value: String,
    pub status: VerificationStatus,
}

impl Default for TransactionNodeData {
    fn default() -> Self {
        Self {
            value: "$1,250.00".to_string(),
            status: VerificationStatus::Verified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KycBadgeData {
    pub status: VerificationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpointData {
    pub method: HttpMethod,
    pub endpoint: String,
}

impl Default for ApiEndpointData {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: "/api/v1/resource".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentProviderData {
    pub provider: String,
    pub status: ServiceStatus,
}

impl Default for PaymentProviderData {
    fn default() -> Self {
        Self {
            provider: "Stripe".to_string(),
            status: ServiceStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardGatewayData {
    pub gateway: String,
    pub region: String,
}

impl Default for CardGatewayData {
    fn default() -> Self {
        Self {
            gateway: "Visa".to_string(),
            region: "Global".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalWalletData {
    pub balance: String,
    pub currency: String,
    pub status: WalletStatus,
}

impl Default for DigitalWalletData {
    fn default() -> Self {
        Self {
            balance: "$5,000.00".to_string(),
            currency: "USD".to_string(),
            status: WalletStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardIssuanceData {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub network: CardNetwork,
    pub bin: String,
}

impl Default for CardIssuanceData {
    fn default() -> Self {
        Self {
            card_type: CardType::Virtual,
            network: CardNetwork::Visa,
            bin: "424242".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyNoteData {
    pub color: NoteColor,
    pub text: String,
    pub votes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Default for StickyNoteData {
    fn default() -> Self {
        Self {
            color: NoteColor::Yellow,
            text: "Add your note here...".to_string(),
            votes: 0,
            priority: None,
        }
    }
}

/// A column row in a database table widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_foreign: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            is_primary: false,
            is_foreign: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseTableData {
    pub table_name: String,
    pub columns: Vec<Column>,
}

impl Default for DatabaseTableData {
    fn default() -> Self {
        Self {
            table_name: "table_name".to_string(),
            columns: vec![
                Column::new("id", "INTEGER").primary(),
                Column::new("created_at", "TIMESTAMP"),
            ],
        }
    }
}

/// A single entry on an incident timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentTimelineData {
    pub events: Vec<TimelineEvent>,
}

impl Default for IncidentTimelineData {
    fn default() -> Self {
        Self {
            events: vec![TimelineEvent {
                timestamp: Utc::now(),
                message: "Incident detected".to_string(),
                severity: Severity::Critical,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusTrackerData {
    pub service_name: String,
    pub status: ServiceStatus,
    pub uptime: String,
    pub response_time: String,
    pub error_rate: String,
}

impl Default for StatusTrackerData {
    fn default() -> Self {
        Self {
            service_name: "Payment API".to_string(),
            status: ServiceStatus::Active,
            uptime: "99.9%".to_string(),
            response_time: "45ms".to_string(),
            error_rate: "0.01%".to_string(),
        }
    }
}

/// Kind-specific payload, one variant per element kind.
///
/// The variant *is* the element's kind, so a payload can never disagree with
/// the kind it is attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementData {
    Rectangle,
    Circle,
    Text,
    FinancialCard(FinancialCardData),
    TransactionNode(TransactionNodeData),
    KycBadge(KycBadgeData),
    ApiEndpoint(ApiEndpointData),
    PaymentProvider(PaymentProviderData),
    CardGateway(CardGatewayData),
    DigitalWallet(DigitalWalletData),
    CardIssuance(CardIssuanceData),
    StickyNote(StickyNoteData),
    DatabaseTable(DatabaseTableData),
    PaymentFlow,
    IncidentTimeline(IncidentTimelineData),
    StatusTracker(StatusTrackerData),
}

impl ElementData {
    /// Default payload for a kind, applied at creation time.
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Rectangle => Self::Rectangle,
            ElementKind::Circle => Self::Circle,
            ElementKind::Text => Self::Text,
            ElementKind::FinancialCard => Self::FinancialCard(Default::default()),
            ElementKind::TransactionNode => Self::TransactionNode(Default::default()),
            ElementKind::KycBadge => Self::KycBadge(Default::default()),
            ElementKind::ApiEndpoint => Self::ApiEndpoint(Default::default()),
            ElementKind::PaymentProvider => Self::PaymentProvider(Default::default()),
            ElementKind::CardGateway => Self::CardGateway(Default::default()),
            ElementKind::DigitalWallet => Self::DigitalWallet(Default::default()),
            ElementKind::CardIssuance => Self::CardIssuance(Default::default()),
            ElementKind::StickyNote => Self::StickyNote(Default::default()),
            ElementKind::DatabaseTable => Self::DatabaseTable(Default::default()),
            ElementKind::PaymentFlow => Self::PaymentFlow,
            ElementKind::IncidentTimeline => Self::IncidentTimeline(Default::default()),
            ElementKind::StatusTracker => Self::StatusTracker(Default::default()),
        }
    }

    /// The element kind this payload belongs to.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Rectangle => ElementKind::Rectangle,
            Self::Circle => ElementKind::Circle,
            Self::Text => ElementKind::Text,
            Self::FinancialCard(_) => ElementKind::FinancialCard,
            Self::TransactionNode(_) => ElementKind::TransactionNode,
            Self::KycBadge(_) => ElementKind::KycBadge,
            Self::ApiEndpoint(_) => ElementKind::ApiEndpoint,
            Self::PaymentProvider(_) => ElementKind::PaymentProvider,
            Self::CardGateway(_) => ElementKind::CardGateway,
            Self::DigitalWallet(_) => ElementKind::DigitalWallet,
            Self::CardIssuance(_) => ElementKind::CardIssuance,
            Self::StickyNote(_) => ElementKind::StickyNote,
            Self::DatabaseTable(_) => ElementKind::DatabaseTable,
            Self::PaymentFlow => ElementKind::PaymentFlow,
            Self::IncidentTimeline(_) => ElementKind::IncidentTimeline,
            Self::StatusTracker(_) => ElementKind::StatusTracker,
        }
    }

    /// Decode a stored payload for `kind`.
    ///
    /// `None` (no payload stored) yields the kind's defaults.
    pub fn from_value(
        kind: ElementKind,
        value: Option<serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        fn decode<T: serde::de::DeserializeOwned + Default>(
            value: Option<serde_json::Value>,
        ) -> Result<T, serde_json::Error> {
            match value {
                Some(serde_json::Value::Null) | None => Ok(T::default()),
                Some(v) => serde_json::from_value(v),
            }
        }

        Ok(match kind {
            ElementKind::Rectangle => Self::Rectangle,
            ElementKind::Circle => Self::Circle,
            ElementKind::Text => Self::Text,
            ElementKind::PaymentFlow => Self::PaymentFlow,
            ElementKind::FinancialCard => Self::FinancialCard(decode(value)?),
            ElementKind::TransactionNode => Self::TransactionNode(decode(value)?),
            ElementKind::KycBadge => Self::KycBadge(decode(value)?),
            ElementKind::ApiEndpoint => Self::ApiEndpoint(decode(value)?),
            ElementKind::PaymentProvider => Self::PaymentProvider(decode(value)?),
            ElementKind::CardGateway => Self::CardGateway(decode(value)?),
            ElementKind::DigitalWallet => Self::DigitalWallet(decode(value)?),
            ElementKind::CardIssuance => Self::CardIssuance(decode(value)?),
            ElementKind::StickyNote => Self::StickyNote(decode(value)?),
            ElementKind::DatabaseTable => Self::DatabaseTable(decode(value)?),
            ElementKind::IncidentTimeline => Self::IncidentTimeline(decode(value)?),
            ElementKind::StatusTracker => Self::StatusTracker(decode(value)?),
        })
    }

    /// Encode the payload for storage. Kinds without payload encode as `{}`.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Rectangle | Self::Circle | Self::Text | Self::PaymentFlow => {
                Ok(serde_json::Value::Object(serde_json::Map::new()))
            }
            Self::FinancialCard(d) => serde_json::to_value(d),
            Self::TransactionNode(d) => serde_json::to_value(d),
            Self::KycBadge(d) => serde_json::to_value(d),
            Self::ApiEndpoint(d) => serde_json::to_value(d),
            Self::PaymentProvider(d) => serde_json::to_value(d),
            Self::CardGateway(d) => serde_json::to_value(d),
            Self::DigitalWallet(d) => serde_json::to_value(d),
            Self::CardIssuance(d) => serde_json::to_value(d),
            Self::StickyNote(d) => serde_json::to_value(d),
            Self::DatabaseTable(d) => serde_json::to_value(d),
            Self::IncidentTimeline(d) => serde_json::to_value(d),
            Self::StatusTracker(d) => serde_json::to_value(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_payload_matches_kind() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementData::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_missing_payload_uses_defaults() {
        let data = ElementData::from_value(ElementKind::KycBadge, None).unwrap();
        assert_eq!(
            data,
            ElementData::KycBadge(KycBadgeData {
                status: VerificationStatus::Pending
            })
        );
    }

    #[test]
    fn test_partial_payload_defaults_per_field() {
        let data = ElementData::from_value(
            ElementKind::DigitalWallet,
            Some(json!({ "status": "frozen" })),
        )
        .unwrap();
        let ElementData::DigitalWallet(wallet) = data else {
            panic!("expected wallet payload");
        };
        assert_eq!(wallet.status, WalletStatus::Frozen);
        assert_eq!(wallet.currency, "USD");
        assert_eq!(wallet.balance, "$5,000.00");
    }

    #[test]
    fn test_card_issuance_field_names() {
        let value = ElementData::default_for(ElementKind::CardIssuance)
            .to_value()
            .unwrap();
        assert_eq!(value["type"], "virtual");
        assert_eq!(value["network"], "Visa");
        assert_eq!(value["bin"], "424242");
    }

    #[test]
    fn test_database_table_camel_case() {
        let value = ElementData::default_for(ElementKind::DatabaseTable)
            .to_value()
            .unwrap();
        assert_eq!(value["tableName"], "table_name");
        assert_eq!(value["columns"][0]["isPrimary"], true);
        assert_eq!(value["columns"][1]["type"], "TIMESTAMP");
    }

    #[test]
    fn test_payloadless_kinds_encode_empty_object() {
        let value = ElementData::Rectangle.to_value().unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_invalid_enum_value_is_an_error() {
        let result = ElementData::from_value(
            ElementKind::ApiEndpoint,
            Some(json!({ "method": "PATCH" })),
        );
        assert!(result.is_err());
    }
}
