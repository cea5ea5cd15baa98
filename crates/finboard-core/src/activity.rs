//! Audit log entries, version snapshots and the periodic snapshot scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::elements::{Connector, Element, ElementId};
use crate::history::BoundedDeque;
use crate::store::Store;

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

/// Number of version snapshots retained.
pub const MAX_VERSIONS: usize = 20;
/// Number of activity records retained.
pub const MAX_ACTIVITIES: usize = 100;
/// Default interval between automatic snapshots.
pub const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 300;

pub type VersionLog = BoundedDeque<Version, MAX_VERSIONS>;
pub type ActivityLog = BoundedDeque<Activity, MAX_ACTIVITIES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Create,
    Update,
    Delete,
    Comment,
}

/// An immutable audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

/// Activity as submitted by callers; id, timestamp and actor are stamped by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub element_id: Option<ElementId>,
    pub description: String,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            element_id: None,
            description: description.into(),
        }
    }

    pub fn for_element(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub(crate) fn stamp(self, user: &str) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            kind: self.kind,
            element_id: self.element_id,
            user: user.to_string(),
            timestamp: Utc::now(),
            description: self.description,
        }
    }
}

/// A deep copy of the document's elements and connectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub elements: Vec<Element>,
    pub connectors: Vec<Connector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Version {
    pub fn capture(elements: &[Element], connectors: &[Connector]) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            elements: elements.to_vec(),
            connectors: connectors.to_vec(),
            thumbnail: None,
        }
    }
}

/// Takes a snapshot every `interval`, but only when the document changed
/// since the previous one.
#[derive(Debug, Clone)]
pub struct SnapshotScheduler {
    interval: Duration,
    last_snapshot: Option<Instant>,
    last_revision: u64,
}

impl Default for SnapshotScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_SNAPSHOT_INTERVAL_SECS))
    }
}

impl SnapshotScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_snapshot: None,
            last_revision: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Treat `revision` as already captured, e.g. right after loading.
    pub fn baseline(&mut self, revision: u64) {
        self.last_revision = revision;
    }

    /// Whether a snapshot is due for the given document revision.
    pub fn is_due(&self, revision: u64) -> bool {
        if revision == self.last_revision {
            return false;
        }
        match self.last_snapshot {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Snapshot the store if due. Returns true if a snapshot was taken.
    pub fn tick(&mut self, store: &mut Store) -> bool {
        if !self.is_due(store.revision()) {
            return false;
        }
        store.create_snapshot();
        self.last_snapshot = Some(Instant::now());
        self.last_revision = store.revision();
        log::debug!("Periodic snapshot at revision {}", self.last_revision);
        true
    }
}
