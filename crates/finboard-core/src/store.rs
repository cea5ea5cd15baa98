//! Application state store.
//!
//! The [`Store`] is the single source of truth for a whiteboard session. It is
//! owned by the application root, mutated synchronously through its methods,
//! and notifies subscribed observers after every mutation.

use std::fmt;

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::{ActivityKind, ActivityLog, NewActivity, Version, VersionLog};
use crate::ai::{AiConfig, AiConfigPatch};
use crate::camera::{Viewport, clamp_scale};
use crate::comments::{Comment, CommentId, CommentPatch};
use crate::elements::{Connector, ConnectorId, ConnectorPatch, Element, ElementId, ElementPatch};
use crate::tools::ToolKind;

/// Actor recorded on activities until a user identity is set.
pub const DEFAULT_USER: &str = "You";

/// Notification sent to observers after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    ElementsChanged,
    ConnectorsChanged,
    CommentsChanged,
    VersionsChanged,
    ActivityLogged,
    SelectionChanged,
    ViewportChanged,
    ToolChanged,
    AiConfigChanged,
    UserChanged,
    /// Persisted state was replaced wholesale (hydration).
    Hydrated,
}

impl StoreEvent {
    /// Whether the event touches the persisted subset of state.
    pub fn affects_persisted(&self) -> bool {
        !matches!(
            self,
            StoreEvent::SelectionChanged | StoreEvent::ViewportChanged | StoreEvent::ToolChanged
        )
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(StoreEvent)>;

/// The subset of state that survives restarts.
///
/// Every field defaults on its own, so a record written by an older build
/// still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    pub elements: Vec<Element>,
    pub connectors: Vec<Connector>,
    pub comments: Vec<Comment>,
    pub versions: VersionLog,
    pub activities: ActivityLog,
    pub ai_config: AiConfig,
    pub current_user: Option<String>,
}

/// Process-wide whiteboard state.
pub struct Store {
    elements: Vec<Element>,
    connectors: Vec<Connector>,
    comments: Vec<Comment>,
    versions: VersionLog,
    activities: ActivityLog,
    selected_ids: Vec<ElementId>,
    viewport: Viewport,
    tool: ToolKind,
    ai_config: AiConfig,
    current_user: String,
    /// Bumped on every change to elements or connectors.
    revision: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("elements", &self.elements.len())
            .field("connectors", &self.connectors.len())
            .field("comments", &self.comments.len())
            .field("versions", &self.versions.len())
            .field("activities", &self.activities.len())
            .field("selected_ids", &self.selected_ids)
            .field("viewport", &self.viewport)
            .field("tool", &self.tool)
            .field("current_user", &self.current_user)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            connectors: Vec::new(),
            comments: Vec::new(),
            versions: VersionLog::new(),
            activities: ActivityLog::new(),
            selected_ids: Vec::new(),
            viewport: Viewport::default(),
            tool: ToolKind::default(),
            ai_config: AiConfig::default(),
            current_user: DEFAULT_USER.to_string(),
            revision: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store from persisted state. Ephemeral state starts at defaults.
    pub fn from_persisted(state: PersistedState) -> Self {
        let mut store = Self::new();
        store.hydrate(state);
        store
    }

    // --- Observers ---

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    fn touch_document(&mut self, event: StoreEvent) {
        self.revision += 1;
        self.emit(event);
    }

    // --- Accessors ---

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments attached to one element.
    pub fn comments_for(&self, element_id: ElementId) -> impl Iterator<Item = &Comment> {
        self.comments
            .iter()
            .filter(move |c| c.element_id == element_id)
    }

    pub fn versions(&self) -> &VersionLog {
        &self.versions
    }

    pub fn activities(&self) -> &ActivityLog {
        &self.activities
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.viewport.offset
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn ai_config(&self) -> &AiConfig {
        &self.ai_config
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Document revision, bumped whenever elements or connectors change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Topmost element under a world point.
    pub fn element_at(&self, point: kurbo::Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.hit_test(point))
    }

    // --- Elements ---

    /// Append an element (on top of the z-order).
    ///
    /// An element whose id is already present is ignored.
    pub fn add_element(&mut self, element: Element) {
        if self.element(element.id).is_some() {
            log::warn!("Ignoring duplicate element id {}", element.id);
            return;
        }
        let activity = NewActivity::new(ActivityKind::Create, format!("Created {}", element.kind()))
            .for_element(element.id);
        self.elements.push(element);
        self.touch_document(StoreEvent::ElementsChanged);
        self.log_activity(activity);
    }

    /// Merge a partial update into an element. No-op if the id is unknown.
    ///
    /// `skip_log` suppresses the activity record (continuous drag/resize).
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch, skip_log: bool) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        element.apply(patch);
        let description = format!("Updated {}", element.kind());
        self.touch_document(StoreEvent::ElementsChanged);
        if !skip_log {
            self.log_activity(NewActivity::new(ActivityKind::Update, description).for_element(id));
        }
        true
    }

    /// Remove an element and every connector referencing it.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(index) = self.elements.iter().position(|e| e.id == id) else {
            return false;
        };
        let removed = self.elements.remove(index);

        let connectors_before = self.connectors.len();
        self.connectors.retain(|c| !c.references(id));
        let cascaded = connectors_before - self.connectors.len();
        if cascaded > 0 {
            log::debug!("Removed {} connector(s) attached to {}", cascaded, id);
        }

        self.touch_document(StoreEvent::ElementsChanged);
        if cascaded > 0 {
            self.emit(StoreEvent::ConnectorsChanged);
        }
        if self.selected_ids.contains(&id) {
            self.selected_ids.retain(|s| *s != id);
            self.emit(StoreEvent::SelectionChanged);
        }
        self.log_activity(
            NewActivity::new(ActivityKind::Delete, format!("Deleted {}", removed.kind()))
                .for_element(id),
        );
        true
    }

    // --- Selection ---

    /// Replace the selection with `id`, or clear it with `None`.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selected_ids = id.into_iter().collect();
        self.emit(StoreEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        self.select_element(None);
    }

    // --- Viewport / tool ---

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.emit(StoreEvent::ToolChanged);
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.viewport.offset = offset;
        self.emit(StoreEvent::ViewportChanged);
    }

    /// Set the zoom factor. Out-of-range input is clamped, never rejected.
    pub fn set_scale(&mut self, scale: f64) {
        self.viewport.scale = clamp_scale(scale);
        self.emit(StoreEvent::ViewportChanged);
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
        self.emit(StoreEvent::ViewportChanged);
    }

    /// Wheel input: zooms with the ctrl/cmd modifier, pans otherwise.
    pub fn apply_wheel(&mut self, delta: Vec2, zoom_modifier: bool, sensitivity: f64) {
        self.viewport.apply_wheel(delta, zoom_modifier, sensitivity);
        self.emit(StoreEvent::ViewportChanged);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.emit(StoreEvent::ViewportChanged);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.emit(StoreEvent::ViewportChanged);
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
        self.emit(StoreEvent::ViewportChanged);
    }

    // --- Configuration ---

    pub fn set_ai_config(&mut self, patch: AiConfigPatch) {
        self.ai_config.apply(patch);
        self.emit(StoreEvent::AiConfigChanged);
    }

    pub fn set_current_user(&mut self, user: impl Into<String>) {
        self.current_user = user.into();
        self.emit(StoreEvent::UserChanged);
    }

    // --- Connectors ---

    pub fn add_connector(&mut self, connector: Connector) {
        if connector.source_id == connector.target_id {
            log::debug!("Connector {} loops back to its source", connector.id);
        }
        let activity = NewActivity::new(ActivityKind::Create, "Added connector")
            .for_element(connector.source_id);
        self.connectors.push(connector);
        self.touch_document(StoreEvent::ConnectorsChanged);
        self.log_activity(activity);
    }

    pub fn update_connector(&mut self, id: ConnectorId, patch: ConnectorPatch) -> bool {
        let Some(connector) = self.connectors.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        connector.apply(patch);
        self.touch_document(StoreEvent::ConnectorsChanged);
        true
    }

    pub fn remove_connector(&mut self, id: ConnectorId) -> bool {
        let before = self.connectors.len();
        self.connectors.retain(|c| c.id != id);
        if self.connectors.len() == before {
            return false;
        }
        self.touch_document(StoreEvent::ConnectorsChanged);
        true
    }

    // --- Comments ---

    pub fn add_comment(&mut self, comment: Comment) {
        let activity = NewActivity::new(ActivityKind::Comment, format!("Commented: {}", comment.text))
            .for_element(comment.element_id);
        self.comments.push(comment);
        self.emit(StoreEvent::CommentsChanged);
        self.log_activity(activity);
    }

    pub fn update_comment(&mut self, id: CommentId, patch: CommentPatch) -> bool {
        let Some(comment) = self.comments.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        comment.apply(patch);
        self.emit(StoreEvent::CommentsChanged);
        true
    }

    pub fn remove_comment(&mut self, id: CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        if self.comments.len() == before {
            return false;
        }
        self.emit(StoreEvent::CommentsChanged);
        true
    }

    // --- Versions ---

    /// Deep-copy elements and connectors into the version history.
    pub fn create_snapshot(&mut self) -> Uuid {
        let version = Version::capture(&self.elements, &self.connectors);
        let id = version.id;
        if let Some(evicted) = self.versions.push(version) {
            log::debug!("Evicted version {}", evicted.id);
        }
        self.emit(StoreEvent::VersionsChanged);
        id
    }

    /// Replace elements and connectors with a snapshot. No-op if unknown.
    pub fn restore_version(&mut self, version_id: Uuid) -> bool {
        let Some(version) = self.versions.iter().find(|v| v.id == version_id).cloned() else {
            return false;
        };
        log::info!("Restoring version {} from {}", version.id, version.timestamp);
        self.elements = version.elements;
        self.connectors = version.connectors;
        self.touch_document(StoreEvent::ElementsChanged);
        self.emit(StoreEvent::ConnectorsChanged);
        self.prune_selection();
        self.log_activity(NewActivity::new(
            ActivityKind::Update,
            format!("Restored version from {}", version.timestamp.to_rfc3339()),
        ));
        true
    }

    // --- Activity ---

    /// Stamp and append an activity record.
    pub fn log_activity(&mut self, activity: NewActivity) {
        let activity = activity.stamp(&self.current_user);
        self.activities.push(activity);
        self.emit(StoreEvent::ActivityLogged);
    }

    // --- Persistence ---

    /// Snapshot the persisted subset of state.
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            elements: self.elements.clone(),
            connectors: self.connectors.clone(),
            comments: self.comments.clone(),
            versions: self.versions.clone(),
            activities: self.activities.clone(),
            ai_config: self.ai_config.clone(),
            current_user: Some(self.current_user.clone()),
        }
    }

    /// Replace the persisted subset of state. Ephemeral state is kept.
    ///
    /// Connectors whose ends are missing are dropped.
    pub fn hydrate(&mut self, state: PersistedState) {
        let PersistedState {
            elements,
            mut connectors,
            comments,
            versions,
            activities,
            ai_config,
            current_user,
        } = state;

        connectors.retain(|c| {
            let live = elements.iter().any(|e| e.id == c.source_id)
                && elements.iter().any(|e| e.id == c.target_id);
            if !live {
                log::warn!("Dropping connector {} with a dangling end", c.id);
            }
            live
        });

        self.elements = elements;
        self.connectors = connectors;
        self.comments = comments;
        self.versions = versions;
        self.activities = activities;
        self.ai_config = ai_config;
        self.current_user = current_user.unwrap_or_else(|| DEFAULT_USER.to_string());
        self.revision += 1;
        self.prune_selection();
        self.emit(StoreEvent::Hydrated);
    }

    fn prune_selection(&mut self) {
        let before = self.selected_ids.len();
        let elements = &self.elements;
        self.selected_ids
            .retain(|id| elements.iter().any(|e| e.id == *id));
        if self.selected_ids.len() != before {
            self.emit(StoreEvent::SelectionChanged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{MAX_ACTIVITIES, MAX_VERSIONS};
    use crate::elements::ElementKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(x: f64, y: f64) -> Element {
        Element::new(ElementKind::Rectangle, x, y, 100.0, 100.0)
    }

    #[test]
    fn test_add_element_logs_create() {
        let mut store = Store::new();
        let el = rect(0.0, 0.0);
        let id = el.id;
        store.add_element(el);

        assert_eq!(store.elements().len(), 1);
        let activity = store.activities().latest().unwrap();
        assert_eq!(activity.kind, ActivityKind::Create);
        assert_eq!(activity.element_id, Some(id));
        assert_eq!(activity.user, DEFAULT_USER);
    }

    #[test]
    fn test_duplicate_id_ignored() {
        let mut store = Store::new();
        let el = rect(0.0, 0.0);
        store.add_element(el.clone());
        store.add_element(el);
        assert_eq!(store.elements().len(), 1);
    }

    #[test]
    fn test_update_element_skip_log() {
        let mut store = Store::new();
        let el = rect(0.0, 0.0);
        let id = el.id;
        store.add_element(el);
        let logged = store.activities().len();

        assert!(store.update_element(id, ElementPatch::position(5.0, 6.0), true));
        assert_eq!(store.activities().len(), logged);

        assert!(store.update_element(id, ElementPatch::position(7.0, 8.0), false));
        assert_eq!(store.activities().len(), logged + 1);
        assert_eq!(store.activities().latest().unwrap().kind, ActivityKind::Update);

        let el = store.element(id).unwrap();
        assert!((el.x - 7.0).abs() < f64::EPSILON);
        assert!((el.y - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = Store::new();
        assert!(!store.update_element(Uuid::new_v4(), ElementPatch::position(1.0, 1.0), false));
        assert!(store.activities().is_empty());
    }

    #[test]
    fn test_selection_exclusive() {
        let mut store = Store::new();
        let a = rect(0.0, 0.0);
        let b = rect(200.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        store.add_element(a);
        store.add_element(b);

        store.select_element(Some(a_id));
        assert_eq!(store.selected_ids(), &[a_id]);
        store.select_element(Some(b_id));
        assert_eq!(store.selected_ids(), &[b_id]);
        store.select_element(None);
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn test_cascade_deletion() {
        let mut store = Store::new();
        let a = rect(0.0, 0.0);
        let b = rect(300.0, 0.0);
        let c = rect(600.0, 0.0);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        store.add_element(a);
        store.add_element(b);
        store.add_element(c);
        store.add_connector(Connector::new(a_id, b_id));
        store.add_connector(Connector::new(c_id, a_id));
        store.add_connector(Connector::new(b_id, c_id));
        store.select_element(Some(a_id));

        assert!(store.remove_element(a_id));

        assert!(store.element(a_id).is_none());
        assert_eq!(store.connectors().len(), 1);
        assert!(store.connectors().iter().all(|c| !c.references(a_id)));
        assert!(store.selected_ids().is_empty());
        assert_eq!(store.activities().latest().unwrap().kind, ActivityKind::Delete);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut store = Store::new();
        store.set_scale(50.0);
        assert_eq!(store.scale(), 5.0);
        store.set_scale(0.0);
        assert_eq!(store.scale(), 0.1);
    }

    #[test]
    fn test_version_ring_buffer() {
        let mut store = Store::new();
        let mut ids = Vec::new();
        for _ in 0..(MAX_VERSIONS + 7) {
            ids.push(store.create_snapshot());
        }
        assert_eq!(store.versions().len(), MAX_VERSIONS);
        let kept: Vec<Uuid> = store.versions().iter().map(|v| v.id).collect();
        assert_eq!(kept, ids[7..].to_vec());
    }

    #[test]
    fn test_activity_ring_buffer() {
        let mut store = Store::new();
        for i in 0..(MAX_ACTIVITIES + 30) {
            store.log_activity(NewActivity::new(ActivityKind::Update, format!("entry {i}")));
        }
        assert_eq!(store.activities().len(), MAX_ACTIVITIES);
        assert_eq!(store.activities().iter().next().unwrap().description, "entry 30");
        assert_eq!(
            store.activities().latest().unwrap().description,
            format!("entry {}", MAX_ACTIVITIES + 29)
        );
    }

    #[test]
    fn test_restore_version() {
        let mut store = Store::new();
        let a = rect(0.0, 0.0);
        let a_id = a.id;
        store.add_element(a);
        let version = store.create_snapshot();

        store.update_element(a_id, ElementPatch::position(400.0, 400.0), false);
        store.add_element(rect(10.0, 10.0));
        assert_eq!(store.elements().len(), 2);

        assert!(store.restore_version(version));
        assert_eq!(store.elements().len(), 1);
        assert!((store.element(a_id).unwrap().x).abs() < f64::EPSILON);
        assert!(store
            .activities()
            .latest()
            .unwrap()
            .description
            .starts_with("Restored version"));

        assert!(!store.restore_version(Uuid::new_v4()));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_edits() {
        let mut store = Store::new();
        let a = rect(0.0, 0.0);
        let a_id = a.id;
        store.add_element(a);
        store.create_snapshot();
        store.update_element(a_id, ElementPatch::position(99.0, 99.0), true);

        let snapshot = store.versions().latest().unwrap();
        assert!((snapshot.elements[0].x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_comment_logs_activity() {
        let mut store = Store::new();
        let a = rect(0.0, 0.0);
        let a_id = a.id;
        store.add_element(a);
        let comment = Comment::new(a_id, "alice", "Check the limits");
        let comment_id = comment.id;
        store.add_comment(comment);

        assert_eq!(store.activities().latest().unwrap().kind, ActivityKind::Comment);
        assert_eq!(store.comments_for(a_id).count(), 1);

        assert!(store.update_comment(
            comment_id,
            CommentPatch {
                resolved: Some(true),
                ..Default::default()
            }
        ));
        assert!(store.comments()[0].resolved);
        assert!(store.remove_comment(comment_id));
        assert!(store.comments().is_empty());
    }

    #[test]
    fn test_observers_notified() {
        let mut store = Store::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = store.subscribe(move |event| sink.borrow_mut().push(event));

        store.add_element(rect(0.0, 0.0));
        store.set_tool(ToolKind::Pan);
        assert_eq!(
            seen.borrow().as_slice(),
            &[
                StoreEvent::ElementsChanged,
                StoreEvent::ActivityLogged,
                StoreEvent::ToolChanged
            ]
        );

        assert!(store.unsubscribe(sub));
        store.set_tool(ToolKind::Select);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_persisted_subset_excludes_viewport() {
        let mut store = Store::new();
        store.add_element(rect(0.0, 0.0));
        store.set_scale(2.0);
        store.set_tool(ToolKind::Pan);

        let json = serde_json::to_value(store.to_persisted()).unwrap();
        assert!(json.get("elements").is_some());
        assert!(json.get("aiConfig").is_some());
        assert!(json.get("scale").is_none());
        assert!(json.get("tool").is_none());

        let restored = Store::from_persisted(serde_json::from_value(json).unwrap());
        assert_eq!(restored.elements().len(), 1);
        assert_eq!(restored.scale(), 1.0);
        assert_eq!(restored.tool(), ToolKind::Select);
    }

    #[test]
    fn test_hydrate_defaults_per_field() {
        let state: PersistedState =
            serde_json::from_str(r#"{ "currentUser": "carol" }"#).unwrap();
        let store = Store::from_persisted(state);
        assert_eq!(store.current_user(), "carol");
        assert!(store.elements().is_empty());
        assert_eq!(store.ai_config(), &AiConfig::default());
    }

    #[test]
    fn test_hydrate_drops_dangling_connectors() {
        let a = rect(0.0, 0.0);
        let state = PersistedState {
            connectors: vec![Connector::new(a.id, Uuid::new_v4())],
            elements: vec![a],
            ..Default::default()
        };
        let store = Store::from_persisted(state);
        assert!(store.connectors().is_empty());
    }
}
