//! Finboard Core Library
//!
//! Platform-agnostic data model, state store and canvas interaction engine
//! for the Finboard fintech whiteboard.

pub mod activity;
pub mod ai;
pub mod camera;
pub mod comments;
pub mod elements;
pub mod export;
pub mod history;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod storage;
pub mod store;
pub mod tools;

pub use activity::{Activity, ActivityKind, NewActivity, SnapshotScheduler, Version};
pub use ai::{AiConfig, AiConfigPatch, AiProvider, ConnectionProbe, ProbeStatus, ProbeTracker};
pub use camera::{Viewport, to_screen, to_world};
pub use comments::{Comment, CommentPatch};
pub use elements::{
    Connector, ConnectorPatch, Element, ElementData, ElementId, ElementKind, ElementPatch,
    ElementStyle,
};
pub use export::{ContentBounds, ExportError, JsonExport, calculate_content_bounds};
pub use history::BoundedDeque;
pub use input::{InputState, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use interaction::{EventHandler, InteractionConfig, InteractionMode, InteractionState};
pub use selection::ResizeHandle;
pub use storage::{PersistedRecord, STORAGE_KEY, Storage, StorageError, StorageResult};
pub use store::{PersistedState, Store, StoreEvent, SubscriptionId};
pub use tools::ToolKind;
