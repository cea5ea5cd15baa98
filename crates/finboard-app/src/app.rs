//! Application shell: owns the store, its persistence and the command surface.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use finboard_core::activity::DEFAULT_SNAPSHOT_INTERVAL_SECS;
use finboard_core::export::{DEFAULT_BOUNDS_PADDING, ExportStatistics, export_file_name};
use finboard_core::storage::{AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS, FileStorage};
use finboard_core::{
    Connector, Element, ElementKind, ExportError, JsonExport, SnapshotScheduler, STORAGE_KEY,
    StorageError, Store, calculate_content_bounds,
};
use kurbo::Point;
use thiserror::Error;
use uuid::Uuid;

use crate::shortcuts::ShortcutRegistry;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding saved boards; the platform data dir when unset.
    pub storage_dir: Option<PathBuf>,
    pub storage_key: String,
    pub autosave_interval: Duration,
    pub snapshot_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: STORAGE_KEY.to_string(),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            snapshot_interval: Duration::from_secs(DEFAULT_SNAPSHOT_INTERVAL_SECS),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("no version with id {0}")]
    UnknownVersion(Uuid),
    #[error("no element with id {0}")]
    UnknownElement(Uuid),
}

/// Parse an element kind by its wire name (`sticky-note`, `kyc-badge`...).
pub fn parse_kind(name: &str) -> Result<ElementKind, String> {
    ElementKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == name)
        .ok_or_else(|| {
            let known: Vec<&str> = ElementKind::ALL.iter().map(|k| k.as_str()).collect();
            format!("unknown element kind '{}' (expected one of: {})", name, known.join(", "))
        })
}

/// Commands the shell understands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Export the board as JSON (defaults to whiteboard-YYYY-MM-DD.json).
    Export { path: Option<PathBuf> },
    /// Element and connector counts.
    Stats,
    /// List elements.
    List,
    /// Place a default-size element centred on a world point.
    Add {
        #[arg(value_parser = parse_kind)]
        kind: ElementKind,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Connect two elements.
    Connect { source: Uuid, target: Uuid },
    /// Delete an element and its connectors.
    Remove { id: Uuid },
    /// Saved versions, oldest first.
    History,
    /// Recent activity, newest first.
    Activity {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Save a version of the current board.
    Snapshot,
    /// Replace the board with a saved version.
    Restore { id: Uuid },
    /// Print the keyboard shortcuts of the canvas.
    Shortcuts,
}

/// A loaded board plus its persistence.
pub struct App {
    store: Store,
    autosave: AutoSaveManager<FileStorage>,
    snapshots: SnapshotScheduler,
}

impl App {
    /// Open the board stored under `config`.
    ///
    /// A corrupt record is logged and replaced by an empty board.
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        let storage = match &config.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::debug!("Using storage at {}", storage.base_path().display());

        let mut store = Store::new();
        let mut autosave = AutoSaveManager::new(Arc::new(storage)).with_key(&config.storage_key);
        autosave.set_interval(config.autosave_interval);
        autosave.attach(&mut store);

        match autosave.load_into(&mut store) {
            Ok(true) => {}
            Ok(false) => log::info!("No saved board yet; starting empty"),
            Err(StorageError::Serialization(e)) => {
                log::warn!("Saved board is unreadable, starting empty: {}", e);
            }
            Err(e) => return Err(e.into()),
        }

        let mut snapshots = SnapshotScheduler::new(config.snapshot_interval);
        snapshots.baseline(store.revision());

        Ok(Self {
            store,
            autosave,
            snapshots,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run one command and return its printable output.
    pub fn run(&mut self, command: Command) -> Result<String, AppError> {
        let output = match command {
            Command::Export { path } => {
                let path =
                    path.unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now().date_naive())));
                JsonExport::from_store(&self.store).write_to(&path)?;
                format!("Exported to {}", path.display())
            }
            Command::Stats => self.stats(),
            Command::List => self.list(),
            Command::Add { kind, x, y } => {
                let element = Element::centered_at(kind, Point::new(x, y));
                let id = element.id;
                self.store.add_element(element);
                id.to_string()
            }
            Command::Connect { source, target } => {
                for id in [source, target] {
                    if self.store.element(id).is_none() {
                        return Err(AppError::UnknownElement(id));
                    }
                }
                let connector = Connector::new(source, target);
                let id = connector.id;
                self.store.add_connector(connector);
                id.to_string()
            }
            Command::Remove { id } => {
                if !self.store.remove_element(id) {
                    return Err(AppError::UnknownElement(id));
                }
                format!("Removed {}", id)
            }
            Command::History => self.history(),
            Command::Activity { limit } => self.activity(limit),
            Command::Snapshot => {
                let id = self.store.create_snapshot();
                self.snapshots.baseline(self.store.revision());
                format!("Saved version {}", id)
            }
            Command::Restore { id } => {
                if !self.store.restore_version(id) {
                    return Err(AppError::UnknownVersion(id));
                }
                format!("Restored version {}", id)
            }
            Command::Shortcuts => ShortcutRegistry::format_all(),
        };
        self.snapshots.tick(&mut self.store);
        self.autosave.maybe_save(&self.store)?;
        Ok(output)
    }

    /// Flush unsaved changes.
    pub fn close(mut self) -> Result<(), AppError> {
        if self.autosave.is_dirty() {
            self.autosave.save(&self.store)?;
        }
        self.autosave.detach(&mut self.store);
        Ok(())
    }

    fn stats(&self) -> String {
        let stats = ExportStatistics::collect(self.store.elements(), self.store.connectors());
        let bounds = calculate_content_bounds(self.store.elements(), DEFAULT_BOUNDS_PADDING);
        let mut out = String::new();
        let _ = writeln!(out, "Elements:   {}", stats.total_elements);
        let _ = writeln!(out, "Connectors: {}", stats.total_connectors);
        let _ = writeln!(out, "Comments:   {}", self.store.comments().len());
        let _ = writeln!(out, "Versions:   {}", self.store.versions().len());
        let _ = writeln!(
            out,
            "Bounds:     {:.0},{:.0} {:.0}x{:.0}",
            bounds.min_x, bounds.min_y, bounds.width, bounds.height
        );
        for (kind, count) in &stats.elements_by_type {
            let _ = writeln!(out, "  {:20} {}", kind, count);
        }
        out
    }

    fn list(&self) -> String {
        let mut out = String::new();
        for el in self.store.elements() {
            let _ = writeln!(
                out,
                "{}  {:18} {:>8.1} {:>8.1} {:>6.1}x{:<6.1}",
                el.id,
                el.kind().as_str(),
                el.x,
                el.y,
                el.width,
                el.height
            );
        }
        out
    }

    fn history(&self) -> String {
        let mut out = String::new();
        for version in self.store.versions() {
            let _ = writeln!(
                out,
                "{}  {}  {} element(s), {} connector(s)",
                version.id,
                version.timestamp.format("%Y-%m-%d %H:%M:%S"),
                version.elements.len(),
                version.connectors.len()
            );
        }
        out
    }

    fn activity(&self, limit: usize) -> String {
        let mut out = String::new();
        for activity in self.store.activities().iter().rev().take(limit) {
            let _ = writeln!(
                out,
                "{}  {:8} {:10} {}",
                activity.timestamp.format("%Y-%m-%d %H:%M:%S"),
                format!("{:?}", activity.kind).to_lowercase(),
                activity.user,
                activity.description
            );
        }
        out
    }
}
