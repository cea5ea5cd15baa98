//! Finboard Application
//!
//! Command-line shell over a saved whiteboard: inspection, export and
//! version maintenance.

mod app;
mod shortcuts;

pub use app::{App, AppConfig, AppError, Command, parse_kind};
pub use shortcuts::{Shortcut, ShortcutRegistry};
