//! Assembles a ready-to-run [`Session`] from a [`SystemConfig`].

use std::path::PathBuf;

use tracing::info;

use crate::command::CommandRegistry;
use crate::error::DosResult;
use crate::fs::{Drive, DriveStore, JsonFileStore, NullStore};
use crate::invoker::CommandInvoker;
use crate::session::Session;

/// Startup options for a simulated system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub drive_letter: char,
    /// Overrides whatever label was restored from the store.
    pub label: Option<String>,
    /// JSON snapshot file; `None` keeps the drive in memory only.
    pub store: Option<PathBuf>,
    /// Real directory copied into the root after restoring.
    pub import_from: Option<PathBuf>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            drive_letter: 'C',
            label: None,
            store: None,
            import_from: None,
        }
    }
}

/// Build the drive, restore it, apply label and import, and register the
/// standard commands.
pub fn configure_system(config: &SystemConfig) -> DosResult<Session> {
    let store: Box<dyn DriveStore> = match &config.store {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(NullStore),
    };

    let mut drive = Drive::with_store(config.drive_letter, store)?;
    drive.restore()?;

    if let Some(label) = &config.label {
        drive.set_label(label.as_str());
    }
    if let Some(source) = &config.import_from {
        drive.create_from_real_directory(source)?;
    }

    let commands = CommandRegistry::standard();
    info!(drive = %drive.drive_name(), commands = commands.len(), "system configured");
    Ok(Session::new(CommandInvoker::new(drive, commands)))
}
