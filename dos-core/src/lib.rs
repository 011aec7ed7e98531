//! DOS Drive Simulator Core
//!
//! This crate provides an in-memory, single-drive DOS file system together
//! with a small command interpreter:
//! - `fs`: directory/file tree, path resolution and snapshot persistence
//! - `command`: the built-in commands (`dir`, `cd`, `mkdir`, `mkfile`)
//! - `invoker`: parses a command line and runs the matching command
//! - `session`: prompt loop on top of the invoker
//!
//! # Architecture
//!
//! - `Drive`: owns every node in an arena addressed by `NodeId`
//! - `Command` trait: per-command hooks driven by `RegisteredCommand`
//! - `Outputter` trait: text sink shared by commands and the terminal
//! - `configure_system`: wires drive, store and registry into a `Session`

pub mod command;
pub mod configurator;
pub mod console;
pub mod error;
pub mod fs;
pub mod invoker;
pub mod session;

#[cfg(test)]
mod testing;

pub use command::{Command, CommandRegistry, RegisteredCommand};
pub use configurator::{configure_system, SystemConfig};
pub use console::{HeadlessConsole, Outputter};
pub use error::{DosError, DosResult};
pub use fs::{Drive, DriveStore, JsonFileStore, NodeId, NullStore};
pub use invoker::{CommandInvoker, ExecuteCommand};
pub use session::Session;
