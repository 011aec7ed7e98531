//! In-memory file system for the DOS simulator.
//!
//! This module provides:
//! - `Node`/`NodeId`: files and directories stored in a drive's arena
//! - `Drive`: owns the tree, the current directory and path resolution
//! - `DriveStore`: pluggable persistence for `Drive::save`/`Drive::restore`

mod drive;
mod node;
mod store;

pub use drive::Drive;
pub use node::{is_valid_name, Node, NodeId, NodeKind, SEPARATOR};
pub use store::{DriveSnapshot, DriveStore, JsonFileStore, NullStore, SnapshotNode};
