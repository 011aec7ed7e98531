//! File system nodes - files and directories stored in a drive's arena.

use crate::error::{DosError, DosResult};

/// Internal path separator.
pub const SEPARATOR: char = '\\';

/// Characters a file or directory name may not contain.
const ILLEGAL_NAME_CHARS: [char; 4] = ['\\', '/', ',', ' '];

/// Handle to a node owned by a `Drive`.
///
/// Handles are only meaningful for the drive that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Variant-specific payload of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Children in insertion order.
    Directory { children: Vec<NodeId> },
    File { content: String },
}

/// A file or directory.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn directory(name: &str) -> DosResult<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            parent: None,
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        })
    }

    pub(crate) fn file(name: &str, content: &str) -> DosResult<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            parent: None,
            kind: NodeKind::File {
                content: content.to_string(),
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent directory, `None` for the root and for detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// File text, `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Length of the file content; always 0 for directories.
    pub fn size(&self) -> usize {
        self.content().map_or(0, str::len)
    }

    /// Rename, leaving the old name untouched if `name` is illegal.
    pub(crate) fn set_name(&mut self, name: &str) -> DosResult<()> {
        check_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }
}

/// Whether `name` is usable as a file or directory name.
pub fn is_valid_name(name: &str) -> bool {
    !name.contains(ILLEGAL_NAME_CHARS)
}

pub(crate) fn check_name(name: &str) -> DosResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(DosError::InvalidName(name.to_string()))
    }
}
