//! Drive - owns the node tree, the current directory and path resolution.

use std::path::Path;

use tracing::{debug, info, warn};

use super::node::{is_valid_name, Node, NodeId, NodeKind, SEPARATOR};
use super::store::{DriveSnapshot, DriveStore, NullStore, SnapshotNode};
use crate::error::{DosError, DosResult};

/// A single simulated drive such as `C:`.
///
/// All nodes live in an arena owned by the drive and are addressed by
/// `NodeId`. A directory owns the ordering of its children; a child only
/// records the id of its parent.
///
/// The arena only grows. A node that is detached (`remove_child`, or never
/// attached after `create_*`) keeps its slot and its id stays valid, so it
/// can be attached again later. Slots are never reused.
pub struct Drive {
    letter: char,
    label: String,
    nodes: Vec<Node>,
    root: NodeId,
    current: NodeId,
    store: Box<dyn DriveStore>,
}

impl Drive {
    /// Create an empty drive whose `save`/`restore` do nothing.
    pub fn new(letter: char) -> DosResult<Self> {
        Self::with_store(letter, Box::new(NullStore))
    }

    /// Create an empty drive persisted through `store`.
    pub fn with_store(letter: char, store: Box<dyn DriveStore>) -> DosResult<Self> {
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return Err(DosError::InvalidDrive(letter));
        }
        let root = Node::directory(&format!("{}:", letter))?;
        Ok(Self {
            letter,
            label: String::new(),
            nodes: vec![root],
            root: NodeId(0),
            current: NodeId(0),
            store,
        })
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    /// E.g. "C:".
    pub fn drive_name(&self) -> String {
        format!("{}:", self.letter)
    }

    /// Current directory path followed by "> ".
    pub fn prompt(&self) -> String {
        format!("{}> ", self.current_path())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn root_directory(&self) -> NodeId {
        self.root
    }

    pub fn current_directory(&self) -> NodeId {
        self.current
    }

    /// Path of the current directory.
    pub fn current_path(&self) -> String {
        self.path(self.current).unwrap_or_else(|| self.drive_name())
    }

    // ---------------------------------------------------------------------
    // Node accessors
    // ---------------------------------------------------------------------

    /// Look up a node. Returns None for handles this drive never issued.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn get(&self, id: NodeId) -> DosResult<&Node> {
        self.node(id).ok_or(DosError::InvalidNode)
    }

    fn get_mut(&mut self, id: NodeId) -> DosResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DosError::InvalidNode)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    pub fn is_directory(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_directory)
    }

    pub fn size(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, Node::size)
    }

    pub fn content(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.content()
    }

    /// Number of files directly inside `id`.
    pub fn file_count(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .filter(|&&child| !self.is_directory(child))
            .count()
    }

    /// Number of directories directly inside `id`.
    pub fn dir_count(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .filter(|&&child| self.is_directory(child))
            .count()
    }

    /// Full path: the parent's path, a separator, then the name.
    /// A node without a parent is its own path.
    pub fn path(&self, id: NodeId) -> Option<String> {
        let mut names = vec![self.name(id)?];
        let mut cursor = self.parent(id);
        while let Some(ancestor) = cursor {
            names.push(self.name(ancestor)?);
            cursor = self.parent(ancestor);
        }
        names.reverse();
        Some(names.join("\\"))
    }

    // ---------------------------------------------------------------------
    // Tree mutation
    // ---------------------------------------------------------------------

    /// Create a detached, empty directory.
    pub fn create_directory(&mut self, name: &str) -> DosResult<NodeId> {
        let node = Node::directory(name)?;
        Ok(self.insert(node))
    }

    /// Create a detached file.
    pub fn create_file(&mut self, name: &str, content: &str) -> DosResult<NodeId> {
        let node = Node::file(name, content)?;
        Ok(self.insert(node))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to `parent`, detaching it from its previous parent first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> DosResult<()> {
        let parent_node = self.get(parent)?;
        if !parent_node.is_directory() {
            return Err(DosError::NotADirectory(parent_node.name().to_string()));
        }
        let old_parent = self.get(child)?.parent();
        if self.is_ancestor_or_self(child, parent) {
            return Err(DosError::CyclicMove(self.get(child)?.name().to_string()));
        }

        if let Some(old_parent) = old_parent {
            self.detach(old_parent, child);
        }
        if let Some(children) = self.get_mut(parent)?.children_mut() {
            children.push(child);
        }
        self.get_mut(child)?.set_parent(Some(parent));

        self.repair_current(old_parent.unwrap_or(self.root));
        Ok(())
    }

    /// Remove `child` from `parent`. Returns false if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.detach(parent, child) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.set_parent(None);
        }
        self.repair_current(parent);
        true
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(children) = self.nodes.get_mut(parent.0).and_then(Node::children_mut) else {
            return false;
        };
        match children.iter().position(|&id| id == child) {
            Some(pos) => {
                children.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Rename a node; the name is left unchanged if `name` is illegal.
    pub fn rename(&mut self, id: NodeId, name: &str) -> DosResult<()> {
        self.get_mut(id)?.set_name(name)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Keep the current directory reachable from the root after a mutation.
    fn repair_current(&mut self, fallback: NodeId) {
        if self.is_ancestor_or_self(self.root, self.current) {
            return;
        }
        self.current = if self.is_ancestor_or_self(self.root, fallback) && self.is_directory(fallback) {
            fallback
        } else {
            self.root
        };
        debug!(current = ?self.current_path(), "current directory detached, moved");
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Make `target` the current directory.
    ///
    /// Only succeeds if resolving `target`'s own path from the root yields
    /// `target` again, which rejects detached and foreign nodes.
    pub fn change_current_directory(&mut self, target: NodeId) -> bool {
        if !self.is_directory(target) {
            return false;
        }
        let Some(path) = self.path(target) else {
            return false;
        };
        if self.resolve(&path) == Some(target) {
            self.current = target;
            true
        } else {
            false
        }
    }

    /// Resolve a path to a node.
    ///
    /// Accepts `/` or `\` separators, drive-absolute (`C:\a\b`), root-absolute
    /// (`\a\b`) and relative (`a\b`) paths, and `.`/`..` either as the whole
    /// path or as a leading `.\`/`..\` prefix. Names match case-insensitively.
    /// `..` inside a path is not interpreted.
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        let replaced = path.replace('/', "\\");
        let mut patched = replaced.trim().to_string();
        if patched.chars().count() > 1 && patched.ends_with(SEPARATOR) {
            patched.pop();
        }

        match patched.as_str() {
            "" => return None,
            "\\" => return Some(self.root),
            ".." => return Some(self.parent(self.current).unwrap_or(self.root)),
            "." => return Some(self.current),
            _ => {}
        }

        if let Some(rest) = patched.strip_prefix(".\\") {
            patched = rest.to_string();
        }
        if let Some(rest) = patched.strip_prefix("..\\") {
            // Without a parent this falls back to the root's path
            let base = self.parent(self.current).unwrap_or(self.root);
            patched = format!("{}{}{}", self.path(base)?, SEPARATOR, rest);
        }
        if patched.is_empty() {
            return None;
        }

        if patched.starts_with(SEPARATOR) {
            patched = format!("{}:{}", self.letter, patched);
        }
        if patched.chars().nth(1) != Some(':') {
            patched = format!("{}{}{}", self.current_path(), SEPARATOR, patched);
        }

        let target = patched.to_lowercase();
        let root_path = self.path(self.root)?;
        if root_path.to_lowercase() == target {
            return Some(self.root);
        }
        let found = self.find_in(self.root, &root_path, &target);
        if found.is_none() {
            debug!(path, resolved = %patched, "path not found");
        }
        found
    }

    /// Depth-first search below `dir` for a node whose path equals `target`.
    fn find_in(&self, dir: NodeId, dir_path: &str, target: &str) -> Option<NodeId> {
        for &child in self.children(dir) {
            let child_path = format!("{}{}{}", dir_path, SEPARATOR, self.name(child)?);
            if child_path.to_lowercase() == target {
                return Some(child);
            }
            if self.is_directory(child) {
                if let Some(found) = self.find_in(child, &child_path, target) {
                    return Some(found);
                }
            }
        }
        None
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Capture the tree, label and current directory.
    pub fn snapshot(&self) -> DriveSnapshot {
        DriveSnapshot {
            label: self.label.clone(),
            current_directory: self.current_path(),
            entries: self.snapshot_children(self.root),
        }
    }

    fn snapshot_children(&self, dir: NodeId) -> Vec<SnapshotNode> {
        self.children(dir)
            .iter()
            .filter_map(|&child| {
                let node = self.node(child)?;
                Some(match node.kind() {
                    NodeKind::Directory { .. } => SnapshotNode::Directory {
                        name: node.name().to_string(),
                        children: self.snapshot_children(child),
                    },
                    NodeKind::File { content } => SnapshotNode::File {
                        name: node.name().to_string(),
                        content: content.clone(),
                    },
                })
            })
            .collect()
    }

    /// Replace the whole tree with `snapshot`.
    ///
    /// The snapshot is validated completely before anything is replaced.
    pub fn apply_snapshot(&mut self, snapshot: &DriveSnapshot) -> DosResult<()> {
        let mut fresh = Drive::new(self.letter)?;
        let fresh_root = fresh.root;
        fresh.populate(fresh_root, &snapshot.entries)?;

        self.nodes = fresh.nodes;
        self.root = fresh.root;
        self.current = self.root;
        self.label = snapshot.label.clone();
        if let Some(dir) = self
            .resolve(&snapshot.current_directory)
            .filter(|&id| self.is_directory(id))
        {
            self.current = dir;
        }
        Ok(())
    }

    fn populate(&mut self, dir: NodeId, entries: &[SnapshotNode]) -> DosResult<()> {
        for entry in entries {
            match entry {
                SnapshotNode::Directory { name, children } => {
                    let child = self.create_directory(name)?;
                    self.add_child(dir, child)?;
                    self.populate(child, children)?;
                }
                SnapshotNode::File { name, content } => {
                    let child = self.create_file(name, content)?;
                    self.add_child(dir, child)?;
                }
            }
        }
        Ok(())
    }

    /// Persist the drive through its store.
    pub fn save(&self) -> DosResult<()> {
        self.store.save(&self.snapshot())?;
        info!(drive = %self.drive_name(), "drive saved");
        Ok(())
    }

    /// Reload the drive from its store. Leaves the drive untouched if the
    /// store holds nothing.
    pub fn restore(&mut self) -> DosResult<()> {
        match self.store.load()? {
            Some(snapshot) => {
                self.apply_snapshot(&snapshot)?;
                info!(drive = %self.drive_name(), nodes = self.nodes.len(), "drive restored");
            }
            None => debug!(drive = %self.drive_name(), "nothing to restore"),
        }
        Ok(())
    }

    /// Copy a real directory tree into the current directory.
    ///
    /// File contents are read as (lossy) UTF-8 text. Entries whose names are
    /// not legal here are skipped. Returns the number of imported nodes.
    pub fn create_from_real_directory(&mut self, source: &Path) -> DosResult<usize> {
        let mut imported = 0;
        let target = self.current;
        self.import_directory(target, source, &mut imported)?;
        info!(source = %source.display(), imported, "imported real directory");
        Ok(imported)
    }

    fn import_directory(&mut self, target: NodeId, source: &Path, imported: &mut usize) -> DosResult<()> {
        let mut entries = std::fs::read_dir(source)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_valid_name(&name) {
                warn!(path = %entry.path().display(), "skipping entry with illegal name");
                continue;
            }

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                let dir = self.create_directory(&name)?;
                self.add_child(target, dir)?;
                *imported += 1;
                self.import_directory(dir, &entry.path(), imported)?;
            } else if file_type.is_file() {
                let data = std::fs::read(entry.path())?;
                let file = self.create_file(&name, &String::from_utf8_lossy(&data))?;
                self.add_child(target, file)?;
                *imported += 1;
            }
        }
        Ok(())
    }
}
