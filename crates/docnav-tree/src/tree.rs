//! Navigation tree storage and the directory registry.
//!
//! Nodes live in a flat `Vec<Node>` and refer to each other by [`NodeId`].
//! The directory registry maps a cleaned directory path to the node that
//! represents it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::node::{Node, NodeId, NodeKind};
use crate::path::{clean_path, parent_dir};

/// Navigation tree produced by [`TreeBuilder`](crate::TreeBuilder).
///
/// Immutable once built.
#[derive(Debug)]
pub struct NavTree {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    directories: HashMap<PathBuf, NodeId>,
    /// Directory nodes in creation order.
    directory_order: Vec<(PathBuf, NodeId)>,
    /// Cleaned walk root.
    root: PathBuf,
}

impl NavTree {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            nodes: Vec::new(),
            parents: Vec::new(),
            directories: HashMap::new(),
            directory_order: Vec::new(),
            root,
        }
    }

    /// Node for the directory the walk started from.
    ///
    /// `None` when that directory holds no titled Markdown file.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.directories.get(&self.root).copied()
    }

    /// Cleaned path of the directory the walk started from.
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Look up the node registered for a directory.
    ///
    /// The path is cleaned lexically before the lookup, so `docs/./guide/`
    /// and `docs/guide` find the same node.
    #[must_use]
    pub fn directory(&self, path: impl AsRef<Path>) -> Option<NodeId> {
        self.directories.get(&clean_path(path.as_ref())).copied()
    }

    /// Registered directories in creation order.
    pub fn directories(&self) -> impl Iterator<Item = (&Path, NodeId)> {
        self.directory_order
            .iter()
            .map(|(path, id)| (path.as_path(), *id))
    }

    /// Directory nodes that never got linked to a parent, excluding the root.
    ///
    /// These are unreachable from [`root`](Self::root) and do not show up in
    /// rendered output.
    pub fn orphans(&self) -> impl Iterator<Item = (&Path, NodeId)> {
        self.directories()
            .filter(|(path, id)| *path != self.root.as_path() && self.parent(*id).is_none())
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Parent of a node, if it has been linked to one.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// Total number of nodes (pages and directories).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of page nodes.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Page)
            .count()
    }

    /// Return the node for `dir`, creating it on first use.
    ///
    /// A newly created directory node is appended to the children of its
    /// parent directory's node if that node already exists. No link is made
    /// otherwise; see [`link_orphans`](Self::link_orphans).
    pub(crate) fn ensure_directory(&mut self, dir: &Path) -> NodeId {
        if let Some(&id) = self.directories.get(dir) {
            return id;
        }

        let id = self.push(Node::directory());
        self.directories.insert(dir.to_path_buf(), id);
        self.directory_order.push((dir.to_path_buf(), id));

        if let Some(parent) = parent_dir(dir)
            && let Some(&parent_id) = self.directories.get(&parent)
        {
            self.attach(parent_id, id);
        }

        id
    }

    /// Append a page node to a directory node.
    pub(crate) fn add_page(&mut self, dir: NodeId, page: Node) -> NodeId {
        let id = self.push(page);
        self.attach(dir, id);
        id
    }

    /// Copy an index page's metadata onto its directory node.
    pub(crate) fn set_index(&mut self, dir: NodeId, title: String, weight: i64, path: String) {
        let node = &mut self.nodes[dir.0];
        node.title = title;
        node.weight = weight;
        node.path = path;
    }

    /// Link every unlinked directory node whose parent directory is registered.
    ///
    /// Directories are visited in creation order, so orphans land at the end
    /// of their parent's children in that order. Returns the number of links made.
    pub(crate) fn link_orphans(&mut self) -> usize {
        let pending: Vec<(NodeId, NodeId)> = self
            .orphans()
            .filter_map(|(path, id)| {
                let parent = parent_dir(path)?;
                self.directories.get(&parent).map(|&parent_id| (parent_id, id))
            })
            .collect();

        for &(parent_id, id) in &pending {
            self.attach(parent_id, id);
        }
        pending.len()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.parents.push(None);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].push_child(child);
        self.parents[child.0] = Some(parent);
    }
}
