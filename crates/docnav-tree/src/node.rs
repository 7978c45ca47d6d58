//! Navigation node types.

/// Index of a node inside a [`NavTree`](crate::NavTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the tree's arena (creation order).
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A standalone Markdown page.
    Page,
    /// A directory, described by its index page if one exists.
    Directory,
}

/// Entry in the navigation tree.
///
/// A directory node starts out with an empty title and path and receives both
/// from its index page when that page is discovered. Directories without an
/// index page keep the empty values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Sort key among siblings; lower sorts first.
    pub weight: i64,
    /// Display title (`linkTitle` over `title`).
    pub title: String,
    /// Source file path relative to the scan base. Empty for a directory
    /// without an index page.
    pub path: String,
    /// Page or directory.
    pub kind: NodeKind,
    children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn page(title: String, weight: i64, path: String) -> Self {
        Self {
            weight,
            title,
            path,
            kind: NodeKind::Page,
            children: Vec::new(),
        }
    }

    pub(crate) fn directory() -> Self {
        Self {
            weight: 0,
            title: String::new(),
            path: String::new(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Children in discovery order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True when the node renders as a single line.
    ///
    /// A directory whose only content is its index page is a leaf too.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }
}
