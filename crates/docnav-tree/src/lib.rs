//! Navigation tree building and rendering for docnav.
//!
//! This crate provides:
//! - [`TreeBuilder`]: walks a directory of Markdown files and assembles a
//!   [`NavTree`] from their front matter
//! - [`render`]: prints a subtree as an indented outline, siblings ordered by
//!   weight
//!
//! # Architecture
//!
//! Nodes are stored in a flat arena and addressed by [`NodeId`]. Each
//! directory holding at least one titled page gets a directory node, kept in a
//! registry keyed by its cleaned path. A directory's `index.md` or `README.md`
//! supplies the directory node's own title, weight and path instead of
//! becoming a child.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_tree::{TreeBuilder, render};
//!
//! let tree = TreeBuilder::new("docs/docs").build("eventing")?;
//! if let Some(root) = tree.root() {
//!     render(&tree, root, 0, &mut std::io::stdout().lock())?;
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod node;
mod path;
mod render;
mod tree;

pub use builder::{BuildError, DEFAULT_INDEX_NAMES, TreeBuilder};
pub use node::{Node, NodeId, NodeKind};
pub use path::clean_path;
pub use render::{render, render_to_string, sorted_children};
pub use tree::NavTree;
