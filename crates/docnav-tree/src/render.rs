//! Indented outline rendering.
//!
//! Output format, two spaces of indentation per level:
//!
//! ```text
//! - Eventing:
//!   - Overview: eventing/README.md
//!   - Getting Started: eventing/start.md
//!   - Sources:
//!     - Overview: eventing/sources/index.md
//!     - Kafka: eventing/sources/kafka.md
//! ```
//!
//! A node without children prints as a single `- <title>: <path>` line. Any
//! other node prints a header, an `Overview` line pointing at its own path, and
//! its children sorted by weight.

use std::io::{self, Write};

use crate::node::NodeId;
use crate::tree::NavTree;

/// Indentation unit per nesting level.
const INDENT: &str = "  ";

/// Write the outline of `id` and its descendants to `out`.
///
/// `indent` is the nesting level of `id` itself.
///
/// # Errors
///
/// Returns any error produced by `out`.
pub fn render<W: Write + ?Sized>(
    tree: &NavTree,
    id: NodeId,
    indent: usize,
    out: &mut W,
) -> io::Result<()> {
    let node = tree.node(id);
    let pad = INDENT.repeat(indent);

    if node.is_leaf() {
        writeln!(out, "{pad}- {}: {}", node.title, node.path)?;
        return Ok(());
    }

    writeln!(out, "{pad}- {}:", node.title)?;
    writeln!(out, "{pad}{INDENT}- Overview: {}", node.path)?;
    for child in sorted_children(tree, id) {
        render(tree, child, indent + 1, out)?;
    }
    Ok(())
}

/// Render the outline of `id` into a string.
#[must_use]
pub fn render_to_string(tree: &NavTree, id: NodeId) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = render(tree, id, 0, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Children of `id` ordered by ascending weight.
///
/// The sort is stable, so equal weights keep discovery order. The tree itself
/// is left untouched.
#[must_use]
pub fn sorted_children(tree: &NavTree, id: NodeId) -> Vec<NodeId> {
    let mut children = tree.node(id).children().to_vec();
    children.sort_by_key(|&child| tree.node(child).weight);
    children
}
