//! Navigation tree construction by filesystem walking.
//!
//! The walk visits entries in file-name order, depth first, so a directory is
//! always entered before its contents but its index page is not guaranteed to
//! come before its other pages or subdirectories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docnav_meta::{FrontMatter, NavFields};
use walkdir::WalkDir;

use crate::node::Node;
use crate::path::{clean_path, relative_path};
use crate::tree::NavTree;

/// File names treated as a directory's own page.
pub const DEFAULT_INDEX_NAMES: [&str; 2] = ["index.md", "README.md"];

/// Suffix of files considered for navigation.
const MARKDOWN_SUFFIX: &str = ".md";

/// Error that aborts a tree build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Walk root cannot be accessed.
    #[error("Scan directory not found: {}", .path.display())]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Walk root exists but is a file.
    #[error("Scan path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Directory traversal failed.
    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
    /// A Markdown file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A file path cannot be expressed relative to the base directory.
    #[error("Cannot make {} relative to {}", .path.display(), .base.display())]
    RelativePath { path: PathBuf, base: PathBuf },
}

/// Counters reported once a build finishes.
#[derive(Debug, Default)]
struct ScanStats {
    files: usize,
    pages: usize,
    indexes: usize,
    dropped: usize,
}

/// Builds a [`NavTree`] from the Markdown files under a directory.
///
/// # Example
///
/// ```no_run
/// use docnav_tree::{TreeBuilder, render_to_string};
///
/// let tree = TreeBuilder::new("docs/docs").build("eventing")?;
/// if let Some(root) = tree.root() {
///     print!("{}", render_to_string(&tree, root));
/// }
/// # Ok::<(), docnav_tree::BuildError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    /// Directory that page paths are made relative to.
    base: PathBuf,
    /// Exact file names that describe their directory.
    index_names: Vec<String>,
    /// Link directories whose parent was registered after them.
    deferred_linkage: bool,
}

impl TreeBuilder {
    /// Create a builder with the default index names and eager linkage.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            index_names: DEFAULT_INDEX_NAMES.iter().map(|&n| n.to_owned()).collect(),
            deferred_linkage: false,
        }
    }

    /// Replace the index file names (matched exactly, case-sensitive).
    #[must_use]
    pub fn with_index_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the post-walk pass that links late-parented directories.
    ///
    /// Without it a directory is linked to its parent only when the parent
    /// directory already had a titled page at the time the child was first seen.
    #[must_use]
    pub fn with_deferred_linkage(mut self, enabled: bool) -> Self {
        self.deferred_linkage = enabled;
        self
    }

    /// Base directory for relative page paths.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Walk `base/dir` and build the navigation tree.
    ///
    /// Front matter problems and missing titles are logged and skipped; I/O
    /// failures abort the build.
    pub fn build(&self, dir: impl AsRef<Path>) -> Result<NavTree, BuildError> {
        let root = self.base.join(dir.as_ref());
        let metadata = fs::metadata(&root).map_err(|source| BuildError::RootNotFound {
            path: root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(BuildError::NotADirectory(root));
        }

        let mut tree = NavTree::new(clean_path(&root));
        let mut stats = ScanStats::default();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !name.ends_with(MARKDOWN_SUFFIX) {
                continue;
            }

            stats.files += 1;
            self.add_file(&mut tree, entry.path(), &name, &mut stats)?;
        }

        if self.deferred_linkage {
            let linked = tree.link_orphans();
            tracing::debug!(linked, "Linked directories after walk");
        }
        for (path, _) in tree.orphans() {
            tracing::info!(
                dir = %path.display(),
                "Directory has no linked parent, it will not appear in the outline"
            );
        }

        tracing::debug!(
            root = %tree.root_path().display(),
            files = stats.files,
            pages = stats.pages,
            indexes = stats.indexes,
            dropped = stats.dropped,
            directories = tree.directories().count(),
            "Navigation tree built"
        );

        Ok(tree)
    }

    /// Process one Markdown file.
    fn add_file(
        &self,
        tree: &mut NavTree,
        path: &Path,
        name: &str,
        stats: &mut ScanStats,
    ) -> Result<(), BuildError> {
        let content = fs::read(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let front = FrontMatter::parse(&String::from_utf8_lossy(&content)).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse front matter");
            FrontMatter::default()
        });

        let rel = relative_path(path, &self.base).ok_or_else(|| BuildError::RelativePath {
            path: path.to_path_buf(),
            base: self.base.clone(),
        })?;

        let fields = NavFields::decode(&front);
        for error in &fields.errors {
            tracing::warn!(path = %path.display(), error = %error, "Ignoring front matter field");
        }

        let Some(title) = fields.display_title() else {
            tracing::warn!(path = %path.display(), "No title for page, skipping");
            stats.dropped += 1;
            return Ok(());
        };
        let title = title.to_owned();
        let weight = fields.weight.unwrap_or(0);
        let rel = rel.to_string_lossy().into_owned();

        let dir_path = clean_path(path.parent().unwrap_or(Path::new(".")));
        let dir = tree.ensure_directory(&dir_path);

        if self.index_names.iter().any(|n| n == name) {
            tree.set_index(dir, title, weight, rel);
            stats.indexes += 1;
        } else {
            tree.add_page(dir, Node::page(title, weight, rel));
            stats.pages += 1;
        }

        Ok(())
    }
}
