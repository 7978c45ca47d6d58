//! Outline generation: build the navigation tree and print it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_tree::{NavTree, NodeId, TreeBuilder, render};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for outline generation.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Base directory; outline paths are relative to it (overrides config, default: docs/docs).
    #[arg(long)]
    path: Option<PathBuf>,

    /// Subdirectory of --path whose tree is rendered (overrides config, default: eventing).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the outline to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also link directories whose parent directory was discovered after them.
    #[arg(long)]
    deferred_linkage: bool,
}

impl OutlineArgs {
    /// Execute outline generation.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the walk hits an I/O error,
    /// the requested directory has no node, or the outline cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            path: self.path,
            dir: self.dir,
            deferred_linkage: self.deferred_linkage.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        tracing::info!(
            base = %docs.base_dir.display(),
            dir = %docs.dir.display(),
            "Building navigation tree"
        );

        let tree = TreeBuilder::new(&docs.base_dir)
            .with_index_names(config.tree.index_names.iter().map(String::as_str))
            .with_deferred_linkage(config.tree.deferred_linkage)
            .build(&docs.dir)?;

        let scan_dir = docs.scan_dir();
        let root = tree
            .directory(&scan_dir)
            .ok_or(CliError::EmptySection(scan_dir))?;

        match self.output {
            Some(path) => {
                write_outline_file(&tree, root, &path)?;
                Output::new().success(&format!("Outline written to {}", path.display()));
            }
            None => {
                let mut out = BufWriter::new(io::stdout().lock());
                render(&tree, root, 0, &mut out)?;
                out.flush()?;
            }
        }

        Ok(())
    }
}

/// Render the outline into a file, replacing any existing content.
fn write_outline_file(tree: &NavTree, root: NodeId, path: &Path) -> Result<(), CliError> {
    let to_error = |source| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(to_error)?);
    render(tree, root, 0, &mut out).map_err(to_error)?;
    out.flush().map_err(to_error)
}
