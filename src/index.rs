//! Directory indexing: scan, render, write `index.html`.
//!
//! [`Indexer`] owns everything that stays fixed for a run (the renderer and
//! the listing/preview settings), so each directory is a plain
//! [`Indexer::index_directory`] call:
//!
//! ```text
//! path → canonicalize → read_dir + sort → index.txt? → render → <dir>/index.html
//! ```
//!
//! ## Batches and failure policy
//!
//! [`Indexer::index_all`] walks the command-line directories strictly in
//! order. What happens on a failure is an explicit [`FailurePolicy`]:
//!
//! - [`FailurePolicy::FailFast`] stops at the first failing directory. Pages
//!   already written stay on disk; later directories are not touched.
//! - [`FailurePolicy::KeepGoing`] indexes every directory and reports all
//!   failures together at the end.
//!
//! Either way a failed batch is a [`BatchError`], and the caller decides how
//! to report it.
//!
//! ## Writing
//!
//! The page is rendered to memory first, then written through a buffered
//! writer that is flushed explicitly before the file is closed. The output
//! replaces any existing `index.html` in place; there is no temp-file rename.

use crate::config::{IndexConfig, ListingConfig, PreviewConfig};
use crate::render::{RenderError, Renderer, visible_entries};
use crate::scan::{ScanError, scan};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the page written into every indexed directory.
pub const OUTPUT_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to do when one directory of a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    FailFast,
    /// Index every directory, then report all failures.
    KeepGoing,
}

/// One directory that could not be indexed.
#[derive(Debug)]
pub struct Failure {
    /// The path as given on the command line.
    pub path: PathBuf,
    pub error: IndexError,
}

/// A batch with at least one failed directory.
#[derive(Error, Debug)]
#[error("{}", self.summary())]
pub struct BatchError {
    pub failures: Vec<Failure>,
    /// Directories processed before the batch ended, failures included.
    pub attempted: usize,
    pub succeeded: usize,
}

impl BatchError {
    /// A lone failure reads as its own error; several are listed one per line.
    fn summary(&self) -> String {
        if let [only] = self.failures.as_slice() {
            return only.error.to_string();
        }
        let mut msg = format!(
            "{} of {} directories failed:",
            self.failures.len(),
            self.attempted
        );
        for failure in &self.failures {
            let _ = write!(msg, "\n  {}", failure.error);
        }
        msg
    }
}

/// Outcome of indexing one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Canonical path of the indexed directory.
    pub dir: PathBuf,
    /// The written page.
    pub output: PathBuf,
    /// Table rows rendered, not counting the parent row.
    pub rows: usize,
    pub has_preview: bool,
}

/// Indexes directories with one fixed renderer and listing setup.
#[derive(Debug, Clone)]
pub struct Indexer {
    renderer: Renderer,
    listing: ListingConfig,
    preview: PreviewConfig,
}

impl Indexer {
    /// Build the indexer, validating the render settings up front.
    pub fn new(config: &IndexConfig) -> Result<Self, RenderError> {
        Ok(Self {
            renderer: Renderer::new(config)?,
            listing: config.listing.clone(),
            preview: config.preview.clone(),
        })
    }

    /// Index a single directory, replacing its `index.html`.
    pub fn index_directory(&self, path: &Path) -> Result<IndexReport, IndexError> {
        let listing = scan(path, &self.listing, &self.preview)?;
        let page = self.renderer.render(&listing).into_string();

        let output = listing.dir.join(OUTPUT_FILE);
        write_output(&output, &page)?;

        Ok(IndexReport {
            rows: visible_entries(&listing).count(),
            has_preview: listing.preview.is_some(),
            dir: listing.dir,
            output,
        })
    }

    /// Index every path in order, calling `on_indexed` after each success.
    pub fn index_all<P: AsRef<Path>>(
        &self,
        paths: &[P],
        policy: FailurePolicy,
        mut on_indexed: impl FnMut(&IndexReport),
    ) -> Result<Vec<IndexReport>, BatchError> {
        let mut reports = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();
        let mut attempted = 0;

        for path in paths {
            let path = path.as_ref();
            attempted += 1;
            match self.index_directory(path) {
                Ok(report) => {
                    on_indexed(&report);
                    reports.push(report);
                }
                Err(error) => {
                    failures.push(Failure {
                        path: path.to_path_buf(),
                        error,
                    });
                    if policy == FailurePolicy::FailFast {
                        break;
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(reports)
        } else {
            Err(BatchError {
                failures,
                attempted,
                succeeded: reports.len(),
            })
        }
    }
}

fn write_output(path: &Path, page: &str) -> Result<(), IndexError> {
    let file = File::create(path).map_err(|source| IndexError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(page.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        })
}
