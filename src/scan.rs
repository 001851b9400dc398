//! Directory listing.
//!
//! Reads one directory, non-recursively, into a [`Listing`]: the title, the
//! entries sorted by name, and the optional preview text.
//!
//! ## Ordering
//!
//! Entries are sorted by name with a plain byte-wise comparison. There is no
//! locale or case folding, so an unchanged directory always lists the same
//! way:
//!
//! ```text
//! Banana
//! apple
//! cherry.txt
//! ```
//!
//! ## Preview sidecar
//!
//! If the directory contains the preview file (`index.txt` by default), its
//! contents are attached to the listing. A missing or unreadable sidecar just
//! means no preview; it never fails the scan.
//!
//! ## What is *not* filtered here
//!
//! The indexer's own output, `index.html`, is kept in the listing. The
//! renderer drops it, so a listing always reflects what is on disk.

use crate::config::{ListingConfig, PreviewConfig};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot resolve {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One child of the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Raw file name; may not be valid UTF-8.
    pub name: OsString,
    pub modified: DateTime<Local>,
    pub size: u64,
    pub is_dir: bool,
}

impl DirectoryEntry {
    /// The name as shown on the page, with invalid UTF-8 replaced.
    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }
}

/// Everything the renderer needs for one directory.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Absolute, canonical path of the scanned directory.
    pub dir: PathBuf,
    /// Last segment of `dir`.
    pub title: String,
    /// Sorted by name, byte-wise.
    pub entries: Vec<DirectoryEntry>,
    pub preview: Option<String>,
}

/// Resolve `path` and read it into a [`Listing`].
pub fn scan(
    path: &Path,
    listing: &ListingConfig,
    preview: &PreviewConfig,
) -> Result<Listing, ScanError> {
    let dir = fs::canonicalize(path).map_err(|source| ScanError::Resolve {
        path: path.to_path_buf(),
        source,
    })?;
    let title = title_for(&dir);

    let mut entries = read_entries(&dir)?;
    if !listing.show_hidden {
        entries.retain(|e| !e.name.as_encoded_bytes().starts_with(b"."));
    }
    sort_entries(&mut entries);

    let preview = if preview.enabled {
        read_preview(&dir.join(&preview.file))
    } else {
        None
    };

    Ok(Listing {
        dir,
        title,
        entries,
        preview,
    })
}

/// Last path segment, or the whole path for a root like `/`.
pub fn title_for(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn read_entries(dir: &Path) -> Result<Vec<DirectoryEntry>, ScanError> {
    let read_dir_err = |source: std::io::Error| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        // DirEntry::metadata does not follow symlinks
        let meta = entry.metadata().map_err(read_dir_err)?;
        let modified = meta.modified().map_err(read_dir_err)?;
        entries.push(DirectoryEntry {
            name: entry.file_name(),
            modified: DateTime::<Local>::from(modified),
            size: meta.len(),
            is_dir: meta.is_dir(),
        });
    }
    Ok(entries)
}

/// Byte-wise ascending by raw name.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| a.name.as_encoded_bytes().cmp(b.name.as_encoded_bytes()));
}

/// Sidecar text, or `None` when it is missing, unreadable, or empty.
fn read_preview(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    if bytes.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
