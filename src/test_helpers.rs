//! Shared test utilities for the dirhtml test suite.
//!
//! Fixture directories are built in temp dirs so every test gets an isolated
//! copy it can mutate. Lookups panic with the available names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = dir_with_files(&["b.txt", "a.txt"]);
//! let listing = scan_default(tmp.path());
//! assert_eq!(entry_names(&listing), vec!["a.txt", "b.txt"]);
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;

use crate::config::{IndexConfig, ListingConfig, PreviewConfig};
use crate::render::Renderer;
use crate::scan::{DirectoryEntry, Listing, scan};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding one small file per name.
pub fn dir_with_files(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        std::fs::write(tmp.path().join(name), format!("contents of {name}")).unwrap();
    }
    tmp
}

/// Scan with the stock listing and preview settings.
pub fn scan_default(path: &Path) -> Listing {
    scan(path, &ListingConfig::default(), &PreviewConfig::default()).unwrap()
}

/// A renderer printing UTC timestamps, so output does not depend on the host zone.
pub fn utc_renderer() -> Renderer {
    let mut config = IndexConfig::default();
    config.time.utc = true;
    Renderer::new(&config).unwrap()
}

/// 2024-03-01 12:30:00 UTC.
pub fn fixed_time() -> DateTime<Local> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
        .unwrap()
        .with_timezone(&Local)
}

/// A regular-file entry with a fixed timestamp.
pub fn entry(name: &str, size: u64) -> DirectoryEntry {
    DirectoryEntry {
        name: name.into(),
        modified: fixed_time(),
        size,
        is_dir: false,
    }
}

/// A listing built in memory, no filesystem involved.
pub fn listing(title: &str, entries: Vec<DirectoryEntry>, preview: Option<&str>) -> Listing {
    Listing {
        dir: Path::new("/srv/files").join(title),
        title: title.to_string(),
        entries,
        preview: preview.map(str::to_string),
    }
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Entry display names in listing order.
pub fn entry_names(listing: &Listing) -> Vec<String> {
    listing
        .entries
        .iter()
        .map(|e| e.display_name().into_owned())
        .collect()
}

/// Find an entry by name. Panics if not found.
pub fn find_entry<'a>(listing: &'a Listing, name: &str) -> &'a DirectoryEntry {
    listing
        .entries
        .iter()
        .find(|e| e.name.as_os_str() == name)
        .unwrap_or_else(|| {
            let names = entry_names(listing);
            panic!("entry '{name}' not found. Available: {names:?}")
        })
}

/// Link targets of every table row, in document order.
///
/// The parent row (`..`) comes first when present.
pub fn row_links(html: &str) -> Vec<String> {
    html.split("<a href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}
