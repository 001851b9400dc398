//! # dirhtml
//!
//! Writes a static `index.html` into a directory, listing its entries with
//! their modification time and size, a link to the parent directory, and an
//! optional text preview taken from `index.txt`.
//!
//! # Pipeline
//!
//! Each directory named on the command line goes through the same steps, one
//! directory at a time:
//!
//! ```text
//! 1. Scan     dir/      →  Listing       (canonical path, sorted entries, preview)
//! 2. Render   Listing   →  Markup        (pure, deterministic)
//! 3. Write    Markup    →  dir/index.html
//! ```
//!
//! Rendering is a pure function of the listing, so an unchanged directory
//! produces a byte-identical page on every run. The page's own `index.html`
//! entry is dropped at render time, which keeps reruns stable.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Resolves the directory, lists and sorts entries, reads the preview sidecar |
//! | [`render`] | [`render::Renderer`]: validated, immutable HTML renderer built on Maud |
//! | [`index`] | [`index::Indexer`]: one directory, or a batch under a [`index::FailurePolicy`] |
//! | [`size`] | [`size::ByteSize`] human-readable sizes |
//! | [`config`] | Optional TOML config: stock defaults, merging, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, and all interpolation is
//! auto-escaped, which matters here because file names are untrusted input: a
//! file called `<script>…` must show up as text, not run.
//!
//! ## Fail Fast by Default
//!
//! A batch stops at the first directory that cannot be indexed. Pages already
//! written are left in place and nothing is rolled back. `--keep-going` turns
//! this into "index everything, then report every failure"; either way the
//! exit status is non-zero if anything failed.
//!
//! ## The Preview Is Optional
//!
//! A missing or unreadable `index.txt` is the one error that is tolerated: the
//! page is written without a preview. Every other I/O failure is reported.

pub mod config;
pub mod index;
pub mod output;
pub mod render;
pub mod scan;
pub mod size;

#[cfg(test)]
pub(crate) mod test_helpers;
