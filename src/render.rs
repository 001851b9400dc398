//! HTML rendering.
//!
//! Turns a [`Listing`] into a single self-contained HTML page:
//!
//! ```text
//! <!DOCTYPE html>
//! <html>
//!   <head> title, color-scheme hint </head>
//!   <body>
//!     <table>  Name | Last Modified | Size
//!              Parent Directory (..) |  | -
//!              one row per entry, index.html excluded
//!     </table>
//!     <pre> preview text </pre>        (only when a preview exists)
//!   </body>
//! </html>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/), so the markup is checked at compile
//! time and every interpolated value is HTML-escaped. The only runtime input
//! that can be malformed is the timestamp pattern; [`Renderer::new`] checks it
//! once, before any directory is read.

use crate::config::{IndexConfig, is_valid_time_format};
use crate::index::OUTPUT_FILE;
use crate::scan::{DirectoryEntry, Listing};
use crate::size::ByteSize;
use chrono::{DateTime, Local, Utc};
use maud::{DOCTYPE, Markup, html};
use percent_encoding::{AsciiSet, CONTROLS, percent_encode};
use std::borrow::Cow;
use std::ffi::OsStr;
use thiserror::Error;

/// Bytes escaped in a single path segment. Non-ASCII bytes are always escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid time format {0:?}")]
    TimeFormat(String),
}

/// Immutable page renderer, built once per run and shared by every directory.
#[derive(Debug, Clone)]
pub struct Renderer {
    time_format: String,
    utc: bool,
}

impl Renderer {
    pub fn new(config: &IndexConfig) -> Result<Self, RenderError> {
        if !is_valid_time_format(&config.time.format) {
            return Err(RenderError::TimeFormat(config.time.format.clone()));
        }
        Ok(Self {
            time_format: config.time.format.clone(),
            utc: config.time.utc,
        })
    }

    /// Render the full document.
    pub fn render(&self, listing: &Listing) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (listing.title) }
                    meta name="color-scheme" content="light dark";
                }
                body {
                    table border="1" cellpadding="5" {
                        tr {
                            th { "Name" }
                            th { "Last Modified" }
                            th { "Size" }
                        }
                        tr {
                            td { a href=".." { "Parent Directory" } }
                            td {}
                            td { "-" }
                        }
                        @for entry in visible_entries(listing) {
                            (self.entry_row(entry))
                        }
                    }
                    @if let Some(text) = &listing.preview {
                        // a newline right after <pre> is dropped by parsers
                        pre { "\n" (text) }
                    }
                }
            }
        }
    }

    fn entry_row(&self, entry: &DirectoryEntry) -> Markup {
        html! {
            tr {
                td { a href=(link_target(&entry.name)) { (entry.display_name()) } }
                td { (self.format_time(&entry.modified)) }
                td { (ByteSize::from(entry.size).to_string()) }
            }
        }
    }

    /// Format a timestamp with the configured pattern.
    pub fn format_time(&self, time: &DateTime<Local>) -> String {
        if self.utc {
            time.with_timezone(&Utc).format(&self.time_format).to_string()
        } else {
            time.format(&self.time_format).to_string()
        }
    }
}

/// Entries that get a table row: everything except the indexer's own output.
pub fn visible_entries(listing: &Listing) -> impl Iterator<Item = &DirectoryEntry> {
    listing.entries.iter().filter(|e| e.name.as_os_str() != OUTPUT_FILE)
}

/// Relative URL for an entry name.
///
/// The raw name bytes are percent-encoded as one path segment, so names that
/// are not valid UTF-8 still link to the right file. A name that would parse
/// as a URL scheme (`javascript:x`) gets a `./` prefix. HTML escaping happens
/// afterwards, in maud.
pub fn link_target(name: &OsStr) -> Cow<'_, str> {
    let bytes = name.as_encoded_bytes();
    let encoded: Cow<'_, str> = percent_encode(bytes, PATH_SEGMENT).into();
    if bytes.contains(&b':') {
        Cow::Owned(format!("./{encoded}"))
    } else {
        encoded
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn render(listing: &Listing) -> String {
        utc_renderer().render(listing).into_string()
    }

    #[test]
    fn document_has_doctype_title_and_color_scheme() {
        let html = render(&listing("pub", vec![], None));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>pub</title>"));
        assert!(html.contains(r#"<meta name="color-scheme" content="light dark">"#));
    }

    #[test]
    fn header_row_present() {
        let html = render(&listing("pub", vec![], None));
        assert!(html.contains("<th>Name</th><th>Last Modified</th><th>Size</th>"));
    }

    #[test]
    fn parent_row_first_and_unique() {
        let html = render(&listing(
            "pub",
            vec![entry("a.txt", 1), entry("b.txt", 2)],
            None,
        ));
        assert!(html.contains(
            r#"<tr><td><a href="..">Parent Directory</a></td><td></td><td>-</td></tr>"#
        ));
        assert_eq!(html.matches(r#"href="..""#).count(), 1);
        assert_eq!(row_links(&html), vec!["..", "a.txt", "b.txt"]);
    }

    #[test]
    fn parent_row_present_for_empty_listing() {
        let html = render(&listing("empty", vec![], None));
        assert_eq!(row_links(&html), vec![".."]);
    }

    #[test]
    fn rows_follow_listing_order() {
        let html = render(&listing(
            "pub",
            vec![entry("Zeta", 1), entry("alpha", 1), entry("beta", 1)],
            None,
        ));
        assert_eq!(row_links(&html), vec!["..", "Zeta", "alpha", "beta"]);
    }

    #[test]
    fn own_output_never_rendered() {
        let html = render(&listing(
            "pub",
            vec![entry("a.txt", 1), entry("index.html", 900), entry("z.txt", 1)],
            None,
        ));
        assert_eq!(row_links(&html), vec!["..", "a.txt", "z.txt"]);
        assert!(!html.contains("index.html"));
    }

    #[test]
    fn entry_row_has_time_and_size() {
        let html = render(&listing("pub", vec![entry("data.bin", 1536)], None));
        assert!(html.contains(
            r#"<tr><td><a href="data.bin">data.bin</a></td><td>2024-03-01 12:30:00 +0000</td><td>1.50KB</td></tr>"#
        ));
    }

    #[test]
    fn custom_time_format() {
        let mut config = IndexConfig::default();
        config.time.utc = true;
        config.time.format = "%d %b %Y".to_string();
        let renderer = Renderer::new(&config).unwrap();

        assert_eq!(renderer.format_time(&fixed_time()), "01 Mar 2024");
    }

    #[test]
    fn invalid_time_format_fails_construction() {
        let mut config = IndexConfig::default();
        config.time.format = "%Y %Q".to_string();
        let result = Renderer::new(&config);
        assert!(matches!(result, Err(RenderError::TimeFormat(f)) if f == "%Y %Q"));
    }

    #[test]
    fn names_escaped_in_link_and_text() {
        let html = render(&listing("pub", vec![entry(r#"<b>&"x</b>"#, 1)], None));
        assert!(html.contains(
            r#"<a href="%3Cb%3E&amp;%22x%3C%2Fb%3E">&lt;b&gt;&amp;&quot;x&lt;/b&gt;</a>"#
        ));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("</b>"));
    }

    #[test]
    fn title_escaped() {
        let html = render(&listing("<script>", vec![], None));
        assert!(html.contains("<title>&lt;script&gt;</title>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn preview_rendered_verbatim_in_pre() {
        let html = render(&listing("pub", vec![], Some("hello\nworld")));
        assert!(html.contains("<pre>\nhello\nworld</pre>"));
    }

    #[test]
    fn preview_leading_newline_survives_parsing() {
        let html = render(&listing("pub", vec![], Some("\nfirst")));
        assert!(html.contains("<pre>\n\nfirst</pre>"));
    }

    #[test]
    fn preview_escaped_not_interpreted() {
        let html = render(&listing("pub", vec![], Some("<i>x</i> & y")));
        assert!(html.contains("<pre>\n&lt;i&gt;x&lt;/i&gt; &amp; y</pre>"));
    }

    #[test]
    fn no_pre_without_preview() {
        let html = render(&listing("pub", vec![entry("a", 1)], None));
        assert!(!html.contains("<pre>"));
    }

    #[test]
    fn render_is_deterministic() {
        let l = listing("pub", vec![entry("a", 1), entry("b", 2048)], Some("note"));
        assert_eq!(render(&l), render(&l));
    }

    #[test]
    fn visible_entries_skips_only_output_file() {
        let l = listing(
            "pub",
            vec![entry("index.htm", 1), entry("index.html", 1), entry("index.txt", 1)],
            None,
        );
        let names: Vec<_> = visible_entries(&l).map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["index.htm", "index.txt"]);
    }

    // =========================================================================
    // link_target tests
    // =========================================================================

    fn target(name: &str) -> String {
        link_target(OsStr::new(name)).into_owned()
    }

    #[test]
    fn plain_names_link_unchanged() {
        assert!(matches!(
            link_target(OsStr::new("report.pdf")),
            Cow::Borrowed("report.pdf")
        ));
        assert_eq!(target("v1.2-final_(copy).tar.gz"), "v1.2-final_(copy).tar.gz");
    }

    #[test]
    fn url_delimiters_percent_encoded() {
        assert_eq!(target("a#1.txt"), "a%231.txt");
        assert_eq!(target("what?.txt"), "what%3F.txt");
        assert_eq!(target("100%.txt"), "100%25.txt");
    }

    #[test]
    fn whitespace_and_backslash_percent_encoded() {
        assert_eq!(target("a b.txt"), "a%20b.txt");
        assert_eq!(target(" lead"), "%20lead");
        assert_eq!(target("tab\there"), "tab%09here");
        assert_eq!(target("a\\b.txt"), "a%5Cb.txt");
    }

    #[test]
    fn utf8_names_encoded_as_bytes() {
        assert_eq!(target("café"), "caf%C3%A9");
    }

    #[test]
    fn scheme_like_names_made_relative() {
        assert_eq!(target("javascript:alert(1)"), "./javascript:alert(1)");
        assert_eq!(target("C:notes"), "./C:notes");
        assert_eq!(target("a b:c"), "./a%20b:c");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_get_distinct_links() {
        use std::os::unix::ffi::OsStrExt;

        let raw_entry = |raw: &[u8]| DirectoryEntry {
            name: OsStr::from_bytes(raw).to_os_string(),
            ..entry("placeholder", 1)
        };
        let html = render(&listing(
            "pub",
            vec![
                raw_entry("a\u{fffe}".as_bytes()),
                raw_entry(b"a\xfe"),
                raw_entry(b"a\xff"),
            ],
            None,
        ));
        assert_eq!(row_links(&html), vec!["..", "a%EF%BF%BE", "a%FE", "a%FF"]);
        assert_eq!(html.matches("a\u{fffd}</a>").count(), 2);
    }
}
