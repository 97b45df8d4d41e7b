//! Configuration options for the cleaning pipeline.
//!
//! `Options` switches individual passes on or off and controls when the
//! HTML-only extraction path takes over. The heuristic numbers themselves live
//! in [`crate::thresholds`].

/// Configuration options for cleaning and conversion.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_mdclean::Options;
///
/// // Keep the preamble but still trim the footer
/// let options = Options {
///     strip_header: false,
///     ..Options::default()
/// };
/// assert!(options.trim_footer);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Drop header/navigation lines before the article start (Pass A).
    ///
    /// Default: `true`
    pub strip_header: bool,

    /// Remove "Contents" / "Table of contents" link blocks (Pass B).
    ///
    /// Default: `true`
    pub remove_toc: bool,

    /// Corroborate Markdown sections against the original HTML.
    ///
    /// When disabled, or when the HTML is blank, classification runs on
    /// Markdown metrics alone.
    ///
    /// Default: `true`
    pub cross_validate: bool,

    /// Classify sections and trim the trailing footer cascade and markers.
    ///
    /// Default: `true`
    pub trim_footer: bool,

    /// Crawler Markdown at or below this trimmed length is treated as
    /// unusable and the HTML-only extraction path runs instead.
    ///
    /// Default: `100`
    pub min_crawler_markdown_len: usize,

    /// Record per-section diagnostics in the returned log.
    ///
    /// Default: `true`
    pub collect_diagnostics: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strip_header: true,
            remove_toc: true,
            cross_validate: true,
            trim_footer: true,
            min_crawler_markdown_len: 100,
            collect_diagnostics: true,
        }
    }
}
