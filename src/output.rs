//! Output naming and writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use url::Url;

use crate::error::{Error, Result};
use crate::patterns::{INVALID_FILENAME_CHARS, UNDERSCORE_RUN, WHITESPACE_RUN};

/// Default maximum length of a sanitized file name.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 100;

/// Maximum length of the title part of an output file name.
pub const TITLE_MAX_LEN: usize = 50;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Make `name` safe to use as a file name.
///
/// Invalid characters and whitespace runs become `_`, underscore runs
/// collapse, and the result is cut to `max_len` characters and trimmed.
///
/// # Examples
///
/// ```
/// use rs_mdclean::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("What is Rust?  A guide", 100), "What_is_Rust_A_guide");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str, max_len: usize) -> String {
    let replaced = INVALID_FILENAME_CHARS.replace_all(name, "_");
    let replaced = WHITESPACE_RUN.replace_all(&replaced, "_");
    let replaced = UNDERSCORE_RUN.replace_all(&replaced, "_");
    let cut: String = replaced.chars().take(max_len).collect();
    cut.trim().to_string()
}

/// `YYYYMMDD_HHMMSS` for `now`.
#[must_use]
pub fn timestamp(now: &DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// `<timestamp>_<sanitized title>.md`.
#[must_use]
pub fn output_file_name(title: &str, now: &DateTime<Local>) -> String {
    format!("{}_{}.md", timestamp(now), sanitize_filename(title, TITLE_MAX_LEN))
}

/// `<prefix>_<timestamp>.log`, e.g. `clean_20250101_120000.log`.
#[must_use]
pub fn log_file_name(prefix: &str, now: &DateTime<Local>) -> String {
    format!("{prefix}_{}.log", timestamp(now))
}

/// Parse `raw` as an absolute `http`/`https` URL.
pub fn validate_source_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl(format!(
            "{trimmed}: unsupported scheme '{other}', expected http or https"
        ))),
    }
}

/// Write `content` to `dir/<output_file_name>`, creating `dir`.
///
/// Returns the path written.
pub fn write_document(dir: &Path, title: &str, content: &str, now: &DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(output_file_name(title, now));
    fs::write(&path, content)?;
    Ok(path)
}
