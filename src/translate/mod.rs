//! Markdown translation through an LLM API.
//!
//! Enabled by the `translate` feature. Content is split into line-aligned
//! chunks, each chunk is sent with a fixed prompt and the translations are
//! joined with a blank line.

mod chunk;
mod client;
mod config;

use std::path::{Path, PathBuf};

pub use chunk::{build_prompt, split_content};
pub use client::{
    parse_chat_response, parse_gemini_response, Translator, MAX_ATTEMPTS, RETRY_BASE_DELAY,
};
pub use config::{Provider, TranslationConfig};

/// Short code for a target language name, used in output file names.
///
/// Unknown languages map to `"translated"`.
#[must_use]
pub fn language_code(language: &str) -> &'static str {
    match language.trim().to_lowercase().as_str() {
        "chinese" | "简体中文" | "中文" => "zh",
        "english" => "en",
        "japanese" | "日语" => "ja",
        "korean" | "韩语" => "ko",
        "french" => "fr",
        "german" => "de",
        "spanish" => "es",
        _ => "translated",
    }
}

/// `<stem>_<code><ext>` next to `input`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rs_mdclean::translate::translated_path;
///
/// let out = translated_path(Path::new("outputs/post.md"), "Japanese");
/// assert_eq!(out, Path::new("outputs/post_ja.md"));
/// ```
#[must_use]
pub fn translated_path(input: &Path, language: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let name = format!("{stem}_{}{ext}", language_code(language));
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(language_code("Chinese"), "zh");
        assert_eq!(language_code("中文"), "zh");
        assert_eq!(language_code("GERMAN"), "de");
        assert_eq!(language_code("Klingon"), "translated");
    }

    #[test]
    fn test_translated_path_without_extension() {
        assert_eq!(translated_path(Path::new("notes"), "French"), Path::new("notes_fr"));
    }
}
