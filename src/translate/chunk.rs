//! Chunking and prompt construction.

/// Split `content` into chunks of at most `chunk_size` characters.
///
/// Lines are packed greedily, each costing its length plus one for the
/// newline. A single line longer than `chunk_size` becomes its own chunk.
///
/// # Examples
///
/// ```
/// use rs_mdclean::translate::split_content;
///
/// assert_eq!(split_content("short", 3000), vec!["short"]);
/// assert_eq!(split_content("aaaa\nbbbb\ncccc", 10), vec!["aaaa\nbbbb", "cccc"]);
/// ```
#[must_use]
pub fn split_content(content: &str, chunk_size: usize) -> Vec<String> {
    if content.chars().count() <= chunk_size {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for line in content.split('\n') {
        let cost = line.chars().count() + 1;
        if current_len + cost > chunk_size && !current.is_empty() {
            chunks.push(current.join("\n"));
            current.clear();
            current_len = 0;
        }
        current.push(line);
        current_len += cost;
    }
    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }
    chunks
}

/// The instruction sent with every chunk.
#[must_use]
pub fn build_prompt(content: &str, target_language: &str) -> String {
    format!(
        "Translate this Markdown to {target_language}.\n\n\
         Rules:\n\
         1. Keep all Markdown formatting (headers, links, code blocks, lists)\n\
         2. Don't translate: code blocks, URLs, HTML tags\n\
         3. Keep original structure\n\
         4. Output only the translated Markdown\n\n\
         {content}"
    )
}
