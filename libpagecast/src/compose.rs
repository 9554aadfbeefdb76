//! Outgoing text construction

/// Build the text to publish from the source text
///
/// In copy-exact mode the source text is returned unchanged. Otherwise a
/// suffix block and a hashtag block are appended, each separated by a blank
/// line. A suffix that is empty after trimming is skipped, but a kept suffix
/// is appended as configured, untrimmed.
pub fn build_text(source_text: &str, copy_exact: bool, suffix: &str, hashtags: &[String]) -> String {
    if copy_exact {
        return source_text.to_string();
    }

    let mut text = source_text.to_string();

    if !suffix.trim().is_empty() {
        text.push_str("\n\n");
        text.push_str(suffix);
    }

    if !hashtags.is_empty() {
        text.push_str("\n\n");
        text.push_str(&hashtags.join(" "));
    }

    text
}

/// Downgrade text to printable ASCII for human-facing log lines
///
/// Consoles without Unicode fonts mangle emoji-heavy channel posts; the
/// structured log fields keep the original text, this only feeds the
/// one-line preview.
pub fn ascii_preview(text: &str, max_chars: usize) -> String {
    let mut preview: String = text
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .take(max_chars)
        .collect();
    if text.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}
