use regex::Regex;
use std::sync::LazyLock;

static INVALID_PATH_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.{3}|[*|\\/:"<>?]|[\x00-\x1f]|\.+$"#).expect("invalid path character pattern")
});

/// Replaces characters that are invalid in file or folder names with
/// lookalike Unicode characters, so titles such as `Fate/Zero` stay readable
/// (`Fate⁄Zero`) without ever introducing a path separator.
pub fn replace_invalid_path_characters(name: &str) -> String {
    INVALID_PATH_CHARS
        .replace_all(name, |caps: &regex::Captures| {
            let matched = &caps[0];
            match matched {
                "..." => "\u{2026}".to_string(),
                "*" => "\u{2605}".to_string(),
                "|" => "\u{00a6}".to_string(),
                "\\" => "\u{29f9}".to_string(),
                "/" => "\u{2044}".to_string(),
                ":" => "\u{0589}".to_string(),
                "\"" => "\u{2033}".to_string(),
                ">" => "\u{203a}".to_string(),
                "<" => "\u{2039}".to_string(),
                "?" => "\u{ff1f}".to_string(),
                // trailing dots are dropped by Windows, keep them visible
                dots if dots.starts_with('.') => "\u{2024}".repeat(dots.len()),
                _ => String::new(),
            }
        })
        .into_owned()
}

/// True when the name can be used verbatim as a single path segment.
pub fn is_safe_segment(name: &str) -> bool {
    !INVALID_PATH_CHARS.is_match(name)
}
