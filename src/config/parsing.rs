/// What: Strip trailing inline comments from a configuration value.
///
/// Inputs:
/// - `s`: Raw value text following the `=`.
///
/// Output:
/// - Value without `// ...` or `# ...` suffixes, trimmed.
///
/// Details:
/// - A leading `#` is preserved so values that start with one survive.
pub(crate) fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i_rel) = if let Some(stripped) = s.strip_prefix('#') {
        stripped.find('#').map(|j| j + 1)
    } else {
        s.find('#')
    } {
        s = &s[..i_rel];
    }
    s.trim()
}

/// What: Normalize a configuration key for matching.
///
/// Details:
/// - Lowercases and maps `.`, `-` and spaces to `_`, so `Light-Theme Path`
///   matches `light_theme_path`.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

/// What: Interpret a boolean configuration value.
///
/// Output:
/// - `Some(true)` for `true/1/yes/on`, `Some(false)` for `false/0/no/off`,
///   `None` for anything else.
pub(crate) fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Clean a file path value.
///
/// Inputs:
/// - `s`: Raw value text following the `=`.
///
/// Output:
/// - The text inside double quotes when the value is quoted.
/// - Otherwise the value up to the first `#` or `//` preceded by whitespace, trimmed.
///
/// Details:
/// - `#` and `//` are legal inside paths (`C#Night.theme`, `//server/share`), so
///   only a comment marker after whitespace starts a comment. Quote paths that
///   contain ` #`.
/// - A value starting with `#` is a comment; one starting with `//` is a share path.
pub(crate) fn path_value(s: &str) -> &str {
    let s = s.trim();
    if s.starts_with('#') {
        return "";
    }
    if let Some(rest) = s.strip_prefix('"')
        && let Some(end) = rest.find('"')
    {
        return rest[..end].trim();
    }
    let cut = s
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .find(|&i| {
            let after = s[i..].trim_start();
            after.starts_with('#') || after.starts_with("//")
        });
    cut.map_or(s, |i| &s[..i]).trim()
}

/// What: Split a configuration line into normalized key and raw value.
///
/// Output:
/// - `None` for blank lines, comments, and lines without `=`.
///
/// Details:
/// - Inline comments are left in the value; callers strip them with
///   [`strip_inline_comment`] or [`path_value`] depending on the key.
pub(crate) fn split_entry(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return None;
    }
    let (raw_key, raw_val) = trimmed.split_once('=')?;
    Some((normalize_key(raw_key), raw_val.trim()))
}
