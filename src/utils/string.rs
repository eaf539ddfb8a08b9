//! String utilities

/// Keep at most `max_chars` characters, cutting on a char boundary
///
/// # Example
/// ```
/// use prompt_relay::utils::truncate_str;
///
/// assert_eq!(truncate_str("sk-proj-abcdef", 5), "sk-pr");
/// assert_eq!(truncate_str("héllo", 2), "hé");
/// ```
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Like [`truncate_str`], appending `suffix` only when something was cut
///
/// # Example
/// ```
/// use prompt_relay::utils::truncate_with_suffix;
///
/// assert_eq!(truncate_with_suffix("<html>Bad Gateway</html>", 6, "..."), "<html>...");
/// assert_eq!(truncate_with_suffix("short", 6, "..."), "short");
/// ```
pub fn truncate_with_suffix(s: &str, max_chars: usize, suffix: &str) -> String {
    let truncated = truncate_str(s, max_chars);
    if truncated.len() == s.len() {
        s.to_string()
    } else {
        format!("{}{}", truncated, suffix)
    }
}
