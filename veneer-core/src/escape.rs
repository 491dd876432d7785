//! HTML escaping for displayed values.

/// Escape `& < > " '` for safe HTML embedding.
///
/// Single character pass, so each special character in the input is
/// escaped exactly once — pre-escaped text is escaped again
/// (`&amp;` becomes `&amp;amp;`).
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
