//! Shared string escaping utilities.

/// Escape a string for use inside a double-quoted HTML attribute.
pub fn html_attr_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Percent-encode the characters that would split or re-prefix a parameter
/// value: `%`, `&`, `=`, `@` and whitespace. Everything else passes through,
/// so dates keep their slashes.
pub fn param_value_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '&' | '=' | '@') || ch.is_whitespace() {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        } else {
            out.push(ch);
        }
    }
    out
}
