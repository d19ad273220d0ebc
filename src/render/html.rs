// src/render/html.rs
// =============================================================================
// Small HTML helpers shared by every template.
//
// Templates are written with the `maud` crate. maud escapes everything that is
// interpolated with (expr) unless it is wrapped in PreEscaped, so record text
// can never inject markup into the page.
// =============================================================================

use maud::{html, Markup};

/// Shown in place of a section whose content could not be loaded
pub fn error_message(text: &str) -> Markup {
    html! {
        p.error { (text) }
    }
}

/// Shown in place of a collection that has no records to display
pub fn empty_message(text: &str) -> Markup {
    html! {
        p.empty-state { (text) }
    }
}

// Link schemes that would run script when clicked
const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Returns `url` unless it uses a script-running scheme, in which case "#"
pub fn safe_href(url: &str) -> &str {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if UNSAFE_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme)) {
        "#"
    } else {
        url
    }
}

/// Escapes the characters that matter in text and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_escape_text() {
        assert_eq!(
            error_message("<b>oops</b>").into_string(),
            r#"<p class="error">&lt;b&gt;oops&lt;/b&gt;</p>"#
        );
        assert_eq!(
            empty_message("No datasets found.").into_string(),
            r#"<p class="empty-state">No datasets found.</p>"#
        );
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href("https://example.org/a"), "https://example.org/a");
        assert_eq!(safe_href("/research/"), "/research/");
        assert_eq!(safe_href("JavaScript:alert(1)"), "#");
        assert_eq!(safe_href(" java\tscript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html,hi"), "#");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a < b & "c" > d"#), "a &lt; b &amp; &quot;c&quot; &gt; d");
    }
}
