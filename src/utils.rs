use std::fs;

/// Slug shared by generated filenames and renderer links.
///
/// Lower-cases, trims, then turns every space into a hyphen. Runs of spaces
/// become runs of hyphens; nothing else is rewritten.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().trim().replace(' ', "-")
}

/// Relative link to a clan's generated page
pub fn clan_href(name: &str) -> String {
    format!("clans/{}.html", slugify(name))
}

/// Escape text for HTML element content, attribute values and XML
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// First `max` characters of `s`, cutting mid-word if needed
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Create an OSC8 file:// hyperlink for terminal output
pub fn osc8_file_link(path: &str, text: &str) -> String {
    let abs_path = fs::canonicalize(path)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string());
    format!("\x1b]8;;file://{}\x1b\\{}\x1b]8;;\x1b\\", abs_path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Bhengu"), "bhengu");
        assert_eq!(slugify(" Ma Ngcobo "), "ma-ngcobo");
        assert_eq!(slugify("Van  Wyk"), "van--wyk");
    }

    #[test]
    fn clan_href_matches_generated_filename() {
        assert_eq!(clan_href("Ka Mbatha"), "clans/ka-mbatha.html");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("\u{1e45}go\u{1e45}go", 3), "\u{1e45}go");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn html_escape_covers_markup_characters() {
        assert_eq!(html_escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }
}
