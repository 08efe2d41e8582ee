//! Sanitization for user-supplied text that ends up inside generated
//! style text. Font family names and font file URLs are the only inputs
//! injected into CSS, so they get dedicated filters; everything else is
//! HTML-escaped at render time.

/// Characters stripped from font family names before they are embedded in
/// generated style text. Covers string delimiters, escapes, and the
/// block/function characters CSS injection needs.
const FONT_FAMILY_STRIP: &[char] = &['"', '\'', '\\', '{', '}', '(', ')', ';', '<', '>'];

/// Strip style-injection characters from a font family name.
pub fn sanitize_font_family(family: &str) -> String {
    family
        .chars()
        .filter(|c| !FONT_FAMILY_STRIP.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate a font file URL for embedding in an `@font-face` rule.
///
/// Allowed: same-origin relative URLs (no scheme, not protocol-relative),
/// `data:` URLs, and `blob:` URLs. Every other scheme is rejected and the
/// URL must not be embedded at all.
pub fn sanitize_font_url(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with("//") {
        return None;
    }

    // A scheme is anything up to a ':' that appears before the first
    // path/query/fragment delimiter.
    let scheme_end = url
        .find(|c| c == ':' || c == '/' || c == '?' || c == '#')
        .filter(|&i| url.as_bytes()[i] == b':');

    match scheme_end {
        None => Some(url),
        Some(i) => {
            let scheme = url[..i].to_ascii_lowercase();
            if scheme == "data" || scheme == "blob" {
                Some(url)
            } else {
                None
            }
        }
    }
}
