//! URL normalization.

/// Strips the scheme and `www.` prefix from a raw URL, leaving the hostname.
///
/// Exactly one `http://` or `https://` prefix is removed, then exactly one
/// `www.` prefix. Nothing else is validated: an empty or malformed result is
/// returned as-is and fails later, in DNS or WHOIS.
///
/// # Examples
///
/// ```
/// use url_whois::normalize;
///
/// assert_eq!(normalize("http://www.example.com"), "example.com");
/// assert_eq!(normalize("https://example.com"), "example.com");
/// assert_eq!(normalize("example.com"), "example.com");
/// ```
pub fn normalize(raw: &str) -> String {
    let without_scheme = raw
        .strip_prefix("http://")
        .or_else(|| raw.strip_prefix("https://"))
        .unwrap_or(raw);

    without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme)
        .to_string()
}
