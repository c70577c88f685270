//! Name helpers used when building server records.

/// Renders a DNS name with exactly one trailing dot.
///
/// An empty name stays empty.
pub fn fully_qualified(name: &str) -> String {
    if name.is_empty() || name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Derives a hosting label from a fully-qualified canonical name.
///
/// The name is split on `.` (the trailing dot yields an empty final segment)
/// and the third segment from the end is returned, so `d1.cloudfront.net.`
/// gives `cloudfront` and `example.com.` gives `example`. This is a heuristic
/// for "who serves this name", not a classification.
///
/// # Returns
///
/// `None` when the name has fewer than three segments or the segment is empty.
pub fn server_type(canonical_name: &str) -> Option<String> {
    let segments: Vec<&str> = canonical_name.split('.').collect();
    if segments.len() < 3 {
        return None;
    }
    let label = segments[segments.len() - 3];
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}
