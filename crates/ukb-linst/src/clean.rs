//! Title normalization shared by field and instrument rendering.

/// Replace every non-word character (anything outside alphanumerics and
/// `_`) with a space, then trim. Applied everywhere a source title is
/// surfaced in LINST output. Idempotent.
pub fn clean_string(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.trim().to_string()
}
