//! Slug derivation for the uniqueness probe

/// Derive the slug the backend would assign to `name`.
///
/// Lowercases, keeps Unicode letters and digits (Arabic names stay Arabic),
/// collapses every other run of characters into a single `-` and trims
/// leading and trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
