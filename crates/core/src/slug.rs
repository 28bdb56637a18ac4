//! URL slug derivation for catalog entities.
//!
//! Slugs are derived once at creation time and stored; uniqueness is enforced
//! by the database, with the repository layer appending `-1`, `-2`, ... on
//! collision.

/// Derive a URL slug from free text.
///
/// Lowercases, maps whitespace, hyphens and underscores to single hyphens,
/// drops every other non-alphanumeric character, and trims leading/trailing
/// hyphens. Non-ASCII alphanumerics are kept as-is (they are valid in URL
/// paths once percent-encoded).
///
/// # Example
///
/// ```rust
/// assert_eq!(orchard_core::slugify("Mechanical Keyboard (87 keys)"), "mechanical-keyboard-87-keys");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // every other character is dropped
    }

    slug
}

/// Build the `n`-th disambiguated candidate for a base slug.
///
/// `candidate(base, 0)` is the base itself; later candidates carry a numeric
/// suffix (`base-1`, `base-2`, ...).
#[must_use]
pub fn candidate(base: &str, n: u32) -> String {
    if n == 0 {
        base.to_owned()
    } else {
        format!("{base}-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Blue Running Shoes"), "blue-running-shoes");
    }

    #[test]
    fn test_slugify_punctuation_dropped() {
        assert_eq!(slugify("Kid's T-Shirt (Red)"), "kids-t-shirt-red");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  b--c__d"), "a-b-c-d");
        assert_eq!(slugify("  trimmed  "), "trimmed");
    }

    #[test]
    fn test_slugify_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_candidate_suffixes() {
        assert_eq!(candidate("shoes", 0), "shoes");
        assert_eq!(candidate("shoes", 1), "shoes-1");
        assert_eq!(candidate("shoes", 12), "shoes-12");
    }
}
