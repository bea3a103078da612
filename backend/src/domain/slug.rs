//! URL slug generation.
//!
//! Slugs are lowercase ASCII letters, digits and single hyphens, never at
//! the edges. Generation is total: any input, including punctuation-only
//! names, produces a valid slug.

/// Fallback slug for names that sanitize down to nothing.
const FALLBACK_SLUG: &str = "baby";

/// Derive a URL slug from a display name.
///
/// Lowercases, drops everything outside `[a-z0-9 -]`, turns whitespace runs
/// into single hyphens, collapses repeated hyphens and trims them from the
/// edges. An empty result falls back to `"baby"`. Idempotent: feeding a slug
/// back in returns it unchanged.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
        // Anything else is dropped without breaking the current word.
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_name() {
        assert_eq!(generate_slug("Maria Clara"), "maria-clara");
    }

    #[test]
    fn test_accents_and_punctuation_are_dropped() {
        assert_eq!(generate_slug("João!!"), "joo");
        assert_eq!(generate_slug("Ana-Luísa"), "ana-lusa");
    }

    #[test]
    fn test_whitespace_runs_collapse_to_one_hyphen() {
        assert_eq!(generate_slug("  maria   clara  "), "maria-clara");
    }

    #[test]
    fn test_repeated_hyphens_collapse() {
        assert_eq!(generate_slug("maria---clara"), "maria-clara");
    }

    #[test]
    fn test_edge_hyphens_are_trimmed() {
        assert_eq!(generate_slug("-maria-"), "maria");
    }

    #[test]
    fn test_punctuation_only_name_falls_back() {
        assert_eq!(generate_slug("!!!"), "baby");
        assert_eq!(generate_slug("   "), "baby");
        assert_eq!(generate_slug(""), "baby");
    }

    #[test]
    fn test_idempotent() {
        let names = ["Maria Clara", "!!!", "  A  B  ", "já-nascido", "baby-2"];
        for name in names {
            let once = generate_slug(name);
            assert_eq!(generate_slug(&once), once, "not idempotent for {:?}", name);
        }
    }

    #[test]
    fn test_digits_survive() {
        assert_eq!(generate_slug("Bebe 2025"), "bebe-2025");
    }
}
