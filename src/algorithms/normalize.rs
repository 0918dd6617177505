//! Title normalization
//!
//! Guesses and reference titles are compared after trimming surrounding
//! whitespace and lowercasing. Accents and punctuation are kept as-is.

use std::borrow::Cow;

/// Normalize a raw title or guess for comparison.
///
/// Idempotent: `normalize_title(&normalize_title(s)) == normalize_title(s)`.
#[must_use]
pub fn normalize_title(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Like [`normalize_title`], but borrows when the input is already normalized.
#[must_use]
pub fn normalize_title_cow(s: &str) -> Cow<'_, str> {
    let trimmed = s.trim();
    if trimmed.chars().any(|c| !c.to_lowercase().eq(std::iter::once(c))) {
        Cow::Owned(trimmed.to_lowercase())
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Normalize both strings
#[must_use]
pub fn normalize_pair(a: &str, b: &str) -> (String, String) {
    (normalize_title(a), normalize_title(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_lowercase() {
        assert_eq!(normalize_title("  The MATRIX \n"), "the matrix");
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("   "), "");
    }

    #[test]
    fn test_keeps_accents_and_punctuation() {
        assert_eq!(normalize_title("Amélie!"), "amélie!");
        assert_eq!(normalize_title("ÉTÉ"), "été");
    }

    #[test]
    fn test_idempotent() {
        for s in ["  Star Wars: A New Hope ", "ÀBC", "", "already lower"] {
            let once = normalize_title(s);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn test_cow_matches_owned() {
        for s in [" Pulp Fiction ", "pulp fiction", "", "ΣΊΣΥΦΟΣ"] {
            assert_eq!(normalize_title_cow(s), normalize_title(s));
        }
        assert!(matches!(normalize_title_cow(" blade runner "), Cow::Borrowed(_)));
    }

    #[test]
    fn test_normalize_pair() {
        let (a, b) = normalize_pair("Hello", " WORLD ");
        assert_eq!(a, "hello");
        assert_eq!(b, "world");
    }
}
