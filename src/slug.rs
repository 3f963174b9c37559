use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Turns a free-text name into a lowercase, accent-free, hyphenated identifier.
///
/// Used for detail-page lookup keys and for `cat-*` CSS classes; both must go
/// through this function or lookups silently miss.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.nfd().filter(|ch| !DIACRITICS.contains(ch)) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents() {
        assert_eq!(slugify("Vélo"), "velo");
        assert_eq!(slugify("Théâtre à l'école"), "theatre-a-l-ecole");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify("  Trail Running!! "), "trail-running");
        assert_eq!(slugify("--a__b--"), "a-b");
    }

    #[test]
    fn empty_when_no_alphanumerics() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify(" !? "), "");
    }

    #[test]
    fn only_diacritics_are_dropped() {
        assert_eq!(slugify("e\u{0301}te\u{0300}"), "ete");
        assert_eq!(slugify("a\u{20DD}b"), "a-b");
    }

    #[test]
    fn idempotent_and_restricted_alphabet() {
        let samples = [
            "Vélo",
            "  Trail Running!! ",
            "Ñandú 2024 / Été",
            "ÀÉÎÕÜ ß œ",
            "Scouts - Animateur",
            "日本語 text",
        ];
        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {sample:?}");
            assert!(
                once.chars()
                    .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
            );
            assert!(!once.starts_with('-') && !once.ends_with('-'));
            assert!(!once.contains("--"));
        }
    }
}
