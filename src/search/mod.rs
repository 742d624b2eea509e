//! Search functionality.
//!
//! Whole-buffer linear scans used by Find (highlight every match) and
//! Replace (substitute every match). Both scans run left to right and
//! resume right after each match, so results never overlap and inserted
//! replacement text is never rescanned.
//!
//! All ranges are char offsets into the scanned text.

use std::ops::Range;

/// Matching policy shared by Find and Replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Compare chars exactly instead of case-folding them.
    pub case_sensitive: bool,
}

impl SearchOptions {
    pub const fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    pub const fn case_insensitive() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

/// Result of [`replace_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// The rewritten text.
    pub text: String,
    /// How many occurrences were replaced.
    pub count: usize,
}

/// Find every non-overlapping occurrence of `needle` in `text`.
///
/// An empty needle matches nothing.
pub fn find_all(text: &str, needle: &str, options: SearchOptions) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<char> = text.chars().collect();
    let pat: Vec<char> = needle.chars().collect();
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos + pat.len() <= hay.len() {
        let window = &hay[pos..pos + pat.len()];
        if window
            .iter()
            .zip(&pat)
            .all(|(&a, &b)| chars_match(a, b, options))
        {
            matches.push(pos..pos + pat.len());
            pos += pat.len();
        } else {
            pos += 1;
        }
    }
    matches
}

/// Replace every non-overlapping occurrence of `needle` with `replacement`.
///
/// An empty needle leaves the text untouched.
pub fn replace_all(
    text: &str,
    needle: &str,
    replacement: &str,
    options: SearchOptions,
) -> Replacement {
    let ranges = find_all(text, needle, options);
    if ranges.is_empty() {
        return Replacement {
            text: text.to_string(),
            count: 0,
        };
    }

    // Byte offset of every char boundary, including the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in &ranges {
        let start = boundaries[range.start];
        let end = boundaries[range.end];
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[last..]);

    Replacement {
        text: out,
        count: ranges.len(),
    }
}

fn chars_match(a: char, b: char, options: SearchOptions) -> bool {
    a == b || (!options.case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INSENSITIVE: SearchOptions = SearchOptions::case_insensitive();
    const SENSITIVE: SearchOptions = SearchOptions::case_sensitive();

    #[test]
    fn test_find_all_every_occurrence_left_to_right() {
        let matches = find_all("The cat sat on the mat.", "at", INSENSITIVE);
        assert_eq!(matches, vec![5..7, 9..11, 20..22]);
    }

    #[test]
    fn test_find_all_ignores_case_by_default() {
        let matches = find_all("At bat, AT last", "at", SearchOptions::default());
        assert_eq!(matches, vec![0..2, 4..6, 8..10]);
    }

    #[test]
    fn test_find_all_case_sensitive_skips_other_case() {
        let matches = find_all("At bat, AT last", "at", SENSITIVE);
        assert_eq!(matches, vec![4..6]);
    }

    #[test]
    fn test_find_all_is_non_overlapping() {
        assert_eq!(find_all("aaaa", "aa", INSENSITIVE), vec![0..2, 2..4]);
        assert_eq!(find_all("aaa", "aa", INSENSITIVE), vec![0..2]);
    }

    #[test]
    fn test_find_all_empty_needle_matches_nothing() {
        assert!(find_all("abc", "", INSENSITIVE).is_empty());
    }

    #[test]
    fn test_find_all_no_match_is_empty() {
        assert!(find_all("abc", "zz", INSENSITIVE).is_empty());
        assert!(find_all("", "a", INSENSITIVE).is_empty());
    }

    #[test]
    fn test_find_all_uses_char_offsets() {
        let matches = find_all("héllo wörld", "WÖR", INSENSITIVE);
        assert_eq!(matches, vec![6..9]);
    }

    #[test]
    fn test_find_all_spans_newlines() {
        let matches = find_all("end\nstart", "d\ns", INSENSITIVE);
        assert_eq!(matches, vec![2..5]);
    }

    #[test]
    fn test_replace_does_not_rescan_inserted_text() {
        let result = replace_all("aaa", "a", "aa", SENSITIVE);
        assert_eq!(result.text, "aaaaaa");
        assert_eq!(result.count, 3);
    }

    #[test]
    fn test_replace_case_insensitive_keeps_surroundings() {
        let result = replace_all("Cat, cat, CAT!", "cat", "dog", INSENSITIVE);
        assert_eq!(result.text, "dog, dog, dog!");
        assert_eq!(result.count, 3);
    }

    #[test]
    fn test_replace_case_sensitive_only_exact() {
        let result = replace_all("Cat, cat, CAT!", "cat", "dog", SENSITIVE);
        assert_eq!(result.text, "Cat, dog, CAT!");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn test_replace_with_empty_string_deletes() {
        let result = replace_all("a-b-c", "-", "", SENSITIVE);
        assert_eq!(result.text, "abc");
    }

    #[test]
    fn test_replace_empty_needle_is_identity() {
        let result = replace_all("abc", "", "x", SENSITIVE);
        assert_eq!(result.text, "abc");
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_replace_multibyte() {
        let result = replace_all("naïve café", "É", "e", INSENSITIVE);
        assert_eq!(result.text, "naïve cafe");
    }

    proptest! {
        #[test]
        fn prop_find_matches_are_ordered_disjoint_and_equal(
            text in "[abAB \n]{0,60}",
            needle in "[abAB]{1,3}",
        ) {
            let chars: Vec<char> = text.chars().collect();
            let matches = find_all(&text, &needle, INSENSITIVE);
            let mut prev_end = 0;
            for range in &matches {
                prop_assert!(range.start >= prev_end);
                prop_assert!(range.end <= chars.len());
                let found: String = chars[range.clone()].iter().collect();
                prop_assert_eq!(found.to_lowercase(), needle.to_lowercase());
                prev_end = range.end;
            }
        }

        #[test]
        fn prop_replace_count_matches_find(
            text in "[abAB ]{0,60}",
            needle in "[abAB]{1,3}",
            replacement in "[abcC]{0,3}",
        ) {
            for options in [INSENSITIVE, SENSITIVE] {
                let found = find_all(&text, &needle, options).len();
                let result = replace_all(&text, &needle, &replacement, options);
                prop_assert_eq!(result.count, found);
            }
        }

        #[test]
        fn prop_find_replacement_counts_at_least_replaced(
            text in "[abAB ]{0,60}",
            needle in "[abAB]{1,3}",
            replacement in "[xyz]{1,3}",
        ) {
            for options in [INSENSITIVE, SENSITIVE] {
                let result = replace_all(&text, &needle, &replacement, options);
                let found = find_all(&result.text, &replacement, options).len();
                prop_assert!(found >= result.count);
            }
        }

        #[test]
        fn prop_replace_with_self_is_identity(
            text in "[abAB ]{0,60}",
            needle in "[abAB]{1,3}",
        ) {
            let result = replace_all(&text, &needle, &needle, SENSITIVE);
            prop_assert_eq!(result.text, text);
        }

        #[test]
        fn prop_replace_without_match_is_identity(
            text in "[ab ]{0,40}",
            replacement in "[xyz]{0,3}",
        ) {
            let result = replace_all(&text, "q", &replacement, INSENSITIVE);
            prop_assert_eq!(result.text, text);
            prop_assert_eq!(result.count, 0);
        }
    }
}
