//! Category names derived from delimited task names
//!
//! Name Format:
//! - Task names: segments joined by a separator (e.g., `build:js:min`)
//! - Category names: every proper prefix ending right before a separator
//!   (for `build:js:min` these are `build` and `build:js`)
//!
//! The separator is configurable and may be longer than one character.

/// Default separator between name segments
pub const DEFAULT_SEPARATOR: &str = ":";

/// Derives parent and ancestor categories from task names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParser {
    separator: String,
}

impl NameParser {
    /// Creates a parser for the given separator
    ///
    /// The separator must not be empty; configuration validates this before
    /// a parser is built from user input.
    pub fn new(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        debug_assert!(!separator.is_empty(), "category separator must not be empty");
        Self { separator }
    }

    /// Returns the separator this parser splits on
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the category that directly contains `name`
    ///
    /// E.g. for `a:b:c` this is `a:b`. Returns `None` for top-level names.
    pub fn parent_category<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.rfind(self.separator.as_str()).map(|idx| &name[..idx])
    }

    /// Returns every category containing `name`, outermost first
    ///
    /// E.g. for `a:b:c` this is `["a", "a:b"]`.
    pub fn ancestor_categories(&self, name: &str) -> Vec<String> {
        name.match_indices(self.separator.as_str())
            .map(|(idx, _)| name[..idx].to_string())
            .collect()
    }

    /// Returns true if `name` is nested inside at least one category
    pub fn is_nested(&self, name: &str) -> bool {
        name.contains(self.separator.as_str())
    }

    /// Returns the last segment of `name` (the part after its parent category)
    pub fn leaf<'a>(&self, name: &'a str) -> &'a str {
        match name.rfind(self.separator.as_str()) {
            Some(idx) => &name[idx + self.separator.len()..],
            None => name,
        }
    }
}

impl Default for NameParser {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parent_of_nested_name() {
        let parser = NameParser::default();
        assert_eq!(parser.parent_category("a:b:c"), Some("a:b"));
        assert_eq!(parser.parent_category("a:b"), Some("a"));
    }

    #[test]
    fn top_level_has_no_parent() {
        let parser = NameParser::default();
        assert_eq!(parser.parent_category("a"), None);
        assert_eq!(parser.parent_category(""), None);
    }

    #[test]
    fn ancestors_are_outermost_first() {
        let parser = NameParser::default();
        assert_eq!(parser.ancestor_categories("a:b:c"), vec!["a", "a:b"]);
        assert!(parser.ancestor_categories("a").is_empty());
    }

    #[test]
    fn empty_segments_are_kept() {
        let parser = NameParser::default();
        assert_eq!(parser.ancestor_categories(":a"), vec![""]);
        assert_eq!(parser.ancestor_categories("a::b"), vec!["a", "a:"]);
        assert_eq!(parser.parent_category("a:"), Some("a"));
    }

    #[test]
    fn multi_char_separator() {
        let parser = NameParser::new("::");
        assert_eq!(
            parser.ancestor_categories("core::io::read"),
            vec!["core", "core::io"]
        );
        assert_eq!(parser.parent_category("core::io::read"), Some("core::io"));
        assert_eq!(parser.leaf("core::io::read"), "read");
    }

    #[test]
    fn overlapping_separator_occurrences_advance_past_match() {
        let parser = NameParser::new("::");
        // ":::" holds a single non-overlapping "::" at index 0
        assert_eq!(parser.ancestor_categories("a:::b"), vec!["a"]);
    }

    #[test]
    fn leaf_and_nesting() {
        let parser = NameParser::default();
        assert_eq!(parser.leaf("a:b:c"), "c");
        assert_eq!(parser.leaf("a"), "a");
        assert!(parser.is_nested("a:b"));
        assert!(!parser.is_nested("a"));
    }

    proptest! {
        #[test]
        fn ancestor_chain_matches_separator_count(
            segments in prop::collection::vec("[a-z]{0,4}", 1..6)
        ) {
            let parser = NameParser::default();
            let name = segments.join(":");
            let ancestors = parser.ancestor_categories(&name);

            prop_assert_eq!(ancestors.len(), name.matches(':').count());
            for pair in ancestors.windows(2) {
                prop_assert!(pair[1].starts_with(&pair[0]));
                prop_assert!(pair[1].len() > pair[0].len());
            }
            if let Some(last) = ancestors.last() {
                prop_assert_eq!(Some(last.as_str()), parser.parent_category(&name));
            }
        }
    }
}
