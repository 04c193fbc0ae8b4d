use std::fmt;

use crate::analyzer::{TextAnalyzer, trim_form_input};
use crate::error::{KeywordError, Result};

/// Ordered keywords with no repeats, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Rendered as shown in the keyword box: `"best, seo, tips"`.
impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Turns the title and description of the keyword form into a [`KeywordSet`].
pub struct KeywordExtractor {
    analyzer: TextAnalyzer,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(TextAnalyzer::form_keywords())
    }
}

impl KeywordExtractor {
    pub fn new(analyzer: TextAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Both inputs are trimmed. An empty title is rejected; an empty description
    /// adds nothing.
    pub fn extract(&self, title: &str, description: &str) -> Result<KeywordSet> {
        let title = trim_form_input(title);
        if title.is_empty() {
            return Err(KeywordError::MissingTitle);
        }

        let tokens = self.analyzer.analyze_fields([title, trim_form_input(description)]);
        Ok(KeywordSet(tokens.into_iter().map(|t| t.term).collect()))
    }
}

/// Shorthand for [`KeywordExtractor::extract`] with the default pipeline.
pub fn extract_keywords(title: &str, description: &str) -> Result<KeywordSet> {
    KeywordExtractor::default().extract(title, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_with_comma_space() {
        let set = KeywordSet(vec!["a".into(), "b".into()]);
        assert_eq!(set.to_string(), "a, b");
        assert_eq!(KeywordSet::default().to_string(), "");
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(extract_keywords("", "x"), Err(KeywordError::MissingTitle));
        assert_eq!(extract_keywords(" \t\n", ""), Err(KeywordError::MissingTitle));
    }

    #[test]
    fn test_title_trimmed_like_a_form_value() {
        assert_eq!(extract_keywords("\u{feff}", ""), Err(KeywordError::MissingTitle));
        assert_eq!(
            extract_keywords("\u{3000}\u{feff} ", "x"),
            Err(KeywordError::MissingTitle)
        );
        let set = extract_keywords("\u{85}", "").unwrap();
        assert_eq!(set.as_slice(), ["\u{85}"]);
    }

    #[test]
    fn test_title_only() {
        let set = extract_keywords("Hello World", "").unwrap();
        assert_eq!(set.as_slice(), ["hello", "world"]);
    }

    #[test]
    fn test_inner_double_space_yields_empty_token() {
        let set = extract_keywords("a  b", "c  d").unwrap();
        assert_eq!(set.as_slice(), ["a", "", "b", "c", "d"]);
        assert_eq!(set.to_string(), "a, , b, c, d");
    }
}
