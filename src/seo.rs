use std::sync::Arc;

use tracing::{debug, info};

use crate::analyzer::TextAnalyzer;
use crate::error::{KeywordError, Result};
use crate::keyphrase::KeyphraseExtractor;
use crate::related::RelatedSearchClient;

pub const MAX_KEYWORDS: usize = 30;

/// Negative keywords suggested for specific title words.
const NEGATIONS: &[(&str, &str)] = &[
    ("build", "common mistakes in app development"),
    ("ai", "non-AI app ideas"),
    ("app", "how not to build an app"),
];

/// Keywords grouped by where they came from, in final output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeoKeywords {
    pub trigrams: Vec<String>,
    pub bigrams: Vec<String>,
    pub title_terms: Vec<String>,
    pub keyphrases: Vec<String>,
    pub negations: Vec<String>,
    pub related_searches: Vec<String>,
}

impl SeoKeywords {
    /// Title n-grams first, single title terms next, then everything found in the
    /// wider text, capped at [`MAX_KEYWORDS`].
    pub fn ranked(self) -> Vec<String> {
        self.trigrams
            .into_iter()
            .chain(self.bigrams)
            .chain(self.title_terms)
            .chain(self.keyphrases)
            .chain(self.negations)
            .chain(self.related_searches)
            .take(MAX_KEYWORDS)
            .collect()
    }
}

/// Builds the keyword list returned by the HTTP service.
pub struct SeoKeywordGenerator {
    title_analyzer: TextAnalyzer,
    keyphrases: KeyphraseExtractor,
    related: Option<RelatedSearchClient>,
}

impl SeoKeywordGenerator {
    pub fn new(keyphrases: KeyphraseExtractor, related: Option<RelatedSearchClient>) -> Self {
        Self {
            title_analyzer: TextAnalyzer::title_terms(),
            keyphrases,
            related,
        }
    }

    /// Everything that does not need the network.
    pub fn collect_offline(&self, title: &str, description: &str) -> Result<SeoKeywords> {
        let title = title.trim();
        if title.is_empty() {
            return Err(KeywordError::MissingTitle);
        }

        let terms: Vec<String> = self
            .title_analyzer
            .analyze(title.to_string())
            .into_iter()
            .map(|t| t.term)
            .collect();

        let text = format!("{} {}", title, description.trim());
        let keyphrases = self
            .keyphrases
            .extract(&text)
            .into_iter()
            .map(|k| k.phrase)
            .collect();

        Ok(SeoKeywords {
            trigrams: ngrams(&terms, 3),
            bigrams: ngrams(&terms, 2),
            title_terms: terms,
            keyphrases,
            negations: negations(title),
            related_searches: Vec::new(),
        })
    }

    /// Runs the text statistics on the blocking pool, then looks up related searches.
    pub async fn collect(
        self: Arc<Self>,
        title: String,
        description: String,
    ) -> Result<SeoKeywords> {
        let generator = self.clone();
        let offline_title = title.clone();
        let mut keywords = tokio::task::spawn_blocking(move || {
            generator.collect_offline(&offline_title, &description)
        })
        .await
        .map_err(|e| KeywordError::Analysis {
            message: e.to_string(),
        })??;

        if let Some(related) = &self.related {
            keywords.related_searches = related.fetch(title.trim()).await;
        }
        debug!(
            terms = keywords.title_terms.len(),
            keyphrases = keywords.keyphrases.len(),
            related = keywords.related_searches.len(),
            "keyword sources collected"
        );
        Ok(keywords)
    }

    pub async fn generate(
        self: Arc<Self>,
        title: String,
        description: String,
    ) -> Result<Vec<String>> {
        let keywords = self.collect(title, description).await?.ranked();
        info!(count = keywords.len(), "seo keywords generated");
        Ok(keywords)
    }
}

/// Adjacent runs of `n` terms joined by a space.
pub fn ngrams(terms: &[String], n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    terms.windows(n).map(|w| w.join(" ")).collect()
}

/// One suggestion per matching whitespace-separated title word, in title order.
pub fn negations(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .flat_map(|word| {
            NEGATIONS
                .iter()
                .filter(move |(trigger, _)| *trigger == word)
                .map(|(_, phrase)| phrase.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ngrams() {
        let terms = strings(&["rust", "keyword", "generator", "tool"]);
        assert_eq!(
            ngrams(&terms, 2),
            strings(&["rust keyword", "keyword generator", "generator tool"])
        );
        assert_eq!(
            ngrams(&terms, 3),
            strings(&["rust keyword generator", "keyword generator tool"])
        );
        assert!(ngrams(&terms[..1], 2).is_empty());
        assert!(ngrams(&terms, 0).is_empty());
    }

    #[test]
    fn test_negations() {
        assert_eq!(
            negations("Build an AI App"),
            strings(&[
                "common mistakes in app development",
                "non-AI app ideas",
                "how not to build an app",
            ])
        );
        assert!(negations("Rust compilers").is_empty());
        // punctuation is not stripped before matching
        assert!(negations("app!").is_empty());
    }

    #[test]
    fn test_ranked_order_and_cap() {
        let keywords = SeoKeywords {
            trigrams: strings(&["a b c"]),
            bigrams: strings(&["a b"]),
            title_terms: strings(&["a"]),
            keyphrases: (0..40).map(|i| format!("k{i}")).collect(),
            negations: strings(&["n"]),
            related_searches: strings(&["r s t"]),
        };
        let ranked = keywords.ranked();
        assert_eq!(ranked.len(), MAX_KEYWORDS);
        assert_eq!(&ranked[..4], &strings(&["a b c", "a b", "a", "k0"])[..]);
    }

    #[test]
    fn test_missing_title() {
        let generator = SeoKeywordGenerator::new(KeyphraseExtractor::default(), None);
        assert_eq!(
            generator.collect_offline("  ", "description"),
            Err(KeywordError::MissingTitle)
        );
    }

    #[test]
    fn test_collect_offline() {
        let generator = SeoKeywordGenerator::new(KeyphraseExtractor::default(), None);
        let keywords = generator
            .collect_offline("Rust Keyword Generator", "Generate keywords with Rust.")
            .unwrap();
        assert_eq!(keywords.title_terms, strings(&["rust", "keyword", "generator"]));
        assert_eq!(keywords.bigrams, strings(&["rust keyword", "keyword generator"]));
        assert_eq!(keywords.trigrams, strings(&["rust keyword generator"]));
        assert!(!keywords.keyphrases.is_empty());
        assert!(keywords.related_searches.is_empty());
    }

    #[tokio::test]
    async fn test_generate_without_related_searches() {
        let generator = Arc::new(SeoKeywordGenerator::new(KeyphraseExtractor::default(), None));
        let keywords = generator
            .generate("Rust Keyword Generator".into(), String::new())
            .await
            .unwrap();
        assert_eq!(
            &keywords[..3],
            &strings(&["rust keyword generator", "rust keyword", "keyword generator"])[..]
        );
        assert!(keywords.len() <= MAX_KEYWORDS);
    }
}
