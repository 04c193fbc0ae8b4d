use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

pub fn get_stop_words() -> &'static HashSet<String> {
    STOP_WORDS.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|x| x.to_string())
            .collect()
    })
}

pub fn is_stop_word(word: &str) -> bool {
    get_stop_words().contains(word)
}

/// A character filter receives the original text and can transform it by adding,
/// removing, or changing characters before it reaches the tokenizer.
pub trait CharacterFilter: Send + Sync {
    fn filter(&self, text: String) -> String;
}

/// Whitespace as browsers strip it from form values: the `Zs` space separators,
/// TAB, VT, FF, LF, CR, the byte order mark and the line/paragraph separators.
/// NEL (U+0085) is not included.
pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn trim_form_input(text: &str) -> &str {
    text.trim_matches(is_form_whitespace)
}

/// Strips leading and trailing form whitespace, see [`trim_form_input`].
#[derive(Debug, Default)]
pub struct TrimCharacterFilter;

impl CharacterFilter for TrimCharacterFilter {
    fn filter(&self, text: String) -> String {
        let trimmed = trim_form_input(&text);
        if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        }
    }
}

/// A tokenizer receives a stream of characters, breaks it up into individual tokens,
/// and outputs a stream of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: String) -> Vec<String>;
}

/// Splits on every single space character. Runs of spaces produce empty tokens
/// and other whitespace (tabs, newlines) stays inside the tokens.
pub struct SingleSpaceTokenizer;

impl Tokenizer for SingleSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split(' ').map(|w| w.to_string()).collect()
    }
}

pub struct WhiteSpaceTokenizer;

impl Tokenizer for WhiteSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.to_string())
            .collect::<Vec<String>>()
    }
}

/// Whitespace tokens with leading and trailing punctuation split off into tokens of
/// their own. Inner punctuation stays put: "build-apps!" becomes [build-apps, !].
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in WhiteSpaceTokenizer.tokenize(text) {
            let core = word.trim_matches(|c: char| !c.is_alphanumeric());
            if core.is_empty() {
                tokens.push(word);
                continue;
            }
            let leading = word.trim_start_matches(|c: char| !c.is_alphanumeric());
            let start = word.len() - leading.len();
            let end = start + core.len();
            if start > 0 {
                tokens.push(word[..start].to_string());
            }
            tokens.push(core.to_string());
            if end < word.len() {
                tokens.push(word[end..].to_string());
            }
        }
        tokens
    }
}

/// A token filter receives the token stream and may add, remove, or change tokens.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken>;
}

pub struct LowerCaseTokenFilter;

impl TokenFilter for LowerCaseTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = t.term.to_lowercase();
                t
            })
            .collect()
    }
}

/// Drops repeated terms, keeping each term at the position of its first occurrence.
pub struct DedupTokenFilter;

impl TokenFilter for DedupTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        let mut seen: HashSet<String> = HashSet::with_capacity(tokens.len());
        tokens.retain(|t| seen.insert(t.term.clone()));
        tokens
    }
}

pub struct StopWordTokenFilter;

impl TokenFilter for StopWordTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        let stop_words = get_stop_words();
        tokens.retain(|w| !stop_words.contains(&w.term));
        tokens
    }
}

/// Keeps only non-empty tokens made entirely of alphanumeric characters.
pub struct AlphanumericTokenFilter;

impl TokenFilter for AlphanumericTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens.retain(|t| !t.term.is_empty() && t.term.chars().all(|c| c.is_alphanumeric()));
        tokens
    }
}

/// Pure text analysis pipeline - no async, no IO, just text transformations
pub struct TextAnalyzer {
    char_filters: Vec<Box<dyn CharacterFilter>>,
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub term: String,
    pub pos: usize,
}

impl std::ops::Deref for TextToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

impl TextAnalyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharacterFilter>>,
        tokenizer: Box<dyn Tokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    /// Trim, split on single spaces, lowercase, stable dedup.
    pub fn form_keywords() -> Self {
        Self::new(
            vec![Box::new(TrimCharacterFilter)],
            Box::new(SingleSpaceTokenizer),
            vec![Box::new(LowerCaseTokenFilter), Box::new(DedupTokenFilter)],
        )
    }

    /// Word tokens, alphanumeric only (hyphenated words and punctuation are dropped),
    /// lowercase, English stop words removed.
    pub fn title_terms() -> Self {
        Self::new(
            vec![Box::new(TrimCharacterFilter)],
            Box::new(WordTokenizer),
            vec![
                Box::new(AlphanumericTokenFilter),
                Box::new(LowerCaseTokenFilter),
                Box::new(StopWordTokenFilter),
            ],
        )
    }

    pub fn char_filter(&self, mut content: String) -> String {
        for filter in self.char_filters.iter() {
            content = filter.filter(content);
        }
        content
    }

    pub fn tokenize(&self, content: String) -> Vec<TextToken> {
        let tokens = self.tokenizer.tokenize(content);
        tokens
            .into_iter()
            .enumerate()
            .map(|(idx, term)| TextToken { term, pos: idx })
            .collect()
    }

    pub fn token_filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw content and returns a list of tokens
    pub fn analyze(&self, raw_content: String) -> Vec<TextToken> {
        let content = self.char_filter(raw_content);
        let tokens = self.tokenize(content);
        self.token_filter(tokens)
    }

    /// Analyzes several fields as one stream. Each field is filtered and tokenized on its
    /// own, fields that are empty after character filtering contribute nothing, and the
    /// token filters run once over the concatenation so dedup spans all fields.
    pub fn analyze_fields<I, S>(&self, fields: I) -> Vec<TextToken>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<TextToken> = Vec::new();
        for field in fields {
            let content = self.char_filter(field.into());
            if content.is_empty() {
                continue;
            }
            let offset = tokens.len();
            tokens.extend(self.tokenize(content).into_iter().map(|mut t| {
                t.pos += offset;
                t
            }));
        }
        self.token_filter(tokens)
    }
}
