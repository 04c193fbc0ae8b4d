//! Unsupervised keyphrase extraction in the style of YAKE.
//!
//! Every candidate word gets a score from local statistics (casing, position,
//! frequency, context spread and sentence spread); phrases of up to `max_ngram`
//! words combine the scores of their words. Lower scores are more relevant.

use std::collections::{HashMap, HashSet};

use crate::analyzer::is_stop_word;

#[derive(Debug, Clone, PartialEq)]
pub struct Keyphrase {
    pub phrase: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct KeyphraseExtractor {
    max_ngram: usize,
    top: usize,
}

impl Default for KeyphraseExtractor {
    fn default() -> Self {
        Self { max_ngram: 3, top: 30 }
    }
}

#[derive(Debug, Default)]
struct WordStats {
    tf: usize,
    tf_upper: usize,
    tf_acronym: usize,
    sentences: Vec<usize>,
    left: HashMap<String, usize>,
    right: HashMap<String, usize>,
}

/// A word as it appeared in the text.
struct Occurrence<'a> {
    raw: &'a str,
    key: String,
}

impl KeyphraseExtractor {
    pub fn new(max_ngram: usize, top: usize) -> Self {
        Self {
            max_ngram: max_ngram.max(1),
            top,
        }
    }

    pub fn extract(&self, text: &str) -> Vec<Keyphrase> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let mut stats: HashMap<String, WordStats> = HashMap::new();
        for (sentence_idx, chunks) in sentences.iter().enumerate() {
            let mut first_in_sentence = true;
            for chunk in chunks {
                for (i, word) in chunk.iter().enumerate() {
                    let entry = stats.entry(word.key.clone()).or_default();
                    entry.tf += 1;
                    entry.sentences.push(sentence_idx);
                    if is_acronym(word.raw) {
                        entry.tf_acronym += 1;
                    } else if !first_in_sentence && starts_upper(word.raw) {
                        entry.tf_upper += 1;
                    }
                    first_in_sentence = false;

                    if i > 0 {
                        *entry.left.entry(chunk[i - 1].key.clone()).or_default() += 1;
                    }
                    if let Some(next) = chunk.get(i + 1) {
                        *entry.right.entry(next.key.clone()).or_default() += 1;
                    }
                }
            }
        }

        let word_scores = score_words(&stats, sentences.len());
        if word_scores.is_empty() {
            return Vec::new();
        }

        // phrase -> (occurrences, first seen)
        let mut candidates: HashMap<String, (usize, usize)> = HashMap::new();
        let mut order = 0usize;
        for chunks in sentences.iter() {
            for chunk in chunks {
                for start in 0..chunk.len() {
                    for len in 1..=self.max_ngram {
                        let end = start + len;
                        if end > chunk.len() {
                            break;
                        }
                        let words = &chunk[start..end];
                        if is_stop_word(&words[0].key) || is_stop_word(&words[len - 1].key) {
                            continue;
                        }
                        let phrase = words
                            .iter()
                            .map(|w| w.key.as_str())
                            .collect::<Vec<_>>()
                            .join(" ");
                        let entry = candidates.entry(phrase).or_insert((0, order));
                        entry.0 += 1;
                        order += 1;
                    }
                }
            }
        }

        let mut scored: Vec<(Keyphrase, usize)> = candidates
            .into_iter()
            .filter_map(|(phrase, (tf, first_seen))| {
                let mut product = 1.0f64;
                let mut sum = 0.0f64;
                let mut scored_words = 0usize;
                for word in phrase.split(' ') {
                    if let Some(score) = word_scores.get(word) {
                        product *= score;
                        sum += score;
                        scored_words += 1;
                    }
                }
                if scored_words == 0 {
                    return None;
                }
                let score = product / (tf as f64 * (1.0 + sum));
                Some((Keyphrase { phrase, score }, first_seen))
            })
            .collect();

        scored.sort_by(|(a, a_seen), (b, b_seen)| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a_seen.cmp(b_seen))
        });
        scored.truncate(self.top);
        scored.into_iter().map(|(k, _)| k).collect()
    }
}

/// Sentences are split on terminal punctuation and line breaks, then into chunks on
/// any other punctuation. Words containing non-alphanumeric characters break a chunk.
fn split_sentences(text: &str) -> Vec<Vec<Vec<Occurrence<'_>>>> {
    text.split(['.', '!', '?', '\n'])
        .map(|sentence| {
            let mut chunks = Vec::new();
            for part in sentence.split(is_chunk_break) {
                let mut current = Vec::new();
                for raw in part.split_whitespace() {
                    if raw.chars().all(|c| c.is_alphanumeric()) {
                        current.push(Occurrence {
                            raw,
                            key: raw.to_lowercase(),
                        });
                    } else if !current.is_empty() {
                        chunks.push(std::mem::take(&mut current));
                    }
                }
                if !current.is_empty() {
                    chunks.push(current);
                }
            }
            chunks
        })
        .filter(|chunks| !chunks.is_empty())
        .collect()
}

fn is_chunk_break(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '|')
}

fn is_acronym(raw: &str) -> bool {
    raw.chars().count() > 1
        && raw.chars().any(|c| c.is_alphabetic())
        && raw.chars().all(|c| !c.is_lowercase())
}

fn starts_upper(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| c.is_uppercase())
}

fn score_words(stats: &HashMap<String, WordStats>, sentence_count: usize) -> HashMap<String, f64> {
    let content: Vec<(&String, &WordStats)> =
        stats.iter().filter(|(key, _)| !is_stop_word(key)).collect();
    if content.is_empty() {
        return HashMap::new();
    }

    let tfs: Vec<f64> = content.iter().map(|(_, s)| s.tf as f64).collect();
    let mean = tfs.iter().sum::<f64>() / tfs.len() as f64;
    let std = (tfs.iter().map(|tf| (tf - mean).powi(2)).sum::<f64>() / tfs.len() as f64).sqrt();
    let max_tf = tfs.iter().cloned().fold(0.0f64, f64::max);

    content
        .into_iter()
        .map(|(key, s)| {
            let tf = s.tf as f64;
            let t_case = s.tf_upper.max(s.tf_acronym) as f64 / (1.0 + tf.ln());
            let t_pos = (3.0 + median(&s.sentences)).ln().ln();
            let t_freq = tf / (mean + std);
            let t_rel = 1.0 + (spread(&s.left) + spread(&s.right)) * tf / max_tf;
            let distinct: HashSet<&usize> = s.sentences.iter().collect();
            let t_sent = distinct.len() as f64 / sentence_count as f64;
            let score = t_pos * t_rel / (t_case + t_freq / t_rel + t_sent / t_rel);
            (key.clone(), score)
        })
        .collect()
}

/// Distinct neighbours over total neighbour occurrences.
fn spread(neighbours: &HashMap<String, usize>) -> f64 {
    let total: usize = neighbours.values().sum();
    if total == 0 {
        0.0
    } else {
        neighbours.len() as f64 / total as f64
    }
}

fn median(values: &[usize]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.is_empty() {
        0.0
    } else if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(found: &[Keyphrase]) -> Vec<&str> {
        found.iter().map(|k| k.phrase.as_str()).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(KeyphraseExtractor::default().extract("").is_empty());
        assert!(KeyphraseExtractor::default().extract("  ... !!").is_empty());
    }

    #[test]
    fn test_scores_are_sorted_and_positive() {
        let found = KeyphraseExtractor::default().extract(
            "Rust compilers optimize code. Rust compilers check lifetimes. Borrow checking in Rust.",
        );
        assert!(!found.is_empty());
        assert!(found.iter().all(|k| k.score > 0.0));
        assert!(found.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_respects_top_and_ngram_limits() {
        let found = KeyphraseExtractor::new(2, 3)
            .extract("Rust compilers optimize generated machine code quickly");
        assert!(found.len() <= 3);
        assert!(found.iter().all(|k| k.phrase.split(' ').count() <= 2));
    }

    #[test]
    fn test_candidates_do_not_cross_punctuation() {
        let found = KeyphraseExtractor::default().extract("rust, compilers");
        assert!(!phrases(&found).contains(&"rust compilers"));
        assert!(phrases(&found).contains(&"rust"));
        assert!(phrases(&found).contains(&"compilers"));
    }

    #[test]
    fn test_candidates_do_not_start_with_stop_word() {
        let found = KeyphraseExtractor::default().extract("the rust compiler");
        assert!(phrases(&found).iter().all(|p| !p.starts_with("the")));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3, 1, 2]), 2.0);
        assert_eq!(median(&[4, 1, 2, 3]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_acronym() {
        assert!(is_acronym("SEO"));
        assert!(!is_acronym("Seo"));
        assert!(!is_acronym("A"));
        assert!(!is_acronym("2024"));
    }
}
