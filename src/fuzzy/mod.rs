//! Levenshtein similarity and best n-gram search over free text.

mod levenshtein;

use serde::Serialize;
use tracing::debug;

pub use levenshtein::{levenshtein_distance, levenshtein_ratio};

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub score: f64,
    pub ngram: Option<String>,
}

impl FuzzyMatch {
    fn none() -> Self {
        Self {
            score: 0.0,
            ngram: None,
        }
    }

    pub fn into_parts(self) -> (f64, Option<String>) {
        (self.score, self.ngram)
    }
}

fn strip_punctuation(word: &str) -> String {
    word.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Every contiguous window of `n` words, punctuation stripped per word.
pub fn ngrams(words: &[&str], n: usize) -> Vec<String> {
    if n == 0 || words.len() < n {
        return Vec::new();
    }
    words
        .windows(n)
        .map(|window| {
            window
                .iter()
                .map(|word| strip_punctuation(word))
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        })
        .collect()
}

pub fn bigrams(words: &[&str]) -> Vec<String> {
    ngrams(words, 2)
}

/// Finds the n-gram across `segments` that best resembles `target`.
///
/// `n` is the word count of `target` and comparison is case-insensitive. Once
/// the best score reaches `threshold` the rest of the current segment is
/// skipped, but later segments are still scanned and may replace the best
/// with a strictly higher score. `ngram` stays `None` until some n-gram scores
/// above zero.
pub fn best_match<S: AsRef<str>>(target: &str, segments: &[S], threshold: f64) -> FuzzyMatch {
    let size = target.split_whitespace().count();
    let target_lower = target.to_lowercase();
    let mut best = FuzzyMatch::none();

    for segment in segments {
        let words: Vec<&str> = segment.as_ref().split_whitespace().collect();
        for ngram in ngrams(&words, size) {
            let score = levenshtein_ratio(&target_lower, &ngram.to_lowercase());
            if score > best.score {
                best = FuzzyMatch {
                    score,
                    ngram: Some(ngram),
                };
            }
            if best.score >= threshold {
                break;
            }
        }
    }

    debug!(
        phrase = target,
        score = best.score,
        ngram = best.ngram.as_deref().unwrap_or_default(),
        "fuzzy match"
    );
    best
}
