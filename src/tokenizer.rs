use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Contraction suffixes split off into their own word, longest first.
const CLITICS: &[&str] = &["n't", "'re", "'ll", "'ve", "'s", "'d", "'m"];

pub struct Tokenizer {
    min_term_len: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self { min_term_len: 2 }
    }

    /// Split text into words for tagging.
    ///
    /// Case is preserved, punctuation becomes its own token and contractions
    /// are split ("don't" -> "do", "n't").
    pub fn words(&self, text: &str) -> Vec<String> {
        let mut words = Vec::new();
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            let segment = segment.replace('\u{2019}', "'");
            if let Some((head, clitic)) = split_clitic(&segment) {
                words.push(head.to_string());
                words.push(clitic.to_string());
                continue;
            }
            words.push(segment);
        }
        words
    }

    /// Split text into raw alphanumeric runs
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.chars()
            .fold(vec![String::new()], |mut tokens, c| {
                if c.is_alphanumeric() || c == '_' {
                    if let Some(last) = tokens.last_mut() {
                        last.push(c);
                    }
                } else if tokens.last().map_or(false, |s| !s.is_empty()) {
                    tokens.push(String::new());
                }
                tokens
            })
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Convert tokens to lowercase
    fn lowercase_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| t.to_lowercase()).collect()
    }

    /// Drop single-character tokens
    fn length_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| t.chars().count() >= self.min_term_len)
            .collect()
    }

    /// Term analysis used for vectorizing, at index build time and query time alike.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let tokens = self.lowercase_filter(tokens);
        self.length_filter(tokens)
    }

    /// Analyze and count term frequencies
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, usize> {
        let mut frequencies = HashMap::new();
        for term in self.terms(text) {
            *frequencies.entry(term).or_insert(0) += 1;
        }
        frequencies
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    let lower = word.to_lowercase();
    if lower.len() != word.len() {
        return None;
    }
    CLITICS.iter().find_map(|clitic| {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let at = word.len() - clitic.len();
            Some((&word[..at], &word[at..]))
        } else {
            None
        }
    })
}
