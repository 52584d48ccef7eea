//! Text processing and normalization

use regex::Regex;
use std::collections::HashSet;

pub struct TextProcessor {
    separator_regex: Regex,
    strip_regex: Regex,
}

/// Comparable token sets built from one normalized text.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    pub words: Vec<String>,
    pub unigrams: HashSet<String>,
    pub bigrams: HashSet<String>,
    /// Words joined by single spaces, used for phrases longer than two words.
    pub joined: String,
}

impl TokenSet {
    pub fn contains_word(&self, word: &str) -> bool {
        self.unigrams.contains(word)
    }

    /// A multi-word phrase is present as a bigram or, failing that, anywhere in the joined text.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.bigrams.contains(phrase) || self.joined.contains(phrase)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let separator_regex = Regex::new(r"[,;/\-]").expect("Invalid separator regex");

        let strip_regex = Regex::new(r"[^\p{Alphabetic}\p{N}\s]").expect("Invalid strip regex");

        Self {
            separator_regex,
            strip_regex,
        }
    }

    /// Lowercase, turn separators into spaces, drop other punctuation and collapse whitespace.
    pub fn normalize(&self, text: &str) -> String {
        self.words(text).join(" ")
    }

    pub fn words(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let separated = self.separator_regex.replace_all(&lowered, " ");
        let stripped = self.strip_regex.replace_all(&separated, "");

        stripped.split_whitespace().map(str::to_string).collect()
    }

    pub fn token_set(&self, text: &str) -> TokenSet {
        let words = self.words(text);

        let unigrams: HashSet<String> = words.iter().cloned().collect();
        let bigrams: HashSet<String> = words
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .collect();
        let joined = words.join(" ");

        TokenSet {
            words,
            unigrams,
            bigrams,
            joined,
        }
    }
}
