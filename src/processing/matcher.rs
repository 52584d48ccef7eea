//! Keyword matching and weighted coverage scoring

use crate::catalog::role::{Importance, RoleProfile};
use crate::processing::text_processor::{TextProcessor, TokenSet};
use log::debug;
use serde::{Deserialize, Serialize};

/// Per-importance keyword weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportanceWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            high: 2.0,
            medium: 1.5,
            low: 1.0,
        }
    }
}

impl ImportanceWeights {
    pub fn weight_for(&self, importance: Importance) -> f64 {
        match importance {
            Importance::High => self.high,
            Importance::Medium => self.medium,
            Importance::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted coverage in [0, 1].
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Strong,
    Fair,
    Weak,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            ScoreTier::Strong
        } else if score >= 0.5 {
            ScoreTier::Fair
        } else {
            ScoreTier::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Strong => "Strong match",
            ScoreTier::Fair => "Partial match",
            ScoreTier::Weak => "Weak match",
        }
    }
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            matched: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn percentage(&self) -> u8 {
        (self.score * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score)
    }

    /// (matched, total) keyword counts.
    pub fn coverage(&self) -> (usize, usize) {
        (self.matched.len(), self.matched.len() + self.missing.len())
    }
}

/// Matches a role's keywords against free-form candidate text.
pub struct KeywordMatcher {
    processor: TextProcessor,
    weights: ImportanceWeights,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(ImportanceWeights::default())
    }
}

impl KeywordMatcher {
    pub fn new(weights: ImportanceWeights) -> Self {
        Self {
            processor: TextProcessor::new(),
            weights,
        }
    }

    pub fn weights(&self) -> &ImportanceWeights {
        &self.weights
    }

    /// Score `text` against `role`. Total over its inputs: any text is acceptable.
    pub fn analyze(&self, text: &str, role: &RoleProfile) -> MatchResult {
        let tokens = self.processor.token_set(text);
        let weight = self.weights.weight_for(role.importance);

        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut matched_weight = 0.0;
        let mut total_weight = 0.0;

        for keyword in &role.keywords {
            total_weight += weight;
            if self.keyword_present(keyword, &tokens) {
                matched_weight += weight;
                matched.push(keyword.clone());
            } else {
                missing.push(keyword.clone());
            }
        }

        let score = if total_weight > 0.0 {
            (matched_weight / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        };

        debug!(
            "Role '{}': {}/{} keywords matched, score {:.3}",
            role.name,
            matched.len(),
            role.keywords.len(),
            score
        );

        MatchResult {
            score,
            matched,
            missing,
        }
    }

    fn keyword_present(&self, keyword: &str, tokens: &TokenSet) -> bool {
        let normalized = self.processor.normalize(keyword);
        if normalized.is_empty() {
            return false;
        }

        if normalized.contains(' ') {
            tokens.contains_phrase(&normalized)
        } else {
            tokens.contains_word(&normalized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn role(keywords: &[&str], importance: Importance) -> RoleProfile {
        RoleProfile::new(
            "Test Role",
            keywords.iter().map(|k| k.to_string()).collect(),
            importance,
        )
    }

    #[test]
    fn test_weighted_example() {
        let matcher = KeywordMatcher::default();
        let role = role(&["Python", "SQL", "Docker"], Importance::High);

        let result = matcher.analyze("I used Python and SQL daily", &role);

        assert_eq!(result.matched, vec!["Python", "SQL"]);
        assert_eq!(result.missing, vec!["Docker"]);
        assert!((result.score - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(result.percentage(), 67);
        assert_eq!(result.tier(), ScoreTier::Fair);
    }

    #[test]
    fn test_word_boundary_exactness() {
        let matcher = KeywordMatcher::default();
        let role = role(&["sql"], Importance::Medium);

        let result = matcher.analyze("Built apps backed by SQLite", &role);
        assert!(result.matched.is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_hyphenated_phrase_matches_bigram() {
        let matcher = KeywordMatcher::default();
        let role = role(&["machine learning"], Importance::Low);

        let result = matcher.analyze("I love Machine-Learning projects", &role);
        assert_eq!(result.matched, vec!["machine learning"]);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_long_phrase_substring_fallback() {
        let matcher = KeywordMatcher::default();
        let role = role(&["continuous integration pipelines"], Importance::Low);

        let result = matcher.analyze("Owned continuous integration pipelines at scale", &role);
        assert_eq!(result.matched.len(), 1);
    }

    #[test]
    fn test_empty_text_misses_everything() {
        let matcher = KeywordMatcher::default();
        let role = role(&["Rust", "Kubernetes", "project management"], Importance::High);

        let result = matcher.analyze("", &role);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing.len(), 3);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_zero_keywords_scores_zero() {
        let matcher = KeywordMatcher::default();
        let role = role(&[], Importance::High);

        let result = matcher.analyze("Anything at all", &role);
        assert_eq!(result, MatchResult::empty());
    }

    #[test]
    fn test_full_coverage_scores_one() {
        let matcher = KeywordMatcher::default();
        let keywords = ["Excel", "Power BI", "data visualization", "SQL"];
        let role = role(&keywords, Importance::Medium);

        let result = matcher.analyze(&keywords.join(" and "), &role);
        assert_eq!(result.score, 1.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_partition_and_order() {
        let matcher = KeywordMatcher::default();
        let keywords = ["Docker", "python", "AWS", "Terraform", "Go"];
        let role = role(&keywords, Importance::Low);

        let result = matcher.analyze("go python docker", &role);
        assert_eq!(result.matched, vec!["Docker", "python", "Go"]);
        assert_eq!(result.missing, vec!["AWS", "Terraform"]);

        let matched: HashSet<_> = result.matched.iter().collect();
        let missing: HashSet<_> = result.missing.iter().collect();
        assert!(matched.is_disjoint(&missing));
        assert_eq!(matched.len() + missing.len(), keywords.len());
    }

    #[test]
    fn test_duplicates_reported_independently() {
        let matcher = KeywordMatcher::default();
        let role = role(&["SQL", "sql", "Spark"], Importance::Low);

        let result = matcher.analyze("sql every day", &role);
        assert_eq!(result.matched, vec!["SQL", "sql"]);
        assert_eq!(result.missing, vec!["Spark"]);
    }

    #[test]
    fn test_score_monotone_as_keywords_added() {
        let matcher = KeywordMatcher::default();
        let keywords = ["Rust", "Tokio", "gRPC", "distributed systems", "Postgres"];
        let role = role(&keywords, Importance::High);

        let mut text = String::from("Backend engineer.");
        let mut previous = matcher.analyze(&text, &role).score;
        for keyword in keywords {
            text.push(' ');
            text.push_str(keyword);
            let score = matcher.analyze(&text, &role).score;
            assert!(score >= previous);
            previous = score;

            text.push(' ');
            text.push_str(keyword);
            assert_eq!(matcher.analyze(&text, &role).score, score);
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(ScoreTier::from_score(0.7), ScoreTier::Strong);
        assert_eq!(ScoreTier::from_score(0.69), ScoreTier::Fair);
        assert_eq!(ScoreTier::from_score(0.5), ScoreTier::Fair);
        assert_eq!(ScoreTier::from_score(0.49), ScoreTier::Weak);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ImportanceWeights {
            high: 3.0,
            medium: 1.5,
            low: 0.0,
        };
        let matcher = KeywordMatcher::new(weights);
        let role = role(&["Figma"], Importance::Low);

        let result = matcher.analyze("Figma", &role);
        assert_eq!(result.matched, vec!["Figma"]);
        assert_eq!(result.score, 0.0);
        assert_eq!(matcher.weights().weight_for(Importance::High), 3.0);
    }
}
