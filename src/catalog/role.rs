//! Role profiles: the keyword list and importance level of a target job role

use crate::error::CvMatcherError;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Importance {
    #[default]
    Low,
    Medium,
    High,
}

impl FromStr for Importance {
    type Err = CvMatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "low" | "baja" | "bajo" => Ok(Importance::Low),
            "medium" | "media" | "medio" => Ok(Importance::Medium),
            "high" | "alta" | "alto" => Ok(Importance::High),
            other => Err(CvMatcherError::Catalog(format!(
                "Unknown importance level: '{}'. Supported: low, medium, high",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Importance {
    type Error = CvMatcherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Importance::Low => write!(f, "low"),
            Importance::Medium => write!(f, "medium"),
            Importance::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub importance: Importance,
}

impl RoleProfile {
    /// Build a profile from an explicit keyword list, kept exactly as given.
    pub fn new(name: impl Into<String>, keywords: Vec<String>, importance: Importance) -> Self {
        Self {
            name: name.into(),
            keywords,
            importance,
        }
    }

    /// Build a profile from a comma-separated keyword list such as `"Python, SQL, machine learning"`.
    pub fn from_keyword_list(name: impl Into<String>, list: &str, importance: Importance) -> Self {
        Self::new(name, parse_keyword_list(list), importance)
    }
}

/// Split on commas, trim, drop blanks and keep the first spelling of each normalized keyword.
pub fn parse_keyword_list(list: &str) -> Vec<String> {
    dedup_keywords(list.split(',').map(str::to_string))
}

pub fn dedup_keywords<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let processor = TextProcessor::new();
    let mut seen = HashSet::new();

    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| {
            let normalized = processor.normalize(k);
            !normalized.is_empty() && seen.insert(normalized)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword_list_dedups_by_normalized_form() {
        let keywords = parse_keyword_list("Python, SQL , sql, Machine-Learning, machine learning, , !!");
        assert_eq!(keywords, vec!["Python", "SQL", "Machine-Learning"]);
    }

    #[test]
    fn test_importance_parsing() {
        assert_eq!("HIGH".parse::<Importance>().unwrap(), Importance::High);
        assert_eq!("Media".parse::<Importance>().unwrap(), Importance::Medium);
        assert_eq!("".parse::<Importance>().unwrap(), Importance::Low);
        assert!("urgent".parse::<Importance>().is_err());
    }

    #[test]
    fn test_importance_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: Importance,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"level": "Alta"}"#).unwrap();
        assert_eq!(parsed.level, Importance::High);
        assert_eq!(serde_json::to_string(&Importance::Medium).unwrap(), "\"medium\"");
        assert!(serde_json::from_str::<Wrapper>(r#"{"level": "extreme"}"#).is_err());
    }

    #[test]
    fn test_new_keeps_duplicates() {
        let role = RoleProfile::new("Dup", vec!["SQL".into(), "sql".into()], Importance::Low);
        assert_eq!(role.keywords.len(), 2);
    }
}
