//! Structured profile fields rendered into the CV report

use crate::error::{CvMatcherError, Result};
use serde::{Deserialize, Serialize};

/// The candidate profile, rebuilt by the caller for every render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFields {
    pub name: String,

    #[serde(default)]
    pub contact: ContactInfo,

    #[serde(default)]
    pub objective: String,

    pub summary: String,

    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,

    #[serde(default)]
    pub education: Vec<EducationEntry>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub certifications: Option<String>,

    #[serde(default)]
    pub languages: Option<String>,

    /// Raw image bytes, attached by the input layer.
    #[serde(skip)]
    pub photo: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub details: String,
}

impl ContactInfo {
    /// Non-empty contact parts joined into one display line.
    pub fn line(&self) -> String {
        [self.email.as_str(), self.phone.as_str(), self.location.as_str()]
            .into_iter()
            .chain(self.links.iter().map(String::as_str))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl ExperienceEntry {
    pub fn title_line(&self) -> String {
        join_title(&self.role, &self.organization)
    }
}

impl EducationEntry {
    pub fn title_line(&self) -> String {
        join_title(&self.degree, &self.institution)
    }
}

fn join_title(primary: &str, secondary: &str) -> String {
    match (primary.trim(), secondary.trim()) {
        (p, "") => p.to_string(),
        ("", s) => s.to_string(),
        (p, s) => format!("{} - {}", p, s),
    }
}

impl ReportFields {
    /// Required fields are checked here, before anything reaches the renderer.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CvMatcherError::InvalidInput("Profile name is required".to_string()));
        }
        if self.summary.trim().is_empty() {
            return Err(CvMatcherError::InvalidInput("Profile summary is required".to_string()));
        }
        if let Some(index) = self.experience.iter().position(|e| e.role.trim().is_empty()) {
            return Err(CvMatcherError::InvalidInput(format!(
                "Experience entry {} has no role",
                index + 1
            )));
        }
        if let Some(index) = self.education.iter().position(|e| e.degree.trim().is_empty()) {
            return Err(CvMatcherError::InvalidInput(format!(
                "Education entry {} has no degree",
                index + 1
            )));
        }
        Ok(())
    }

    pub fn with_photo(mut self, bytes: Vec<u8>) -> Self {
        self.photo = Some(bytes);
        self
    }

    pub fn skills_line(&self) -> String {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Everything the candidate wrote about themselves, as matcher input.
    pub fn candidate_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.objective.as_str(), self.summary.as_str()];

        for entry in &self.experience {
            parts.extend([entry.role.as_str(), entry.description.as_str()]);
        }
        for entry in &self.education {
            parts.extend([entry.degree.as_str(), entry.details.as_str()]);
        }
        parts.extend(self.skills.iter().map(String::as_str));
        parts.extend(self.certifications.as_deref());
        parts.extend(self.languages.as_deref());

        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportFields {
        ReportFields {
            name: "Ana Torres".to_string(),
            contact: ContactInfo {
                email: "ana@example.com".to_string(),
                phone: String::new(),
                location: "Rosario".to_string(),
                links: vec!["github.com/anatorres".to_string()],
            },
            summary: "Analyst focused on dashboards.".to_string(),
            experience: vec![ExperienceEntry {
                role: "Data Analyst".to_string(),
                organization: "Acme".to_string(),
                period: "2021 - 2024".to_string(),
                description: "Built Power BI reports.".to_string(),
            }],
            skills: vec!["SQL".to_string(), " ".to_string(), "Excel".to_string()],
            languages: Some("Spanish, English".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_contact_line_skips_empty_parts() {
        assert_eq!(
            sample().contact.line(),
            "ana@example.com | Rosario | github.com/anatorres"
        );
    }

    #[test]
    fn test_title_lines() {
        let fields = sample();
        assert_eq!(fields.experience[0].title_line(), "Data Analyst - Acme");

        let edu = EducationEntry {
            degree: "BSc Statistics".to_string(),
            ..Default::default()
        };
        assert_eq!(edu.title_line(), "BSc Statistics");
    }

    #[test]
    fn test_candidate_text_collects_profile() {
        let text = sample().candidate_text();
        assert!(text.contains("Analyst focused on dashboards."));
        assert!(text.contains("Built Power BI reports."));
        assert!(text.contains("SQL"));
        assert!(text.contains("Spanish, English"));
        assert!(!text.contains("ana@example.com"));
    }

    #[test]
    fn test_skills_line() {
        assert_eq!(sample().skills_line(), "SQL | Excel");
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(sample().validate().is_ok());

        let mut fields = sample();
        fields.summary = "  ".to_string();
        assert!(matches!(fields.validate(), Err(CvMatcherError::InvalidInput(_))));

        let mut fields = sample();
        fields.experience[0].role.clear();
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal_profile() {
        let fields: ReportFields = toml::from_str("name = \"Leo\"\nsummary = \"Chef\"\n").unwrap();
        assert!(fields.experience.is_empty());
        assert!(fields.photo.is_none());
        assert_eq!(fields.contact.line(), "");
    }
}
