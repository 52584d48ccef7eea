//! Role catalog: a typed mapping from role name to `RoleProfile`
//! Loads CSV, TOML or JSON catalogs and falls back to the bundled roles on request.

pub mod builtin;
pub mod role;

use crate::error::{CvMatcherError, Result};
use crate::input::file_detector::FileType;
use log::{info, warn};
use role::{dedup_keywords, parse_keyword_list, Importance, RoleProfile};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<RoleProfile>,
}

/// Where a loaded catalog came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOrigin {
    File(PathBuf),
    Builtin { reason: Option<String> },
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: RoleCatalog,
    pub origin: CatalogOrigin,
}

#[derive(Debug, Deserialize)]
struct CsvRoleRecord {
    #[serde(alias = "puesto", alias = "name")]
    role: String,
    #[serde(alias = "palabras_clave")]
    keywords: String,
    #[serde(default, alias = "nivel")]
    importance: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoleFile {
    roles: Vec<RoleEntry>,
}

#[derive(Debug, Deserialize)]
struct RoleEntry {
    name: String,
    keywords: KeywordsField,
    #[serde(default)]
    importance: Importance,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordsField {
    List(Vec<String>),
    Text(String),
}

impl From<RoleEntry> for RoleProfile {
    fn from(entry: RoleEntry) -> Self {
        let keywords = match entry.keywords {
            KeywordsField::List(list) => dedup_keywords(list),
            KeywordsField::Text(text) => parse_keyword_list(&text),
        };
        RoleProfile::new(entry.name.trim(), keywords, entry.importance)
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RoleCatalog {
    pub fn builtin() -> Self {
        Self {
            roles: builtin::builtin_roles(),
        }
    }

    /// Build a catalog, rejecting blank or duplicate (case-insensitive) role names.
    pub fn from_roles(roles: Vec<RoleProfile>) -> Result<Self> {
        if roles.is_empty() {
            return Err(CvMatcherError::Catalog("Catalog contains no roles".to_string()));
        }

        let mut seen = HashSet::new();
        for role in &roles {
            let key = role.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(CvMatcherError::Catalog("Role with an empty name".to_string()));
            }
            if !seen.insert(key) {
                return Err(CvMatcherError::Catalog(format!("Duplicate role: {}", role.name)));
            }
        }

        Ok(Self { roles })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

        match FileType::from_extension(extension) {
            FileType::Csv => {
                let file = std::fs::File::open(path)?;
                Self::from_csv_reader(file)
            }
            FileType::Toml => Self::from_toml_str(&std::fs::read_to_string(path)?),
            FileType::Json => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(CvMatcherError::UnsupportedFormat(format!(
                "Role catalog must be CSV, TOML or JSON: {}",
                path.display()
            ))),
        }
    }

    /// Load `path` when given; otherwise, or on any failure, use the bundled catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> LoadedCatalog {
        let Some(path) = path else {
            return LoadedCatalog {
                catalog: Self::builtin(),
                origin: CatalogOrigin::Builtin { reason: None },
            };
        };

        match Self::load(path) {
            Ok(catalog) => {
                info!("Loaded {} roles from {}", catalog.len(), path.display());
                LoadedCatalog {
                    catalog,
                    origin: CatalogOrigin::File(path.to_path_buf()),
                }
            }
            Err(e) => {
                warn!("Falling back to bundled role catalog: {}", e);
                LoadedCatalog {
                    catalog: Self::builtin(),
                    origin: CatalogOrigin::Builtin {
                        reason: Some(e.to_string()),
                    },
                }
            }
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut roles = Vec::new();
        for record in csv_reader.deserialize::<CsvRoleRecord>() {
            let record = record?;
            let importance = match record.importance.as_deref() {
                Some(level) => level.parse()?,
                None => Importance::default(),
            };
            roles.push(RoleProfile::from_keyword_list(record.role.trim(), &record.keywords, importance));
        }

        Self::from_roles(roles)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RoleFile = toml::from_str(content)
            .map_err(|e| CvMatcherError::Catalog(format!("Failed to parse TOML catalog: {}", e)))?;
        Self::from_roles(file.roles.into_iter().map(RoleProfile::from).collect())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: RoleFile = serde_json::from_str(content)?;
        Self::from_roles(file.roles.into_iter().map(RoleProfile::from).collect())
    }

    /// Case-insensitive lookup with a closest-name suggestion on a miss.
    pub fn get(&self, name: &str) -> Result<&RoleProfile> {
        let wanted = name.trim().to_lowercase();

        if let Some(role) = self.roles.iter().find(|r| r.name.to_lowercase() == wanted) {
            return Ok(role);
        }

        let suggestion = self
            .roles
            .iter()
            .map(|r| (jaro_winkler(&wanted, &r.name.to_lowercase()), r))
            .filter(|(similarity, _)| *similarity >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, r)| r.name.clone());

        Err(CvMatcherError::RoleNotFound {
            role: name.to_string(),
            suggestion,
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleProfile> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
