//! Input manager for profiles, resume text and photos

use crate::error::{CvMatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::output::report::ReportFields;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Photos above this size are refused before decoding.
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a resume body from PDF, plain text or Markdown.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        ensure_exists(path)?;

        let text = match detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                return Err(CvMatcherError::UnsupportedFormat(format!(
                    "Unsupported resume file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load and validate a profile written as TOML or JSON.
    pub async fn load_profile(&self, path: &Path) -> Result<ReportFields> {
        ensure_exists(path)?;

        let content = fs::read_to_string(path).await?;
        let fields: ReportFields = match detect_file_type(path)? {
            FileType::Toml => toml::from_str(&content).map_err(|e| {
                CvMatcherError::InvalidInput(format!("Failed to parse profile '{}': {}", path.display(), e))
            })?,
            FileType::Json => serde_json::from_str(&content)?,
            _ => {
                return Err(CvMatcherError::UnsupportedFormat(format!(
                    "Profile must be TOML or JSON: {}",
                    path.display()
                )));
            }
        };

        fields.validate()?;
        info!("Loaded profile for '{}' from {}", fields.name, path.display());
        Ok(fields)
    }

    /// Read photo bytes. Decoding is left to the renderer.
    pub async fn read_photo(&self, path: &Path) -> Result<Vec<u8>> {
        ensure_exists(path)?;

        if detect_file_type(path)? != FileType::Image {
            return Err(CvMatcherError::UnsupportedFormat(format!(
                "Photo must be PNG, JPEG, BMP or GIF: {}",
                path.display()
            )));
        }

        let metadata = fs::metadata(path).await?;
        if metadata.len() == 0 {
            return Err(CvMatcherError::InvalidInput(format!("Photo file is empty: {}", path.display())));
        }
        if metadata.len() > MAX_PHOTO_BYTES {
            return Err(CvMatcherError::InvalidInput(format!(
                "Photo too large: {:.1}MB (max 10MB)",
                metadata.len() as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(fs::read(path).await?)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CvMatcherError::InvalidInput(format!("File does not exist: {}", path.display())))
    }
}

fn detect_file_type(path: &Path) -> Result<FileType> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| CvMatcherError::InvalidInput(format!("File has no extension: {}", path.display())))?;

    Ok(FileType::from_extension(extension))
}
