//! Configuration management for the cv matcher

use crate::error::{CvMatcherError, Result};
use crate::output::style::{HeaderLayout, Rgb, StyleToken};
use crate::processing::matcher::ImportanceWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minimum vertical room (in points) the margins must leave on a page.
const MIN_CONTENT_HEIGHT: f32 = 200.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub layout: LayoutConfig,
    pub style: StyleConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub high_weight: f64,
    pub medium_weight: f64,
    pub low_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Page dimensions in points (width, height).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub top_margin: f32,
    /// A new page starts once the cursor would pass this distance from the bottom edge.
    pub bottom_margin: f32,
    pub side_margin: f32,
    pub max_listed_keywords: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub primary: String,
    pub accent: String,
    pub header: HeaderLayout,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub filename_prefix: String,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                high_weight: 2.0,
                medium_weight: 1.5,
                low_weight: 1.0,
            },
            layout: LayoutConfig {
                page_size: PageSize::A4,
                top_margin: 60.0,
                bottom_margin: 150.0,
                side_margin: 56.0,
                max_listed_keywords: 15,
            },
            style: StyleConfig {
                primary: "#1F3A5F".to_string(),
                accent: "#4A90C2".to_string(),
                header: HeaderLayout::Centered,
            },
            catalog: CatalogConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                filename_prefix: "CV".to_string(),
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file without touching the default location.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CvMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("high_weight", self.scoring.high_weight),
            ("medium_weight", self.scoring.medium_weight),
            ("low_weight", self.scoring.low_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(CvMatcherError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let (width, height) = self.layout.page_size.dimensions();
        let content_height = height - self.layout.top_margin - self.layout.bottom_margin;
        if self.layout.top_margin < 0.0 || self.layout.bottom_margin < 0.0 || content_height < MIN_CONTENT_HEIGHT {
            return Err(CvMatcherError::Configuration(format!(
                "layout margins leave {:.0}pt of content height (minimum {:.0}pt)",
                content_height, MIN_CONTENT_HEIGHT
            )));
        }
        if self.layout.side_margin < 0.0 || width - 2.0 * self.layout.side_margin < MIN_CONTENT_HEIGHT {
            return Err(CvMatcherError::Configuration(
                "layout.side_margin leaves too little content width".to_string(),
            ));
        }
        if self.layout.max_listed_keywords == 0 {
            return Err(CvMatcherError::Configuration(
                "layout.max_listed_keywords must be at least 1".to_string(),
            ));
        }

        self.style_token()?;
        Ok(())
    }

    pub fn importance_weights(&self) -> ImportanceWeights {
        ImportanceWeights {
            high: self.scoring.high_weight,
            medium: self.scoring.medium_weight,
            low: self.scoring.low_weight,
        }
    }

    pub fn style_token(&self) -> Result<StyleToken> {
        Ok(StyleToken {
            primary: Rgb::from_hex(&self.style.primary)?,
            accent: Rgb::from_hex(&self.style.accent)?,
            layout: self.style.header,
        })
    }
}
