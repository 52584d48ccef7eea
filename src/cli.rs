//! CLI interface for the CV matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-matcher")]
#[command(about = "Score a CV against a job role and render it as a PDF")]
#[command(long_about = "Match candidate text against a catalog of job roles by weighted keyword coverage, and render a paginated, styled CV report with the match score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score candidate text against a role
    Analyze {
        /// Role name from the catalog
        #[arg(short, long)]
        role: String,

        /// Resume text file (PDF, TXT, MD)
        #[arg(short, long, conflicts_with = "profile", required_unless_present = "profile")]
        text: Option<PathBuf>,

        /// Profile file (TOML, JSON); its fields are used as the candidate text
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Role catalog (CSV, TOML, JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Render a CV report as PDF
    Render {
        /// Profile file (TOML, JSON)
        #[arg(short, long)]
        profile: PathBuf,

        /// Include a match score for this role
        #[arg(short, long)]
        role: Option<String>,

        /// Resume text used for matching instead of the profile fields
        #[arg(short, long, requires = "role")]
        text: Option<PathBuf>,

        /// Profile photo (PNG, JPEG, BMP, GIF)
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Role catalog (CSV, TOML, JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output file or directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Inspect the role catalog
    Roles {
        #[command(subcommand)]
        action: RolesAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum RolesAction {
    /// List role names
    List {
        /// Role catalog (CSV, TOML, JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show a role's keywords and importance
    Show {
        /// Role name
        name: String,

        /// Role catalog (CSV, TOML, JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
