//! CV matcher: role keyword scoring and PDF report rendering

use clap::Parser;
use cv_matcher::catalog::{CatalogOrigin, LoadedCatalog, RoleCatalog};
use cv_matcher::cli::{self, Cli, Commands, ConfigAction, RolesAction};
use cv_matcher::config::Config;
use cv_matcher::error::{CvMatcherError, Result};
use cv_matcher::input::manager::InputManager;
use cv_matcher::output::formatter::{
    save_bytes_to_file, save_report_to_file, suggest_filename, MatchReport, ReportGenerator,
};
use cv_matcher::output::renderer::{RenderWarning, ReportRenderer};
use cv_matcher::processing::matcher::KeywordMatcher;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            role,
            text,
            profile,
            catalog,
            output,
            save,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(CvMatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let loaded = load_catalog(catalog.as_deref(), &config);
            let role = loaded.catalog.get(&role)?;

            let mut input_manager = InputManager::new();
            let candidate_text = match (text, profile) {
                (Some(text), _) => {
                    cli::validate_file_extension(&text, &["pdf", "txt", "md"])
                        .map_err(|e| CvMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
                    input_manager.extract_text(&text).await?
                }
                (None, Some(profile)) => input_manager.load_profile(&profile).await?.candidate_text(),
                (None, None) => {
                    return Err(CvMatcherError::InvalidInput(
                        "Either --text or --profile is required".to_string(),
                    ))
                }
            };

            info!("Matching {} characters against role '{}'", candidate_text.len(), role.name);
            let matcher = KeywordMatcher::new(config.importance_weights());
            let result = matcher.analyze(&candidate_text, role);
            let report = MatchReport::new(role.name.clone(), role.importance, result);

            let generator = ReportGenerator::with_options(config.output.color_output && save.is_none(), true);
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&content, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Render {
            profile,
            role,
            text,
            photo,
            catalog,
            out,
        } => {
            let mut input_manager = InputManager::new();
            let mut fields = input_manager.load_profile(&profile).await?;

            if let Some(photo) = photo {
                match input_manager.read_photo(&photo).await {
                    Ok(bytes) => fields = fields.with_photo(bytes),
                    Err(e) => {
                        warn!("Rendering without photo: {}", e);
                        println!("⚠️  Photo skipped: {}", e);
                    }
                }
            }

            let result = match role {
                Some(role) => {
                    let loaded = load_catalog(catalog.as_deref(), &config);
                    let role = loaded.catalog.get(&role)?;
                    let candidate_text = match text {
                        Some(text) => input_manager.extract_text(&text).await?,
                        None => fields.candidate_text(),
                    };
                    let matcher = KeywordMatcher::new(config.importance_weights());
                    let result = matcher.analyze(&candidate_text, role);
                    println!("🎯 {}: {}% ({})", role.name, result.percentage(), result.tier().label());
                    Some(result)
                }
                None => None,
            };

            let style = config.style_token()?;
            let renderer = ReportRenderer::new(&config.layout);
            let rendered = renderer.render(&fields, result.as_ref(), &style)?;

            for warning in &rendered.warnings {
                match warning {
                    RenderWarning::PhotoSkipped(reason) => println!("⚠️  Photo skipped: {}", reason),
                }
            }

            let path = output_path(out, &config.output.filename_prefix, &fields.name);
            save_bytes_to_file(&rendered.bytes, &path)?;
            println!(
                "✅ Rendered {} page(s) to {}",
                rendered.page_count,
                path.display()
            );
        }

        Commands::Roles { action } => match action {
            RolesAction::List { catalog } => {
                let loaded = load_catalog(catalog.as_deref(), &config);
                println!("📚 Roles ({})\n", loaded.catalog.len());
                for role in loaded.catalog.iter() {
                    println!("  • {} [{}] - {} keywords", role.name, role.importance, role.keywords.len());
                }
            }

            RolesAction::Show { name, catalog } => {
                let loaded = load_catalog(catalog.as_deref(), &config);
                let role = loaded.catalog.get(&name)?;
                println!("📋 {}\n", role.name);
                println!("Importance: {}", role.importance);
                println!("Keywords:");
                for keyword in &role.keywords {
                    println!("  • {}", keyword);
                }
            }
        },

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| CvMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

/// CLI flag first, then the configured catalog, then the built-in table.
fn load_catalog(cli_path: Option<&Path>, config: &Config) -> LoadedCatalog {
    let path = cli_path.or(config.catalog.path.as_deref());
    let loaded = RoleCatalog::load_or_builtin(path);

    if let CatalogOrigin::Builtin { reason: Some(reason) } = &loaded.origin {
        println!("⚠️  Using built-in roles: {}", reason);
    }
    loaded
}

fn output_path(out: Option<PathBuf>, prefix: &str, name: &str) -> PathBuf {
    let filename = suggest_filename(prefix, name);
    match out {
        Some(path) if path.is_dir() => path.join(filename),
        Some(path) => path,
        None => PathBuf::from(filename),
    }
}
