use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::record::Faculty;

/// Settings for the interactive registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Colour headings and status lines.
    pub color: bool,
    /// Default `tracing` filter directive; `RUST_LOG` wins when set.
    pub log_level: String,
    /// Records loaded before the menu starts.
    pub seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            color: true,
            log_level: "warn".to_string(),
            seed_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config: AppConfig = parse_document(path)?;

        // Relative seed paths are resolved against the config file.
        if let Some(seed) = config.seed_file.take() {
            let resolved = match path.parent() {
                Some(dir) if seed.is_relative() => dir.join(seed),
                _ => seed,
            };
            config.seed_file = Some(resolved);
        }

        Ok(config)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    faculty: Vec<Faculty>,
}

/// Reads `[[faculty]]` tables (TOML) or `{"faculty": [...]}` (JSON).
pub fn load_seed(path: &Path) -> Result<Vec<Faculty>, ConfigError> {
    let document: SeedDocument = parse_document(path)?;

    for (index, faculty) in document.faculty.iter().enumerate() {
        faculty
            .validate()
            .map_err(|source| ConfigError::InvalidRecord { index, source })?;
    }

    tracing::debug!(
        path = %path.display(),
        records = document.faculty.len(),
        "loaded seed file"
    );
    Ok(document.faculty)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn detect(path: &Path, content: &str) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            _ => {
                let trimmed = content.trim_start();
                if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    Format::Json
                } else {
                    Format::Toml
                }
            }
        }
    }
}

fn parse_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match Format::detect(path, &content) {
        Format::Json => serde_json::from_str(&content).map_err(|err| ConfigError::parse(path, err)),
        Format::Toml => toml::from_str(&content).map_err(|err| ConfigError::parse(path, err)),
    }
}
