use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::MatchPolicy;
use crate::model::AssetKind;
use crate::reconstruct::ViewBoxHeuristic;

/// Output file prefixes, one per asset kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePrefixes {
    #[serde(default = "default_svg_path_prefix")]
    pub svg_path: String,
    #[serde(default = "default_base64_image_prefix")]
    pub base64_image: String,
    #[serde(default = "default_inline_svg_prefix")]
    pub inline_svg: String,
}

fn default_svg_path_prefix() -> String {
    AssetKind::VectorPath.default_prefix().to_string()
}

fn default_base64_image_prefix() -> String {
    AssetKind::EncodedImage.default_prefix().to_string()
}

fn default_inline_svg_prefix() -> String {
    AssetKind::InlineMarkup.default_prefix().to_string()
}

impl Default for FilePrefixes {
    fn default() -> Self {
        Self {
            svg_path: default_svg_path_prefix(),
            base64_image: default_base64_image_prefix(),
            inline_svg: default_inline_svg_prefix(),
        }
    }
}

impl FilePrefixes {
    pub fn for_kind(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::VectorPath => &self.svg_path,
            AssetKind::EncodedImage => &self.base64_image,
            AssetKind::InlineMarkup => &self.inline_svg,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    #[serde(default)]
    pub viewbox: ViewBoxHeuristic,
    #[serde(default)]
    pub match_policy: MatchPolicy,
    /// Process files on a thread pool.
    #[serde(default)]
    pub parallel: bool,
    /// Remove a source file's output directory before writing into it.
    #[serde(default = "default_true")]
    pub clean_output: bool,
    #[serde(default)]
    pub prefixes: FilePrefixes,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            viewbox: ViewBoxHeuristic::default(),
            match_policy: MatchPolicy::default(),
            parallel: false,
            clean_output: true,
            prefixes: FilePrefixes::default(),
        }
    }
}

/// Serializable tool configuration, stored as JSON or YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalvageConfig {
    /// Schema/config version. This is about the config format, not the tool version.
    pub config_version: String,
    #[serde(flatten)]
    pub pipeline: PipelineOptions,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self { config_version: "0.1.0".to_string(), pipeline: PipelineOptions::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

fn config_format(path: &Path) -> Result<ConfigFormat> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or_default() {
        "json" => Ok(ConfigFormat::Json),
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        other => Err(anyhow!(
            "Unsupported config extension '{}' for {}. Allowed: json, yaml, yml",
            other,
            path.display()
        )),
    }
}

/// Load a config file, picking the format from its extension.
pub fn load_config(path: &Path) -> Result<SalvageConfig> {
    let format = config_format(path)?;
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config = match format {
        ConfigFormat::Json => serde_json::from_str(&body).context("Failed to parse config JSON")?,
        ConfigFormat::Yaml => serde_yaml::from_str(&body).context("Failed to parse config YAML")?,
    };
    Ok(config)
}

/// Write a config file in the format implied by its extension.
pub fn save_config(path: &Path, config: &SalvageConfig) -> Result<()> {
    let body = match config_format(path)? {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    std::fs::write(path, body)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
