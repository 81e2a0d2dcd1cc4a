//! Engine and display configuration.
//!
//! User config lives at `~/.config/sitegraph/sitegraph.toml`. Every section
//! is optional; anything left out falls back to the built-in defaults.

use crate::classify::ClusterRule;
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default config location, before tilde expansion
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/sitegraph/sitegraph.toml";

/// Top-level configuration, deserialized from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitegraphConfig {
    /// Indexability values that mean "indexable" (compared case-insensitively)
    #[serde(default = "default_indexable_tokens")]
    pub indexable_tokens: Vec<String>,

    #[serde(default)]
    pub columns: ColumnAliases,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub cluster_rules: Vec<ClusterRule>,
}

impl Default for SitegraphConfig {
    fn default() -> Self {
        Self {
            indexable_tokens: default_indexable_tokens(),
            columns: ColumnAliases::default(),
            display: DisplayConfig::default(),
            cluster_rules: Vec::new(),
        }
    }
}

/// Accepted CSV header names per canonical field, in priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAliases {
    #[serde(default = "default_url_aliases")]
    pub url: Vec<String>,
    #[serde(default = "default_title_aliases")]
    pub title: Vec<String>,
    #[serde(default = "default_content_type_aliases")]
    pub content_type: Vec<String>,
    #[serde(default = "default_inlinks_aliases")]
    pub inlinks: Vec<String>,
    #[serde(default = "default_crawl_depth_aliases")]
    pub crawl_depth: Vec<String>,
    #[serde(default = "default_indexability_aliases")]
    pub indexability: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            url: default_url_aliases(),
            title: default_title_aliases(),
            content_type: default_content_type_aliases(),
            inlinks: default_inlinks_aliases(),
            crawl_depth: default_crawl_depth_aliases(),
            indexability: default_indexability_aliases(),
        }
    }
}

/// `[display]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rendered edge length for a single observation; divided by the count
    #[serde(default = "default_edge_length_base")]
    pub edge_length_base: f64,

    /// Node labels longer than this are truncated with an ellipsis
    #[serde(default = "default_label_max_len")]
    pub label_max_len: usize,

    /// Node count above which a renderer should offer clustering
    #[serde(default = "default_cluster_threshold")]
    pub cluster_threshold: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            edge_length_base: default_edge_length_base(),
            label_max_len: default_label_max_len(),
            cluster_threshold: default_cluster_threshold(),
        }
    }
}

/// A standalone rules file: only `[[cluster_rules]]` entries
#[derive(Debug, Clone, Default, Deserialize)]
struct RulesFile {
    #[serde(default)]
    cluster_rules: Vec<ClusterRule>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_url_aliases() -> Vec<String> {
    strings(&["URL", "Address", "العنوان"])
}
fn default_title_aliases() -> Vec<String> {
    strings(&["Title 1", "Title", "العنوان ١", "العنوان"])
}
fn default_content_type_aliases() -> Vec<String> {
    strings(&["Content Type", "Content", "نوع المحتوى"])
}
fn default_inlinks_aliases() -> Vec<String> {
    strings(&["Inlinks", "No. of Inlinks", "الروابط الداخلية الواردة"])
}
fn default_crawl_depth_aliases() -> Vec<String> {
    strings(&["Crawl Depth", "Crawl depth", "عمق الزحف"])
}
fn default_indexability_aliases() -> Vec<String> {
    strings(&[
        "Indexability",
        "Indexability Status",
        "Indexable",
        "القابلية للفهرسة",
    ])
}
fn default_indexable_tokens() -> Vec<String> {
    strings(&["indexable", "قابل للفهرسة"])
}
fn default_edge_length_base() -> f64 {
    350.0
}
fn default_label_max_len() -> usize {
    25
}
fn default_cluster_threshold() -> usize {
    500
}

impl SitegraphConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GraphError::Config(e.to_string()))
    }

    /// Load the config at `path`, or the defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!(
            "Loaded config from {} ({} cluster rules)",
            path.display(),
            config.cluster_rules.len()
        );
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GraphError::Config(e.to_string()))
    }
}

/// Parse a rules file holding `[[cluster_rules]]` tables
pub fn parse_rules(content: &str) -> Result<Vec<ClusterRule>> {
    let file: RulesFile =
        toml::from_str(content).map_err(|e| GraphError::Config(e.to_string()))?;
    Ok(file.cluster_rules)
}

/// Read and parse a rules file from disk
pub fn load_rules(path: &Path) -> Result<Vec<ClusterRule>> {
    let content = fs::read_to_string(path)?;
    parse_rules(&content)
}
