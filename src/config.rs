//! Configuration management with YAML support

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub columns: ColumnsConfig,

    #[serde(default)]
    pub sheets: SheetsConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Keyword lists used to match loosely-named report headers onto
/// semantic fields. Matching is case-insensitive substring, first
/// header containing any keyword wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_agent_keywords")]
    pub agent: Vec<String>,

    #[serde(default = "default_office_keywords")]
    pub office: Vec<String>,

    #[serde(default = "default_current_keywords")]
    pub current: Vec<String>,

    #[serde(default = "default_following_keywords")]
    pub following: Vec<String>,
}

/// Sheet selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Sheet names tried in order before falling back to the first sheet
    #[serde(default = "default_preferred_sheets")]
    pub preferred: Vec<String>,
}

// Default value functions
fn default_database_path() -> String {
    "~/.local/share/pdp-tracker/pdp.db".to_string()
}

fn default_agent_keywords() -> Vec<String> {
    to_strings(&["agent", "collector", "name", "employee"])
}

fn default_office_keywords() -> Vec<String> {
    to_strings(&["office", "location", "branch", "dept"])
}

fn default_current_keywords() -> Vec<String> {
    to_strings(&["current", "this month", "current month"])
}

fn default_following_keywords() -> Vec<String> {
    to_strings(&["following", "next month", "following month"])
}

fn default_preferred_sheets() -> Vec<String> {
    to_strings(&["Sheet1", "Data", "Report", "CollectorPerformance"])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            agent: default_agent_keywords(),
            office: default_office_keywords(),
            current: default_current_keywords(),
            following: default_following_keywords(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            preferred: default_preferred_sheets(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            columns: ColumnsConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./pdp.yaml (current directory)
    /// 3. ~/.config/pdp-tracker/pdp.yaml
    pub fn load(path: &str) -> Result<Self> {
        let search_paths = vec![
            shellexpand::tilde(path).to_string(),
            "pdp.yaml".to_string(),
            shellexpand::tilde("~/.config/pdp-tracker/pdp.yaml").to_string(),
        ];

        for search_path in &search_paths {
            if std::path::Path::new(search_path).exists() {
                let content = std::fs::read_to_string(search_path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    /// Get the database path, expanding ~ to home directory
    pub fn database_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.database.path).to_string();
        PathBuf::from(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.columns.agent[0], "agent");
        assert_eq!(config.sheets.preferred[0], "Sheet1");
        assert!(config.database.path.ends_with("pdp.db"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
database:
  path: ~/.local/share/pdp-tracker/test.db

columns:
  agent:
    - rep
    - salesperson

sheets:
  preferred:
    - PDP Export
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database.path, "~/.local/share/pdp-tracker/test.db");
        assert_eq!(config.columns.agent, vec!["rep", "salesperson"]);
        // Unspecified sections keep their defaults
        assert_eq!(config.columns.office[0], "office");
        assert_eq!(config.sheets.preferred, vec!["PDP Export"]);
    }
}
