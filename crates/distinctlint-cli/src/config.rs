//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::args::OutputFormat;

pub const CONFIG_FILE_NAME: &str = "distinctlint.toml";

/// Configuration for distinctlint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Source or unit file patterns to check
    #[serde(default)]
    pub files: Vec<String>,

    /// Output format (human, json, sarif)
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Worker threads for batch scanning
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        Ok(config)
    }

    /// Try to find and load distinctlint.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(
        mut self,
        files: &[PathBuf],
        format: Option<OutputFormat>,
        jobs: Option<usize>,
    ) -> Self {
        if !files.is_empty() {
            self.files = files.iter().map(|p| p.display().to_string()).collect();
        }

        if format.is_some() {
            self.format = format;
        }

        if jobs.is_some() {
            self.jobs = jobs;
        }

        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            files = ["src/**/*.abap"]
            format = "sarif"
            jobs = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.files, vec!["src/**/*.abap"]);
        assert_eq!(config.output_format(), OutputFormat::Sarif);
        assert_eq!(config.jobs, Some(4));
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let config = Config {
            files: vec!["a.abap".into()],
            format: Some(OutputFormat::Json),
            jobs: Some(2),
        }
        .merge_with_args(&[PathBuf::from("b.abap")], Some(OutputFormat::Human), None);

        assert_eq!(config.files, vec!["b.abap"]);
        assert_eq!(config.output_format(), OutputFormat::Human);
        assert_eq!(config.jobs, Some(2));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<Config, _> = toml::from_str(r#"format = "xml""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_format_defaults_to_human() {
        let config: Config = toml::from_str(r#"files = ["a.abap"]"#).unwrap();
        assert_eq!(config.format, None);
        assert_eq!(config.output_format(), OutputFormat::Human);
    }
}
