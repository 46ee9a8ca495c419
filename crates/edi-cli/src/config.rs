//! Configuration file loading

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use edi_conformance::ConformanceConfig;
use edi_validation::ValidationConfig;
use serde::Deserialize;
use tracing::debug;

/// Defaults read from `--config`; command-line flags take precedence.
///
/// ```yaml
/// mapping_table: tables/orders.json
/// validation:
///   expected_message_type: ORDERS
///   check_counts: false
/// conformance:
///   mutated_sample_limit: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Mapping table, relative to the configuration file
    pub mapping_table: Option<PathBuf>,
    pub validation: ValidationConfig,
    pub conformance: ConformanceConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        };

        config.mapping_table = config.mapping_table.take().map(|table| match path.parent() {
            Some(dir) if table.is_relative() => dir.join(table),
            _ => table,
        });

        debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    pub fn override_message_type(&mut self, message_type: Option<String>) {
        if message_type.is_some() {
            self.validation.expected_message_type = message_type;
        }
    }

    pub fn override_mapping_table(&mut self, table: Option<PathBuf>) {
        if table.is_some() {
            self.mapping_table = table;
        }
    }
}
