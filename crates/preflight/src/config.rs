//! Configuration for the preflight CLI.
//!
//! An optional `.preflight.yaml` in the working directory sets default
//! traversal bounds; CLI flags always win over file values.

use std::fs;
use std::path::Path;

use anyhow::Context;
use preflight_graph::BuildOptions;
use serde::Deserialize;

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = ".preflight.yaml";

/// Preflight configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum BFS depth.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Maximum node count before truncation.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

fn default_max_depth() -> u32 {
    4
}

fn default_max_nodes() -> usize {
    400
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
        }
    }
}

impl Config {
    /// Load `.preflight.yaml` from `dir`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Fails when a present file cannot be read or parsed; a broken config
    /// is reported, not silently ignored.
    pub fn discover(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("config file {} is not valid YAML", path.display()))?;
        Ok(config)
    }

    /// Fold CLI flag overrides into this configuration and produce the
    /// traversal bounds.
    #[must_use]
    pub fn build_options(&self, max_depth: Option<u32>, max_nodes: Option<usize>) -> BuildOptions {
        BuildOptions {
            max_depth: max_depth.unwrap_or(self.max_depth),
            max_nodes: max_nodes.unwrap_or(self.max_nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_apply_without_a_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config::discover(dir.path()).expect("discover should succeed");
        assert_eq!(config, Config::default());
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_nodes, 400);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "max_depth: 2\n").expect("write config");

        let config = Config::discover(dir.path()).expect("discover should succeed");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_nodes, 400, "unset keys keep their defaults");
    }

    #[rstest]
    #[case(None, None, 2, 100)]
    #[case(Some(6), None, 6, 100)]
    #[case(None, Some(50), 2, 50)]
    #[case(Some(6), Some(50), 6, 50)]
    fn cli_flags_override_file_values(
        #[case] depth_flag: Option<u32>,
        #[case] nodes_flag: Option<usize>,
        #[case] expected_depth: u32,
        #[case] expected_nodes: usize,
    ) {
        let config = Config {
            max_depth: 2,
            max_nodes: 100,
        };
        let options = config.build_options(depth_flag, nodes_flag);
        assert_eq!(options.max_depth, expected_depth);
        assert_eq!(options.max_nodes, expected_nodes);
    }

    #[test]
    fn broken_config_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "max_depth: [oops\n").expect("write config");

        assert!(Config::discover(dir.path()).is_err());
    }
}
