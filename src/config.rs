//! User configuration and git config lookups.

use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};

/// Front-end user configuration relevant to this core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserConfig {
    /// Preferred editor command line; the highest-priority editor source.
    pub edit_command: Option<String>,
}

/// Read-only access to the VCS's own configuration.
pub trait GitConfig {
    /// Value for `key`, or `None` when unset or empty.
    fn get(&self, key: &str) -> Option<String>;
}

/// `git config --get` backed reader.
pub struct GitConfigReader {
    dir: PathBuf,
}

impl GitConfigReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl GitConfig for GitConfigReader {
    fn get(&self, key: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--get", key])
            .current_dir(&self.dir)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!value.is_empty()).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_command_defaults_to_none() {
        assert!(UserConfig::default().edit_command.is_none());
    }

    #[test]
    fn deserializes_kebab_case_keys() {
        let config: UserConfig = toml::from_str("edit-command = \"code --wait\"").unwrap();
        assert_eq!(config.edit_command.as_deref(), Some("code --wait"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.edit_command.is_none());
    }
}
