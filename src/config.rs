//! Lint configuration
//!
//! Handles loading `.strict-spacing.yaml` (or `.yml` / `.json`), discovered
//! by walking up from a start directory, and merging CLI overrides on top.

use crate::error::{Error, Result};
use crate::policy::{Policy, PolicyOption};
use crate::rule::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    ".strict-spacing.yaml",
    ".strict-spacing.yml",
    ".strict-spacing.json",
];

/// Extensions linted when a config does not list its own
pub const DEFAULT_EXTENSIONS: [&str; 8] = ["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

/// Configuration file (`.strict-spacing.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Severity of reported diagnostics
    #[serde(default)]
    pub severity: Severity,

    /// `always`, `never`, or `{ before, after }`; `always` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newline: Option<PolicyOption>,

    /// File extensions to lint during directory walks
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped during directory walks
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_version() -> u32 {
    1
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_ignore() -> Vec<String> {
    vec!["node_modules".to_string()]
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            severity: Severity::default(),
            newline: None,
            extensions: default_extensions(),
            ignore: default_ignore(),
        }
    }
}

/// Command-line overrides applied on top of a loaded config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub newline: Option<PolicyOption>,
    pub severity: Option<Severity>,
}

impl LintConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: LintConfig =
            serde_norway::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: LintConfig =
            serde_json::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let parsed = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };

        parsed.map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Find the nearest config file in `start_dir` or its ancestors
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }
        None
    }

    /// Load the nearest config file, or `None` if there is none
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        match Self::find(start_dir) {
            Some(path) => {
                let config = Self::load(&path)?;
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}",
                self.version
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides
    pub fn merge(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            newline: overrides.newline.or(self.newline),
            severity: overrides.severity.unwrap_or(self.severity),
            ..self.clone()
        }
    }

    pub fn policy(&self) -> Policy {
        Policy::resolve(self.newline.as_ref())
    }

    /// Whether a file with this extension is linted
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Mode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LintConfig::from_yaml("{}").unwrap();
        assert_eq!(config, LintConfig::default());
        assert_eq!(config.policy(), Policy::uniform(Mode::Always));
        assert!(config.accepts_extension("JS"));
        assert!(!config.accepts_extension("rs"));
    }

    #[test]
    fn test_yaml_split_policy() {
        let config = LintConfig::from_yaml(
            "severity: warning\nnewline:\n  before: never\n  after: always\n",
        )
        .unwrap();
        assert_eq!(config.severity, Severity::Warning);
        assert_eq!(
            config.policy(),
            Policy {
                before: Mode::Never,
                after: Mode::Always
            }
        );
    }

    #[test]
    fn test_json_uniform_policy() {
        let config = LintConfig::from_json(r#"{"newline": "never"}"#).unwrap();
        assert_eq!(config.policy(), Policy::uniform(Mode::Never));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            LintConfig::from_yaml("newline:\n  before: always\n"),
            Err(Error::Config(_))
        ));
        assert!(LintConfig::from_yaml("newline: sometimes\n").is_err());
        assert!(LintConfig::from_yaml("colour: blue\n").is_err());
        assert!(LintConfig::from_yaml("version: 2\n").is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let config = LintConfig::from_yaml("newline: never\n").unwrap();
        let merged = config.merge(&ConfigOverrides {
            newline: Some(PolicyOption::Uniform(Mode::Always)),
            severity: Some(Severity::Warning),
        });
        assert_eq!(merged.policy(), Policy::uniform(Mode::Always));
        assert_eq!(merged.severity, Severity::Warning);

        let untouched = config.merge(&ConfigOverrides::default());
        assert_eq!(untouched, config);
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(".strict-spacing.yml"), "newline: never\n").unwrap();

        let (path, config) = LintConfig::discover(&nested).unwrap().unwrap();
        assert_eq!(path, temp.path().join(".strict-spacing.yml"));
        assert_eq!(config.policy(), Policy::uniform(Mode::Never));
    }

    #[test]
    fn test_load_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".strict-spacing.json");
        fs::write(&path, r#"{"newline": {"after": "never"}}"#).unwrap();

        let err = LintConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains(".strict-spacing.json"));
    }
}
