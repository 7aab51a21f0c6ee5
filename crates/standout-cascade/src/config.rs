//! Registry and compiler configuration.

use serde::{Deserialize, Serialize};

use crate::compile::CompileOptions;

/// Settings shared by a registry and the compilers that feed it.
///
/// Every field has a default, so a YAML document only needs the keys it
/// changes:
///
/// ```rust
/// use standout_cascade::CascadeConfig;
///
/// let config = CascadeConfig::from_yaml("class_prefix: ui\nextract_variables: true").unwrap();
/// assert_eq!(config.class_prefix, "ui");
/// assert!(config.extract_variables);
/// assert_eq!(config.variable_prefix, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CascadeConfig {
    /// Prefix of every generated identifier (`<prefix>-<hash>`).
    pub class_prefix: String,
    /// Prefix inserted into extracted variable names (`--<prefix>-<key>`).
    pub variable_prefix: Option<String>,
    /// Whether compilers extract render-time values into variables by default.
    pub extract_variables: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            class_prefix: "sc".to_string(),
            variable_prefix: None,
            extract_variables: false,
        }
    }
}

impl CascadeConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Compile options seeded from this configuration.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            extract_variables: self.extract_variables,
            variable_prefix: self.variable_prefix.clone(),
        }
    }
}
