//! Configuration for the upgrade pipeline.

use serde::{Deserialize, Serialize};

use crate::declaration::is_constant_path;
use crate::error::UpgradeError;

/// Options for upgrading a source unit.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (`legacy-namespace`,
/// `base-namespace`), which is also the format of the CLI `--config` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UpgradeOptions {
    /// Namespace owning the legacy `<Kind>Type.define` builders and the
    /// `Schema::` base classes. Default: `GraphQL`.
    pub legacy_namespace: String,
    /// Namespace holding the application's `Base<Kind>` classes that
    /// upgraded types inherit from. Default: `Types`.
    pub base_namespace: String,
}

impl Default for UpgradeOptions {
    fn default() -> Self {
        Self {
            legacy_namespace: "GraphQL".to_string(),
            base_namespace: "Types".to_string(),
        }
    }
}

impl UpgradeOptions {
    /// Parse options from a JSON document and validate them.
    ///
    /// Missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self, UpgradeError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that both namespaces are Ruby constant paths (`A::B::C`), each
    /// segment starting with an uppercase letter.
    pub fn validate(&self) -> Result<(), UpgradeError> {
        validate_constant_path("legacy-namespace", &self.legacy_namespace)?;
        validate_constant_path("base-namespace", &self.base_namespace)
    }
}

fn validate_constant_path(option: &str, value: &str) -> Result<(), UpgradeError> {
    if is_constant_path(value) {
        return Ok(());
    }
    Err(UpgradeError::InvalidOption {
        option: option.to_string(),
        message: format!("`{value}` is not a Ruby constant path"),
    })
}
