//! Flow configuration: predicate, fallback label and node palette.

use serde::{Deserialize, Serialize};

use crate::model::{Role, IS_INPUT_OF};
use crate::{Error, Result};

/// Label used for objects without a usable name.
pub const UNNAMED_OBJECT: &str = "Unnamed Object";

/// Pipeline configuration.
///
/// Every field has a default, so `{}` is a valid JSON configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowConfig {
    /// Relationship predicate the flow is built from.
    pub predicate: String,
    /// Name shown for objects with a missing or blank name.
    pub unnamed_label: String,
    pub palette: Palette,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            predicate: IS_INPUT_OF.to_string(),
            unnamed_label: UNNAMED_OBJECT.to_string(),
            palette: Palette::default(),
        }
    }
}

impl FlowConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FlowConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.predicate.trim().is_empty() {
            return Err(Error::Config("predicate must not be empty".into()));
        }
        for role in [Role::Input, Role::Output, Role::Intermediate] {
            if self.palette.color_for(role).trim().is_empty() {
                return Err(Error::Config(format!("palette color for {role} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Node colors by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub input: String,
    pub output: String,
    pub intermediate: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            input: "#4caf50".to_string(),
            output: "#f44336".to_string(),
            intermediate: "#9e9e9e".to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, role: Role) -> &str {
        match role {
            Role::Input => &self.input,
            Role::Output => &self.output,
            Role::Intermediate => &self.intermediate,
        }
    }
}
