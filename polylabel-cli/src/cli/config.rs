//! Label settings loaded from YAML.
//!
//! Every field is optional; anything left out keeps the library default, and
//! command-line flags override whatever the file says.
//!
//! ```yaml
//! precision: 0.5
//! debug: true
//! parallel: true
//! deadline_ms: 200
//! format: svg
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use polylabel::{DEFAULT_PRECISION, LabelOptions};
use serde::{Deserialize, Serialize};

use super::common::OutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    #[serde(default = "default_precision")]
    pub precision: f64,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub parallel: bool,

    /// Per-polygon time limit in milliseconds
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            debug: false,
            parallel: false,
            deadline_ms: None,
            format: OutputFormat::default(),
        }
    }
}

impl LabelConfig {
    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    /// Search options for the library.
    pub fn options(&self) -> LabelOptions {
        LabelOptions {
            precision: self.precision,
            debug: self.debug,
            parallel: self.parallel,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}
