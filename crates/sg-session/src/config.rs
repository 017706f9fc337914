use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where composites are written and how their files are named.
///
/// Output names follow `{prefix}_{label}_{index:03}.{extension}` inside
/// `output_dir`. The extension also selects the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: "stereoscopic".to_string(),
            extension: "jpg".to_string(),
        }
    }
}
