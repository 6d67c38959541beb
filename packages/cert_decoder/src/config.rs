//! Decoder settings, loadable from a JSON file

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CertError, Result};

/// Tunables for decoding and for the validity summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Extension scanning stops once fewer than this many bytes remain
    #[serde(default = "default_extension_scan_margin")]
    pub extension_scan_margin: usize,
    /// Days before notAfter at which a valid certificate counts as expiring soon
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: i64,
}

fn default_extension_scan_margin() -> usize {
    10
}

fn default_expiry_warning_days() -> i64 {
    30
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            extension_scan_margin: default_extension_scan_margin(),
            expiry_warning_days: default_expiry_warning_days(),
        }
    }
}

impl DecoderConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CertError::config(format!("reading {}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON config document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CertError::config(format!("invalid config: {e}")))
    }
}
