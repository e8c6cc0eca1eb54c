//! Adapter configuration stored as TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::dispatch::DEFAULT_MAX_OUTPUTS;

/// Adapter configuration (TOML).
///
/// Missing fields default to the values in `AdapterConfig::default()`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Error code reported for internal faults. Must be non-zero.
    pub fault_code: i32,

    /// Upper bound on variables a single request may emit.
    pub max_outputs: usize,

    /// Media type of response documents.
    pub content_type: String,

    pub access: AccessConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccessConfig {
    /// Shared token required on every request. Unset disables the gate.
    pub token: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            fault_code: 5,
            max_outputs: DEFAULT_MAX_OUTPUTS,
            content_type: "text/xml".to_string(),
            access: AccessConfig::default(),
        }
    }
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fault_code == 0 {
            return Err(anyhow!("fault_code must be non-zero"));
        }
        if self.max_outputs == 0 {
            return Err(anyhow!("max_outputs must be > 0"));
        }
        if self.content_type.trim().is_empty() {
            return Err(anyhow!("content_type must be non-empty"));
        }
        if !self.content_type.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(anyhow!("content_type must be printable ASCII"));
        }
        if self.access.token.as_deref().is_some_and(str::is_empty) {
            return Err(anyhow!("access.token must be non-empty when set"));
        }
        Ok(())
    }

    /// Token the gate expects, if the gate is enabled.
    pub fn expected_token(&self) -> Option<&str> {
        self.access.token.as_deref()
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AdapterConfig::default()`.
pub fn load_config(path: &Path) -> Result<AdapterConfig> {
    if !path.exists() {
        let cfg = AdapterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AdapterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
