// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::model::Config as SessionConfig;

/// Top-level engine configuration: the default per-session knobs overlaid
/// onto every request, plus logging.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoggerConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file {:?}", path.as_ref()))?;
        let mut cfg: EngineConfig = serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants. The per-field `Config::new` constructor already
    /// rejects zero values at request time; this pass catches them earlier,
    /// at config-load time, for a better error message.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        ensure!(
            self.session.max_response_var_binds_per_pdu != Some(0),
            "session.max_response_var_binds_per_pdu must be >= 1"
        );
        ensure!(
            self.session.max_async_sessions != Some(0),
            "session.max_async_sessions must be >= 1"
        );
        Ok(())
    }
}
