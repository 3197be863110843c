// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a [`Config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_response_var_binds_per_pdu must be >= 1")]
    ZeroVarBindsPerPdu,
    #[error("max_async_sessions must be >= 1")]
    ZeroMaxAsyncSessions,
}

/// Four optional numeric knobs controlling a session's transport behaviour.
/// Compose via the right-biased [`Config::overlay`]: each field is taken
/// from the right operand if present, else from the left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub retries: Option<u64>,
    #[serde(default)]
    pub timeout_s: Option<u64>,
    #[serde(default)]
    pub max_response_var_binds_per_pdu: Option<u64>,
    #[serde(default)]
    pub max_async_sessions: Option<u64>,
}

impl Config {
    pub fn new(
        retries: Option<u64>,
        timeout_s: Option<u64>,
        max_response_var_binds_per_pdu: Option<u64>,
        max_async_sessions: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if matches!(max_response_var_binds_per_pdu, Some(0)) {
            return Err(ConfigError::ZeroVarBindsPerPdu);
        }
        if matches!(max_async_sessions, Some(0)) {
            return Err(ConfigError::ZeroMaxAsyncSessions);
        }
        Ok(Self {
            retries,
            timeout_s,
            max_response_var_binds_per_pdu,
            max_async_sessions,
        })
    }

    /// The process-wide default configuration: `(3, 3, 10, 10)`.
    pub fn default_full() -> Self {
        Self {
            retries: Some(3),
            timeout_s: Some(3),
            max_response_var_binds_per_pdu: Some(10),
            max_async_sessions: Some(10),
        }
    }

    /// Right-biased overlay: take each field from `other` if present, else
    /// from `self`. Associative and has `default_full()` as a left identity
    /// only when `self` is already fully populated — see the property test
    /// for the exact associativity guarantee this crate relies on.
    pub fn overlay(&self, other: Option<&Config>) -> Config {
        let Some(other) = other else {
            return *self;
        };
        Config {
            retries: other.retries.or(self.retries),
            timeout_s: other.timeout_s.or(self.timeout_s),
            max_response_var_binds_per_pdu: other
                .max_response_var_binds_per_pdu
                .or(self.max_response_var_binds_per_pdu),
            max_async_sessions: other.max_async_sessions.or(self.max_async_sessions),
        }
    }
}
