// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

/// Install a global `tracing` subscriber writing to stderr. `level` is a
/// `tracing` filter directive (`"info"`, `"snmp_stream_rs=debug"`, ...); an
/// unparsable value falls back to `RUST_LOG`.
pub fn init_logger(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .context("failed to parse log level from config or env")?;

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set global default subscriber: {e}"))
}
