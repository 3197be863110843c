// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result};
use clap::Parser;
use snmp_stream_rs::{
    buffer::parse_buffer,
    cfg::{cli::resolve_config_path, config::EngineConfig, logger::init_logger},
    manager::SessionManager,
    model::{Community, SnmpRequest, SnmpRequestType, Version},
    oid::ObjectIdentity,
    transport::{END_OF_MIB_VIEW, Pdu, PduKind, TransportEvent, VarBind, mock::MockTransport},
};
use tracing::info;

/// Run a one-shot SNMP bulk collection against a scripted mock transport.
///
/// This binary demonstrates wiring a `SessionManager` to a transport and
/// draining it to completion; it does not speak real SNMP (see the crate's
/// transport boundary documentation for what a production transport needs).
#[derive(Debug, Parser)]
struct Args {
    /// Path to a YAML engine config (default knobs + logging level).
    #[arg(long, default_value = "config/engine.yaml")]
    config: String,

    /// Target host to query.
    #[arg(long, default_value = "demo-switch.local")]
    host: String,

    /// SNMP community string.
    #[arg(long, default_value = "public")]
    community: String,

    /// Dotted root OID to walk, e.g. `.1.3.6.1.2.1.1`.
    #[arg(long, default_value = ".1.3.6.1.2.1.1")]
    root_oid: String,
}

fn parse_dotted_oid(s: &str) -> Result<ObjectIdentity> {
    let sub_ids = s
        .trim_start_matches('.')
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|part| part.parse::<u64>().with_context(|| format!("invalid sub-identifier {part:?}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(ObjectIdentity::from_slice(&sub_ids))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let engine_config = resolve_config_path(&args.config)
        .and_then(EngineConfig::load_from_file)
        .unwrap_or_default();
    if let Err(e) = init_logger(&engine_config.logger.level) {
        eprintln!("warning: failed to initialize logger: {e}");
    }

    let root = parse_dotted_oid(&args.root_oid)?;
    let request = SnmpRequest::new(
        SnmpRequestType::Walk,
        args.host.clone(),
        Community::new(args.community.clone(), Version::V2C),
        vec![root.clone()],
        None,
        Some("demo".to_string()),
        Some(engine_config.session),
    )
    .context("failed to construct request")?;

    let mut manager = SessionManager::new(engine_config.session);
    manager.add_request(request);

    // No real transport is wired up yet (see the crate's transport boundary
    // docs) — script two response rounds so the demo walk terminates after
    // collecting a couple of records instead of hanging.
    let first = root.concat(&ObjectIdentity::from_slice(&[1]));
    let second = root.concat(&ObjectIdentity::from_slice(&[2]));
    let mut transport = MockTransport::new();
    transport.script(vec![
        TransportEvent::Received(Pdu {
            kind: PduKind::Response,
            non_repeaters: 0,
            max_repetitions: 0,
            err_stat: 0,
            err_index: 0,
            var_binds: vec![
                VarBind {
                    name: first,
                    value_type: 4,
                    value: b"demo-value-a".to_vec(),
                },
                VarBind {
                    name: second.clone(),
                    value_type: 4,
                    value: b"demo-value-b".to_vec(),
                },
            ],
        }),
        TransportEvent::Received(Pdu {
            kind: PduKind::Response,
            non_repeaters: 0,
            max_repetitions: 0,
            err_stat: 0,
            err_index: 0,
            var_binds: vec![VarBind {
                name: second,
                value_type: END_OF_MIB_VIEW,
                value: vec![],
            }],
        }),
    ]);
    info!(host = %args.host, "starting demo collection against a mock transport");

    loop {
        let Some(responses) = manager.run(&mut transport) else {
            if manager.active_count() == 0 && manager.pending_count() == 0 {
                break;
            }
            continue;
        };
        for response in responses {
            info!(kind = %response.kind(), errors = response.errors().len(), "session complete");
            let view = parse_buffer(&response.results()).context("result buffer did not parse")?;
            for record in view.records {
                println!("{:?} index={:?} value={:?}", response.kind(), record.index, record.value);
            }
        }
    }

    Ok(())
}
