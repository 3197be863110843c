// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::cfg::config::EngineConfig;

#[test]
fn parses_a_minimal_yaml_document() {
    let yaml = "session:\n  max_response_var_binds_per_pdu: 25\nlogger:\n  level: debug\n";
    let mut cfg: EngineConfig = serde_yaml::from_str(yaml).expect("parses");
    cfg.validate_and_normalize().expect("valid");
    assert_eq!(cfg.session.max_response_var_binds_per_pdu, Some(25));
    assert_eq!(cfg.logger.level, "debug");
}

#[test]
fn an_empty_document_falls_back_to_defaults() {
    let mut cfg: EngineConfig = serde_yaml::from_str("{}").expect("parses");
    cfg.validate_and_normalize().expect("valid");
    assert_eq!(cfg.logger.level, "info");
    assert_eq!(cfg.session.max_response_var_binds_per_pdu, None);
}
