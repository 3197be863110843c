// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    manager::SessionManager,
    model::{Config, SnmpRequest, SnmpRequestType},
    transport::{TransportEvent, mock::MockTransport},
};

use crate::integration_tests::common::{oid, public_community};

/// S6: a tight `max_async_sessions` override on one request caps the whole
/// admission round, even though most requests use the looser default.
#[test]
fn one_tight_override_caps_the_whole_admission_round() {
    let mut manager = SessionManager::new(Config::default_full());
    let mut transport = MockTransport::new();

    let tight = Config::new(None, None, None, Some(3)).expect("valid");
    let first = SnmpRequest::new(
        SnmpRequestType::Get,
        "host-0",
        public_community(),
        vec![oid(&[1, 3, 6, 1])],
        None,
        None,
        Some(tight),
    )
    .expect("valid request");
    manager.add_request(first);

    for i in 1..25 {
        let request = SnmpRequest::new(
            SnmpRequestType::Get,
            format!("host-{i}"),
            public_community(),
            vec![oid(&[1, 3, 6, 1])],
            None,
            None,
            None,
        )
        .expect("valid request");
        manager.add_request(request);
    }
    assert_eq!(manager.pending_count(), 25);

    // Every session admitted this round times out on its first round-trip,
    // so they all close within the same `run()` tick and the post-harvest
    // active count drops back to zero — the admission ceiling is only
    // observable through how many stayed pending.
    for _ in 0..3 {
        transport.script(vec![TransportEvent::Timeout]);
    }

    let responses = manager.run(&mut transport).expect("three sessions admitted and closed");
    assert_eq!(responses.len(), 3);
    assert_eq!(manager.pending_count(), 22);
    assert_eq!(manager.active_count(), 0);
}
