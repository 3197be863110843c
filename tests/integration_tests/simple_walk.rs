// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    buffer::parse_buffer,
    model::{Config, SnmpResponseKind},
    session::{Session, SessionStatus},
    transport::{Pdu, PduKind, TransportEvent, VarBind, mock::MockTransport},
};

use crate::integration_tests::common::{oid, walk_request};

fn vb(oid: snmp_stream_rs::oid::ObjectIdentity, value_type: u8, value: &[u8]) -> VarBind {
    VarBind {
        name: oid,
        value_type,
        value: value.to_vec(),
    }
}

/// S3: a WALK over one column collects every in-subtree value and discards
/// an overrun var-bind that belongs to the next column.
#[test]
fn walk_collects_column_and_discards_overrun() {
    let root = oid(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2]);
    let next_column = oid(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 3, 1]);

    let mut transport = MockTransport::new();
    transport.script(vec![
        TransportEvent::Received(Pdu {
            kind: PduKind::Response,
            non_repeaters: 0,
            max_repetitions: 0,
            err_stat: 0,
            err_index: 0,
            var_binds: vec![
                vb(oid(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 1]), 4, b"lo"),
                vb(oid(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 2]), 4, b"eth0"),
                vb(oid(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3]), 4, b"eth1"),
            ],
        }),
        TransportEvent::Received(Pdu {
            kind: PduKind::Response,
            non_repeaters: 0,
            max_repetitions: 0,
            err_stat: 0,
            err_index: 0,
            var_binds: vec![vb(next_column, 2, b"\x06")],
        }),
    ]);

    let mut session = Session::open(
        walk_request("h", root),
        Config::default_full(),
        &mut transport,
    );
    session.send(&mut transport);
    session.read(&mut transport);
    assert_eq!(session.status(), SessionStatus::Idle);

    session.send(&mut transport);
    session.read(&mut transport);
    assert_eq!(session.status(), SessionStatus::Closed);

    let response = session.get_response();
    assert_eq!(response.kind(), SnmpResponseKind::Successful);
    assert!(response.errors().is_empty());

    let view = parse_buffer(&response.results()).expect("parses");
    assert_eq!(view.records.len(), 3);
    assert_eq!(view.records[0].index, vec![1]);
    assert_eq!(view.records[0].value, b"lo");
    assert_eq!(view.records[1].index, vec![2]);
    assert_eq!(view.records[1].value, b"eth0");
    assert_eq!(view.records[2].index, vec![3]);
    assert_eq!(view.records[2].value, b"eth1");
}
