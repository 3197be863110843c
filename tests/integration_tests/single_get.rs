// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    buffer::parse_buffer,
    model::{Config, SnmpErrorKind, SnmpResponseKind},
    session::{Session, SessionStatus},
    transport::{NO_SUCH_INSTANCE, Pdu, PduKind, TransportEvent, VarBind, mock::MockTransport},
};

use crate::integration_tests::common::{get_request, oid};

/// S1: a single GET, single value, comes back successful with one record.
#[test]
fn single_value_get_succeeds() {
    let root = oid(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    let mut transport = MockTransport::new();
    transport.script(vec![TransportEvent::Received(Pdu {
        kind: PduKind::Response,
        non_repeaters: 0,
        max_repetitions: 0,
        err_stat: 0,
        err_index: 0,
        var_binds: vec![VarBind {
            name: root.clone(),
            value_type: 4,
            value: b"Linux".to_vec(),
        }],
    })]);

    let mut session = Session::open(
        get_request("h", root),
        Config::default_full(),
        &mut transport,
    );
    session.send(&mut transport);
    session.read(&mut transport);
    assert_eq!(session.status(), SessionStatus::Closed);

    let response = session.get_response();
    assert_eq!(response.kind(), SnmpResponseKind::Successful);
    assert!(response.errors().is_empty());

    let view = parse_buffer(&response.results()).expect("parses");
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].root_oid_index, 0);
    assert!(view.records[0].index.is_empty());
    assert_eq!(view.records[0].value_type, 4);
    assert_eq!(view.records[0].value, b"Linux");
}

/// S2: a GET that comes back NO_SUCH_INSTANCE is a warning, not data.
#[test]
fn get_returning_no_such_instance_is_a_warning() {
    let root = oid(&[1, 3, 6, 1, 2, 1, 1, 99, 0]);
    let mut transport = MockTransport::new();
    transport.script(vec![TransportEvent::Received(Pdu {
        kind: PduKind::Response,
        non_repeaters: 0,
        max_repetitions: 0,
        err_stat: 0,
        err_index: 0,
        var_binds: vec![VarBind {
            name: root.clone(),
            value_type: NO_SUCH_INSTANCE,
            value: vec![],
        }],
    })]);

    let mut session = Session::open(
        get_request("h", root),
        Config::default_full(),
        &mut transport,
    );
    session.send(&mut transport);
    session.read(&mut transport);

    let response = session.get_response();
    assert_eq!(response.kind(), SnmpResponseKind::Failed);
    let view = parse_buffer(&response.results()).expect("parses");
    assert!(view.records.is_empty());
    assert_eq!(response.errors().len(), 1);
    assert_eq!(response.errors()[0].kind(), SnmpErrorKind::ValueWarning);
}
