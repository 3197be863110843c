// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    model::Config,
    range::ObjectIdentityRange,
    session::Session,
    transport::{Pdu, PduKind, TransportEvent, VarBind, mock::MockTransport},
};

use crate::integration_tests::common::{oid, ranged_walk_request};

/// S4: two non-overlapping ranges over the same root each collect only their
/// own slice of the column; indices outside both ranges are discarded.
#[test]
fn ranged_walk_collects_only_requested_slices() {
    let root = oid(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2]);
    let range_a = ObjectIdentityRange::point(oid(&[2]));
    let range_b = ObjectIdentityRange::new(Some(oid(&[4])), Some(oid(&[5]))).expect("valid range");

    let mut transport = MockTransport::new();
    transport.script(vec![TransportEvent::Received(Pdu {
        kind: PduKind::Response,
        non_repeaters: 0,
        max_repetitions: 0,
        err_stat: 0,
        err_index: 0,
        var_binds: (1..=5u64)
            .map(|i| VarBind {
                name: root.concat(&oid(&[i])),
                value_type: 4,
                value: format!("v{i}").into_bytes(),
            })
            .collect(),
    })]);

    let mut session = Session::open(
        ranged_walk_request("h", root, vec![range_a, range_b]),
        Config::default_full(),
        &mut transport,
    );
    session.send(&mut transport);
    session.read(&mut transport);

    let response = session.get_response();
    let view = snmp_stream_rs::buffer::parse_buffer(&response.results()).expect("parses");
    let indices: Vec<Vec<u64>> = view.records.iter().map(|r| r.index.clone()).collect();
    assert_eq!(indices, vec![vec![2], vec![4], vec![5]]);
}
