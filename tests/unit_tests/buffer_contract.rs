// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    buffer::{BufferParseError, ResultBuffer, parse_buffer},
    oid::ObjectIdentity,
};

#[test]
fn appended_records_survive_a_parse_round_trip() {
    let roots = vec![ObjectIdentity::from_slice(&[1, 3, 6, 1, 2, 1, 1])];
    let buffer = ResultBuffer::new(Some("req-9"), &roots);
    buffer.append_record(0, 4, &[1, 0], b"hello");

    let view = parse_buffer(&buffer.snapshot()).expect("parses");
    assert_eq!(view.req_id, "req-9");
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].index, vec![1, 0]);
    assert_eq!(view.records[0].value, b"hello");
}

#[test]
fn a_buffer_shorter_than_the_header_is_rejected() {
    let err = parse_buffer(&[0u8; 2]);
    assert!(matches!(err, Err(BufferParseError::TooShort { .. })));
}
