// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    model::SnmpRequestType,
    oid::ObjectIdentity,
    range::{ObjectIdentityRange, optimize_ranges},
};

fn oid(v: &[u64]) -> ObjectIdentity {
    ObjectIdentity::from_slice(v)
}

#[test]
fn walk_ranges_coalesce_overlapping_intervals() {
    let ranges = vec![
        ObjectIdentityRange::new(Some(oid(&[1])), Some(oid(&[3]))).expect("valid"),
        ObjectIdentityRange::new(Some(oid(&[2])), Some(oid(&[9]))).expect("valid"),
    ];
    let folded = optimize_ranges(SnmpRequestType::Walk, Some(ranges))
        .expect("ok")
        .expect("some");
    assert_eq!(folded.len(), 1);
    assert_eq!(folded[0].start(), Some(&oid(&[1])));
    assert_eq!(folded[0].stop(), Some(&oid(&[9])));
}

#[test]
fn get_ranges_must_be_points() {
    let ranges = vec![ObjectIdentityRange::new(Some(oid(&[1])), Some(oid(&[2]))).expect("valid")];
    assert!(optimize_ranges(SnmpRequestType::Get, Some(ranges)).is_err());
}
