// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::{
    model::{Community, SnmpRequest, SnmpRequestType, Version},
    oid::ObjectIdentity,
    range::ObjectIdentityRange,
};

pub fn oid(v: &[u64]) -> ObjectIdentity {
    ObjectIdentity::from_slice(v)
}

pub fn public_community() -> Community {
    Community::new("public", Version::V2C)
}

pub fn get_request(host: &str, root: ObjectIdentity) -> SnmpRequest {
    SnmpRequest::new(SnmpRequestType::Get, host, public_community(), vec![root], None, Some(
        "test-req".to_string(),
    ), None)
    .expect("valid GET request")
}

pub fn walk_request(host: &str, root: ObjectIdentity) -> SnmpRequest {
    SnmpRequest::new(
        SnmpRequestType::Walk,
        host,
        public_community(),
        vec![root],
        None,
        Some("test-req".to_string()),
        None,
    )
    .expect("valid WALK request")
}

pub fn ranged_walk_request(
    host: &str,
    root: ObjectIdentity,
    ranges: Vec<ObjectIdentityRange>,
) -> SnmpRequest {
    SnmpRequest::new(
        SnmpRequestType::Walk,
        host,
        public_community(),
        vec![root],
        Some(ranges),
        Some("test-req".to_string()),
        None,
    )
    .expect("valid ranged WALK request")
}
