// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use snmp_stream_rs::model::{SnmpRequest, SnmpRequestType};

use crate::integration_tests::common::{oid, public_community};

/// S5: a request whose root OIDs overlap (one is a root of the other) is
/// rejected at construction time.
#[test]
fn overlapping_root_oids_are_rejected() {
    let err = SnmpRequest::new(
        SnmpRequestType::Walk,
        "h",
        public_community(),
        vec![oid(&[1, 3, 6, 1]), oid(&[1, 3, 6, 1, 2, 1])],
        None,
        None,
        None,
    );
    assert!(err.is_err());
}
