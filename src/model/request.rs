// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

use thiserror::Error;

use crate::{
    model::{community::Community, config::Config},
    oid::ObjectIdentity,
    range::{ObjectIdentityRange, RangeError, optimize_ranges},
};

/// SNMP request type: a point lookup or a subtree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SnmpRequestType {
    Get = 0,
    Walk = 1,
}

impl fmt::Display for SnmpRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnmpRequestType::Get => "GET",
            SnmpRequestType::Walk => "WALK",
        })
    }
}

/// Errors raised while constructing an [`SnmpRequest`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("root_oids must be non-empty")]
    EmptyRootOids,
    #[error("ambiguous root OIDs: {0} is a root of {1}")]
    AmbiguousRoots(String, String),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// A collection request: the user-facing descriptor a [`crate::session::Session`]
/// is built from.
#[derive(Debug, Clone)]
pub struct SnmpRequest {
    request_type: SnmpRequestType,
    host: String,
    community: Community,
    root_oids: Vec<ObjectIdentity>,
    ranges: Option<Vec<ObjectIdentityRange>>,
    req_id: Option<String>,
    config: Option<Config>,
}

/// Test that no OID in a sequence is a root of another in that sequence.
/// Returns the offending pair on the first ambiguity found.
fn find_ambiguous_roots(
    oids: &[ObjectIdentity],
) -> Option<(ObjectIdentity, ObjectIdentity)> {
    for (i, a) in oids.iter().enumerate() {
        for (j, b) in oids.iter().enumerate() {
            if i != j && a.is_root_of(b) {
                return Some((a.clone(), b.clone()));
            }
        }
    }
    None
}

impl SnmpRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_type: SnmpRequestType,
        host: impl Into<String>,
        community: Community,
        root_oids: Vec<ObjectIdentity>,
        ranges: Option<Vec<ObjectIdentityRange>>,
        req_id: Option<String>,
        config: Option<Config>,
    ) -> Result<Self, RequestError> {
        if root_oids.is_empty() {
            return Err(RequestError::EmptyRootOids);
        }
        if let Some((a, b)) = find_ambiguous_roots(&root_oids) {
            return Err(RequestError::AmbiguousRoots(a.to_string(), b.to_string()));
        }
        let ranges = optimize_ranges(request_type, ranges)?;

        Ok(Self {
            request_type,
            host: host.into(),
            community,
            root_oids,
            ranges,
            req_id,
            config,
        })
    }

    pub fn request_type(&self) -> SnmpRequestType {
        self.request_type
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn community(&self) -> &Community {
        &self.community
    }

    pub fn root_oids(&self) -> &[ObjectIdentity] {
        &self.root_oids
    }

    pub fn ranges(&self) -> Option<&[ObjectIdentityRange]> {
        self.ranges.as_deref()
    }

    pub fn req_id(&self) -> Option<&str> {
        self.req_id.as_deref()
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Clone this request replacing its config with `new_config`.
    pub fn with_config(&self, new_config: Config) -> Self {
        Self {
            config: Some(new_config),
            ..self.clone()
        }
    }
}

impl fmt::Display for SnmpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SnmpRequest({}, host={}, roots={:?})",
            self.request_type, self.host, self.root_oids
        )
    }
}
