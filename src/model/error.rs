// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

use crate::{model::request::SnmpRequest, oid::ObjectIdentity};

/// Kind of a runtime [`SnmpError`]. Ordinal-stable per the wire/ABI
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SnmpErrorKind {
    SessionError = 0,
    CreateRequestPduError,
    SendError,
    BadResponsePduError,
    TimeoutError,
    AsyncProbeError,
    TransportDisconnectError,
    CreateResponsePduError,
    ValueWarning,
}

impl fmt::Display for SnmpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnmpErrorKind::SessionError => "SESSION_ERROR",
            SnmpErrorKind::CreateRequestPduError => "CREATE_REQUEST_PDU_ERROR",
            SnmpErrorKind::SendError => "SEND_ERROR",
            SnmpErrorKind::BadResponsePduError => "BAD_RESPONSE_PDU_ERROR",
            SnmpErrorKind::TimeoutError => "TIMEOUT_ERROR",
            SnmpErrorKind::AsyncProbeError => "ASYNC_PROBE_ERROR",
            SnmpErrorKind::TransportDisconnectError => "TRANSPORT_DISCONNECT_ERROR",
            SnmpErrorKind::CreateResponsePduError => "CREATE_RESPONSE_PDU_ERROR",
            SnmpErrorKind::ValueWarning => "VALUE_WARNING",
        })
    }
}

/// A single runtime collection error accumulated on a session.
#[derive(Debug, Clone)]
pub struct SnmpError {
    kind: SnmpErrorKind,
    request: SnmpRequest,
    sys_errno: Option<i64>,
    snmp_errno: Option<i64>,
    err_stat: Option<i64>,
    err_index: Option<i64>,
    err_oid: Option<ObjectIdentity>,
    message: Option<String>,
}

impl SnmpError {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: SnmpErrorKind,
        request: SnmpRequest,
        sys_errno: Option<i64>,
        snmp_errno: Option<i64>,
        err_stat: Option<i64>,
        err_index: Option<i64>,
        err_oid: Option<ObjectIdentity>,
        message: Option<String>,
    ) -> Self {
        Self {
            kind,
            request,
            sys_errno,
            snmp_errno,
            err_stat,
            err_index,
            err_oid,
            message,
        }
    }

    pub fn kind(&self) -> SnmpErrorKind {
        self.kind
    }

    pub fn request(&self) -> &SnmpRequest {
        &self.request
    }

    pub fn sys_errno(&self) -> Option<i64> {
        self.sys_errno
    }

    pub fn snmp_errno(&self) -> Option<i64> {
        self.snmp_errno
    }

    pub fn err_stat(&self) -> Option<i64> {
        self.err_stat
    }

    pub fn err_index(&self) -> Option<i64> {
        self.err_index
    }

    pub fn err_oid(&self) -> Option<&ObjectIdentity> {
        self.err_oid.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for SnmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnmpError({}", self.kind)?;
        if let Some(oid) = &self.err_oid {
            write!(f, ", oid={oid}")?;
        }
        if let Some(msg) = &self.message {
            write!(f, ", {msg}")?;
        }
        write!(f, ")")
    }
}
