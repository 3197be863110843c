// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The SNMP transport boundary (spec §6 "Transport primitive (contract
//! consumed)"). This crate treats ASN.1/BER encoding and UDP sockets as an
//! external collaborator (spec §1 Non-goals); [`SnmpTransport`] is the trait
//! a real transport would implement, and [`mock::MockTransport`] is the
//! deterministic, in-memory stand-in this crate's tests and CLI demo drive
//! instead.

pub mod mock;

use thiserror::Error;

use crate::{
    model::{Community, Config},
    oid::ObjectIdentity,
};

/// MIB view sentinel value types (spec §6).
pub const NO_SUCH_OBJECT: u8 = 128;
pub const NO_SUCH_INSTANCE: u8 = 129;
pub const END_OF_MIB_VIEW: u8 = 130;

/// PDU kinds exchanged with a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduKind {
    Get,
    GetNext,
    GetBulk,
    Response,
}

/// One `(name, type, value)` variable binding inside a PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    pub name: ObjectIdentity,
    pub value_type: u8,
    pub value: Vec<u8>,
}

/// A request or response PDU.
#[derive(Debug, Clone)]
pub struct Pdu {
    pub kind: PduKind,
    pub non_repeaters: u32,
    pub max_repetitions: u32,
    pub err_stat: i64,
    pub err_index: i64,
    pub var_binds: Vec<VarBind>,
}

impl Pdu {
    pub fn request(kind: PduKind) -> Self {
        Self {
            kind,
            non_repeaters: 0,
            max_repetitions: 0,
            err_stat: 0,
            err_index: 0,
            var_binds: Vec::new(),
        }
    }
}

/// The five callback ops a transport may invoke a session's PDU handler
/// with.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Received(Pdu),
    Timeout,
    SendFailed,
    Disconnect,
    Resend,
}

/// Errors a transport may surface synchronously (as opposed to via a
/// [`TransportEvent`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to open transport session: {0}")]
    OpenFailed(String),
    #[error("failed to allocate request PDU: {0}")]
    CreatePduFailed(String),
    #[error("failed to attach OID to PDU: {0}")]
    AttachFailed(String),
    #[error("failed to dispatch PDU: {0}")]
    SendFailed(String),
}

/// Opaque handle to an open transport session.
pub type TransportHandle = u64;

/// What a session asks the transport for when it wants to know if there's
/// data to read (spec §6 `select`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadReadiness {
    Ready,
    TimedOut,
}

/// Lower-level SNMP transport primitive: `open/send/recv/close`, socket
/// selection, and per-session timeout/retry timers. A real implementation
/// speaks ASN.1/BER over UDP; this crate only defines the boundary.
pub trait SnmpTransport {
    fn open(
        &mut self,
        host: &str,
        community: &Community,
        config: &Config,
    ) -> Result<TransportHandle, TransportError>;

    fn create_pdu(&mut self, kind: PduKind) -> Result<Pdu, TransportError>;

    fn add_null_varbind(
        &mut self,
        pdu: &mut Pdu,
        oid: &ObjectIdentity,
    ) -> Result<(), TransportError>;

    /// Dispatch `pdu` asynchronously. The resulting [`TransportEvent`] is
    /// delivered later via [`SnmpTransport::read`]/[`SnmpTransport::timeout`].
    fn async_send(&mut self, handle: TransportHandle, pdu: Pdu) -> Result<(), TransportError>;

    /// Block (up to the transport's own timeout) until a response is ready
    /// or the timer expires.
    fn select(&mut self, handle: TransportHandle) -> ReadReadiness;

    /// Drain ready data, delivering any outstanding [`TransportEvent`].
    fn read(&mut self, handle: TransportHandle) -> Option<TransportEvent>;

    /// Drive the transport's retry timer; returns the event to deliver once
    /// retries are exhausted, or `None` while retries remain.
    fn timeout(&mut self, handle: TransportHandle) -> Option<TransportEvent>;

    fn close(&mut self, handle: TransportHandle);
}
