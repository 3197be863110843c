// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! A deterministic, in-memory [`SnmpTransport`] for tests and the CLI demo.
//! Each [`Session::open`](crate::session::Session::open) call consumes the
//! next pre-programmed script; each event in that script is delivered, in
//! order, on the following `select`/`read`/`timeout` round-trip. Grounded on
//! the iSCSI client's per-request bookkeeping (one channel per outstanding
//! operation), simplified here to a scripted queue since there is no real
//! socket to drive.

use std::collections::{HashMap, VecDeque};

use crate::{
    model::{Community, Config},
    oid::ObjectIdentity,
    transport::{Pdu, PduKind, ReadReadiness, SnmpTransport, TransportError, TransportEvent, TransportHandle, VarBind},
};

#[derive(Default)]
struct PendingOpen {
    fail: Option<String>,
    events: VecDeque<TransportEvent>,
}

/// Scripted SNMP transport. Tests call [`MockTransport::script`] once per
/// session they expect `Session::open` to create, in call order.
#[derive(Default)]
pub struct MockTransport {
    next_handle: TransportHandle,
    pending_opens: VecDeque<PendingOpen>,
    sessions: HashMap<TransportHandle, VecDeque<TransportEvent>>,
    sent: Vec<(TransportHandle, Pdu)>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the event sequence the next opened session should observe. All
    /// `script`/`fail_next_open` calls for a test must happen before the
    /// `open()` calls that consume them, in the same order; the events
    /// travel with their `PendingOpen` entry, so interleaving `script` and
    /// `fail_next_open` calls does not orphan any scripted events under the
    /// wrong handle.
    pub fn script(&mut self, events: Vec<TransportEvent>) {
        self.pending_opens.push_back(PendingOpen {
            fail: None,
            events: events.into(),
        });
    }

    /// Make the next `open()` call fail with `message`.
    pub fn fail_next_open(&mut self, message: impl Into<String>) {
        self.pending_opens.push_back(PendingOpen {
            fail: Some(message.into()),
            events: VecDeque::new(),
        });
    }

    /// PDUs dispatched so far, in send order, for assertion in tests.
    pub fn sent_pdus(&self) -> &[(TransportHandle, Pdu)] {
        &self.sent
    }
}

impl SnmpTransport for MockTransport {
    fn open(&mut self, _host: &str, _community: &Community, _config: &Config) -> Result<TransportHandle, TransportError> {
        let pending = self.pending_opens.pop_front().unwrap_or_default();
        if let Some(message) = pending.fail {
            return Err(TransportError::OpenFailed(message));
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.sessions.insert(handle, pending.events);
        Ok(handle)
    }

    fn create_pdu(&mut self, kind: PduKind) -> Result<Pdu, TransportError> {
        Ok(Pdu::request(kind))
    }

    fn add_null_varbind(&mut self, pdu: &mut Pdu, oid: &ObjectIdentity) -> Result<(), TransportError> {
        pdu.var_binds.push(VarBind {
            name: oid.clone(),
            value_type: 0,
            value: Vec::new(),
        });
        Ok(())
    }

    fn async_send(&mut self, handle: TransportHandle, pdu: Pdu) -> Result<(), TransportError> {
        self.sent.push((handle, pdu));
        Ok(())
    }

    fn select(&mut self, handle: TransportHandle) -> ReadReadiness {
        match self.sessions.get(&handle).and_then(|queue| queue.front()) {
            Some(TransportEvent::Timeout) | None => ReadReadiness::TimedOut,
            Some(_) => ReadReadiness::Ready,
        }
    }

    fn read(&mut self, handle: TransportHandle) -> Option<TransportEvent> {
        let queue = self.sessions.get_mut(&handle)?;
        match queue.front() {
            Some(TransportEvent::Timeout) => None,
            Some(_) => queue.pop_front(),
            None => None,
        }
    }

    fn timeout(&mut self, handle: TransportHandle) -> Option<TransportEvent> {
        let queue = self.sessions.get_mut(&handle)?;
        if matches!(queue.front(), Some(TransportEvent::Timeout)) {
            queue.pop_front()
        } else {
            None
        }
    }

    fn close(&mut self, handle: TransportHandle) {
        self.sessions.remove(&handle);
    }
}
