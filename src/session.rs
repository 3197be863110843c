// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The per-request state machine: owns one transport handle, a fleet of
//! [`CollectionHead`]s, and the shared result buffer they append into.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    buffer::ResultBuffer,
    head::CollectionHead,
    model::{Config, SnmpError, SnmpErrorKind, SnmpRequest, SnmpRequestType, SnmpResponse, SnmpResponseKind, Version},
    oid::ObjectIdentity,
    transport::{
        END_OF_MIB_VIEW, NO_SUCH_INSTANCE, NO_SUCH_OBJECT, Pdu, PduKind, SnmpTransport,
        TransportEvent, TransportHandle,
    },
};

/// `IDLE → WAIT → IDLE → … → CLOSED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Wait,
    Closed,
}

fn sentinel_name(value_type: u8) -> &'static str {
    match value_type {
        NO_SUCH_OBJECT => "NO_SUCH_OBJECT",
        NO_SUCH_INSTANCE => "NO_SUCH_INSTANCE",
        END_OF_MIB_VIEW => "END_OF_MIB_VIEW",
        _ => unreachable!("caller already matched a sentinel value type"),
    }
}

/// One in-flight collection: a request bound to a transport handle and a set
/// of collection heads driving it to completion.
#[derive(Debug)]
pub struct Session {
    status: SessionStatus,
    request: SnmpRequest,
    config: Config,
    pdu_kind: PduKind,
    handle: Option<TransportHandle>,
    heads: VecDeque<CollectionHead>,
    results: ResultBuffer,
    errors: Vec<SnmpError>,
    err_flag: bool,
}

fn pdu_kind_for(request: &SnmpRequest) -> PduKind {
    match request.request_type() {
        SnmpRequestType::Get => PduKind::Get,
        SnmpRequestType::Walk => match request.community().version() {
            Version::V1 => PduKind::GetNext,
            Version::V2C => PduKind::GetBulk,
        },
    }
}

fn build_heads(request: &SnmpRequest, results: &ResultBuffer) -> VecDeque<CollectionHead> {
    let mut heads = VecDeque::new();
    for (index, root) in request.root_oids().iter().enumerate() {
        match request.ranges() {
            Some(ranges) if !ranges.is_empty() => {
                for range in ranges {
                    heads.push_back(CollectionHead::new(
                        index,
                        root.clone(),
                        Some(range),
                        results.clone(),
                    ));
                }
            },
            _ => heads.push_back(CollectionHead::new(index, root.clone(), None, results.clone())),
        }
    }
    heads
}

impl Session {
    /// Open a transport handle and build the session's collection heads.
    /// Never fails: an open failure is recorded as a `SESSION_ERROR` and the
    /// session is constructed already `CLOSED`.
    pub fn open(request: SnmpRequest, config: Config, transport: &mut dyn SnmpTransport) -> Self {
        debug!(host = request.host(), request_type = %request.request_type(), "opening session");
        let pdu_kind = pdu_kind_for(&request);

        match transport.open(request.host(), request.community(), &config) {
            Ok(handle) => {
                let results = ResultBuffer::new(request.req_id(), request.root_oids());
                let heads = build_heads(&request, &results);
                Self {
                    status: SessionStatus::Idle,
                    request,
                    config,
                    pdu_kind,
                    handle: Some(handle),
                    heads,
                    results,
                    errors: Vec::new(),
                    err_flag: false,
                }
            },
            Err(e) => {
                let results = ResultBuffer::new(request.req_id(), &[]);
                let mut session = Self {
                    status: SessionStatus::Closed,
                    request,
                    config,
                    pdu_kind,
                    handle: None,
                    heads: VecDeque::new(),
                    results,
                    errors: Vec::new(),
                    err_flag: false,
                };
                session.push_error(SnmpErrorKind::SessionError, Some(e.to_string()), None);
                session
            },
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn request(&self) -> &SnmpRequest {
        &self.request
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn push_error(&mut self, kind: SnmpErrorKind, message: Option<String>, err_oid: Option<ObjectIdentity>) {
        self.errors.push(SnmpError::new(
            kind,
            self.request.clone(),
            None,
            None,
            None,
            None,
            err_oid,
            message,
        ));
    }

    fn close(&mut self, transport: &mut dyn SnmpTransport) {
        if let Some(handle) = self.handle.take() {
            transport.close(handle);
        }
        self.status = SessionStatus::Closed;
    }

    /// Fill and dispatch one request PDU. No-op unless `IDLE`.
    pub fn send(&mut self, transport: &mut dyn SnmpTransport) {
        if self.status != SessionStatus::Idle {
            return;
        }
        let Some(handle) = self.handle else {
            return;
        };

        let mut pdu = match transport.create_pdu(self.pdu_kind) {
            Ok(pdu) => pdu,
            Err(e) => {
                self.push_error(SnmpErrorKind::CreateRequestPduError, Some(e.to_string()), None);
                self.err_flag = true;
                self.close(transport);
                return;
            },
        };

        let max_var_binds = self.config.max_response_var_binds_per_pdu.unwrap_or(1).max(1);
        let slot_count = match self.pdu_kind {
            PduKind::GetBulk => (max_var_binds as f64).sqrt().floor() as usize,
            _ => max_var_binds as usize,
        }
        .min(self.heads.len());

        let total_heads = self.heads.len();
        let mut filled = 0usize;
        for _ in 0..total_heads {
            if filled >= slot_count {
                break;
            }
            let Some(mut head) = self.heads.pop_front() else {
                break;
            };
            let req_oid = head.activate();
            match transport.add_null_varbind(&mut pdu, &req_oid) {
                Ok(()) => {
                    self.heads.push_back(head);
                    filled += 1;
                },
                Err(e) => {
                    // non-fatal: drop this head permanently, don't push back
                    self.push_error(
                        SnmpErrorKind::CreateRequestPduError,
                        Some(e.to_string()),
                        Some(req_oid),
                    );
                    self.err_flag = true;
                },
            }
        }

        if matches!(self.pdu_kind, PduKind::GetBulk) {
            pdu.non_repeaters = 0;
            pdu.max_repetitions = if filled > 0 {
                (max_var_binds / filled as u64).max(1) as u32
            } else {
                0
            };
        }

        match transport.async_send(handle, pdu) {
            Ok(()) => self.status = SessionStatus::Wait,
            Err(e) => {
                self.push_error(SnmpErrorKind::SendError, Some(e.to_string()), None);
                self.err_flag = true;
                self.close(transport);
            },
        }
    }

    /// Ask the transport for readiness and dispatch whatever event results.
    /// No-op unless `WAIT`.
    pub fn read(&mut self, transport: &mut dyn SnmpTransport) {
        if self.status != SessionStatus::Wait {
            return;
        }
        let Some(handle) = self.handle else {
            return;
        };

        use crate::transport::ReadReadiness;
        let event = match transport.select(handle) {
            ReadReadiness::Ready => transport.read(handle),
            ReadReadiness::TimedOut => transport.timeout(handle),
        };
        if let Some(event) = event {
            self.on_pdu(event, transport);
        }
    }

    fn on_pdu(&mut self, event: TransportEvent, transport: &mut dyn SnmpTransport) {
        match event {
            TransportEvent::Received(pdu) => {
                self.status = SessionStatus::Idle;
                self.on_received(pdu, transport);
            },
            TransportEvent::Timeout => {
                self.push_error(SnmpErrorKind::TimeoutError, Some("timeout error".to_string()), None);
                self.err_flag = true;
                self.close(transport);
            },
            TransportEvent::SendFailed => {
                self.push_error(SnmpErrorKind::AsyncProbeError, Some("async probe error".to_string()), None);
                self.err_flag = true;
                self.close(transport);
            },
            TransportEvent::Disconnect => {
                self.push_error(
                    SnmpErrorKind::TransportDisconnectError,
                    Some("transport disconnect error".to_string()),
                    None,
                );
                self.err_flag = true;
                self.close(transport);
            },
            TransportEvent::Resend => {},
        }
        self.reconcile_heads();
    }

    fn on_received(&mut self, pdu: Pdu, transport: &mut dyn SnmpTransport) {
        if pdu.kind != PduKind::Response {
            self.push_error(
                SnmpErrorKind::BadResponsePduError,
                Some(format!("expected RESPONSE-PDU, got {:?}-PDU", pdu.kind)),
                None,
            );
            self.err_flag = true;
            self.close(transport);
            return;
        }
        if pdu.err_stat != 0 {
            let err_oid = pdu
                .var_binds
                .get((pdu.err_index.max(1) - 1) as usize)
                .map(|vb| vb.name.clone());
            self.push_error(
                SnmpErrorKind::BadResponsePduError,
                Some(format!("err_stat={} err_index={}", pdu.err_stat, pdu.err_index)),
                err_oid,
            );
            self.err_flag = true;
            self.close(transport);
            return;
        }
        for var_bind in &pdu.var_binds {
            self.classify_var_bind(var_bind.name.clone(), var_bind.value_type, &var_bind.value);
        }
    }

    /// Locate the first active head whose range covers `resp`, per §4.5.1.
    fn find_matching_head(&self, resp: &ObjectIdentity) -> Option<usize> {
        self.heads.iter().position(|head| {
            if !head.is_active() {
                return false;
            }
            match self.request.request_type() {
                SnmpRequestType::Get => head.range().start() == Some(resp),
                SnmpRequestType::Walk => {
                    head.range().contains(resp) || head.range().stop().is_some_and(|stop| stop.is_root_of(resp))
                },
            }
        })
    }

    fn classify_var_bind(&mut self, resp: ObjectIdentity, value_type: u8, value: &[u8]) {
        let Some(index) = self.find_matching_head(&resp) else {
            if matches!(self.request.request_type(), SnmpRequestType::Get) {
                self.push_error(
                    SnmpErrorKind::ValueWarning,
                    Some("root OID not found".to_string()),
                    Some(resp),
                );
                self.err_flag = true;
            }
            // WALK: silently discard an over-fetched var-bind from another root.
            return;
        };

        match self.request.request_type() {
            SnmpRequestType::Get => {
                let head = &self.heads[index];
                if head.req_oid() != Some(&resp) {
                    self.push_error(
                        SnmpErrorKind::ValueWarning,
                        Some(format!(
                            "request OID does not match response OID: {}",
                            head.req_oid().map(ToString::to_string).unwrap_or_default()
                        )),
                        Some(resp),
                    );
                    self.err_flag = true;
                    return;
                }
                if matches!(value_type, NO_SUCH_OBJECT | NO_SUCH_INSTANCE | END_OF_MIB_VIEW) {
                    self.push_error(
                        SnmpErrorKind::ValueWarning,
                        Some(sentinel_name(value_type).to_string()),
                        Some(resp),
                    );
                    self.err_flag = true;
                    return;
                }
                self.heads[index].record_response(value_type, &resp, value);
            },
            SnmpRequestType::Walk => {
                let head = &self.heads[index];
                let discard = match head.last_resp_oid() {
                    Some(last) => resp <= *last,
                    None => head.req_oid().is_some_and(|req| resp <= *req),
                };
                if discard {
                    return;
                }
                self.heads[index].record_response(value_type, &resp, value);
                self.heads[index].set_last_resp_oid(resp);
            },
        }
    }

    /// Drop heads that stayed active with no response this round; deactivate
    /// (without dropping) heads that made progress; close once no heads
    /// remain.
    fn reconcile_heads(&mut self) {
        self.heads.retain_mut(|head| {
            if head.is_active() {
                if head.last_resp_oid().is_none() {
                    return false;
                }
                head.deactivate();
            }
            true
        });
        if self.heads.is_empty() && self.status != SessionStatus::Closed {
            self.status = SessionStatus::Closed;
        }
    }

    /// Produce the final response once `CLOSED`. The response kind is
    /// computed from whether any data was collected and whether any errors
    /// were recorded, rather than always reporting `SUCCESSFUL`.
    pub fn get_response(self) -> SnmpResponse {
        let kind = if self.errors.is_empty() {
            SnmpResponseKind::Successful
        } else if !self.results.is_empty() {
            SnmpResponseKind::DoneWithErrors
        } else {
            SnmpResponseKind::Failed
        };
        SnmpResponse::new(kind, self.request, self.results.shared_handle(), self.errors)
    }
}
