// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use crate::model::{error::SnmpError, request::SnmpRequest};

/// Kind of a completed [`SnmpResponse`]. Ordinal-stable per the wire/ABI
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SnmpResponseKind {
    Successful = 0,
    DoneWithErrors,
    Failed,
}

impl fmt::Display for SnmpResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnmpResponseKind::Successful => "SUCCESSFUL",
            SnmpResponseKind::DoneWithErrors => "DONE_WITH_ERRORS",
            SnmpResponseKind::Failed => "FAILED",
        })
    }
}

/// The outcome of a completed session: its kind, the originating request,
/// the self-describing result buffer (shared, read-only from here on), and
/// any accumulated errors.
#[derive(Debug, Clone)]
pub struct SnmpResponse {
    kind: SnmpResponseKind,
    request: SnmpRequest,
    results: Arc<Mutex<Vec<u8>>>,
    errors: Vec<SnmpError>,
}

impl SnmpResponse {
    pub fn new(
        kind: SnmpResponseKind,
        request: SnmpRequest,
        results: Arc<Mutex<Vec<u8>>>,
        errors: Vec<SnmpError>,
    ) -> Self {
        Self {
            kind,
            request,
            results,
            errors,
        }
    }

    pub fn kind(&self) -> SnmpResponseKind {
        self.kind
    }

    pub fn request(&self) -> &SnmpRequest {
        &self.request
    }

    /// A snapshot copy of the raw result buffer bytes.
    pub fn results(&self) -> Vec<u8> {
        self.results.lock().expect("result buffer mutex poisoned").clone()
    }

    pub fn errors(&self) -> &[SnmpError] {
        &self.errors
    }
}
