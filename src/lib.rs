// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Synchronous SNMP v1/v2c bulk collection engine: a cooperative
//! [`manager::SessionManager`] drives a fleet of [`session::Session`]s, each
//! walking or point-querying a set of root OIDs through an
//! [`transport::SnmpTransport`] and appending results into a self-describing
//! [`buffer::ResultBuffer`].

pub mod buffer;
pub mod cfg;
pub mod head;
pub mod manager;
pub mod model;
pub mod oid;
pub mod range;
pub mod session;
pub mod transport;
