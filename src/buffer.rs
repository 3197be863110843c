// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The self-describing result buffer: header + var-bind records, written
//! incrementally by a [`crate::session::Session`] and later read back by a
//! [`crate::model::SnmpResponse`] consumer. See spec §6 "Result buffer wire
//! format" for the exact byte layout this module implements.

use std::{
    mem::size_of,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use thiserror::Error;

use crate::oid::{ObjectIdentity, SubId};

/// Word size used for alignment: the native size of a `u64`.
pub const WORD_SIZE: usize = size_of::<u64>();
/// Octet size of one sub-identifier on the wire.
pub const OCTET_SIZE: u8 = size_of::<SubId>() as u8;
const HEADER_BYTES: usize = 16;

/// Round `n` up to the next multiple of [`WORD_SIZE`].
pub const fn align(n: usize) -> usize {
    n.div_ceil(WORD_SIZE) * WORD_SIZE
}

fn write_aligned_u64(buf: &mut Vec<u8>, value: u64) {
    let start = buf.len();
    buf.resize(start + align(WORD_SIZE), 0);
    buf[start..start + WORD_SIZE].copy_from_slice(&value.to_ne_bytes());
}

fn write_aligned_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    let start = buf.len();
    buf.resize(start + align(bytes.len()), 0);
    buf[start..start + bytes.len()].copy_from_slice(bytes);
}

/// Shared, append-only byte vector holding one session's self-describing
/// result buffer. Cheap to clone (reference-counted); appends are
/// serialised by the single owning session (spec §5 "Result buffer appends
/// are serialised per-buffer").
#[derive(Debug, Clone)]
pub struct ResultBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl ResultBuffer {
    /// Allocate a new buffer and write the header + meta + roots blocks.
    pub fn new(req_id: Option<&str>, root_oids: &[ObjectIdentity]) -> Self {
        let mut bytes = Vec::with_capacity(256);

        // Header (16 bytes, not aligned).
        bytes.push(0u8); // native endianness is little on every target we support
        bytes.push(WORD_SIZE as u8);
        bytes.push(OCTET_SIZE);
        bytes.resize(HEADER_BYTES, 0);

        // Meta block: req_id.
        let req_id_bytes = req_id.unwrap_or("").as_bytes();
        write_aligned_u64(&mut bytes, req_id_bytes.len() as u64);
        write_aligned_bytes(&mut bytes, req_id_bytes);

        // Roots block.
        write_aligned_u64(&mut bytes, root_oids.len() as u64);
        for root in root_oids {
            write_aligned_u64(&mut bytes, root.len() as u64);
            let mut sub_id_bytes = Vec::with_capacity(root.len() * OCTET_SIZE as usize);
            for sub_id in root.as_slice() {
                sub_id_bytes.extend_from_slice(&sub_id.to_ne_bytes());
            }
            write_aligned_bytes(&mut bytes, &sub_id_bytes);
        }

        Self {
            inner: Arc::new(Mutex::new(bytes)),
        }
    }

    /// Append one variable-binding record under `root` for `root_oid_index`.
    /// `index` is the response OID's tail beyond the root; `value_type` and
    /// `value` come straight from the transport's var-bind.
    pub fn append_record(
        &self,
        root_oid_index: u64,
        value_type: u8,
        index: &[SubId],
        value: &[u8],
    ) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut index_bytes = Vec::with_capacity(index.len() * OCTET_SIZE as usize);
        for sub_id in index {
            index_bytes.extend_from_slice(&sub_id.to_ne_bytes());
        }

        let rec_size = align(WORD_SIZE) // timestamp
            + align(WORD_SIZE) // root_oid_index
            + align(WORD_SIZE) // value_type
            + align(WORD_SIZE) // index_len
            + align(index_bytes.len()) // index tail
            + align(WORD_SIZE) // value_len
            + align(value.len()); // value

        let mut guard = self.inner.lock().expect("result buffer mutex poisoned");
        write_aligned_u64(&mut guard, rec_size as u64);
        write_aligned_u64(&mut guard, timestamp);
        write_aligned_u64(&mut guard, root_oid_index);
        write_aligned_u64(&mut guard, value_type as u64);
        write_aligned_u64(&mut guard, index.len() as u64);
        write_aligned_bytes(&mut guard, &index_bytes);
        write_aligned_u64(&mut guard, value.len() as u64);
        write_aligned_bytes(&mut guard, value);
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("result buffer mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the current bytes.
    pub fn snapshot(&self) -> Vec<u8> {
        self.inner.lock().expect("result buffer mutex poisoned").clone()
    }

    /// Share this buffer with another holder (e.g. the eventual response).
    pub fn shared_handle(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.inner)
    }
}

/// One parsed variable-binding record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub timestamp: u64,
    pub root_oid_index: u64,
    pub value_type: u8,
    pub index: Vec<SubId>,
    pub value: Vec<u8>,
}

/// Errors raised while parsing a result buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferParseError {
    #[error("buffer too short: expected at least {expected} bytes, got {got}")]
    TooShort { expected: usize, got: usize },
    #[error("unsupported word size {0} (this reader only supports 8)")]
    UnsupportedWordSize(u8),
    #[error("unsupported endianness byte {0}")]
    UnsupportedEndianness(u8),
}

/// Parsed view over a result buffer: the request id, root OIDs (as raw
/// sub-identifier sequences, since the reader has no request context to
/// reattach them to), and the sequence of appended records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    pub req_id: String,
    pub roots: Vec<Vec<SubId>>,
    pub records: Vec<RecordView>,
}

fn read_u64(buf: &[u8], pos: usize) -> Result<u64, BufferParseError> {
    let end = pos + WORD_SIZE;
    if end > buf.len() {
        return Err(BufferParseError::TooShort {
            expected: end,
            got: buf.len(),
        });
    }
    let mut arr = [0u8; WORD_SIZE];
    arr.copy_from_slice(&buf[pos..end]);
    Ok(u64::from_ne_bytes(arr))
}

/// Parse a buffer written by [`ResultBuffer`] back into its header metadata
/// and appended records. Used by the test suite to assert round-trip
/// fidelity (testable property 10) and by the CLI demo to pretty-print
/// results.
pub fn parse_buffer(buf: &[u8]) -> Result<BufferView, BufferParseError> {
    if buf.len() < HEADER_BYTES {
        return Err(BufferParseError::TooShort {
            expected: HEADER_BYTES,
            got: buf.len(),
        });
    }
    if buf[0] != 0 {
        return Err(BufferParseError::UnsupportedEndianness(buf[0]));
    }
    if buf[1] != WORD_SIZE as u8 {
        return Err(BufferParseError::UnsupportedWordSize(buf[1]));
    }

    let mut pos = HEADER_BYTES;

    let req_id_len = read_u64(buf, pos)? as usize;
    pos += align(WORD_SIZE);
    let req_id = String::from_utf8_lossy(&buf[pos..pos + req_id_len]).into_owned();
    pos += align(req_id_len);

    let num_roots = read_u64(buf, pos)? as usize;
    pos += align(WORD_SIZE);
    let mut roots = Vec::with_capacity(num_roots);
    for _ in 0..num_roots {
        let root_len = read_u64(buf, pos)? as usize;
        pos += align(WORD_SIZE);
        let mut sub_ids = Vec::with_capacity(root_len);
        for i in 0..root_len {
            let sub_id = read_u64(buf, pos + i * OCTET_SIZE as usize)?;
            sub_ids.push(sub_id);
        }
        pos += align(root_len * OCTET_SIZE as usize);
        roots.push(sub_ids);
    }

    let mut records = Vec::new();
    while pos < buf.len() {
        let rec_size = read_u64(buf, pos)? as usize;
        pos += align(WORD_SIZE);
        let rec_start = pos;

        let timestamp = read_u64(buf, pos)?;
        pos += align(WORD_SIZE);
        let root_oid_index = read_u64(buf, pos)?;
        pos += align(WORD_SIZE);
        let value_type = read_u64(buf, pos)? as u8;
        pos += align(WORD_SIZE);
        let index_len = read_u64(buf, pos)? as usize;
        pos += align(WORD_SIZE);

        let mut index = Vec::with_capacity(index_len);
        for i in 0..index_len {
            index.push(read_u64(buf, pos + i * OCTET_SIZE as usize)?);
        }
        pos += align(index_len * OCTET_SIZE as usize);

        let value_len = read_u64(buf, pos)? as usize;
        pos += align(WORD_SIZE);
        let value = buf[pos..pos + value_len].to_vec();
        pos += align(value_len);

        debug_assert_eq!(pos - rec_start, rec_size);

        records.push(RecordView {
            timestamp,
            root_oid_index,
            value_type,
            index,
            value,
        });
    }

    Ok(BufferView {
        req_id,
        roots,
        records,
    })
}
