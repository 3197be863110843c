// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Object identifiers: ordered sequences of unsigned sub-identifiers naming a
//! node in the MIB tree.
//!
//! Sub-identifiers are carried internally as `u64` regardless of the
//! transport's native width (see spec §9 "Numeric semantics") and are only
//! down-converted at the transport boundary.

use std::fmt;

/// A single SNMP sub-identifier.
pub type SubId = u64;

/// Ordered sequence of sub-identifiers. Immutable once constructed; a
/// zero-length OID is legal and represents "unbounded" inside a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentity(Vec<SubId>);

impl ObjectIdentity {
    /// Construct the empty (zero-length) OID.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Construct from a slice of sub-identifiers.
    pub fn from_slice(oid: &[SubId]) -> Self {
        Self(oid.to_vec())
    }

    /// Number of sub-identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-length OID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the sub-identifiers.
    pub fn as_slice(&self) -> &[SubId] {
        &self.0
    }

    /// `self` is a root of `other` iff `self.len() <= other.len()` and
    /// `self` equals the first `self.len()` elements of `other`. Reflexive
    /// and transitive.
    pub fn is_root_of(&self, other: &ObjectIdentity) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// Index tail of `other` beyond this OID, i.e. `other`'s sub-identifiers
    /// past `self.len()`. Panics if `self` is not a root of `other`.
    pub fn index_tail<'a>(&self, other: &'a ObjectIdentity) -> &'a [SubId] {
        debug_assert!(self.is_root_of(other));
        &other.0[self.0.len()..]
    }

    /// Concatenate two OIDs, returning a new one.
    pub fn concat(&self, other: &ObjectIdentity) -> ObjectIdentity {
        let mut out = Vec::with_capacity(self.0.len() + other.0.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(&other.0);
        ObjectIdentity(out)
    }
}

impl From<Vec<SubId>> for ObjectIdentity {
    fn from(v: Vec<SubId>) -> Self {
        Self(v)
    }
}

impl std::ops::Index<usize> for ObjectIdentity {
    type Output = SubId;

    fn index(&self, index: usize) -> &SubId {
        &self.0[index]
    }
}

impl std::ops::Add<&ObjectIdentity> for &ObjectIdentity {
    type Output = ObjectIdentity;

    fn add(self, rhs: &ObjectIdentity) -> ObjectIdentity {
        self.concat(rhs)
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sub_id in &self.0 {
            write!(f, ".{sub_id}")?;
        }
        Ok(())
    }
}
