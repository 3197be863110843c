// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! OID range algebra: ordered closed intervals of [`ObjectIdentity`] used to
//! mask responses into the correct collection head, plus the canonicalisation
//! pass (`optimize_ranges`) that coalesces overlapping ranges for a walk and
//! validates point ranges for a get.

use std::cmp::Ordering;

use thiserror::Error;

use crate::{model::SnmpRequestType, oid::ObjectIdentity};

/// Errors raised while constructing or canonicalising a range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range start {start} must be <= stop {stop}")]
    InvalidBounds { start: String, stop: String },
    #[error("GET request ranges must be non-empty points, got {0}")]
    NonPointGetRange(String),
}

/// Closed interval `[start, stop]` under lexicographic order on OIDs. Either
/// bound may be absent: an absent start means "lowest possible", an absent
/// stop means "highest possible".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentityRange {
    start: Option<ObjectIdentity>,
    stop: Option<ObjectIdentity>,
}

impl ObjectIdentityRange {
    /// Construct a closed range. Fails if both bounds are present and
    /// `start > stop`.
    pub fn new(
        start: Option<ObjectIdentity>,
        stop: Option<ObjectIdentity>,
    ) -> Result<Self, RangeError> {
        if let (Some(s), Some(e)) = (&start, &stop)
            && s > e
        {
            return Err(RangeError::InvalidBounds {
                start: s.to_string(),
                stop: e.to_string(),
            });
        }
        Ok(Self { start, stop })
    }

    /// Construct a single-point range (`start == stop`).
    pub fn point(oid: ObjectIdentity) -> Self {
        Self {
            start: Some(oid.clone()),
            stop: Some(oid),
        }
    }

    /// The fully unbounded range `(None, None)`.
    pub fn unbounded() -> Self {
        Self {
            start: None,
            stop: None,
        }
    }

    pub fn start(&self) -> Option<&ObjectIdentity> {
        self.start.as_ref()
    }

    pub fn stop(&self) -> Option<&ObjectIdentity> {
        self.stop.as_ref()
    }

    /// True when `start == stop` and both are present (a non-empty point).
    pub fn is_point(&self) -> bool {
        matches!((&self.start, &self.stop), (Some(s), Some(e)) if s == e)
    }

    /// True when both bounds are absent.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.stop.is_none()
    }

    /// Prefix both bounds with `root`, substituting `root` itself for an
    /// absent bound.
    pub fn rooted_at(&self, root: &ObjectIdentity) -> ObjectIdentityRange {
        let start = match &self.start {
            Some(s) => root.concat(s),
            None => root.clone(),
        };
        let stop = match &self.stop {
            Some(s) => root.concat(s),
            None => root.clone(),
        };
        ObjectIdentityRange {
            start: Some(start),
            stop: Some(stop),
        }
    }

    /// `start <= oid <= stop`, treating an absent bound as unbounded on that
    /// side.
    pub fn contains(&self, oid: &ObjectIdentity) -> bool {
        let above_start = self.start.as_ref().is_none_or(|s| s <= oid);
        let below_stop = self.stop.as_ref().is_none_or(|e| oid <= e);
        above_start && below_stop
    }
}

impl fmt::Display for ObjectIdentityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_bound = |b: &Option<ObjectIdentity>| match b {
            Some(o) => o.to_string(),
            None => "*".to_string(),
        };
        write!(f, "[{}, {}]", fmt_bound(&self.start), fmt_bound(&self.stop))
    }
}

use std::fmt;

impl PartialOrd for ObjectIdentityRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Implements the 16-case ordering table from the spec: absent start sorts
/// lowest, absent stop sorts highest; ties on start prefer the *wider* range
/// first so the canonicalisation fold always extends the leading range.
impl Ord for ObjectIdentityRange {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.start, &self.stop, &other.start, &other.stop) {
            (None, None, None, None) => Ordering::Equal,
            (None, None, _, _) => Ordering::Less,
            (None, Some(_), None, None) => Ordering::Greater,
            (None, Some(a), None, Some(b)) => b.cmp(a),
            (None, Some(_), Some(_), _) => Ordering::Less,
            (Some(_), None, None, _) => Ordering::Greater,
            (Some(a), None, Some(b), None) => a.cmp(b),
            (Some(a), None, Some(b), Some(_)) => {
                if a <= b {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            },
            (Some(_), Some(_), None, _) => Ordering::Greater,
            (Some(a), Some(_), Some(b), None) => {
                if a < b {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            },
            (Some(a), Some(x), Some(b), Some(y)) => {
                a.cmp(b).then_with(|| y.cmp(x))
            },
        }
    }
}

/// Canonicalise a list of ranges for a request of the given type. For `GET`,
/// every range must be a non-empty point; duplicates are removed preserving
/// order. For `WALK`, ranges are sorted by the ordering above and folded
/// left-to-right into a minimal, non-overlapping list; returns `None` when
/// the single resulting range is fully unbounded (meaning: full walk from
/// each root).
pub fn optimize_ranges(
    request_type: SnmpRequestType,
    ranges: Option<Vec<ObjectIdentityRange>>,
) -> Result<Option<Vec<ObjectIdentityRange>>, RangeError> {
    let Some(ranges) = ranges else {
        return Ok(None);
    };
    if ranges.is_empty() {
        return Ok(None);
    }

    match request_type {
        SnmpRequestType::Get => {
            for r in &ranges {
                if !r.is_point() {
                    return Err(RangeError::NonPointGetRange(r.to_string()));
                }
            }
            let mut out: Vec<ObjectIdentityRange> = Vec::with_capacity(ranges.len());
            for r in ranges {
                if !out.contains(&r) {
                    out.push(r);
                }
            }
            Ok(Some(out))
        },
        SnmpRequestType::Walk => {
            let mut sorted = ranges;
            sorted.sort();
            sorted.dedup_by(|a, b| a == b);

            let mut folded: Vec<ObjectIdentityRange> = Vec::new();
            for r in sorted {
                match folded.last_mut() {
                    None => folded.push(r),
                    Some(tail) => {
                        if tail.stop.is_none() {
                            break;
                        }
                        if tail.start == r.start {
                            continue;
                        }
                        let covers = match (&tail.stop, &r.start) {
                            (Some(ts), Some(rs)) => ts >= rs,
                            (Some(_), None) => true,
                            (None, _) => unreachable!("handled above"),
                        };
                        if covers {
                            let wider_stop = match (&tail.stop, &r.stop) {
                                (_, None) => None,
                                (Some(ts), Some(rss)) if rss > ts => Some(rss.clone()),
                                (ts, _) => ts.clone(),
                            };
                            tail.stop = wider_stop;
                        } else {
                            folded.push(r);
                        }
                    },
                }
            }

            if folded.len() == 1 && folded[0].is_unbounded() {
                return Ok(None);
            }
            Ok(Some(folded))
        },
    }
}
