/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Bucket and child-descriptor record types.
//!
//! An interior node of the rope is a *bucket*: a [`BucketHeader`] plus a
//! contiguous group of up to `max_children` [`Record`]s in the bucket arena.
//! Each record describes one child subtree and carries its exact symbol
//! totals, so a descent can steer by position and accumulate ranks without
//! touching the children.

use rle::SymbolCounts;

use crate::arena::{BucketId, LeafId};

/// Bucket-wide state, kept apart from the records themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BucketHeader {
    /// Number of live records in the bucket.
    pub len: u16,
    /// True iff the children of this bucket are leaf blocks.
    pub is_bottom: bool,
}

/// Reference to a record's child, typed by which arena it lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Child {
    /// Unoccupied record slot.
    #[default]
    None,
    Bucket(BucketId),
    Leaf(LeafId),
}

/// One child-descriptor record.
///
/// Invariant: `len` equals the sum of `counts`, and both equal the exact
/// totals of the subtree below `child`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Record {
    pub child: Child,
    /// Total number of symbols in the subtree.
    pub len: u64,
    /// Per-symbol totals of the subtree.
    pub counts: SymbolCounts,
}

impl Record {
    /// The child bucket; panics on a leaf-level or empty record.
    pub fn bucket(&self) -> BucketId {
        match self.child {
            Child::Bucket(id) => id,
            _ => unreachable!("expected an interior child"),
        }
    }

    /// The child leaf; panics on an interior or empty record.
    pub fn leaf(&self) -> LeafId {
        match self.child {
            Child::Leaf(id) => id,
            _ => unreachable!("expected a leaf child"),
        }
    }
}
