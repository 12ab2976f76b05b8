/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Left-to-right traversal of the rope's leaves.
//!
//! [`Leaves`] yields every leaf's raw block (run-count header plus run
//! stream, capacity `block_bytes`) in symbol order; downstream consumers
//! decode it with the [`rle`] codec. [`Runs`] flattens that into the decoded
//! `(symbol, run_len)` stream.
//!
//! Iterators borrow the rope; the borrow checker enforces that no mutation
//! happens while one is live.

use crate::arena::BucketId;
use crate::tree::Rope;

/// In-order iterator over leaf blocks, driven by an explicit stack of
/// `(bucket, record index)` pairs whose top is always a bottom-level bucket.
#[derive(Debug)]
pub struct Leaves<'a> {
    rope: &'a Rope,
    stack: Vec<(BucketId, usize)>,
}

impl<'a> Leaves<'a> {
    fn new(rope: &'a Rope) -> Self {
        let mut iter = Self {
            rope,
            stack: vec![(rope.root(), 0)],
        };
        iter.descend();
        iter
    }

    /// Extend the stack down to the leftmost bottom bucket under its top.
    fn descend(&mut self) {
        loop {
            let (bucket, i) = *self.stack.last().unwrap();
            if self.rope.buckets.header(bucket).is_bottom {
                return;
            }
            self.stack.push((self.rope.buckets.record(bucket, i).bucket(), 0));
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let (bucket, i) = *self.stack.last()?;
        let block = self.rope.leaves.get(self.rope.buckets.record(bucket, i).leaf());

        // backtrack to the next unvisited record, then descend again
        loop {
            let Some(&(bucket, i)) = self.stack.last() else {
                return Some(block);
            };
            if i + 1 < self.rope.buckets.header(bucket).len as usize {
                *self.stack.last_mut().unwrap() = (bucket, i + 1);
                break;
            }
            self.stack.pop();
        }
        self.descend();
        Some(block)
    }
}

/// Decoded `(symbol, run_len)` pairs across all leaves, in symbol order.
/// Adjacent runs of equal symbols may span a leaf boundary and are yielded
/// separately.
#[derive(Debug)]
pub struct Runs<'a> {
    leaves: Leaves<'a>,
    current: Option<rle::RunIter<'a>>,
}

impl<'a> Iterator for Runs<'a> {
    type Item = (u8, u64);

    fn next(&mut self) -> Option<(u8, u64)> {
        loop {
            if let Some(runs) = &mut self.current
                && let Some(run) = runs.next()
            {
                return Some(run);
            }
            self.current = Some(rle::runs(self.leaves.next()?));
        }
    }
}

impl Rope {
    /// Iterate over the raw leaf blocks, leftmost first. An empty rope
    /// yields its single empty block.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// Iterate over the decoded runs of the whole rope.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            leaves: self.leaves(),
            current: None,
        }
    }
}
