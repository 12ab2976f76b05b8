/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: top-down splitting and run insertion.
//!
//! Splitting happens on the way down, so an insertion is a single
//! root-to-leaf pass: whenever the descent is about to enter a full bucket,
//! the bucket is split through its parent record first. That same pass
//! guarantees the parent always has a free slot when its child needs one —
//! the parent was split earlier in the descent if it was full itself.

use rle::SIGMA;

use super::Rope;
use crate::arena::BucketId;
use crate::node::{Child, Record};

impl Rope {
    /// Insert `run_len` copies of `symbol` after the first `pos` symbols.
    ///
    /// Returns `C(symbol) + rank(symbol, pos)` — the number of symbols
    /// strictly smaller than `symbol` plus the occurrences of `symbol`
    /// before `pos`, both measured on the rope as it was before this call.
    /// This is the row the inserted run starts at in BWT terms.
    ///
    /// # Panics
    ///
    /// Panics if `symbol >= 6`, `run_len == 0` or `pos > self.len()`.
    pub fn insert_run(&mut self, pos: u64, symbol: u8, run_len: u64) -> u64 {
        let rank = self.insert_run_inner(pos, symbol, run_len);
        #[cfg(any(test, feature = "unittest"))]
        self.check_invariants();
        rank
    }

    fn insert_run_inner(&mut self, pos: u64, symbol: u8, run_len: u64) -> u64 {
        assert!((symbol as usize) < SIGMA, "symbol out of range: {symbol}");
        assert!(run_len > 0, "run length must be positive");
        assert!(
            pos <= self.len(),
            "position {pos} out of range for a rope of {} symbols",
            self.len()
        );

        let a = symbol as usize;
        let mut z: u64 = self.counts[..a].iter().sum();
        let mut y = 0;
        let mut parent: Option<(BucketId, usize)> = None;
        let mut bucket = self.root;

        let (leaf_bucket, leaf_idx) = loop {
            if self.buckets.header(bucket).len as usize == self.fanout {
                // Split before entering. The split may leave the target
                // position in the new sibling; steer into it if so.
                let (pb, mut i) = self.split_child(parent);
                let rec = self.buckets.record(pb, i);
                if y + rec.len < pos {
                    y += rec.len;
                    z += rec.counts[a];
                    i += 1;
                }
                parent = Some((pb, i));
                bucket = self.buckets.record(pb, i).bucket();
            }

            let header = self.buckets.header(bucket);
            let n = header.len as usize;
            let recs = &self.buckets.records(bucket)[..n];
            let mut i = 0;
            let backward = parent
                .map(|(pb, pi)| self.buckets.record(pb, pi))
                .filter(|rec| pos - y > rec.len / 2);
            if let Some(rec) = backward {
                // closer to the right edge of this subtree
                i = n;
                y += rec.len;
                z += rec.counts[a];
                while y >= pos {
                    i -= 1;
                    y -= recs[i].len;
                    z -= recs[i].counts[a];
                }
            } else {
                while y + recs[i].len < pos {
                    y += recs[i].len;
                    z += recs[i].counts[a];
                    i += 1;
                }
            }
            debug_assert!(i < n);

            // Update the record we came through. The record being descended
            // into is left untouched until after the leaf insertion so that
            // split decisions see the old totals.
            if let Some((pb, pi)) = parent {
                let rec = self.buckets.record_mut(pb, pi);
                rec.counts[a] += run_len;
                rec.len += run_len;
            }
            parent = Some((bucket, i));
            if header.is_bottom {
                break (bucket, i);
            }
            bucket = self.buckets.record(bucket, i).bucket();
        };

        // The global totals must change before a possible trailing leaf
        // split: a root split taken there snapshots them.
        self.counts[a] += run_len;

        let leaf = self.buckets.record(leaf_bucket, leaf_idx).leaf();
        let inserted = rle::insert(self.leaves.get_mut(leaf), pos - y, symbol, run_len);
        z += inserted.prefix[a];
        {
            let rec = self.buckets.record_mut(leaf_bucket, leaf_idx);
            rec.counts[a] += run_len;
            rec.len += run_len;
        }
        if inserted.used_bytes + rle::MAX_INSERT_GROWTH > self.block_bytes {
            self.split_child(Some((leaf_bucket, leaf_idx)));
        }
        z
    }

    /// Split the child of the record at `parent`, inserting the new sibling
    /// record immediately after it. With `parent == None` the root itself is
    /// split, growing the tree by one level first.
    ///
    /// Returns the (possibly relocated) position of the original record, so
    /// the caller can decide between it and the sibling at the next slot.
    pub(crate) fn split_child(&mut self, parent: Option<(BucketId, usize)>) -> (BucketId, usize) {
        let (pb, i) = match parent {
            Some(loc) => loc,
            None => {
                // Grow the tree: a fresh single-record bucket becomes the
                // parent of the old root.
                let nb = self.buckets.alloc();
                {
                    let header = self.buckets.header_mut(nb);
                    header.len = 1;
                    header.is_bottom = false;
                }
                *self.buckets.record_mut(nb, 0) = Record {
                    child: Child::Bucket(self.root),
                    len: self.counts.iter().sum(),
                    counts: self.counts,
                };
                self.root = nb;
                (nb, 0)
            }
        };

        let header = self.buckets.header(pb);
        let n = header.len as usize;
        debug_assert!(
            n < self.fanout,
            "the parent of a bucket split on descent always has a free slot"
        );

        // Shift the records right of `i` to make room for the sibling.
        {
            let recs = self.buckets.records_mut(pb);
            recs.copy_within(i + 1..n, i + 2);
            recs[i + 1] = Record::default();
        }
        self.buckets.header_mut(pb).len = (n + 1) as u16;

        let (child, counts) = if header.is_bottom {
            let src = self.buckets.record(pb, i).leaf();
            let dst = self.leaves.alloc();
            let (left, right) = self.leaves.get_pair_mut(src, dst);
            rle::split(left, right);
            (Child::Leaf(dst), rle::count(self.leaves.get(dst)))
        } else {
            let src = self.buckets.record(pb, i).bucket();
            let dst = self.buckets.alloc();
            let half = self.fanout / 2;
            let src_len = self.buckets.header(src).len as usize;
            debug_assert_eq!(src_len, self.fanout, "only full buckets are split");

            let moved: Vec<Record> = self.buckets.records(src)[src_len - half..src_len].to_vec();
            self.buckets.records_mut(dst)[..half].copy_from_slice(&moved);
            {
                let src_header = self.buckets.header(src);
                let dst_header = self.buckets.header_mut(dst);
                dst_header.len = half as u16;
                dst_header.is_bottom = src_header.is_bottom;
            }
            self.buckets.header_mut(src).len = (src_len - half) as u16;

            let mut counts = [0; SIGMA];
            for rec in &moved {
                for s in 0..SIGMA {
                    counts[s] += rec.counts[s];
                }
            }
            (Child::Bucket(dst), counts)
        };

        // Record the sibling and take its share out of the original record.
        let len = counts.iter().sum();
        let recs = self.buckets.records_mut(pb);
        recs[i + 1] = Record { child, len, counts };
        for s in 0..SIGMA {
            recs[i].counts[s] -= counts[s];
        }
        recs[i].len -= len;
        (pb, i)
    }
}
