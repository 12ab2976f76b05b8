/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: per-symbol prefix counts.

use rle::{SIGMA, SymbolCounts};

use super::Rope;
use crate::node::Record;

impl Rope {
    /// Walk down to the leaf containing offset `pos`, adding the totals of
    /// every subtree left of the path into `counts`. Returns the leaf's
    /// parent record and the offset remaining within the leaf.
    fn count_to_leaf(&self, pos: u64, counts: &mut SymbolCounts) -> (Record, u64) {
        let mut y = 0;
        let mut parent: Option<Record> = None;
        let mut bucket = self.root;
        loop {
            let header = self.buckets.header(bucket);
            let n = header.len as usize;
            let recs = &self.buckets.records(bucket)[..n];
            let mut i = 0;
            if let Some(rec) = parent
                && pos - y > rec.len / 2
            {
                // closer to the right edge: enter from the back
                i = n;
                y += rec.len;
                for s in 0..SIGMA {
                    counts[s] += rec.counts[s];
                }
                while y >= pos {
                    i -= 1;
                    y -= recs[i].len;
                    for s in 0..SIGMA {
                        counts[s] -= recs[i].counts[s];
                    }
                }
            } else {
                while y + recs[i].len < pos {
                    y += recs[i].len;
                    for s in 0..SIGMA {
                        counts[s] += recs[i].counts[s];
                    }
                    i += 1;
                }
            }
            let rec = recs[i];
            if header.is_bottom {
                return (rec, pos - y);
            }
            parent = Some(rec);
            bucket = rec.bucket();
        }
    }

    /// Per-symbol counts of the length-`pos` prefix.
    ///
    /// # Panics
    ///
    /// Panics if `pos > self.len()`.
    pub fn rank(&self, pos: u64) -> SymbolCounts {
        assert!(
            pos <= self.len(),
            "position {pos} out of range for a rope of {} symbols",
            self.len()
        );
        let mut cx = [0; SIGMA];
        let (rec, rest) = self.count_to_leaf(pos, &mut cx);
        rle::rank1(self.leaves.get(rec.leaf()), rest, &mut cx);
        cx
    }

    /// Per-symbol counts of the prefixes of length `x` and `y`, `x <= y`.
    ///
    /// When both offsets fall into the same leaf the second one is answered
    /// from the same scan; otherwise the descent runs twice.
    ///
    /// # Panics
    ///
    /// Panics if `x > y` or `y > self.len()`.
    pub fn rank2(&self, x: u64, y: u64) -> (SymbolCounts, SymbolCounts) {
        assert!(x <= y, "rank2 offsets out of order: {x} > {y}");
        assert!(
            y <= self.len(),
            "position {y} out of range for a rope of {} symbols",
            self.len()
        );
        let mut cx = [0; SIGMA];
        let (rec, rest) = self.count_to_leaf(x, &mut cx);
        if rest + (y - x) <= rec.len {
            let mut cy = cx;
            rle::rank2(
                self.leaves.get(rec.leaf()),
                rest,
                rest + (y - x),
                &mut cx,
                &mut cy,
            );
            (cx, cy)
        } else {
            rle::rank1(self.leaves.get(rec.leaf()), rest, &mut cx);
            let mut cy = [0; SIGMA];
            let (rec, rest) = self.count_to_leaf(y, &mut cy);
            rle::rank1(self.leaves.get(rec.leaf()), rest, &mut cy);
            (cx, cy)
        }
    }
}
