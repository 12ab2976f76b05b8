/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Multi-string bulk insertion.
//!
//! All strings sharing a prefix of length `depth` form one *task*: a group
//! of string indices plus the row interval its next symbols belong to. Per
//! task the strings are radix-partitioned by their next symbol (a stable
//! 6-bucket counting sort over a shared pointer array), one run per symbol
//! class is inserted, and one child task per non-sentinel class is produced.
//! The result equals inserting every string with
//! [`Rope::insert_string_rlo`], up to the ordering of equal strings.
//!
//! # Interval bookkeeping
//!
//! Tasks are processed depth by depth, left to right — a min-heap keyed by
//! `(depth, l, symbol, parent_pop)`. A task's `[l, u)` is stored in
//! *end-of-previous-round* coordinates: every insertion a round performs
//! lands strictly left of all later blocks of that round, so the true
//! interval at pop time is the stored one plus a single running counter of
//! symbols inserted this round.
//!
//! A child interval is likewise exact in end-of-current-round coordinates:
//! the rows left of a class-`a` child block are the context rows of every
//! string (one per string, `T` in total), the realized successor rows of
//! all smaller-symbol occurrences as of the start of the round, and the
//! realized successor rows of the `a`-occurrences preceding the group,
//! `tl[a]` minus the `k[a]` occurrences this round has inserted so far
//! (their successor rows do not exist until the next round).
//!
//! The `(symbol, parent_pop)` component breaks ties between empty adjacent
//! intervals in context order — classes ascend within a pop, and parents
//! pop in context order themselves.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rle::SIGMA;

use crate::tree::Rope;

/// One prefix group awaiting its next round of insertions.
///
/// Field order is the heap priority: round, then stored position, with the
/// symbol class and the parent's pop index breaking ties in context order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Task {
    /// Prefix length consumed so far; the round this task runs in.
    depth: u32,
    /// Row interval start, in end-of-previous-round coordinates.
    l: u64,
    /// The symbol class this group was partitioned into.
    symbol: u8,
    /// Pop index of the task that produced this one.
    parent_pop: u64,
    /// Row interval end.
    u: u64,
    /// Range of string indices in the shared pointer array.
    b: usize,
    e: usize,
}

impl Rope {
    /// Bulk-insert a concatenation of 0-terminated strings.
    ///
    /// Every string, including the last, must be terminated by a 0 byte;
    /// all other bytes must be symbols in `[1, 6)`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty, does not end with a sentinel, or
    /// contains a byte outside the alphabet.
    pub fn insert_multi(&mut self, buf: &[u8]) {
        assert!(
            buf.last() == Some(&0),
            "buffer must be a non-empty concatenation of 0-terminated strings"
        );
        let mut ptr: Vec<&[u8]> = Vec::new();
        let mut start = 0;
        for (i, &symbol) in buf.iter().enumerate() {
            assert!((symbol as usize) < SIGMA, "symbol out of range: {symbol}");
            if symbol == 0 {
                ptr.push(&buf[start..i]);
                start = i + 1;
            }
        }

        let mut m = ptr.len() as u64;
        let total_strings = self.counts()[0] + m;
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Task {
            depth: 0,
            l: 0,
            symbol: 0,
            parent_pop: 0,
            u: self.counts()[0],
            b: 0,
            e: ptr.len(),
        }));

        // Per-round state: counts snapshot at the round boundary, symbols
        // inserted so far in total and per class.
        let mut round = u32::MAX;
        let mut round_counts = [0; SIGMA];
        let mut k_total = 0;
        let mut k_class = [0u64; SIGMA];
        let mut pop_idx = 0;

        let mut oracle: Vec<u8> = Vec::new();
        let mut sorted: Vec<&[u8]> = Vec::new();
        while let Some(Reverse(task)) = heap.pop() {
            pop_idx += 1;
            if task.depth != round {
                round = task.depth;
                round_counts = *self.counts();
                k_total = 0;
                k_class = [0; SIGMA];
            }
            let l = task.l + k_total;
            let u = task.u + k_total;
            let (b, e, depth) = (task.b, task.e, task.depth as usize);
            let n = e - b;

            // next symbol of every string in the group, sentinel when done
            oracle.clear();
            oracle.extend(
                ptr[b..e]
                    .iter()
                    .map(|s| s.get(depth).copied().unwrap_or(0)),
            );
            let mut c = [0u64; SIGMA];
            for &symbol in &oracle {
                c[symbol as usize] += 1;
            }
            let mut ac = [0u64; SIGMA];
            for a in 1..SIGMA {
                ac[a] = ac[a - 1] + c[a - 1];
            }
            // stable counting sort of ptr[b..e) by the oracle; `ac` keeps
            // the class boundaries, the sort advances its own cursors
            let mut cursor = ac;
            sorted.clear();
            sorted.resize(n, &buf[..0]);
            for (j, &symbol) in oracle.iter().enumerate() {
                sorted[cursor[symbol as usize] as usize] = ptr[b + j];
                cursor[symbol as usize] += 1;
            }
            ptr[b..e].copy_from_slice(&sorted);

            let (tl, tu) = self.rank2(l, u);
            let mut x = l;
            let mut smaller = total_strings;
            for a in 0..SIGMA {
                if c[a] > 0 {
                    self.insert_run(x, a as u8, c[a]);
                    if a > 0 {
                        heap.push(Reverse(Task {
                            depth: task.depth + 1,
                            l: smaller + tl[a] - k_class[a],
                            symbol: a as u8,
                            parent_pop: pop_idx,
                            u: smaller + tu[a] - k_class[a],
                            b: b + ac[a] as usize,
                            e: b + (ac[a] + c[a]) as usize,
                        }));
                    }
                    k_class[a] += c[a];
                    k_total += c[a];
                }
                if a > 0 {
                    smaller += round_counts[a];
                }
                x += tu[a] - tl[a] + c[a];
            }
            m -= c[0];
        }
        debug_assert_eq!(m, 0, "every string must have consumed its sentinel");
    }
}
