/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Structural invariant checks.
//!
//! [`Rope::check_invariants`] walks the whole tree and re-derives every
//! memoized total from the leaves up. With the `unittest` feature (or in
//! unit tests) it runs automatically after every mutation.

use rle::{SIGMA, SymbolCounts};

use super::Rope;
use crate::arena::BucketId;
use crate::node::Child;

impl Rope {
    /// Verify all structural invariants, panicking with a descriptive
    /// message on the first violation. Intended for tests; cost is a full
    /// tree walk.
    pub fn check_invariants(&self) {
        let (len, counts) = self.check_bucket(self.root());
        assert_eq!(
            counts,
            *self.counts(),
            "root subtree totals must match the rope's marginal counts"
        );
        assert_eq!(len, self.len());
    }

    /// Recursively check the subtree rooted at `bucket`, returning its
    /// recomputed totals.
    fn check_bucket(&self, bucket: BucketId) -> (u64, SymbolCounts) {
        let header = self.buckets.header(bucket);
        let n = header.len as usize;
        assert!(
            (1..=self.max_children()).contains(&n),
            "bucket holds {n} records with a fan-out of {}",
            self.max_children()
        );

        let mut total = 0;
        let mut totals = [0; SIGMA];
        for i in 0..n {
            let rec = self.buckets.record(bucket, i);
            let sum: u64 = rec.counts.iter().sum();
            assert_eq!(
                rec.len, sum,
                "record length must equal the sum of its per-symbol counts"
            );

            let (child_len, child_counts) = match rec.child {
                Child::Leaf(leaf) => {
                    assert!(header.is_bottom, "leaf child under an interior bucket");
                    let block = self.leaves.get(leaf);
                    assert!(
                        rle::used_bytes(block) <= self.block_bytes(),
                        "leaf encoding overflows its block"
                    );
                    let counts = rle::count(block);
                    (counts.iter().sum(), counts)
                }
                Child::Bucket(child) => {
                    assert!(!header.is_bottom, "bucket child under a bottom bucket");
                    self.check_bucket(child)
                }
                Child::None => panic!("live record without a child"),
            };
            assert_eq!(rec.len, child_len, "record length out of sync with child");
            assert_eq!(
                rec.counts, child_counts,
                "record counts out of sync with child"
            );

            total += rec.len;
            for s in 0..SIGMA {
                totals[s] += rec.counts[s];
            }
        }
        (total, totals)
    }
}
