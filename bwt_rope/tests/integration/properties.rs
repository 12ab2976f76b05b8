/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests using `proptest`.

use bwt_rope::Rope;

use crate::helpers::{Naive, decode_strings, symbols};

proptest::proptest! {
    #[test]
    fn prop_insert_run_matches_the_naive_model(
        ops in proptest::collection::vec((proptest::num::u64::ANY, 0u8..6, 1u64..5), 1..150)
    ) {
        let mut rope = Rope::new(4, 32);
        let mut naive = Naive::default();
        for (seed, symbol, run_len) in ops {
            let pos = seed % (naive.symbols.len() as u64 + 1);
            let expected = naive.insert_run(pos, symbol, run_len);
            let got = rope.insert_run(pos, symbol, run_len);
            proptest::prop_assert_eq!(got, expected);
        }
        rope.check_invariants();
        proptest::prop_assert_eq!(symbols(&rope), naive.symbols);
        // a full-prefix rank must reproduce the marginal counts
        proptest::prop_assert_eq!(rope.rank(rope.len()), *rope.counts());
    }

    #[test]
    fn prop_rank2_matches_the_naive_model(
        ops in proptest::collection::vec((proptest::num::u64::ANY, 0u8..6), 1..100),
        probes in proptest::collection::vec((proptest::num::u64::ANY, proptest::num::u64::ANY), 1..20),
    ) {
        let mut rope = Rope::new(4, 32);
        let mut naive = Naive::default();
        for (seed, symbol) in ops {
            let pos = seed % (naive.symbols.len() as u64 + 1);
            rope.insert_run(pos, symbol, 1);
            naive.insert_run(pos, symbol, 1);
        }
        let len = rope.len();
        for (a, b) in probes {
            let (x, y) = ((a % (len + 1)).min(b % (len + 1)), (a % (len + 1)).max(b % (len + 1)));
            let (cx, cy) = rope.rank2(x, y);
            proptest::prop_assert_eq!(cx, naive.rank(x));
            proptest::prop_assert_eq!(cy, naive.rank(y));
        }
    }

    #[test]
    fn prop_bulk_insert_equals_one_by_one_rlo(
        strings in proptest::collection::vec(
            proptest::collection::vec(1u8..6, 1..8), 1..10)
    ) {
        let mut buf = Vec::new();
        for s in &strings {
            buf.extend_from_slice(s);
            buf.push(0);
        }

        let mut bulk = Rope::new(4, 32);
        bulk.insert_multi(&buf);
        bulk.check_invariants();

        let mut one_by_one = Rope::new(4, 32);
        for s in &strings {
            one_by_one.insert_string_rlo(s);
        }

        // identical up to the ordering of equal strings, so compare the
        // decoded multisets; with all strings distinct the ropes are equal
        // symbol for symbol
        let mut expected: Vec<Vec<u8>> = strings.clone();
        expected.sort();
        proptest::prop_assert_eq!(decode_strings(&bulk), expected);
        let mut unique = strings.clone();
        unique.sort();
        unique.dedup();
        if unique.len() == strings.len() {
            proptest::prop_assert_eq!(symbols(&bulk), symbols(&one_by_one));
        }
    }
}
