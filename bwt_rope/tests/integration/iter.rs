/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use bwt_rope::Rope;
use pretty_assertions::assert_eq;

use crate::helpers::{Naive, symbols};

#[test]
fn an_empty_rope_yields_one_empty_block() {
    let rope = Rope::new(8, 64);
    let blocks: Vec<&[u8]> = rope.leaves().collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].len(), rope.block_bytes());
    assert_eq!(rle::num_runs(blocks[0]), 0);
    assert_eq!(rope.runs().count(), 0);
}

#[test]
fn leaf_blocks_concatenate_to_the_full_sequence() {
    let mut rope = Rope::new(4, 32);
    let mut naive = Naive::default();
    let mut state = 0xdeadbeefu64;
    for _ in 0..800 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let pos = state % (naive.symbols.len() as u64 + 1);
        let symbol = ((state >> 33) % 6) as u8;
        rope.insert_run(pos, symbol, 1);
        naive.insert_run(pos, symbol, 1);
    }
    // every block is a full-capacity buffer in the stable codec format
    let mut decoded = Vec::new();
    for block in rope.leaves() {
        assert_eq!(block.len(), rope.block_bytes());
        assert!(rle::used_bytes(block) <= rope.block_bytes());
        for (symbol, run_len) in rle::runs(block) {
            decoded.extend(std::iter::repeat_n(symbol, run_len as usize));
        }
    }
    assert_eq!(decoded, naive.symbols);
    assert!(rope.leaves().count() > 2);
}

#[test]
fn decoded_run_totals_match_the_marginal_counts() {
    let mut rope = Rope::new(4, 32);
    for i in 0..300u64 {
        rope.insert_run(i % (i / 2 + 1), (i % 5 + 1) as u8, i % 3 + 1);
    }
    let mut totals = [0u64; 6];
    for (symbol, run_len) in rope.runs() {
        totals[symbol as usize] += run_len;
    }
    assert_eq!(totals, *rope.counts());
    assert_eq!(symbols(&rope).len() as u64, rope.len());
}
