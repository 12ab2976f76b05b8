/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A B+ tree rope over run-length-encoded leaves, supporting online
//! construction of the Burrows–Wheeler transform of a string collection.
//!
//! The rope stores a dynamic, insertion-ordered sequence of symbols drawn
//! from a six-letter alphabet (symbol 0 is the sentinel). Three operation
//! families are exposed:
//!
//! - [`Rope::insert_run`] splices a run of one symbol at a position and
//!   returns its BWT rank, `C(symbol) + rank(symbol, pos)`.
//! - [`Rope::rank`] / [`Rope::rank2`] report per-symbol prefix counts for
//!   one or two positions.
//! - [`Rope::insert_string_rlo`] and [`Rope::insert_multi`] build the BWT of
//!   a string collection online, one string at a time or in bulk.
//!
//! # Architecture
//!
//! - [`arena`]: bump arenas handing out `u32`-indexed bucket and leaf slots.
//!   Nothing is freed individually; dropping the rope drops everything.
//! - [`node`]: an interior node is a *bucket*, a header plus a fixed-capacity
//!   group of child-descriptor records. Every record carries the symbol
//!   totals of its subtree, which is what makes rank queries a single
//!   root-to-leaf walk.
//! - [`tree`]: the container itself. Insertion splits full buckets on the
//!   way down, so a descent never climbs back up.
//! - Leaves are byte blocks encoded by the [`rle`] crate; a leaf splits as
//!   soon as an insertion could overflow it.
//!
//! Single-threaded by design: operations take `&mut self` and run to
//! completion. Wrap the rope in a mutex for shared use.

mod arena;
mod iter;
mod multi;
mod node;
mod strings;
mod tree;

pub use iter::{Leaves, Runs};
pub use rle::{SIGMA, SymbolCounts};
pub use tree::Rope;
