//! # Choice Codec
//!
//! A prediction covers every event of a game, but the ledger stores it as a
//! single integer, the **ChoiceID**. This module packs per-event selections
//! into that integer and unpacks it again.
//!
//! ## Mixed-radix packing
//!
//! ```text
//!   event:        0            1            2
//!   options:      3            3            2
//!   radix:      2^3-1=7      2^3-1=7      2^2-1=3
//!   base:         1            7           49
//!
//!   ChoiceID = c0 * 1 + c1 * 7 + c2 * 49
//! ```
//!
//! Each `c_i` is a bitmask of the selected options (bit 0 = option 1).
//! Skipping an event contributes 0. The packing must match the ledger bit
//! for bit, otherwise casts and decoded history are silently wrong.

pub mod choice_id;

pub use choice_id::*;
