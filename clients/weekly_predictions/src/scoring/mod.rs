//! # Scoring
//!
//! Two views of the same payout formula:
//!
//! - [`replica`] recomputes, from stored vote percentages, what a
//!   hypothetical selection would have earned on a past game. Display only,
//!   the ledger stays authoritative.
//! - [`payout`] converts the fixed-point figures the ledger returns for a
//!   real prediction into its prize and score.
//!
//! ## Score per event
//!
//! ```text
//!   solution hit:   score *= 100 / Σ pct(selected)
//!   solution miss:  score *= (100 - Σ pct(selected)) / 100
//!   skipped/void:   score unchanged
//!
//!   prize = score / Σ scores * prize_pool
//! ```
//!
//! Backing an unpopular outcome multiplies the score; hedging across many
//! options dilutes it.

pub mod payout;
pub mod replica;

pub use payout::*;
pub use replica::*;
