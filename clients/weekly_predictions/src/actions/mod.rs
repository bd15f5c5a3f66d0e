//! User actions
//!
//! Each action is something the user can trigger from one of the pages:
//! - `board` - load the open game, pick options, cast, start the next game
//! - `archive` - browse past games and replay a selection against results
//! - `account` - load predictions per tab, page through them, view details
//! - `redeem` - collect prizes of scored predictions
//! - `withdraw` - cancel a prediction on the open game
//!
//! Actions that reach the ledger hold the session's operation lock for
//! their whole duration and leave local state untouched when the ledger
//! call fails.

pub mod account;
pub mod archive;
pub mod board;
pub mod loader;
pub mod redeem;
pub mod withdraw;

pub use account::*;
pub use board::*;

use anchor_lang::error::Error;

/// Log a failed ledger call before it is returned to the caller
pub(crate) fn log_failure(action: &'static str) -> impl FnOnce(&Error) {
    move |err| tracing::error!(action, %err, "ledger call failed")
}
