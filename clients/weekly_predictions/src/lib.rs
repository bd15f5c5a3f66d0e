//! # Weekly Predictions: Client Core
//!
//! Client-side logic for a weekly combinatorial prediction game.
//!
//! ## Overview
//!
//! Every week a new game opens with a handful of events. A user picks one
//! or more outcomes per event (or skips it), stakes collateral on the whole
//! combination, and once the game is scored collects a share of the prize
//! pool proportional to their score.
//!
//! ## How it works
//! - The combination travels to the ledger as one integer, the ChoiceID
//!   (see [`codec`]).
//! - Prizes of scored predictions come straight from the ledger's figures;
//!   past games can be replayed locally (see [`scoring`]).
//! - A [`session::Session`] holds the page state and drives a
//!   [`ledger::LedgerClient`] through the user's actions (see [`actions`]).
//!
//! ```text
//!   ┌──────────┐   actions    ┌─────────┐   LedgerClient   ┌────────┐
//!   │   view   │ ───────────▶ │ Session │ ───────────────▶ │ ledger │
//!   └──────────┘ ◀─────────── └─────────┘ ◀─────────────── └────────┘
//!                 view state               records
//! ```

pub mod actions;
pub mod codec;
pub mod ledger;
pub mod scoring;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

pub use actions::{CastReceipt, PredictionDetails};
pub use codec::*;
pub use ledger::*;
pub use scoring::*;
pub use session::*;
pub use state::*;
