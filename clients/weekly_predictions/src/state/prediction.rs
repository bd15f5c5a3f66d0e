//! Prediction State
//!
//! A prediction is a stake on one ChoiceID for one game. The ledger returns
//! raw fixed-point records; the client turns each into a `UserPrediction`
//! carrying what the account page needs to render and act on it.

use anchor_lang::prelude::*;

use crate::scoring::{live_payout, Payout};
use crate::state::GameData;

/// Per-user counters (`getUserData` on the ledger)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserData {
    /// Predictions already redeemed, in id order
    pub previous_redemptions: u64,

    /// Total predictions ever cast by the user
    pub prediction_count: u64,
}

/// Raw prediction record (`getPlayerPredictions` on the ledger)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictionRecord {
    pub choice_id: u128,

    /// Stake in whole collateral units
    pub amount: u64,

    pub game_id: u64,

    pub redeemed: bool,

    /// Individual score (18 decimals)
    pub score: u128,

    /// Prize pool of the game (6 decimals)
    pub total_prize: u64,

    /// Sum of all scores of the game (18 decimals)
    pub total_score: u128,

    /// Contributors fee in basis points
    pub contributors_fee_bps: u16,
}

/// What the user may do with a prediction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redeemability {
    /// Game still open: the stake can be withdrawn
    Withdrawable,
    /// Game scored and prize not yet collected
    Redeemable,
    /// Nothing to do (game unfinished or already redeemed)
    Locked,
}

impl Redeemability {
    pub fn classify(game_id: u64, redeemed: bool, game: &GameData) -> Self {
        if game_id == game.game_id {
            Self::Withdrawable
        } else if game.is_scored(game_id) && !redeemed {
            Self::Redeemable
        } else {
            Self::Locked
        }
    }
}

/// Display-ready prediction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserPrediction {
    pub prediction_id: u64,
    pub game_id: u64,
    pub amount: u64,
    pub choice_id: u128,
    /// Only known once the game has been scored
    pub payout: Option<Payout>,
    pub redeemed: bool,
    pub redeemability: Redeemability,
}

impl UserPrediction {
    /// Display view of a ledger record
    ///
    /// A scored record whose figures cannot produce a prize (zero score sum,
    /// fee above 100 %) gets no payout instead of failing the whole page.
    pub fn from_record(prediction_id: u64, record: &PredictionRecord, game: &GameData) -> Self {
        let payout = if game.is_scored(record.game_id) {
            live_payout(record)
                .inspect_err(|err| {
                    tracing::warn!(
                        prediction_id,
                        game_id = record.game_id,
                        %err,
                        "payout indeterminate"
                    )
                })
                .ok()
        } else {
            None
        };

        Self {
            prediction_id,
            game_id: record.game_id,
            amount: record.amount,
            choice_id: record.choice_id,
            payout,
            redeemed: record.redeemed,
            redeemability: Redeemability::classify(record.game_id, record.redeemed, game),
        }
    }

    pub fn is_redeemable(&self) -> bool {
        self.redeemability == Redeemability::Redeemable
    }

    pub fn is_withdrawable(&self) -> bool {
        self.redeemability == Redeemability::Withdrawable
    }

    /// Score scaled by the stake, as shown in the details view
    pub fn weighted_score(&self) -> Option<f64> {
        self.payout
            .map(|payout| payout.score * self.amount as f64)
    }

    /// Text of the action column
    pub fn status_label(&self) -> &'static str {
        if self.redeemed {
            return "Already redeemed";
        }
        match self.redeemability {
            Redeemability::Redeemable => "Redeem",
            Redeemability::Withdrawable => "Cancel",
            Redeemability::Locked => "Game Unfinished",
        }
    }

    pub fn mark_redeemed(&mut self) {
        self.redeemed = true;
        self.redeemability = Redeemability::Locked;
    }
}
