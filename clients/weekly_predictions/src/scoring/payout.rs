//! Live Payout
//!
//! The ledger returns every figure of a scored prediction as a fixed-point
//! integer. The prize is split proportionally and then the contributors fee
//! is taken:
//!
//! ```text
//!   raw  = stake * score * prize_pool / score_sum      (6 decimals)
//!   net  = raw * (10000 - fee_bps) / 10000
//! ```
//!
//! The stake is in whole collateral units while the score and the score sum
//! share 18 decimals, so `raw` lands in the pool's 6-decimal unit.

use anchor_lang::prelude::*;

use crate::scoring::ScoreError;
use crate::state::PredictionRecord;

/// Basis points in 100%
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Decimals of collateral amounts
pub const AMOUNT_DECIMALS: u32 = 6;

/// Decimals of fixed-point scores
pub const SCORE_DECIMALS: u32 = 18;

/// Prize and score of a scored prediction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Payout {
    /// Net prize in the collateral's smallest unit
    pub prize_units: u128,
    /// Net prize in whole collateral units
    pub prize: f64,
    /// Individual score as a decimal
    pub score: f64,
}

impl Payout {
    /// Prize with 2 decimals, as listed in the predictions table
    pub fn prize_label(&self) -> String {
        format!("{:.2}", self.prize)
    }

    /// Score with 3 decimals
    pub fn score_label(&self) -> String {
        format!("{:.3}", self.score)
    }
}

/// Convert a fixed-point integer to a float
pub fn to_decimal(raw: u128, decimals: u32) -> f64 {
    raw as f64 / 10u128.pow(decimals) as f64
}

/// Prize and score of a prediction from the ledger's raw figures
pub fn live_payout(record: &PredictionRecord) -> Result<Payout> {
    require!(record.total_score > 0, ScoreError::ZeroScoreSum);
    let fee_bps = u128::from(record.contributors_fee_bps);
    require!(fee_bps <= BPS_DENOMINATOR, ScoreError::FeeTooHigh);

    let raw = u128::from(record.amount)
        .checked_mul(record.score)
        .and_then(|v| v.checked_mul(u128::from(record.total_prize)))
        .ok_or(ScoreError::Overflow)?
        / record.total_score;

    let prize_units = raw
        .checked_mul(BPS_DENOMINATOR - fee_bps)
        .ok_or(ScoreError::Overflow)?
        / BPS_DENOMINATOR;

    Ok(Payout {
        prize_units,
        prize: to_decimal(prize_units, AMOUNT_DECIMALS),
        score: to_decimal(record.score, SCORE_DECIMALS),
    })
}
