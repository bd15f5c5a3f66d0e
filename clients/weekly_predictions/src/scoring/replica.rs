//! Score/Prize Replica
//!
//! Mirrors the ledger's fixed-point score calculation with floats so the
//! archive page can answer "what would this selection have paid?".

use anchor_lang::prelude::*;

use crate::state::{ClientConfig, GamePrize, OptionPercentages, Selection};
use crate::scoring::to_decimal;

/// Result of a replica run
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReplicaOutcome {
    /// Score and the prize it earns per unit staked
    Prize { score: f64, prize: f64 },
    /// The stored figures cannot produce a finite prize
    Indeterminate,
}

impl ReplicaOutcome {
    /// Sentence shown under the archive table
    pub fn summary(&self) -> String {
        match self {
            Self::Prize { prize, .. } => format!(
                "Casting 1 USDC on this prediction would have returned {} USDCs",
                format_rounded(*prize, 3)
            ),
            Self::Indeterminate => {
                "The stored results for this game cannot produce a prize".to_string()
            }
        }
    }
}

/// Replica of the score of `selections` against `solutions`
///
/// Returns `None` when a hit event has a zero percentage sum, which means
/// the stored percentages disagree with the solution.
pub fn replica_score(
    selections: &[Selection],
    solutions: &[u8],
    percentages: &OptionPercentages,
    percentage_scale: u16,
) -> Result<Option<f64>> {
    require!(
        selections.len() == solutions.len(),
        ScoreError::LengthMismatch
    );

    let mut score = 1.0f64;

    for (event, (selection, &solution)) in selections.iter().zip(solutions).enumerate() {
        if !selection.is_decided() {
            tracing::warn!(event, "replica requested with an undecided event");
            return err!(ScoreError::MissingSelection);
        }
        if selection.is_skip() || solution == 0 {
            continue;
        }

        let mut multipliers_sum = 0.0f64;
        for &option in selection.options() {
            multipliers_sum += percentages
                .percent(event, option, percentage_scale)
                .ok_or(ScoreError::MissingPercentage)?;
        }

        if selection.contains(solution) {
            if multipliers_sum == 0.0 {
                return Ok(None);
            }
            score = score * 100.0 / multipliers_sum;
        } else {
            score = score * (100.0 - multipliers_sum) / 100.0;
        }
    }

    Ok(Some(score))
}

/// Full replica: score, then share of the prize pool
pub fn replica_prize(
    selections: &[Selection],
    solutions: &[u8],
    percentages: &OptionPercentages,
    prize: &GamePrize,
    config: &ClientConfig,
) -> Result<ReplicaOutcome> {
    let Some(score) = replica_score(selections, solutions, percentages, config.percentage_scale)?
    else {
        return Ok(ReplicaOutcome::Indeterminate);
    };

    let score_sum = to_decimal(prize.score_sum, config.score_decimals);
    if score_sum == 0.0 {
        return Ok(ReplicaOutcome::Indeterminate);
    }
    let prize_pool = to_decimal(u128::from(prize.prize_pool), config.amount_decimals);

    Ok(ReplicaOutcome::Prize {
        score,
        prize: score / score_sum * prize_pool,
    })
}

/// Round to at most `decimals` places, dropping trailing zeros
pub fn format_rounded(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[error_code(offset = 6300)]
pub enum ScoreError {
    #[msg("Selections do not match the number of solutions")]
    LengthMismatch,
    #[msg("You must select an option for every event, even if it is skip")]
    MissingSelection,
    #[msg("No stored percentage for a selected option")]
    MissingPercentage,
    #[msg("Total score of the game is zero")]
    ZeroScoreSum,
    #[msg("Contributors fee exceeds 100%")]
    FeeTooHigh,
    #[msg("Payout arithmetic overflow")]
    Overflow,
}
