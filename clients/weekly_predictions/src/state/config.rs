//! Client Configuration
//!
//! Deployment-wide settings shared by every page of the client.

use anchor_lang::prelude::*;

use crate::scoring::{AMOUNT_DECIMALS, SCORE_DECIMALS};

/// Unix timestamp at which game 0 opened
pub const GAME_GENESIS_TIMESTAMP: i64 = 1_733_079_600;

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Client configuration
///
/// `ClientConfig::default()` matches the deployed ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Collateral token mint (6-decimal stablecoin)
    pub collateral_mint: Pubkey,

    /// Predictions shown per page and fetched per scan batch
    pub items_per_page: u64,

    /// Decimals of collateral amounts and prize pools
    pub amount_decimals: u32,

    /// Decimals of fixed-point scores
    pub score_decimals: u32,

    /// Chain percentages are stored multiplied by this factor
    pub percentage_scale: u16,

    /// Unix timestamp at which game 0 opened
    pub genesis_timestamp: i64,

    /// Length of one game in days
    pub game_length_days: i64,

    /// Lowest game id the archive lets the user navigate to
    pub first_browsable_game: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            collateral_mint: Pubkey::default(),
            items_per_page: 5,
            amount_decimals: AMOUNT_DECIMALS,
            score_decimals: SCORE_DECIMALS,
            percentage_scale: 10,
            genesis_timestamp: GAME_GENESIS_TIMESTAMP,
            game_length_days: 7,
            first_browsable_game: 1,
        }
    }
}

impl ClientConfig {
    /// Default configuration for the given collateral mint
    pub fn with_mint(collateral_mint: Pubkey) -> Self {
        Self {
            collateral_mint,
            ..Self::default()
        }
    }

    /// Reject settings that would stall pagination or the game clock
    pub fn validate(&self) -> Result<()> {
        require!(self.items_per_page > 0, ConfigError::ZeroPageSize);
        require!(self.game_length_days > 0, ConfigError::ZeroGameLength);
        require!(self.percentage_scale > 0, ConfigError::ZeroPercentageScale);
        Ok(())
    }
}

#[error_code(offset = 6500)]
pub enum ConfigError {
    #[msg("Items per page must be greater than zero")]
    ZeroPageSize,
    #[msg("Game length must be at least one day")]
    ZeroGameLength,
    #[msg("Percentage scale must be greater than zero")]
    ZeroPercentageScale,
}
