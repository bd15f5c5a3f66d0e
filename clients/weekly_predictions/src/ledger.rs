//! Ledger Client
//!
//! Everything the client knows about games and predictions comes from the
//! ledger, and every state change goes through it. This module only defines
//! the seam; connecting a wallet, signing and submitting transactions are
//! the implementor's job.
//!
//! ## Calls
//!
//! Reads:
//! - `game_data` - open game id, last scored game, open prize pool, clock
//! - `game_events` / `events` - event layout of a game and its descriptions
//! - `option_percentages` / `game_prize` - stake distribution and prize pool
//! - `user_data` / `player_predictions` - a user's prediction history
//! - `collateral_allowance` - collateral the ledger may pull from the user
//!
//! Writes:
//! - `approve_collateral`, `cast_prediction`, `redeem_predictions`,
//!   `withdraw_prediction`, `advance_phase`

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use async_trait::async_trait;

use crate::state::{
    EventDetails, GameData, GameEvents, GamePrize, OptionPercentages, PredictionRecord, UserData,
};

/// Parameters of a new prediction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastRequest {
    /// Prediction owner
    pub owner: Pubkey,

    /// Owner's collateral token account the stake is pulled from
    pub collateral_account: Pubkey,

    /// Packed selections
    pub choice_id: u128,

    /// Stake in whole collateral units
    pub amount: u64,

    /// Game the prediction is cast on
    pub game_id: u64,
}

impl CastRequest {
    /// Build a request paying from the owner's associated token account
    pub fn new(
        owner: Pubkey,
        collateral_mint: &Pubkey,
        choice_id: u128,
        amount: u64,
        game_id: u64,
    ) -> Self {
        Self {
            owner,
            collateral_account: get_associated_token_address(&owner, collateral_mint),
            choice_id,
            amount,
            game_id,
        }
    }
}

/// Asynchronous, fallible access to the prediction ledger
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn game_data(&self) -> Result<GameData>;

    async fn game_events(&self, game_id: u64) -> Result<GameEvents>;

    async fn events(&self, event_indexes: &[u64]) -> Result<Vec<EventDetails>>;

    async fn option_percentages(&self, game_id: u64) -> Result<OptionPercentages>;

    async fn game_prize(&self, game_id: u64) -> Result<GamePrize>;

    async fn user_data(&self, owner: &Pubkey) -> Result<UserData>;

    /// Records for the given prediction ids, in the same order
    async fn player_predictions(
        &self,
        owner: &Pubkey,
        ids: &[u64],
    ) -> Result<Vec<PredictionRecord>>;

    /// Collateral (smallest unit) the ledger may currently pull from `owner`
    async fn collateral_allowance(&self, owner: &Pubkey) -> Result<u64>;

    async fn approve_collateral(&self, owner: &Pubkey, amount: u64) -> Result<()>;

    async fn cast_prediction(&self, request: &CastRequest) -> Result<()>;

    async fn redeem_predictions(&self, owner: &Pubkey, ids: &[u64]) -> Result<()>;

    /// Cancel a prediction on the open game
    ///
    /// The ledger moves the owner's last prediction into the freed id.
    async fn withdraw_prediction(&self, owner: &Pubkey, id: u64) -> Result<()>;

    /// Close the open game and open the next one
    async fn advance_phase(&self) -> Result<()>;
}

/// Errors for implementors to report ledger failures with
#[error_code(offset = 6600)]
pub enum LedgerError {
    #[msg("Ledger request failed")]
    RequestFailed,
    #[msg("Transaction rejected by the wallet")]
    TransactionRejected,
    #[msg("Transaction reverted by the ledger")]
    TransactionReverted,
    #[msg("Ledger returned a malformed response")]
    MalformedResponse,
}
