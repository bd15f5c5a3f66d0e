//! Withdraw Action
//!
//! Cancelling a prediction on the open game. The ledger fills the freed
//! slot with the user's last prediction, so the account page renumbers the
//! same way instead of reloading.

use anchor_lang::prelude::*;

use crate::actions::log_failure;
use crate::ledger::LedgerClient;
use crate::session::{Session, SessionError};

impl<L: LedgerClient> Session<L> {
    pub async fn withdraw_prediction(&mut self, prediction_id: u64) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;

        let prediction = self
            .account
            .cache
            .get(prediction_id)
            .ok_or(SessionError::PredictionNotFound)?;
        require!(prediction.is_withdrawable(), SessionError::NotWithdrawable);

        self.ledger
            .withdraw_prediction(&owner, prediction_id)
            .await
            .inspect_err(log_failure("withdraw"))?;

        self.account.apply_withdrawn(prediction_id);
        tracing::info!(prediction_id, remaining = self.account.cache.len(), "prediction withdrawn");
        Ok(())
    }
}
