//! Redeem Actions
//!
//! Collecting the prize of scored predictions, one at a time, a hand-picked
//! set, or every redeemable prediction the account page has loaded. A
//! prediction is redeemable when its game has been scored and it has not
//! been redeemed yet.

use anchor_lang::prelude::*;

use crate::actions::log_failure;
use crate::ledger::LedgerClient;
use crate::session::{Session, SessionError};

impl<L: LedgerClient> Session<L> {
    pub async fn redeem_prediction(&mut self, prediction_id: u64) -> Result<()> {
        self.redeem_selected(&[prediction_id]).await
    }

    /// Redeem the given predictions in one ledger call
    pub async fn redeem_selected(&mut self, prediction_ids: &[u64]) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;

        let mut ids = prediction_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        require!(!ids.is_empty(), SessionError::NothingToRedeem);

        for &id in &ids {
            let prediction = self
                .account
                .cache
                .get(id)
                .ok_or(SessionError::PredictionNotFound)?;
            if !prediction.is_redeemable() {
                tracing::warn!(
                    prediction_id = id,
                    status = prediction.status_label(),
                    "redeem rejected"
                );
                return err!(SessionError::NotRedeemable);
            }
        }

        self.submit_redemption(owner, &ids).await
    }

    /// Redeem every loaded prediction that is redeemable
    pub async fn redeem_all(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;

        let ids = self.account.redeemable_ids();
        require!(!ids.is_empty(), SessionError::NothingToRedeem);

        self.submit_redemption(owner, &ids).await
    }

    async fn submit_redemption(&mut self, owner: Pubkey, ids: &[u64]) -> Result<()> {
        self.ledger
            .redeem_predictions(&owner, ids)
            .await
            .inspect_err(log_failure("redeem"))?;

        self.account.apply_redeemed(ids);
        tracing::info!(count = ids.len(), ?ids, "predictions redeemed");
        Ok(())
    }
}
