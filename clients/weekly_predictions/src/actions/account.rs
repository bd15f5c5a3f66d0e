//! Account Actions
//!
//! Loading the user's predictions into the account page.
//!
//! ## Tabs
//!
//! | Tab          | Source                                          |
//! |--------------|-------------------------------------------------|
//! | All          | one page of ids, newest first                   |
//! | Current game | descending scan until another game shows up     |
//! | Redeemable   | ascending scan from the first unredeemed id     |
//!
//! Every tab fetches only the ids the cache does not hold yet.

use anchor_lang::prelude::*;

use crate::codec::ChoiceCodec;
use crate::ledger::{LedgerClient, LedgerError};
use crate::session::{PaginatedScan, ScanState, Session, SessionError, Tab};
use crate::state::{merge_events, EventView, Selection, UserPrediction};

/// Everything the details dialog shows for one prediction
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionDetails {
    pub prediction: UserPrediction,
    pub events: Vec<EventView>,
    /// Decoded ChoiceID, one entry per event
    pub selections: Vec<Selection>,
}

impl<L: LedgerClient> Session<L> {
    /// Refresh counters and fill the open tab
    pub async fn load_account(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        self.reload_account().await
    }

    pub async fn show_tab(&mut self, tab: Tab) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;

        self.account.tab = tab;
        self.fill_tab(owner).await
    }

    pub async fn next_page(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;
        require!(self.account.has_next_page(), SessionError::NoNextPage);

        self.account.current_page += 1;
        if let Err(err) = self.fill_tab(owner).await {
            self.account.current_page -= 1;
            return Err(err);
        }
        Ok(())
    }

    pub async fn previous_page(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;
        require!(self.account.has_previous_page(), SessionError::NoPreviousPage);

        self.account.current_page -= 1;
        if let Err(err) = self.fill_tab(owner).await {
            self.account.current_page += 1;
            return Err(err);
        }
        Ok(())
    }

    /// Details of a loaded prediction, with its ChoiceID decoded against
    /// the layout of its game
    pub async fn prediction_details(&self, prediction_id: u64) -> Result<PredictionDetails> {
        let prediction = *self
            .account
            .cache
            .get(prediction_id)
            .ok_or(SessionError::PredictionNotFound)?;

        let events = self.ledger.game_events(prediction.game_id).await?;
        let details = self.ledger.events(&events.event_indexes).await?;
        let selections = ChoiceCodec::decode(prediction.choice_id, &events.structure)
            .inspect_err(|err| {
                tracing::warn!(
                    prediction_id,
                    choice_id = %prediction.choice_id,
                    %err,
                    "undecodable prediction"
                )
            })?;
        let scored = self.account.game.is_scored(prediction.game_id);

        Ok(PredictionDetails {
            prediction,
            events: merge_events(&events, details, scored)?,
            selections,
        })
    }

    pub(crate) async fn reload_account(&mut self) -> Result<()> {
        let owner = self.require_wallet()?;
        let game = self.ledger.game_data().await?;
        let user = self.ledger.user_data(&owner).await?;

        self.account.refresh(game, user);
        self.fill_tab(owner).await
    }

    async fn fill_tab(&mut self, owner: Pubkey) -> Result<()> {
        let account = &self.account;
        let batch_size = account.items_per_page();

        match account.tab {
            Tab::All => {
                let ids = account.cache.missing(&account.page_ids());
                self.fetch_predictions(owner, &ids).await?;
            }
            Tab::CurrentGame => {
                let scan = PaginatedScan::current_game(
                    account.cache.len(),
                    batch_size,
                    account.game.game_id,
                );
                self.run_scan(owner, scan).await?;
            }
            Tab::Redeemable => {
                let scan = PaginatedScan::redeemable(
                    account.user.previous_redemptions,
                    account.cache.len(),
                    batch_size,
                    account.game.last_game_calculated,
                );
                self.run_scan(owner, scan).await?;
            }
        }
        Ok(())
    }

    async fn run_scan(&mut self, owner: Pubkey, mut scan: PaginatedScan) -> Result<ScanState> {
        let mut batches = 0usize;
        while let Some(ids) = scan.next_batch() {
            let missing = self.account.cache.missing(&ids);
            self.fetch_predictions(owner, &missing).await?;

            let batch = self.account.cache.collect(&ids);
            scan.advance(&batch);
            batches += 1;
        }

        tracing::debug!(
            direction = ?scan.direction(),
            state = ?scan.state(),
            batches,
            "scan finished"
        );
        Ok(scan.state())
    }

    async fn fetch_predictions(&mut self, owner: Pubkey, ids: &[u64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let records = self.ledger.player_predictions(&owner, ids).await?;
        require!(records.len() == ids.len(), LedgerError::MalformedResponse);

        let game = self.account.game;
        let predictions: Vec<_> = ids
            .iter()
            .zip(&records)
            .map(|(&id, record)| UserPrediction::from_record(id, record, &game))
            .collect();
        for prediction in predictions {
            self.account.cache.insert(prediction);
        }

        tracing::debug!(fetched = records.len(), "predictions fetched");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Redeemability;
    use crate::testing::*;

    async fn session() -> Session<FakeLedger> {
        let mut session = Session::new(seeded_ledger(), config()).unwrap();
        session.connect(wallet());
        session.load_account().await.unwrap();
        session
    }

    fn visible_ids(session: &Session<FakeLedger>) -> Vec<u64> {
        session
            .account()
            .visible()
            .iter()
            .map(|p| p.prediction_id)
            .collect()
    }

    #[tokio::test]
    async fn test_load_account_fetches_first_page() {
        let session = session().await;
        let account = session.account();
        assert_eq!(account.total_pages, 2);
        assert_eq!(visible_ids(&session), vec![6, 5, 4, 3, 2]);
        assert_eq!(
            account.cache.get(6).unwrap().redeemability,
            Redeemability::Withdrawable
        );
        assert_eq!(account.cache.get(2).unwrap().status_label(), "Game Unfinished");
        session
            .ledger()
            .with(|s| assert_eq!(s.prediction_fetches, vec![vec![6, 5, 4, 3, 2]]));
    }

    #[tokio::test]
    async fn test_paging_uses_cache() {
        let mut session = session().await;

        session.next_page().await.unwrap();
        assert_eq!(visible_ids(&session), vec![1, 0]);
        assert_eq!(
            session.next_page().await.unwrap_err(),
            SessionError::NoNextPage.into()
        );

        session.previous_page().await.unwrap();
        assert_eq!(session.account().current_page, 1);
        assert_eq!(
            session.previous_page().await.unwrap_err(),
            SessionError::NoPreviousPage.into()
        );
        session.ledger().with(|s| assert_eq!(s.prediction_fetches.len(), 2));
    }

    #[tokio::test]
    async fn test_failed_page_fetch_keeps_page() {
        let mut session = session().await;
        session.ledger().with(|s| s.predictions.clear());

        assert!(session.next_page().await.is_err());
        assert_eq!(session.account().current_page, 1);
        assert!(!session.lock().is_busy());
    }

    #[tokio::test]
    async fn test_current_game_tab() {
        let mut session = session().await;
        session.show_tab(Tab::CurrentGame).await.unwrap();

        assert_eq!(visible_ids(&session), vec![6, 5, 4, 3]);
        // The first batch was already cached by the first page
        session.ledger().with(|s| assert_eq!(s.prediction_fetches.len(), 1));
        assert!(!session.account().has_next_page());
    }

    #[tokio::test]
    async fn test_redeemable_tab() {
        let mut session = session().await;
        session.show_tab(Tab::Redeemable).await.unwrap();

        assert_eq!(visible_ids(&session), vec![0, 1]);
        session
            .ledger()
            .with(|s| assert_eq!(s.prediction_fetches.last().unwrap(), &vec![0, 1]));

        let payout = session.account().cache.get(1).unwrap().payout.unwrap();
        assert!((payout.prize - 20.0).abs() < 1e-9);
        assert_eq!(payout.prize_label(), "20.00");
    }

    #[tokio::test]
    async fn test_redeemable_scan_starts_after_redemptions() {
        let ledger = seeded_ledger();
        ledger.with(|s| s.user.previous_redemptions = 1);
        let mut session = Session::new(ledger, config()).unwrap();
        session.connect(wallet());
        session.load_account().await.unwrap();

        session.show_tab(Tab::Redeemable).await.unwrap();
        assert_eq!(visible_ids(&session), vec![1]);
        session
            .ledger()
            .with(|s| assert_eq!(s.prediction_fetches.last().unwrap(), &vec![1]));
    }

    #[tokio::test]
    async fn test_broken_record_does_not_hide_redeemable_tab() {
        let ledger = seeded_ledger();
        ledger.with(|s| s.predictions[0].total_score = 0);
        let mut session = Session::new(ledger, config()).unwrap();
        session.connect(wallet());
        session.load_account().await.unwrap();

        session.show_tab(Tab::Redeemable).await.unwrap();
        assert_eq!(visible_ids(&session), vec![0, 1]);

        let account = session.account();
        assert!(account.cache.get(0).unwrap().payout.is_none());
        assert!(account.cache.get(1).unwrap().payout.is_some());
        assert_eq!(account.redeemable_ids(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_short_response_rejected() {
        let mut session = session().await;
        session.ledger().with(|s| s.short_reads = true);

        assert_eq!(
            session.next_page().await.unwrap_err(),
            LedgerError::MalformedResponse.into()
        );
        assert_eq!(session.account().cache.loaded(), 5);
    }

    #[tokio::test]
    async fn test_prediction_details_decodes_choice() {
        let mut session = session().await;
        session.next_page().await.unwrap();

        let details = session.prediction_details(0).await.unwrap();
        assert_eq!(details.prediction.game_id, 3);
        assert_eq!(
            details.selections,
            vec![Selection::Options(vec![1]), Selection::Skip]
        );
        assert_eq!(details.events[1].solution, Some(2));
        assert!(details.prediction.weighted_score().is_some());

        assert_eq!(
            session.prediction_details(42).await.unwrap_err(),
            SessionError::PredictionNotFound.into()
        );
    }

    #[tokio::test]
    async fn test_open_prediction_details_hide_solutions() {
        let session = session().await;
        let details = session.prediction_details(6).await.unwrap();
        assert!(details.events.iter().all(|e| e.solution.is_none()));
        assert!(details.prediction.payout.is_none());
    }
}
