//! Archive Actions
//!
//! Browsing closed games and replaying a selection against their results.
//!
//! ```text
//!   first_browsable_game ◀── previous ── selected ── next ──▶ game_id - 1
//! ```
//!
//! Only games up to `last_game_calculated` have results; later closed games
//! can be browsed but not replayed.

use anchor_lang::prelude::*;

use crate::ledger::LedgerClient;
use crate::scoring::{replica_prize, ReplicaOutcome};
use crate::session::{Session, SessionError};

impl<L: LedgerClient> Session<L> {
    /// Load the most recent closed game
    pub async fn load_archive(&mut self) -> Result<()> {
        let game = self.ledger.game_data().await?;
        let latest = game
            .game_id
            .checked_sub(1)
            .filter(|&id| id >= self.config.first_browsable_game)
            .ok_or(SessionError::NoPreviousGame)?;

        self.archive.game = Some(game);
        self.show_archived_game(latest).await
    }

    pub async fn previous_game(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        require!(self.archive.game.is_some(), SessionError::GameNotLoaded);

        let target = self
            .archive
            .selected_game
            .checked_sub(1)
            .filter(|&id| id >= self.config.first_browsable_game)
            .ok_or(SessionError::NoPreviousGame)?;
        self.show_archived_game(target).await
    }

    pub async fn next_game(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        let game = self.archive.game.ok_or(SessionError::GameNotLoaded)?;

        let target = self.archive.selected_game + 1;
        require!(target < game.game_id, SessionError::NoNextGame);
        self.show_archived_game(target).await
    }

    /// Click on option `option` (0 = skip) of event `event` of the archived game
    pub fn toggle_archive_option(&mut self, event: usize, option: u8) -> Result<()> {
        self.archive.board.toggle(event, option)
    }

    /// Replay the archive selections against the game's results
    pub fn see_results(&self) -> Result<ReplicaOutcome> {
        let snapshot = self.archive.board.snapshot()?;
        let prize = snapshot.prize.ok_or(SessionError::GameNotScored)?;

        let outcome = replica_prize(
            &self.archive.board.selections,
            &snapshot.solutions(),
            &snapshot.percentages,
            &prize,
            &self.config,
        )?;
        tracing::debug!(game_id = snapshot.game_id, ?outcome, "replica computed");
        Ok(outcome)
    }

    async fn show_archived_game(&mut self, game_id: u64) -> Result<()> {
        let game = self.archive.game.ok_or(SessionError::GameNotLoaded)?;
        let snapshot = self.fetch_snapshot(game_id, game.is_scored(game_id)).await?;

        self.archive.selected_game = game_id;
        self.archive.board.load(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Selection;
    use crate::testing::*;

    async fn session() -> Session<FakeLedger> {
        let mut session = Session::new(seeded_ledger(), config()).unwrap();
        session.load_archive().await.unwrap();
        session
    }

    fn prize(outcome: ReplicaOutcome) -> f64 {
        match outcome {
            ReplicaOutcome::Prize { prize, .. } => prize,
            ReplicaOutcome::Indeterminate => panic!("expected a prize"),
        }
    }

    #[tokio::test]
    async fn test_load_archive_shows_latest_closed_game() {
        let session = session().await;
        let archive = session.archive();
        assert_eq!(archive.selected_game, 4);
        assert!(!archive.results_available());
        assert_eq!(archive.board.selections, vec![Selection::Undecided]);
    }

    #[tokio::test]
    async fn test_navigation_bounds() {
        let mut session = session().await;
        assert_eq!(
            session.next_game().await.unwrap_err(),
            SessionError::NoNextGame.into()
        );

        session.previous_game().await.unwrap();
        assert_eq!(session.archive().selected_game, 3);
        assert!(session.archive().results_available());
        let snapshot = session.archive().board.snapshot().unwrap();
        assert_eq!(snapshot.solutions(), vec![1, 2]);

        // Game 2 is browsable but has no stored layout in the fake
        assert!(session.previous_game().await.is_err());
        assert_eq!(session.archive().selected_game, 3);
        assert!(!session.lock().is_busy());

        session.next_game().await.unwrap();
        assert_eq!(session.archive().selected_game, 4);
    }

    #[tokio::test]
    async fn test_no_previous_before_first_browsable_game() {
        let ledger = seeded_ledger();
        ledger.with(|s| s.game_data.game_id = 1);
        let mut session = Session::new(ledger, config()).unwrap();

        assert_eq!(
            session.load_archive().await.unwrap_err(),
            SessionError::NoPreviousGame.into()
        );
    }

    #[tokio::test]
    async fn test_see_results_hit_and_miss() {
        let mut session = session().await;
        session.previous_game().await.unwrap();

        // 40 % picked the winning option of event 0; event 1 skipped
        session.toggle_archive_option(0, 1).unwrap();
        session.toggle_archive_option(1, 0).unwrap();
        let outcome = session.see_results().unwrap();
        assert!((prize(outcome) - 25.0).abs() < 1e-9);
        assert_eq!(
            outcome.summary(),
            "Casting 1 USDC on this prediction would have returned 25 USDCs"
        );

        // Losing option held by 60 % keeps 40 % of the score
        session.toggle_archive_option(0, 2).unwrap();
        assert!((prize(session.see_results().unwrap()) - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_see_results_requires_scored_game() {
        let mut session = session().await;
        session.toggle_archive_option(0, 1).unwrap();
        assert_eq!(
            session.see_results().unwrap_err(),
            SessionError::GameNotScored.into()
        );
    }

    #[tokio::test]
    async fn test_changing_game_clears_selections() {
        let mut session = session().await;
        session.toggle_archive_option(0, 2).unwrap();
        session.previous_game().await.unwrap();
        assert_eq!(session.archive().board.selections, vec![Selection::Undecided; 2]);
    }
}
