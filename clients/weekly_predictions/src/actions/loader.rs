//! Game Loading
//!
//! Gathers a game's layout, descriptions, percentages and (once scored)
//! prize pool into one `GameSnapshot`.

use anchor_lang::prelude::*;

use crate::ledger::LedgerClient;
use crate::session::Session;
use crate::state::{merge_events, GameSnapshot};

impl<L: LedgerClient> Session<L> {
    pub(crate) async fn fetch_snapshot(&self, game_id: u64, scored: bool) -> Result<GameSnapshot> {
        let events = self.ledger.game_events(game_id).await?;
        let details = self.ledger.events(&events.event_indexes).await?;
        let percentages = self.ledger.option_percentages(game_id).await?;
        let prize = if scored {
            Some(self.ledger.game_prize(game_id).await?)
        } else {
            None
        };

        let merged = merge_events(&events, details, scored)?;
        tracing::debug!(game_id, events = merged.len(), scored, "game loaded");

        Ok(GameSnapshot {
            game_id,
            structure: events.structure,
            events: merged,
            percentages,
            prize,
        })
    }
}
