//! Open Game Actions
//!
//! Loading the open game, building a selection and casting it.
//!
//! ## Cast Flow
//!
//! 1. Validate the stake and every event's selection
//! 2. Pack the selections into a ChoiceID
//! 3. Approve collateral if the current allowance is short
//! 4. Submit the prediction
//! 5. Clear the selections

use anchor_lang::prelude::*;

use crate::actions::log_failure;
use crate::codec::{ChoiceCodec, CodecError};
use crate::ledger::{CastRequest, LedgerClient};
use crate::session::{Session, SessionError};
use crate::state::{game_clock, GameClock};

/// Summary of a successful cast
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastReceipt {
    pub game_id: u64,
    pub choice_id: u128,
    pub amount: u64,
}

impl<L: LedgerClient> Session<L> {
    /// Load the open game and reset the board
    pub async fn load_board(&mut self) -> Result<()> {
        let game = self.ledger.game_data().await?;
        let snapshot = self.fetch_snapshot(game.game_id, false).await?;

        self.board.clock = Some(game_clock(&self.config, game.game_id, game.current_timestamp));
        self.board.game = Some(game);
        self.board.board.load(snapshot);
        Ok(())
    }

    /// Click on option `option` (0 = skip) of event `event` of the open game
    pub fn toggle_board_option(&mut self, event: usize, option: u8) -> Result<()> {
        self.board.board.toggle(event, option)
    }

    /// Cast the board's selections with a stake of `amount` whole units
    pub async fn cast_prediction(&mut self, amount: u64) -> Result<CastReceipt> {
        let _guard = self.lock.try_acquire()?;
        let owner = self.require_wallet()?;
        require!(amount > 0, SessionError::InvalidAmount);

        let snapshot = self.board.board.snapshot()?;
        let game_id = snapshot.game_id;
        let structure = snapshot.structure.clone();
        let selections = &self.board.board.selections;
        require!(selections.len() == structure.len(), CodecError::LengthMismatch);

        let events = selections.iter().zip(structure.iter()).enumerate();
        for (event, (selection, option_count)) in events {
            selection
                .validate(option_count)
                .inspect_err(|err| tracing::warn!(event = event + 1, %err, "selection rejected"))?;
        }
        let choice_id = ChoiceCodec::encode(selections, &structure)?;

        let required = 10u64
            .checked_pow(self.config.amount_decimals)
            .and_then(|unit| amount.checked_mul(unit))
            .ok_or(SessionError::InvalidAmount)?;
        let allowance = self.ledger.collateral_allowance(&owner).await?;
        if allowance < required {
            tracing::debug!(allowance, required, "raising collateral allowance");
            self.ledger
                .approve_collateral(&owner, required)
                .await
                .inspect_err(log_failure("approve"))?;
        }

        let mint = self.config.collateral_mint;
        let request = CastRequest::new(owner, &mint, choice_id, amount, game_id);
        self.ledger
            .cast_prediction(&request)
            .await
            .inspect_err(log_failure("cast"))?;

        self.board.board.reset_selections();
        tracing::info!(game_id, %choice_id, amount, "prediction cast");

        Ok(CastReceipt {
            game_id,
            choice_id,
            amount,
        })
    }

    /// Close the open game once its time is up and load the next one
    pub async fn start_next_game(&mut self) -> Result<()> {
        let _guard = self.lock.try_acquire()?;
        require!(
            matches!(self.board.clock, Some(GameClock::Expired)),
            SessionError::GameStillRunning
        );

        self.ledger
            .advance_phase()
            .await
            .inspect_err(log_failure("advance phase"))?;
        tracing::info!("next game started");

        self.load_board().await
    }
}
