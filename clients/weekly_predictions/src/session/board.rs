//! Board and Archive Views
//!
//! The board is the open game the user is predicting on; the archive is a
//! past game the user replays against its published results. Both hold a
//! loaded game and a selection per event.

use anchor_lang::prelude::*;

use crate::session::SessionError;
use crate::state::{undecided, GameClock, GameData, GameSnapshot, Selection};

/// A loaded game plus the user's in-progress selections
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionBoard {
    pub snapshot: Option<GameSnapshot>,
    pub selections: Vec<Selection>,
}

impl SelectionBoard {
    /// Replace the loaded game, clearing every selection
    pub fn load(&mut self, snapshot: GameSnapshot) {
        self.selections = undecided(snapshot.structure.len());
        self.snapshot = Some(snapshot);
    }

    pub fn snapshot(&self) -> Result<&GameSnapshot> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| error!(SessionError::GameNotLoaded))
    }

    /// Apply a click on `option` (0 = skip) of event `event`
    pub fn toggle(&mut self, event: usize, option: u8) -> Result<()> {
        let option_count = self
            .snapshot()?
            .structure
            .option_count(event)
            .ok_or(SessionError::UnknownEvent)?;
        let selection = self
            .selections
            .get_mut(event)
            .ok_or(SessionError::UnknownEvent)?;
        selection.toggle(option, option_count)
    }

    pub fn reset_selections(&mut self) {
        let events = self.selections.len();
        self.selections = undecided(events);
    }
}

/// The open game
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardView {
    pub game: Option<GameData>,
    pub clock: Option<GameClock>,
    pub board: SelectionBoard,
}

/// A past game
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchiveView {
    pub game: Option<GameData>,
    /// Game currently displayed
    pub selected_game: u64,
    pub board: SelectionBoard,
}

impl ArchiveView {
    /// Whether "see results" applies to the displayed game
    pub fn results_available(&self) -> bool {
        self.game
            .map(|game| game.is_scored(self.selected_game))
            .unwrap_or(false)
    }
}
