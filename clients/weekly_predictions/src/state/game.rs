//! Game State
//!
//! Read-only views of one weekly game as returned by the ledger: its event
//! structure, the events themselves, the stake distribution across options
//! and, once scored, the solutions and prize pool.

use anchor_lang::prelude::*;

/// Largest option count an event may declare
///
/// A combination is a bitmask over the options, so the count must fit a `u32`.
pub const MAX_OPTIONS_PER_EVENT: u8 = 31;

/// Option count of every event in a game, in event order
///
/// The implicit "skip" outcome is not counted.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStructure(Vec<u8>);

impl GameStructure {
    pub fn new(option_counts: Vec<u8>) -> Result<Self> {
        for &count in &option_counts {
            require!(
                count > 0 && count <= MAX_OPTIONS_PER_EVENT,
                GameError::InvalidOptionCount
            );
        }
        Ok(Self(option_counts))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option count of event `index`
    pub fn option_count(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl AsRef<[u8]> for GameStructure {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Global game counters (`getGameData` on the ledger)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameData {
    /// Game currently open for predictions
    pub game_id: u64,

    /// Most recent game whose scores have been calculated
    pub last_game_calculated: u64,

    /// Prize pool of the open game (6 decimals)
    pub game_prize: u64,

    /// Ledger clock at the time of the query
    pub current_timestamp: i64,
}

impl GameData {
    /// Whether game `game_id` has been scored
    pub fn is_scored(&self, game_id: u64) -> bool {
        game_id <= self.last_game_calculated
    }
}

/// Event layout of a single game
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameEvents {
    /// Global event indexes, used to look up descriptions
    pub event_indexes: Vec<u64>,

    /// Correct option per event (0 = void or not yet solved)
    pub solutions: Vec<u8>,

    /// Option count per event
    pub structure: GameStructure,
}

/// One predictable event
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventDetails {
    pub description: String,
    pub options: Vec<String>,
}

/// Prize figures of a scored game
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GamePrize {
    /// Prize pool (6 decimals)
    pub prize_pool: u64,

    /// Sum of every prediction's score (18 decimals)
    pub score_sum: u128,
}

/// Share of stake on every option of every event
///
/// Raw chain values are tenths of a percent: 400 means 40.0 %.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionPercentages(Vec<Vec<u16>>);

impl OptionPercentages {
    pub fn new(raw: Vec<Vec<u16>>) -> Self {
        Self(raw)
    }

    /// Percentage of event `event` staked on 1-based option `option`
    pub fn percent(&self, event: usize, option: u8, scale: u16) -> Option<f64> {
        let index = usize::from(option).checked_sub(1)?;
        let raw = *self.0.get(event)?.get(index)?;
        Some(f64::from(raw) / f64::from(scale))
    }

    pub fn events(&self) -> usize {
        self.0.len()
    }

    pub fn raw(&self) -> &[Vec<u16>] {
        &self.0
    }
}

/// A game merged with its event descriptions, ready for display
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSnapshot {
    pub game_id: u64,
    pub structure: GameStructure,
    pub events: Vec<EventView>,
    pub percentages: OptionPercentages,
    /// Present once the game has been scored
    pub prize: Option<GamePrize>,
}

impl GameSnapshot {
    /// Solutions in event order, 0 where unknown
    pub fn solutions(&self) -> Vec<u8> {
        self.events
            .iter()
            .map(|event| event.solution.unwrap_or(0))
            .collect()
    }

    pub fn is_scored(&self) -> bool {
        self.prize.is_some()
    }
}

/// One event row
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventView {
    /// Global event index
    pub rank: u64,
    pub description: String,
    pub options: Vec<String>,
    /// Correct option, only known for scored games
    pub solution: Option<u8>,
}

/// Merge a game's layout with its event descriptions
pub fn merge_events(
    events: &GameEvents,
    details: Vec<EventDetails>,
    scored: bool,
) -> Result<Vec<EventView>> {
    require!(
        details.len() == events.event_indexes.len()
            && events.structure.len() == events.event_indexes.len(),
        GameError::EventCountMismatch
    );

    Ok(details
        .into_iter()
        .enumerate()
        .map(|(i, detail)| EventView {
            rank: events.event_indexes[i],
            description: detail.description,
            options: detail.options,
            solution: if scored {
                events.solutions.get(i).copied()
            } else {
                None
            },
        })
        .collect())
}

#[error_code(offset = 6400)]
pub enum GameError {
    #[msg("Every event needs between 1 and 31 options")]
    InvalidOptionCount,
    #[msg("Event details do not match the game structure")]
    EventCountMismatch,
}
