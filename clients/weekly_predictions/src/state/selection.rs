//! Per-Event Selection
//!
//! A user's decision on one event is one of three things:
//!
//! ```text
//!   Undecided        nothing chosen yet (not castable)
//!   Skip             the event is left out of the score
//!   Options([..])    1-based option indices, sorted, at most count - 1 of them
//! ```
//!
//! Raw index lists use 0 as the skip marker. A list mixing 0 with real
//! options is rejected instead of guessing which one the user meant.

use anchor_lang::prelude::*;

/// Decision for a single event
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// No decision yet
    #[default]
    Undecided,
    /// Leave the event out of the prediction
    Skip,
    /// Hedge across these options (sorted, non-empty, 1-based)
    Options(Vec<u8>),
}

impl Selection {
    /// Build a selection from raw indices where 0 means "skip"
    pub fn from_indices(indices: &[u8]) -> Result<Self> {
        if indices.is_empty() {
            return Ok(Self::Undecided);
        }
        if indices.contains(&0) {
            require!(
                indices.iter().all(|&index| index == 0),
                SelectionError::SkipNotExclusive
            );
            return Ok(Self::Skip);
        }

        let mut options = indices.to_vec();
        options.sort_unstable();
        options.dedup();
        Ok(Self::Options(options))
    }

    /// Raw index form: `[0]` for skip, `[]` when undecided
    pub fn to_indices(&self) -> Vec<u8> {
        match self {
            Self::Undecided => Vec::new(),
            Self::Skip => vec![0],
            Self::Options(options) => options.clone(),
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Undecided)
    }

    /// Selected options; empty for skip and undecided
    pub fn options(&self) -> &[u8] {
        match self {
            Self::Options(options) => options,
            _ => &[],
        }
    }

    pub fn contains(&self, option: u8) -> bool {
        self.options().contains(&option)
    }

    /// Check the selection is castable on an event with `option_count` options
    pub fn validate(&self, option_count: u8) -> Result<()> {
        match self {
            Self::Undecided => err!(SelectionError::MissingSelection),
            Self::Skip => Ok(()),
            Self::Options(options) => {
                require!(!options.is_empty(), SelectionError::MissingSelection);
                require!(
                    options.iter().all(|&o| o >= 1 && o <= option_count),
                    SelectionError::InvalidOption
                );
                require!(
                    options.len() < usize::from(option_count),
                    SelectionError::TooManyOptions
                );
                Ok(())
            }
        }
    }

    /// Apply a click on option `option` (0 = skip) of an event with
    /// `option_count` options
    ///
    /// The selection is left untouched when the click is rejected.
    pub fn toggle(&mut self, option: u8, option_count: u8) -> Result<()> {
        require!(option <= option_count, SelectionError::InvalidOption);

        if option == 0 {
            *self = Self::Skip;
            return Ok(());
        }
        require!(option_count > 1, SelectionError::TooManyOptions);

        // Binary events behave like radio buttons that can be cleared
        if option_count == 2 {
            *self = if self.contains(option) {
                Self::Undecided
            } else {
                Self::Options(vec![option])
            };
            return Ok(());
        }

        match self {
            Self::Undecided | Self::Skip => {
                *self = Self::Options(vec![option]);
            }
            Self::Options(options) => {
                if let Some(position) = options.iter().position(|&o| o == option) {
                    options.remove(position);
                    if options.is_empty() {
                        *self = Self::Undecided;
                    }
                } else if options.len() + 1 < usize::from(option_count) {
                    let at = options.partition_point(|&o| o < option);
                    options.insert(at, option);
                } else {
                    tracing::warn!(
                        option,
                        limit = option_count - 1,
                        "selection limit reached"
                    );
                    return err!(SelectionError::TooManyOptions);
                }
            }
        }
        Ok(())
    }
}

/// Fresh, undecided selections for a game with `events` events
pub fn undecided(events: usize) -> Vec<Selection> {
    vec![Selection::Undecided; events]
}

#[error_code(offset = 6200)]
pub enum SelectionError {
    #[msg("Skip cannot be combined with other options")]
    SkipNotExclusive,
    #[msg("Select at least one option for every event, even if it is skip")]
    MissingSelection,
    #[msg("Option does not exist for this event")]
    InvalidOption,
    #[msg("Too many options selected for this event")]
    TooManyOptions,
}
