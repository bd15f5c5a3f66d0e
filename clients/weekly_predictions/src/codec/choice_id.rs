//! # ChoiceID Encoding
//!
//! ## Encoding
//!
//! ```text
//! 1. radix_i       = 2^options_i - 1
//! 2. combination_i = Σ 2^(option - 1)   over selected options (skip = 0)
//! 3. ChoiceID      = Σ combination_i * base_i,  base_0 = 1, base_i+1 = base_i * radix_i
//! ```
//!
//! ## Decoding
//!
//! ```text
//! 1. combination_i = id mod radix_i
//! 2. id            = id / radix_i
//! 3. combination 0 → skip, otherwise every set bit b → option b + 1
//! ```
//!
//! At most `options_i - 1` options may be selected, which keeps every
//! combination strictly below its radix.

use anchor_lang::prelude::*;

use crate::state::{GameStructure, Selection};

/// Encoder/decoder for the ledger's ChoiceID format
pub struct ChoiceCodec;

impl ChoiceCodec {
    /// Number of distinct combinations of an event with `option_count` options
    pub fn radix(option_count: u8) -> u128 {
        (1u128 << option_count) - 1
    }

    /// Bitmask of one event's selection
    ///
    /// Skip and undecided both map to 0.
    pub fn combination(selection: &Selection) -> Result<u32> {
        selection.options().iter().try_fold(0u32, |mask, &option| {
            require!(option >= 1 && option <= 32, CodecError::CombinationOutOfRange);
            Ok(mask | (1u32 << (option - 1)))
        })
    }

    /// Pack one selection per event into a ChoiceID
    ///
    /// Selection limits are checked by the caller; the codec only refuses
    /// to emit a combination that would spill into the next event.
    ///
    /// # Example
    /// ```ignore
    /// // Two events with 3 options each, option 1 then option 2
    /// let structure = GameStructure::new(vec![3, 3])?;
    /// let selections = [Selection::Options(vec![1]), Selection::Options(vec![2])];
    /// let id = ChoiceCodec::encode(&selections, &structure)?;
    /// // radix 7 per event: id = 1 * 1 + 2 * 7 = 15
    /// ```
    pub fn encode(selections: &[Selection], structure: &GameStructure) -> Result<u128> {
        require!(
            selections.len() == structure.len(),
            CodecError::LengthMismatch
        );

        let mut choice_id: u128 = 0;
        let mut base: u128 = 1;

        for (selection, option_count) in selections.iter().zip(structure.iter()) {
            let radix = Self::radix(option_count);
            let combination = u128::from(Self::combination(selection)?);
            require!(combination < radix, CodecError::CombinationOutOfRange);

            let term = combination.checked_mul(base).ok_or(CodecError::Overflow)?;
            choice_id = choice_id.checked_add(term).ok_or(CodecError::Overflow)?;

            // The base past the last event is never used, so only the
            // multiplications that feed a term need to fit
            base = base.checked_mul(radix).unwrap_or(u128::MAX);
        }

        Ok(choice_id)
    }

    /// Unpack a ChoiceID into one selection per event
    pub fn decode(choice_id: u128, structure: &GameStructure) -> Result<Vec<Selection>> {
        let mut remaining = choice_id;
        let mut selections = Vec::with_capacity(structure.len());

        for option_count in structure.iter() {
            let radix = Self::radix(option_count);
            let combination = remaining % radix;
            remaining /= radix;

            selections.push(Self::selection_from_combination(combination, option_count));
        }

        require!(remaining == 0, CodecError::ChoiceIdOutOfRange);
        Ok(selections)
    }

    fn selection_from_combination(mut combination: u128, option_count: u8) -> Selection {
        if combination == 0 {
            return Selection::Skip;
        }

        let mut options = Vec::new();
        let mut option = 1u8;
        while combination > 0 && option <= option_count {
            if combination & 1 == 1 {
                options.push(option);
            }
            combination >>= 1;
            option += 1;
        }
        Selection::Options(options)
    }

    /// Number of distinct ChoiceIDs a structure admits
    pub fn capacity(structure: &GameStructure) -> Result<u128> {
        structure.iter().try_fold(1u128, |acc, count| {
            acc.checked_mul(Self::radix(count))
                .ok_or_else(|| error!(CodecError::Overflow))
        })
    }
}

#[error_code(offset = 6100)]
pub enum CodecError {
    #[msg("Selection count does not match the game structure")]
    LengthMismatch,
    #[msg("Combination does not fit the event radix")]
    CombinationOutOfRange,
    #[msg("ChoiceID does not belong to this game structure")]
    ChoiceIdOutOfRange,
    #[msg("ChoiceID arithmetic overflow")]
    Overflow,
}

// ============================================================================
// TESTS
// ============================================================================
