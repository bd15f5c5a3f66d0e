//! Paginated Scan
//!
//! Some account tabs cannot be served from one page of ids: "current game"
//! needs every prediction on the open game, "redeemable" every scored,
//! unredeemed one. Predictions are stored in cast order, so both walk the id
//! range in batches until they cross a game boundary.
//!
//! ```text
//!                 batch ok                 boundary seen
//!   ┌──────────┐ ─────────▶ Scanning ──────────────────────▶ Found
//!   │ Scanning │
//!   └──────────┘ ─────────────────────────────────────────▶ Exhausted
//!                 no ids left
//! ```
//!
//! - current game: newest → oldest, stop at a prediction from another game
//! - redeemable: from the first unredeemed id upwards, stop at a prediction
//!   from a game that has not been scored

use crate::state::UserPrediction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    /// A batch crossed the boundary
    Found,
    /// Ran out of ids without crossing it
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanDirection {
    /// Newest first
    Descending,
    /// Oldest first
    Ascending,
}

/// Condition that ends a scan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanBoundary {
    /// A prediction from a game other than this one
    OtherGame(u64),
    /// A prediction from a game later than the last scored one
    UnscoredGame(u64),
}

impl ScanBoundary {
    fn crossed_by(&self, prediction: &UserPrediction) -> bool {
        match *self {
            Self::OtherGame(game_id) => prediction.game_id != game_id,
            Self::UnscoredGame(last_game_calculated) => prediction.game_id > last_game_calculated,
        }
    }
}

/// Batch-walk over the ids `[lower, upper)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginatedScan {
    direction: ScanDirection,
    boundary: ScanBoundary,
    batch_size: u64,
    lower: u64,
    upper: u64,
    state: ScanState,
}

impl PaginatedScan {
    pub fn new(
        direction: ScanDirection,
        boundary: ScanBoundary,
        batch_size: u64,
        lower: u64,
        upper: u64,
    ) -> Self {
        let state = if lower >= upper || batch_size == 0 {
            ScanState::Exhausted
        } else {
            ScanState::Scanning
        };
        Self {
            direction,
            boundary,
            batch_size,
            lower,
            upper,
            state,
        }
    }

    /// Predictions on the open game, newest first
    pub fn current_game(prediction_count: u64, batch_size: u64, game_id: u64) -> Self {
        Self::new(
            ScanDirection::Descending,
            ScanBoundary::OtherGame(game_id),
            batch_size,
            0,
            prediction_count,
        )
    }

    /// Scored predictions from the first unredeemed id onwards
    pub fn redeemable(
        previous_redemptions: u64,
        prediction_count: u64,
        batch_size: u64,
        last_game_calculated: u64,
    ) -> Self {
        Self::new(
            ScanDirection::Ascending,
            ScanBoundary::UnscoredGame(last_game_calculated),
            batch_size,
            previous_redemptions,
            prediction_count,
        )
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    /// Ids of the next batch, or `None` once the scan has stopped
    pub fn next_batch(&self) -> Option<Vec<u64>> {
        if self.state != ScanState::Scanning {
            return None;
        }
        let count = self.batch_size.min(self.upper - self.lower);
        Some(match self.direction {
            ScanDirection::Descending => (self.upper - count..self.upper).rev().collect(),
            ScanDirection::Ascending => (self.lower..self.lower + count).collect(),
        })
    }

    /// Consume the batch returned by `next_batch`, given its predictions
    pub fn advance(&mut self, batch: &[UserPrediction]) -> ScanState {
        if self.state != ScanState::Scanning {
            return self.state;
        }

        let count = self.batch_size.min(self.upper - self.lower);
        match self.direction {
            ScanDirection::Descending => self.upper -= count,
            ScanDirection::Ascending => self.lower += count,
        }

        self.state = if batch.iter().any(|p| self.boundary.crossed_by(p)) {
            ScanState::Found
        } else if self.lower >= self.upper {
            ScanState::Exhausted
        } else {
            ScanState::Scanning
        };
        self.state
    }
}
