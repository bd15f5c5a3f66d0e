//! Account View
//!
//! State of the account page: which tab is open, the page cursor of the
//! "all predictions" tab, and the prediction cache behind every tab.
//!
//! ## Pages
//!
//! The "all" tab lists predictions newest first, `items_per_page` at a time:
//!
//! ```text
//!   page p shows ids  max(len - p*N, 0) ..= len - 1 - (p-1)*N
//! ```

use std::ops::RangeInclusive;

use crate::session::PredictionCache;
use crate::state::{GameData, UserData, UserPrediction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    /// Every prediction, paginated
    #[default]
    All,
    /// Predictions on the open game
    CurrentGame,
    /// Scored predictions waiting to be redeemed
    Redeemable,
}

#[derive(Clone, Debug)]
pub struct AccountView {
    pub tab: Tab,
    pub current_page: u64,
    pub total_pages: u64,
    pub game: GameData,
    pub user: UserData,
    pub cache: PredictionCache,
    items_per_page: u64,
}

impl AccountView {
    pub fn new(items_per_page: u64) -> Self {
        Self {
            tab: Tab::All,
            current_page: 1,
            total_pages: 0,
            game: GameData::default(),
            user: UserData::default(),
            cache: PredictionCache::default(),
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    /// Adopt fresh ledger counters
    ///
    /// Cached predictions are classified against the open and last scored
    /// game, so they are dropped when either moves.
    pub fn refresh(&mut self, game: GameData, user: UserData) {
        if game.game_id != self.game.game_id
            || game.last_game_calculated != self.game.last_game_calculated
        {
            self.cache.clear();
        }
        self.game = game;
        self.user = user;
        self.cache.resize(user.prediction_count);
        self.recount_pages();
    }

    pub fn recount_pages(&mut self) {
        self.total_pages = self.cache.len().div_ceil(self.items_per_page);
        self.current_page = self.current_page.clamp(1, self.total_pages.max(1));
    }

    /// Ids shown on the current page of the "all" tab, newest first
    pub fn page_range(&self) -> Option<RangeInclusive<u64>> {
        let len = self.cache.len();
        let skipped = (self.current_page - 1) * self.items_per_page;
        let start = len.checked_sub(1)?.checked_sub(skipped)?;
        let end = len.saturating_sub(self.current_page * self.items_per_page);
        Some(end..=start)
    }

    /// Page ids in display order
    pub fn page_ids(&self) -> Vec<u64> {
        self.page_range()
            .map(|range| range.rev().collect())
            .unwrap_or_default()
    }

    pub fn has_next_page(&self) -> bool {
        self.tab == Tab::All && self.current_page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.tab == Tab::All && self.current_page > 1
    }

    /// Predictions the open tab displays
    pub fn visible(&self) -> Vec<UserPrediction> {
        match self.tab {
            Tab::All => self.cache.collect(&self.page_ids()),
            Tab::CurrentGame => {
                let mut predictions: Vec<_> = self
                    .cache
                    .iter()
                    .filter(|p| p.is_withdrawable())
                    .copied()
                    .collect();
                predictions.reverse();
                predictions
            }
            Tab::Redeemable => self.cache.iter().filter(|p| p.is_redeemable()).copied().collect(),
        }
    }

    /// Every cached prediction that can be redeemed
    pub fn redeemable_ids(&self) -> Vec<u64> {
        self.cache
            .iter()
            .filter(|p| p.is_redeemable())
            .map(|p| p.prediction_id)
            .collect()
    }

    pub fn apply_redeemed(&mut self, ids: &[u64]) {
        for &id in ids {
            if let Some(prediction) = self.cache.get_mut(id) {
                prediction.mark_redeemed();
            }
        }
    }

    pub fn apply_withdrawn(&mut self, id: u64) {
        if self.cache.swap_remove(id) {
            self.user.prediction_count = self.cache.len();
            self.recount_pages();
        }
    }
}
