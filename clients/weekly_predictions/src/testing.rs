//! In-memory ledger for tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use anchor_lang::prelude::*;
use async_trait::async_trait;
use solana_sdk::signature::{Keypair, Signer};

use crate::ledger::{CastRequest, LedgerClient, LedgerError};
use crate::state::{
    closes_at, ClientConfig, EventDetails, GameData, GameEvents, GamePrize, GameStructure,
    OptionPercentages, PredictionRecord, UserData,
};

pub const ONE_SCORE: u128 = 1_000_000_000_000_000_000;

pub struct FakeGame {
    pub events: GameEvents,
    pub details: Vec<EventDetails>,
    pub percentages: OptionPercentages,
    pub prize: GamePrize,
}

impl FakeGame {
    pub fn new(
        game_id: u64,
        structure: &[u8],
        solutions: &[u8],
        percentages: Vec<Vec<u16>>,
    ) -> Self {
        let details = structure
            .iter()
            .enumerate()
            .map(|(i, &count)| EventDetails {
                description: format!("Game {game_id} event {i}"),
                options: (1..=count).map(|o| format!("Option {o}")).collect(),
            })
            .collect();

        Self {
            events: GameEvents {
                event_indexes: (0..structure.len() as u64).map(|i| game_id * 100 + i).collect(),
                solutions: solutions.to_vec(),
                structure: GameStructure::new(structure.to_vec()).unwrap(),
            },
            details,
            percentages: OptionPercentages::new(percentages),
            prize: GamePrize::default(),
        }
    }
}

#[derive(Default)]
pub struct FakeState {
    pub game_data: GameData,
    pub games: BTreeMap<u64, FakeGame>,
    pub user: UserData,
    pub predictions: Vec<PredictionRecord>,
    pub allowance: u64,
    pub approvals: Vec<u64>,
    pub casts: Vec<CastRequest>,
    pub prediction_fetches: Vec<Vec<u64>>,
    pub redeemed_batches: Vec<Vec<u64>>,
    pub advanced: u32,
    pub fail_writes: bool,
    /// Answer prediction queries with one record too few
    pub short_reads: bool,
}

#[derive(Default)]
pub struct FakeLedger {
    pub state: Mutex<FakeState>,
}

impl FakeLedger {
    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    fn write(&self) -> Result<std::sync::MutexGuard<'_, FakeState>> {
        let state = self.state.lock().unwrap();
        if state.fail_writes {
            return err!(LedgerError::TransactionReverted);
        }
        Ok(state)
    }
}

/// Open game 5 (an hour left), closed game 4, scored game 3 and seven
/// predictions: ids 0-1 on game 3, id 2 on game 4, ids 3-6 on game 5
pub fn seeded_ledger() -> FakeLedger {
    let ledger = FakeLedger::default();
    ledger.with(|s| {
        s.game_data = GameData {
            game_id: 5,
            last_game_calculated: 3,
            game_prize: 50_000_000,
            current_timestamp: closes_at(&ClientConfig::default(), 5) - 3600,
        };

        let scored_pct = vec![vec![400, 600], vec![300, 700]];
        let mut scored = FakeGame::new(3, &[2, 2], &[1, 2], scored_pct);
        scored.prize = GamePrize {
            prize_pool: 100_000_000,
            score_sum: 10 * ONE_SCORE,
        };
        s.games.insert(3, scored);
        s.games.insert(4, FakeGame::new(4, &[3], &[0], vec![vec![300, 300, 400]]));
        let open_pct = vec![vec![500, 500], vec![200, 300, 500]];
        s.games.insert(5, FakeGame::new(5, &[2, 3], &[], open_pct));

        s.predictions = vec![
            scored_record(3, 1),
            scored_record(3, 2),
            open_record(4),
            open_record(5),
            open_record(5),
            open_record(5),
            open_record(5),
        ];
    });
    ledger
}

pub fn wallet() -> Pubkey {
    Keypair::new().pubkey()
}

pub fn config() -> ClientConfig {
    ClientConfig::with_mint(Pubkey::new_unique())
}

/// Scored record on `game_id` with score 1.0 of a 4.0 sum on a 40 unit pool
pub fn scored_record(game_id: u64, amount: u64) -> PredictionRecord {
    PredictionRecord {
        choice_id: 1,
        amount,
        game_id,
        redeemed: false,
        score: ONE_SCORE,
        total_prize: 40_000_000,
        total_score: 4 * ONE_SCORE,
        contributors_fee_bps: 0,
    }
}

pub fn open_record(game_id: u64) -> PredictionRecord {
    PredictionRecord {
        choice_id: 2,
        amount: 1,
        game_id,
        ..PredictionRecord::default()
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn game_data(&self) -> Result<GameData> {
        Ok(self.with(|s| s.game_data))
    }

    async fn game_events(&self, game_id: u64) -> Result<GameEvents> {
        self.with(|s| s.games.get(&game_id).map(|g| g.events.clone()))
            .ok_or_else(|| error!(LedgerError::RequestFailed))
    }

    async fn events(&self, event_indexes: &[u64]) -> Result<Vec<EventDetails>> {
        self.with(|s| {
            event_indexes
                .iter()
                .map(|index| {
                    s.games
                        .values()
                        .find_map(|g| {
                            let at = g.events.event_indexes.iter().position(|i| i == index)?;
                            Some(g.details[at].clone())
                        })
                        .ok_or_else(|| error!(LedgerError::RequestFailed))
                })
                .collect()
        })
    }

    async fn option_percentages(&self, game_id: u64) -> Result<OptionPercentages> {
        self.with(|s| s.games.get(&game_id).map(|g| g.percentages.clone()))
            .ok_or_else(|| error!(LedgerError::RequestFailed))
    }

    async fn game_prize(&self, game_id: u64) -> Result<GamePrize> {
        self.with(|s| s.games.get(&game_id).map(|g| g.prize))
            .ok_or_else(|| error!(LedgerError::RequestFailed))
    }

    async fn user_data(&self, _owner: &Pubkey) -> Result<UserData> {
        Ok(self.with(|s| UserData {
            previous_redemptions: s.user.previous_redemptions,
            prediction_count: s.predictions.len() as u64,
        }))
    }

    async fn player_predictions(
        &self,
        _owner: &Pubkey,
        ids: &[u64],
    ) -> Result<Vec<PredictionRecord>> {
        self.with(|s| {
            s.prediction_fetches.push(ids.to_vec());
            let mut records = ids
                .iter()
                .map(|&id| {
                    s.predictions
                        .get(id as usize)
                        .copied()
                        .ok_or_else(|| error!(LedgerError::RequestFailed))
                })
                .collect::<Result<Vec<_>>>()?;
            if s.short_reads {
                records.pop();
            }
            Ok(records)
        })
    }

    async fn collateral_allowance(&self, _owner: &Pubkey) -> Result<u64> {
        Ok(self.with(|s| s.allowance))
    }

    async fn approve_collateral(&self, _owner: &Pubkey, amount: u64) -> Result<()> {
        let mut state = self.write()?;
        state.allowance = amount;
        state.approvals.push(amount);
        Ok(())
    }

    async fn cast_prediction(&self, request: &CastRequest) -> Result<()> {
        let mut state = self.write()?;
        state.casts.push(*request);
        state.predictions.push(PredictionRecord {
            choice_id: request.choice_id,
            amount: request.amount,
            game_id: request.game_id,
            ..PredictionRecord::default()
        });
        Ok(())
    }

    async fn redeem_predictions(&self, _owner: &Pubkey, ids: &[u64]) -> Result<()> {
        let mut state = self.write()?;
        for &id in ids {
            if let Some(record) = state.predictions.get_mut(id as usize) {
                record.redeemed = true;
            }
        }
        state.redeemed_batches.push(ids.to_vec());
        Ok(())
    }

    async fn withdraw_prediction(&self, _owner: &Pubkey, id: u64) -> Result<()> {
        let mut state = self.write()?;
        let index = id as usize;
        if index >= state.predictions.len() {
            return err!(LedgerError::TransactionReverted);
        }
        state.predictions.swap_remove(index);
        Ok(())
    }

    async fn advance_phase(&self) -> Result<()> {
        let mut state = self.write()?;
        state.advanced += 1;
        state.game_data.game_id += 1;
        Ok(())
    }
}
