//! # Session
//!
//! Everything the client remembers between user actions lives here, in
//! explicit view structs owned by one `Session`:
//!
//! - [`BoardView`] - the open game and the selections being built
//! - [`ArchiveView`] - a past game being replayed
//! - [`AccountView`] - the user's predictions, tabs and pages
//!
//! The session also owns the [`OperationLock`] that keeps user actions from
//! overlapping. The actions themselves live in [`crate::actions`].

pub mod account;
pub mod board;
pub mod cache;
pub mod lock;
pub mod scan;

pub use account::*;
pub use board::*;
pub use cache::*;
pub use lock::*;
pub use scan::*;

use anchor_lang::prelude::*;

use crate::ledger::LedgerClient;
use crate::state::ClientConfig;

/// Client state for one user, backed by a ledger client
pub struct Session<L: LedgerClient> {
    pub(crate) ledger: L,
    pub(crate) config: ClientConfig,
    pub(crate) wallet: Option<Pubkey>,
    pub(crate) lock: OperationLock,
    pub(crate) board: BoardView,
    pub(crate) archive: ArchiveView,
    pub(crate) account: AccountView,
}

impl<L: LedgerClient> Session<L> {
    pub fn new(ledger: L, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let account = AccountView::new(config.items_per_page);
        Ok(Self {
            ledger,
            config,
            wallet: None,
            lock: OperationLock::new(),
            board: BoardView::default(),
            archive: ArchiveView::default(),
            account,
        })
    }

    /// Attach the wallet the user connected
    pub fn connect(&mut self, owner: Pubkey) {
        if self.wallet != Some(owner) {
            self.account = AccountView::new(self.config.items_per_page);
        }
        self.wallet = Some(owner);
        tracing::info!(%owner, "wallet attached");
    }

    /// Forget the wallet and everything loaded for it
    pub fn disconnect(&mut self) {
        self.wallet = None;
        self.account = AccountView::new(self.config.items_per_page);
        tracing::info!("wallet detached");
    }

    pub fn wallet(&self) -> Option<Pubkey> {
        self.wallet
    }

    pub(crate) fn require_wallet(&self) -> Result<Pubkey> {
        self.wallet
            .ok_or_else(|| error!(SessionError::WalletNotConnected))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Handle for views that need to know whether an action is running
    pub fn lock(&self) -> OperationLock {
        self.lock.clone()
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn archive(&self) -> &ArchiveView {
        &self.archive
    }

    pub fn account(&self) -> &AccountView {
        &self.account
    }
}

#[error_code(offset = 6000)]
pub enum SessionError {
    #[msg("Another operation is already in progress")]
    OperationInProgress,
    #[msg("Please connect your wallet first")]
    WalletNotConnected,
    #[msg("Please enter a valid amount")]
    InvalidAmount,
    #[msg("Game data has not been loaded")]
    GameNotLoaded,
    #[msg("Event does not exist in this game")]
    UnknownEvent,
    #[msg("The current game is still running")]
    GameStillRunning,
    #[msg("Results are not available for this game yet")]
    GameNotScored,
    #[msg("No earlier game to show")]
    NoPreviousGame,
    #[msg("No later game to show")]
    NoNextGame,
    #[msg("Already on the last page")]
    NoNextPage,
    #[msg("Already on the first page")]
    NoPreviousPage,
    #[msg("Prediction not found")]
    PredictionNotFound,
    #[msg("Prediction cannot be redeemed")]
    NotRedeemable,
    #[msg("No predictions available for redemption")]
    NothingToRedeem,
    #[msg("Only predictions on the open game can be withdrawn")]
    NotWithdrawable,
}
