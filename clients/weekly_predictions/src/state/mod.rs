//! State structures shared by the codec, the scoring replica and the session

pub mod config;
pub mod game;
pub mod prediction;
pub mod schedule;
pub mod selection;

pub use config::*;
pub use game::*;
pub use prediction::*;
pub use schedule::*;
pub use selection::*;
