//! Game Clock
//!
//! Games run back to back, each lasting `game_length_days`:
//!
//! ```text
//!   closes_at(g) = genesis + (g * length + length) * 86400
//! ```
//!
//! Once the open game's close time has passed anyone may ask the ledger to
//! advance to the next game.

use crate::state::{ClientConfig, SECONDS_PER_DAY};

/// Time left before the open game closes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameClock {
    Running(Countdown),
    /// Close time reached, the next game can be started
    Expired,
}

/// Remaining time split for display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_seconds(remaining: i64) -> Self {
        Self {
            days: remaining / SECONDS_PER_DAY,
            hours: (remaining % SECONDS_PER_DAY) / 3600,
            minutes: (remaining % 3600) / 60,
            seconds: remaining % 60,
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Unix timestamp at which `game_id` closes
pub fn closes_at(config: &ClientConfig, game_id: u64) -> i64 {
    let game = i64::try_from(game_id).unwrap_or(i64::MAX);
    let days = game
        .saturating_add(1)
        .saturating_mul(config.game_length_days);
    config
        .genesis_timestamp
        .saturating_add(days.saturating_mul(SECONDS_PER_DAY))
}

/// Clock of `game_id` as seen at `now`
pub fn game_clock(config: &ClientConfig, game_id: u64, now: i64) -> GameClock {
    let remaining = closes_at(config, game_id).saturating_sub(now);
    if remaining > 0 {
        GameClock::Running(Countdown::from_seconds(remaining))
    } else {
        GameClock::Expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_game_closes_after_one_week() {
        let config = ClientConfig::default();
        assert_eq!(closes_at(&config, 0), 1_733_079_600 + 7 * 86_400);
        assert_eq!(closes_at(&config, 2), 1_733_079_600 + 21 * 86_400);
    }

    #[test]
    fn test_countdown_split() {
        let config = ClientConfig::default();
        let close = closes_at(&config, 3);
        let now = close - (2 * 86_400 + 5 * 3600 + 7 * 60 + 9);

        match game_clock(&config, 3, now) {
            GameClock::Running(countdown) => {
                assert_eq!(countdown.to_string(), "2d 5h 7m 9s");
            }
            GameClock::Expired => panic!("game should still be running"),
        }
    }

    #[test]
    fn test_expired_at_close_time() {
        let config = ClientConfig::default();
        let close = closes_at(&config, 3);
        assert_eq!(game_clock(&config, 3, close), GameClock::Expired);
        assert_eq!(game_clock(&config, 3, close + 10), GameClock::Expired);
    }

    #[test]
    fn test_extreme_clock_values_saturate() {
        let config = ClientConfig::default();
        assert!(matches!(
            game_clock(&config, u64::MAX, -1),
            GameClock::Running(_)
        ));
        assert!(matches!(
            game_clock(&config, 0, i64::MIN),
            GameClock::Running(_)
        ));
        assert_eq!(game_clock(&config, 0, i64::MAX), GameClock::Expired);
    }
}
