use crate::Chips;
use crate::table::Seat;
use std::time::Duration;

/// Knobs for one session.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Main bet placed by `bet`.
    pub bet: Chips,
    /// Side bet placed alongside it.
    pub side: Chips,
    /// Seat whose hands we play and whose P&L we keep.
    pub local: Seat,
    /// Longest any gate wait may take.
    pub deadline: Duration,
    /// Commands buffered before dispatch starts rejecting them.
    pub backlog: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bet: crate::BET_AMOUNT,
            side: crate::SIDE_AMOUNT,
            local: Seat::You,
            deadline: Duration::from_secs(crate::GATE_DEADLINE),
            backlog: crate::COMMAND_BACKLOG,
        }
    }
}

impl Config {
    pub fn with_bet(self, bet: Chips, side: Chips) -> Self {
        Self { bet, side, ..self }
    }
    pub fn with_local(self, local: Seat) -> Self {
        Self { local, ..self }
    }
    pub fn with_deadline(self, deadline: Duration) -> Self {
        Self { deadline, ..self }
    }
    pub fn with_backlog(self, backlog: usize) -> Self {
        Self { backlog, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.bet, 5);
        assert_eq!(config.side, 0);
        assert_eq!(config.local, Seat::You);
        assert_eq!(config.deadline, Duration::from_secs(crate::GATE_DEADLINE));
    }

    #[test]
    fn builders_override() {
        let config = Config::default()
            .with_bet(10, 1)
            .with_deadline(Duration::from_millis(5));
        assert_eq!((config.bet, config.side), (10, 1));
        assert_eq!(config.deadline, Duration::from_millis(5));
        assert_eq!(config.backlog, crate::COMMAND_BACKLOG);
    }
}
