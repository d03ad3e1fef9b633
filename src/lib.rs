//! Event-driven client controller for automated blackjack agents.
//!
//! A remote dealer drives the game by emitting protocol events; this crate
//! keeps the authoritative local view of every in-flight hand, settles the
//! running P&L, and lets a driving task rendezvous with protocol phases.
//!
//! ## Architecture
//!
//! - [`session::SessionController`]: single dispatcher for inbound events
//! - [`hands::Registry`]: live hands keyed by [`table::HandId`]
//! - [`ledger::Ledger`]: running settlement from the local seat's view
//! - [`gate::Gate`]: level-triggered phase rendezvous
//! - [`policy::Policy`]: pluggable stay/split/hit decisions
//! - [`courier::Worker`]: bounded queue for outbound commands
//! - [`dealer::Scripted`]: dealer that plays from a script, for end-to-end runs
pub mod cards;
pub mod courier;
pub mod dealer;
pub mod error;
pub mod gate;
pub mod hands;
pub mod ledger;
pub mod policy;
pub mod session;
pub mod table;

pub use error::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Bet sizes and settlement deltas in whole table units.
pub type Chips = i64;
/// Cards left in the dealer's shoe, as reported by the dealer.
pub type Shoe = usize;

// ============================================================================
// SESSION DEFAULTS
// ============================================================================
/// Main bet placed at the start of each game.
pub const BET_AMOUNT: Chips = 5;
/// Side bet placed alongside the main bet.
pub const SIDE_AMOUNT: Chips = 0;
/// Longest a driving task waits on any gate (seconds).
pub const GATE_DEADLINE: u64 = 30;
/// Outbound commands buffered before dispatch starts rejecting them.
pub const COMMAND_BACKLOG: usize = 16;
/// Highest hand value that has not broken.
pub const BLACKJACK: u8 = 21;
/// Hard value below which the threshold policy keeps hitting.
pub const HIT_THRESHOLD: u8 = 17;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/agent-{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
