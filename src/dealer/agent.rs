use super::*;
use crate::Chips;
use crate::Shoe;
use crate::ledger::Summary;
use crate::session::Config;
use crate::session::SessionController;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// What one scripted game left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub scenario: Scenario,
    pub summary: Summary,
    pub expected: Chips,
    pub games: usize,
    pub shoe: Option<Shoe>,
    pub degraded: Option<String>,
    pub hands: BTreeMap<String, Vec<String>>,
}

impl Report {
    pub fn is_expected(&self) -> bool {
        self.summary.total == self.expected && self.degraded.is_none()
    }
}

/// Sits one agent at a scripted table for a single game:
/// arrive, wait for READY, bet, wait for the ending, leave.
pub async fn play(scenario: Scenario, config: Config) -> crate::Result<Report> {
    log::info!("[agent] playing {} table", scenario);
    let (dealer, events) = Scripted::new(scenario.acts(&config));
    let session = Arc::new(SessionController::new(
        config,
        scenario.policy(),
        Arc::new(dealer.clone()),
    ));
    let transport = tokio::spawn(deliver(session.clone(), events));
    dealer.arrive()?;
    session.ready().await?;
    session.bet().await?;
    session.await_ending().await?;
    session.finish();
    transport.abort();
    if dealer.remaining() > 0 {
        log::warn!("[agent] dealer still had {} acts", dealer.remaining());
    }
    Ok(Report {
        scenario,
        summary: session.summary(),
        expected: scenario.expected(&config),
        games: session.games(),
        shoe: session.shoe(),
        degraded: session.degradation().map(|v| v.to_string()),
        hands: session
            .snapshot()
            .into_iter()
            .map(|(hand, cards)| (hand.to_string(), cards.iter().map(|c| c.to_string()).collect()))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Seat;
    use std::time::Duration;

    fn config() -> Config {
        Config::default().with_deadline(Duration::from_secs(2))
    }

    #[tokio::test]
    async fn staying_on_twelve_loses_the_bet() {
        let report = play(Scenario::Stay, config()).await.unwrap();
        assert_eq!(report.summary.total, -5);
        assert_eq!(report.summary.losses, 1);
        assert!(report.is_expected());
        assert_eq!(report.shoe, Some(412));
        assert_eq!(report.hands["YOU#1"], vec!["7h", "5d"]);
    }

    #[tokio::test]
    async fn splitting_nines_wins_both_children() {
        let report = play(Scenario::Split, config()).await.unwrap();
        assert_eq!(report.summary.total, 10);
        assert_eq!(report.summary.wins, 2);
        assert!(report.is_expected());
        assert_eq!(report.hands["YOU#2"], vec!["9c", "4c"]);
        assert_eq!(report.hands["YOU#3"], vec!["9d", "3c"]);
        assert_eq!(report.shoe, Some(409));
    }

    #[tokio::test]
    async fn everyone_natural_pushes_to_zero() {
        let report = play(Scenario::Blackjack, config()).await.unwrap();
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.pushes, 2);
        assert!(report.is_expected());
    }

    #[tokio::test]
    async fn plain_eighteen_wins() {
        let report = play(Scenario::Plain, config()).await.unwrap();
        assert_eq!(report.summary.total, 5);
        assert!(report.is_expected());
        assert_eq!(report.games, 1);
    }

    #[tokio::test]
    async fn bigger_bets_scale_the_result() {
        let report = play(Scenario::Split, config().with_bet(20, 0)).await.unwrap();
        assert_eq!(report.summary.total, 40);
        assert!(report.is_expected());
    }

    #[tokio::test]
    async fn any_seat_can_play() {
        let report = play(Scenario::Plain, config().with_local(Seat::Left)).await.unwrap();
        assert_eq!(report.summary.total, 5);
        assert_eq!(report.hands["LEFT#1"], vec!["Tc", "8d"]);
        assert!(!report.hands.contains_key("YOU#1"));
    }
}
