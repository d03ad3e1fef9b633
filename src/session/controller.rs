use super::*;
use crate::Chips;
use crate::Error;
use crate::Result;
use crate::Shoe;
use crate::Violation;
use crate::cards::Card;
use crate::courier::*;
use crate::gate::*;
use crate::hands::*;
use crate::ledger::*;
use crate::policy::*;
use crate::table::HandId;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Everything dispatch mutates, behind one per-session lock.
#[derive(Debug)]
struct Session {
    phase: Phase,
    registry: Registry,
    turn: Option<(HandId, Action)>,
    degraded: Option<Violation>,
    readied: bool,
    games: usize,
    shoe: Option<Shoe>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::Init,
            registry: Registry::default(),
            turn: None,
            degraded: None,
            readied: false,
            games: 0,
            shoe: None,
        }
    }
}

/// Client-side coordinator for one seat at a remote blackjack table.
/// Sole owner of the hand registry and the ledger.
///
/// Two kinds of callers share it:
/// - the transport task, which feeds every dealer event to `dispatch`
///   in arrival order and must never block
/// - a driving task, which bets and then waits on gates for the dealer
///   to reach the phase it cares about
///
/// Decisions are made synchronously inside `dispatch`; the resulting
/// commands go to a bounded worker queue so the transport task is never
/// stuck behind the courier.
pub struct SessionController {
    config: Config,
    session: Mutex<Session>,
    ledger: Ledger,
    gates: Gates,
    policy: Box<dyn Policy>,
    courier: Arc<dyn Courier>,
    worker: Worker,
    failures: Mutex<UnboundedReceiver<Failure>>,
    observers: Mutex<Vec<UnboundedSender<Event>>>,
}

impl SessionController {
    /// Must be called from within a tokio runtime; spawns the command worker.
    pub fn new(config: Config, policy: Box<dyn Policy>, courier: Arc<dyn Courier>) -> Self {
        let (worker, failures) = Worker::spawn(courier.clone(), config.backlog);
        Self {
            config,
            policy,
            courier,
            worker,
            session: Mutex::new(Session::default()),
            ledger: Ledger::new(config.local),
            gates: Gates::default(),
            failures: Mutex::new(failures),
            observers: Mutex::new(Vec::new()),
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl SessionController {
    /// Applies one dealer event.
    ///
    /// Returns the action chosen when the event asked us for a decision.
    /// A protocol violation degrades the session: from then on every event
    /// is refused without touching the registry or the ledger, and no
    /// command is issued, until `reset`.
    /// A command the worker queue refuses does not undo the event; it shows
    /// up in `failures` instead.
    pub fn dispatch(&self, event: Event) -> Result<Option<Action>> {
        let mut session = self.session();
        if session.degraded.is_some() {
            let violation = Violation::Degraded { event: event.kind() };
            log::warn!("[session] {}", violation);
            return Err(violation.into());
        }
        log::info!("[session] {}", event);
        match self.handle(&mut session, &event) {
            Ok(action) => {
                self.broadcast(&event);
                Ok(action)
            }
            Err(Error::ProtocolViolation(violation)) => {
                Self::stray(&session, &violation);
                log::error!("[session] degraded by {}: {}", event.kind(), violation);
                session.degraded = Some(violation.clone());
                Err(violation.into())
            }
            Err(e) => {
                log::error!("[session] {} failed: {}", event.kind(), e);
                Err(e)
            }
        }
    }

    fn handle(&self, s: &mut Session, event: &Event) -> Result<Option<Action>> {
        if let Some((hand, outcome, amount)) = event.settlement() {
            return match s.phase.is_playing() {
                true => self.settle(s, hand, outcome, amount),
                false => Err(Self::unexpected(s, event)),
            };
        }
        match event {
            Event::Ready if s.phase.is_arriving() => self.arrived(s),
            Event::Starting { hands, shoe } if s.phase.is_between_games() => {
                self.start(s, hands, *shoe)
            }
            Event::Deal { hand, card, values } if s.phase.is_playing() => {
                self.deal(s, *hand, *card, *values)
            }
            Event::Split { new, original } if s.phase.is_playing() => {
                self.split(s, *new, *original)
            }
            Event::Turn { hand } if s.phase.is_playing() => self.turn(s, *hand),
            Event::Bust { hand } if s.phase.is_playing() => self.close(s, *hand, Status::Busted),
            Event::Charlie { hand } if s.phase.is_playing() => {
                self.close(s, *hand, Status::Charlie)
            }
            Event::Ending { shoe } if s.phase.is_playing() => self.end(s, *shoe),
            Event::Shuffling if !s.phase.is_arriving() && s.phase != Phase::Terminated => Ok(None),
            _ => Err(Self::unexpected(s, event)),
        }
    }
}

impl SessionController {
    fn arrived(&self, s: &mut Session) -> Result<Option<Action>> {
        s.readied = true;
        s.phase = Phase::Ready;
        self.gates.open(GateKind::Ready);
        Ok(None)
    }

    fn start(&self, s: &mut Session, hands: &[HandId], shoe: Shoe) -> Result<Option<Action>> {
        s.registry.replace(hands)?;
        s.shoe = Some(shoe);
        s.turn = None;
        s.phase = Phase::Dealing;
        Ok(None)
    }

    fn deal(&self, s: &mut Session, hand: HandId, card: Card, values: Values) -> Result<Option<Action>> {
        let size = s.registry.deal(hand, card, Some(values))?;
        log::debug!("[session] {} holds {} cards", hand, size);
        match s.turn {
            Some((turn, Action::Hit)) if turn == hand && values.is_broken() => {
                log::debug!("[session] {} broke at {}", hand, values);
                Ok(None)
            }
            Some((turn, Action::Hit)) if turn == hand => self.decide(s, hand).map(Some),
            _ => Ok(None),
        }
    }

    fn split(&self, s: &mut Session, new: HandId, original: HandId) -> Result<Option<Action>> {
        let (a, b) = s.registry.split(new, original)?;
        log::info!("[session] {} split into {} and {}", original, a, b);
        Ok(None)
    }

    fn turn(&self, s: &mut Session, hand: HandId) -> Result<Option<Action>> {
        s.registry.live(&hand)?;
        if s.turn.is_some_and(|(current, _)| current != hand) {
            self.pass(s);
        }
        if hand.seat() != self.config.local {
            return Ok(Some(Action::NoAction));
        }
        s.phase = Phase::AwaitingTurnEnd;
        self.decide(s, hand).map(Some)
    }

    fn decide(&self, s: &mut Session, hand: HandId) -> Result<Action> {
        let action = self.policy.decide(hand, s.registry.live(&hand)?);
        log::info!("[session] {} on {}", action, hand);
        s.turn = Some((hand, action));
        if let Some(command) = action.command(hand) {
            if let Err(e) = self.worker.submit(command) {
                log::error!("[session] {} on {} not sent: {}", action, hand, e);
            }
        }
        Ok(action)
    }

    fn close(&self, s: &mut Session, hand: HandId, status: Status) -> Result<Option<Action>> {
        s.registry.close(hand, status)?;
        if s.turn.is_some_and(|(current, _)| current == hand) {
            self.pass(s);
        }
        Ok(None)
    }

    fn settle(&self, s: &mut Session, hand: HandId, outcome: Outcome, amount: Chips) -> Result<Option<Action>> {
        s.registry.settle(hand)?;
        let delta = self.ledger.apply(hand.seat(), outcome, amount);
        log::info!("[session] {} settled {:+}, total {:+}", hand, delta, self.ledger.total());
        self.pass(s);
        Ok(None)
    }

    fn end(&self, s: &mut Session, shoe: Shoe) -> Result<Option<Action>> {
        self.pass(s);
        s.registry.retire();
        s.shoe = Some(shoe);
        s.games += 1;
        s.phase = Phase::Ending;
        self.gates.open(GateKind::Ending);
        log::info!("[session] TOTAL WINNINGS: {}", self.ledger.summary());
        Ok(None)
    }

    /// Our turn is over; wake whoever waits for that.
    fn pass(&self, s: &mut Session) {
        if let Some((hand, _)) = s.turn.take() {
            log::debug!("[session] turn passes from {}", hand);
            s.phase = Phase::Dealing;
            self.gates.open(GateKind::Turn);
        }
    }

    /// Split children are numbered consecutively by the dealer; an unknown
    /// hand in a seat that split means that numbering did not hold.
    fn stray(s: &Session, violation: &Violation) {
        if let Violation::UnknownHand(hand) = violation {
            let splits = s.registry.splits(hand.seat());
            if !splits.is_empty() {
                let known = splits
                    .iter()
                    .map(|h| h.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                log::warn!("[session] {} is not a split child we derived ({})", hand, known);
            }
        }
    }

    fn unexpected(s: &Session, event: &Event) -> Error {
        Violation::Unexpected {
            event: event.kind(),
            phase: s.phase,
        }
        .into()
    }
}

impl SessionController {
    /// Waits for the dealer's READY.
    pub async fn ready(&self) -> Result<()> {
        self.arrive();
        self.wait(GateKind::Ready).await
    }
    /// Waits for our current turn to pass.
    pub async fn await_turn(&self) -> Result<()> {
        self.wait(GateKind::Turn).await
    }
    /// Waits for the current game to end.
    pub async fn await_ending(&self) -> Result<()> {
        self.wait(GateKind::Ending).await
    }
    /// Waits on a gate with the configured deadline.
    pub async fn wait(&self, kind: GateKind) -> Result<()> {
        self.wait_for(kind, self.config.deadline).await
    }
    pub async fn wait_for(&self, kind: GateKind, deadline: Duration) -> Result<()> {
        self.gates.get(kind).wait(deadline).await
    }
    /// Places the configured bet, which starts the next game.
    pub async fn bet(&self) -> Result<()> {
        self.bet_with(self.config.bet, self.config.side).await
    }
    /// Sent straight to the courier: the driving task is never the
    /// event-delivery task, so it may wait on the transport.
    pub async fn bet_with(&self, amount: Chips, side: Chips) -> Result<()> {
        self.admit("bet")?;
        log::info!("[session] bet amt: {}, side bet: {}", amount, side);
        self.courier
            .send(Command::PlaceBet { amount, side })
            .await
            .inspect_err(|e| log::error!("[session] bet failed: {:#}", e))?;
        Ok(())
    }
    /// No more games.
    pub fn finish(&self) {
        let mut s = self.session();
        log::info!("[session] finished after {} games, {}", s.games, self.ledger.summary());
        s.phase = Phase::Terminated;
    }
    /// Clears a degraded session and the current game. The ledger survives.
    pub fn reset(&self) {
        let mut s = self.session();
        if let Some(violation) = s.degraded.take() {
            log::warn!("[session] reset after {}", violation);
        }
        s.registry.clear();
        s.turn = None;
        s.phase = match s.readied {
            true => Phase::Ready,
            false => Phase::Init,
        };
        self.gates.close_all();
    }
    /// Receives every event the session accepted, in order.
    pub fn subscribe(&self) -> UnboundedReceiver<Event> {
        let (tx, rx) = unbounded_channel();
        self.observers().push(tx);
        rx
    }

    fn arrive(&self) {
        let mut s = self.session();
        if s.phase == Phase::Init {
            s.phase = Phase::AwaitingReady;
        }
    }
    fn admit(&self, what: &'static str) -> Result<()> {
        let s = self.session();
        match (&s.degraded, s.phase) {
            (Some(_), _) => Err(Violation::Degraded { event: what }.into()),
            (None, phase) if phase.is_between_games() => Ok(()),
            (None, phase) => Err(Violation::Unexpected { event: what, phase }.into()),
        }
    }
    fn broadcast(&self, event: &Event) {
        self.observers()
            .retain(|inbox| inbox.send(event.clone()).is_ok());
    }
}

impl SessionController {
    pub fn phase(&self) -> Phase {
        self.session().phase
    }
    pub fn total(&self) -> Chips {
        self.ledger.total()
    }
    pub fn summary(&self) -> Summary {
        self.ledger.summary()
    }
    pub fn is_degraded(&self) -> bool {
        self.session().degraded.is_some()
    }
    /// The violation that degraded the session, if any.
    pub fn degradation(&self) -> Option<Violation> {
        self.session().degraded.clone()
    }
    /// Games that reached their ending.
    pub fn games(&self) -> usize {
        self.session().games
    }
    /// Cards left in the shoe at the last start or end of game.
    pub fn shoe(&self) -> Option<Shoe> {
        self.session().shoe
    }
    pub fn tracker(&self, hand: &HandId) -> Option<Tracker> {
        self.session().registry.get(hand).ok().cloned()
    }
    pub fn children(&self, parent: &HandId) -> Vec<HandId> {
        self.session().registry.children(parent)
    }
    /// Hands still in play, in key order.
    pub fn active(&self) -> Vec<HandId> {
        self.session().registry.active()
    }
    /// Ordered cards of every registered hand.
    pub fn snapshot(&self) -> BTreeMap<HandId, Vec<Card>> {
        self.session().registry.snapshot()
    }
    /// Commands the worker queue refused or the courier failed to send,
    /// since the last call.
    pub fn failures(&self) -> Vec<Failure> {
        let mut reports = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        std::iter::from_fn(|| reports.try_recv().ok()).collect()
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
    fn observers(&self) -> MutexGuard<'_, Vec<UnboundedSender<Event>>> {
        self.observers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Seat;

    const YOU1: HandId = HandId::new(Seat::You, 1);
    const YOU2: HandId = HandId::new(Seat::You, 2);
    const YOU3: HandId = HandId::new(Seat::You, 3);
    const DEALER1: HandId = HandId::new(Seat::Dealer, 1);

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn controller(policy: Box<dyn Policy>) -> (SessionController, UnboundedReceiver<Command>) {
        let (recorder, sent) = Recorder::pair();
        let config = Config::default().with_deadline(Duration::from_millis(200));
        (SessionController::new(config, policy, Arc::new(recorder)), sent)
    }

    fn started(policy: Box<dyn Policy>) -> (SessionController, UnboundedReceiver<Command>) {
        let (session, sent) = controller(policy);
        session.dispatch(Event::Ready).unwrap();
        session
            .dispatch(Event::Starting {
                hands: vec![YOU1, DEALER1],
                shoe: 416,
            })
            .unwrap();
        (session, sent)
    }

    fn violation(result: Result<Option<Action>>) -> Violation {
        result.unwrap_err().violation().cloned().expect("protocol violation")
    }

    #[tokio::test]
    async fn splits_nines_and_stays_on_children() {
        let (session, mut sent) = started(Box::new(Splitter::default()));
        session.dispatch(Event::deal(YOU1, card("9c"), [9, 9])).unwrap();
        session.dispatch(Event::deal(DEALER1, card("Kh"), [10, 10])).unwrap();
        session.dispatch(Event::deal(YOU1, card("9d"), [18, 18])).unwrap();
        let action = session.dispatch(Event::Turn { hand: YOU1 }).unwrap();
        assert_eq!(action, Some(Action::Split));
        assert_eq!(session.phase(), Phase::AwaitingTurnEnd);
        assert_eq!(sent.recv().await, Some(Command::Split(YOU1)));

        session
            .dispatch(Event::Split {
                new: YOU2,
                original: YOU1,
            })
            .unwrap();
        assert_eq!(session.children(&YOU1), vec![YOU2, YOU3]);
        assert_eq!(session.tracker(&YOU1).unwrap().status(), Status::Split);
        assert_eq!(session.tracker(&YOU2).unwrap().cards(), &[card("9c")]);
        assert_eq!(session.tracker(&YOU3).unwrap().cards(), &[card("9d")]);

        session.dispatch(Event::deal(YOU2, card("4c"), [13, 13])).unwrap();
        assert_eq!(session.tracker(&YOU2).unwrap().card_at(1).unwrap(), card("4c"));
        let action = session.dispatch(Event::Turn { hand: YOU2 }).unwrap();
        assert_eq!(action, Some(Action::Stay));
        assert_eq!(sent.recv().await, Some(Command::Stay(YOU2)));
        session.await_turn().await.unwrap();

        session.dispatch(Event::deal(YOU3, card("3c"), [12, 12])).unwrap();
        assert_eq!(session.tracker(&YOU3).unwrap().card_at(1).unwrap(), card("3c"));
        let action = session.dispatch(Event::Turn { hand: YOU3 }).unwrap();
        assert_eq!(action, Some(Action::Stay));
        assert_eq!(sent.recv().await, Some(Command::Stay(YOU3)));

        session.dispatch(Event::Ending { shoe: 410 }).unwrap();
        session.await_ending().await.unwrap();
        assert_eq!(session.phase(), Phase::Ending);
        assert_eq!(session.shoe(), Some(410));
        assert_eq!(session.total(), 0);
    }

    #[tokio::test]
    async fn split_lineage_replaces_parent() {
        let (session, _sent) = started(Box::new(Splitter::default()));
        session.dispatch(Event::deal(YOU1, card("9c"), [9, 9])).unwrap();
        session.dispatch(Event::deal(YOU1, card("9d"), [18, 18])).unwrap();
        session
            .dispatch(Event::Split {
                new: YOU2,
                original: YOU1,
            })
            .unwrap();
        assert_eq!(session.active(), vec![YOU2, YOU3, DEALER1]);
        assert_eq!(
            violation(session.dispatch(Event::Turn { hand: YOU1 })),
            Violation::InactiveHand {
                hand: YOU1,
                status: Status::Split
            }
        );
    }

    #[tokio::test]
    async fn win_then_push_nets_the_win() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        session.dispatch(Event::Push { hand: DEALER1 }).unwrap();
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn loss_is_negative() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Lose { hand: YOU1, amount: 5 }).unwrap();
        assert_eq!(session.total(), -5);
    }

    #[tokio::test]
    async fn signed_loss_is_not_double_negated() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Lose { hand: YOU1, amount: -5 }).unwrap();
        assert_eq!(session.total(), -5);
    }

    #[tokio::test]
    async fn dealer_outcomes_count_against_us() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Win { hand: DEALER1, amount: 5 }).unwrap();
        assert_eq!(session.total(), -5);
    }

    #[tokio::test]
    async fn bust_waits_for_the_paired_loss() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Bust { hand: YOU1 }).unwrap();
        assert_eq!(session.total(), 0);
        session.dispatch(Event::Lose { hand: YOU1, amount: 5 }).unwrap();
        assert_eq!(session.total(), -5);
    }

    #[tokio::test]
    async fn charlie_waits_for_the_paired_win() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Charlie { hand: YOU1 }).unwrap();
        assert_eq!(session.total(), 0);
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn unknown_turn_is_a_violation() {
        let (session, mut sent) = controller(Box::new(Stayer));
        session.dispatch(Event::Ready).unwrap();
        session
            .dispatch(Event::Starting {
                hands: vec![YOU1],
                shoe: 416,
            })
            .unwrap();
        assert_eq!(
            violation(session.dispatch(Event::Turn { hand: DEALER1 })),
            Violation::UnknownHand(DEALER1)
        );
        assert_eq!(session.total(), 0);
        assert!(session.is_degraded());
        assert_eq!(
            violation(session.dispatch(Event::Turn { hand: YOU1 })),
            Violation::Degraded { event: "turn" }
        );
        assert_eq!(
            violation(session.dispatch(Event::Win { hand: YOU1, amount: 5 })),
            Violation::Degraded { event: "win" }
        );
        assert_eq!(session.total(), 0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(sent.try_recv().is_err());
    }

    #[tokio::test]
    async fn unknown_settlement_leaves_ledger_alone() {
        let (session, _sent) = started(Box::new(Stayer));
        let stranger = HandId::new(Seat::Right, 1);
        assert_eq!(
            violation(session.dispatch(Event::Win { hand: stranger, amount: 5 })),
            Violation::UnknownHand(stranger)
        );
        assert_eq!(session.total(), 0);
    }

    #[tokio::test]
    async fn settling_twice_is_a_violation() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        assert_eq!(
            violation(session.dispatch(Event::Lose { hand: YOU1, amount: 5 })),
            Violation::AlreadySettled(YOU1)
        );
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn deal_before_starting_is_unexpected() {
        let (session, _sent) = controller(Box::new(Stayer));
        session.dispatch(Event::Ready).unwrap();
        assert_eq!(
            violation(session.dispatch(Event::deal(YOU1, card("As"), [1, 11]))),
            Violation::Unexpected {
                event: "deal",
                phase: Phase::Ready
            }
        );
    }

    #[tokio::test]
    async fn starting_before_ready_is_unexpected() {
        let (session, _sent) = controller(Box::new(Stayer));
        assert_eq!(
            violation(session.dispatch(Event::Starting {
                hands: vec![YOU1],
                shoe: 416
            })),
            Violation::Unexpected {
                event: "starting",
                phase: Phase::Init
            }
        );
    }

    #[tokio::test]
    async fn next_game_replaces_registry() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::deal(YOU1, card("Th"), [10, 10])).unwrap();
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        session.dispatch(Event::Ending { shoe: 412 }).unwrap();
        assert_eq!(session.games(), 1);
        let (you, dealer) = (HandId::new(Seat::You, 4), HandId::new(Seat::Dealer, 5));
        session
            .dispatch(Event::Starting {
                hands: vec![you, dealer],
                shoe: 412,
            })
            .unwrap();
        assert_eq!(session.snapshot().keys().copied().collect::<Vec<_>>(), vec![you, dealer]);
        assert_eq!(
            violation(session.dispatch(Event::deal(YOU1, card("2c"), [2, 2]))),
            Violation::UnknownHand(YOU1)
        );
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn deal_count_matches_hand_size() {
        let (session, _sent) = started(Box::new(Stayer));
        let cards = ["2c", "3d", "4h", "5s", "6c", "7d"];
        for (i, c) in cards.iter().enumerate() {
            session.dispatch(Event::deal(YOU1, card(c), [0, 0])).unwrap();
            assert_eq!(session.tracker(&YOU1).unwrap().size(), i + 1);
        }
        assert_eq!(session.tracker(&DEALER1).unwrap().size(), 0);
    }

    #[tokio::test]
    async fn replay_is_deterministic() {
        let events = vec![
            Event::Ready,
            Event::Starting {
                hands: vec![YOU1, DEALER1],
                shoe: 416,
            },
            Event::deal(YOU1, card("9c"), [9, 9]),
            Event::deal(DEALER1, card("6h"), [6, 6]),
            Event::deal(YOU1, card("9d"), [18, 18]),
            Event::Turn { hand: YOU1 },
            Event::Split {
                new: YOU2,
                original: YOU1,
            },
            Event::deal(YOU2, card("4c"), [13, 13]),
            Event::Turn { hand: YOU2 },
            Event::deal(YOU3, card("3c"), [12, 12]),
            Event::Turn { hand: YOU3 },
            Event::Turn { hand: DEALER1 },
            Event::deal(DEALER1, card("Ts"), [16, 16]),
            Event::deal(DEALER1, card("Kd"), [26, 26]),
            Event::Bust { hand: DEALER1 },
            Event::Win { hand: YOU2, amount: 5 },
            Event::Win { hand: YOU3, amount: 5 },
            Event::Ending { shoe: 407 },
        ];
        let (a, _sa) = controller(Box::new(Splitter::default()));
        let (b, _sb) = controller(Box::new(Splitter::default()));
        for event in events {
            assert_eq!(a.dispatch(event.clone()).unwrap(), b.dispatch(event).unwrap());
        }
        assert_eq!(a.total(), 10);
        assert_eq!(a.total(), b.total());
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[tokio::test]
    async fn opponent_turn_issues_nothing() {
        let (session, mut sent) = started(Box::new(Stayer));
        assert_eq!(
            session.dispatch(Event::Turn { hand: DEALER1 }).unwrap(),
            Some(Action::NoAction)
        );
        assert_eq!(session.phase(), Phase::Dealing);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(sent.try_recv().is_err());
    }

    #[tokio::test]
    async fn hit_asks_again_on_the_next_card() {
        let (session, mut sent) = started(Box::new(Threshold::default()));
        session.dispatch(Event::deal(YOU1, card("5c"), [5, 5])).unwrap();
        session.dispatch(Event::deal(YOU1, card("6d"), [11, 11])).unwrap();
        assert_eq!(session.dispatch(Event::Turn { hand: YOU1 }).unwrap(), Some(Action::Hit));
        assert_eq!(
            session.dispatch(Event::deal(YOU1, card("Tc"), [21, 21])).unwrap(),
            Some(Action::Stay)
        );
        assert_eq!(sent.recv().await, Some(Command::Hit(YOU1)));
        assert_eq!(sent.recv().await, Some(Command::Stay(YOU1)));
        assert_eq!(session.dispatch(Event::deal(DEALER1, card("9s"), [9, 9])).unwrap(), None);
    }

    #[tokio::test]
    async fn turn_gate_opens_when_turn_moves_on() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Turn { hand: YOU1 }).unwrap();
        assert!(session.wait_for(GateKind::Turn, Duration::from_millis(20)).await.is_err());
        session.dispatch(Event::Turn { hand: DEALER1 }).unwrap();
        session.await_turn().await.unwrap();
        assert_eq!(session.phase(), Phase::Dealing);
    }

    #[tokio::test]
    async fn ready_waits_for_the_dealer() {
        let (session, _sent) = controller(Box::new(Stayer));
        let session = Arc::new(session);
        let driver = {
            let session = session.clone();
            tokio::spawn(async move { session.ready().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(session.phase(), Phase::AwaitingReady);
        session.dispatch(Event::Ready).unwrap();
        driver.await.unwrap().unwrap();
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn ending_times_out_without_corrupting_state() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        assert!(matches!(
            session.await_ending().await,
            Err(Error::SynchronizationTimeout {
                gate: GateKind::Ending,
                ..
            })
        ));
        assert_eq!(session.total(), 5);
        assert!(!session.is_degraded());
        session.dispatch(Event::Ending { shoe: 412 }).unwrap();
        session.await_ending().await.unwrap();
    }

    #[tokio::test]
    async fn bet_goes_straight_to_the_courier() {
        let (session, mut sent) = controller(Box::new(Stayer));
        assert!(session.bet().await.is_err());
        session.dispatch(Event::Ready).unwrap();
        session.bet_with(10, 2).await.unwrap();
        assert_eq!(sent.recv().await, Some(Command::PlaceBet { amount: 10, side: 2 }));
    }

    #[tokio::test]
    async fn reset_recovers_a_degraded_session() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        assert!(session.dispatch(Event::Ready).is_err());
        assert!(session.bet().await.is_err());
        session.reset();
        assert!(!session.is_degraded());
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.snapshot().is_empty());
        assert_eq!(session.total(), 5);
        session
            .dispatch(Event::Starting {
                hands: vec![YOU1],
                shoe: 400,
            })
            .unwrap();
    }

    #[tokio::test]
    async fn observers_see_accepted_events() {
        let (session, _sent) = controller(Box::new(Stayer));
        let mut events = session.subscribe();
        session.dispatch(Event::Ready).unwrap();
        session.dispatch(Event::Shuffling).unwrap();
        assert!(session.dispatch(Event::Push { hand: YOU1 }).is_err());
        assert_eq!(events.recv().await, Some(Event::Ready));
        assert_eq!(events.recv().await, Some(Event::Shuffling));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn terminated_session_accepts_nothing() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::Ending { shoe: 412 }).unwrap();
        session.finish();
        assert_eq!(session.phase(), Phase::Terminated);
        assert!(session.dispatch(Event::Shuffling).is_err());
    }

    #[tokio::test]
    async fn worker_failures_are_reported() {
        struct Down;
        #[async_trait::async_trait]
        impl Courier for Down {
            async fn send(&self, command: Command) -> anyhow::Result<()> {
                Err(anyhow::anyhow!("dealer unreachable for {}", command))
            }
        }
        let session = SessionController::new(Config::default(), Box::new(Stayer), Arc::new(Down));
        session.dispatch(Event::Ready).unwrap();
        assert!(matches!(session.bet().await, Err(Error::Transport(_))));
        session
            .dispatch(Event::Starting {
                hands: vec![YOU1],
                shoe: 416,
            })
            .unwrap();
        session.dispatch(Event::Turn { hand: YOU1 }).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let failures = session.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].command, Command::Stay(YOU1));
    }

    #[tokio::test]
    async fn split_past_the_last_key_degrades_without_panicking() {
        let (session, _sent) = started(Box::new(Stayer));
        session.dispatch(Event::deal(YOU1, card("9c"), [9, 9])).unwrap();
        session.dispatch(Event::deal(YOU1, card("9d"), [18, 18])).unwrap();
        let last = HandId::new(Seat::You, u64::MAX);
        assert_eq!(
            violation(session.dispatch(Event::Split {
                new: last,
                original: YOU1
            })),
            Violation::InvalidSplit {
                new: last,
                original: YOU1
            }
        );
        assert!(session.is_degraded());
        assert_eq!(session.tracker(&YOU1).unwrap().status(), Status::Live);
    }

    #[tokio::test]
    async fn stray_split_child_is_unknown() {
        let (session, _sent) = started(Box::new(Splitter::default()));
        session.dispatch(Event::deal(YOU1, card("9c"), [9, 9])).unwrap();
        session.dispatch(Event::deal(YOU1, card("9d"), [18, 18])).unwrap();
        session
            .dispatch(Event::Split {
                new: YOU2,
                original: YOU1,
            })
            .unwrap();
        let stray = HandId::new(Seat::You, 5);
        assert_eq!(
            violation(session.dispatch(Event::deal(stray, card("4c"), [13, 13]))),
            Violation::UnknownHand(stray)
        );
    }

    #[tokio::test]
    async fn broken_hit_leaves_the_break_to_the_dealer() {
        let (session, mut sent) = started(Box::new(Threshold::default()));
        session.dispatch(Event::deal(YOU1, card("Tc"), [10, 10])).unwrap();
        session.dispatch(Event::deal(YOU1, card("6d"), [16, 16])).unwrap();
        assert_eq!(session.dispatch(Event::Turn { hand: YOU1 }).unwrap(), Some(Action::Hit));
        assert_eq!(session.dispatch(Event::deal(YOU1, card("Kh"), [26, 26])).unwrap(), None);
        session.dispatch(Event::Bust { hand: YOU1 }).unwrap();
        session.dispatch(Event::Lose { hand: YOU1, amount: 5 }).unwrap();
        assert_eq!(sent.recv().await, Some(Command::Hit(YOU1)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(sent.try_recv().is_err());
        assert_eq!(session.total(), -5);
    }

    #[tokio::test]
    async fn refused_command_keeps_the_event() {
        struct Stalled;
        #[async_trait::async_trait]
        impl Courier for Stalled {
            async fn send(&self, _: Command) -> anyhow::Result<()> {
                std::future::pending().await
            }
        }
        let config = Config::default().with_backlog(1);
        let session = SessionController::new(config, Box::new(Threshold::default()), Arc::new(Stalled));
        let mut events = session.subscribe();
        session.dispatch(Event::Ready).unwrap();
        session
            .dispatch(Event::Starting {
                hands: vec![YOU1, DEALER1],
                shoe: 416,
            })
            .unwrap();
        session.dispatch(Event::deal(YOU1, card("2c"), [2, 2])).unwrap();
        assert_eq!(session.dispatch(Event::Turn { hand: YOU1 }).unwrap(), Some(Action::Hit));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            session.dispatch(Event::deal(YOU1, card("3d"), [5, 5])).unwrap(),
            Some(Action::Hit)
        );
        let refused = Event::deal(YOU1, card("4h"), [9, 9]);
        assert_eq!(session.dispatch(refused.clone()).unwrap(), Some(Action::Hit));
        assert!(!session.is_degraded());
        assert_eq!(session.phase(), Phase::AwaitingTurnEnd);
        assert_eq!(session.tracker(&YOU1).unwrap().size(), 3);
        let failures = session.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].command, Command::Hit(YOU1));
        assert!(matches!(
            failures[0].error.downcast_ref::<Error>(),
            Some(Error::CommandRejected(Command::Hit(_)))
        ));
        let seen = std::iter::from_fn(|| events.try_recv().ok()).collect::<Vec<_>>();
        assert_eq!(seen.last(), Some(&refused));
        assert_eq!(seen.len(), 6);
    }

    #[tokio::test]
    async fn local_seat_can_be_the_dealer() {
        let (recorder, mut sent) = Recorder::pair();
        let config = Config::default().with_local(Seat::Dealer);
        let session = SessionController::new(config, Box::new(Stayer), Arc::new(recorder));
        session.dispatch(Event::Ready).unwrap();
        session
            .dispatch(Event::Starting {
                hands: vec![YOU1, DEALER1],
                shoe: 416,
            })
            .unwrap();
        assert_eq!(
            session.dispatch(Event::Turn { hand: YOU1 }).unwrap(),
            Some(Action::NoAction)
        );
        assert_eq!(
            session.dispatch(Event::Turn { hand: DEALER1 }).unwrap(),
            Some(Action::Stay)
        );
        assert_eq!(sent.recv().await, Some(Command::Stay(DEALER1)));
        session.dispatch(Event::Win { hand: YOU1, amount: 5 }).unwrap();
        assert_eq!(session.total(), -5);
    }
}
