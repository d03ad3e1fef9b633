use super::*;
use crate::Chips;
use crate::cards::Card;
use crate::cards::Rank;
use crate::cards::Suit;
use crate::courier::Command;
use crate::policy::Policy;
use crate::policy::Splitter;
use crate::policy::Stayer;
use crate::session::Config;
use crate::session::Event;
use crate::table::HandId;
use crate::table::Seat;
use serde::Deserialize;
use serde::Serialize;

/// Canned single-game tables, each paired with the policy it exercises.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Twelve against a dealer nineteen; we stay and lose.
    Stay,
    /// Pair of nines against a dealer sixteen; we split, the dealer breaks.
    Split,
    /// Everyone holds a natural and every hand pushes.
    Blackjack,
    /// Eighteen against seventeen, no naturals; we stay and win.
    Plain,
}

impl Scenario {
    pub const fn all() -> [Self; 4] {
        [Self::Stay, Self::Split, Self::Blackjack, Self::Plain]
    }
    pub fn named(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|s| s.to_string().eq_ignore_ascii_case(name))
    }
    pub fn policy(&self) -> Box<dyn Policy> {
        match self {
            Self::Split => Box::new(Splitter::default()),
            Self::Stay | Self::Blackjack | Self::Plain => Box::new(Stayer),
        }
    }
    /// Net winnings for the local seat once the game ends.
    pub fn expected(&self, config: &Config) -> Chips {
        match self {
            Self::Stay => -config.bet,
            Self::Split => 2 * config.bet,
            Self::Blackjack => 0,
            Self::Plain => config.bet,
        }
    }
    /// The dealer's side of the game, one act per command we will send.
    pub fn acts(&self, config: &Config) -> Vec<Act> {
        let bet = config.bet;
        let you = HandId::new(config.local, 1);
        let dealer = HandId::new(Seat::Dealer, 1);
        let place = Command::PlaceBet {
            amount: config.bet,
            side: config.side,
        };
        let starting = |shoe| Event::Starting {
            hands: vec![you, dealer],
            shoe,
        };
        match self {
            Self::Stay => vec![
                Act::new(
                    place,
                    vec![
                        Event::Shuffling,
                        starting(416),
                        Event::deal(you, card(Rank::Seven, Suit::Heart), [7, 7]),
                        Event::deal(dealer, card(Rank::King, Suit::Club), [10, 10]),
                        Event::deal(you, card(Rank::Five, Suit::Diamond), [12, 12]),
                        Event::deal(dealer, card(Rank::Nine, Suit::Spade), [19, 19]),
                        Event::Turn { hand: you },
                    ],
                ),
                Act::new(
                    Command::Stay(you),
                    vec![
                        Event::Turn { hand: dealer },
                        Event::Lose {
                            hand: you,
                            amount: bet,
                        },
                        Event::Ending { shoe: 412 },
                    ],
                ),
            ],
            Self::Split => {
                let left = HandId::new(config.local, 2);
                let right = HandId::new(config.local, 3);
                vec![
                    Act::new(
                        place,
                        vec![
                            starting(416),
                            Event::deal(you, card(Rank::Nine, Suit::Club), [9, 9]),
                            Event::deal(dealer, card(Rank::King, Suit::Heart), [10, 10]),
                            Event::deal(you, card(Rank::Nine, Suit::Diamond), [18, 18]),
                            Event::deal(dealer, card(Rank::Six, Suit::Spade), [16, 16]),
                            Event::Turn { hand: you },
                        ],
                    ),
                    Act::new(
                        Command::Split(you),
                        vec![
                            Event::Split {
                                new: left,
                                original: you,
                            },
                            Event::deal(left, card(Rank::Four, Suit::Club), [13, 13]),
                            Event::Turn { hand: left },
                        ],
                    ),
                    Act::new(
                        Command::Stay(left),
                        vec![
                            Event::deal(right, card(Rank::Three, Suit::Club), [12, 12]),
                            Event::Turn { hand: right },
                        ],
                    ),
                    Act::new(
                        Command::Stay(right),
                        vec![
                            Event::Turn { hand: dealer },
                            Event::deal(dealer, card(Rank::Ten, Suit::Spade), [26, 26]),
                            Event::Bust { hand: dealer },
                            Event::Win {
                                hand: left,
                                amount: bet,
                            },
                            Event::Win {
                                hand: right,
                                amount: bet,
                            },
                            Event::Ending { shoe: 409 },
                        ],
                    ),
                ]
            }
            Self::Blackjack => vec![Act::new(
                place,
                vec![
                    starting(416),
                    Event::deal(you, card(Rank::Ace, Suit::Spade), [1, 11]),
                    Event::deal(dealer, card(Rank::Ace, Suit::Heart), [1, 11]),
                    Event::deal(you, card(Rank::King, Suit::Diamond), [11, 21]),
                    Event::deal(dealer, card(Rank::Queen, Suit::Club), [11, 21]),
                    Event::Push { hand: you },
                    Event::Push { hand: dealer },
                    Event::Ending { shoe: 412 },
                ],
            )],
            Self::Plain => vec![
                Act::new(
                    place,
                    vec![
                        starting(416),
                        Event::deal(you, card(Rank::Ten, Suit::Club), [10, 10]),
                        Event::deal(dealer, card(Rank::Nine, Suit::Heart), [9, 9]),
                        Event::deal(you, card(Rank::Eight, Suit::Diamond), [18, 18]),
                        Event::deal(dealer, card(Rank::Eight, Suit::Spade), [17, 17]),
                        Event::Turn { hand: you },
                    ],
                ),
                Act::new(
                    Command::Stay(you),
                    vec![
                        Event::Turn { hand: dealer },
                        Event::Win {
                            hand: you,
                            amount: bet,
                        },
                        Event::Ending { shoe: 412 },
                    ],
                ),
            ],
        }
    }
}

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Stay => "stay",
                Self::Split => "split",
                Self::Blackjack => "blackjack",
                Self::Plain => "plain",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for scenario in Scenario::all() {
            assert_eq!(Scenario::named(&scenario.to_string()), Some(scenario));
        }
        assert_eq!(Scenario::named("SPLIT"), Some(Scenario::Split));
        assert_eq!(Scenario::named("surrender"), None);
    }

    #[test]
    fn every_script_opens_with_the_bet() {
        let config = Config::default().with_bet(7, 1);
        for scenario in Scenario::all() {
            let acts = scenario.acts(&config);
            assert_eq!(acts[0].on, Command::PlaceBet { amount: 7, side: 1 });
            let last = acts.last().and_then(|act| act.events.last());
            assert!(matches!(last, Some(Event::Ending { .. })));
        }
    }

    #[test]
    fn natural_table_expects_only_the_bet() {
        assert_eq!(Scenario::Blackjack.acts(&Config::default()).len(), 1);
        assert_eq!(Scenario::Blackjack.expected(&Config::default()), 0);
    }
}
