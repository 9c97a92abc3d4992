use tracing::{debug, info, warn};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{Event, EventBus, EventId, Stage};
use crate::player::{Action, Player, SeatView};

/// Table engine: a dealer, the seated players, one deck, and the event bus
/// observers hook into.
///
/// Each round runs reset, bet, deal, play, settle, then reshuffles. Rounds
/// repeat until every player is broke or the optional round limit is hit.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::BlackjackGame;
/// use blackjack_engine::hand::Hand;
/// use blackjack_engine::player::{Action, Decide, Player, SeatView, TurnOptions};
/// use blackjack_engine::cards::Card;
///
/// struct Cautious;
///
/// impl Decide for Cautious {
///     fn place_bet(&mut self, _seat: &SeatView) -> i64 {
///         10
///     }
///     fn take_turn(&mut self, _: &Hand, _: TurnOptions, _: Option<Card>) -> Action {
///         Action::Stand
///     }
/// }
///
/// let mut game = BlackjackGame::new(Some(7)).with_max_rounds(Some(3));
/// assert_eq!(game.join(Player::new("Ada", Cautious)), 1);
///
/// let summary = game.play_game().expect("legal decisions only");
/// assert_eq!(summary.rounds_played, 3);
/// ```
#[derive(Debug)]
pub struct BlackjackGame<'h> {
    deck: Deck,
    dealer: Player<'h>,
    players: Vec<Player<'h>>,
    events: EventBus<'h>,
    /// Rounds started so far
    round: u32,
    max_rounds: Option<u32>,
    seed: Option<u64>,
}

/// What [`BlackjackGame::play_game`] leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub rounds_played: u32,
    /// Players still holding cash, in seat order.
    pub survivors: Vec<SeatView>,
}

#[derive(Debug, Clone, Copy)]
enum SeatRef {
    Player(usize),
    Dealer,
}

impl<'h> BlackjackGame<'h> {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut game = Self::with_deck(Deck::new_with_seed(seed));
        game.seed = Some(seed);
        game
    }

    /// Engine drawing from a prepared deck, e.g. one stacked for a test.
    pub fn with_deck(deck: Deck) -> Self {
        Self {
            deck,
            dealer: Player::dealer(),
            players: Vec::new(),
            events: EventBus::new(),
            round: 0,
            max_rounds: None,
            seed: None,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Handle for registering observers.
    pub fn events(&self) -> &EventBus<'h> {
        &self.events
    }

    pub fn players(&self) -> &[Player<'h>] {
        &self.players
    }

    pub fn dealer(&self) -> &Player<'h> {
        &self.dealer
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Seats `player` after everyone already seated and returns its seat
    /// number, starting at 1.
    pub fn join(&mut self, mut player: Player<'h>) -> usize {
        let seat = self.players.len() + 1;
        player.set_seat(seat);
        info!(seat, name = player.name(), cash = player.cash(), "player joined");
        self.players.push(player);
        seat
    }

    /// Plays rounds until no player has cash left or the round limit is reached.
    pub fn play_game(&mut self) -> Result<GameSummary, GameError> {
        info!(players = self.players.len(), seed = ?self.seed, "game started");
        let start = self.round;
        let events = self.events.clone();
        events.fire_wrapped(Stage::Game, self, Self::table_event, |g| -> Result<(), GameError> {
            while !g.players.is_empty() && !g.round_limit_reached(start) {
                g.play_round()?;
                g.remove_broke_players();
            }
            Ok(())
        })?;

        let summary = GameSummary {
            rounds_played: self.round - start,
            survivors: self.players.iter().map(Player::view).collect(),
        };
        info!(
            rounds = summary.rounds_played,
            survivors = summary.survivors.len(),
            "game finished"
        );
        Ok(summary)
    }

    /// One full round. The deck is reshuffled only if every phase succeeds.
    pub fn play_round(&mut self) -> Result<(), GameError> {
        self.round += 1;
        info!(round = self.round, players = self.players.len(), "round started");
        let events = self.events.clone();
        events.fire_wrapped(Stage::Round, self, Self::table_event, |g| {
            g.reset_players();
            g.take_bets()?;
            g.deal()?;
            g.play()?;
            g.determine_winners()?;
            g.deck.reset();
            Ok(())
        })
    }

    /// Gives every seat, dealer included, one empty hand.
    pub fn reset_players(&mut self) {
        for player in &mut self.players {
            player.reset_hands();
        }
        self.dealer.reset_hands();
    }

    /// Collects one wager per player, in seat order.
    pub fn take_bets(&mut self) -> Result<(), GameError> {
        for idx in 0..self.players.len() {
            self.notify(EventId::PrePlayerBet, || Event::PlayerBet {
                player: self.players[idx].view(),
                bet: None,
            });

            let player = &mut self.players[idx];
            let bet = player.place_bet().inspect_err(|e| {
                warn!(seat = player.seat(), error = %e, "bet rejected");
            })?;
            debug!(seat = player.seat(), bet, "bet placed");

            self.notify(EventId::PostPlayerBet, || Event::PlayerBet {
                player: self.players[idx].view(),
                bet: Some(bet),
            });
        }
        Ok(())
    }

    /// Two passes of one card to each seat, players first and dealer last.
    pub fn deal(&mut self) -> Result<(), GameError> {
        let events = self.events.clone();
        events.fire_wrapped(Stage::Deal, self, Self::deal_event, |g| {
            for _ in 0..2 {
                for player in g.players.iter_mut().chain(std::iter::once(&mut g.dealer)) {
                    player.hand_mut().add_card(g.deck.draw()?);
                }
            }
            debug!(remaining = g.deck.len(), "cards dealt");
            Ok(())
        })
    }

    /// Every player plays out all of their hands, then the dealer plays.
    pub fn play(&mut self) -> Result<(), GameError> {
        let events = self.events.clone();
        for idx in 0..self.players.len() {
            events.fire_wrapped(
                Stage::PlayerPlay,
                self,
                |g| Event::PlayerPlay {
                    player: g.players[idx].view(),
                },
                |g| g.play_player(idx),
            )?;
        }
        events.fire_wrapped(
            Stage::DealerPlay,
            self,
            |g| Event::DealerPlay {
                dealer: g.dealer.view(),
            },
            Self::dealer_play_hand,
        )
    }

    /// Plays each hand of the player at `idx`, including hands a split
    /// appends along the way, then drops the hands the splits consumed.
    pub fn play_player(&mut self, idx: usize) -> Result<(), GameError> {
        let mut hand_index = 0;
        while hand_index < self.players[idx].hands().len() {
            self.play_hand(idx, hand_index)?;
            hand_index += 1;
        }
        self.players[idx].remove_invalid_hands();
        Ok(())
    }

    /// Takes turns on one hand while it is active. A split ends play on the
    /// hand; its two children are played later as appended hands.
    pub fn play_hand(&mut self, idx: usize, hand_index: usize) -> Result<(), GameError> {
        let events = self.events.clone();
        events.fire_wrapped(
            Stage::PlayerPlayHand,
            self,
            |g| g.hand_event(idx, hand_index),
            |g| {
                while g.players[idx].hands()[hand_index].is_active() {
                    let action = events.fire_wrapped(
                        Stage::PlayerPlayHandTurn,
                        g,
                        |g| g.hand_event(idx, hand_index),
                        |g| g.take_turn(SeatRef::Player(idx), hand_index),
                    )?;
                    if action == Action::Split {
                        break;
                    }
                }
                Ok(())
            },
        )
    }

    /// The dealer follows the house policy until standing or busting.
    pub fn dealer_play_hand(&mut self) -> Result<(), GameError> {
        while self.dealer.hand().is_active() {
            self.take_turn(SeatRef::Dealer, 0)?;
        }
        debug!(total = %self.dealer.hand().total(), "dealer finished");
        Ok(())
    }

    /// Settles every player's hands against the dealer's final hand.
    pub fn determine_winners(&mut self) -> Result<(), GameError> {
        let events = self.events.clone();
        events.fire_wrapped(
            Stage::DetermineWinners,
            self,
            |g| Event::DetermineWinners {
                players: g.seat_views(),
                dealer: g.dealer.view(),
            },
            |g| {
                for idx in 0..g.players.len() {
                    g.determine_winner(idx)?;
                }
                Ok(())
            },
        )
    }

    pub fn determine_winner(&mut self, idx: usize) -> Result<(), GameError> {
        let events = self.events.clone();
        events.fire_wrapped(
            Stage::DeterminePlayerWin,
            self,
            |g| Event::DeterminePlayerWin {
                player: g.players[idx].view(),
                dealer: g.dealer.view(),
            },
            |g| {
                g.settle_player(idx);
                Ok(())
            },
        )
    }

    fn settle_player(&mut self, idx: usize) {
        let dealer_hand = self.dealer.hand().clone();
        let seat = self.players[idx].seat();

        for hand_index in 0..self.players[idx].hands().len() {
            let hand = &self.players[idx].hands()[hand_index];
            if hand.is_invalid() {
                continue;
            }
            self.notify(EventId::PreDeterminePlayersHandWin, || Event::HandSettlement {
                seat,
                hand: hand.clone(),
                dealer_hand: dealer_hand.clone(),
                winnings: None,
            });

            let outcome = hand.outcome(&dealer_hand);
            let winnings = outcome.payout(hand.bet());
            debug!(
                seat,
                hand = hand_index,
                total = %hand.total(),
                dealer_total = %dealer_hand.total(),
                bet = hand.bet(),
                ?outcome,
                winnings,
                "hand settled"
            );

            let player = &mut self.players[idx];
            player.collect(winnings);
            player.hands_mut()[hand_index].clear_bet();

            self.notify(EventId::PostDeterminePlayersHandWin, || Event::HandSettlement {
                seat,
                hand: self.players[idx].hands()[hand_index].clone(),
                dealer_hand: dealer_hand.clone(),
                winnings: Some(winnings),
            });
        }
    }

    /// Asks the seat for a decision on one hand and applies it.
    fn take_turn(&mut self, seat: SeatRef, hand_index: usize) -> Result<Action, GameError> {
        let up_card = self.dealer.up_card();
        let player = match seat {
            SeatRef::Player(idx) => &mut self.players[idx],
            SeatRef::Dealer => &mut self.dealer,
        };
        let action = player.decide(hand_index, up_card);
        let total = player
            .apply(hand_index, action, &mut self.deck)
            .inspect_err(|e| {
                warn!(seat = player.seat(), hand = hand_index, error = %e, "action rejected");
            })?;
        debug!(
            seat = player.seat(),
            name = player.name(),
            hand = hand_index,
            ?action,
            %total,
            "action applied"
        );
        Ok(action)
    }

    /// Drops players left with no cash. The dealer always stays.
    fn remove_broke_players(&mut self) {
        let (remaining, broke): (Vec<_>, Vec<_>) = std::mem::take(&mut self.players)
            .into_iter()
            .partition(|p| p.cash() > 0);
        for player in &broke {
            warn!(seat = player.seat(), name = player.name(), "player eliminated");
        }
        self.players = remaining;
    }

    fn round_limit_reached(&self, start: u32) -> bool {
        self.max_rounds
            .is_some_and(|limit| self.round - start >= limit)
    }

    fn notify(&self, id: EventId, event: impl FnOnce() -> Event) {
        if self.events.is_registered(id) {
            self.events.fire(id, &event());
        }
    }

    fn seat_views(&self) -> Vec<SeatView> {
        self.players.iter().map(Player::view).collect()
    }

    fn table_event(&self) -> Event {
        Event::Table {
            round: self.round,
            players: self.seat_views(),
        }
    }

    fn deal_event(&self) -> Event {
        Event::Deal {
            players: self.seat_views(),
            dealer: self.dealer.view(),
        }
    }

    fn hand_event(&self, idx: usize, hand_index: usize) -> Event {
        let player = &self.players[idx];
        Event::PlayerHand {
            player: player.view(),
            hand_index,
            hand: player.hands()[hand_index].clone(),
            dealer_up_card: self.dealer.up_card(),
        }
    }
}
