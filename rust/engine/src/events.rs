//! Pre/post notifications around every phase of a game.
//!
//! The engine never depends on who listens. Observers such as a console
//! presenter register one handler per [`EventId`]; firing an id nobody
//! registered does nothing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::cards::Card;
use crate::hand::Hand;
use crate::player::SeatView;

/// Every notification the engine fires.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventId {
    PreGame,
    PostGame,
    PreRound,
    PostRound,
    PrePlayerBet,
    PostPlayerBet,
    PreDeal,
    PostDeal,
    PrePlayerPlay,
    PostPlayerPlay,
    PrePlayerPlayHand,
    PostPlayerPlayHand,
    PrePlayerPlayHandTurn,
    PostPlayerPlayHandTurn,
    PreDealerPlay,
    PostDealerPlay,
    PreDetermineWinners,
    PostDetermineWinners,
    PreDeterminePlayerWin,
    PostDeterminePlayerWin,
    PreDeterminePlayersHandWin,
    PostDeterminePlayersHandWin,
}

impl EventId {
    pub const ALL: [EventId; 22] = [
        EventId::PreGame,
        EventId::PostGame,
        EventId::PreRound,
        EventId::PostRound,
        EventId::PrePlayerBet,
        EventId::PostPlayerBet,
        EventId::PreDeal,
        EventId::PostDeal,
        EventId::PrePlayerPlay,
        EventId::PostPlayerPlay,
        EventId::PrePlayerPlayHand,
        EventId::PostPlayerPlayHand,
        EventId::PrePlayerPlayHandTurn,
        EventId::PostPlayerPlayHandTurn,
        EventId::PreDealerPlay,
        EventId::PostDealerPlay,
        EventId::PreDetermineWinners,
        EventId::PostDetermineWinners,
        EventId::PreDeterminePlayerWin,
        EventId::PostDeterminePlayerWin,
        EventId::PreDeterminePlayersHandWin,
        EventId::PostDeterminePlayersHandWin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventId::PreGame => "pre_game",
            EventId::PostGame => "post_game",
            EventId::PreRound => "pre_round",
            EventId::PostRound => "post_round",
            EventId::PrePlayerBet => "pre_player_bet",
            EventId::PostPlayerBet => "post_player_bet",
            EventId::PreDeal => "pre_deal",
            EventId::PostDeal => "post_deal",
            EventId::PrePlayerPlay => "pre_player_play",
            EventId::PostPlayerPlay => "post_player_play",
            EventId::PrePlayerPlayHand => "pre_player_play_hand",
            EventId::PostPlayerPlayHand => "post_player_play_hand",
            EventId::PrePlayerPlayHandTurn => "pre_player_play_hand_turn",
            EventId::PostPlayerPlayHandTurn => "post_player_play_hand_turn",
            EventId::PreDealerPlay => "pre_dealer_play",
            EventId::PostDealerPlay => "post_dealer_play",
            EventId::PreDetermineWinners => "pre_determine_winners",
            EventId::PostDetermineWinners => "post_determine_winners",
            EventId::PreDeterminePlayerWin => "pre_determine_player_win",
            EventId::PostDeterminePlayerWin => "post_determine_player_win",
            EventId::PreDeterminePlayersHandWin => "pre_determine_players_hand_win",
            EventId::PostDeterminePlayersHandWin => "post_determine_players_hand_win",
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase bracketed by a `pre_` and a `post_` event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Game,
    Round,
    Deal,
    PlayerPlay,
    PlayerPlayHand,
    PlayerPlayHandTurn,
    DealerPlay,
    DetermineWinners,
    DeterminePlayerWin,
}

impl Stage {
    pub fn pre(self) -> EventId {
        match self {
            Stage::Game => EventId::PreGame,
            Stage::Round => EventId::PreRound,
            Stage::Deal => EventId::PreDeal,
            Stage::PlayerPlay => EventId::PrePlayerPlay,
            Stage::PlayerPlayHand => EventId::PrePlayerPlayHand,
            Stage::PlayerPlayHandTurn => EventId::PrePlayerPlayHandTurn,
            Stage::DealerPlay => EventId::PreDealerPlay,
            Stage::DetermineWinners => EventId::PreDetermineWinners,
            Stage::DeterminePlayerWin => EventId::PreDeterminePlayerWin,
        }
    }

    pub fn post(self) -> EventId {
        match self {
            Stage::Game => EventId::PostGame,
            Stage::Round => EventId::PostRound,
            Stage::Deal => EventId::PostDeal,
            Stage::PlayerPlay => EventId::PostPlayerPlay,
            Stage::PlayerPlayHand => EventId::PostPlayerPlayHand,
            Stage::PlayerPlayHandTurn => EventId::PostPlayerPlayHandTurn,
            Stage::DealerPlay => EventId::PostDealerPlay,
            Stage::DetermineWinners => EventId::PostDetermineWinners,
            Stage::DeterminePlayerWin => EventId::PostDeterminePlayerWin,
        }
    }
}

/// Payload passed to handlers. Snapshots are taken at firing time, so a
/// `post_` event shows the state the phase left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `pre_game`/`post_game` and `pre_round`/`post_round`.
    Table { round: u32, players: Vec<SeatView> },
    /// `bet` is `None` before the wager is placed.
    PlayerBet { player: SeatView, bet: Option<u32> },
    Deal { players: Vec<SeatView>, dealer: SeatView },
    /// `pre_player_play`/`post_player_play`.
    PlayerPlay { player: SeatView },
    /// Hand-level and turn-level events for `player.hands[hand_index]`.
    PlayerHand {
        player: SeatView,
        hand_index: usize,
        hand: Hand,
        dealer_up_card: Option<Card>,
    },
    DealerPlay { dealer: SeatView },
    DetermineWinners { players: Vec<SeatView>, dealer: SeatView },
    DeterminePlayerWin { player: SeatView, dealer: SeatView },
    /// `winnings` is `None` before the hand is settled.
    HandSettlement {
        seat: usize,
        hand: Hand,
        dealer_hand: Hand,
        winnings: Option<i64>,
    },
}

type Handler<'h> = Box<dyn FnMut(&Event) + 'h>;

/// Handler registry keyed by [`EventId`], at most one handler per id.
///
/// Cloning yields another handle onto the same registry.
#[derive(Clone, Default)]
pub struct EventBus<'h> {
    handlers: Rc<RefCell<HashMap<EventId, Handler<'h>>>>,
}

impl fmt::Debug for EventBus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.borrow();
        let mut ids: Vec<&str> = handlers.keys().map(EventId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("EventBus").field("handlers", &ids).finish()
    }
}

impl<'h> EventBus<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handler` for `id`, replacing any earlier one.
    pub fn register(&self, id: EventId, handler: impl FnMut(&Event) + 'h) {
        self.handlers.borrow_mut().insert(id, Box::new(handler));
    }

    pub fn unregister(&self, id: EventId) -> bool {
        self.handlers.borrow_mut().remove(&id).is_some()
    }

    pub fn is_registered(&self, id: EventId) -> bool {
        self.handlers.borrow().contains_key(&id)
    }

    /// Calls the handler for `id`, if any.
    ///
    /// The handler is taken out of the registry while it runs, so it may
    /// register or unregister handlers itself; a replacement registered for
    /// the same id wins over the running one.
    pub fn fire(&self, id: EventId, event: &Event) {
        let handler = self.handlers.borrow_mut().remove(&id);
        match handler {
            Some(mut handler) => {
                tracing::trace!(event = %id, "dispatching event");
                handler(event);
                self.handlers.borrow_mut().entry(id).or_insert(handler);
            }
            None => tracing::trace!(event = %id, "no handler registered"),
        }
    }

    /// Fires `stage.pre()`, runs `body`, then fires `stage.post()`.
    ///
    /// `describe` builds the payload from `ctx` right before each firing and
    /// is skipped when nobody listens. If `body` fails the error is returned
    /// and the post event is not fired.
    pub fn fire_wrapped<C, T, E>(
        &self,
        stage: Stage,
        ctx: &mut C,
        describe: impl Fn(&C) -> Event,
        body: impl FnOnce(&mut C) -> Result<T, E>,
    ) -> Result<T, E> {
        let pre = stage.pre();
        if self.is_registered(pre) {
            self.fire(pre, &describe(&*ctx));
        }
        let out = body(ctx)?;
        let post = stage.post();
        if self.is_registered(post) {
            self.fire(post, &describe(&*ctx));
        }
        Ok(out)
    }
}
