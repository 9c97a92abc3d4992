mod helpers;

use std::cell::RefCell;

use blackjack_engine::cards::Rank;
use blackjack_engine::engine::BlackjackGame;
use blackjack_engine::events::{Event, EventId};
use blackjack_engine::player::{Action, Player};
use helpers::{card, stacked_deck, Scripted};
use Rank::*;

fn record_all<'h>(game: &BlackjackGame<'h>, log: &'h RefCell<Vec<&'static str>>) {
    for id in EventId::ALL {
        game.events()
            .register(id, move |_| log.borrow_mut().push(id.as_str()));
    }
}

#[test]
fn one_round_fires_every_event_in_order() {
    let log = RefCell::new(Vec::new());
    let mut game = BlackjackGame::with_deck(stacked_deck(&[Ten, Ten, Nine, Seven]))
        .with_max_rounds(Some(1));
    game.join(Player::new("a", Scripted::new(&[10], &[Action::Stand])));
    record_all(&game, &log);

    game.play_game().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "pre_game",
            "pre_round",
            "pre_player_bet",
            "post_player_bet",
            "pre_deal",
            "post_deal",
            "pre_player_play",
            "pre_player_play_hand",
            "pre_player_play_hand_turn",
            "post_player_play_hand_turn",
            "post_player_play_hand",
            "post_player_play",
            "pre_dealer_play",
            "post_dealer_play",
            "pre_determine_winners",
            "pre_determine_player_win",
            "pre_determine_players_hand_win",
            "post_determine_players_hand_win",
            "post_determine_player_win",
            "post_determine_winners",
            "post_round",
            "post_game",
        ]
    );
}

#[test]
fn split_plays_each_child_as_its_own_hand() {
    let log = RefCell::new(Vec::new());
    let indices = RefCell::new(Vec::new());
    let mut game = BlackjackGame::with_deck(stacked_deck(&[Eight, Ten, Eight, Seven, Three, Ten]))
        .with_max_rounds(Some(1));
    game.join(Player::new(
        "a",
        Scripted::new(&[10], &[Action::Split, Action::Stand, Action::Stand]),
    ));
    game.events().register(EventId::PrePlayerPlayHand, |e| {
        if let Event::PlayerHand { hand_index, .. } = e {
            indices.borrow_mut().push(*hand_index);
        }
    });
    game.events()
        .register(EventId::PostPlayerPlayHandTurn, |_| log.borrow_mut().push("turn"));

    game.play_game().unwrap();

    assert_eq!(*indices.borrow(), vec![0, 1, 2]);
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn bet_events_carry_the_wager() {
    let bets = RefCell::new(Vec::new());
    let mut game = BlackjackGame::with_deck(stacked_deck(&[Ten, Ten, Nine, Seven]))
        .with_max_rounds(Some(1));
    game.join(Player::new("a", Scripted::new(&[25], &[])));
    for id in [EventId::PrePlayerBet, EventId::PostPlayerBet] {
        game.events().register(id, |e| {
            if let Event::PlayerBet { player, bet } = e {
                bets.borrow_mut().push((player.seat, *bet));
            }
        });
    }

    game.play_game().unwrap();

    assert_eq!(*bets.borrow(), vec![(1, None), (1, Some(25))]);
}

#[test]
fn hand_settlement_reports_winnings_after_the_fact() {
    let settled = RefCell::new(Vec::new());
    let mut game = BlackjackGame::with_deck(stacked_deck(&[Ten, Ten, Six, Nine]))
        .with_max_rounds(Some(1));
    game.join(Player::new("a", Scripted::new(&[40], &[])));
    for id in [
        EventId::PreDeterminePlayersHandWin,
        EventId::PostDeterminePlayersHandWin,
    ] {
        game.events().register(id, |e| {
            if let Event::HandSettlement {
                hand,
                dealer_hand,
                winnings,
                ..
            } = e
            {
                settled
                    .borrow_mut()
                    .push((hand.bet(), dealer_hand.cards().len(), *winnings));
            }
        });
    }

    game.play_game().unwrap();

    // the bet is cleared by the time the post event fires
    assert_eq!(*settled.borrow(), vec![(40, 2, None), (0, 2, Some(-40))]);
}

#[test]
fn deal_event_shows_both_dealer_cards() {
    let dealt = RefCell::new(None);
    let mut game = BlackjackGame::with_deck(stacked_deck(&[Ten, Four, Nine, King, Five]))
        .with_max_rounds(Some(1));
    game.join(Player::new("a", Scripted::default()));
    game.events().register(EventId::PostDeal, |e| {
        if let Event::Deal { dealer, players } = e {
            *dealt.borrow_mut() = Some((dealer.hands[0].cards().to_vec(), players.len()));
        }
    });

    game.play_game().unwrap();

    assert_eq!(
        *dealt.borrow(),
        Some((vec![card(Four), card(King)], 1))
    );
}

#[test]
fn failed_phase_skips_its_post_event() {
    let log = RefCell::new(Vec::new());
    let mut game = BlackjackGame::new(Some(1)).with_max_rounds(Some(1));
    game.join(Player::new("a", Scripted::new(&[0], &[])));
    record_all(&game, &log);

    assert!(game.play_game().is_err());

    assert_eq!(*log.borrow(), vec!["pre_game", "pre_round", "pre_player_bet"]);
}

#[test]
fn unregistered_events_stay_quiet() {
    let log = RefCell::new(Vec::new());
    let mut game = BlackjackGame::with_deck(stacked_deck(&[Ten, Ten, Nine, Seven]))
        .with_max_rounds(Some(1));
    game.join(Player::new("a", Scripted::default()));
    record_all(&game, &log);
    for id in EventId::ALL {
        if id != EventId::PostGame {
            assert!(game.events().unregister(id));
        }
    }

    game.play_game().unwrap();

    assert_eq!(*log.borrow(), vec!["post_game"]);
}
