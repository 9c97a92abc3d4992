mod helpers;

use blackjack_engine::cards::{all_ranks, Rank};
use blackjack_engine::errors::GameError;
use blackjack_engine::hand::{Hand, HandTotal};
use blackjack_engine::player::Action;
use helpers::{card, hand};
use Rank::*;

fn illegal(result: Result<impl std::fmt::Debug, GameError>, expected: Action) {
    match result {
        Err(GameError::IllegalAction { action, .. }) => assert_eq!(action, expected),
        other => panic!("expected IllegalAction({:?}), got {:?}", expected, other),
    }
}

#[test]
fn hit_adds_card_and_returns_total() {
    let mut h = hand(&[Five, Six]);
    assert_eq!(h.hit(card(Nine)), Ok(HandTotal::Points(20)));
    assert_eq!(h.len(), 3);
    assert!(h.is_active());
}

#[test]
fn busting_hit_makes_hand_inactive() {
    let mut h = hand(&[King, Six]);
    assert_eq!(h.hit(card(Nine)), Ok(HandTotal::Bust));
    assert!(!h.is_active());
    illegal(h.hit(card(Two)), Action::Hit);
}

#[test]
fn stand_finalizes_total() {
    let mut h = hand(&[King, Seven]);
    assert_eq!(h.stand(), Ok(HandTotal::Points(17)));
    assert!(!h.is_active());
    illegal(h.stand(), Action::Stand);
    illegal(h.hit(card(Two)), Action::Hit);
}

#[test]
fn fresh_hand_may_stand() {
    let mut h = Hand::new();
    assert!(h.stand().is_ok());
    assert!(!h.is_active());
}

#[test]
fn double_down_doubles_bet_takes_one_card_and_stands() {
    let mut h = hand(&[Five, Six]);
    h.place_bet(100, 1000).unwrap();
    assert!(h.double_down_allowed(900));
    assert_eq!(h.double_down(card(Ten), 900), Ok(HandTotal::Points(21)));
    assert_eq!(h.bet(), 200);
    assert_eq!(h.len(), 3);
    assert!(!h.is_active());
}

#[test]
fn double_down_needs_cash_to_match_bet() {
    let mut h = hand(&[Five, Six]);
    h.place_bet(100, 150).unwrap();
    assert!(!h.double_down_allowed(50));
    let before = h.clone();
    illegal(h.double_down(card(Ten), 50), Action::DoubleDown);
    assert_eq!(h, before, "rejected double down must not mutate the hand");
}

#[test]
fn double_down_with_exact_cash_is_allowed() {
    let mut h = hand(&[Four, Five]);
    h.place_bet(100, 200).unwrap();
    assert!(h.double_down_allowed(100));
}

#[test]
fn splittable_iff_two_cards_of_equal_value() {
    for a in all_ranks() {
        for b in all_ranks() {
            let h = hand(&[a, b]);
            assert_eq!(
                h.splittable(),
                card(a).best_value() == card(b).best_value(),
                "{:?}/{:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn ten_and_king_split() {
    assert!(hand(&[Ten, King]).splittable());
}

#[test]
fn only_two_card_hands_split() {
    assert!(!hand(&[Eight]).splittable());
    assert!(!hand(&[Eight, Eight, Eight]).splittable());
    assert!(!Hand::new().splittable());
}

#[test]
fn split_eights_produces_two_split_hands() {
    let mut h = hand(&[Eight, Eight]);
    h.place_bet(100, 1000).unwrap();
    assert!(h.splittable());
    assert!(h.split_allowed(900));

    let [left, right] = h.split(900).expect("split allowed");
    for child in [&left, &right] {
        assert_eq!(child.cards(), &[card(Eight)]);
        assert_eq!(child.bet(), 100);
        assert!(child.is_from_split());
        assert!(child.is_active());
    }
    assert!(h.is_invalid());
    assert!(!h.is_active());
    assert_eq!(h.bet(), 0);
}

#[test]
fn split_without_cash_for_second_bet_is_rejected() {
    let mut h = hand(&[Nine, Nine]);
    h.place_bet(100, 150).unwrap();
    assert!(h.splittable());
    assert!(!h.split_allowed(50));
    illegal(h.split(50), Action::Split);
    assert!(!h.is_invalid());
    assert_eq!(h.bet(), 100);
}

#[test]
fn split_of_non_pair_is_rejected() {
    let mut h = hand(&[Nine, Ten]);
    h.place_bet(10, 1000).unwrap();
    illegal(h.split(990), Action::Split);
}

#[test]
fn split_hand_cannot_act_again() {
    let mut h = hand(&[Six, Six]);
    h.place_bet(10, 1000).unwrap();
    h.split(990).unwrap();
    illegal(h.hit(card(Two)), Action::Hit);
    illegal(h.split(990), Action::Split);
}

#[test]
fn clear_bet_zeroes_bet() {
    let mut h = hand(&[Two, Three]);
    h.place_bet(40, 100).unwrap();
    h.clear_bet();
    assert_eq!(h.bet(), 0);
}
