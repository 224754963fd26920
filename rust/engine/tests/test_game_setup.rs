use std::collections::HashMap;

use hilo_engine::cards::{full_deck, Card, CardKind, Op, Suit};
use hilo_engine::deck::Deck;
use hilo_engine::game::{Game, GameConfig, Phase};
use hilo_engine::policy::{
    BetAction, BetContext, DeclarationChoice, DeclareContext, DecisionPolicy,
};
use hilo_engine::player::Declaration;
use hilo_engine::solver::HandSolution;

/// A policy that always checks or calls and declares its closer side;
/// keeps setup tests independent of the tier heuristics.
struct Caller;

impl DecisionPolicy for Caller {
    fn choose_action(&mut self, _ctx: &BetContext, _hand: &HandSolution) -> BetAction {
        BetAction::Call
    }

    fn choose_declaration(
        &mut self,
        _ctx: &DeclareContext,
        hand: &HandSolution,
    ) -> DeclarationChoice {
        if hand.low.diff <= hand.high.diff {
            DeclarationChoice {
                declaration: Declaration::Low,
                result: hand.low.result,
                low_result: None,
                high_result: None,
                equation: hand.low.equation.clone(),
            }
        } else {
            DeclarationChoice {
                declaration: Declaration::High,
                result: hand.high.result,
                low_result: None,
                high_result: None,
                equation: hand.high.equation.clone(),
            }
        }
    }

    fn name(&self) -> &str {
        "caller"
    }
}

fn new_game(seed: u64, ai_count: usize) -> Game {
    let cfg = GameConfig {
        ai_count,
        seed,
        ..GameConfig::default()
    };
    let mut game = Game::new(cfg, Box::new(Caller));
    game.init_game();
    game
}

#[test]
fn full_deck_composition() {
    let deck = full_deck();
    assert_eq!(deck.len(), 52);

    let numbers = deck.iter().filter(|c| c.is_number()).count();
    let multiplies = deck
        .iter()
        .filter(|c| matches!(c.kind, CardKind::Multiply))
        .count();
    let sqrts = deck
        .iter()
        .filter(|c| matches!(c.kind, CardKind::Sqrt))
        .count();
    assert_eq!(numbers, 44, "values 0..=10 in four suits");
    assert_eq!(multiplies, 4);
    assert_eq!(sqrts, 4);

    // each (value, suit) pair appears exactly once
    let mut seen: HashMap<(u8, Suit), u32> = HashMap::new();
    for c in deck.iter().filter_map(|c| c.number_value()) {
        *seen.entry(c).or_default() += 1;
    }
    assert_eq!(seen.len(), 44);
    assert!(seen.values().all(|&n| n == 1));
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_ne!(a, b, "different seeds should produce different orders");
}

#[test]
fn draw_number_skips_specials_and_preserves_order() {
    let mut deck = Deck::new_with_seed(9);
    // Unshuffled deck ends with the 4 sqrt cards on top.
    let c = deck.draw().unwrap();
    assert!(matches!(c.kind, CardKind::Sqrt));

    let n = deck.draw_number().unwrap();
    assert!(n.is_number());
    assert_eq!(deck.remaining(), 50);
}

#[test]
fn returned_cards_go_to_the_bottom() {
    let mut deck = Deck::new_with_seed(9);
    let card = deck.draw().unwrap();
    deck.return_to_bottom(card);
    assert_eq!(deck.remaining(), 52);
    // drain everything else; the returned card must come out last
    let mut last = None;
    while let Some(c) = deck.draw() {
        last = Some(c);
    }
    assert_eq!(last, Some(card));
}

#[test]
fn init_seats_one_human_and_n_ai() {
    let game = new_game(42, 3);
    let players = game.players();
    assert_eq!(players.len(), 4);
    assert!(players[0].is_human);
    assert!(players.iter().skip(1).all(|p| !p.is_human));
    assert!(players.iter().all(|p| p.chips == 500));

    // AI names are unique and temperaments sit in the sampled band
    let mut names: Vec<&str> = players.iter().skip(1).map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 3, "AI names must not repeat");
    for p in players.iter().skip(1) {
        let pers = p.personality.expect("AI seats get a personality");
        assert!((0.4..=0.6).contains(&pers.risk));
        assert!((0.4..=0.6).contains(&pers.carelessness));
    }
    assert!(players[0].personality.is_none());
}

#[test]
fn start_round_posts_antes_and_deals_three_numbers() {
    let mut game = new_game(42, 3);
    game.start_round().unwrap();

    assert_eq!(game.round_number(), 1);
    assert_eq!(game.betting_cap(), 500);

    for (i, p) in game.players().iter().enumerate() {
        assert!(p.total_wagered >= 10, "every seat antes");
        assert_eq!(
            p.number_values().len(),
            3,
            "initial deal is exactly 3 number cards"
        );
        assert!(
            p.hand[0].is_number() && p.hand[0].face_down,
            "first card is a face-down number"
        );
        assert_eq!(p.ops.len(), 3, "operator rack always holds 3 slots");
        assert!(
            p.ops.iter().filter(|&&o| o == Op::Mul).count() <= 1,
            "at most one × per rack"
        );
        // × in the rack only ever comes from a drawn multiply card
        if p.ops.contains(&Op::Mul) {
            assert!(
                p.hand.iter().any(|c| matches!(c.kind, CardKind::Multiply)),
                "seat {} has × without a multiply card",
                i
            );
        }
    }
}

#[test]
fn face_down_cards_are_masked_for_other_viewers() {
    let mut game = new_game(42, 3);
    game.start_round().unwrap();

    let own = game.visible_hand(1, true);
    let other = game.visible_hand(1, false);
    assert_eq!(own.len(), other.len());
    assert!(own[0].kind.is_some(), "owners see their hidden card");
    assert!(other[0].kind.is_none(), "others do not");
    assert!(other[0].face_down);

    // open cards are visible to everyone
    assert!(other.iter().skip(1).all(|v| v.kind.is_some() || v.face_down));
}

#[test]
fn pot_equals_total_wagers_after_the_deal() {
    for seed in [1u64, 7, 42, 1234] {
        let mut game = new_game(seed, 3);
        game.start_round().unwrap();
        let wagered: u32 = game.players().iter().map(|p| p.total_wagered).sum();
        assert_eq!(game.pot(), wagered, "seed {}", seed);
    }
}

#[test]
fn betting_cap_is_the_smallest_alive_stack() {
    let cfg = GameConfig {
        ai_count: 2,
        starting_chips: 300,
        seed: 5,
        ..GameConfig::default()
    };
    let mut game = Game::new(cfg, Box::new(Caller));
    game.init_game();
    game.start_round().unwrap();
    assert_eq!(game.betting_cap(), 300);
}

#[test]
fn reset_to_lobby_clears_the_table() {
    let mut game = new_game(42, 3);
    game.start_round().unwrap();
    game.reset_to_lobby();
    assert_eq!(game.phase(), Phase::Lobby);
    assert!(game.players().is_empty());
    assert_eq!(game.pot(), 0);
    assert_eq!(game.round_number(), 0);
}
