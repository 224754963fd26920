use hilo_engine::ledger::Ledger;
use hilo_engine::player::Player;

fn seat(id: usize, chips: u32) -> Player {
    let mut p = Player::new(id, "seat", false);
    p.chips = chips;
    p
}

#[test]
fn bet_moves_chips_into_the_pot() {
    let mut ledger = Ledger::open(500);
    let mut p = seat(0, 500);

    let placed = ledger.place_bet(&mut p, 10);
    assert_eq!(placed, 10);
    assert_eq!(p.chips, 490);
    assert_eq!(p.current_bet, 10);
    assert_eq!(p.total_wagered, 10);
    assert_eq!(ledger.pot(), 10);
    assert!(!p.all_in);
}

#[test]
fn bet_is_clamped_to_the_stack_and_marks_all_in() {
    let mut ledger = Ledger::open(500);
    let mut p = seat(0, 30);

    let placed = ledger.place_bet(&mut p, 100);
    assert_eq!(placed, 30, "cannot wager more than the stack");
    assert_eq!(p.chips, 0);
    assert!(p.all_in);
    assert_eq!(ledger.pot(), 30);
}

#[test]
fn bet_is_clamped_to_cap_headroom() {
    // Cap 50: a player who already wagered 40 has 10 of headroom left.
    let mut ledger = Ledger::open(50);
    let mut p = seat(0, 500);
    ledger.place_bet(&mut p, 40);
    assert_eq!(ledger.headroom(&p), 10);

    let placed = ledger.place_bet(&mut p, 100);
    assert_eq!(placed, 10);
    assert_eq!(p.total_wagered, 50);
    assert_eq!(ledger.headroom(&p), 0);
    assert!(!p.all_in, "a capped player still holds chips");
}

#[test]
fn wagers_conserve_chips() {
    let mut ledger = Ledger::open(500);
    let mut a = seat(0, 500);
    let mut b = seat(1, 200);

    ledger.place_bet(&mut a, 60);
    ledger.place_bet(&mut b, 200);
    ledger.place_bet(&mut a, 75);

    assert_eq!(a.chips + a.total_wagered, 500);
    assert_eq!(b.chips + b.total_wagered, 200);
    assert_eq!(ledger.pot(), a.total_wagered + b.total_wagered);
}

#[test]
fn award_pays_out_of_the_pot_only() {
    let mut ledger = Ledger::open(500);
    let mut a = seat(0, 500);
    let mut b = seat(1, 500);
    ledger.place_bet(&mut a, 50);
    ledger.place_bet(&mut b, 50);

    ledger.award(&mut a, 100);
    assert_eq!(a.chips, 550);
    assert_eq!(ledger.pot(), 0);

    // Over-award cannot mint chips.
    ledger.award(&mut b, 100);
    assert_eq!(b.chips, 450);
}

#[test]
fn burn_remainder_drops_the_odd_chip() {
    let mut ledger = Ledger::open(500);
    let mut a = seat(0, 500);
    ledger.place_bet(&mut a, 101);

    let half = 101 / 2;
    ledger.award(&mut a, half);
    let mut b = seat(1, 500);
    ledger.award(&mut b, half);

    let burned = ledger.burn_remainder();
    assert_eq!(burned, 1, "split of an odd pot drops one chip");
    assert_eq!(ledger.pot(), 0);
}

#[test]
fn zero_cap_blocks_all_wagering() {
    let mut ledger = Ledger::open(0);
    let mut p = seat(0, 500);
    assert_eq!(ledger.place_bet(&mut p, 10), 0);
    assert_eq!(p.chips, 500);
    assert_eq!(ledger.pot(), 0);
}
