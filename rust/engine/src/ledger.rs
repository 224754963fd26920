use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Betting and pot ledger for one round. The cap is the smallest stack
/// among alive players, snapshotted before antes, and bounds each
/// player's total wager (ante plus both betting rounds).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pot: u32,
    cap: u32,
}

impl Ledger {
    pub fn open(cap: u32) -> Self {
        Self { pot: 0, cap }
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Room left under the cap for this player.
    pub fn headroom(&self, player: &Player) -> u32 {
        self.cap.saturating_sub(player.total_wagered)
    }

    /// Move chips from a player's stack into the pot, clamped so the bet
    /// never over-withdraws the stack nor breaches the round cap. Returns
    /// the amount actually wagered. A player left at zero chips is all-in.
    pub fn place_bet(&mut self, player: &mut Player, amount: u32) -> u32 {
        let clamped = amount.min(self.headroom(player)).min(player.chips);
        player.chips -= clamped;
        player.current_bet += clamped;
        player.total_wagered += clamped;
        if player.chips == 0 {
            player.all_in = true;
        }
        self.pot += clamped;
        clamped
    }

    /// Pay out of the pot at settlement.
    pub fn award(&mut self, player: &mut Player, amount: u32) {
        let paid = amount.min(self.pot);
        self.pot -= paid;
        player.chips = player.chips.saturating_add(paid);
    }

    /// Drop the remainder at the end of a split (the documented odd-chip
    /// quirk: neither winner receives it).
    pub fn burn_remainder(&mut self) -> u32 {
        let burned = self.pot;
        self.pot = 0;
        burned
    }
}
