//! Side pot calculation tests using property-based testing
//!
//! These tests verify that the pot ledger splits correctly in all scenarios:
//! - Multiple all-ins at different amounts
//! - Folded players contribute but can't win
//! - Correct distribution of remainder chips
//! - Side pot eligibility based on investment levels

use pokerlib::game::{
    entities::{Chips, PlayerId},
    pot::{Pot, SidePot, WagerKind, split},
    round::Phase,
};
use proptest::prelude::*;

fn pot_from(investments: &[(PlayerId, Chips)]) -> Pot {
    let mut pot = Pot::new();
    for (player, amount) in investments {
        pot.record(*player, Phase::Preflop, WagerKind::Call, *amount);
    }
    pot
}

fn tier_total(side_pots: &[SidePot]) -> Chips {
    side_pots.iter().map(|side_pot| side_pot.amount).sum()
}

#[test]
fn test_simple_side_pot_three_players() {
    // Player 1 is all in for 50, players 2 and 3 put in 100.
    let pot = pot_from(&[(1, 50), (2, 100), (3, 100)]);
    let side_pots = pot.side_pots(&[1, 2, 3]);

    assert_eq!(
        side_pots,
        vec![
            SidePot {
                cap: 50,
                amount: 150,
                eligible: vec![1, 2, 3],
            },
            SidePot {
                cap: 100,
                amount: 100,
                eligible: vec![2, 3],
            },
        ]
    );
}

#[test]
fn test_multiple_side_pots_four_players() {
    let pot = pot_from(&[(1, 25), (2, 75), (3, 150), (4, 150)]);
    let side_pots = pot.side_pots(&[1, 2, 3, 4]);

    // Main pot: 25 x 4, side pot 1: 50 x 3, side pot 2: 75 x 2
    let amounts: Vec<Chips> = side_pots.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![100, 150, 150]);
    assert_eq!(side_pots[0].eligible, vec![1, 2, 3, 4]);
    assert_eq!(side_pots[1].eligible, vec![2, 3, 4]);
    assert_eq!(side_pots[2].eligible, vec![3, 4]);
    assert_eq!(tier_total(&side_pots), 400);
}

#[test]
fn test_side_pot_with_folder() {
    // Player 1 bets 50 then folds.
    let pot = pot_from(&[(1, 50), (2, 100), (3, 100)]);
    let side_pots = pot.side_pots(&[2, 3]);

    assert_eq!(side_pots.len(), 1);
    assert_eq!(side_pots[0].amount, 250);
    assert_eq!(side_pots[0].eligible, vec![2, 3]);
}

#[test]
fn test_folder_above_every_all_in() {
    // The folder's chips above the highest contender land in the top tier,
    // which only player 3 can win.
    let pot = pot_from(&[(1, 300), (2, 40), (3, 100)]);
    let side_pots = pot.side_pots(&[2, 3]);

    assert_eq!(side_pots[0].amount, 120);
    assert_eq!(side_pots[1].amount, 60 + 60 + 200);
    assert_eq!(side_pots[1].eligible, vec![3]);
    assert_eq!(tier_total(&side_pots), pot.total());
}

#[test]
fn test_wagers_across_streets() {
    let mut pot = Pot::new();
    pot.record(1, Phase::Preflop, WagerKind::SmallBlind, 5);
    pot.record(2, Phase::Preflop, WagerKind::BigBlind, 10);
    pot.record(1, Phase::Preflop, WagerKind::Call, 5);
    pot.record(1, Phase::Flop, WagerKind::AllIn, 15);
    pot.record(2, Phase::Flop, WagerKind::Call, 15);

    let side_pots = pot.side_pots(&[1, 2]);
    assert_eq!(side_pots.len(), 1);
    assert_eq!(side_pots[0].cap, 25);
    assert_eq!(side_pots[0].amount, 50);
}

#[test]
fn test_remainder_chip_distribution() {
    // 100 between three winners: 34, 33, 33
    let shares = split(100, &[5, 2, 9]);
    assert_eq!(shares, vec![(5, 34), (2, 33), (9, 33)]);
}

#[test]
fn test_empty_pot() {
    let pot = Pot::new();
    assert_eq!(pot.total(), 0);
    assert!(pot.side_pots(&[1, 2]).is_empty());
}

// Strategy for a table of 2 to 9 players, each with a contribution and a
// folded flag. At least one player is still in.
fn investments_strategy() -> impl Strategy<Value = Vec<(Chips, bool)>> {
    prop::collection::vec((1u32..=5_000, any::<bool>()), 2..=9)
        .prop_filter("someone must still be in", |players| players.iter().any(|(_, folded)| !folded))
}

fn setup(players: &[(Chips, bool)]) -> (Pot, Vec<PlayerId>) {
    let investments: Vec<(PlayerId, Chips)> = players
        .iter()
        .enumerate()
        .map(|(idx, (amount, _))| (idx as PlayerId, *amount))
        .collect();
    let contenders = players
        .iter()
        .enumerate()
        .filter(|(_, (_, folded))| !folded)
        .map(|(idx, _)| idx as PlayerId)
        .collect();
    (pot_from(&investments), contenders)
}

proptest! {
    #[test]
    fn test_side_pots_conserve_chips(players in investments_strategy()) {
        let (pot, contenders) = setup(&players);
        let side_pots = pot.side_pots(&contenders);
        let invested: Chips = players.iter().map(|(amount, _)| amount).sum();
        prop_assert_eq!(tier_total(&side_pots), invested);
        prop_assert_eq!(pot.total(), invested);
    }

    #[test]
    fn test_eligibility_tracks_contribution(players in investments_strategy()) {
        let (pot, contenders) = setup(&players);
        for side_pot in pot.side_pots(&contenders) {
            prop_assert!(!side_pot.eligible.is_empty());
            for player in &contenders {
                let eligible = side_pot.eligible.contains(player);
                prop_assert_eq!(eligible, pot.contributed(*player) >= side_pot.cap);
            }
            for player in &side_pot.eligible {
                prop_assert!(contenders.contains(player), "folded player {} is eligible", player);
            }
        }
    }

    #[test]
    fn test_tiers_ascend_and_shrink(players in investments_strategy()) {
        let (pot, contenders) = setup(&players);
        let side_pots = pot.side_pots(&contenders);
        prop_assert!(!side_pots.is_empty());
        for pair in side_pots.windows(2) {
            prop_assert!(pair[0].cap < pair[1].cap);
            prop_assert!(pair[0].eligible.len() > pair[1].eligible.len());
        }
    }

    #[test]
    fn test_split_conserves_chips(amount in 0u32..100_000, num_winners in 1usize..=9) {
        let winners: Vec<PlayerId> = (0..num_winners as PlayerId).collect();
        let shares = split(amount, &winners);
        prop_assert_eq!(shares.len(), num_winners);
        prop_assert_eq!(shares.iter().map(|(_, share)| share).sum::<Chips>(), amount);

        let smallest = shares.iter().map(|(_, share)| *share).min().unwrap();
        let largest = shares.iter().map(|(_, share)| *share).max().unwrap();
        prop_assert!(largest - smallest < num_winners as Chips);
        prop_assert_eq!(shares[0].1, largest);
    }
}
