//! Round-robin pairing (circle method).
//!
//! # Algorithm
//!
//! For an even roster of `n` teams, position 0 stays fixed. One round
//! pairs the first remaining team with the last remaining team, working
//! inward, which yields `n/2` fixtures with every team exactly once.
//! Between rounds the last team moves to position 1 (everything else
//! shifts right by one). After `n-1` rotations every pair has met once and
//! the roster is back in its original order.
//!
//! Odd rosters are padded with a bye sentinel by [`Division`].
//!
//! # Reference
//! - Kirkman (1847), "On a Problem in Combinations"
//! - de Werra (1981), "Scheduling in Sports"

mod division;

pub use division::{Division, Round};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::TeamId;

/// Which side of a pairing is listed as "team A".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// As paired on even cycles, swapped on odd cycles.
    #[default]
    CycleParity,
    /// Coin flip per fixture.
    Random,
    /// Always as paired (front of roster first).
    Fixed,
}

impl Orientation {
    /// Orients one raw pairing.
    pub fn orient<R: Rng>(
        &self,
        pair: (TeamId, TeamId),
        cycle: usize,
        rng: &mut R,
    ) -> (TeamId, TeamId) {
        let swap = match self {
            Orientation::CycleParity => cycle % 2 == 1,
            Orientation::Random => rng.random_bool(0.5),
            Orientation::Fixed => false,
        };
        if swap {
            (pair.1, pair.0)
        } else {
            pair
        }
    }
}

/// Round-robin generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingOptions {
    /// Complete round-robin passes (≥ 1).
    pub cycles: usize,
    /// Per-division cap on generated rounds. `None` = unlimited.
    pub max_rounds: Option<usize>,
    /// Shuffle the roster once before the first round.
    pub shuffle: bool,
    /// Home/away policy.
    pub orientation: Orientation,
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            cycles: 1,
            max_rounds: None,
            shuffle: false,
            orientation: Orientation::CycleParity,
        }
    }
}

/// Pairs one round: first with last, working inward.
///
/// `roster` must have even length. Pairs are returned front-first.
pub fn circle_round(roster: &[TeamId]) -> Vec<(TeamId, TeamId)> {
    debug_assert!(roster.len() % 2 == 0, "roster must be padded to even size");
    let n = roster.len();
    (0..n / 2).map(|i| (roster[i], roster[n - 1 - i])).collect()
}

/// Advances the roster to the next round: the last team moves to
/// position 1, position 0 never moves.
pub fn rotate_roster(roster: &mut [TeamId]) {
    if roster.len() > 2 {
        roster[1..].rotate_right(1);
    }
}
