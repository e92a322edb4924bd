//! The game's data: difficulties, the state the controller owns, and single shuffle steps.

use std::{fmt, time::Duration};

use rand::Rng;
use serde::Deserialize;

/// One of the fixed cup positions, `0..cups`.
///
/// A slot is a *position*. Which cup is sitting there changes as cups get swapped; see [`crate::CupRow`].
pub type Slot = usize;

/// How many cups a game uses unless configured otherwise.
pub const DEFAULT_CUPS: usize = 3;

/// How hard the shuffle is. See [`Difficulty::profile`] for what that actually means.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// How many swaps a shuffle does, and how long each one takes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DifficultyProfile {
    pub shuffle_count: u32,
    pub step_duration: Duration,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn profile(self) -> DifficultyProfile {
        let (shuffle_count, ms) = match self {
            Difficulty::Easy => (5, 500),
            Difficulty::Medium => (10, 300),
            Difficulty::Hard => (15, 200),
        };
        DifficultyProfile {
            shuffle_count,
            step_duration: Duration::from_millis(ms),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the [`GameController`](crate::GameController) knows about the game in progress.
///
/// `secret_slot` is always `Some` while `is_playing`; once a guess has been made it's kept around so the reveal can
/// show where the ball was.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GameState {
    pub is_playing: bool,
    pub score: u32,
    pub secret_slot: Option<Slot>,
    pub difficulty: Difficulty,
}

/// One transposition: the cups in slots `a` and `b` trade places. Always `a != b`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ShuffleStep {
    pub a: Slot,
    pub b: Slot,
}

impl ShuffleStep {
    /// Pick a random step among `cups` slots.
    ///
    /// `a` is uniform; `b` is redrawn until it differs from `a`. Together that's uniform over ordered distinct pairs.
    ///
    /// Panics if `cups < 2`, since there'd be no two distinct slots to pick.
    pub fn random(rng: &mut impl Rng, cups: usize) -> Self {
        assert!(cups >= 2, "can't shuffle fewer than two cups");
        let a = rng.gen_range(0..cups);
        let mut b = rng.gen_range(0..cups);
        while b == a {
            b = rng.gen_range(0..cups);
        }
        Self { a, b }
    }

    /// Where whatever was in `slot` ends up after this step.
    pub fn apply(self, slot: Slot) -> Slot {
        if slot == self.a {
            self.b
        } else if slot == self.b {
            self.a
        } else {
            slot
        }
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    #[test]
    fn profiles_match_reference() {
        let ms = |d: Difficulty| {
            let p = d.profile();
            (p.shuffle_count, p.step_duration.as_millis())
        };
        assert_eq!(ms(Difficulty::Easy), (5, 500));
        assert_eq!(ms(Difficulty::Medium), (10, 300));
        assert_eq!(ms(Difficulty::Hard), (15, 200));
    }

    #[test]
    fn default_state_is_idle() {
        let state = GameState::default();
        assert!(!state.is_playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.secret_slot, None);
        assert_eq!(state.difficulty, Difficulty::Easy);
    }

    #[test]
    fn random_steps_are_distinct_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for cups in 2..=9 {
            for _ in 0..500 {
                let step = ShuffleStep::random(&mut rng, cups);
                assert_ne!(step.a, step.b);
                assert!(step.a < cups && step.b < cups);
            }
        }
    }

    #[test]
    fn random_steps_cover_every_ordered_pair() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut seen = [[0u32; 3]; 3];
        for _ in 0..3000 {
            let step = ShuffleStep::random(&mut rng, 3);
            seen[step.a][step.b] += 1;
        }
        for a in 0..3 {
            for b in 0..3 {
                if a == b {
                    assert_eq!(seen[a][b], 0);
                } else {
                    // 500 expected each; very loose bounds
                    assert!(seen[a][b] > 350, "({a}, {b}) only seen {} times", seen[a][b]);
                }
            }
        }
    }

    #[test]
    fn apply_is_a_transposition() {
        let step = ShuffleStep { a: 0, b: 2 };
        assert_eq!(step.apply(0), 2);
        assert_eq!(step.apply(2), 0);
        assert_eq!(step.apply(1), 1);
        for slot in 0..3 {
            assert_eq!(step.apply(step.apply(slot)), slot);
        }
    }

    #[test]
    fn difficulty_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            d: Difficulty,
        }
        let w: Wrap = toml::from_str("d = \"medium\"").unwrap();
        assert_eq!(w.d, Difficulty::Medium);
    }
}
