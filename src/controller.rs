//! The state machine running a game: reveal, shuffle, guess, reset.
//!
//! [`GameController`] never waits. Everything that should happen later is a [`Wakeup`] handed to a [`Scheduler`], and
//! everything that should be shown is an [`Instruction`] queued into [`Replies`]. Whoever owns those two decides when
//! time passes and what gets drawn, which is what lets the same controller drive the terminal game, the simulator, and
//! the tests.

use std::time::Duration;

use rand::Rng;

use crate::{
    game::{Difficulty, DifficultyProfile, GameState, ShuffleStep, Slot},
    message::{Instruction, Replies, Status},
    timing::{Scheduler, Wakeup, WakeupKind},
};

/// Where in a game the controller currently is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    /// No game running; waiting for a start.
    #[default]
    Idle,
    /// The ball is visible; waiting for [`WakeupKind::EndReveal`].
    Revealing,
    /// Swapping cups. `done` steps have happened so far.
    Shuffling { done: u32 },
    /// Shuffle's over, waiting for the player to pick a cup.
    AwaitingGuess,
    /// The guess is being shown; waiting for [`WakeupKind::Reset`].
    Resolving,
}

/// The fixed pauses around a shuffle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timings {
    /// How long the ball stays visible before shuffling starts.
    pub reveal: Duration,
    /// How long a guess's result stays up before the replay prompt.
    pub reset: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(1500),
            reset: Duration::from_millis(2000),
        }
    }
}

/// Runs the shell game.
///
/// `R` is the source of randomness for both the ball's starting slot and the shuffle; pass a seeded one to get
/// reproducible games.
pub struct GameController<R: Rng> {
    state: GameState,
    phase: Phase,
    cups: usize,
    epoch: u64,
    /// Captured by `start_game`, so changing difficulty mid-game only affects the next one.
    profile: DifficultyProfile,
    timings: Timings,
    rng: R,
}

impl<R: Rng> GameController<R> {
    /// Create an idle controller for `cups` cups.
    ///
    /// Panics if `cups < 2`; validate configuration before getting here.
    pub fn new(cups: usize, difficulty: Difficulty, rng: R) -> Self {
        assert!(cups >= 2, "a shell game needs at least two cups, got {}", cups);
        Self {
            state: GameState {
                difficulty,
                ..Default::default()
            },
            phase: Phase::Idle,
            cups,
            epoch: 0,
            profile: difficulty.profile(),
            timings: Timings::default(),
            rng,
        }
    }

    /// Replace the reveal and reset pauses.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cups(&self) -> usize {
        self.cups
    }

    /// Which game this is. Goes up by one every time a game actually starts.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The profile the current (or most recent) game is using.
    pub fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    fn wakeup(&self, kind: WakeupKind) -> Wakeup {
        Wakeup {
            epoch: self.epoch,
            kind,
        }
    }

    /// Start a new game, unless one is already being played.
    ///
    /// While the result of the last guess is still up, this is allowed; the pending reset from that game is made stale.
    pub fn start_game(&mut self, sched: &mut impl Scheduler, replies: &mut Replies) {
        if self.state.is_playing {
            tracing::trace!(epoch = self.epoch, "start ignored, game in progress");
            return;
        }
        self.epoch += 1;
        self.profile = self.state.difficulty.profile();
        self.state.is_playing = true;
        let secret = self.rng.gen_range(0..self.cups);
        self.state.secret_slot = Some(secret);
        self.phase = Phase::Revealing;
        tracing::debug!(
            epoch = self.epoch,
            secret,
            difficulty = %self.state.difficulty,
            "game started"
        );

        replies.queue_all([
            Instruction::Unreveal,
            Instruction::HideBall,
            Instruction::StartEnabled(false),
            Instruction::ShowBall(secret),
            Instruction::Status(Status::WatchCarefully),
        ]);
        sched.after(self.timings.reveal, self.wakeup(WakeupKind::EndReveal));
    }

    /// Handle a wakeup that was handed to the [`Scheduler`] earlier.
    ///
    /// Wakeups from an older game, or ones that don't fit the current phase, are dropped.
    pub fn advance(&mut self, wakeup: Wakeup, sched: &mut impl Scheduler, replies: &mut Replies) {
        if wakeup.epoch != self.epoch {
            tracing::trace!(?wakeup, current = self.epoch, "dropping stale wakeup");
            return;
        }
        match (wakeup.kind, self.phase) {
            (WakeupKind::EndReveal, Phase::Revealing) => {
                tracing::debug!(epoch = self.epoch, "reveal over, shuffling");
                replies.queue_all([
                    Instruction::HideBall,
                    Instruction::Status(Status::Shuffling),
                ]);
                self.phase = Phase::Shuffling { done: 0 };
                if self.profile.shuffle_count == 0 {
                    self.finish_shuffle(replies);
                } else {
                    sched.after(
                        self.profile.step_duration,
                        self.wakeup(WakeupKind::ShuffleStep),
                    );
                }
            }
            (WakeupKind::ShuffleStep, Phase::Shuffling { done }) => {
                self.shuffle_step(replies);
                let done = done + 1;
                if done < self.profile.shuffle_count {
                    self.phase = Phase::Shuffling { done };
                    sched.after(
                        self.profile.step_duration,
                        self.wakeup(WakeupKind::ShuffleStep),
                    );
                } else {
                    self.finish_shuffle(replies);
                }
            }
            (WakeupKind::Reset, Phase::Resolving) => {
                tracing::debug!(epoch = self.epoch, "back to idle");
                replies.queue_all([
                    Instruction::Unreveal,
                    Instruction::HideBall,
                    Instruction::Status(Status::ReplayPrompt),
                ]);
                self.phase = Phase::Idle;
            }
            (kind, phase) => {
                tracing::trace!(?kind, ?phase, "wakeup doesn't fit phase, ignoring");
            }
        }
    }

    fn shuffle_step(&mut self, replies: &mut Replies) {
        let step = ShuffleStep::random(&mut self.rng, self.cups);
        // only `None` if something's gone badly wrong elsewhere, in which case there's nothing to track
        self.state.secret_slot = self.state.secret_slot.map(|s| step.apply(s));
        tracing::debug!(
            a = step.a,
            b = step.b,
            secret = ?self.state.secret_slot,
            "swap"
        );
        replies.queue(Instruction::Swap {
            a: step.a,
            b: step.b,
            duration: self.profile.step_duration,
        });
    }

    fn finish_shuffle(&mut self, replies: &mut Replies) {
        tracing::debug!(epoch = self.epoch, "shuffle done, awaiting guess");
        replies.queue_all([
            Instruction::Status(Status::ClickACup),
            Instruction::StartEnabled(true),
        ]);
        self.phase = Phase::AwaitingGuess;
    }

    /// The player picked the cup at `slot`.
    ///
    /// Ignored unless the controller is waiting for a guess and `slot` is actually one of the cups.
    pub fn handle_selection(&mut self, slot: Slot, sched: &mut impl Scheduler, replies: &mut Replies) {
        if self.phase != Phase::AwaitingGuess || !self.state.is_playing || slot >= self.cups {
            tracing::trace!(slot, phase = ?self.phase, "selection ignored");
            return;
        }
        let Some(secret) = self.state.secret_slot else {
            return;
        };
        self.state.is_playing = false;
        replies.queue_all([Instruction::RevealAll, Instruction::ShowBall(secret)]);
        if slot == secret {
            self.state.score += 1;
            tracing::info!(slot, score = self.state.score, "correct guess");
            replies.queue_all([
                Instruction::Score(self.state.score),
                Instruction::Status(Status::Correct),
            ]);
        } else {
            tracing::info!(slot, secret, score = self.state.score, "wrong guess");
            replies.queue(Instruction::Status(Status::Wrong));
        }
        self.phase = Phase::Resolving;
        sched.after(self.timings.reset, self.wakeup(WakeupKind::Reset));
    }

    /// Change the difficulty. Takes effect at the next [`Self::start_game`].
    pub fn set_difficulty(&mut self, difficulty: Difficulty, replies: &mut Replies) {
        tracing::debug!(%difficulty, "difficulty set");
        self.state.difficulty = difficulty;
        replies.queue(Instruction::Difficulty(difficulty));
    }
}
