//! shellgame is the classic shell game in a terminal: a ball goes under one of a row of cups, the cups get swapped
//! around, and you pick the one you think the ball ended up under.
//!
//! # Feature selection
//!
//! The IO system handles platform input and output. Pick at least one:
//!
//! -   `sys_cli` (default): Render to a real terminal, using `crossterm`.
//! -   `sys_nop`: Discard all output and never get input. Mostly good for smoke tests.
//!
//! [`io::sys::load`] tries them in that order.
//!
//! # Architecture
//!
//! The game itself is the [`GameController`], an explicit state machine that never blocks. It talks to the rest of
//! the world in exactly two ways:
//!
//! - Anything that should happen later becomes a [`Wakeup`] given to a [`Scheduler`]. When it's due, whoever owns the
//!   scheduler hands it back through [`GameController::advance`]. Each wakeup remembers which game scheduled it, so
//!   timers left over from an earlier game are harmlessly dropped.
//! - Anything that should be *shown* becomes an [`Instruction`] queued into [`Replies`]. Instructions talk about
//!   *slots*, positions in the row, never about particular cups.
//!
//! The terminal [`ShellView`] reads instructions and draws them, keeping track of which cup is where in a [`CupRow`],
//! and turns keypresses and clicks into [`Command`]s. The [`Runner`] glues all of it to an [`IoSystem`](io::IoSystem).
//!
//! Because time only passes when someone pops a wakeup, tests and the `shellgame-sim` binary can play whole games
//! instantly by driving a [`TimerQueue`] by hand.

mod config;
mod controller;
mod cups;
mod error;
mod game;
pub mod io;
mod message;
mod runner;
mod timing;
mod view;

pub use {
    config::{Config, ConfigArgs, MAX_CUPS},
    controller::{GameController, Phase, Timings},
    cups::{Animator, CupRow},
    error::{Error, Result},
    game::{Difficulty, DifficultyProfile, GameState, ShuffleStep, Slot, DEFAULT_CUPS},
    message::{Instruction, Replies, Status},
    runner::Runner,
    timing::{Scheduler, Timer, TimerQueue, Wakeup, WakeupKind},
    view::{Command, Response, ShellView},
};
