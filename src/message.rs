//! Instructions are how the controller tells the outside world what to show. Replies are how they're queued.

use std::{fmt, time::Duration};

use crate::game::{Difficulty, Slot};

/// The status line shown to the player.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    /// Shown before the first game.
    Welcome,
    WatchCarefully,
    Shuffling,
    ClickACup,
    Correct,
    Wrong,
    ReplayPrompt,
}

impl Status {
    pub const fn text(self) -> &'static str {
        match self {
            Status::Welcome => "Press S to start!",
            Status::WatchCarefully => "Watch carefully...",
            Status::Shuffling => "Shuffling...",
            Status::ClickACup => "Where is the ball? Pick a cup!",
            Status::Correct => "Correct! You found it!",
            Status::Wrong => "Wrong! Try again!",
            Status::ReplayPrompt => "Press S to play again!",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Something the [`GameController`](crate::GameController) wants shown, in the order it wants it shown.
///
/// Slots are positions, not cups: `ShowBall(1)` means "under whichever cup is in the middle right now".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    /// Show the ball under the cup at this slot.
    ShowBall(Slot),
    /// Hide the ball again.
    HideBall,
    /// Lift every cup.
    RevealAll,
    /// Put every cup back down.
    Unreveal,
    /// Change the status line.
    Status(Status),
    /// The score changed to this.
    Score(u32),
    /// Whether starting a new game is currently possible.
    StartEnabled(bool),
    /// The selected difficulty changed.
    Difficulty(Difficulty),
    /// Swap the cups in two slots, animated over `duration`.
    Swap { a: Slot, b: Slot, duration: Duration },
}

/// Lets the [`GameController`](crate::GameController) make things happen in response to wakeups or input.
///
/// Remember that none of these will be acted on immediately -- only once whoever owns the `Replies` drains them.
#[derive(Default)]
pub struct Replies {
    instructions: Vec<Instruction>,
}

impl fmt::Debug for Replies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replies")
            .field("instructions", &self.instructions.len())
            .finish()
    }
}

impl Replies {
    /// Queues up an instruction.
    pub fn queue(&mut self, inst: Instruction) -> &mut Self {
        self.instructions.push(inst);
        self
    }

    /// [`Self::queue`]s up several instructions, in order.
    pub fn queue_all(&mut self, insts: impl IntoIterator<Item = Instruction>) -> &mut Self {
        self.instructions.extend(insts);
        self
    }

    /// Everything queued so far, oldest first, without removing it.
    pub fn pending(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Take every queued instruction, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Instruction> {
        self.instructions.drain(..)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replies_keep_order() {
        let mut r = Replies::default();
        r.queue(Instruction::HideBall)
            .queue_all([Instruction::Score(1), Instruction::RevealAll]);
        assert_eq!(
            r.pending(),
            &[
                Instruction::HideBall,
                Instruction::Score(1),
                Instruction::RevealAll
            ]
        );
        let drained: Vec<_> = r.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(r.is_empty());
    }

    #[test]
    fn status_texts() {
        assert_eq!(Status::WatchCarefully.to_string(), "Watch carefully...");
        assert_eq!(Status::Correct.text(), "Correct! You found it!");
        assert_eq!(Status::Wrong.text(), "Wrong! Try again!");
    }
}
