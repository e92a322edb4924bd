//! Contains the "main loop" of the game.

use std::{thread, time::Duration};

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

use rand::Rng;

use crate::{
    controller::GameController,
    io::{Action, IoRunner, IoSystem, Screen},
    message::Replies,
    timing::{Timer, TimerQueue},
    view::{Command, Response, ShellView},
    Result,
};

/// The longest the loop will sleep between checks for input.
const MAX_IDLE: Duration = Duration::from_millis(2);

/// Handles running a [`GameController`] against a [`ShellView`] on some [`IoSystem`].
#[must_use]
pub struct Runner<R: Rng> {
    controller: GameController<R>,
    view: ShellView,
    timers: TimerQueue,
    replies: Replies,
    screen: Screen,
    tainted: bool,
    render_timer: Timer,
}

impl<R: Rng> Runner<R> {
    /// Prepare a game to be run. The view should have as many cups as the controller.
    pub fn new(controller: GameController<R>, view: ShellView) -> Self {
        Self {
            controller,
            view,
            timers: TimerQueue::new(),
            replies: Replies::default(),
            screen: Screen::new(Default::default()),
            tainted: true,
            // Render at most ~60fps
            render_timer: Timer::new(Duration::from_secs(1) / 60),
        }
    }

    /// Act on something the player asked for.
    fn command(&mut self, cmd: Command) -> Response {
        tracing::trace!(?cmd, "command");
        let c = &mut self.controller;
        match cmd {
            Command::Start => c.start_game(&mut self.timers, &mut self.replies),
            Command::Select(slot) => c.handle_selection(slot, &mut self.timers, &mut self.replies),
            Command::Difficulty(d) => c.set_difficulty(d, &mut self.replies),
            Command::Quit => return Response::Quit,
        }
        Response::Nothing
    }

    /// Run every wakeup that's come due.
    fn fire_due(&mut self) {
        while let Some(wakeup) = self.timers.pop_due(Instant::now()) {
            self.controller
                .advance(wakeup, &mut self.timers, &mut self.replies);
        }
    }

    /// Hand every queued instruction to the view.
    fn feed(&mut self) {
        for inst in self.replies.drain() {
            if self.view.message(&inst) == Response::Redraw {
                self.tainted = true;
            }
        }
    }

    /// Handle all pending input. Returns whether a stop was requested.
    fn io(&mut self, iosys: &mut dyn IoSystem) -> Result<bool> {
        while let Some(action) = iosys.poll_input()? {
            match action {
                Action::Closed => return Ok(true),
                Action::Redraw => self.tainted = true,
                Action::Error(e) => return Err(e.into()),
                other => {
                    let Some(cmd) = self.view.input(other) else {
                        continue;
                    };
                    if self.command(cmd) == Response::Quit {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Render to the screen.
    ///
    /// This will automatically only render if:
    ///
    /// - The screen contents have been tainted, or cups are mid-swap
    /// - It's been long enough since the last redraw
    fn render(&mut self, iosys: &mut dyn IoSystem) -> Result<()> {
        let new_size = iosys.size();
        if self.tainted || self.view.is_animating() || new_size != self.screen.size() {
            if !self.render_timer.tick_ready() {
                // avoid wasting too much time rendering
                return Ok(());
            }
            self.screen.resize(new_size);
            self.view.render(&mut self.screen);
            iosys.draw(&self.screen)?;
            self.tainted = false;
        }
        Ok(())
    }

    fn run_loop(&mut self, iosys: &mut dyn IoSystem, iorun: &mut dyn IoRunner) -> Result<()> {
        loop {
            self.render(iosys)?;
            if iorun.step() {
                return Ok(());
            }
            if self.io(iosys)? {
                return Ok(());
            }
            self.fire_due();
            self.feed();
            thread::sleep(self.timers.until_next().unwrap_or(MAX_IDLE).min(MAX_IDLE));
        }
    }

    /// Start the game running.
    ///
    /// Only exits when the player quits or the IO system fails; either way, the IO system is stopped first. Returns
    /// the [`GameController`], primarily for testing purposes.
    pub fn run(
        mut self,
        iosys: &mut dyn IoSystem,
        iorun: &mut dyn IoRunner,
    ) -> Result<GameController<R>> {
        tracing::info!(cups = self.controller.cups(), "starting game loop");
        let res = self.run_loop(iosys, iorun);
        iosys.stop();
        match res {
            Ok(()) => {
                tracing::info!(score = self.controller.state().score, "quit");
                Ok(self.controller)
            }
            Err(e) => {
                tracing::error!(error = %e, "game loop failed");
                Err(e)
            }
        }
    }
}
