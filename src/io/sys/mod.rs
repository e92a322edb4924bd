//! Input/output backends. Each one is controlled by a feature named similarly and exports a type implementing
//! [`IoSystem`], plus its paired [`IoRunner`].

use crate::{
    io::{Action, Screen, XY},
    Result,
};

#[cfg(feature = "sys_cli")]
pub mod ansi_cli;
#[cfg(feature = "sys_nop")]
pub mod nop;

/// An input/output system.
///
/// This object is meant to be associated with a [`IoRunner`], which does whatever needs to happen on the main thread
/// while this is called from the game loop.
pub trait IoSystem {
    /// Actually render a [`Screen`] to the display.
    ///
    /// This must be able to handle `Screen`s of the wrong size, e.g. right after a resize.
    fn draw(&mut self, screen: &Screen) -> Result<()>;
    /// Get the size of the display, in characters.
    fn size(&self) -> XY;

    /// If the next user input is available, return it. Otherwise, return `None`. Never blocks.
    fn poll_input(&mut self) -> Result<Option<Action>>;

    /// Tells the associated [`IoRunner`] to stop, and tell the [`IoSystem`] to dispose of any resources it's handling.
    ///
    /// This will always be the last method called on this object (unless you count `Drop::drop`).
    fn stop(&mut self);
}

/// The other half of an [`IoSystem`].
pub trait IoRunner {
    /// Execute one 'step', which should be quick and must be non-blocking. Returns whether an exit has been requested
    /// (i.e. by [`IoSystem::stop`]) since the last time `step` was called.
    #[must_use]
    fn step(&mut self) -> bool;
}

/// Based on IO system features enabled, attempt to initialize an IO system; in order:
///
/// - crossterm CLI (`sys_cli`)
/// - NOP (`sys_nop`), for headless runs
///
/// If none succeed, the error lists why each one failed.
#[cfg(feature = "__sys")]
pub fn load() -> Result<(Box<dyn IoSystem>, Box<dyn IoRunner>)> {
    #[allow(unused_mut)]
    let mut errors: Vec<(&'static str, crate::Error)> = vec![];
    macro_rules! try_init {
        ( $name:literal: $( $init:tt )* ) => {
            match { $($init)* } {
                Ok((iosys, run)) => {
                    tracing::debug!(backend = $name, "loaded IO system");
                    return Ok((Box::new(iosys), Box::new(run)));
                }
                Err(e) => errors.push(($name, e)),
            }
        }
    }
    #[cfg(feature = "sys_cli")]
    {
        try_init! { "sys_cli": ansi_cli::CtSystem::new() }
    }
    #[cfg(feature = "sys_nop")]
    {
        try_init! { "sys_nop": nop::NopSystem::new() }
    }
    Err(crate::Error::NoIoSystem(errors))
}
