//! Everything between the game and the player's terminal.
//!
//! There are two central parts. The first is [`Screen`], a grid of formatted characters you can freely draw to; the
//! formatting lives in [`fmt`]. The second is [`IoSystem`], which puts a `Screen` on the display and hands back raw
//! player [`Action`]s. Pick one with [`sys::load`] based on the enabled `sys_*` features.

mod action;
pub mod fmt;
mod screen;
pub mod sys;
mod xy;

pub use self::{
    action::{Action, Key, MouseButton},
    screen::Screen,
    sys::{IoRunner, IoSystem},
    xy::XY,
};
