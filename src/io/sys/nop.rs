use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::io::{Action, IoRunner, IoSystem, Screen, XY};

/// An IO system which never gets input and throws away everything drawn to it. Used for headless runs.
pub struct NopSystem(NopRunner);

impl NopSystem {
    pub fn new() -> crate::Result<(Self, NopRunner)> {
        let run = NopRunner::new();
        Ok((Self(run.clone()), run))
    }
}

impl IoSystem for NopSystem {
    fn draw(&mut self, _screen: &Screen) -> crate::Result<()> {
        Ok(())
    }
    fn poll_input(&mut self) -> crate::Result<Option<Action>> {
        Ok(None)
    }
    fn size(&self) -> XY {
        XY(80, 24)
    }
    fn stop(&mut self) {
        self.0.stop()
    }
}

/// An implementation of [`IoRunner`] that doesn't actually do anything except wait for `.stop` to be called.
#[derive(Clone)]
pub struct NopRunner(Arc<AtomicBool>);

impl NopRunner {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Tell the [`NopRunner`] to stop.
    pub fn stop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

impl IoRunner for NopRunner {
    fn step(&mut self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
