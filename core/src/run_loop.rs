//! Play/pause state machine around a one-shot "before next repaint" scheduler.
//!
//! The controller keeps a single slot for the pending callback: idle or armed
//! with exactly one token. A second token can never be outstanding, whatever
//! order play, pause and ticks arrive in.

use std::fmt::Debug;

use log::{debug, error};

use crate::core::Session;
use crate::display::{Canvas, Display};
use crate::error::{ContractViolation, Result};

/// Host primitive that runs a callback at most once before the next repaint.
///
/// In a browser this is `requestAnimationFrame` / `cancelAnimationFrame`.
pub trait Scheduler {
    type Token: Copy + Eq + Debug;

    /// Request one callback; the returned token can cancel it.
    fn schedule(&mut self) -> Result<Self::Token>;

    /// Cancel a pending callback. Cancelling a token that already fired is
    /// harmless.
    fn cancel(&mut self, token: Self::Token);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot<T> {
    Idle,
    Armed(T),
}

pub struct RunLoop<S: Scheduler> {
    scheduler: S,
    slot: Slot<S::Token>,
}

impl<S: Scheduler> RunLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            slot: Slot::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        match self.slot {
            Slot::Idle => RunState::Stopped,
            Slot::Armed(_) => RunState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Token of the callback currently waiting to fire, if any.
    pub fn pending_token(&self) -> Option<S::Token> {
        match self.slot {
            Slot::Armed(token) => Some(token),
            Slot::Idle => None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start ticking. No-op while already running.
    pub fn play(&mut self) -> Result<()> {
        if self.slot != Slot::Idle {
            return Ok(());
        }
        self.arm()?;
        debug!("run loop: running");
        Ok(())
    }

    /// Stop ticking. Only the next tick is affected; no-op while stopped.
    pub fn pause(&mut self) {
        let Slot::Armed(token) = self.slot else {
            return;
        };
        self.scheduler.cancel(token);
        self.slot = Slot::Idle;
        debug!("run loop: stopped");
    }

    /// Drop any pending callback and arm a fresh one, ending up running with
    /// exactly one token.
    pub fn restart(&mut self) -> Result<()> {
        if let Slot::Armed(token) = self.slot {
            self.scheduler.cancel(token);
        }
        self.slot = Slot::Idle;
        self.arm()
    }

    /// Body of the scheduled callback.
    ///
    /// Consumes the fired token, pulls one frame, decodes and presents it,
    /// and only then arms the next token. A callback that fires while nothing
    /// is armed (cancelled or stale) does nothing. Any error halts the loop.
    pub fn tick<C, T>(&mut self, session: Option<&mut T>, display: &mut Display<C>) -> Result<()>
    where
        C: Canvas,
        T: Session + ?Sized,
    {
        if !matches!(self.slot, Slot::Armed(_)) {
            debug!("run loop: ignoring callback with no armed token");
            return Ok(());
        }
        self.slot = Slot::Idle;

        let result = Self::render(session, display).and_then(|()| self.arm());
        if let Err(err) = &result {
            error!("run loop halted: {err}");
        }
        result
    }

    /// Run one frame without touching the schedule.
    pub fn step<C, T>(&mut self, session: Option<&mut T>, display: &mut Display<C>) -> Result<()>
    where
        C: Canvas,
        T: Session + ?Sized,
    {
        Self::render(session, display)
    }

    fn render<C, T>(session: Option<&mut T>, display: &mut Display<C>) -> Result<()>
    where
        C: Canvas,
        T: Session + ?Sized,
    {
        let session = session.ok_or(ContractViolation::TickWithoutSession)?;
        display.show(session.pull_frame())
    }

    fn arm(&mut self) -> Result<()> {
        let token = self.scheduler.schedule()?;
        self.slot = Slot::Armed(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        next: u32,
        cancelled: Vec<u32>,
    }

    impl Scheduler for Counter {
        type Token = u32;

        fn schedule(&mut self) -> Result<u32> {
            self.next += 1;
            Ok(self.next)
        }

        fn cancel(&mut self, token: u32) {
            self.cancelled.push(token);
        }
    }

    #[test]
    fn test_play_pause_idempotent() {
        let mut run_loop = RunLoop::new(Counter::default());
        assert_eq!(run_loop.state(), RunState::Stopped);

        run_loop.play().unwrap();
        run_loop.play().unwrap();
        assert_eq!(run_loop.pending_token(), Some(1));
        assert_eq!(run_loop.scheduler().next, 1);

        run_loop.pause();
        run_loop.pause();
        assert_eq!(run_loop.state(), RunState::Stopped);
        assert_eq!(run_loop.scheduler().cancelled, vec![1]);
    }

    #[test]
    fn test_restart_replaces_token() {
        let mut run_loop = RunLoop::new(Counter::default());
        run_loop.play().unwrap();
        run_loop.restart().unwrap();
        assert_eq!(run_loop.pending_token(), Some(2));
        assert_eq!(run_loop.scheduler().cancelled, vec![1]);

        run_loop.pause();
        run_loop.restart().unwrap();
        assert_eq!(run_loop.pending_token(), Some(3));
        assert_eq!(run_loop.scheduler().cancelled, vec![1, 2]);
    }
}
