//! Owner of the active session and everything that touches it.
//!
//! The bridge loads ROMs into the emulation core, holds the resulting
//! session, and lends it to the run loop on each tick and to the input
//! bridge on each key event. Nothing else can reach the session.

use log::{error, info, warn};

use crate::config::Config;
use crate::core::{EmulationCore, Session};
use crate::display::{Canvas, Display};
use crate::error::{Error, Result};
use crate::input::{Command, InputBridge};
use crate::run_loop::{RunLoop, RunState, Scheduler};

pub struct Bridge<E, S, C>
where
    E: EmulationCore,
    S: Scheduler,
    C: Canvas,
{
    core: E,
    session: Option<Box<dyn Session>>,
    run_loop: RunLoop<S>,
    display: Display<C>,
    input: InputBridge,
    fault: Option<String>,
}

impl<E, S, C> Bridge<E, S, C>
where
    E: EmulationCore,
    S: Scheduler,
    C: Canvas,
{
    /// `config` is expected to have passed [`Config::validate`].
    pub fn new(core: E, scheduler: S, canvas: C, config: &Config) -> Self {
        Self {
            core,
            session: None,
            run_loop: RunLoop::new(scheduler),
            display: Display::new(canvas, config.scale, config.overscan),
            input: config.input_bridge(),
            fault: None,
        }
    }

    /// Hand a ROM image to the emulation core and start running it.
    ///
    /// On success the previous session is dropped, any recorded fault is
    /// cleared and the loop is running with exactly one pending callback,
    /// whatever state it was in before. If the core rejects the image,
    /// nothing changes: the previous session (if any) keeps its state.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let session = match self.core.create_session(rom) {
            Ok(session) => session,
            Err(err) => {
                warn!("ROM rejected ({} bytes): {err}", rom.len());
                return Err(err.into());
            }
        };

        if self.session.replace(session).is_some() {
            info!("replaced previous session");
        }
        self.fault = None;
        info!("loaded ROM ({} bytes)", rom.len());
        self.run_loop.restart().inspect_err(|err| self.halt(err))
    }

    pub fn play(&mut self) -> Result<()> {
        if self.session.is_none() {
            info!("play ignored: no ROM loaded");
            return Ok(());
        }
        if let Some(fault) = &self.fault {
            warn!("play ignored: halted after fault: {fault}");
            return Ok(());
        }
        self.run_loop.play().inspect_err(|err| self.halt(err))
    }

    pub fn pause(&mut self) {
        self.run_loop.pause();
    }

    /// Flip between running and stopped; returns the new state.
    pub fn toggle(&mut self) -> Result<RunState> {
        match self.run_loop.state() {
            RunState::Running => self.pause(),
            RunState::Stopped => self.play()?,
        }
        Ok(self.run_loop.state())
    }

    /// Advance one frame while stopped. Ignored while running.
    pub fn step(&mut self) -> Result<()> {
        if self.run_loop.is_running() {
            return Ok(());
        }
        if self.session.is_none() || self.fault.is_some() {
            info!("step ignored: no runnable session");
            return Ok(());
        }
        self.run_loop
            .step(self.session.as_deref_mut(), &mut self.display)
            .inspect_err(|err| self.halt(err))
    }

    /// Entry point for the scheduler's callback.
    pub fn on_frame(&mut self) -> Result<()> {
        self.run_loop
            .tick(self.session.as_deref_mut(), &mut self.display)
            .inspect_err(|err| {
                self.fault = Some(err.to_string());
            })
    }

    /// Host key-down. `repeat` marks host auto-repeat: buttons still get
    /// every press, control commands only fire on the first one.
    pub fn key_down(&mut self, code: &str, repeat: bool) -> Result<()> {
        match self.input.key_down(code, self.session.as_deref_mut()) {
            Some(_) if repeat => Ok(()),
            Some(Command::TogglePause) => self.toggle().map(|_| ()),
            Some(Command::StepFrame) => self.step(),
            None => Ok(()),
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code, self.session.as_deref_mut());
    }

    /// True if the key is bound to a button or a control.
    pub fn handles_key(&self, code: &str) -> bool {
        self.input.is_bound(code)
    }

    pub fn run_state(&self) -> RunState {
        self.run_loop.state()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Diagnostic of the fatal error that halted the loop, if any.
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.display.frames_presented()
    }

    pub fn display(&self) -> &Display<C> {
        &self.display
    }

    pub fn run_loop(&self) -> &RunLoop<S> {
        &self.run_loop
    }

    fn halt(&mut self, err: &Error) {
        error!("frame loop halted: {err}");
        self.run_loop.pause();
        self.fault = Some(err.to_string());
    }
}
