#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use nesbridge_core::prelude::*;

pub const ROM_SIZE: usize = 8 * 1024;

/// Build an 8 KB ROM that the fake core accepts. Every frame pulled from
/// it is filled with `color`.
pub fn rom_with_color(color: [u8; 3]) -> Vec<u8> {
    let mut rom = vec![0u8; ROM_SIZE];
    rom[..4].copy_from_slice(b"NES\x1A");
    rom[4..7].copy_from_slice(&color);
    rom
}

// =================================================================
// Fake emulation core
// =================================================================

#[derive(Default)]
pub struct CoreLog {
    pub created: u32,
    pub dropped: u32,
    pub frames_pulled: u32,
    /// (session id, button, pressed)
    pub edges: Vec<(u32, ButtonId, bool)>,
    /// Length of frames handed out by newly created sessions; `None` means
    /// the correct length.
    pub frame_len: Option<usize>,
}

#[derive(Clone, Default)]
pub struct FakeCore {
    pub log: Rc<RefCell<CoreLog>>,
}

impl FakeCore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmulationCore for FakeCore {
    fn create_session(&self, rom: &[u8]) -> std::result::Result<Box<dyn Session>, InvalidRom> {
        if rom.len() < 16 || &rom[..4] != b"NES\x1A" {
            return Err(InvalidRom("missing iNES header".into()));
        }
        let mut log = self.log.borrow_mut();
        log.created += 1;
        let len = log.frame_len.unwrap_or(nesbridge_core::core::FRAME_LEN);
        let color = [rom[4], rom[5], rom[6]];
        let frame = color.iter().copied().cycle().take(len).collect();
        Ok(Box::new(FakeSession {
            id: log.created,
            frame,
            log: Rc::clone(&self.log),
        }))
    }
}

pub struct FakeSession {
    id: u32,
    frame: Vec<u8>,
    log: Rc<RefCell<CoreLog>>,
}

impl Session for FakeSession {
    fn pull_frame(&mut self) -> FrameRef<'_> {
        self.log.borrow_mut().frames_pulled += 1;
        FrameRef::new(&self.frame)
    }

    fn set_button(&mut self, button: ButtonId, pressed: bool) {
        self.log.borrow_mut().edges.push((self.id, button, pressed));
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.log.borrow_mut().dropped += 1;
    }
}

// =================================================================
// Recording scheduler
// =================================================================

#[derive(Default)]
pub struct SchedulerLog {
    next: u32,
    pub scheduled: u32,
    pub cancelled: Vec<u32>,
    /// Tokens requested and neither cancelled nor fired yet.
    pub pending: Vec<u32>,
    pub fail: bool,
}

#[derive(Clone, Default)]
pub struct RecordingScheduler {
    pub log: Rc<RefCell<SchedulerLog>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<u32> {
        self.log.borrow().pending.clone()
    }
}

impl Scheduler for RecordingScheduler {
    type Token = u32;

    fn schedule(&mut self) -> Result<u32> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(Error::Schedule("refused by host".into()));
        }
        log.next += 1;
        log.scheduled += 1;
        let token = log.next;
        log.pending.push(token);
        Ok(token)
    }

    fn cancel(&mut self, token: u32) {
        let mut log = self.log.borrow_mut();
        log.cancelled.push(token);
        log.pending.retain(|&t| t != token);
    }
}

pub type TestBridge = Bridge<FakeCore, RecordingScheduler, MemoryCanvas>;

pub struct Harness {
    pub bridge: TestBridge,
    pub core: Rc<RefCell<CoreLog>>,
    pub scheduler: RecordingScheduler,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let core = FakeCore::new();
        let scheduler = RecordingScheduler::new();
        let log = Rc::clone(&core.log);
        let bridge = Bridge::new(core, scheduler.clone(), MemoryCanvas::new(), config);
        Self {
            bridge,
            core: log,
            scheduler,
        }
    }

    /// Simulate the host firing the single pending callback.
    pub fn fire(&mut self) -> Result<()> {
        {
            let mut log = self.scheduler.log.borrow_mut();
            assert_eq!(log.pending.len(), 1, "expected exactly one pending callback");
            log.pending.clear();
        }
        self.bridge.on_frame()
    }

    pub fn pending(&self) -> Vec<u32> {
        self.scheduler.pending()
    }
}
