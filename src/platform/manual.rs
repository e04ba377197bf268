//! Deterministic scheduler driven by the caller
//!
//! Used by the native headless driver and by tests: nothing fires on its
//! own, the caller takes pending frames and timers explicitly.

use std::collections::BTreeMap;

use super::{FrameHandle, Scheduler, TimerHandle};

#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    frames: Vec<FrameHandle>,
    /// Armed timers with their delay
    timers: BTreeMap<i32, u32>,
    /// Total frames ever requested
    pub frames_requested: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Frames requested and not yet taken or cancelled
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Pop the oldest pending frame, as the host would when it fires it
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Delay of the armed timer, if any
    pub fn armed_delay(&self) -> Option<u32> {
        self.timers.values().next().copied()
    }

    /// Pop the oldest armed timer, as the host would when it fires it
    pub fn take_timer(&mut self) -> Option<TimerHandle> {
        self.timers.pop_first().map(|(id, _)| TimerHandle(id))
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.allocate());
        self.frames.push(handle);
        self.frames_requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn arm_resize_timer(&mut self, delay_ms: u32) -> Option<TimerHandle> {
        let id = self.allocate();
        self.timers.insert(id, delay_ms);
        Some(TimerHandle(id))
    }

    fn disarm_resize_timer(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle.0);
    }
}
