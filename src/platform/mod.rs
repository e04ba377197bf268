//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Resize debounce timers
//! - Canvas 2D drawing, visibility and reduced-motion detection (web)

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;

/// Handle for a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Handle for an armed resize-settle timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Host scheduling primitives.
///
/// Requests return None when the host refuses; cancelling a stale handle is a no-op.
pub trait Scheduler {
    /// Ask for the frame callback to run before the next repaint
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Arm the resize-settle callback after `delay_ms` of quiet
    fn arm_resize_timer(&mut self, delay_ms: u32) -> Option<TimerHandle>;

    fn disarm_resize_timer(&mut self, handle: TimerHandle);
}
