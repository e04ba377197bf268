//! Page embellishments around the canvas
//!
//! Scroll parallax for the hero block, the pointer-driven orbit of the hero
//! sub-nodes, staggered card reveals and the hero stat counters. The math
//! lives here; the browser wiring is in the wasm entry point.

use std::f32::consts::TAU;

use glam::Vec2;

/// Hero content drift per scrolled pixel
pub const PARALLAX_CONTENT_FACTOR: f32 = 0.3;
/// Hero visual drift per scrolled pixel
pub const PARALLAX_VISUAL_FACTOR: f32 = 0.2;
/// Sub-node distance from the main node
pub const ORBIT_RADIUS: f32 = 120.0;
/// Fraction of the pointer offset applied to the orbit
pub const ORBIT_POINTER_FACTOR: f32 = 0.02;
/// Reveal delay between consecutive skill cards
pub const STAGGER_STEP_MS: u32 = 100;
/// Reveal delay between consecutive project cards
pub const PROJECT_STAGGER_MS: u32 = 150;
/// Typing delay between consecutive terminal lines
pub const TERMINAL_STAGGER_MS: u32 = 300;
/// Hidden cards sit this far below their final position
pub const REVEAL_OFFSET_PX: f32 = 30.0;
pub const REVEAL_TRANSITION: &str = "all 0.6s ease-out";
/// Stat counters reach their target after this long
pub const COUNTER_DURATION_MS: f64 = 2000.0;
/// Nominal frame length the counter increment is derived from
pub const COUNTER_FRAME_MS: f64 = 16.0;

/// Vertical translations for the hero block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxOffsets {
    pub content: f32,
    pub visual: f32,
}

pub fn parallax_offsets(scroll_y: f32) -> ParallaxOffsets {
    ParallaxOffsets {
        content: scroll_y * PARALLAX_CONTENT_FACTOR,
        visual: scroll_y * PARALLAX_VISUAL_FACTOR,
    }
}

/// Allows at most one parallax frame to be pending per burst of scroll events
#[derive(Debug, Default)]
pub struct ScrollThrottle {
    pending: bool,
}

impl ScrollThrottle {
    /// True if the caller should request a frame now
    pub fn request(&mut self) -> bool {
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// The pending frame ran
    pub fn complete(&mut self) {
        self.pending = false;
    }
}

/// Offsets of `count` sub-nodes evenly spaced around the main node, nudged toward the pointer
pub fn orbit_offsets(count: usize, pointer_delta: Vec2) -> Vec<Vec2> {
    let nudge = pointer_delta * ORBIT_POINTER_FACTOR;
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            Vec2::new(angle.cos(), angle.sin()) * ORBIT_RADIUS + nudge
        })
        .collect()
}

/// Reveal delay for the element at `index` of a staggered group
#[inline]
pub fn stagger_delay_ms(index: usize, step_ms: u32) -> u32 {
    (index as u32).saturating_mul(step_ms)
}

/// Inline style of a staggered card before and after its reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    Shown,
}

impl RevealPhase {
    pub fn opacity(self) -> &'static str {
        match self {
            RevealPhase::Hidden => "0",
            RevealPhase::Shown => "1",
        }
    }

    pub fn transform(self) -> String {
        let offset = match self {
            RevealPhase::Hidden => REVEAL_OFFSET_PX,
            RevealPhase::Shown => 0.0,
        };
        format!("translateY({}px)", offset)
    }

    /// Hidden is applied instantly; only the reveal animates
    pub fn transition(self) -> Option<&'static str> {
        match self {
            RevealPhase::Hidden => None,
            RevealPhase::Shown => Some(REVEAL_TRANSITION),
        }
    }
}

/// What a stat counter shows after one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterFrame {
    /// Floored intermediate value; keep stepping
    Running(f64),
    /// Exact target; the animation is over
    Finished(f64),
}

impl CounterFrame {
    pub fn value(self) -> f64 {
        match self {
            CounterFrame::Running(v) | CounterFrame::Finished(v) => v,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, CounterFrame::Finished(_))
    }
}

/// Count-up from zero to a target in fixed per-frame increments
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: f64, duration_ms: f64) -> Self {
        Self {
            target,
            increment: target / (duration_ms / COUNTER_FRAME_MS),
            current: 0.0,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Advance one frame. Once the target is reached every further step
    /// reports `Finished(target)`.
    pub fn step(&mut self) -> CounterFrame {
        if self.current >= self.target {
            return CounterFrame::Finished(self.target);
        }
        self.current += self.increment;
        if self.current < self.target {
            CounterFrame::Running(self.current.floor())
        } else {
            self.current = self.target;
            CounterFrame::Finished(self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax() {
        let offsets = parallax_offsets(100.0);
        assert!((offsets.content - 30.0).abs() < 1e-4);
        assert!((offsets.visual - 20.0).abs() < 1e-4);
        assert_eq!(parallax_offsets(0.0), ParallaxOffsets { content: 0.0, visual: 0.0 });
    }

    #[test]
    fn test_scroll_throttle() {
        let mut throttle = ScrollThrottle::default();
        assert!(throttle.request());
        assert!(!throttle.request());
        assert!(!throttle.request());
        throttle.complete();
        assert!(throttle.request());
    }

    #[test]
    fn test_orbit_layout() {
        let offsets = orbit_offsets(4, Vec2::ZERO);
        assert_eq!(offsets.len(), 4);
        assert!((offsets[0] - Vec2::new(120.0, 0.0)).length() < 1e-3);
        assert!((offsets[1] - Vec2::new(0.0, 120.0)).length() < 1e-3);
        assert!((offsets[2] - Vec2::new(-120.0, 0.0)).length() < 1e-3);

        let nudged = orbit_offsets(4, Vec2::new(100.0, -50.0));
        assert!((nudged[0] - Vec2::new(122.0, -1.0)).length() < 1e-3);
        assert!(orbit_offsets(0, Vec2::ONE).is_empty());
    }

    #[test]
    fn test_stagger() {
        assert_eq!(stagger_delay_ms(0, STAGGER_STEP_MS), 0);
        assert_eq!(stagger_delay_ms(3, STAGGER_STEP_MS), 300);
        assert_eq!(stagger_delay_ms(2, PROJECT_STAGGER_MS), 300);
        assert_eq!(stagger_delay_ms(2, TERMINAL_STAGGER_MS), 600);
    }

    #[test]
    fn test_reveal_phases() {
        assert_eq!(RevealPhase::Hidden.opacity(), "0");
        assert_eq!(RevealPhase::Hidden.transform(), "translateY(30px)");
        assert_eq!(RevealPhase::Hidden.transition(), None);

        assert_eq!(RevealPhase::Shown.opacity(), "1");
        assert_eq!(RevealPhase::Shown.transform(), "translateY(0px)");
        assert_eq!(RevealPhase::Shown.transition(), Some("all 0.6s ease-out"));
    }

    #[test]
    fn test_counter_counts_up_to_exact_target() {
        let mut counter = CounterAnimation::new(100.0, COUNTER_DURATION_MS);
        // 100 / (2000 / 16)
        assert!((counter.increment() - 0.8).abs() < 1e-12);

        let mut shown = Vec::new();
        let last = loop {
            match counter.step() {
                CounterFrame::Running(v) => shown.push(v),
                finished => break finished,
            }
            assert!(shown.len() < 1000, "counter never finished");
        };

        assert_eq!(last, CounterFrame::Finished(100.0));
        // About 2000 ms of 16 ms frames
        assert!((124..=126).contains(&shown.len()), "{} frames", shown.len());
        assert_eq!(&shown[..3], &[0.0, 1.0, 2.0]);
        assert!(shown.iter().all(|v| v.fract() == 0.0 && *v < 100.0));
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));

        // Stays finished
        assert_eq!(counter.step(), CounterFrame::Finished(100.0));
    }

    #[test]
    fn test_counter_keeps_fractional_target() {
        let mut counter = CounterAnimation::new(99.5, COUNTER_DURATION_MS);
        let mut frame = counter.step();
        while !frame.is_finished() {
            assert_eq!(frame.value().fract(), 0.0);
            frame = counter.step();
        }
        assert_eq!(frame.value(), 99.5);
    }

    #[test]
    fn test_counter_non_positive_target_finishes_immediately() {
        assert_eq!(
            CounterAnimation::new(0.0, COUNTER_DURATION_MS).step(),
            CounterFrame::Finished(0.0)
        );
        assert_eq!(
            CounterAnimation::new(-40.0, COUNTER_DURATION_MS).step(),
            CounterFrame::Finished(-40.0)
        );
    }
}
