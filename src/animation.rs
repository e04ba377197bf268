//! Frame loop and lifecycle gate
//!
//! `AnimationSystem` owns every piece of mutable animation state. The host
//! calls in on frame callbacks, spawn intervals, visibility changes and
//! resizes; the system decides whether another frame is scheduled.
//! At most one frame request is outstanding at any time.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Viewport;
use crate::platform::{FrameHandle, Scheduler, TimerHandle};
use crate::renderer::{Surface, draw_frame, draw_links, draw_node, draw_particle};
use crate::settings::{PARTICLE_LIMIT, Settings};
use crate::sim::{Node, Particle, create_nodes, population};

/// Whether a frame chain is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame requested
    Stopped,
    /// Exactly one frame requested, with its handle
    Running(FrameHandle),
}

pub struct AnimationSystem {
    settings: Settings,
    viewport: Viewport,
    nodes: Vec<Node>,
    particles: Vec<Particle>,
    rng: Pcg32,
    page_visible: bool,
    /// Fixed at construction
    reduced_motion: bool,
    loop_state: LoopState,
    /// Latest viewport from a resize still inside the quiet period
    pending_viewport: Option<Viewport>,
    resize_timer: Option<TimerHandle>,
    frame_count: u64,
}

impl AnimationSystem {
    /// Build the system and its initial node population. Nothing is drawn or scheduled yet.
    pub fn new(
        viewport: Viewport,
        settings: Settings,
        seed: u64,
        prefers_reduced_motion: bool,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let nodes = create_nodes(viewport, &settings, &mut rng);
        let reduced_motion = settings.effective_reduced_motion(prefers_reduced_motion);
        Self {
            particles: Vec::with_capacity(settings.max_particles.min(PARTICLE_LIMIT)),
            settings,
            viewport,
            nodes,
            rng,
            page_visible: true,
            reduced_motion,
            loop_state: LoopState::Stopped,
            pending_viewport: None,
            resize_timer: None,
            frame_count: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.loop_state, LoopState::Running(_))
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn page_visible(&self) -> bool {
        self.page_visible
    }

    /// Animated frames rendered so far (static repaints excluded)
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Size the surface and either start the loop or, in reduced motion,
    /// paint a single static frame and never schedule.
    pub fn start(&mut self, surface: &mut impl Surface, scheduler: &mut impl Scheduler) {
        surface.resize(self.viewport);
        if self.reduced_motion {
            log::info!("Reduced motion: rendering static frame only");
            self.render_static(surface);
            return;
        }
        if self.resume(scheduler) {
            log::info!(
                "Animation started ({} nodes, {}x{})",
                self.nodes.len(),
                self.viewport.width,
                self.viewport.height
            );
        }
    }

    /// Request a frame if visible, motion is allowed and none is outstanding.
    /// Returns true if a new frame chain was started.
    pub fn resume(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if !self.page_visible || self.reduced_motion || self.is_running() {
            return false;
        }
        match scheduler.request_frame() {
            Some(handle) => {
                self.loop_state = LoopState::Running(handle);
                true
            }
            None => {
                log::warn!("Host refused animation frame request");
                false
            }
        }
    }

    /// Cancel the outstanding frame, if any
    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let LoopState::Running(handle) = self.loop_state {
            scheduler.cancel_frame(handle);
            self.loop_state = LoopState::Stopped;
            log::info!("Animation stopped after {} frames", self.frame_count);
        }
    }

    /// Page visibility changed
    pub fn set_page_visible(&mut self, visible: bool, scheduler: &mut impl Scheduler) {
        self.page_visible = visible;
        if visible {
            if self.resume(scheduler) {
                log::info!("Animation resumed");
            }
        } else {
            self.stop(scheduler);
        }
    }

    /// Frame callback: advance and draw one tick, then request the next.
    /// A callback that arrives while stopped is ignored.
    pub fn frame(&mut self, surface: &mut impl Surface, scheduler: &mut impl Scheduler) {
        if !self.is_running() {
            log::debug!("Ignoring frame callback while stopped");
            return;
        }

        self.tick(surface);

        self.loop_state = match scheduler.request_frame() {
            Some(handle) => LoopState::Running(handle),
            None => {
                log::warn!("Host refused animation frame request, loop stopped");
                LoopState::Stopped
            }
        };
    }

    /// One animated tick: clear, nodes, links, particles (compacted in place)
    fn tick(&mut self, surface: &mut impl Surface) {
        let viewport = self.viewport;
        let settings = &self.settings;

        surface.clear(viewport);

        for node in &mut self.nodes {
            node.update(viewport);
            draw_node(surface, node, settings);
        }

        draw_links(surface, &self.nodes, settings);

        self.particles.retain_mut(|particle| {
            particle.update();
            draw_particle(surface, particle, settings);
            !particle.is_off_screen(viewport)
        });

        self.frame_count += 1;
    }

    /// Paint current state without advancing motion
    pub fn render_static(&self, surface: &mut impl Surface) {
        draw_frame(
            surface,
            self.viewport,
            &self.nodes,
            &self.particles,
            &self.settings,
        );
    }

    /// Spawn-interval callback. Adds one particle if under the cap.
    pub fn spawn_particle(&mut self) -> bool {
        if self.reduced_motion {
            return false;
        }
        let spawned = population::spawn_particle(
            &mut self.particles,
            self.viewport,
            &self.settings,
            &mut self.rng,
        );
        if !spawned {
            log::trace!("Particle cap reached ({})", self.settings.max_particles);
        }
        spawned
    }

    /// Raw resize event: restart the quiet-period timer with the latest size
    pub fn on_resize(&mut self, viewport: Viewport, scheduler: &mut impl Scheduler) {
        self.pending_viewport = Some(viewport);
        if let Some(timer) = self.resize_timer.take() {
            scheduler.disarm_resize_timer(timer);
        }
        self.resize_timer = scheduler.arm_resize_timer(self.settings.resize_debounce_ms);
        if self.resize_timer.is_none() {
            log::warn!("Host refused resize timer, resize deferred to next event");
        }
    }

    /// Quiet period elapsed: apply the viewport and rebuild the node population
    pub fn on_resize_settled(&mut self, surface: &mut impl Surface) {
        self.resize_timer = None;
        let Some(viewport) = self.pending_viewport.take() else {
            return;
        };

        self.viewport = viewport;
        surface.resize(viewport);
        self.nodes = create_nodes(viewport, &self.settings, &mut self.rng);
        log::info!(
            "Resized to {}x{}, {} nodes",
            viewport.width,
            viewport.height,
            self.nodes.len()
        );

        if self.reduced_motion {
            self.render_static(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;
    use proptest::prelude::*;

    const SEED: u64 = 12345;

    fn system(reduced: bool) -> AnimationSystem {
        AnimationSystem::new(Viewport::new(1920.0, 1080.0), Settings::default(), SEED, reduced)
    }

    /// Fire the pending frame the way the host would
    fn fire(
        sys: &mut AnimationSystem,
        surface: &mut RecordingSurface,
        sched: &mut ManualScheduler,
    ) -> bool {
        match sched.take_frame() {
            Some(_) => {
                sys.frame(surface, sched);
                true
            }
            None => false,
        }
    }

    #[test]
    fn test_start_schedules_one_frame() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();

        sys.start(&mut surface, &mut sched);
        assert!(sys.is_running());
        assert_eq!(sched.pending_frames(), 1);
        assert_eq!(surface.commands, vec![DrawCommand::Resize(sys.viewport())]);

        // Starting again does not add a second chain
        sys.start(&mut surface, &mut sched);
        assert_eq!(sched.pending_frames(), 1);
    }

    #[test]
    fn test_frame_reschedules_and_draws() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.start(&mut surface, &mut sched);
        surface.reset();

        for i in 1..=5 {
            assert!(fire(&mut sys, &mut surface, &mut sched));
            assert_eq!(sched.pending_frames(), 1);
            assert_eq!(sys.frame_count(), i);
        }
        assert_eq!(surface.clear_count(), 5);
        assert_eq!(surface.disc_count(), 5 * 50);
    }

    #[test]
    fn test_tick_layering() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.nodes = vec![
            Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO),
            Node::new(Vec2::new(150.0, 100.0), Vec2::ZERO),
        ];
        assert!(sys.spawn_particle());
        sys.start(&mut surface, &mut sched);
        surface.reset();

        fire(&mut sys, &mut surface, &mut sched);
        let kinds: Vec<&str> = surface
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Clear(_) => "clear",
                DrawCommand::Disc { color, .. } if color.a == 1.0 => "node",
                DrawCommand::Disc { .. } => "particle",
                DrawCommand::Line { .. } => "link",
                DrawCommand::Resize(_) => "resize",
            })
            .collect();
        assert_eq!(kinds, vec!["clear", "node", "node", "link", "particle"]);
    }

    #[test]
    fn test_particles_compacted_in_order() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.nodes.clear();
        let particle = |x: f32, y: f32, opacity: f32| Particle {
            pos: Vec2::new(x, y),
            speed: 1.0,
            size: 1.5,
            opacity,
            decay: 0.005,
        };
        sys.particles = vec![
            particle(1.0, 10.0, 0.5),
            particle(2.0, 1080.0, 0.5), // falls off the bottom
            particle(3.0, 10.0, 0.005), // fades out
            particle(4.0, 10.0, 0.5),
        ];

        sys.start(&mut surface, &mut sched);
        fire(&mut sys, &mut surface, &mut sched);

        let xs: Vec<f32> = sys.particles().iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![1.0, 4.0]);
        // Removed particles are still drawn on their final frame
        assert_eq!(surface.disc_count(), 4);
    }

    #[test]
    fn test_hide_and_show() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.start(&mut surface, &mut sched);

        sys.set_page_visible(false, &mut sched);
        assert_eq!(sys.loop_state(), LoopState::Stopped);
        assert_eq!(sched.pending_frames(), 0);
        assert!(!fire(&mut sys, &mut surface, &mut sched));

        sys.set_page_visible(true, &mut sched);
        assert!(sys.is_running());
        assert_eq!(sched.pending_frames(), 1);

        // Visible again while already running is a no-op
        sys.set_page_visible(true, &mut sched);
        assert_eq!(sched.pending_frames(), 1);
        assert_eq!(sched.frames_requested, 2);
    }

    #[test]
    fn test_stale_callback_ignored() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.start(&mut surface, &mut sched);
        sys.stop(&mut sched);
        surface.reset();

        sys.frame(&mut surface, &mut sched);
        assert!(surface.commands.is_empty());
        assert_eq!(sched.pending_frames(), 0);
        assert_eq!(sys.frame_count(), 0);
    }

    #[test]
    fn test_reduced_motion_never_schedules() {
        let mut sys = system(true);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();

        sys.start(&mut surface, &mut sched);
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(sched.frames_requested, 0);

        sys.set_page_visible(false, &mut sched);
        sys.set_page_visible(true, &mut sched);
        assert!(!sys.resume(&mut sched));
        assert!(!sys.spawn_particle());
        assert_eq!(sched.frames_requested, 0);
        assert_eq!(sys.loop_state(), LoopState::Stopped);

        // Each settled resize repaints exactly once
        sys.on_resize(Viewport::new(800.0, 600.0), &mut sched);
        sched.take_timer().unwrap();
        sys.on_resize_settled(&mut surface);
        assert_eq!(surface.clear_count(), 2);
        assert_eq!(sched.frames_requested, 0);
        assert_eq!(sys.frame_count(), 0);
    }

    #[test]
    fn test_settings_force_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let sys = AnimationSystem::new(Viewport::new(800.0, 600.0), settings, SEED, false);
        assert!(sys.reduced_motion());
    }

    #[test]
    fn test_static_frame_uses_configured_radius() {
        let settings = Settings {
            node_radius: 7.0,
            reduced_motion: true,
            ..Settings::default()
        };
        let mut sys = AnimationSystem::new(Viewport::new(1920.0, 1080.0), settings, SEED, false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.start(&mut surface, &mut sched);

        let radii: Vec<f32> = surface
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Disc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 50);
        assert!(radii.iter().all(|&r| r == 7.0));
    }

    #[test]
    fn test_unvalidated_particle_cap_does_not_preallocate() {
        let settings = Settings {
            max_particles: usize::MAX,
            ..Settings::default()
        };
        let mut sys = AnimationSystem::new(Viewport::new(800.0, 600.0), settings, SEED, false);
        assert!(sys.spawn_particle());
        assert_eq!(sys.particles().len(), 1);
    }

    #[test]
    fn test_resize_debounced() {
        let mut sys = system(false);
        let mut surface = RecordingSurface::new();
        let mut sched = ManualScheduler::new();
        sys.start(&mut surface, &mut sched);
        surface.reset();

        sys.on_resize(Viewport::new(1000.0, 800.0), &mut sched);
        sys.on_resize(Viewport::new(700.0, 900.0), &mut sched);
        sys.on_resize(Viewport::new(600.0, 800.0), &mut sched);
        assert_eq!(sched.pending_timers(), 1);
        assert_eq!(sched.armed_delay(), Some(150));
        // Nothing applied during the quiet period
        assert_eq!(sys.viewport(), Viewport::new(1920.0, 1080.0));

        sched.take_timer().unwrap();
        sys.on_resize_settled(&mut surface);
        let vp = Viewport::new(600.0, 800.0);
        assert_eq!(sys.viewport(), vp);
        assert_eq!(sys.nodes().len(), 25);
        assert!(sys.nodes().iter().all(|n| vp.contains(n.pos)));
        assert_eq!(surface.commands, vec![DrawCommand::Resize(vp)]);

        // Loop keeps its single chain across the resize
        assert_eq!(sched.pending_frames(), 1);

        // A stale settle with nothing pending changes nothing
        sys.on_resize_settled(&mut surface);
        assert_eq!(surface.commands.len(), 1);
    }

    #[test]
    fn test_spawn_capped() {
        let mut sys = system(false);
        for _ in 0..100 {
            sys.spawn_particle();
        }
        assert_eq!(sys.particles().len(), 20);
        assert!(sys.particles().iter().all(|p| p.pos.y == -10.0));
    }

    #[derive(Debug, Clone)]
    enum Event {
        Fire,
        Visible(bool),
        Spawn,
        Resize(f32, f32),
        Settle,
    }

    fn event() -> impl Strategy<Value = Event> {
        prop_oneof![
            4 => Just(Event::Fire),
            2 => any::<bool>().prop_map(Event::Visible),
            2 => Just(Event::Spawn),
            1 => (100.0f32..2500.0, 100.0f32..1500.0).prop_map(|(w, h)| Event::Resize(w, h)),
            1 => Just(Event::Settle),
        ]
    }

    proptest! {
        #[test]
        fn prop_single_frame_chain(
            reduced in any::<bool>(),
            events in proptest::collection::vec(event(), 1..200),
        ) {
            let mut sys = system(reduced);
            let mut surface = RecordingSurface::new();
            let mut sched = ManualScheduler::new();
            sys.start(&mut surface, &mut sched);

            for ev in events {
                match ev {
                    Event::Fire => { fire(&mut sys, &mut surface, &mut sched); }
                    Event::Visible(v) => sys.set_page_visible(v, &mut sched),
                    Event::Spawn => { sys.spawn_particle(); }
                    Event::Resize(w, h) => sys.on_resize(Viewport::new(w, h), &mut sched),
                    Event::Settle => {
                        if sched.take_timer().is_some() {
                            sys.on_resize_settled(&mut surface);
                        }
                    }
                }
                prop_assert!(sched.pending_frames() <= 1);
                prop_assert_eq!(sched.pending_frames() == 1, sys.is_running());
                prop_assert!(sched.pending_timers() <= 1);
                prop_assert!(sys.particles().len() <= sys.settings().max_particles);
                let vp = sys.viewport();
                prop_assert!(sys.nodes().iter().all(|n| vp.contains(n.pos)));
                if reduced {
                    prop_assert_eq!(sched.frames_requested, 0);
                }
            }
        }
    }
}
