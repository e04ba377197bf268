//! Network Canvas entry point
//!
//! On the web this wires the animation to the page. Natively it runs a short
//! headless simulation and logs what would have been drawn.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

    use network_canvas::effects::{
        COUNTER_DURATION_MS, CounterAnimation, CounterFrame, PROJECT_STAGGER_MS, RevealPhase,
        STAGGER_STEP_MS, ScrollThrottle, TERMINAL_STAGGER_MS, orbit_offsets, parallax_offsets,
        stagger_delay_ms,
    };
    use network_canvas::platform::web::{
        CanvasSurface, WebScheduler, acquire_canvas, page_visible, prefers_reduced_motion,
        window_viewport,
    };
    use network_canvas::{AnimationSystem, Error, Result, Settings};

    const CANVAS_ID: &str = "networkCanvas";

    /// Everything the page callbacks share
    struct App {
        system: AnimationSystem,
        surface: CanvasSurface,
        scheduler: WebScheduler,
    }

    pub fn run() -> Result<()> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;

        let (canvas, ctx) = acquire_canvas(&document, CANVAS_ID)?;

        let settings = Settings::load();
        let reduced_motion = prefers_reduced_motion(&window);
        let viewport = window_viewport(&window);
        let seed = js_sys::Date::now() as u64;

        let system = AnimationSystem::new(viewport, settings, seed, reduced_motion);
        let reduced_motion = system.reduced_motion();
        let spawn_interval_ms = system.settings().spawn_interval_ms;
        log::info!(
            "Network canvas {}x{}, {} nodes, reduced motion: {}",
            viewport.width,
            viewport.height,
            system.nodes().len(),
            reduced_motion
        );

        let app = Rc::new(RefCell::new(App {
            system,
            surface: CanvasSurface::new(canvas, ctx),
            scheduler: WebScheduler::new(window.clone()),
        }));

        install_scheduler_callbacks(&app);
        setup_visibility(&document, app.clone());
        setup_resize(&window, app.clone());
        if !reduced_motion {
            setup_spawner(&window, app.clone(), spawn_interval_ms);
            setup_parallax(&window, &document);
            setup_orbit(&document);
            apply_stagger(&document, ".terminal-line", "animation-delay", TERMINAL_STAGGER_MS);
            setup_reveal(&window, &document, ".skill-card", STAGGER_STEP_MS);
            setup_reveal(&window, &document, ".project-card", PROJECT_STAGGER_MS);
        }
        setup_counters(&window, &document, !reduced_motion);

        {
            let mut guard = app.borrow_mut();
            let App {
                system,
                surface,
                scheduler,
            } = &mut *guard;
            system.start(surface, scheduler);
            if !page_visible(&document) {
                system.set_page_visible(false, scheduler);
            }
        }

        log::info!("Network canvas running");
        Ok(())
    }

    fn install_scheduler_callbacks(app: &Rc<RefCell<App>>) {
        let frame = {
            let app = app.clone();
            Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                let mut guard = app.borrow_mut();
                let App {
                    system,
                    surface,
                    scheduler,
                } = &mut *guard;
                system.frame(surface, scheduler);
            })
        };

        let settled = {
            let app = app.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut guard = app.borrow_mut();
                let App {
                    system, surface, ..
                } = &mut *guard;
                system.on_resize_settled(surface);
            })
        };

        let mut guard = app.borrow_mut();
        guard.scheduler.set_frame_callback(frame);
        guard.scheduler.set_resize_callback(settled);
    }

    fn setup_visibility(document: &Document, app: Rc<RefCell<App>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let visible = page_visible(&document_clone);
            let mut guard = app.borrow_mut();
            let App {
                system, scheduler, ..
            } = &mut *guard;
            system.set_page_visible(visible, scheduler);
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let viewport = window_viewport(&window_clone);
            let mut guard = app.borrow_mut();
            let App {
                system, scheduler, ..
            } = &mut *guard;
            system.on_resize(viewport, scheduler);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_spawner(window: &Window, app: Rc<RefCell<App>>, interval_ms: u32) {
        let closure = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().system.spawn_particle();
        });
        if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            log::warn!("Particle spawner not started: {:?}", e);
        }
        closure.forget();
    }

    fn set_transform(document: &Document, selector: &str, value: &str) {
        if let Some(el) = document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("transform", value);
        }
    }

    fn setup_parallax(window: &Window, document: &Document) {
        let throttle = Rc::new(RefCell::new(ScrollThrottle::default()));

        let update = {
            let throttle = throttle.clone();
            let window = window.clone();
            let document = document.clone();
            Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                let offsets = parallax_offsets(window.page_y_offset().unwrap_or(0.0) as f32);
                set_transform(
                    &document,
                    ".hero-content",
                    &format!("translateY({}px)", offsets.content),
                );
                set_transform(
                    &document,
                    ".hero-visual",
                    &format!("translateY(-50%) translateY({}px)", offsets.visual),
                );
                throttle.borrow_mut().complete();
            })
        };

        let window_clone = window.clone();
        let on_scroll = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if throttle.borrow_mut().request()
                && window_clone
                    .request_animation_frame(update.as_ref().unchecked_ref())
                    .is_err()
            {
                throttle.borrow_mut().complete();
            }
        });
        let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        on_scroll.forget();
    }

    fn setup_orbit(document: &Document) {
        let Some(main_node) = document.query_selector(".main-node").ok().flatten() else {
            return;
        };
        let Ok(sub_nodes) = document.query_selector_all(".sub-node") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = main_node.get_bounding_client_rect();
            let center = Vec2::new(
                (rect.left() + rect.width() / 2.0) as f32,
                (rect.top() + rect.height() / 2.0) as f32,
            );
            let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            let offsets = orbit_offsets(sub_nodes.length() as usize, pointer - center);
            for (i, offset) in offsets.iter().enumerate() {
                if let Some(el) = sub_nodes
                    .item(i as u32)
                    .and_then(|n| n.dyn_into::<HtmlElement>().ok())
                {
                    let style = el.style();
                    let _ = style.set_property("--x", &format!("{}px", offset.x));
                    let _ = style.set_property("--y", &format!("{}px", offset.y));
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn apply_stagger(document: &Document, selector: &str, property: &str, step_ms: u32) {
        let Ok(elements) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..elements.length() {
            if let Some(el) = elements
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlElement>().ok())
            {
                let delay = stagger_delay_ms(i as usize, step_ms);
                let _ = el.style().set_property(property, &format!("{}ms", delay));
            }
        }
    }

    fn apply_reveal(el: &HtmlElement, phase: RevealPhase) {
        let style = el.style();
        if let Some(transition) = phase.transition() {
            let _ = style.set_property("transition", transition);
        }
        let _ = style.set_property("opacity", phase.opacity());
        let _ = style.set_property("transform", &phase.transform());
    }

    /// Hide every match, then reveal them one by one `step_ms` apart
    fn setup_reveal(window: &Window, document: &Document, selector: &str, step_ms: u32) {
        let Ok(elements) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..elements.length() {
            let Some(el) = elements
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            apply_reveal(&el, RevealPhase::Hidden);

            let target = el.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                apply_reveal(&target, RevealPhase::Shown);
            });
            let delay = stagger_delay_ms(i as usize, step_ms);
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay as i32,
            ) {
                log::warn!("Reveal timer for {} not set: {:?}", selector, e);
                apply_reveal(&el, RevealPhase::Shown);
            }
            closure.forget();
        }
    }

    /// Count every `.stat-value` up to its `data-target`, or show the target
    /// straight away when `animate` is false
    fn setup_counters(window: &Window, document: &Document, animate: bool) {
        let Ok(stats) = document.query_selector_all(".stat-value") else {
            return;
        };
        for i in 0..stats.length() {
            let Some(el) = stats.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(target) = el
                .get_attribute("data-target")
                .and_then(|t| t.trim().parse::<f64>().ok())
            else {
                continue;
            };
            if animate {
                animate_counter(window, el, target);
            } else {
                el.set_text_content(Some(&target.to_string()));
            }
        }
    }

    fn animate_counter(window: &Window, el: Element, target: f64) {
        let mut counter = CounterAnimation::new(target, COUNTER_DURATION_MS);
        // The callback re-requests itself through this slot until the counter finishes
        let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let next = slot.clone();
        let window_clone = window.clone();
        *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            let frame = counter.step();
            el.set_text_content(Some(&frame.value().to_string()));
            if let CounterFrame::Running(_) = frame {
                if let Some(callback) = next.borrow().as_ref() {
                    let _ = window_clone.request_animation_frame(callback.as_ref().unchecked_ref());
                }
            }
        }));

        if let Some(callback) = slot.borrow().as_ref() {
            if window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("Stat counter not started");
            }
        };
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    // A missing canvas only disables the background; the page keeps working
    if let Err(e) = wasm_app::run() {
        log::warn!("Network canvas disabled: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Network canvas (native) starting...");
    log::info!("Native mode renders headless - build for wasm32 to see the page");

    headless::run(headless::FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use network_canvas::platform::ManualScheduler;
    use network_canvas::renderer::RecordingSurface;
    use network_canvas::{AnimationSystem, Settings, Viewport};

    /// About five seconds at 60 Hz
    pub const FRAMES: usize = 300;
    /// Frames per spawn attempt (100 ms at 60 Hz)
    const FRAMES_PER_SPAWN: usize = 6;

    pub fn run(frames: usize) {
        let viewport = Viewport::new(1920.0, 1080.0);
        let mut system = AnimationSystem::new(viewport, Settings::load(), 0x5EED, false);
        let mut surface = RecordingSurface::new();
        let mut scheduler = ManualScheduler::new();

        system.start(&mut surface, &mut scheduler);

        for i in 0..frames {
            if i % FRAMES_PER_SPAWN == 0 {
                system.spawn_particle();
            }
            if scheduler.take_frame().is_none() {
                break;
            }
            surface.reset();
            system.frame(&mut surface, &mut scheduler);
        }

        log::info!(
            "{} frames: {} nodes, {} particles, {} links in last frame",
            system.frame_count(),
            system.nodes().len(),
            system.particles().len(),
            surface.line_count()
        );
    }
}
