//! Browser bindings: canvas surface, frame/timer scheduling, environment queries

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::{FrameHandle, Scheduler, TimerHandle};
use crate::error::{Error, Result};
use crate::renderer::Surface;
use crate::{Rgba, Viewport};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Look up the canvas by id and get its 2D context
pub fn acquire_canvas(
    document: &Document,
    id: &str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(id)
        .ok_or_else(|| Error::CanvasNotFound(id.to_string()))?
        .dyn_into()
        .map_err(|_| Error::NotACanvas(id.to_string()))?;

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or(Error::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| Error::ContextUnavailable)?;

    Ok((canvas, ctx))
}

/// Current inner window size in CSS pixels
pub fn window_viewport(window: &Window) -> Viewport {
    let dim = |v: std::result::Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

/// User agent asks for reduced motion
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

pub fn page_visible(document: &Document) -> bool {
    document.visibility_state() != web_sys::VisibilityState::Hidden
}

/// `Surface` over a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
    }

    fn clear(&mut self, viewport: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke(&mut self, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

/// `Scheduler` over requestAnimationFrame and setTimeout.
///
/// The frame and resize-settle callbacks are installed once after the
/// owning app is shared, since they need a handle back to it.
pub struct WebScheduler {
    window: Window,
    on_frame: Option<Closure<dyn FnMut(f64)>>,
    on_resize_settled: Option<Closure<dyn FnMut()>>,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            on_frame: None,
            on_resize_settled: None,
        }
    }

    pub fn set_frame_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.on_frame = Some(callback);
    }

    pub fn set_resize_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.on_resize_settled = Some(callback);
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.on_frame.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    fn arm_resize_timer(&mut self, delay_ms: u32) -> Option<TimerHandle> {
        let callback = self.on_resize_settled.as_ref()?;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms as i32,
            ) {
            Ok(id) => Some(TimerHandle(id)),
            Err(e) => {
                log::warn!("setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn disarm_resize_timer(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }
}
