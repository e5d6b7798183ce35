use crate::constants::{OUT_EASING, SCALE_IN_DEFER_MS};
use crate::dom;
use crate::events::EffectWiring;
use crate::scroll;
use crate::trail::{self, TrailItem};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub wiring: EffectWiring,
    pub scroller: scroll::Lenis,
}

impl FrameContext {
    /// One frame tick: feed the smooth scroller, then spawn-decision, then
    /// expiry-check. Strictly sequential within the frame.
    pub fn frame(&mut self, time_ms: f64) {
        self.scroller.raf(time_ms);
        let now = js_sys::Date::now();
        if self.wiring.state.borrow_mut().decide_spawn(now).is_some() {
            spawn_trail_image(&self.wiring, now);
        }
        retire_expired(&self.wiring, now);
    }
}

/// Drive the frame loop off requestAnimationFrame for the page lifetime.
pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let ctx_tick = ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |time_ms: f64| {
        ctx_tick.borrow_mut().frame(time_ms);
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Spawn one random rotated image at the cursor, scale it in, and enqueue it
/// with its removal deadline.
pub fn spawn_trail_image(w: &EffectWiring, now_ms: f64) {
    let window = match web::window() {
        Some(window) => window,
        None => return,
    };
    let rect = dom::container_rect(&w.container);
    let (src, rotation, rel, in_duration, lifespan) = {
        let state = w.state.borrow();
        let mut rng = rand::thread_rng();
        let (index, rotation) = trail::spawn_params(&mut rng, &state.config);
        (
            trail::image_src(index),
            rotation,
            state.mouse - Vec2::new(rect.left, rect.top),
            state.config.in_duration_ms,
            state.config.image_lifespan_ms,
        )
    };

    let el = match dom::create_trail_image(
        &w.document,
        &w.container,
        &src,
        rotation,
        rel.x,
        rel.y,
        in_duration,
    ) {
        Ok(el) => el,
        Err(e) => {
            log::error!("trail image create failed: {:?}", e);
            return;
        }
    };

    {
        let el = el.clone();
        dom::set_timeout_once(&window, SCALE_IN_DEFER_MS, move || {
            _ = el
                .style()
                .set_property("transform", &dom::transform(rotation, 1.0));
        });
    }

    w.queue.borrow_mut().push(TrailItem {
        element: el,
        rotation_deg: rotation,
        remove_at_ms: now_ms + lifespan,
    });
}

/// Retire at most the single oldest expired item, rate-limited by the
/// removal delay: scale it out, then unmount once the transition is done.
pub fn retire_expired(w: &EffectWiring, now_ms: f64) {
    let (removal_delay, out_duration) = {
        let state = w.state.borrow();
        (state.config.removal_delay_ms, state.config.out_duration_ms)
    };
    let item = match w.queue.borrow_mut().pop_expired(now_ms, removal_delay) {
        Some(item) => item,
        None => return,
    };

    let style = item.element.style();
    _ = style.set_property(
        "transition",
        &format!("transform {out_duration}ms {OUT_EASING}"),
    );
    _ = style.set_property("transform", &dom::transform(item.rotation_deg, 0.0));

    if let Some(window) = web::window() {
        let el = item.element.clone();
        dom::set_timeout_once(&window, out_duration as i32, move || {
            dom::detach_if_attached(&el);
        });
    }
}
