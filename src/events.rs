use crate::dom;
use crate::frame;
use crate::trail::{TrailQueue, TrailState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared handles the listeners and the frame loop both need.
#[derive(Clone)]
pub struct EffectWiring {
    pub document: web::Document,
    pub container: web::HtmlElement,
    pub state: Rc<RefCell<TrailState>>,
    pub queue: Rc<RefCell<TrailQueue<web::HtmlElement>>>,
}

pub fn wire_input_handlers(w: &EffectWiring) {
    wire_mousemove(w);
    wire_scroll_motion(w);
    wire_scroll_spawn(w);
}

/// Cancel-and-reschedule debounce: only the most recent timer can fire.
fn arm_debounce(pending: &Rc<RefCell<Option<i32>>>, cb: &Closure<dyn FnMut()>, ms: i32) {
    if let Some(window) = web::window() {
        if let Some(handle) = pending.borrow_mut().take() {
            window.clear_timeout_with_handle(handle);
        }
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
            .ok();
        *pending.borrow_mut() = handle;
    }
}

fn clear_moving_closure(
    state: &Rc<RefCell<TrailState>>,
    pending: &Rc<RefCell<Option<i32>>>,
) -> Closure<dyn FnMut()> {
    let state = state.clone();
    let pending = pending.clone();
    Closure::wrap(Box::new(move || {
        state.borrow_mut().is_moving = false;
        *pending.borrow_mut() = None;
    }) as Box<dyn FnMut()>)
}

/// Track the cursor and containment; while inside, hold `is_moving` high
/// with a trailing debounce.
fn wire_mousemove(w: &EffectWiring) {
    let w = w.clone();
    let document = w.document.clone();
    let pending: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
    let clear_moving = clear_moving_closure(&w.state, &pending);

    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let rect = dom::container_rect(&w.container);
        let inside =
            w.state
                .borrow_mut()
                .pointer_moved(ev.client_x() as f32, ev.client_y() as f32, rect);
        if inside {
            let mut state = w.state.borrow_mut();
            state.is_moving = true;
            let ms = state.config.move_debounce_ms;
            drop(state);
            arm_debounce(&pending, &clear_moving, ms);
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// First scroll listener: scrolling under a stationary cursor still counts
/// as movement, with a jittered last-sample point and its own debounce.
fn wire_scroll_motion(w: &EffectWiring) {
    let w = w.clone();
    let pending: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
    let clear_moving = clear_moving_closure(&w.state, &pending);

    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let rect = dom::container_rect(&w.container);
        let inside = w.state.borrow_mut().recheck_container(rect);
        if inside {
            let mut state = w.state.borrow_mut();
            state.is_moving = true;
            state.scroll_jitter(&mut rand::thread_rng());
            let ms = state.config.move_debounce_ms;
            drop(state);
            arm_debounce(&pending, &clear_moving, ms);
        }
    }) as Box<dyn FnMut(_)>);
    add_scroll_listener(&closure);
    closure.forget();
}

/// Second scroll listener: rate-limited dispatcher that requests at most one
/// animation frame per qualifying burst, which performs the scroll spawn.
fn wire_scroll_spawn(w: &EffectWiring) {
    let w = w.clone();
    let tick = {
        let w = w.clone();
        Closure::wrap(Box::new(move || {
            if w.state.borrow_mut().take_scroll_tick() {
                scroll_spawn(&w);
            }
        }) as Box<dyn FnMut()>)
    };

    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let now = js_sys::Date::now();
        if w.state.borrow_mut().note_scroll(now) {
            if let Some(window) = web::window() {
                _ = window.request_animation_frame(tick.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(_)>);
    add_scroll_listener(&closure);
    closure.forget();
}

/// Offset the last sampled point past the movement threshold, spawn at the
/// cursor, then resync. The jump is deliberately randomized fake movement,
/// not a function of the scroll delta.
fn scroll_spawn(w: &EffectWiring) {
    if !w.state.borrow().in_container {
        return;
    }
    let now = js_sys::Date::now();
    w.state
        .borrow_mut()
        .begin_scroll_jump(&mut rand::thread_rng());
    frame::spawn_trail_image(w, now);
    w.state.borrow_mut().resync_last_mouse();
}

// Scroll listeners are registered passive: false (allowed to preventDefault,
// even though the handlers currently do not).
fn add_scroll_listener<T: ?Sized>(closure: &Closure<T>) {
    if let Some(window) = web::window() {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    }
}
