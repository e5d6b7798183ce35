use crate::constants::{IN_EASING, TRAIL_IMG_CLASS};
use crate::trail::Rect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Re-read the container bounds; tolerant of layout shifts and scrolling.
#[inline]
pub fn container_rect(container: &web::HtmlElement) -> Rect {
    let r = container.get_bounding_client_rect();
    Rect {
        left: r.left() as f32,
        top: r.top() as f32,
        right: r.right() as f32,
        bottom: r.bottom() as f32,
    }
}

#[inline]
pub fn transform(rotation_deg: f32, scale: f32) -> String {
    format!("translate(-50%, -50%) rotate({rotation_deg}deg) scale({scale})")
}

/// Build a trail `<img>` at the given container-relative position, starting
/// at scale(0) with the scale-in transition armed, and append it.
pub fn create_trail_image(
    document: &web::Document,
    container: &web::HtmlElement,
    src: &str,
    rotation_deg: f32,
    rel_x: f32,
    rel_y: f32,
    in_duration_ms: u32,
) -> Result<web::HtmlElement, JsValue> {
    let img: web::HtmlImageElement = document
        .create_element("img")?
        .dyn_into()
        .map_err(JsValue::from)?;
    img.class_list().add_1(TRAIL_IMG_CLASS)?;
    img.set_src(src);
    img.set_alt("");

    let el: web::HtmlElement = img.into();
    let style = el.style();
    style.set_property("left", &format!("{rel_x}px"))?;
    style.set_property("top", &format!("{rel_y}px"))?;
    style.set_property("transform", &transform(rotation_deg, 0.0))?;
    style.set_property(
        "transition",
        &format!("transform {in_duration_ms}ms {IN_EASING}"),
    )?;

    container.append_child(&el)?;
    Ok(el)
}

/// Unmount the element if it still has a parent; safe to call twice.
pub fn detach_if_attached(el: &web::HtmlElement) {
    if el.parent_node().is_some() {
        el.remove();
    }
}

/// One-shot timer; the closure frees itself after firing.
pub fn set_timeout_once(window: &web::Window, ms: i32, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
}
