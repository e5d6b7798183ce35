//! Binding to the Lenis smooth-scroll library loaded by the page bundle.
//! Opaque collaborator: constructed once, fed the rAF timestamp each frame.
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Lenis;

    #[wasm_bindgen(constructor)]
    pub fn new(options: &JsValue) -> Lenis;

    /// Advance the scroll animation; `time` is the frame timestamp in ms.
    #[wasm_bindgen(method)]
    pub fn raf(this: &Lenis, time: f64);
}

pub fn init_smooth_scroll() -> anyhow::Result<Lenis> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("autoRaf"),
        &JsValue::from_bool(true),
    )
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(Lenis::new(&options))
}
