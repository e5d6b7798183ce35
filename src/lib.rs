#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod scroll;
mod trail;

use constants::CONTAINER_SELECTOR;
use trail::{TrailConfig, TrailQueue, TrailState};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("image-trail starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .query_selector(CONTAINER_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CONTAINER_SELECTOR))?;
    let container: web::HtmlElement = container
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let scroller = scroll::init_smooth_scroll()?;

    let wiring = events::EffectWiring {
        document: document.clone(),
        container,
        state: Rc::new(RefCell::new(TrailState::new(TrailConfig::default()))),
        queue: Rc::new(RefCell::new(TrailQueue::new())),
    };
    events::wire_input_handlers(&wiring);

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        wiring,
        scroller,
    })));
    log::info!("trail effect running");
    Ok(())
}
