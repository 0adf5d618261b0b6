#![cfg(target_arch = "wasm32")]
use crate::constants::{COOKIE_SEED, FIELD_SEED};
use crate::core::{
    CausticParams, CausticUniforms, CookieConfig, CookieSynth, FieldConfig, MessageBoard,
    OrbitConfig, OrbitOscillator, ParticleField, SceneClock, UniformBroadcast, SUBJECT_MESSAGES,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("abyss-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if !STARTED.swap(true, Ordering::SeqCst) {
        spawn_local(async move {
            // Pure scene components, all seeded so a reload rebuilds the
            // identical scene.
            let clock = Rc::new(RefCell::new(SceneClock::new()));
            let cookie = CookieSynth::new(CookieConfig::default(), COOKIE_SEED);
            let field = ParticleField::generate(FieldConfig::default(), FIELD_SEED);
            let oscillator = OrbitOscillator::new(OrbitConfig::default());
            let board = Rc::new(RefCell::new(MessageBoard::new(
                SUBJECT_MESSAGES.iter().map(|s| s.to_string()).collect(),
            )));

            // One caustic shell segment on the subject; registered once, fed
            // time and transform every frame.
            let mut broadcast = UniformBroadcast::new();
            let caustic_handle = broadcast.register(CausticUniforms::new(
                &CausticParams::default(),
                glam::Mat4::IDENTITY,
            ));

            log::info!(
                "[scene] agents={} particles={} messages={}",
                cookie.agents().len(),
                field.len(),
                SUBJECT_MESSAGES.len()
            );

            let cookie_side = cookie.surface_size();
            let gpu = frame::init_gpu(&canvas, &field, cookie_side).await;

            events::wire_pointer_handlers(events::InputWiring {
                canvas: canvas.clone(),
                clock: clock.clone(),
                board: board.clone(),
                oscillator: oscillator.clone(),
            });

            let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
                clock: clock.clone(),
                board: board.clone(),
                cookie,
                field,
                oscillator,
                broadcast,
                caustic_handle,
                canvas: canvas.clone(),
                document: document.clone(),
                gpu,
                last_instant: Instant::now(),
            }));
            frame::start_loop(frame_ctx);
        });
    }

    Ok(())
}
