use crate::core::{
    subject_bob, subject_roll, CookieSynth, MessageBoard, OrbitOscillator, ParticleField,
    SceneClock, UniformBroadcast, CAUSTIC_LAYER_SCALE, RAY_RIGS, SUBJECT_CENTER,
};
use crate::render;
use glam::{Mat4, Vec3};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame driver: advances the shared clock once, steps every scene
/// component from the new elapsed time, then hands the assembled frame to
/// the renderer.
pub struct FrameContext<'a> {
    pub clock: Rc<RefCell<SceneClock>>,
    pub board: Rc<RefCell<MessageBoard>>,
    pub cookie: CookieSynth,
    pub field: ParticleField,
    pub oscillator: OrbitOscillator,
    pub broadcast: UniformBroadcast,
    /// Handle of the subject shell's uniform set in the broadcast registry.
    pub caustic_handle: usize,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Single clock write per frame; everything below only reads it.
        let elapsed = self.clock.borrow_mut().advance(dt.as_secs_f64());

        // Light cookie redraw and conditional re-upload.
        self.cookie.advance(elapsed);
        if self.cookie.take_dirty() {
            if let Some(g) = &self.gpu {
                g.upload_cookie(self.cookie.pixels());
            }
        }

        // Subject idle motion drives both layers; the shell rides the same
        // transform with its anti-z-fight scale folded in.
        let subject_model = Mat4::from_translation(SUBJECT_CENTER + Vec3::Y * subject_bob(elapsed))
            * Mat4::from_rotation_z(subject_roll(elapsed));
        let shell_model = subject_model * Mat4::from_scale(Vec3::splat(CAUSTIC_LAYER_SCALE));
        self.broadcast.set_model(self.caustic_handle, shell_model);
        self.broadcast.broadcast_time(elapsed);

        // Message overlay timer and DOM mirror.
        {
            let mut board = self.board.borrow_mut();
            if board.timer_poll(elapsed) {
                log::info!("overlay auto-dismissed");
            }
            crate::overlay::sync(&self.document, &board, elapsed);
        }

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            let aspect = w.max(1) as f32 / h.max(1) as f32;
            let scene = render::SceneFrame {
                camera: self.oscillator.camera(elapsed, aspect),
                time: elapsed as f32,
                subject_model,
                caustic_sets: self.broadcast.sets(),
                field_rotation: self.field.rotation(elapsed),
                rigs: RAY_RIGS,
            };
            if let Err(e) = g.render(&scene) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    field: &ParticleField,
    cookie_side: u32,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, field, cookie_side).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
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
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
