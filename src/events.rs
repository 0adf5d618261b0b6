use crate::core::{
    resolve_hit, subject_bob, MessageBoard, OrbitOscillator, SceneClock, SUBJECT_CENTER,
    SUBJECT_PICK_RADIUS,
};
use crate::input;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub clock: Rc<RefCell<SceneClock>>,
    pub board: Rc<RefCell<MessageBoard>>,
    pub oscillator: OrbitOscillator,
}

/// Wire pointer clicks into the message state machine.
///
/// Hit resolution is an explicit ordered test: the subject's bounding sphere
/// first, and only a miss counts as the background. The board ignores
/// background clicks while closed, which is what makes the catcher
/// effectively absent until the overlay opens.
pub fn wire_pointer_handlers(w: InputWiring) {
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let now = w.clock.borrow().elapsed();
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let aspect = w.canvas.width().max(1) as f32 / w.canvas.height().max(1) as f32;
        let camera = w.oscillator.camera(now, aspect);
        let (ro, rd) = input::screen_to_world_ray(&w.canvas, pos.x, pos.y, &camera);

        // The pick sphere follows the subject's idle bob.
        let center = SUBJECT_CENTER + Vec3::new(0.0, subject_bob(now), 0.0);
        let target = resolve_hit(input::ray_sphere(ro, rd, center, SUBJECT_PICK_RADIUS));

        w.board.borrow_mut().click(target, now);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}
