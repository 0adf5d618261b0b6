use crate::core::Camera;
use glam::{Vec2, Vec3, Vec4};
use web_sys as web;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Pointer event position in the canvas' backing-store pixel space.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Compute a world-space ray through a canvas pixel for the given camera.
///
/// The camera is whatever the cinematic oscillator produced for the current
/// frame, so picking stays consistent with what is on screen.
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    sx: f32,
    sy: f32,
    camera: &Camera,
) -> (Vec3, Vec3) {
    let width = canvas.width().max(1) as f32;
    let height = canvas.height().max(1) as f32;
    let ndc_x = (2.0 * sx / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height);
    let inv = (camera.projection_matrix() * camera.view_matrix()).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let target: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (target - ro).normalize();
    (ro, rd)
}
