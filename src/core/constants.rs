use glam::Vec3;

// Shared scene-layout and look constants used by the web frontend.

// Subject placement and interaction
pub const SUBJECT_CENTER: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const SUBJECT_PICK_RADIUS: f32 = 3.2; // ray-sphere radius for click tests

// Underwater atmosphere (#051829)
pub const FOG_COLOR: [f32; 3] = [0.0196, 0.094, 0.161];
pub const FOG_NEAR: f32 = 0.0;
pub const FOG_FAR: f32 = 35.0;

// Sun-from-above key light
pub const LIGHT_DIR: Vec3 = Vec3::new(-5.0, -10.0, -5.0); // normalized in shader
pub const LIGHT_COLOR: [f32; 3] = [0.502, 0.878, 1.0]; // #80e0ff
pub const LIGHT_INTENSITY: f32 = 2.0;
pub const AMBIENT_INTENSITY: f32 = 0.5;

// God-ray rigs: rest position, color, size factor, beam strength, phase delay.
#[derive(Clone, Copy, Debug)]
pub struct RayRig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
    pub intensity: f32,
    pub delay: f32,
}

pub const RAY_RIGS: [RayRig; 4] = [
    RayRig { position: [0.0, 50.0, 0.0], color: [1.0, 1.0, 1.0], size: 1.5, intensity: 0.9, delay: 0.0 },
    RayRig { position: [-15.0, 45.0, 5.0], color: [0.0, 1.0, 1.0], size: 1.2, intensity: 0.7, delay: 2.0 },
    RayRig { position: [15.0, 45.0, -5.0], color: [0.0, 0.667, 1.0], size: 1.3, intensity: 0.7, delay: 5.0 },
    RayRig { position: [0.0, 48.0, -15.0], color: [0.667, 0.867, 1.0], size: 1.0, intensity: 0.5, delay: 3.5 },
];

// Messages cycled by clicking the subject.
pub const SUBJECT_MESSAGES: [&str; 3] = [
    "A humpback's song can carry for miles through open water.",
    "She surfaces every few minutes, even in her sleep.",
    "The pale patches along her flank are unique, like fingerprints.",
];
