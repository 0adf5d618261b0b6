pub mod camera;
pub mod clock;
pub mod constants;
pub mod cookie;
pub mod materials;
pub mod message;
pub mod motion;
pub mod particles;

pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use cookie::*;
pub use materials::*;
pub use message::*;
pub use motion::*;
pub use particles::*;

// Shaders bundled as string constants
pub static SUBJECT_WGSL: &str = include_str!("../../shaders/subject.wgsl");
pub static CAUSTIC_WGSL: &str = include_str!("../../shaders/caustic.wgsl");
pub static POINTS_WGSL: &str = include_str!("../../shaders/points.wgsl");
pub static RAYS_WGSL: &str = include_str!("../../shaders/rays.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
