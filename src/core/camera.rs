use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Cinematic orbit: a bounded azimuthal sweep with no manual control.
///
/// `azimuth` is a pure function of elapsed time, so replaying a time
/// sequence reproduces the identical camera path.
#[derive(Clone, Debug)]
pub struct OrbitConfig {
    /// Sweep amplitude in radians; azimuth stays in [-amplitude, amplitude].
    pub amplitude: f32,
    /// Angular rate in rad/s.
    pub angular_rate: f32,
    /// Orbit distance from the target.
    pub radius: f32,
    pub target: Vec3,
    /// Polar angle is pinned to this band around the equator so the
    /// composition never tips too far up or down.
    pub polar_min: f32,
    pub polar_max: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.3,
            angular_rate: 0.2,
            radius: 10.2,
            target: Vec3::ZERO,
            polar_min: std::f32::consts::FRAC_PI_2 - 0.3,
            polar_max: std::f32::consts::FRAC_PI_2 + 0.3,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct OrbitOscillator {
    config: OrbitConfig,
}

impl OrbitOscillator {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Forced azimuthal angle at the given elapsed time.
    #[inline]
    pub fn azimuth(&self, elapsed_sec: f64) -> f32 {
        self.config.amplitude * (elapsed_sec as f32 * self.config.angular_rate).sin()
    }

    /// Polar angle after the composition clamp. The rig itself holds the
    /// equator; the clamp is the guard rail for any future vertical drift.
    #[inline]
    pub fn polar(&self) -> f32 {
        std::f32::consts::FRAC_PI_2.clamp(self.config.polar_min, self.config.polar_max)
    }

    /// Eye position on the orbit for the given elapsed time.
    pub fn eye(&self, elapsed_sec: f64) -> Vec3 {
        let az = self.azimuth(elapsed_sec);
        let polar = self.polar();
        let r = self.config.radius;
        self.config.target
            + Vec3::new(
                r * polar.sin() * az.sin(),
                r * polar.cos(),
                r * polar.sin() * az.cos(),
            )
    }

    /// Full camera state for the frame.
    pub fn camera(&self, elapsed_sec: f64, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(elapsed_sec),
            target: self.config.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: self.config.fovy_radians,
            znear: self.config.znear,
            zfar: self.config.zfar,
        }
    }
}
