use nalgebra::Point3;

/// How far the orrery advances each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeMode {
    /// Every frame advances by `base_rate`, no matter how long the frame took.
    Fixed,
    /// Every frame advances by `rate_per_second` times the wall-clock time
    /// since the previous frame.
    RealTime { rate_per_second: f32 },
}

/// All the knobs of the viewer in one place. The defaults reproduce the
/// original look and feel; `main` overrides a few of them from the command
/// line.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    // -- animation --
    pub base_rate: f32,
    pub spin_rate: f32,
    pub sun_spin_rate: f32,
    pub time_mode: TimeMode,
    pub random_initial_angles: bool,
    pub seed: u64,
    // -- camera --
    pub default_eye: Point3<f32>,
    pub fovy: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
    pub lerp_fraction: f32,
    pub completion_epsilon: f32,
    pub focus_distance_scale: f32,
    pub focus_distance_offset: f32,
    // -- scene --
    pub sun_radius: f32,
    pub star_count: usize,
    pub star_extent: f32,
    pub orbit_segments: usize,
}

impl ViewerConfig {
    /// Switch to frame-rate independent stepping, keeping the same apparent
    /// speed as fixed stepping at 60 frames per second.
    pub fn with_real_time(mut self) -> Self {
        self.time_mode = TimeMode::RealTime {
            rate_per_second: self.base_rate * 60.0,
        };
        self
    }

    /// Distance from a body's centre at which the camera parks when the body
    /// is focused.
    pub fn focus_distance(&self, body_radius: f32) -> f32 {
        body_radius * self.focus_distance_scale + self.focus_distance_offset
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            base_rate: 0.001,
            spin_rate: 0.01,
            sun_spin_rate: 0.001,
            time_mode: TimeMode::Fixed,
            random_initial_angles: true,
            seed: 0,
            default_eye: Point3::new(0.0, 0.0, 60.0),
            fovy: 75f32.to_radians(),
            min_distance: 10.0,
            max_distance: 300.0,
            damping: 0.05,
            lerp_fraction: 0.08,
            completion_epsilon: 0.01,
            focus_distance_scale: 6.0,
            focus_distance_offset: 10.0,
            sun_radius: 15.0,
            star_count: 10_000,
            star_extent: 2000.0,
            orbit_segments: 128,
        }
    }
}
