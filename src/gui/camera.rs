use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

use crate::config::ViewerConfig;
use crate::model::CameraPose;

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// Anything left over in the damped motion below this is dropped
const MOTION_EPSILON: f32 = 1e-6;

// Free-orbit camera, in the spirit of ArcBall: drag with the left button to
// orbit, drag with the right button to pan, scroll to zoom. Unlike ArcBall,
// user motion isn't applied immediately; it's accumulated and then fed in a
// bit at a time by `update`, which gives the camera some inertia.
//
// The camera sits on a sphere around `target`, and uses the y-axis as up.
// The fly-to logic bypasses all of that and just calls `set_pose`.
pub struct OrbitCamera {
    // -- position --
    target: Point3<f32>,
    theta: f32,  // azimuthal angle, measured from +z towards +x
    phi: f32,    // polar angle, measured from +y
    radius: f32, // distance from target
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- pending (damped) motion --
    pending_rotation: Vector2<f32>,
    pending_pan: Vector3<f32>,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    pan_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
    damping: f32,
}

impl OrbitCamera {
    pub fn new(config: &ViewerConfig) -> Self {
        let mut camera = OrbitCamera {
            target: Point3::origin(),
            theta: 0.0,
            phi: PI / 2.0,
            radius: 1.0,
            width: 800,
            height: 600,
            fovy: config.fovy,
            znear: 0.1,
            // Far enough to see the stars in the corners of the cube
            zfar: config.star_extent * 2.0,
            pending_rotation: Vector2::zeros(),
            pending_pan: Vector3::zeros(),
            last_cursor_pos: Vector2::zeros(),
            theta_step: 0.005,
            phi_step: 0.005,
            pan_step: 0.002,
            scroll_ratio: 1.1,
            phi_limit: 0.001,
            radius_limits: (config.min_distance, config.max_distance),
            damping: config.damping,
        };
        camera.set_pose(&CameraPose {
            eye: config.default_eye,
            look_at: Point3::origin(),
        });
        camera
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye(),
            look_at: self.target,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        // Minimized windows report 0x0
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Puts the eye and target exactly where asked, dropping any motion still
    /// queued up from the user. Distance limits only apply to user zooming.
    pub fn set_pose(&mut self, pose: &CameraPose) {
        let offset = pose.eye - pose.look_at;
        self.target = pose.look_at;
        self.radius = offset.norm().max(MOTION_EPSILON);
        self.theta = offset.x.atan2(offset.z);
        self.phi = nalgebra::clamp(
            (offset.y / self.radius).acos(),
            self.phi_limit,
            PI - self.phi_limit,
        );
        self.pending_rotation = Vector2::zeros();
        self.pending_pan = Vector3::zeros();
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// Queues up rotation, to be applied gradually by `update`.
    pub fn nudge_rotation(&mut self, dtheta: f32, dphi: f32) {
        self.pending_rotation += Vector2::new(dtheta, dphi);
    }

    /// Queues up a pan by `dx`, `dy` pixels of cursor motion.
    pub fn nudge_pan(&mut self, dx: f32, dy: f32) {
        let (right, up) = self.screen_axes();
        let scale = self.radius * self.pan_step;
        self.pending_pan += (-right * dx + up * dy) * scale;
    }

    pub fn has_pending_motion(&self) -> bool {
        self.pending_rotation.norm() > MOTION_EPSILON || self.pending_pan.norm() > MOTION_EPSILON
    }

    /// Applies one frame's worth of the queued motion. Each frame takes
    /// `damping` of what's left, so motion tails off smoothly.
    pub fn apply_damping(&mut self) {
        let rotation = self.pending_rotation * self.damping;
        self.rotate(rotation.x, rotation.y);
        self.pending_rotation -= rotation;

        let pan = self.pending_pan * self.damping;
        self.target += pan;
        self.pending_pan -= pan;

        if !self.has_pending_motion() {
            self.pending_rotation = Vector2::zeros();
            self.pending_pan = Vector3::zeros();
        }
    }

    // World-space directions of the screen's x and y axes
    fn screen_axes(&self) -> (Vector3<f32>, Vector3<f32>) {
        let inverse = self.view_transform().inverse();
        (
            inverse.transform_vector(&Vector3::x()),
            inverse.transform_vector(&Vector3::y()),
        )
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    self.nudge_rotation(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
                } else if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.nudge_pan(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => self.set_viewport(w, h),
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.nudge_rotation(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.nudge_rotation(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.nudge_rotation(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.nudge_rotation(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(KEY_ZOOM_STEP.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.target
            + Vector3::new(
                self.radius * self.phi.sin() * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * self.phi.sin() * self.theta.cos(),
            )
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {
        self.apply_damping();
    }

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_starts_at_default_eye() {
        let camera = OrbitCamera::new(&ViewerConfig::default());
        assert_relative_eq!(camera.eye(), Point3::new(0.0, 0.0, 60.0), epsilon = 1e-4);
        assert_relative_eq!(camera.target(), Point3::origin());
        assert_relative_eq!(camera.distance(), 60.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_pose_round_trips() {
        let mut camera = OrbitCamera::new(&ViewerConfig::default());
        let pose = CameraPose {
            eye: Point3::new(40.0, 12.0, -25.0),
            look_at: Point3::new(46.0, 0.0, 3.0),
        };
        camera.set_pose(&pose);

        assert_relative_eq!(camera.eye(), pose.eye, epsilon = 1e-3);
        assert_relative_eq!(camera.pose().look_at, pose.look_at);
    }

    #[test]
    fn test_damped_rotation() {
        let mut camera = OrbitCamera::new(&ViewerConfig::default());
        camera.nudge_rotation(1.0, 0.0);

        // First frame applies 5% of the motion
        camera.apply_damping();
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 60.0 * 0.05f32.sin(), epsilon = 1e-3);

        // And it keeps gliding, never overshooting the full amount
        for _ in 0..1000 {
            camera.apply_damping();
        }
        assert!(!camera.has_pending_motion());
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 60.0 * 1f32.sin(), epsilon = 1e-2);
        assert_relative_eq!(eye.z, 60.0 * 1f32.cos(), epsilon = 1e-2);
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut camera = OrbitCamera::new(&ViewerConfig::default());
        let before = camera.pose();
        camera.nudge_pan(-100.0, 0.0);
        for _ in 0..1000 {
            camera.apply_damping();
        }
        let after = camera.pose();

        // Dragging left slides the scene left, so the camera moves right (+x)
        let shift = after.look_at - before.look_at;
        assert!(shift.x > 0.0);
        assert_relative_eq!(shift.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(after.eye - before.eye, shift, epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_limits() {
        let mut camera = OrbitCamera::new(&ViewerConfig::default());
        for _ in 0..100 {
            camera.zoom(0.5);
        }
        assert_relative_eq!(camera.distance(), 10.0);
        for _ in 0..100 {
            camera.zoom(2.0);
        }
        assert_relative_eq!(camera.distance(), 300.0);
    }

    #[test]
    fn test_viewport_changes_aspect() {
        let mut camera = OrbitCamera::new(&ViewerConfig::default());
        let narrow = camera.transformation();
        camera.set_viewport(1600, 600);
        let wide = camera.transformation();

        // A wider window squeezes x in clip space, and leaves y alone
        assert!(wide[(0, 0)].abs() < narrow[(0, 0)].abs());
        assert_relative_eq!(wide[(1, 1)], narrow[(1, 1)]);

        camera.set_viewport(0, 0);
        assert_eq!((camera.width(), camera.height()), (1, 1));
    }
}
