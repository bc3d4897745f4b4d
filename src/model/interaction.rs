use log::debug;
use nalgebra::{Point3, Vector3};

use super::orrery::Orrery;
use super::registry::BodyID;
use crate::config::ViewerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

/// Where a body stands with respect to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Hovered,
    Focused,
}

/// What the camera should end up looking at during a fly-to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookTarget {
    Body(BodyID),
    Point(Point3<f32>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Point3<f32>,
    pub look_at: Point3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flight {
    eye_target: Point3<f32>,
    look_target: LookTarget,
    initial_distance: f32,
}

/// Hover, focus and fly-to state. Owned by whoever runs the frame loop, and
/// handed explicitly to pointer handlers and to the per-frame camera update.
#[derive(Debug, Clone)]
pub struct InteractionState {
    hovered: Option<BodyID>,
    focused: Option<BodyID>,
    flight: Option<Flight>,
    blend: f32,
    cursor: Cursor,
    panel: Option<BodyID>,
}

impl Default for InteractionState {
    fn default() -> Self {
        InteractionState::new()
    }
}

impl InteractionState {
    pub fn new() -> Self {
        InteractionState {
            hovered: None,
            focused: None,
            flight: None,
            blend: 1.0,
            cursor: Cursor::Default,
            panel: None,
        }
    }

    pub fn hovered(&self) -> Option<BodyID> {
        self.hovered
    }

    pub fn focused(&self) -> Option<BodyID> {
        self.focused
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn camera_target(&self) -> Option<Point3<f32>> {
        self.flight.map(|f| f.eye_target)
    }

    pub fn look_target(&self) -> Option<LookTarget> {
        self.flight.map(|f| f.look_target)
    }

    /// Body whose details the info panel shows, if the panel is open.
    pub fn panel(&self) -> Option<BodyID> {
        self.panel
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some() && self.blend < 1.0
    }

    pub fn selection(&self, id: BodyID) -> Selection {
        if self.focused == Some(id) {
            Selection::Focused
        } else if self.hovered == Some(id) {
            Selection::Hovered
        } else {
            Selection::Idle
        }
    }

    /// `hit` is the body under the pointer, if any.
    pub fn on_pointer_move(&mut self, hit: Option<BodyID>) {
        self.hovered = hit;
        self.cursor = match hit {
            Some(_) => Cursor::Pointer,
            None => Cursor::Default,
        };
    }

    /// A click that landed on `hit` (or on empty space). On a body, the camera
    /// starts flying to a spot behind it, along the current view axis.
    pub fn on_click(
        &mut self,
        hit: Option<BodyID>,
        orrery: &Orrery,
        camera: &CameraPose,
        config: &ViewerConfig,
    ) {
        let focus = hit.and_then(|id| {
            let body = orrery.get_body(id)?;
            let position = orrery.position(id)?;
            Some((id, body.info.radius, position))
        });

        match focus {
            Some((id, radius, position)) => {
                // Back away from the body towards where the camera already is
                let view_axis = camera.eye - position;
                let direction = view_axis
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::z);
                let eye_target = position + direction * config.focus_distance(radius);

                debug!("Focusing on {}", body_name(orrery, id));
                self.focused = Some(id);
                self.panel = Some(id);
                self.start_flight(camera, eye_target, LookTarget::Body(id), config);
            }
            None => {
                if let Some(id) = self.focused {
                    debug!("Dropped focus on {}", body_name(orrery, id));
                }
                self.focused = None;
                self.flight = None;
                self.panel = None;
            }
        }
    }

    /// Sends the camera back to its default framing, looking at the sun.
    pub fn reset(&mut self, camera: &CameraPose, config: &ViewerConfig) {
        self.focused = None;
        self.panel = None;
        self.start_flight(
            camera,
            config.default_eye,
            LookTarget::Point(Point3::origin()),
            config,
        );
    }

    pub fn hide_panel(&mut self) {
        self.panel = None;
    }

    fn start_flight(
        &mut self,
        camera: &CameraPose,
        eye_target: Point3<f32>,
        look_target: LookTarget,
        config: &ViewerConfig,
    ) {
        let initial_distance = (eye_target - camera.eye).norm();
        self.flight = Some(Flight {
            eye_target,
            look_target,
            initial_distance,
        });
        self.blend = 0.0;
        if initial_distance < config.completion_epsilon {
            self.blend = 1.0;
        }
    }

    /// Moves the camera one frame along its fly-to, if there is one. Both the
    /// eye and the look-at point close a fixed fraction of their remaining
    /// distance. `blend` is the fraction of the eye's trip completed so far;
    /// once the eye is within `completion_epsilon` of its target it snaps into
    /// place, `blend` becomes 1, and this stops returning new poses.
    pub fn step_camera(
        &mut self,
        camera: &CameraPose,
        orrery: &Orrery,
        config: &ViewerConfig,
    ) -> Option<CameraPose> {
        if !self.is_flying() {
            return None;
        }
        let flight = self.flight?;

        let look_goal = match flight.look_target {
            LookTarget::Body(id) => orrery.position(id).unwrap_or(camera.look_at),
            LookTarget::Point(p) => p,
        };

        let f = config.lerp_fraction;
        let mut eye = camera.eye + (flight.eye_target - camera.eye) * f;
        let look_at = camera.look_at + (look_goal - camera.look_at) * f;

        let remaining = (flight.eye_target - eye).norm();
        if remaining < config.completion_epsilon {
            eye = flight.eye_target;
            self.blend = 1.0;
        } else {
            let progress = 1.0 - remaining / flight.initial_distance;
            self.blend = nalgebra::clamp(progress, self.blend, 1.0);
        }

        Some(CameraPose { eye, look_at })
    }
}

fn body_name(orrery: &Orrery, id: BodyID) -> String {
    orrery
        .get_body(id)
        .map(|b| b.info.name.clone())
        .unwrap_or_else(|| format!("{:?}", id))
}
