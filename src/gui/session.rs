use kiss3d::camera::Camera;
use kiss3d::event::{Action, MouseButton, WindowEvent};
use log::info;
use nalgebra::Point2;

use super::camera::OrbitCamera;
use super::controller::{Command, Controller};
use super::overlay::panel_rect;
use super::pointer::{PointerEvent, PointerTracker};
use crate::config::ViewerConfig;
use crate::math::ray::{normalize_pointer, pick_nearest, Ray};
use crate::model::{BodyID, FrameClock, InteractionState, Orrery};

/// All the interactive state of the viewer, minus anything that needs a GL
/// context. Window events go in through `process_event`, and `advance_frame`
/// runs once per frame.
pub struct Session {
    orrery: Orrery,
    interaction: InteractionState,
    controller: Controller,
    pointer: PointerTracker,
    clock: FrameClock,
    camera: OrbitCamera,
    config: ViewerConfig,
}

impl Session {
    pub fn new(orrery: Orrery, config: ViewerConfig, paused: bool) -> Self {
        let clock = FrameClock::new(config.time_mode, config.base_rate);
        info!(
            "Starting with {} bodies ({}, {:?} stepping)",
            orrery.registry().len(),
            if paused { "paused" } else { "running" },
            clock.mode()
        );

        Session {
            orrery,
            interaction: InteractionState::new(),
            controller: Controller::new(paused),
            pointer: PointerTracker::new(),
            clock,
            camera: OrbitCamera::new(&config),
            config,
        }
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Pointer events go to hover/click handling, keys to the controller.
    /// Camera motion (drags, scroll) is the camera's own business; kiss3d
    /// hands it the same events separately.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                if let PointerEvent::Move(pos) = self.pointer.cursor_moved(x as f32, y as f32) {
                    // Mid-drag the camera owns the pointer
                    if !self.pointer.is_dragging() {
                        let hit = self.pick(&pos);
                        self.interaction.on_pointer_move(hit);
                    }
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.pointer.button_pressed();
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                if let Some(PointerEvent::Click(pos)) = self.pointer.button_released() {
                    self.on_click(&pos);
                }
            }
            _ => {
                if let Some(command) = self.controller.process_event(event) {
                    self.run_command(command);
                }
            }
        }
    }

    fn on_click(&mut self, pos: &Point2<f32>) {
        let height = self.camera.height() as f32;
        if self.interaction.panel().is_some() && panel_rect(height).contains(pos) {
            self.interaction.hide_panel();
            return;
        }

        let hit = self.pick(pos);
        let pose = self.camera.pose();
        self.interaction
            .on_click(hit, &self.orrery, &pose, &self.config);
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::ResetCamera => {
                info!("Resetting camera");
                let pose = self.camera.pose();
                self.interaction.reset(&pose, &self.config);
            }
            Command::ScaleSpeed(factor) => {
                let focused = self.interaction.focused();
                self.orrery.scale_speed(focused, factor);
            }
            Command::HidePanel => self.interaction.hide_panel(),
        }
    }

    /// The body under the given cursor position, if any. The sun isn't
    /// pickable.
    pub fn pick(&self, pos: &Point2<f32>) -> Option<BodyID> {
        let camera = &self.camera;
        let ndc = normalize_pointer(pos, camera.width() as f32, camera.height() as f32);
        let ray = Ray::from_ndc(&ndc, &camera.inverse_transformation())?;

        let spheres = self
            .orrery
            .positions()
            .map(|(body, position)| (body.id, position, body.info.radius));
        pick_nearest(&ray, spheres).map(|(id, _)| id)
    }

    /// Ticks the orrery and moves the camera along its fly-to. Does nothing
    /// while paused; returns whether anything moved.
    pub fn advance_frame(&mut self) -> bool {
        if self.controller.is_paused() {
            // Otherwise the first frame after resuming makes up for the pause
            self.clock.restart();
            return false;
        }

        self.orrery.advance(self.clock.steps_for_frame());

        let pose = self.camera.pose();
        if let Some(pose) = self
            .interaction
            .step_camera(&pose, &self.orrery, &self.config)
        {
            self.camera.set_pose(&pose);
        }
        true
    }
}
