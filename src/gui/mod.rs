use std::path::Path;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::session::Session;
use self::view::{SceneObject, View};
use crate::assets::TextureLoader;
use crate::config::ViewerConfig;
use crate::consts::SUN_TEXTURE;
use crate::model::Orrery;

pub mod camera;
pub mod controller;
pub mod overlay;
pub mod pointer;
mod renderers;
pub mod session;
mod view;

pub struct Simulation {
    session: Session,
    view: View,
    textures: TextureLoader<SceneObject>,
}

impl Simulation {
    pub fn new(orrery: Orrery, config: ViewerConfig, paused: bool, window: &mut Window) -> Self {
        let view = View::new(window, &orrery, &config);

        let mut textures = TextureLoader::new();
        textures.request(SceneObject::Sun, Path::new(SUN_TEXTURE));
        for body in orrery.bodies() {
            if let Some(path) = &body.info.texture {
                textures.request(SceneObject::Body(body.id), path);
            }
        }

        let mut session = Session::new(orrery, config, paused);
        session
            .camera_mut()
            .set_viewport(window.width(), window.height());

        Self {
            session,
            view,
            textures,
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.session.process_event(&event.value);
        }
    }

    fn apply_finished_textures(&mut self) {
        for texture in self.textures.poll() {
            self.view.apply_texture(texture);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(self.session.camera_mut()),
            None,
            Some(self.view.renderer_mut()),
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.apply_finished_textures();
        if self.session.advance_frame() {
            self.view.update_scene_objects(self.session.orrery());
        }

        let session = &self.session;
        self.view.prerender_scene(
            window,
            session.camera(),
            session.orrery(),
            session.interaction(),
            session.controller(),
        );
        self.session.controller_mut().increment_frame_counter();
    }
}
