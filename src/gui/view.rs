use std::collections::HashMap;

use kiss3d::camera::Camera;
use kiss3d::resource::TextureManager;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use log::info;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::camera::OrbitCamera;
use super::controller::{help_text, Controller};
use super::overlay::{layout_labels, panel_rect, panel_text};
use super::renderers::{orbit_circle, CompoundRenderer};
use crate::assets::LoadedTexture;
use crate::config::ViewerConfig;
use crate::model::starfield::generate_stars;
use crate::model::{Body, BodyID, InteractionState, Orrery};

// Colours as RGB in [0, 1]; see `rgb`
const STAR_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const SUN_COLOR: [f32; 3] = [1.0, 0.8, 0.3];
const HOVER_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const FOCUS_COLOR: [f32; 3] = [1.0, 0.85, 0.2];
const TEXT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

const HALO_SCALE: f32 = 1.5;
const LABEL_TEXT_SIZE: f32 = 36.0;
const HUD_TEXT_SIZE: f32 = 40.0;
// Text is positioned at twice the pixel coordinates the cursor reports. No
// idea why, but there it is.
const TEXT_COORD_SCALE: f32 = 2.0;

/// Anything in the scene that can carry a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    Sun,
    Body(BodyID),
}

fn rgb(color: [f32; 3]) -> Point3<f32> {
    Point3::from(color)
}

/// Everything that needs a GL context: scene nodes, and the lines, points and
/// text queued up every frame. The camera lives with the rest of the
/// interactive state, in `Session`.
pub struct View {
    sun: SceneNode,
    body_nodes: HashMap<BodyID, SceneNode>,
    orbit_paths: Vec<(Vec<Point3<f32>>, Point3<f32>)>,
    stars: Vec<Point3<f32>>,
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(window: &mut Window, orrery: &Orrery, config: &ViewerConfig) -> Self {
        let mut sun = window.add_sphere(config.sun_radius);
        sun.set_color(SUN_COLOR[0], SUN_COLOR[1], SUN_COLOR[2]);

        // Create objects for bodies
        let mut body_nodes = HashMap::new();
        for body in orrery.bodies() {
            let sphere = Self::create_body_object(window, body);
            body_nodes.insert(body.id, sphere);
        }

        let orbit_paths = orrery
            .bodies()
            .map(|b| {
                let path = orbit_circle(b.info.orbit_radius, config.orbit_segments);
                (path, b.info.color)
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(config.seed);
        let stars = generate_stars(&mut rng, config.star_count, config.star_extent);

        info!(
            "Built scene: sun, {} bodies, {} stars",
            body_nodes.len(),
            stars.len()
        );

        let mut view = View {
            sun,
            body_nodes,
            orbit_paths,
            stars,
            renderer: CompoundRenderer::new(),
        };
        view.update_scene_objects(orrery);
        view
    }

    fn create_body_object(window: &mut Window, body: &Body) -> SceneNode {
        // Plain colour until (and unless) the texture shows up
        let mut sphere = window.add_sphere(body.info.radius);
        let color = &body.info.color;
        sphere.set_color(color.x, color.y, color.z);
        sphere
    }

    pub fn renderer_mut(&mut self) -> &mut CompoundRenderer {
        &mut self.renderer
    }

    /// Uploads an already-decoded texture and puts it on its object.
    pub fn apply_texture(&mut self, texture: LoadedTexture<SceneObject>) {
        let node = match texture.key {
            SceneObject::Sun => Some(&mut self.sun),
            SceneObject::Body(id) => self.body_nodes.get_mut(&id),
        };
        let node = match node {
            Some(node) => node,
            None => return,
        };

        let name = texture.name;
        let mut image = Some(texture.image);
        TextureManager::get_global_manager(|tm| {
            if let Some(image) = image.take() {
                tm.add_image(image, &name);
            }
        });

        // Untinted, so the texture shows its real colours
        node.set_color(1.0, 1.0, 1.0);
        node.set_texture_with_name(&name);
    }

    pub fn update_scene_objects(&mut self, orrery: &Orrery) {
        for (body, position) in orrery.positions() {
            let node = match self.body_nodes.get_mut(&body.id) {
                Some(node) => node,
                None => continue,
            };
            let spin = orrery.get_state(body.id).map_or(0.0, |s| s.spin);
            node.set_local_translation(Translation3::from(position.coords));
            node.set_local_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), spin));
        }

        let sun_rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), orrery.sun_spin());
        self.sun.set_local_rotation(sun_rotation);
    }

    // the big boy
    pub fn prerender_scene(
        &mut self,
        window: &mut Window,
        camera: &OrbitCamera,
        orrery: &Orrery,
        interaction: &InteractionState,
        controller: &Controller,
    ) {
        // Draw a bunch of stuff
        self.renderer.draw_stars(&self.stars, rgb(STAR_COLOR));
        for (path, color) in self.orbit_paths.iter() {
            self.renderer.draw_orbit(path, *color);
        }
        self.draw_halos(orrery, interaction);

        // Draw text
        let font = Font::default();
        let text_color = rgb(TEXT_COLOR);
        let (width, height) = (camera.width() as f32, camera.height() as f32);

        let transformation = camera.transformation();
        for label in layout_labels(orrery, interaction, &transformation, width, height) {
            if !label.visible {
                continue;
            }
            window.draw_text(
                &label.text,
                &Point2::from(label.anchor.coords * TEXT_COORD_SCALE),
                LABEL_TEXT_SIZE,
                &font,
                &text_color,
            );
        }

        if let Some(body) = interaction.panel().and_then(|id| orrery.get_body(id)) {
            let rect = panel_rect(height);
            window.draw_text(
                &panel_text(body),
                &Point2::from(rect.min.coords * TEXT_COORD_SCALE),
                HUD_TEXT_SIZE,
                &font,
                &text_color,
            );
        }

        if controller.show_help() {
            window.draw_text(help_text(), &Point2::origin(), HUD_TEXT_SIZE, &font, &text_color);
        }
        window.draw_text(
            &self.status_text(orrery, interaction, controller),
            &Point2::new((width - 300.0) * TEXT_COORD_SCALE, 0.0),
            HUD_TEXT_SIZE,
            &font,
            &text_color,
        );
    }

    fn draw_halos(&mut self, orrery: &Orrery, interaction: &InteractionState) {
        let halos = [
            (interaction.hovered(), rgb(HOVER_COLOR)),
            (interaction.focused(), rgb(FOCUS_COLOR)),
        ];
        for (id, color) in halos.iter() {
            let id = match id {
                Some(id) => *id,
                None => continue,
            };
            if let (Some(body), Some(position)) = (orrery.get_body(id), orrery.position(id)) {
                self.renderer
                    .draw_halo(position, body.info.radius * HALO_SCALE, *color);
            }
        }
    }

    fn status_text(
        &self,
        orrery: &Orrery,
        interaction: &InteractionState,
        controller: &Controller,
    ) -> String {
        let focus = match interaction.focused().and_then(|id| orrery.get_body(id)) {
            Some(body) => {
                let speed = orrery.get_state(body.id).map_or(0.0, |s| s.angular_speed);
                format!("{} ({}x)", body.info.name, speed)
            }
            None => String::from("none"),
        };

        format!(
            "{}
Focus: {}
FPS: {:.0}",
            if controller.is_paused() { "Paused" } else { "Running" },
            focus,
            controller.fps(),
        )
    }
}
