use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, PointRenderer, Renderer};
use nalgebra::Point3;

use self::halo_renderer::HaloRenderer;

mod halo_renderer;
mod utils;

pub use utils::orbit_circle;

/// Everything drawn with lines and points rather than scene nodes. Nothing is
/// retained between frames, so the view re-queues the whole lot every frame.
pub struct CompoundRenderer {
    halo_renderer: HaloRenderer,
    line_renderer: LineRenderer,
    point_renderer: PointRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            halo_renderer: HaloRenderer::new(),
            line_renderer: LineRenderer::new(),
            point_renderer: PointRenderer::new(),
        }
    }

    pub fn draw_orbit(&mut self, path: &[Point3<f32>], color: Point3<f32>) {
        utils::draw_path(&mut self.line_renderer, path.iter().copied(), &color);
    }

    pub fn draw_stars(&mut self, stars: &[Point3<f32>], color: Point3<f32>) {
        for star in stars {
            self.point_renderer.draw_point(*star, color);
        }
    }

    pub fn draw_halo(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.halo_renderer.add_halo(center, radius, color);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.point_renderer.render(pass, camera);
        self.line_renderer.render(pass, camera);
        self.halo_renderer.render(pass, camera);
    }
}
