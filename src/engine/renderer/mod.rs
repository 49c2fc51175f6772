// Render seam
//
// The character core never talks to a graphics API. It describes textured
// quads and hands them to a `RenderTarget` together with a view/projection
// provider.

mod camera;

pub use camera::Camera;

use glam::{Mat4, Vec2};

use crate::engine::assets::UvRect;

/// Supplies the camera matrices for a draw pass
pub trait ViewProjection {
    fn view(&self) -> Mat4;
    fn projection(&self) -> Mat4;

    fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Draw order of a character's sprite layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpriteLayer {
    Body,
    Overlay,
}

/// One textured quad to draw
#[derive(Debug, Clone, PartialEq)]
pub struct QuadDraw {
    /// Name of the sprite sheet texture
    pub sheet: String,
    pub layer: SpriteLayer,
    /// World position of the quad's anchor (feet for bodies)
    pub position: Vec2,
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub uv: UvRect,
}

/// Anything that can put textured quads on screen
pub trait RenderTarget {
    fn draw_quad(&mut self, quad: &QuadDraw, camera: &dyn ViewProjection);
}

/// Render target that keeps every quad it was given, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub quads: Vec<QuadDraw>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn draw_quad(&mut self, quad: &QuadDraw, _camera: &dyn ViewProjection) {
        self.quads.push(quad.clone());
    }
}
