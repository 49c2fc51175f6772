// Orthographic 2D camera used as the view/projection provider

use glam::{Mat4, Vec2, Vec3};

use super::ViewProjection;

/// 2D camera looking down -Z at the play field
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// Zoom level (1.0 = normal, 2.0 = zoomed in 2x)
    pub zoom: f32,
    /// Visible world height at zoom 1.0; width follows the aspect ratio
    world_height: f32,
    aspect: f32,
}

impl Camera {
    pub fn new(position: Vec2, world_height: f32, aspect: f32) -> Self {
        Self {
            position,
            zoom: 1.0,
            world_height,
            aspect,
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.1); // Prevent zoom from being too small
    }

    /// Track a new viewport size in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Half extents of the visible area in world units
    pub fn half_extents(&self) -> Vec2 {
        let half_height = self.world_height * 0.5 / self.zoom;
        Vec2::new(half_height * self.aspect, half_height)
    }

    /// Keep `target` in frame, centering horizontally
    pub fn follow(&mut self, target: Vec2) {
        self.position.x = target.x;
    }
}

impl ViewProjection for Camera {
    fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0))
    }

    fn projection(&self) -> Mat4 {
        let half = self.half_extents();
        Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -100.0, 100.0)
    }
}
