// Static level geometry: platforms, walls and ladder zones

use glam::Vec2;

use super::aabb::{resolve_wall, Aabb};

/// Axis-aligned rectangle described by its bottom-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.position + self.size)
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y
    }
}

/// Platform, wall and ladder rectangles for one level.
///
/// Populated once from level data and only read during ticks.
#[derive(Debug, Clone, Default)]
pub struct LevelGeometry {
    /// Ground height used when no platform is underneath
    pub ground_y: f32,
    platforms: Vec<Rect>,
    walls: Vec<Rect>,
    ladders: Vec<Rect>,
}

impl LevelGeometry {
    pub fn new(ground_y: f32) -> Self {
        Self {
            ground_y,
            ..Default::default()
        }
    }

    pub fn with_platform(mut self, platform: Rect) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_wall(mut self, wall: Rect) -> Self {
        self.walls.push(wall);
        self
    }

    pub fn with_ladder(mut self, ladder: Rect) -> Self {
        self.ladders.push(ladder);
        self
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    pub fn ladders(&self) -> &[Rect] {
        &self.ladders
    }

    /// Everything that can be stood on: platforms and the tops of walls
    fn surfaces(&self) -> impl Iterator<Item = &Rect> {
        self.platforms.iter().chain(self.walls.iter())
    }

    /// Find the highest platform top the body lands on this tick.
    ///
    /// `previous_feet_y` is where the feet were before integration; a landing
    /// counts when the feet crossed or ended within `epsilon` of the top while
    /// the footprint strictly overlaps the platform horizontally.
    pub fn landing_platform(
        &self,
        footprint: &Aabb,
        previous_feet_y: f32,
        feet_y: f32,
        epsilon: f32,
    ) -> Option<f32> {
        self.surfaces()
            .filter(|platform| footprint.overlaps_x(&platform.aabb()))
            .map(Rect::top)
            .filter(|&top| previous_feet_y >= top - epsilon && feet_y <= top + epsilon)
            .fold(None, |best: Option<f32>, top| {
                Some(best.map_or(top, |b| b.max(top)))
            })
    }

    /// Whether any platform with its top at `platform_y` supports the footprint
    pub fn supports(&self, footprint: &Aabb, platform_y: f32, epsilon: f32) -> bool {
        self.surfaces().any(|platform| {
            (platform.top() - platform_y).abs() <= epsilon
                && footprint.overlaps_x(&platform.aabb())
        })
    }

    /// Highest surface top at or below `feet_y` under the footprint
    pub fn surface_below(&self, footprint: &Aabb, feet_y: f32, epsilon: f32) -> Option<f32> {
        self.surfaces()
            .filter(|surface| footprint.overlaps_x(&surface.aabb()))
            .map(Rect::top)
            .filter(|&top| top <= feet_y + epsilon && top > self.ground_y)
            .fold(None, |best: Option<f32>, top| {
                Some(best.map_or(top, |b| b.max(top)))
            })
    }

    /// Push `body` out of every wall it overlaps, returning the total correction
    pub fn resolve_walls(&self, body: &Aabb, movement: Vec2) -> Vec2 {
        let mut resolved = *body;
        let mut total = Vec2::ZERO;

        for wall in &self.walls {
            if let Some(contact) = resolve_wall(&resolved, &wall.aabb(), movement) {
                resolved = resolved.translated(contact.correction);
                total += contact.correction;
            }
        }

        total
    }

    /// How far `body` can slide horizontally in `direction` (sign) before
    /// touching a wall it overlaps vertically; infinite in open space
    pub fn clearance(&self, body: &Aabb, direction: f32) -> f32 {
        self.walls
            .iter()
            .map(Rect::aabb)
            .filter(|wall| body.overlaps_y(wall) && !body.intersects(wall))
            .filter_map(|wall| {
                let gap = if direction > 0.0 {
                    wall.min.x - body.max.x
                } else {
                    body.min.x - wall.max.x
                };
                (gap >= 0.0).then_some(gap)
            })
            .fold(f32::INFINITY, f32::min)
    }

    /// First ladder zone overlapping the body
    pub fn ladder_at(&self, body: &Aabb) -> Option<Rect> {
        self.ladders
            .iter()
            .find(|ladder| body.intersects(&ladder.aabb()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn footprint_at(x: f32) -> Aabb {
        Aabb::from_feet(Vec2::new(x, 0.0), Vec2::new(0.2, 0.4))
    }

    #[test]
    fn test_empty_geometry_never_collides() {
        let level = LevelGeometry::new(0.0);
        let body = footprint_at(0.0);

        assert!(level.landing_platform(&body, 1.0, -1.0, 0.01).is_none());
        assert!(!level.supports(&body, 0.5, 0.01));
        assert_eq!(level.resolve_walls(&body, Vec2::X), Vec2::ZERO);
        assert!(level.ladder_at(&body).is_none());
    }

    #[test]
    fn test_landing_platform_requires_crossing() {
        let level = LevelGeometry::new(0.0).with_platform(Rect::new(-1.0, 0.25, 2.0, 0.25));
        let body = footprint_at(0.0);

        // Crossed the top (0.5) from above
        assert_eq!(level.landing_platform(&body, 0.55, 0.45, 0.01), Some(0.5));
        // Was already well below the top: passes through from underneath
        assert_eq!(level.landing_platform(&body, 0.3, 0.2, 0.01), None);
    }

    #[test]
    fn test_landing_picks_highest_platform() {
        let level = LevelGeometry::new(0.0)
            .with_platform(Rect::new(-1.0, 0.25, 2.0, 0.25))
            .with_platform(Rect::new(-1.0, 0.5, 2.0, 0.25));
        let body = footprint_at(0.0);

        assert_eq!(level.landing_platform(&body, 1.0, 0.0, 0.01), Some(0.75));
    }

    #[test]
    fn test_supports_requires_horizontal_overlap() {
        let level = LevelGeometry::new(0.0).with_platform(Rect::new(0.0, 0.25, 1.0, 0.25));

        assert!(level.supports(&footprint_at(0.5), 0.5, 0.001));
        // Footprint [1.1, 1.3] is past the platform's right edge
        assert!(!level.supports(&footprint_at(1.2), 0.5, 0.001));
    }

    #[test]
    fn test_resolve_walls_pushes_out() {
        let level = LevelGeometry::new(0.0).with_wall(Rect::new(1.0, 0.0, 0.5, 3.0));
        // Body spans [0.85, 1.05], 0.05 inside the wall
        let body = Aabb::from_feet(Vec2::new(0.95, 0.0), Vec2::new(0.2, 0.4));

        let correction = level.resolve_walls(&body, Vec2::new(0.05, 0.0));
        assert!((correction.x + 0.05).abs() < 1e-6);
        assert_eq!(correction.y, 0.0);
    }

    #[test]
    fn test_wall_tops_are_surfaces() {
        let level = LevelGeometry::new(0.0).with_wall(Rect::new(-1.0, 0.0, 2.0, 0.5));
        let body = footprint_at(0.0);

        assert_eq!(level.landing_platform(&body, 0.55, 0.45, 0.01), Some(0.5));
        assert!(level.supports(&body, 0.5, 0.001));
    }

    #[test]
    fn test_surface_below() {
        let level = LevelGeometry::new(0.0)
            .with_platform(Rect::new(-1.0, 0.25, 2.0, 0.25))
            .with_platform(Rect::new(-1.0, 1.0, 2.0, 0.25));
        let body = footprint_at(0.0);

        assert_eq!(level.surface_below(&body, 0.75, 0.01), Some(0.5));
        assert_eq!(level.surface_below(&body, 0.25, 0.01), None);
    }

    #[test]
    fn test_clearance_to_nearest_wall() {
        let level = LevelGeometry::new(0.0)
            .with_wall(Rect::new(0.5, 0.0, 0.2, 1.0))
            .with_wall(Rect::new(1.0, 0.0, 0.2, 1.0))
            // Too high to be in the way
            .with_wall(Rect::new(0.2, 2.0, 0.2, 1.0));
        let body = Aabb::new(Vec2::new(-0.1, 0.0), Vec2::new(0.1, 0.5));

        assert_relative_eq!(level.clearance(&body, 1.0), 0.4);
        assert_eq!(level.clearance(&body, -1.0), f32::INFINITY);
    }

    #[test]
    fn test_ladder_lookup() {
        let level = LevelGeometry::new(0.0).with_ladder(Rect::new(-0.1, 0.0, 0.2, 1.0));
        assert!(level.ladder_at(&footprint_at(0.0)).is_some());
        assert!(level.ladder_at(&footprint_at(2.0)).is_none());
    }
}
