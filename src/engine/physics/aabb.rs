// Axis-aligned bounding boxes and the collision tests built on them

use glam::Vec2;

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a box from a center point and a full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create a box standing on `feet`: horizontally centered, extending upward
    pub fn from_feet(feet: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(feet.x - size.x * 0.5, feet.y),
            max: Vec2::new(feet.x + size.x * 0.5, feet.y + size.y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Top edge (largest y)
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Move the box by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Strict interval overlap on the x axis (touching edges don't count)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x
    }

    /// Strict interval overlap on the y axis (touching edges don't count)
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && other.min.y < self.max.y
    }

    /// Strict overlap on both axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Penetration depth along each axis; non-positive components mean no overlap
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
        )
    }
}

/// Combat and contact test between an attacker's hitbox and a target's hurtbox.
///
/// Also used with platform/wall rectangles in place of the hurtbox.
pub fn check_collision(attacker: &Aabb, target: &Aabb) -> bool {
    attacker.intersects(target)
}

/// Axis chosen to push a body out of a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAxis {
    Horizontal,
    Vertical,
}

/// Result of resolving a body against a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub axis: ResolveAxis,
    /// Translation to apply to the body to clear the wall
    pub correction: Vec2,
}

/// Resolve an overlapping `body` out of `wall` along the axis of minimum
/// penetration.
///
/// Equal penetrations are broken by `movement`: a predominantly horizontal
/// move resolves horizontally, otherwise vertically.
pub fn resolve_wall(body: &Aabb, wall: &Aabb, movement: Vec2) -> Option<WallContact> {
    if !body.intersects(wall) {
        return None;
    }

    let depth = body.penetration(wall);
    let horizontal = if depth.x == depth.y {
        movement.x.abs() >= movement.y.abs()
    } else {
        depth.x < depth.y
    };

    let body_center = body.center();
    let wall_center = wall.center();

    let contact = if horizontal {
        let push = if body_center.x < wall_center.x {
            wall.min.x - body.max.x
        } else {
            wall.max.x - body.min.x
        };
        WallContact {
            axis: ResolveAxis::Horizontal,
            correction: Vec2::new(push, 0.0),
        }
    } else {
        let push = if body_center.y < wall_center.y {
            wall.min.y - body.max.y
        } else {
            wall.max.y - body.min.y
        };
        WallContact {
            axis: ResolveAxis::Vertical,
            correction: Vec2::new(0.0, push),
        }
    };

    Some(contact)
}
