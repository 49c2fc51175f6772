// Attack hitboxes and pose-dependent hurtboxes

use glam::Vec2;

use crate::engine::physics::Aabb;

use super::character::CharacterId;
use super::state::Facing;

/// Box geometry relative to a character's feet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub width: f32,
    pub height: f32,
    /// Horizontal offset of the box center, positive = in front when facing right
    pub offset_x: f32,
    /// Height of the box center above the feet
    pub offset_y: f32,
}

impl BoxShape {
    pub const fn new(width: f32, height: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    /// World-space box; `direction` mirrors the horizontal offset
    pub fn aabb(&self, feet: Vec2, direction: f32) -> Aabb {
        Aabb::from_center_size(
            feet + Vec2::new(self.offset_x * direction, self.offset_y),
            Vec2::new(self.width, self.height),
        )
    }
}

/// What an attack does when its box connects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxSpec {
    pub shape: BoxShape,
    pub damage: f32,
    /// Sends the victim into the knockdown sequence instead of a get-hit
    pub knockdown: bool,
}

impl HitboxSpec {
    pub const fn new(shape: BoxShape, damage: f32, knockdown: bool) -> Self {
        Self {
            shape,
            damage,
            knockdown,
        }
    }
}

/// One live activation of an attack hitbox
#[derive(Debug, Clone, PartialEq)]
pub struct HitboxState {
    spec: HitboxSpec,
    facing: Facing,
    remaining: f32,
    struck: Vec<CharacterId>,
}

impl HitboxState {
    /// Activate `spec` facing `facing` for `lifetime` seconds
    pub fn new(spec: HitboxSpec, facing: Facing, lifetime: f32) -> Self {
        Self {
            spec,
            facing,
            remaining: lifetime,
            struck: Vec::new(),
        }
    }

    pub fn spec(&self) -> &HitboxSpec {
        &self.spec
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Tick the lifetime; returns false once the hitbox has expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }

    /// World-space box for a character standing at `feet`
    pub fn aabb(&self, feet: Vec2) -> Aabb {
        self.spec.shape.aabb(feet, self.facing.sign())
    }

    pub fn has_struck(&self, victim: CharacterId) -> bool {
        self.struck.contains(&victim)
    }

    /// Remember a victim; false if it was already struck by this activation
    pub fn register_hit(&mut self, victim: CharacterId) -> bool {
        if self.has_struck(victim) {
            return false;
        }
        self.struck.push(victim);
        true
    }
}

/// Which hurtbox profile a pose uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HurtboxPose {
    Default,
    FacingLeft,
    FacingRight,
    Crouch,
}

impl HurtboxPose {
    /// Sitting and rolling share the low profile; the facing-specific
    /// profiles cover climbing, where the sprite leans toward the ladder
    pub fn select(crouched: bool, leaning: bool, facing: Facing) -> Self {
        if crouched {
            Self::Crouch
        } else if leaning {
            match facing {
                Facing::Left => Self::FacingLeft,
                Facing::Right => Self::FacingRight,
            }
        } else {
            Self::Default
        }
    }
}

/// Per-character hurtbox shapes, one per pose
#[derive(Debug, Clone, PartialEq)]
pub struct HurtboxProfiles {
    pub default: BoxShape,
    pub facing_left: BoxShape,
    pub facing_right: BoxShape,
    pub crouch: BoxShape,
}

impl HurtboxProfiles {
    /// Profiles derived from a body of `width` x `height`
    pub fn for_body(width: f32, height: f32) -> Self {
        let lean = width * 0.15;
        let low = height * 0.6;
        Self {
            default: BoxShape::new(width * 0.85, height * 0.95, 0.0, height * 0.475),
            facing_left: BoxShape::new(width * 0.85, low, -lean, low * 0.5),
            facing_right: BoxShape::new(width * 0.85, low, lean, low * 0.5),
            crouch: BoxShape::new(width * 0.9, low, 0.0, low * 0.5),
        }
    }

    pub fn shape(&self, pose: HurtboxPose) -> &BoxShape {
        match pose {
            HurtboxPose::Default => &self.default,
            HurtboxPose::FacingLeft => &self.facing_left,
            HurtboxPose::FacingRight => &self.facing_right,
            HurtboxPose::Crouch => &self.crouch,
        }
    }

    /// Profiles already encode their side, so no mirroring here
    pub fn aabb(&self, pose: HurtboxPose, feet: Vec2) -> Aabb {
        self.shape(pose).aabb(feet, 1.0)
    }
}
