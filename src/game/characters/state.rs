// Movement state, facing and the timed sequences that take over a character

use std::f32::consts::PI;

use glam::Vec2;

use crate::core::math::lerp;

use super::stats::CharacterStats;

/// Exactly one of these holds for a character at any instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    #[default]
    Idle,
    MoveLeft,
    MoveRight,
    Die,
}

impl MovementState {
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::MoveLeft | Self::MoveRight)
    }
}

/// Which way the character looks; sprites are authored facing right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn is_left(&self) -> bool {
        *self == Self::Left
    }

    /// Facing for a horizontal intent, `None` when there is none
    pub fn from_direction(direction: f32) -> Option<Self> {
        if direction < 0.0 {
            Some(Self::Left)
        } else if direction > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Phase of the knockdown / death timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathPhase {
    /// Thrown along an arc away from the attacker
    Knockdown,
    /// Lying on the ground
    Prone,
    /// Timeline over
    Recovered,
}

/// Three-phase knockdown timeline triggered by a defeat.
///
/// Position is a pure function of elapsed time, so identical `dt` sequences
/// give bit-identical paths.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathSequence {
    elapsed: f32,
    origin: Vec2,
    /// +1 / -1: the attacker's facing
    direction: f32,
    /// Horizontal room before a wall stops the slide
    reach: f32,
    lethal: bool,
}

impl DeathSequence {
    pub fn new(origin: Vec2, attacker_facing: Facing, lethal: bool) -> Self {
        Self {
            elapsed: 0.0,
            origin,
            direction: attacker_facing.sign(),
            reach: f32::INFINITY,
            lethal,
        }
    }

    /// Cap the horizontal travel, e.g. at the nearest wall
    pub fn with_reach(mut self, reach: f32) -> Self {
        self.reach = reach.max(0.0);
        self
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_lethal(&self) -> bool {
        self.lethal
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn phase(&self, stats: &CharacterStats) -> DeathPhase {
        if self.elapsed < stats.knockdown_duration {
            DeathPhase::Knockdown
        } else if self.elapsed < stats.recover_at {
            DeathPhase::Prone
        } else {
            DeathPhase::Recovered
        }
    }

    /// Where the body is at the current point of the timeline
    pub fn position(&self, stats: &CharacterStats) -> Vec2 {
        let landing = Vec2::new(
            self.origin.x + self.direction * stats.knockdown_distance.min(self.reach),
            self.origin.y,
        );
        if self.elapsed >= stats.knockdown_duration {
            return landing;
        }

        let progress = self.elapsed / stats.knockdown_duration;
        Vec2::new(
            lerp(self.origin.x, landing.x, progress),
            self.origin.y + stats.knockdown_height * (PI * progress).sin(),
        )
    }
}

/// Phase of the forced hard-landing recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardLandingPhase {
    Impact,
    Recover,
}

/// Two-phase lockout after landing from a long fall
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HardLanding {
    elapsed: f32,
}

impl HardLanding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance; `None` once the sequence is over
    pub fn advance(&mut self, dt: f32, stats: &CharacterStats) -> Option<HardLandingPhase> {
        self.elapsed += dt;
        self.phase(stats)
    }

    pub fn phase(&self, stats: &CharacterStats) -> Option<HardLandingPhase> {
        if self.elapsed < stats.hard_landing_impact {
            Some(HardLandingPhase::Impact)
        } else if self.elapsed < stats.hard_landing_impact + stats.hard_landing_recover {
            Some(HardLandingPhase::Recover)
        } else {
            None
        }
    }
}
