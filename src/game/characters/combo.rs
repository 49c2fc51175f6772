// Combo resolution: three-step attack chains, kicks and get-hit reactions

use log::{debug, trace};
use rand::Rng;

use super::animation::AnimationId;
use super::hitbox::{BoxShape, HitboxSpec};

/// Steps in a full combo chain
pub const MAX_COMBO_STEP: u8 = 3;

/// Attack families; each keeps its own combo counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboFamily {
    Punch,
    Weapon,
    /// Special key in normal form
    Special,
}

/// Weapon carried for the weapon-attack family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weapon {
    #[default]
    None,
    Axe,
    Sword,
    Pipe,
}

/// Counter and timer for one family's chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboSession {
    step: u8,
    window: f32,
    completed: bool,
}

impl ComboSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press; returns the step it produced.
    ///
    /// A completed chain ignores presses until its terminal animation
    /// finishes and `reset` is called.
    pub fn press(&mut self, window: f32) -> Option<u8> {
        if self.completed || self.step >= MAX_COMBO_STEP {
            return None;
        }

        self.step += 1;
        if self.step == MAX_COMBO_STEP {
            self.completed = true;
            self.window = 0.0;
        } else {
            self.window = window;
        }
        Some(self.step)
    }

    /// Decay the window; returns true when an unfinished chain just expired
    pub fn update(&mut self, dt: f32) -> bool {
        if self.step == 0 || self.completed {
            return false;
        }
        self.window -= dt;
        if self.window <= 0.0 {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn window(&self) -> f32 {
        self.window
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_active(&self) -> bool {
        self.step > 0
    }
}

/// Animation and hitbox produced by a successful attack press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackResult {
    pub animation: AnimationId,
    pub hitbox: HitboxSpec,
}

/// Chain that currently owns the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveChain {
    family: ComboFamily,
    weapon: Weapon,
}

/// Which get-hit reaction is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetHit {
    First,
    Second,
}

impl GetHit {
    /// Pick one of the two reactions at random
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::First
        } else {
            Self::Second
        }
    }

    pub fn animation(&self) -> AnimationId {
        match self {
            Self::First => AnimationId::GetHit1,
            Self::Second => AnimationId::GetHit2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HitReaction {
    variant: GetHit,
    remaining: f32,
}

/// Per-character combo state for all families, the kick and hit stun
#[derive(Debug, Clone)]
pub struct ComboResolver {
    punch: ComboSession,
    weapon: ComboSession,
    special: ComboSession,
    active: Option<ActiveChain>,
    kicking: bool,
    hit: Option<HitReaction>,
    combo_window: f32,
}

impl ComboResolver {
    pub fn new(combo_window: f32) -> Self {
        Self {
            punch: ComboSession::new(),
            weapon: ComboSession::new(),
            special: ComboSession::new(),
            active: None,
            kicking: false,
            hit: None,
            combo_window,
        }
    }

    pub fn session(&self, family: ComboFamily) -> &ComboSession {
        match family {
            ComboFamily::Punch => &self.punch,
            ComboFamily::Weapon => &self.weapon,
            ComboFamily::Special => &self.special,
        }
    }

    fn session_mut(&mut self, family: ComboFamily) -> &mut ComboSession {
        match family {
            ComboFamily::Punch => &mut self.punch,
            ComboFamily::Weapon => &mut self.weapon,
            ComboFamily::Special => &mut self.special,
        }
    }

    /// Decay combo windows and the hit timer
    pub fn update(&mut self, dt: f32) {
        if let Some(hit) = &mut self.hit {
            hit.remaining -= dt;
            if hit.remaining <= 0.0 {
                self.hit = None;
            }
        }

        for family in [ComboFamily::Punch, ComboFamily::Weapon, ComboFamily::Special] {
            if self.session_mut(family).update(dt) {
                trace!("{:?} combo window expired", family);
                if self.active.map(|chain| chain.family) == Some(family) {
                    self.active = None;
                }
            }
        }
    }

    /// Handle an attack key press for `family`.
    ///
    /// Pressing a different family cancels the other chains first. Nothing
    /// happens while hit, while a kick plays, or on the weapon family with no
    /// weapon equipped.
    pub fn on_attack_pressed(&mut self, family: ComboFamily, weapon: Weapon) -> Option<AttackResult> {
        if self.hit.is_some() || self.kicking {
            return None;
        }
        if family == ComboFamily::Weapon && weapon == Weapon::None {
            return None;
        }

        for other in [ComboFamily::Punch, ComboFamily::Weapon, ComboFamily::Special] {
            if other != family {
                self.session_mut(other).reset();
            }
        }

        // The weapon can't change mid-chain
        let weapon = match self.active {
            Some(chain) if chain.family == family && self.session(family).is_active() => chain.weapon,
            _ => weapon,
        };

        let window = self.combo_window;
        let step = self.session_mut(family).press(window)?;
        self.active = Some(ActiveChain { family, weapon });
        debug!("{:?} combo step {}", family, step);

        Some(AttackResult {
            animation: combo_animation(family, weapon, step),
            hitbox: combo_hitbox(family, weapon, step),
        })
    }

    /// Kick: cancels every chain and plays once
    pub fn on_kick_pressed(&mut self) -> Option<AttackResult> {
        if self.hit.is_some() || self.kicking {
            return None;
        }
        self.cancel_combos();
        self.kicking = true;
        Some(AttackResult {
            animation: AnimationId::Kick,
            hitbox: KICK_HITBOX,
        })
    }

    /// A body one-shot played through
    pub fn finish_animation(&mut self, animation: AnimationId) {
        if self.kicking && animation == AnimationId::Kick {
            self.kicking = false;
        }

        if let Some(chain) = self.active {
            let session = self.session(chain.family);
            if session.is_completed()
                && animation == combo_animation(chain.family, chain.weapon, MAX_COMBO_STEP)
            {
                self.session_mut(chain.family).reset();
                self.active = None;
            }
        }
    }

    /// Drop every chain (jump, sit, roll, form change, defeat)
    pub fn cancel_combos(&mut self) {
        if self.active.is_some() {
            debug!("Combo cancelled");
        }
        self.punch.reset();
        self.weapon.reset();
        self.special.reset();
        self.active = None;
    }

    /// Drop chains and any running kick
    pub fn cancel_all(&mut self) {
        self.cancel_combos();
        self.kicking = false;
    }

    /// Enter hit stun; returns false if already stunned
    pub fn take_hit(&mut self, variant: GetHit, duration: f32) -> bool {
        if self.hit.is_some() {
            return false;
        }
        self.cancel_all();
        self.hit = Some(HitReaction {
            variant,
            remaining: duration,
        });
        true
    }

    pub fn clear_hit(&mut self) {
        self.hit = None;
    }

    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    pub fn hit_animation(&self) -> Option<AnimationId> {
        self.hit.map(|hit| hit.variant.animation())
    }

    pub fn is_kicking(&self) -> bool {
        self.kicking
    }

    /// A chain owns the body
    pub fn is_attacking(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_family(&self) -> Option<ComboFamily> {
        self.active.map(|chain| chain.family)
    }

    /// Animation of the current chain step
    pub fn current_animation(&self) -> Option<AnimationId> {
        let chain = self.active?;
        let step = self.session(chain.family).step();
        (step > 0).then(|| combo_animation(chain.family, chain.weapon, step))
    }
}

/// Animation for a chain step (1-based)
pub fn combo_animation(family: ComboFamily, weapon: Weapon, step: u8) -> AnimationId {
    use AnimationId::*;
    let row = match family {
        ComboFamily::Punch => [Punch1, Punch2, Punch3],
        ComboFamily::Special => [Special1, Special2, Special3],
        ComboFamily::Weapon => match weapon {
            Weapon::Axe => [Axe1, Axe2, Axe3],
            Weapon::Sword => [Sword1, Sword2, Sword3],
            // Unarmed weapon attacks never start a chain
            Weapon::Pipe | Weapon::None => [Pipe1, Pipe2, Pipe3],
        },
    };
    row[(step.clamp(1, MAX_COMBO_STEP) - 1) as usize]
}

const KICK_HITBOX: HitboxSpec = HitboxSpec::new(BoxShape::new(0.08, 0.06, 0.08, 0.08), 6.0, false);

/// Hitbox for a chain step; the finisher reaches further and knocks down
pub fn combo_hitbox(family: ComboFamily, weapon: Weapon, step: u8) -> HitboxSpec {
    // (width, height, offset_x, offset_y, damage)
    let (width, height, offset_x, offset_y, damage) = match family {
        ComboFamily::Punch => (0.07, 0.07, 0.07, 0.2, 5.0),
        ComboFamily::Special => (0.08, 0.1, 0.08, 0.15, 6.0),
        ComboFamily::Weapon => match weapon {
            Weapon::Axe => (0.1, 0.09, 0.09, 0.18, 8.0),
            Weapon::Sword => (0.12, 0.06, 0.1, 0.19, 7.0),
            Weapon::Pipe | Weapon::None => (0.09, 0.09, 0.08, 0.17, 6.0),
        },
    };

    if step >= MAX_COMBO_STEP {
        HitboxSpec::new(
            BoxShape::new(width, height, offset_x + 0.03, offset_y),
            damage * 2.0,
            true,
        )
    } else {
        HitboxSpec::new(BoxShape::new(width, height, offset_x, offset_y), damage, false)
    }
}
