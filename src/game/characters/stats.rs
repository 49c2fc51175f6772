// Character tuning - movement physics and combat timings
//
// Every character shares the same numbers; differences come from weapons and
// forms. Both tables can be overridden from `moonfall.toml`.

use serde::Deserialize;

/// Movement and vertical kinematics tuning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    // Horizontal movement
    /// Walking speed (units/second)
    pub walk_speed: f32,
    /// Speed multiplier while running (shift or double tap)
    pub run_multiplier: f32,
    /// Speed multiplier while airborne
    pub air_multiplier: f32,
    /// Speed multiplier while rolling
    pub roll_multiplier: f32,
    /// Max gap between two presses of a direction key that starts a run
    pub double_tap_window: f32,

    // Vertical kinematics
    /// Upward velocity applied by a jump
    pub jump_force: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Tolerance band around platform tops for landing and support checks
    pub platform_epsilon: f32,
    /// Landing speed at or above which the hard-landing sequence plays
    pub hard_landing_speed: f32,
    pub hard_landing_impact: f32,
    pub hard_landing_recover: f32,

    // Ladders
    /// Vertical distance covered by one climb frame
    pub climb_step: f32,
    /// Holding climb-down longer than this descends continuously
    pub climb_hold_threshold: f32,
    /// Interval between steps while descending continuously
    pub climb_repeat_interval: f32,
    /// Number of frames in the climb cycle
    pub climb_frames: u32,

    // Knockdown / death timeline
    pub knockdown_duration: f32,
    /// Time since the knockdown started at which the character gets up
    pub recover_at: f32,
    pub knockdown_height: f32,
    pub knockdown_distance: f32,

    // Body
    pub max_health: f32,
    pub width: f32,
    pub height: f32,
}

/// The one tuning table every fighter uses
pub const BASE_STATS: CharacterStats = CharacterStats {
    walk_speed: 0.6,
    run_multiplier: 2.0,
    air_multiplier: 0.7,
    roll_multiplier: 1.5,
    double_tap_window: 0.2,

    jump_force: 3.0,
    gravity: 8.0,
    platform_epsilon: 0.02,
    hard_landing_speed: 4.5,
    hard_landing_impact: 0.25,
    hard_landing_recover: 0.35,

    climb_step: 0.05,
    climb_hold_threshold: 0.15,
    climb_repeat_interval: 0.08,
    climb_frames: 4,

    knockdown_duration: 0.8,
    recover_at: 2.8,
    knockdown_height: 0.25,
    knockdown_distance: 0.4,

    max_health: 100.0,
    width: 0.12,
    height: 0.3,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

/// Combo, hit and overlay-form timings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Time allowed between combo presses
    pub combo_window: f32,
    /// How long a get-hit reaction blocks combat actions
    pub hit_duration: f32,
    /// Lifetime of an attack hitbox, independent of the attack animation
    pub hitbox_lifetime: f32,

    // Gun / grenade aiming
    pub aim_step_degrees: f32,
    pub aim_limit_degrees: f32,
    /// Hold time before a held aim key starts repeating
    pub aim_repeat_delay: f32,
    pub aim_repeat_interval: f32,
    /// Re-entering aim mode within this long after a shot keeps the angle
    pub sticky_aim_window: f32,
    pub draw_duration: f32,
    pub recoil_duration: f32,
    pub recoil_distance: f32,
    pub reload_duration: f32,
    /// Delay between the overlay flipping and the body following it
    pub turn_duration: f32,

    // Special forms
    pub frenzy_cooldown: f32,
    pub pounce_cooldown: f32,
    pub dash_cooldown: f32,
    pub pounce_speed: f32,
    pub dash_speed: f32,
}

pub const BASE_TUNING: CombatTuning = CombatTuning {
    combo_window: 0.5,
    hit_duration: 0.3,
    hitbox_lifetime: 0.15,

    aim_step_degrees: 6.0,
    aim_limit_degrees: 90.0,
    aim_repeat_delay: 0.3,
    aim_repeat_interval: 0.08,
    sticky_aim_window: 1.0,
    draw_duration: 0.25,
    recoil_duration: 0.2,
    recoil_distance: 0.03,
    reload_duration: 0.6,
    turn_duration: 0.12,

    frenzy_cooldown: 2.0,
    pounce_cooldown: 1.5,
    dash_cooldown: 1.0,
    pounce_speed: 1.4,
    dash_speed: 1.8,
};

impl Default for CombatTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}
