// Overlay and special forms: gun / grenade aiming, werewolf and bat demon
//
// At most one form is active; `ActiveForm` makes the exclusivity structural.

use glam::Vec2;
use log::{debug, info};

use crate::core::math::decay_out_quad;
use crate::engine::input::{Action, InputSnapshot};

use super::animation::AnimationId;
use super::combo::AttackResult;
use super::hitbox::{BoxShape, HitboxSpec};
use super::state::Facing;
use super::stats::CombatTuning;

/// What an aiming form throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AimWeapon {
    Gun,
    Grenade,
}

impl AimWeapon {
    pub fn needs_reload(&self) -> bool {
        matches!(self, Self::Gun)
    }

    pub fn stance_animation(&self) -> AnimationId {
        match self {
            Self::Gun => AnimationId::GunStance,
            Self::Grenade => AnimationId::GrenadeStance,
        }
    }
}

/// Where an aiming form is in its draw / fire cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimPhase {
    /// Drawing the weapon; can't fire yet
    Entering { remaining: f32 },
    Ready,
    Recoil { elapsed: f32 },
    Reload { remaining: f32 },
}

/// Auto-repeat for a held aim key: one step on press, then repeats after a
/// delay
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoldRepeat {
    held_for: f32,
    next_repeat: f32,
}

impl HoldRepeat {
    /// Steps produced this tick
    pub fn update(
        &mut self,
        held: bool,
        just_pressed: bool,
        dt: f32,
        delay: f32,
        interval: f32,
    ) -> i32 {
        if just_pressed {
            self.held_for = 0.0;
            self.next_repeat = delay;
            return 1;
        }
        if !held {
            self.held_for = 0.0;
            return 0;
        }

        self.held_for += dt;
        let mut steps = 0;
        while self.held_for >= self.next_repeat {
            steps += 1;
            self.next_repeat += interval.max(f32::EPSILON);
        }
        steps
    }
}

/// State of the gun or grenade overlay
#[derive(Debug, Clone, PartialEq)]
pub struct AimState {
    /// Degrees; 0 = horizontal, positive = up
    pub angle: f32,
    pub phase: AimPhase,
    /// Direction the overlay faces; may lead the body during a turn
    pub overlay_facing: Facing,
    /// Time left until the body follows the overlay
    turning: Option<f32>,
    up: HoldRepeat,
    down: HoldRepeat,
}

impl AimState {
    fn new(angle: f32, phase: AimPhase, facing: Facing) -> Self {
        Self {
            angle,
            phase,
            overlay_facing: facing,
            turning: None,
            up: HoldRepeat::default(),
            down: HoldRepeat::default(),
        }
    }

    pub fn is_turning(&self) -> bool {
        self.turning.is_some()
    }

    /// Overlay displacement opposite the aim direction, easing back to zero
    pub fn recoil_offset(&self, tuning: &CombatTuning) -> Vec2 {
        let AimPhase::Recoil { elapsed } = self.phase else {
            return Vec2::ZERO;
        };
        let progress = if tuning.recoil_duration > 0.0 {
            elapsed / tuning.recoil_duration
        } else {
            1.0
        };
        let radians = self.angle.to_radians();
        let aim = Vec2::new(radians.cos() * self.overlay_facing.sign(), radians.sin());
        -aim * tuning.recoil_distance * decay_out_quad(progress)
    }
}

/// One-shot attacks available in a special form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    WerewolfFrenzy,
    WerewolfPounce,
    BatFrenzy,
    BatDash,
}

impl SpecialMove {
    pub fn animation(&self) -> AnimationId {
        match self {
            Self::WerewolfFrenzy => AnimationId::WerewolfFrenzy,
            Self::WerewolfPounce => AnimationId::WerewolfPounce,
            Self::BatFrenzy => AnimationId::BatFrenzy,
            Self::BatDash => AnimationId::BatDash,
        }
    }

    pub fn hitbox(&self) -> HitboxSpec {
        match self {
            Self::WerewolfFrenzy => HitboxSpec::new(BoxShape::new(0.12, 0.12, 0.1, 0.18), 20.0, true),
            Self::WerewolfPounce => HitboxSpec::new(BoxShape::new(0.14, 0.1, 0.1, 0.12), 15.0, true),
            Self::BatFrenzy => HitboxSpec::new(BoxShape::new(0.1, 0.1, 0.09, 0.2), 12.0, false),
            Self::BatDash => HitboxSpec::new(BoxShape::new(0.14, 0.08, 0.08, 0.18), 10.0, false),
        }
    }

    pub fn cooldown(&self, tuning: &CombatTuning) -> f32 {
        match self {
            Self::WerewolfFrenzy | Self::BatFrenzy => tuning.frenzy_cooldown,
            Self::WerewolfPounce => tuning.pounce_cooldown,
            Self::BatDash => tuning.dash_cooldown,
        }
    }

    /// Horizontal speed the move carries the body at, if any
    pub fn travel_speed(&self, tuning: &CombatTuning) -> Option<f32> {
        match self {
            Self::WerewolfPounce => Some(tuning.pounce_speed),
            Self::BatDash => Some(tuning.dash_speed),
            Self::WerewolfFrenzy | Self::BatFrenzy => None,
        }
    }
}

/// State of the werewolf or bat demon form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialForm {
    playing: Option<SpecialMove>,
    /// Remaining cooldown for (punch-key move, special-key move)
    cooldowns: [f32; 2],
}

impl SpecialForm {
    pub fn playing(&self) -> Option<SpecialMove> {
        self.playing
    }

    pub fn cooldown(&self, slot: usize) -> f32 {
        self.cooldowns.get(slot).copied().unwrap_or(0.0)
    }

    fn update(&mut self, dt: f32) {
        for cooldown in &mut self.cooldowns {
            *cooldown = (*cooldown - dt).max(0.0);
        }
    }

    /// Start the move in `slot` unless it is cooling down or still playing
    fn trigger(&mut self, slot: usize, special: SpecialMove, tuning: &CombatTuning) -> Option<SpecialMove> {
        if self.cooldowns[slot] > 0.0 || self.playing == Some(special) {
            return None;
        }
        self.cooldowns[slot] = special.cooldown(tuning);
        self.playing = Some(special);
        Some(special)
    }
}

/// The exclusive mode a character is in
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveForm {
    #[default]
    Normal,
    Gun(AimState),
    Grenade(AimState),
    Werewolf(SpecialForm),
    BatDemon(SpecialForm),
}

/// Form a toggle key asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Gun,
    Grenade,
    Werewolf,
    BatDemon,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [Self::Gun, Self::Grenade, Self::Werewolf, Self::BatDemon];

    pub fn toggle_action(&self) -> Action {
        match self {
            Self::Gun => Action::GunMode,
            Self::Grenade => Action::GrenadeMode,
            Self::Werewolf => Action::WerewolfForm,
            Self::BatDemon => Action::BatDemonForm,
        }
    }
}

impl ActiveForm {
    pub fn kind(&self) -> Option<FormKind> {
        match self {
            Self::Normal => None,
            Self::Gun(_) => Some(FormKind::Gun),
            Self::Grenade(_) => Some(FormKind::Grenade),
            Self::Werewolf(_) => Some(FormKind::Werewolf),
            Self::BatDemon(_) => Some(FormKind::BatDemon),
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    pub fn aim(&self) -> Option<(AimWeapon, &AimState)> {
        match self {
            Self::Gun(aim) => Some((AimWeapon::Gun, aim)),
            Self::Grenade(aim) => Some((AimWeapon::Grenade, aim)),
            _ => None,
        }
    }

    pub fn special(&self) -> Option<&SpecialForm> {
        match self {
            Self::Werewolf(form) | Self::BatDemon(form) => Some(form),
            _ => None,
        }
    }
}

/// Emitted when a form does something the rest of the game cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormEvent {
    Fired { weapon: AimWeapon, angle: f32 },
}

/// What a form tick asks of the character
#[derive(Debug, Default)]
pub struct FormOutput {
    pub events: Vec<FormEvent>,
    /// The body should now face this way (end of an aim-mode turn)
    pub commit_facing: Option<Facing>,
    /// A special move started
    pub attack: Option<AttackResult>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastShot {
    weapon: AimWeapon,
    angle: f32,
    age: f32,
}

/// Owns the active form and the bookkeeping that outlives it
#[derive(Debug, Clone, Default)]
pub struct FormController {
    form: ActiveForm,
    last_shot: Option<LastShot>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ActiveForm {
        &self.form
    }

    /// Toggle key handling: enter `kind`, leave it if already active, or
    /// switch from any other form
    pub fn toggle(&mut self, kind: FormKind, facing: Facing, tuning: &CombatTuning) {
        if self.form.kind() == Some(kind) {
            info!("Leaving {:?} form", kind);
            self.form = ActiveForm::Normal;
            return;
        }

        info!("Entering {:?} form", kind);
        self.form = match kind {
            FormKind::Gun => ActiveForm::Gun(self.enter_aim(AimWeapon::Gun, facing, tuning)),
            FormKind::Grenade => {
                ActiveForm::Grenade(self.enter_aim(AimWeapon::Grenade, facing, tuning))
            }
            FormKind::Werewolf => ActiveForm::Werewolf(SpecialForm::default()),
            FormKind::BatDemon => ActiveForm::BatDemon(SpecialForm::default()),
        };
    }

    /// Back to normal form (defeat)
    pub fn reset(&mut self) {
        if !self.form.is_normal() {
            debug!("Form reset to normal");
        }
        self.form = ActiveForm::Normal;
    }

    /// A recent shot with the same weapon keeps its angle and skips the draw
    fn enter_aim(&self, weapon: AimWeapon, facing: Facing, tuning: &CombatTuning) -> AimState {
        match self.last_shot {
            Some(shot) if shot.weapon == weapon && shot.age <= tuning.sticky_aim_window => {
                AimState::new(shot.angle, AimPhase::Ready, facing)
            }
            _ => AimState::new(
                0.0,
                AimPhase::Entering {
                    remaining: tuning.draw_duration,
                },
                facing,
            ),
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        facing: Facing,
        tuning: &CombatTuning,
    ) -> FormOutput {
        let mut output = FormOutput::default();

        if let Some(shot) = &mut self.last_shot {
            shot.age += dt;
        }

        match &mut self.form {
            ActiveForm::Normal => {}
            ActiveForm::Gun(aim) => {
                if let Some(angle) = update_aim(aim, AimWeapon::Gun, dt, input, tuning, &mut output) {
                    self.last_shot = Some(LastShot {
                        weapon: AimWeapon::Gun,
                        angle,
                        age: 0.0,
                    });
                }
            }
            ActiveForm::Grenade(aim) => {
                if let Some(angle) =
                    update_aim(aim, AimWeapon::Grenade, dt, input, tuning, &mut output)
                {
                    self.last_shot = Some(LastShot {
                        weapon: AimWeapon::Grenade,
                        angle,
                        age: 0.0,
                    });
                }
            }
            ActiveForm::Werewolf(form) => {
                form.update(dt);
                output.attack = trigger_special(
                    form,
                    input,
                    [SpecialMove::WerewolfFrenzy, SpecialMove::WerewolfPounce],
                    tuning,
                );
            }
            ActiveForm::BatDemon(form) => {
                form.update(dt);
                output.attack = trigger_special(
                    form,
                    input,
                    [SpecialMove::BatFrenzy, SpecialMove::BatDash],
                    tuning,
                );
            }
        }

        // Keep the overlay in step with the body outside of turns
        if let ActiveForm::Gun(aim) | ActiveForm::Grenade(aim) = &mut self.form {
            if !aim.is_turning() && output.commit_facing.is_none() {
                aim.overlay_facing = facing;
            }
        }

        output
    }

    /// A body one-shot played through
    pub fn finish_animation(&mut self, animation: AnimationId) {
        if let ActiveForm::Werewolf(form) | ActiveForm::BatDemon(form) = &mut self.form {
            if form.playing.map(|special| special.animation()) == Some(animation) {
                form.playing = None;
            }
        }
    }

    /// Special move currently carrying the body, with its speed
    pub fn travel_speed(&self, tuning: &CombatTuning) -> Option<f32> {
        self.form
            .special()
            .and_then(|form| form.playing)
            .and_then(|special| special.travel_speed(tuning))
    }

    pub fn is_aiming(&self) -> bool {
        self.form.aim().is_some()
    }
}

/// One aiming tick; returns the angle of a shot fired this tick
fn update_aim(
    aim: &mut AimState,
    weapon: AimWeapon,
    dt: f32,
    input: &InputSnapshot,
    tuning: &CombatTuning,
    output: &mut FormOutput,
) -> Option<f32> {
    aim.phase = match aim.phase {
        AimPhase::Entering { remaining } if remaining - dt > 0.0 => AimPhase::Entering {
            remaining: remaining - dt,
        },
        AimPhase::Entering { .. } => AimPhase::Ready,
        AimPhase::Recoil { elapsed } if elapsed + dt < tuning.recoil_duration => AimPhase::Recoil {
            elapsed: elapsed + dt,
        },
        AimPhase::Recoil { .. } if weapon.needs_reload() => AimPhase::Reload {
            remaining: tuning.reload_duration,
        },
        AimPhase::Recoil { .. } => AimPhase::Ready,
        AimPhase::Reload { remaining } if remaining - dt > 0.0 => AimPhase::Reload {
            remaining: remaining - dt,
        },
        AimPhase::Reload { .. } => AimPhase::Ready,
        AimPhase::Ready => AimPhase::Ready,
    };

    // Turning: overlay flips now, body follows after turn_duration
    if let Some(remaining) = aim.turning {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            aim.turning = None;
            output.commit_facing = Some(aim.overlay_facing);
        } else {
            aim.turning = Some(remaining);
        }
    } else {
        let backward = match aim.overlay_facing {
            Facing::Left => Action::MoveRight,
            Facing::Right => Action::MoveLeft,
        };
        if input.just_pressed(backward) {
            aim.overlay_facing = aim.overlay_facing.opposite();
            aim.turning = Some(tuning.turn_duration);
        }
    }

    if !matches!(aim.phase, AimPhase::Entering { .. }) {
        let up = aim.up.update(
            input.held(Action::Up),
            input.just_pressed(Action::Up),
            dt,
            tuning.aim_repeat_delay,
            tuning.aim_repeat_interval,
        );
        let down = aim.down.update(
            input.held(Action::Down),
            input.just_pressed(Action::Down),
            dt,
            tuning.aim_repeat_delay,
            tuning.aim_repeat_interval,
        );
        let steps = up - down;
        if steps != 0 {
            aim.angle = (aim.angle + steps as f32 * tuning.aim_step_degrees)
                .clamp(-tuning.aim_limit_degrees, tuning.aim_limit_degrees);
        }
    }

    if aim.phase == AimPhase::Ready && input.just_pressed(Action::Punch) {
        aim.phase = AimPhase::Recoil { elapsed: 0.0 };
        output.events.push(FormEvent::Fired {
            weapon,
            angle: aim.angle,
        });
        debug!("{:?} fired at {:.0} degrees", weapon, aim.angle);
        return Some(aim.angle);
    }

    None
}

/// Punch key triggers slot 0, special key slot 1
fn trigger_special(
    form: &mut SpecialForm,
    input: &InputSnapshot,
    moves: [SpecialMove; 2],
    tuning: &CombatTuning,
) -> Option<AttackResult> {
    let slot = if input.just_pressed(Action::Punch) {
        0
    } else if input.just_pressed(Action::Special) {
        1
    } else {
        return None;
    };

    let special = form.trigger(slot, moves[slot], tuning)?;
    debug!("{:?} triggered", special);
    Some(AttackResult {
        animation: special.animation(),
        hitbox: special.hitbox(),
    })
}
