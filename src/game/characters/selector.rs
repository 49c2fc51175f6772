// Animation selection: maps character state to body and overlay animations

use std::sync::Arc;

use crate::engine::assets::UvRect;

use super::animation::{AnimationId, AnimationLibrary, AnimationTrack};
use super::combo::ComboResolver;
use super::form::{ActiveForm, AimPhase, AimWeapon, FormController};
use super::movement::MovementController;
use super::state::{DeathPhase, Facing, HardLandingPhase, MovementState};
use super::stats::CharacterStats;

/// The animation a track should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationChoice {
    pub id: AnimationId,
    pub looping: bool,
    /// Frame pinned by game state instead of time
    pub held_frame: Option<usize>,
}

impl AnimationChoice {
    fn looping(id: AnimationId) -> Self {
        Self {
            id,
            looping: true,
            held_frame: None,
        }
    }

    fn once(id: AnimationId) -> Self {
        Self {
            id,
            looping: false,
            held_frame: None,
        }
    }

    fn held(id: AnimationId, frame: usize) -> Self {
        Self {
            id,
            looping: false,
            held_frame: Some(frame),
        }
    }
}

/// Everything selection reads, borrowed from the character for one tick
#[derive(Clone, Copy)]
pub struct SelectionContext<'a> {
    pub movement: &'a MovementController,
    pub combo: &'a ComboResolver,
    pub form: &'a FormController,
    pub stats: &'a CharacterStats,
}

/// Body animation by priority, highest first
pub fn select_body(ctx: &SelectionContext) -> AnimationChoice {
    let movement = ctx.movement;

    if let Some(phase) = movement.hard_landing_phase(ctx.stats) {
        return AnimationChoice::once(match phase {
            HardLandingPhase::Impact => AnimationId::HardLandingImpact,
            HardLandingPhase::Recover => AnimationId::HardLandingRecover,
        });
    }

    if movement.is_dead() {
        return AnimationChoice::once(AnimationId::Prone);
    }
    if let Some(phase) = movement.death_phase(ctx.stats) {
        return AnimationChoice::once(match phase {
            DeathPhase::Knockdown => AnimationId::Knockdown,
            DeathPhase::Prone | DeathPhase::Recovered => AnimationId::Prone,
        });
    }

    if let Some(id) = ctx.combo.hit_animation() {
        return AnimationChoice::once(id);
    }

    match ctx.form.form() {
        ActiveForm::Normal => {}
        ActiveForm::Gun(_) => return AnimationChoice::looping(AimWeapon::Gun.stance_animation()),
        ActiveForm::Grenade(_) => {
            return AnimationChoice::looping(AimWeapon::Grenade.stance_animation())
        }
        ActiveForm::Werewolf(form) => {
            return match form.playing() {
                Some(special) => AnimationChoice::once(special.animation()),
                None if movement.is_jumping() => AnimationChoice::once(AnimationId::WerewolfJump),
                None if movement.state().is_moving() => {
                    AnimationChoice::looping(AnimationId::WerewolfRun)
                }
                None => AnimationChoice::looping(AnimationId::WerewolfIdle),
            };
        }
        ActiveForm::BatDemon(form) => {
            return match form.playing() {
                Some(special) => AnimationChoice::once(special.animation()),
                None if movement.state().is_moving() => {
                    AnimationChoice::looping(AnimationId::BatFly)
                }
                None => AnimationChoice::looping(AnimationId::BatHover),
            };
        }
    }

    if let Some(id) = ctx.combo.current_animation() {
        return AnimationChoice::once(id);
    }
    if ctx.combo.is_kicking() {
        return AnimationChoice::once(AnimationId::Kick);
    }

    if let Some(frame) = movement.climb_frame() {
        return AnimationChoice::held(AnimationId::Climb, frame as usize);
    }
    if movement.is_jumping() {
        return AnimationChoice::once(AnimationId::Jump);
    }
    if movement.is_rolling() {
        return AnimationChoice::looping(AnimationId::Roll);
    }
    if matches!(movement.state(), MovementState::MoveLeft | MovementState::MoveRight) {
        return AnimationChoice::looping(if movement.is_running() {
            AnimationId::Run
        } else {
            AnimationId::Walk
        });
    }
    if movement.is_sitting() {
        return AnimationChoice::once(AnimationId::Sit);
    }

    AnimationChoice::looping(AnimationId::Idle)
}

/// Overlay animation for the aiming forms; `None` hides the overlay
pub fn select_overlay(ctx: &SelectionContext, library: &AnimationLibrary) -> Option<AnimationChoice> {
    let (weapon, aim) = ctx.form.form().aim()?;
    if ctx.movement.is_locked() || ctx.combo.is_hit() {
        return None;
    }

    let choice = match (weapon, aim.phase) {
        (AimWeapon::Gun, AimPhase::Entering { .. }) => AnimationChoice::once(AnimationId::GunDraw),
        (AimWeapon::Grenade, AimPhase::Entering { .. }) => {
            AnimationChoice::once(AnimationId::GrenadeDraw)
        }
        (AimWeapon::Gun, AimPhase::Recoil { .. }) => AnimationChoice::once(AnimationId::GunRecoil),
        (AimWeapon::Grenade, AimPhase::Recoil { .. }) => {
            AnimationChoice::once(AnimationId::GrenadeThrow)
        }
        (AimWeapon::Gun, AimPhase::Reload { .. }) => AnimationChoice::once(AnimationId::GunReload),
        (_, AimPhase::Ready | AimPhase::Reload { .. }) => {
            let id = match weapon {
                AimWeapon::Gun => AnimationId::GunAim,
                AimWeapon::Grenade => AnimationId::GrenadeAim,
            };
            let frames = library.frame_count(id).unwrap_or(1);
            AnimationChoice::held(id, aim_frame(aim.angle, frames))
        }
    };
    Some(choice)
}

/// Aim frames run from straight down (first) to straight up (last)
pub fn aim_frame(angle_degrees: f32, frame_count: usize) -> usize {
    if frame_count <= 1 {
        return 0;
    }
    let t = ((angle_degrees + 90.0) / 180.0).clamp(0.0, 1.0);
    (t * (frame_count - 1) as f32).round() as usize
}

/// Body and overlay playback for one character
#[derive(Debug, Clone)]
pub struct AnimationSelector {
    library: Arc<AnimationLibrary>,
    body: AnimationTrack,
    overlay: AnimationTrack,
    overlay_visible: bool,
    body_flip: bool,
    overlay_flip: bool,
}

impl AnimationSelector {
    pub fn new(library: Arc<AnimationLibrary>) -> Self {
        let mut body = AnimationTrack::new();
        body.play(AnimationId::Idle, true, &library);
        Self {
            library,
            body,
            overlay: AnimationTrack::new(),
            overlay_visible: false,
            body_flip: false,
            overlay_flip: false,
        }
    }

    pub fn library(&self) -> &AnimationLibrary {
        &self.library
    }

    /// Explicit play request (attack presses, get-hits)
    pub fn play_animation(&mut self, id: AnimationId, looping: bool) -> bool {
        self.body.play(id, looping, &self.library)
    }

    /// Pick and advance both tracks for this tick.
    ///
    /// Tracks only restart when the chosen id changes, so a steady state
    /// keeps cycling.
    pub fn update(&mut self, dt: f32, ctx: &SelectionContext) {
        let choice = select_body(ctx);
        self.body.ensure(choice.id, choice.looping, &self.library);
        match choice.held_frame {
            Some(frame) if self.body.current() == Some(choice.id) => {
                self.body.hold_frame(frame, &self.library)
            }
            _ => self.body.update(dt, &self.library),
        }

        match select_overlay(ctx, &self.library) {
            Some(overlay) => {
                self.overlay_visible = true;
                self.overlay.ensure(overlay.id, overlay.looping, &self.library);
                match overlay.held_frame {
                    Some(frame) => self.overlay.hold_frame(frame, &self.library),
                    None => self.overlay.update(dt, &self.library),
                }
            }
            None => {
                if self.overlay_visible {
                    self.overlay.clear();
                }
                self.overlay_visible = false;
            }
        }

        let facing = ctx.movement.facing();
        self.body_flip = facing.is_left();
        self.overlay_flip = ctx
            .form
            .form()
            .aim()
            .map_or(facing, |(_, aim)| aim.overlay_facing)
            .is_left();
    }

    pub fn body_animation(&self) -> Option<AnimationId> {
        self.body.current()
    }

    pub fn body_frame(&self) -> usize {
        self.body.frame()
    }

    pub fn overlay_animation(&self) -> Option<AnimationId> {
        if self.overlay_visible {
            self.overlay.current()
        } else {
            None
        }
    }

    pub fn overlay_frame(&self) -> usize {
        self.overlay.frame()
    }

    /// Body one-shot that has played through
    pub fn finished_body_animation(&self) -> Option<AnimationId> {
        self.body.finished()
    }

    pub fn body_sheet(&self) -> Option<&str> {
        self.library.sheet_name(self.body.current()?)
    }

    pub fn overlay_sheet(&self) -> Option<&str> {
        self.library.sheet_name(self.overlay_animation()?)
    }

    /// Body UVs with the facing flip applied; `None` when nothing is bound
    pub fn body_uv(&self) -> Option<UvRect> {
        Some(self.body.uv(&self.library)?.flipped(self.body_flip))
    }

    /// Overlay UVs; flipped by the overlay's own facing
    pub fn overlay_uv(&self) -> Option<UvRect> {
        if !self.overlay_visible {
            return None;
        }
        Some(self.overlay.uv(&self.library)?.flipped(self.overlay_flip))
    }

    pub fn body_facing_left(&self) -> bool {
        self.body_flip
    }

    pub fn overlay_facing(&self) -> Facing {
        if self.overlay_flip {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::{Action, InputSnapshot};
    use crate::engine::physics::LevelGeometry;
    use crate::game::characters::combo::{ComboFamily, GetHit, Weapon};
    use crate::game::characters::form::FormKind;
    use crate::game::characters::movement::MotionControl;
    use crate::game::characters::sprites;
    use crate::game::characters::stats::CombatTuning;
    use glam::Vec2;

    struct Rig {
        stats: CharacterStats,
        movement: MovementController,
        combo: ComboResolver,
        form: FormController,
        selector: AnimationSelector,
    }

    impl Rig {
        fn new() -> Self {
            let stats = CharacterStats::default();
            let library = sprites::builtin_library().unwrap();
            Self {
                movement: MovementController::new(Vec2::ZERO, &stats),
                combo: ComboResolver::new(0.5),
                form: FormController::new(),
                selector: AnimationSelector::new(Arc::new(library)),
                stats,
            }
        }

        fn tick(&mut self, input: InputSnapshot) {
            let level = LevelGeometry::new(0.0);
            self.movement
                .update(1.0 / 60.0, &input, &level, &self.stats, MotionControl::Free);
            self.select();
        }

        fn select(&mut self) {
            let ctx = SelectionContext {
                movement: &self.movement,
                combo: &self.combo,
                form: &self.form,
                stats: &self.stats,
            };
            self.selector.update(1.0 / 60.0, &ctx);
        }

        fn ctx(&self) -> SelectionContext<'_> {
            SelectionContext {
                movement: &self.movement,
                combo: &self.combo,
                form: &self.form,
                stats: &self.stats,
            }
        }
    }

    #[test]
    fn test_idle_walk_run() {
        let mut rig = Rig::new();
        rig.tick(InputSnapshot::default());
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Idle));

        rig.tick(InputSnapshot::holding(&[Action::MoveRight]));
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Walk));

        rig.tick(InputSnapshot::holding(&[Action::MoveRight, Action::Run]));
        // Run key alone doesn't set the double-tap run flag
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Walk));
    }

    #[test]
    fn test_landing_while_moving_walks_at_once() {
        let mut rig = Rig::new();
        let level = LevelGeometry::new(0.0);
        let held = InputSnapshot::holding(&[Action::MoveRight]);

        rig.tick(InputSnapshot::pressing(&[Action::Jump, Action::MoveRight]));
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Jump));

        let mut landed = false;
        for _ in 0..120 {
            let events = rig
                .movement
                .update(1.0 / 60.0, &held, &level, &rig.stats, MotionControl::Free);
            rig.select();
            if events.landed {
                landed = true;
                break;
            }
            assert_eq!(rig.selector.body_animation(), Some(AnimationId::Jump));
        }
        assert!(landed);
        assert!(!rig.movement.is_locked());
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Walk));
    }

    #[test]
    fn test_steady_state_keeps_cycling() {
        let mut rig = Rig::new();
        for _ in 0..4 {
            rig.tick(InputSnapshot::holding(&[Action::MoveRight]));
        }
        let frame = rig.selector.body_frame();
        for _ in 0..4 {
            rig.tick(InputSnapshot::holding(&[Action::MoveRight]));
        }
        assert_ne!(rig.selector.body_frame(), 0);
        assert!(rig.selector.body_frame() >= frame);
    }

    #[test]
    fn test_jump_beats_walk() {
        let mut rig = Rig::new();
        rig.tick(InputSnapshot::pressing(&[Action::Jump, Action::MoveRight]));
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Jump));
    }

    #[test]
    fn test_combo_beats_movement() {
        let mut rig = Rig::new();
        let attack = rig.combo.on_attack_pressed(ComboFamily::Punch, Weapon::None).unwrap();
        rig.selector.play_animation(attack.animation, false);
        rig.tick(InputSnapshot::holding(&[Action::MoveRight]));
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Punch1));
    }

    #[test]
    fn test_hit_beats_combo() {
        let mut rig = Rig::new();
        rig.combo.take_hit(GetHit::Second, 0.3);
        rig.select();
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::GetHit2));
    }

    #[test]
    fn test_knockdown_beats_everything_but_hard_landing() {
        let mut rig = Rig::new();
        let level = LevelGeometry::new(0.0);
        rig.movement.knock_down(Facing::Left, false, &level, &rig.stats);
        rig.combo.take_hit(GetHit::First, 0.3);
        rig.select();
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Knockdown));
    }

    #[test]
    fn test_sit_is_lowest_above_idle() {
        let mut rig = Rig::new();
        rig.tick(InputSnapshot::pressing(&[Action::Down]));
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::Sit));
    }

    #[test]
    fn test_gun_overlay_and_flip() {
        let mut rig = Rig::new();
        let tuning = CombatTuning::default();
        rig.form.toggle(FormKind::Gun, Facing::Right, &tuning);
        rig.select();
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::GunStance));
        assert_eq!(rig.selector.overlay_animation(), Some(AnimationId::GunDraw));

        rig.form.update(0.3, &InputSnapshot::default(), Facing::Right, &tuning);
        rig.select();
        assert_eq!(rig.selector.overlay_animation(), Some(AnimationId::GunAim));

        // Turn: overlay flips first, body keeps facing right
        rig.form
            .update(0.016, &InputSnapshot::pressing(&[Action::MoveLeft]), Facing::Right, &tuning);
        rig.select();
        let body = rig.selector.body_uv().unwrap();
        let overlay = rig.selector.overlay_uv().unwrap();
        assert!(body.u0 < body.u1);
        assert!(overlay.u0 > overlay.u1);
    }

    #[test]
    fn test_overlay_hidden_in_normal_form() {
        let mut rig = Rig::new();
        rig.select();
        assert!(rig.selector.overlay_animation().is_none());
        assert!(rig.selector.overlay_uv().is_none());
    }

    #[test]
    fn test_werewolf_body() {
        let mut rig = Rig::new();
        rig.form
            .toggle(FormKind::Werewolf, Facing::Right, &CombatTuning::default());
        assert_eq!(select_body(&rig.ctx()).id, AnimationId::WerewolfIdle);

        rig.tick(InputSnapshot::holding(&[Action::MoveLeft]));
        assert_eq!(rig.selector.body_animation(), Some(AnimationId::WerewolfRun));
        assert!(rig.selector.body_facing_left());
    }

    #[test]
    fn test_flip_is_idempotent_across_ticks() {
        let mut rig = Rig::new();
        rig.tick(InputSnapshot::pressing(&[Action::MoveLeft]));
        rig.tick(InputSnapshot::default());
        let first = rig.selector.body_uv().unwrap();
        let second = rig.selector.body_uv().unwrap();
        assert_eq!(first, second);
        assert!(first.u0 > first.u1);
    }

    #[test]
    fn test_aim_frame_mapping() {
        assert_eq!(aim_frame(-90.0, 7), 0);
        assert_eq!(aim_frame(0.0, 7), 3);
        assert_eq!(aim_frame(90.0, 7), 6);
        assert_eq!(aim_frame(45.0, 1), 0);
    }

    #[test]
    fn test_empty_library_draws_nothing() {
        let stats = CharacterStats::default();
        let movement = MovementController::new(Vec2::ZERO, &stats);
        let combo = ComboResolver::new(0.5);
        let form = FormController::new();
        let mut selector = AnimationSelector::new(Arc::new(AnimationLibrary::empty()));
        let ctx = SelectionContext {
            movement: &movement,
            combo: &combo,
            form: &form,
            stats: &stats,
        };
        selector.update(1.0 / 60.0, &ctx);
        assert!(selector.body_uv().is_none());
        assert!(selector.body_animation().is_none());
    }
}
