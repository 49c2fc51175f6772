// Character entity and management

use std::sync::Arc;

use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::input::{Action, InputSnapshot};
use crate::engine::physics::{Aabb, LevelGeometry};
use crate::engine::renderer::{QuadDraw, RenderTarget, SpriteLayer, ViewProjection};
use crate::game::combat::{self, HitReport};

use super::animation::{AnimationId, AnimationLibrary};
use super::combo::{AttackResult, ComboFamily, ComboResolver, GetHit, Weapon};
use super::form::{AimWeapon, FormController, FormEvent, FormKind};
use super::hitbox::{HitboxSpec, HitboxState, HurtboxPose, HurtboxProfiles};
use super::movement::{MotionControl, MovementController, MovementEvents};
use super::selector::{AnimationSelector, SelectionContext};
use super::state::Facing;
use super::stats::{CharacterStats, CombatTuning};

/// Unique identifier for a character
pub type CharacterId = u32;

/// Sprite cells are square and taller than the body they hold
const SPRITE_SCALE: f32 = 1.25;

/// Height of the overlay anchor above the feet, as a fraction of body height
const OVERLAY_ANCHOR: f32 = 0.55;

/// How an incoming hit was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Not hittable right now (down, dead or already reeling)
    Ignored,
    Staggered(GetHit),
    KnockedDown,
    Killed,
}

/// Everything a character did during one tick
#[derive(Debug, Default)]
pub struct CharacterEvents {
    pub movement: MovementEvents,
    pub form: Vec<FormEvent>,
    /// Attack animation started this tick
    pub attack: Option<AnimationId>,
}

/// A fighter: movement, combos, forms and animation for one body
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,
    /// Player index controlling this character, `None` for scripted ones
    pub player_index: Option<usize>,
    pub stats: CharacterStats,
    pub tuning: CombatTuning,
    /// Weapon used by the weapon-attack family
    pub weapon: Weapon,

    health: f32,
    movement: MovementController,
    combo: ComboResolver,
    form: FormController,
    animation: AnimationSelector,
    hurtboxes: HurtboxProfiles,
    hitbox: Option<HitboxState>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: &str,
        player_index: Option<usize>,
        position: Vec2,
        stats: CharacterStats,
        tuning: CombatTuning,
        library: Arc<AnimationLibrary>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            player_index,
            weapon: Weapon::None,
            health: stats.max_health,
            movement: MovementController::new(position, &stats),
            combo: ComboResolver::new(tuning.combo_window),
            form: FormController::new(),
            animation: AnimationSelector::new(library),
            hurtboxes: HurtboxProfiles::for_body(stats.width, stats.height),
            hitbox: None,
            stats,
            tuning,
        }
    }

    /// Run one fixed tick
    pub fn update(&mut self, dt: f32, input: &InputSnapshot, level: &LevelGeometry) -> CharacterEvents {
        let mut events = CharacterEvents::default();

        if let Some(hitbox) = &mut self.hitbox {
            if !hitbox.update(dt) {
                self.hitbox = None;
            }
        }
        self.combo.update(dt);

        let control = self.motion_control();
        events.movement = self.movement.update(dt, input, level, &self.stats, control);

        let moved = events.movement;
        if moved.jumped || moved.started_sitting || moved.started_rolling || moved.started_climbing {
            self.combo.cancel_all();
        }
        if moved.hard_landing {
            self.combo.cancel_all();
            self.hitbox = None;
        }

        // Timers keep running while the character can't act
        let idle = InputSnapshot::default();
        let acting = self.can_act();
        let input = if acting { input } else { &idle };

        if acting {
            self.handle_form_toggles(input);
        }

        let output = self
            .form
            .update(dt, input, self.movement.facing(), &self.tuning);
        if let Some(facing) = output.commit_facing {
            self.movement.set_facing(facing);
        }
        if let Some(attack) = output.attack {
            events.attack = Some(attack.animation);
            self.start_attack(attack);
        }
        events.form = output.events;

        if acting && self.form.form().is_normal() && !self.movement.is_sitting() {
            if let Some(attack) = self.read_attack(input) {
                events.attack = Some(attack.animation);
                self.start_attack(attack);
            }
        }

        let ctx = SelectionContext {
            movement: &self.movement,
            combo: &self.combo,
            form: &self.form,
            stats: &self.stats,
        };
        self.animation.update(dt, &ctx);

        if let Some(finished) = self.animation.finished_body_animation() {
            self.combo.finish_animation(finished);
            self.form.finish_animation(finished);
        }

        events
    }

    fn can_act(&self) -> bool {
        !self.movement.is_locked() && !self.combo.is_hit() && !self.movement.is_climbing()
    }

    fn motion_control(&self) -> MotionControl {
        if self.combo.is_hit() || self.form.is_aiming() {
            return MotionControl::Frozen;
        }
        if let Some(speed) = self.form.travel_speed(&self.tuning) {
            return MotionControl::Dash { speed };
        }
        let form_special = self
            .form
            .form()
            .special()
            .is_some_and(|form| form.playing().is_some());
        let attacking = self.combo.is_attacking() || self.combo.is_kicking();
        if form_special || (attacking && !self.movement.is_jumping()) {
            return MotionControl::Rooted;
        }
        MotionControl::Free
    }

    fn handle_form_toggles(&mut self, input: &InputSnapshot) {
        let Some(kind) = FormKind::ALL
            .into_iter()
            .find(|kind| input.just_pressed(kind.toggle_action()))
        else {
            return;
        };
        self.form.toggle(kind, self.movement.facing(), &self.tuning);
        self.combo.cancel_all();
        self.hitbox = None;
    }

    /// Attack keys in normal form; kick first, then the combo families
    fn read_attack(&mut self, input: &InputSnapshot) -> Option<AttackResult> {
        if input.just_pressed(Action::Kick) {
            return self.combo.on_kick_pressed();
        }
        let family = if input.just_pressed(Action::Punch) {
            ComboFamily::Punch
        } else if input.just_pressed(Action::WeaponAttack) {
            ComboFamily::Weapon
        } else if input.just_pressed(Action::Special) {
            ComboFamily::Special
        } else {
            return None;
        };
        self.combo.on_attack_pressed(family, self.weapon)
    }

    fn start_attack(&mut self, attack: AttackResult) {
        self.animation.play_animation(attack.animation, false);
        // Nothing will ever report an unbound one-shot as finished
        if !self.animation.library().contains(attack.animation) {
            warn!("{:?} has no animation, ending it at once", attack.animation);
            self.combo.finish_animation(attack.animation);
            self.form.finish_animation(attack.animation);
        }
        self.hitbox = Some(HitboxState::new(
            attack.hitbox,
            self.movement.facing(),
            self.tuning.hitbox_lifetime,
        ));
    }

    /// Apply an incoming hit from an attacker facing `attacker_facing`
    pub fn take_hit<R: Rng>(
        &mut self,
        spec: &HitboxSpec,
        attacker_facing: Facing,
        level: &LevelGeometry,
        rng: &mut R,
    ) -> HitOutcome {
        if !self.is_hittable() {
            return HitOutcome::Ignored;
        }

        self.health = (self.health - spec.damage).max(0.0);
        debug!("{} took {} damage, {} left", self.name, spec.damage, self.health);

        if self.health <= 0.0 {
            self.knock_down(attacker_facing, true, level);
            return HitOutcome::Killed;
        }
        if spec.knockdown {
            self.knock_down(attacker_facing, false, level);
            return HitOutcome::KnockedDown;
        }

        let variant = GetHit::roll(rng);
        self.combo.take_hit(variant, self.tuning.hit_duration);
        self.hitbox = None;
        self.animation.play_animation(variant.animation(), false);
        HitOutcome::Staggered(variant)
    }

    /// External defeat: lethal when health is already gone
    pub fn defeat(&mut self, attacker_facing: Facing, level: &LevelGeometry) {
        let lethal = self.health <= 0.0;
        self.knock_down(attacker_facing, lethal, level);
    }

    fn knock_down(&mut self, attacker_facing: Facing, lethal: bool, level: &LevelGeometry) {
        info!("{} defeated", self.name);
        self.combo.cancel_all();
        self.combo.clear_hit();
        self.form.reset();
        self.hitbox = None;
        self.movement
            .knock_down(attacker_facing, lethal, level, &self.stats);
    }

    /// Draw the body and, in aiming forms, the weapon overlay
    pub fn draw(&self, target: &mut dyn RenderTarget, camera: &dyn ViewProjection) {
        let position = self.movement.position();
        let scale = Vec2::splat(self.stats.height * SPRITE_SCALE);

        if let (Some(uv), Some(sheet)) = (self.animation.body_uv(), self.animation.body_sheet()) {
            target.draw_quad(
                &QuadDraw {
                    sheet: sheet.to_string(),
                    layer: SpriteLayer::Body,
                    position,
                    scale,
                    rotation: 0.0,
                    uv,
                },
                camera,
            );
        }

        if let (Some(uv), Some(sheet)) = (self.animation.overlay_uv(), self.animation.overlay_sheet()) {
            target.draw_quad(
                &QuadDraw {
                    sheet: sheet.to_string(),
                    layer: SpriteLayer::Overlay,
                    position: self.overlay_anchor(),
                    scale,
                    rotation: 0.0,
                    uv,
                },
                camera,
            );
        }
    }

    /// Where the overlay sits: shoulder height, pushed back by recoil
    pub fn overlay_anchor(&self) -> Vec2 {
        let recoil = self
            .form
            .form()
            .aim()
            .map_or(Vec2::ZERO, |(_, aim)| aim.recoil_offset(&self.tuning));
        self.movement.position() + Vec2::new(0.0, self.stats.height * OVERLAY_ANCHOR) + recoil
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn combo(&self) -> &ComboResolver {
        &self.combo
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn animation(&self) -> &AnimationSelector {
        &self.animation
    }

    pub fn position(&self) -> Vec2 {
        self.movement.position()
    }

    pub fn facing(&self) -> Facing {
        self.movement.facing()
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        !self.movement.is_dead()
    }

    pub fn is_hittable(&self) -> bool {
        !self.movement.is_dying() && !self.movement.is_dead() && !self.combo.is_hit()
    }

    /// Drop onto the level below the current position
    pub fn settle(&mut self, level: &LevelGeometry) {
        self.movement.settle(level, &self.stats);
    }

    pub fn hurtbox_pose(&self) -> HurtboxPose {
        HurtboxPose::select(
            self.movement.is_sitting() || self.movement.is_rolling(),
            self.movement.is_climbing(),
            self.movement.facing(),
        )
    }

    pub fn hurtbox_aabb(&self) -> Aabb {
        self.hurtboxes
            .aabb(self.hurtbox_pose(), self.movement.position())
    }

    pub fn hitbox(&self) -> Option<&HitboxState> {
        self.hitbox.as_ref()
    }

    pub fn hitbox_aabb(&self) -> Option<Aabb> {
        self.hitbox
            .as_ref()
            .map(|hitbox| hitbox.aabb(self.movement.position()))
    }

    /// Record a victim on the live hitbox; false if already struck or no hitbox
    pub fn register_hit(&mut self, victim: CharacterId) -> bool {
        self.hitbox
            .as_mut()
            .is_some_and(|hitbox| hitbox.register_hit(victim))
    }
}

/// A gun shot or grenade throw for the surrounding game to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub shooter: CharacterId,
    pub weapon: AimWeapon,
    /// Degrees above horizontal
    pub angle: f32,
    pub facing: Facing,
    /// World position of the muzzle / throwing hand
    pub origin: Vec2,
}

/// Everything that happened across all characters in one tick
#[derive(Debug, Default)]
pub struct TickReport {
    pub hits: Vec<HitReport>,
    pub shots: Vec<Shot>,
}

/// Manages all characters in the game
#[derive(Debug)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
    library: Arc<AnimationLibrary>,
    stats: CharacterStats,
    tuning: CombatTuning,
    rng: StdRng,
}

impl CharacterManager {
    /// `seed` drives get-hit variant selection
    pub fn new(
        library: Arc<AnimationLibrary>,
        stats: CharacterStats,
        tuning: CombatTuning,
        seed: u64,
    ) -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
            library,
            stats,
            tuning,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn a new character standing on whatever is below `position`
    pub fn spawn_character(
        &mut self,
        name: &str,
        player_index: Option<usize>,
        position: Vec2,
        level: &LevelGeometry,
    ) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;

        let mut character = Character::new(
            id,
            name,
            player_index,
            position,
            self.stats.clone(),
            self.tuning.clone(),
            Arc::clone(&self.library),
        );
        character.settle(level);
        info!("Spawned {} (id {}) at {:?}", name, id, character.position());
        self.characters.push(character);

        id
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Get a character by player index
    pub fn get_by_player(&self, player_index: usize) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.player_index == Some(player_index))
    }

    /// Get a mutable character by player index
    pub fn get_by_player_mut(&mut self, player_index: usize) -> Option<&mut Character> {
        self.characters
            .iter_mut()
            .find(|c| c.player_index == Some(player_index))
    }

    /// Get all characters
    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Tick every character with its player's snapshot, then resolve hits.
    ///
    /// `inputs` is indexed by player index; characters without a player (or
    /// without a snapshot) get an idle one.
    pub fn update(&mut self, dt: f32, level: &LevelGeometry, inputs: &[InputSnapshot]) -> TickReport {
        let mut report = TickReport::default();

        for character in &mut self.characters {
            let input = character
                .player_index
                .and_then(|index| inputs.get(index))
                .copied()
                .unwrap_or_default();
            let events = character.update(dt, &input, level);
            for FormEvent::Fired { weapon, angle } in events.form {
                report.shots.push(Shot {
                    shooter: character.id,
                    weapon,
                    angle,
                    facing: character.animation.overlay_facing(),
                    origin: character.overlay_anchor(),
                });
            }
        }

        report.hits = combat::resolve_hits(&mut self.characters, level, &mut self.rng);
        report
    }

    /// Draw every character
    pub fn draw(&self, target: &mut dyn RenderTarget, camera: &dyn ViewProjection) {
        for character in &self.characters {
            character.draw(target, camera);
        }
    }

    /// Remove a character by ID
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(pos))
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }

    /// Get the number of alive characters
    pub fn alive_count(&self) -> usize {
        self.characters.iter().filter(|c| c.is_alive()).count()
    }

    /// Check if a player index is already taken
    pub fn is_player_taken(&self, player_index: usize) -> bool {
        self.characters
            .iter()
            .any(|c| c.player_index == Some(player_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::{Camera, RecordingTarget};
    use crate::game::characters::animation::SheetRole;
    use crate::game::characters::hitbox::BoxShape;
    use crate::game::characters::sprites;

    const DT: f32 = 1.0 / 60.0;

    fn library() -> Arc<AnimationLibrary> {
        Arc::new(sprites::builtin_library().unwrap())
    }

    fn fighter() -> Character {
        Character::new(
            0,
            "Test",
            Some(0),
            Vec2::ZERO,
            CharacterStats::default(),
            CombatTuning::default(),
            library(),
        )
    }

    fn level() -> LevelGeometry {
        LevelGeometry::new(0.0)
    }

    fn jab() -> HitboxSpec {
        HitboxSpec::new(BoxShape::new(0.07, 0.07, 0.07, 0.2), 5.0, false)
    }

    #[test]
    fn test_character_manager_new() {
        let manager = CharacterManager::new(library(), CharacterStats::default(), CombatTuning::default(), 1);
        assert_eq!(manager.count(), 0);
        assert_eq!(manager.alive_count(), 0);
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut manager =
            CharacterManager::new(library(), CharacterStats::default(), CombatTuning::default(), 1);
        let a = manager.spawn_character("A", Some(0), Vec2::new(-0.5, 1.0), &level());
        let b = manager.spawn_character("B", Some(1), Vec2::new(0.5, 1.0), &level());

        assert_ne!(a, b);
        assert_eq!(manager.count(), 2);
        assert!(manager.is_player_taken(1));
        assert_eq!(manager.get_by_player(1).map(|c| c.id), Some(b));
        // Spawned onto the ground
        assert_eq!(manager.get(a).unwrap().position().y, 0.0);

        assert!(manager.remove(a).is_some());
        assert!(manager.get(a).is_none());
    }

    #[test]
    fn test_manager_update_reports_hits_and_shots() {
        let level = level();
        let mut manager =
            CharacterManager::new(library(), CharacterStats::default(), CombatTuning::default(), 5);
        let a = manager.spawn_character("A", Some(0), Vec2::ZERO, &level);
        let b = manager.spawn_character("B", Some(1), Vec2::new(0.12, 0.0), &level);

        let idle = [InputSnapshot::default(); 2];
        let report = manager.update(DT, &level, &[InputSnapshot::pressing(&[Action::Punch])]);
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].victim, b);
        assert_eq!(manager.get(b).unwrap().health(), 95.0);

        manager.update(DT, &level, &[InputSnapshot::pressing(&[Action::GunMode])]);
        for _ in 0..20 {
            manager.update(DT, &level, &idle);
        }
        let report = manager.update(DT, &level, &[InputSnapshot::pressing(&[Action::Punch])]);
        assert_eq!(report.shots.len(), 1);
        assert_eq!(report.shots[0].shooter, a);
        assert_eq!(report.shots[0].weapon, AimWeapon::Gun);
        assert!(report.shots[0].origin.y > 0.0);
    }

    #[test]
    fn test_punch_activates_hitbox() {
        let mut fighter = fighter();
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
        assert_eq!(events.attack, Some(AnimationId::Punch1));
        assert!(fighter.hitbox_aabb().is_some());
        assert_eq!(fighter.animation().body_animation(), Some(AnimationId::Punch1));

        for _ in 0..10 {
            fighter.update(DT, &InputSnapshot::default(), &level());
        }
        assert!(fighter.hitbox_aabb().is_none(), "hitbox outlives its lifetime");
    }

    #[test]
    fn test_grounded_attack_roots() {
        let mut fighter = fighter();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
        fighter.update(DT, &InputSnapshot::holding(&[Action::MoveRight]), &level());
        assert_eq!(fighter.position().x, 0.0);
    }

    #[test]
    fn test_jump_cancels_combo() {
        let mut fighter = fighter();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
        assert!(fighter.combo().is_attacking());

        fighter.update(DT, &InputSnapshot::pressing(&[Action::Jump]), &level());
        assert!(!fighter.combo().is_attacking());
        assert!(fighter.movement().is_jumping());
    }

    #[test]
    fn test_combo_resets_after_finisher_plays() {
        let mut fighter = fighter();
        for _ in 0..3 {
            fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
            fighter.update(DT, &InputSnapshot::default(), &level());
        }
        assert!(fighter.combo().session(ComboFamily::Punch).is_completed());

        // Punch3 runs 0.42s
        for _ in 0..40 {
            fighter.update(DT, &InputSnapshot::default(), &level());
        }
        assert!(!fighter.combo().is_attacking());
        assert_eq!(fighter.animation().body_animation(), Some(AnimationId::Idle));
    }

    #[test]
    fn test_take_hit_staggers_then_recovers() {
        let mut fighter = fighter();
        let mut rng = StdRng::seed_from_u64(3);
        let spec = jab();

        let outcome = fighter.take_hit(&spec, Facing::Left, &level(), &mut rng);
        assert!(matches!(outcome, HitOutcome::Staggered(_)));
        assert!(fighter.combo().is_hit());
        assert_eq!(fighter.health(), 95.0);

        // Reeling: further hits and attacks are ignored
        assert_eq!(fighter.take_hit(&spec, Facing::Left, &level(), &mut rng), HitOutcome::Ignored);
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
        assert!(events.attack.is_none());

        for _ in 0..20 {
            fighter.update(DT, &InputSnapshot::default(), &level());
        }
        assert!(!fighter.combo().is_hit());
    }

    #[test]
    fn test_lethal_hit_kills() {
        let mut fighter = fighter();
        let mut rng = StdRng::seed_from_u64(3);
        let mut spec = jab();
        spec.damage = 500.0;

        assert_eq!(fighter.take_hit(&spec, Facing::Right, &level(), &mut rng), HitOutcome::Killed);
        for _ in 0..200 {
            fighter.update(DT, &InputSnapshot::default(), &level());
        }
        assert!(!fighter.is_alive());
        assert_eq!(fighter.animation().body_animation(), Some(AnimationId::Prone));
    }

    #[test]
    fn test_form_toggle_cancels_combo() {
        let mut fighter = fighter();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
        fighter.update(DT, &InputSnapshot::pressing(&[Action::GunMode]), &level());
        assert!(!fighter.combo().is_attacking());
        assert!(fighter.form().is_aiming());
    }

    #[test]
    fn test_gun_shot_emits_event() {
        let mut fighter = fighter();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::GunMode]), &level());
        for _ in 0..20 {
            fighter.update(DT, &InputSnapshot::default(), &level());
        }
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level());
        assert_eq!(events.form.len(), 1);
        // Fire key doesn't punch in gun mode
        assert!(events.attack.is_none());
    }

    #[test]
    fn test_draw_emits_body_and_overlay() {
        let mut fighter = fighter();
        let camera = Camera::new(Vec2::ZERO, 2.0, 16.0 / 9.0);
        let mut target = RecordingTarget::new();

        fighter.update(DT, &InputSnapshot::default(), &level());
        fighter.draw(&mut target, &camera);
        assert_eq!(target.quads.len(), 1);
        assert_eq!(target.quads[0].layer, SpriteLayer::Body);
        assert_eq!(target.quads[0].sheet, sprites::BODY_SHEET);

        target.clear();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::GrenadeMode]), &level());
        fighter.draw(&mut target, &camera);
        assert_eq!(target.quads.len(), 2);
        assert_eq!(target.quads[1].layer, SpriteLayer::Overlay);
        assert_eq!(target.quads[1].sheet, sprites::OVERLAY_SHEET);
    }

    #[test]
    fn test_unbound_special_ends_at_once() {
        let layouts: Vec<_> = sprites::standard_layouts()
            .into_iter()
            .filter(|layout| layout.role == SheetRole::Body)
            .collect();
        let library = AnimationLibrary::load(&sprites::builtin_sheets(), &layouts).unwrap();
        let mut fighter = Character::new(
            0,
            "Test",
            Some(0),
            Vec2::ZERO,
            CharacterStats::default(),
            CombatTuning::default(),
            Arc::new(library),
        );

        fighter.update(DT, &InputSnapshot::pressing(&[Action::WerewolfForm]), &level());
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::Special]), &level());
        assert_eq!(events.attack, Some(AnimationId::WerewolfPounce));
        assert!(fighter.form().travel_speed(&fighter.tuning).is_none());

        for _ in 0..120 {
            fighter.update(DT, &InputSnapshot::holding(&[Action::MoveLeft]), &level());
        }
        // Plain walking only: 2s at walk speed
        assert!(fighter.position().x.abs() < 2.0 * fighter.stats.walk_speed + 0.01);
    }

    #[test]
    fn test_crouch_hurtbox_when_sitting() {
        let mut fighter = fighter();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::Down]), &level());
        assert_eq!(fighter.hurtbox_pose(), HurtboxPose::Crouch);
    }

    #[test]
    fn test_roll_uses_crouch_hurtbox() {
        let mut fighter = fighter();
        fighter.update(DT, &InputSnapshot::pressing(&[Action::MoveRight, Action::Roll]), &level());
        assert!(fighter.movement().is_rolling());
        assert_eq!(fighter.hurtbox_pose(), HurtboxPose::Crouch);

        let standing = fighter.hurtboxes.aabb(HurtboxPose::Default, fighter.position());
        assert!(fighter.hurtbox_aabb().top() < standing.top());
    }

    #[test]
    fn test_weapon_family_needs_weapon() {
        let mut fighter = fighter();
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::WeaponAttack]), &level());
        assert!(events.attack.is_none());

        fighter.weapon = Weapon::Axe;
        fighter.update(DT, &InputSnapshot::default(), &level());
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::WeaponAttack]), &level());
        assert_eq!(events.attack, Some(AnimationId::Axe1));
    }
}
