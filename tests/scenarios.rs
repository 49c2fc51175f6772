// End-to-end scenarios driven through the public API

use std::sync::Arc;

use approx::assert_relative_eq;
use glam::Vec2;

use moonfall::engine::input::{Action, InputSnapshot};
use moonfall::engine::physics::{check_collision, Aabb, LevelGeometry, Rect};
use moonfall::engine::renderer::{Camera, RecordingTarget};
use moonfall::game::characters::{
    sprites, AnimationId, Character, CharacterManager, CharacterStats, ComboFamily, CombatTuning,
    Facing, HitOutcome, MotionControl, MovementController,
};
use moonfall::game::characters::state::DeathSequence;

const DT: f32 = 1.0 / 60.0;

fn fighter(x: f32) -> Character {
    Character::new(
        0,
        "Scenario",
        Some(0),
        Vec2::new(x, 0.0),
        CharacterStats::default(),
        CombatTuning::default(),
        Arc::new(sprites::builtin_library().unwrap()),
    )
}

#[test]
fn jump_rises_falls_and_lands_exactly_on_ground() {
    let stats = CharacterStats::default();
    let level = LevelGeometry::new(0.0);
    let mut movement = MovementController::new(Vec2::ZERO, &stats);

    let events = movement.update(
        DT,
        &InputSnapshot::pressing(&[Action::Jump]),
        &level,
        &stats,
        MotionControl::Free,
    );
    assert!(events.jumped);
    assert!(movement.is_jumping());
    assert_eq!(movement.velocity_y(), stats.jump_force);

    let mut expected_velocity = stats.jump_force;
    let mut peak = 0.0f32;
    let mut landed = false;
    for _ in 0..120 {
        let previous_y = movement.position().y;
        let events = movement.update(DT, &InputSnapshot::default(), &level, &stats, MotionControl::Free);
        expected_velocity -= stats.gravity * DT;
        peak = peak.max(movement.position().y);

        if events.landed {
            landed = true;
            assert!(previous_y > 0.0);
            break;
        }
        assert_eq!(movement.velocity_y(), expected_velocity);
        assert!(movement.position().y > 0.0);
    }

    assert!(landed);
    assert!(peak > 0.5);
    assert_eq!(movement.position().y, 0.0);
    assert!(!movement.is_jumping());
    assert_eq!(movement.velocity_y(), 0.0);
}

#[test]
fn jump_lands_on_platform_top() {
    let stats = CharacterStats::default();
    let level = LevelGeometry::new(0.0).with_platform(Rect::new(-0.5, 0.25, 1.0, 0.05));
    let mut movement = MovementController::new(Vec2::ZERO, &stats);

    movement.update(DT, &InputSnapshot::pressing(&[Action::Jump]), &level, &stats, MotionControl::Free);
    for _ in 0..120 {
        if movement
            .update(DT, &InputSnapshot::default(), &level, &stats, MotionControl::Free)
            .landed
        {
            break;
        }
    }

    assert!(movement.is_on_platform());
    assert_relative_eq!(movement.position().y, 0.3);
}

#[test]
fn three_punches_chain_and_fourth_is_ignored() {
    let level = LevelGeometry::new(0.0);
    let mut fighter = fighter(0.0);
    let mut animations = Vec::new();

    for _ in 0..3 {
        let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level);
        animations.extend(events.attack);
        fighter.update(DT, &InputSnapshot::default(), &level);
    }
    assert_eq!(
        animations,
        vec![AnimationId::Punch1, AnimationId::Punch2, AnimationId::Punch3]
    );
    assert!(fighter.combo().session(ComboFamily::Punch).is_completed());

    let events = fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level);
    assert!(events.attack.is_none());
    assert_eq!(fighter.combo().session(ComboFamily::Punch).step(), 3);
}

#[test]
fn single_punch_times_out_back_to_idle() {
    let level = LevelGeometry::new(0.0);
    let mut fighter = fighter(0.0);

    fighter.update(DT, &InputSnapshot::pressing(&[Action::Punch]), &level);
    assert_eq!(fighter.combo().session(ComboFamily::Punch).step(), 1);

    // 0.6s of nothing
    for _ in 0..36 {
        fighter.update(DT, &InputSnapshot::default(), &level);
    }
    assert_eq!(fighter.combo().session(ComboFamily::Punch).step(), 0);
    assert_eq!(fighter.animation().body_animation(), Some(AnimationId::Idle));
}

#[test]
fn facing_flip_is_a_function_of_facing() {
    let level = LevelGeometry::new(0.0);
    let camera = Camera::new(Vec2::ZERO, 2.0, 16.0 / 9.0);
    let mut fighter = fighter(0.0);

    fighter.update(DT, &InputSnapshot::pressing(&[Action::MoveLeft]), &level);
    fighter.update(DT, &InputSnapshot::default(), &level);
    assert_eq!(fighter.facing(), Facing::Left);

    let mut first = RecordingTarget::new();
    let mut second = RecordingTarget::new();
    fighter.draw(&mut first, &camera);
    fighter.draw(&mut second, &camera);
    assert_eq!(first.quads, second.quads);

    let uv = first.quads[0].uv;
    assert!(uv.u0 > uv.u1, "left-facing body is mirrored");
}

#[test]
fn edge_touching_boxes_do_not_collide() {
    let attacker = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
    let target = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
    assert!(!check_collision(&attacker, &target));

    let overlapping = Aabb::new(Vec2::new(0.999, 0.0), Vec2::new(2.0, 1.0));
    assert!(check_collision(&attacker, &overlapping));
}

#[test]
fn knockdown_arc_is_deterministic() {
    let stats = CharacterStats::default();
    let run = || {
        let mut death = DeathSequence::new(Vec2::ZERO, Facing::Right, false);
        let mut peak = 0.0f32;
        for _ in 0..48 {
            death.advance(DT);
            peak = peak.max(death.position(&stats).y);
        }
        (peak, death.position(&stats).x)
    };

    let (peak_a, x_a) = run();
    let (peak_b, x_b) = run();
    assert_eq!(peak_a.to_bits(), peak_b.to_bits());
    assert_eq!(x_a.to_bits(), x_b.to_bits());
    assert_relative_eq!(x_a, stats.knockdown_distance, epsilon = 1e-4);
    assert!(peak_a > 0.0 && peak_a <= stats.knockdown_height + 1e-6);
}

#[test]
fn finisher_knocks_the_other_fighter_down_and_they_get_up() {
    let level = LevelGeometry::new(0.0);
    let library = Arc::new(sprites::builtin_library().unwrap());
    let mut manager = CharacterManager::new(library, CharacterStats::default(), CombatTuning::default(), 7);
    let attacker = manager.spawn_character("Attacker", Some(0), Vec2::ZERO, &level);
    let victim = manager.spawn_character("Victim", Some(1), Vec2::new(0.12, 0.0), &level);

    let punch = [InputSnapshot::pressing(&[Action::Punch])];
    let idle = [InputSnapshot::default()];

    // First two punches stagger, and hit stun lasts past each next press
    let mut outcomes = Vec::new();
    for _ in 0..3 {
        let report = manager.update(DT, &level, &punch);
        outcomes.extend(report.hits.iter().map(|hit| hit.outcome));
        for _ in 0..20 {
            outcomes.extend(manager.update(DT, &level, &idle).hits.iter().map(|hit| hit.outcome));
        }
    }

    assert!(matches!(outcomes.first(), Some(HitOutcome::Staggered(_))));
    assert_eq!(outcomes.last(), Some(&HitOutcome::KnockedDown));
    assert!(manager.get(victim).unwrap().movement().is_dying());
    assert_eq!(manager.get(attacker).unwrap().health(), 100.0);

    // Prone hold ends at 2.8s
    for _ in 0..180 {
        manager.update(DT, &level, &idle);
    }
    let victim = manager.get(victim).unwrap();
    assert!(victim.is_alive());
    assert!(victim.is_hittable());
    assert_eq!(manager.alive_count(), 2);
}
