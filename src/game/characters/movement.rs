// Movement controller: walking, running, jumps, platforms, ladders, knockdowns

use glam::Vec2;
use log::{debug, info, trace};

use crate::engine::input::{Action, InputSnapshot};
use crate::engine::physics::{Aabb, LevelGeometry, Rect};

use super::state::{DeathPhase, DeathSequence, Facing, HardLanding, HardLandingPhase, MovementState};
use super::stats::CharacterStats;

/// How far below the feet a ladder is still reachable from its top
const LADDER_REACH: f32 = 0.05;

/// How much of the input the movement layer may act on this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionControl {
    #[default]
    Free,
    /// No walking; jump, roll and sit still work (they cancel the attack)
    Rooted,
    /// Input ignored; gravity still applies
    Frozen,
    /// Carried forward at a fixed speed, input ignored
    Dash { speed: f32 },
}

impl MotionControl {
    fn accepts_input(&self) -> bool {
        matches!(self, Self::Free | Self::Rooted)
    }
}

/// What happened during a movement tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementEvents {
    pub jumped: bool,
    pub landed: bool,
    pub hard_landing: bool,
    /// Walked off a platform edge or let go of a ladder
    pub fell: bool,
    pub started_sitting: bool,
    pub started_rolling: bool,
    pub started_climbing: bool,
    /// Got up after a non-lethal knockdown
    pub recovered: bool,
    /// Lethal knockdown finished
    pub died: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Climb {
    ladder: Rect,
    frame: u32,
    down_held: f32,
    repeat: f32,
}

/// Position and motion of one character. Position is the feet point.
#[derive(Debug, Clone)]
pub struct MovementController {
    position: Vec2,
    size: Vec2,
    facing: Facing,
    state: MovementState,

    jumping: bool,
    velocity_y: f32,
    on_platform: bool,
    platform_y: f32,

    sitting: bool,
    /// Direction key whose double tap started the run
    running: Option<Action>,
    rolling: bool,
    /// Time since the last press of (left, right), for double taps
    since_tap: [f32; 2],

    climb: Option<Climb>,
    death: Option<DeathSequence>,
    hard_landing: Option<HardLanding>,
    dead: bool,
}

impl MovementController {
    pub fn new(position: Vec2, stats: &CharacterStats) -> Self {
        Self {
            position,
            size: Vec2::new(stats.width, stats.height),
            facing: Facing::Right,
            state: MovementState::Idle,
            jumping: false,
            velocity_y: 0.0,
            on_platform: false,
            platform_y: 0.0,
            sitting: false,
            running: None,
            rolling: false,
            since_tap: [f32::INFINITY; 2],
            climb: None,
            death: None,
            hard_landing: None,
            dead: false,
        }
    }

    /// Drop straight onto whatever is below (spawning, teleports)
    pub fn settle(&mut self, level: &LevelGeometry, stats: &CharacterStats) {
        match level.surface_below(&self.body_aabb(), self.position.y, stats.platform_epsilon) {
            Some(top) => {
                self.position.y = top;
                self.on_platform = true;
                self.platform_y = top;
            }
            None => {
                self.position.y = level.ground_y;
                self.on_platform = false;
            }
        }
        self.jumping = false;
        self.velocity_y = 0.0;
    }

    /// Advance one tick
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        level: &LevelGeometry,
        stats: &CharacterStats,
        control: MotionControl,
    ) -> MovementEvents {
        let mut events = MovementEvents::default();
        for since in &mut self.since_tap {
            *since += dt;
        }

        if self.death.is_some() {
            self.update_death(dt, stats, &mut events);
            return events;
        }
        if self.dead {
            return events;
        }

        if let Some(landing) = &mut self.hard_landing {
            if landing.advance(dt, stats).is_some() {
                return events;
            }
            trace!("Hard landing over");
            self.hard_landing = None;
        }

        if self.climb.is_some() {
            self.update_climb(dt, input, level, stats, &mut events);
            return events;
        }

        if control == MotionControl::Free && !self.jumping && self.try_start_climb(input, level, stats) {
            events.started_climbing = true;
            self.update_climb(dt, input, level, stats, &mut events);
            return events;
        }

        // Jump: velocity only, integration starts next tick
        if control.accepts_input() && !self.jumping && input.just_pressed(Action::Jump) {
            self.jumping = true;
            self.velocity_y = stats.jump_force;
            self.on_platform = false;
            self.sitting = false;
            events.jumped = true;
            trace!("Jump from y={:.3}", self.position.y);
        }

        let direction = if control == MotionControl::Free {
            self.track_double_tap(input, stats);
            input.horizontal()
        } else {
            0.0
        };
        if self.running.is_some_and(|key| direction == 0.0 || !input.held(key)) {
            self.running = None;
        }

        let was_rolling = self.rolling;
        self.rolling = control.accepts_input() && !self.jumping && input.held(Action::Roll);
        events.started_rolling = self.rolling && !was_rolling;

        let was_sitting = self.sitting;
        self.sitting = control.accepts_input()
            && !self.jumping
            && !self.rolling
            && direction == 0.0
            && input.held(Action::Down);
        events.started_sitting = self.sitting && !was_sitting;

        let velocity_x = match control {
            MotionControl::Dash { speed } => self.facing.sign() * speed,
            _ if self.rolling => {
                let heading = if direction != 0.0 {
                    direction
                } else {
                    self.facing.sign()
                };
                heading * stats.walk_speed * stats.roll_multiplier
            }
            _ => {
                let mut speed = stats.walk_speed;
                if self.running.is_some() || (input.held(Action::Run) && control == MotionControl::Free) {
                    speed *= stats.run_multiplier;
                }
                if self.jumping {
                    speed *= stats.air_multiplier;
                }
                direction * speed
            }
        };
        let dx = velocity_x * dt;

        if let Some(facing) = Facing::from_direction(direction) {
            self.facing = facing;
        }
        self.state = match Facing::from_direction(dx) {
            Some(Facing::Left) => MovementState::MoveLeft,
            Some(Facing::Right) => MovementState::MoveRight,
            None => MovementState::Idle,
        };

        if dx != 0.0 {
            self.move_horizontally(dx, level);
        }

        if self.jumping && !events.jumped {
            self.integrate_vertical(dt, level, stats, &mut events);
        } else if !self.jumping
            && self.on_platform
            && !level.supports(&self.body_aabb(), self.platform_y, stats.platform_epsilon)
        {
            self.fall(&mut events);
        }

        events
    }

    fn track_double_tap(&mut self, input: &InputSnapshot, stats: &CharacterStats) {
        for (slot, action) in [Action::MoveLeft, Action::MoveRight].into_iter().enumerate() {
            if input.just_pressed(action) {
                if self.since_tap[slot] <= stats.double_tap_window {
                    debug!("Double tap {:?}: running", action);
                    self.running = Some(action);
                }
                self.since_tap[slot] = 0.0;
            }
        }
    }

    fn move_horizontally(&mut self, dx: f32, level: &LevelGeometry) {
        self.position.x += dx;
        let correction = level.resolve_walls(&self.body_aabb(), Vec2::new(dx, 0.0));
        self.position += correction;

        if !self.jumping && correction.y > 0.0 {
            // Stepped up onto a wall top
            self.on_platform = true;
            self.platform_y = self.position.y;
        } else if !self.jumping && correction.y < 0.0 {
            self.jumping = true;
            self.velocity_y = 0.0;
            self.on_platform = false;
        }
    }

    /// Semi-implicit Euler: velocity first, then position
    fn integrate_vertical(
        &mut self,
        dt: f32,
        level: &LevelGeometry,
        stats: &CharacterStats,
        events: &mut MovementEvents,
    ) {
        let previous_y = self.position.y;
        self.velocity_y -= stats.gravity * dt;
        self.position.y += self.velocity_y * dt;

        if self.velocity_y > 0.0 {
            return;
        }

        let footprint = self.body_aabb();
        if let Some(top) =
            level.landing_platform(&footprint, previous_y, self.position.y, stats.platform_epsilon)
        {
            self.land(top, true, stats, events);
        } else if self.position.y <= level.ground_y {
            self.land(level.ground_y, false, stats, events);
        }
    }

    fn land(&mut self, y: f32, on_platform: bool, stats: &CharacterStats, events: &mut MovementEvents) {
        let impact = -self.velocity_y;
        self.position.y = y;
        self.jumping = false;
        self.velocity_y = 0.0;
        self.on_platform = on_platform;
        if on_platform {
            self.platform_y = y;
        }
        events.landed = true;

        if impact >= stats.hard_landing_speed {
            info!("Hard landing at {:.2} units/s", impact);
            self.hard_landing = Some(HardLanding::new());
            self.running = None;
            self.state = MovementState::Idle;
            events.hard_landing = true;
        }
    }

    fn fall(&mut self, events: &mut MovementEvents) {
        trace!("Walked off platform at y={:.3}", self.platform_y);
        self.jumping = true;
        self.velocity_y = 0.0;
        self.on_platform = false;
        self.sitting = false;
        self.rolling = false;
        events.fell = true;
    }

    /// Body box extended slightly below the feet, so a ladder can be taken
    /// down from its top
    fn ladder_sensor(&self) -> Aabb {
        let half = self.size.x * 0.5;
        Aabb::new(
            Vec2::new(self.position.x - half, self.position.y - LADDER_REACH),
            Vec2::new(self.position.x + half, self.position.y + self.size.y),
        )
    }

    fn try_start_climb(
        &mut self,
        input: &InputSnapshot,
        level: &LevelGeometry,
        stats: &CharacterStats,
    ) -> bool {
        let Some(ladder) = level.ladder_at(&self.ladder_sensor()) else {
            return false;
        };
        let eps = stats.platform_epsilon;
        let going_up = input.held(Action::Up) && ladder.top() > self.position.y + eps;
        let going_down = input.held(Action::Down) && ladder.bottom() < self.position.y - eps;
        if !going_up && !going_down {
            return false;
        }

        debug!("Climbing ladder at x={:.2}", ladder.position.x);
        self.position.x = ladder.position.x + ladder.size.x * 0.5;
        self.climb = Some(Climb {
            ladder,
            frame: 0,
            down_held: 0.0,
            repeat: 0.0,
        });
        self.sitting = false;
        self.rolling = false;
        self.running = None;
        self.state = MovementState::Idle;
        true
    }

    /// Discrete climbing: one frame and one step per press, continuous
    /// descent while climb-down is held
    fn update_climb(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        level: &LevelGeometry,
        stats: &CharacterStats,
        events: &mut MovementEvents,
    ) {
        let Some(mut climb) = self.climb.take() else {
            return;
        };

        if input.just_pressed(Action::Jump) {
            // Let go
            self.jumping = true;
            self.velocity_y = 0.0;
            self.on_platform = false;
            events.fell = true;
            return;
        }

        let mut steps: i32 = 0;
        if input.just_pressed(Action::Up) {
            steps += 1;
        }
        if input.just_pressed(Action::Down) {
            steps -= 1;
            climb.down_held = 0.0;
            climb.repeat = 0.0;
        } else if input.held(Action::Down) {
            climb.down_held += dt;
            if climb.down_held > stats.climb_hold_threshold {
                let interval = stats.climb_repeat_interval.max(1e-3);
                climb.repeat += dt;
                while climb.repeat >= interval {
                    climb.repeat -= interval;
                    steps -= 1;
                }
            }
        } else {
            climb.down_held = 0.0;
            climb.repeat = 0.0;
        }

        let frames = stats.climb_frames.max(1) as i32;
        let sign = steps.signum();
        for _ in 0..steps.abs() {
            climb.frame = (climb.frame as i32 + sign).rem_euclid(frames) as u32;
            self.position.y += sign as f32 * stats.climb_step;

            if self.position.y >= climb.ladder.top() {
                self.leave_ladder(climb.ladder.top(), level, stats);
                return;
            }
            if self.position.y <= climb.ladder.bottom() {
                self.leave_ladder(climb.ladder.bottom(), level, stats);
                return;
            }
        }

        self.climb = Some(climb);
    }

    fn leave_ladder(&mut self, y: f32, level: &LevelGeometry, stats: &CharacterStats) {
        debug!("Left ladder at y={:.3}", y);
        if y <= level.ground_y + stats.platform_epsilon {
            self.position.y = level.ground_y;
            self.on_platform = false;
        } else {
            // If nothing is actually there the support check drops us next tick
            self.position.y = y;
            self.on_platform = true;
            self.platform_y = y;
        }
    }

    /// Start the knockdown timeline away from the attacker
    pub fn knock_down(
        &mut self,
        attacker_facing: Facing,
        lethal: bool,
        level: &LevelGeometry,
        stats: &CharacterStats,
    ) {
        if self.death.is_some() || self.dead {
            return;
        }

        if self.jumping || self.climb.is_some() {
            match level.surface_below(&self.body_aabb(), self.position.y, stats.platform_epsilon) {
                Some(top) => {
                    self.position.y = top;
                    self.on_platform = true;
                    self.platform_y = top;
                }
                None => {
                    self.position.y = level.ground_y;
                    self.on_platform = false;
                }
            }
        }

        info!(
            "Knocked down at ({:.2}, {:.2}){}",
            self.position.x,
            self.position.y,
            if lethal { ", lethal" } else { "" }
        );
        // The whole arc, raised body included, has to stay clear of walls
        let sweep = Aabb::from_feet(
            self.position,
            Vec2::new(self.size.x, self.size.y + stats.knockdown_height),
        );
        let reach = level.clearance(&sweep, attacker_facing.sign());
        self.death = Some(DeathSequence::new(self.position, attacker_facing, lethal).with_reach(reach));
        self.facing = attacker_facing.opposite();
        self.state = MovementState::Die;
        self.jumping = false;
        self.velocity_y = 0.0;
        self.sitting = false;
        self.rolling = false;
        self.running = None;
        self.climb = None;
        self.hard_landing = None;
    }

    fn update_death(&mut self, dt: f32, stats: &CharacterStats, events: &mut MovementEvents) {
        let Some(death) = &mut self.death else {
            return;
        };
        death.advance(dt);
        self.position = death.position(stats);

        if death.phase(stats) != DeathPhase::Recovered {
            return;
        }

        if death.is_lethal() {
            info!("Character died");
            self.dead = true;
            events.died = true;
        } else {
            debug!("Recovered from knockdown");
            self.state = MovementState::Idle;
            events.recovered = true;
        }
        self.death = None;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn body_aabb(&self) -> Aabb {
        Aabb::from_feet(self.position, self.size)
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn is_on_platform(&self) -> bool {
        self.on_platform
    }

    pub fn platform_y(&self) -> f32 {
        self.platform_y
    }

    pub fn is_sitting(&self) -> bool {
        self.sitting
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    pub fn is_climbing(&self) -> bool {
        self.climb.is_some()
    }

    pub fn climb_frame(&self) -> Option<u32> {
        self.climb.as_ref().map(|climb| climb.frame)
    }

    /// Knockdown phase while the timeline runs
    pub fn death_phase(&self, stats: &CharacterStats) -> Option<DeathPhase> {
        self.death.as_ref().map(|death| death.phase(stats))
    }

    pub fn is_dying(&self) -> bool {
        self.death.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn hard_landing_phase(&self, stats: &CharacterStats) -> Option<HardLandingPhase> {
        self.hard_landing.as_ref().and_then(|landing| landing.phase(stats))
    }

    /// A timed sequence owns the body and input is ignored
    pub fn is_locked(&self) -> bool {
        self.dead || self.death.is_some() || self.hard_landing.is_some()
    }
}
