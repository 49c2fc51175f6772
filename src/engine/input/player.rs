// Per-player input state management

use super::action::Action;
use super::snapshot::{ActionSet, InputSnapshot};

/// Represents the input state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID (0-based)
    player_id: usize,

    /// Actions that are currently pressed
    pressed: ActionSet,

    /// Actions pressed since the last `update` (press events)
    just_pressed: ActionSet,

    /// Actions released since the last `update` (release events)
    just_released: ActionSet,

    /// Actions that were pressed in the previous frame
    previous_pressed: ActionSet,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: ActionSet::EMPTY,
            just_pressed: ActionSet::EMPTY,
            just_released: ActionSet::EMPTY,
            previous_pressed: ActionSet::EMPTY,
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(action) && self.previous_pressed.contains(action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if !self.pressed.contains(action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.contains(action) {
            self.just_released.insert(action);
            self.pressed.remove(action);
        }
    }

    /// Freeze the current state into a snapshot for the simulation tick.
    ///
    /// A key tapped and released between two ticks still shows up as pressed.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::new(self.pressed, self.just_pressed)
    }

    /// Update input state for a new frame
    /// Call this once per tick after the snapshot was consumed
    pub(crate) fn update(&mut self) {
        self.just_pressed = ActionSet::EMPTY;
        self.just_released = ActionSet::EMPTY;
        self.previous_pressed = self.pressed;
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed = ActionSet::EMPTY;
        self.just_pressed = ActionSet::EMPTY;
        self.just_released = ActionSet::EMPTY;
        self.previous_pressed = ActionSet::EMPTY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.update();
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Punch);
        assert!(input.just_pressed(Action::Punch));

        input.update();
        assert!(input.is_pressed(Action::Punch));
        assert!(!input.just_pressed(Action::Punch));
    }

    #[test]
    fn test_held_detection() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(!input.is_held(Action::Jump));

        input.update();
        assert!(input.is_held(Action::Jump));
    }

    #[test]
    fn test_tap_between_ticks_still_reaches_snapshot() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Kick);
        input.release(Action::Kick);

        let snapshot = input.snapshot();
        assert!(snapshot.just_pressed(Action::Kick));
        assert!(!snapshot.held(Action::Kick));
    }

    #[test]
    fn test_snapshot_after_update_keeps_held() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveRight);
        input.update();

        let snapshot = input.snapshot();
        assert!(snapshot.held(Action::MoveRight));
        assert!(!snapshot.just_pressed(Action::MoveRight));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::Punch);
        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.is_pressed(Action::Punch));
        assert_eq!(input.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new(0);
        input.release(Action::Jump);
        assert!(!input.just_released(Action::Jump));
    }
}
