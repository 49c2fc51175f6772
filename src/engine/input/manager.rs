// Input manager - routes keyboard events to per-player state

use super::action::{Action, InputSource};
use super::config::InputConfigManager;
use super::player::PlayerInput;
use super::snapshot::InputSnapshot;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Routes raw key events through each player's binding table
pub struct InputManager {
    config: InputConfigManager,
    players: Vec<PlayerInput>,
}

impl InputManager {
    pub fn new(max_players: usize) -> Self {
        Self {
            config: InputConfigManager::new(max_players),
            players: (0..max_players).map(PlayerInput::new).collect(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let pressed = event.state == ElementState::Pressed;
            self.process_key(InputSource::key(key_code), pressed, event.repeat);
        }
    }

    /// Apply one key transition to every player bound to it.
    ///
    /// OS auto-repeat presses are dropped; holds are tracked by the snapshot.
    pub fn process_key(&mut self, source: InputSource, pressed: bool, repeat: bool) {
        if pressed && repeat {
            return;
        }

        for player in &mut self.players {
            let Some(action) = self.config.get_action(player.player_id(), source) else {
                continue;
            };
            if pressed {
                player.press(action);
            } else {
                player.release(action);
            }
        }
    }

    /// Snapshot of a player's input for the current tick
    pub fn snapshot(&self, player_id: usize) -> InputSnapshot {
        self.players
            .get(player_id)
            .map(PlayerInput::snapshot)
            .unwrap_or_default()
    }

    /// Clear edge state once the tick consumed its snapshots
    pub fn end_tick(&mut self) {
        for player in &mut self.players {
            player.update();
        }
    }

    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    pub fn player_mut(&mut self, player_id: usize) -> Option<&mut PlayerInput> {
        self.players.get_mut(player_id)
    }

    pub fn config(&self) -> &InputConfigManager {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfigManager {
        &mut self.config
    }

    /// Check if any player pressed a specific action this frame
    pub fn any_player_just_pressed(&self, action: Action) -> bool {
        self.players.iter().any(|p| p.just_pressed(action))
    }

    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(2)
    }
}
