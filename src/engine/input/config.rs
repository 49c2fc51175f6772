// Per-player key binding tables and remapping

use super::action::{default_p1_bindings, default_p2_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Key binding table for one player
#[derive(Debug, Clone)]
pub struct InputConfig {
    player_id: usize,
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            bindings: HashMap::new(),
        }
    }

    /// Build a table from (source, action) pairs; later pairs win on conflicts
    pub fn from_bindings(player_id: usize, bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new(player_id);
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Default table for a local player slot
    pub fn defaults_for(player_id: usize) -> Self {
        let bindings = match player_id {
            0 => default_p1_bindings(),
            1 => default_p2_bindings(),
            // Only two players share one keyboard
            _ => Vec::new(),
        };
        Self::from_bindings(player_id, bindings)
    }

    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Bind a source to an action, replacing whatever it was bound to
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Make `source` the only binding for `action`
    pub fn rebind(&mut self, action: Action, source: InputSource) {
        self.unbind_action(action);
        self.bind(source, action);
    }

    pub fn unbind_source(&mut self, source: InputSource) {
        self.bindings.remove(&source);
    }

    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// All sources bound to `action`
    pub fn sources_for(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::defaults_for(self.player_id);
    }
}

/// Binding tables for every local player plus the global (menu) table
#[derive(Debug)]
pub struct InputConfigManager {
    configs: Vec<InputConfig>,
    global_config: InputConfig,
}

impl InputConfigManager {
    pub fn new(max_players: usize) -> Self {
        Self {
            configs: (0..max_players).map(InputConfig::defaults_for).collect(),
            global_config: InputConfig::from_bindings(usize::MAX, global_bindings()),
        }
    }

    pub fn get_config(&self, player_id: usize) -> Option<&InputConfig> {
        self.configs.get(player_id)
    }

    pub fn get_config_mut(&mut self, player_id: usize) -> Option<&mut InputConfig> {
        self.configs.get_mut(player_id)
    }

    pub fn global_config(&self) -> &InputConfig {
        &self.global_config
    }

    /// Resolve a source for a player: player table first, then global
    pub fn get_action(&self, player_id: usize, source: InputSource) -> Option<Action> {
        self.get_config(player_id)
            .and_then(|config| config.get_action(source))
            .or_else(|| self.global_config.get_action(source))
    }

    pub fn reset_all_to_defaults(&mut self) {
        for config in &mut self.configs {
            config.reset_to_defaults();
        }
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_and_lookup() {
        let mut config = InputConfig::new(0);
        let source = InputSource::key(KeyCode::KeyA);
        config.bind(source, Action::MoveLeft);

        assert_eq!(config.get_action(source), Some(Action::MoveLeft));
        config.unbind_source(source);
        assert_eq!(config.get_action(source), None);
    }

    #[test]
    fn test_rebind_source_to_other_action() {
        let mut config = InputConfig::new(0);
        let source = InputSource::key(KeyCode::KeyA);

        config.bind(source, Action::MoveLeft);
        config.bind(source, Action::MoveRight);

        assert_eq!(config.get_action(source), Some(Action::MoveRight));
        assert!(!config.has_binding(Action::MoveLeft));
    }

    #[test]
    fn test_rebind_action_drops_old_sources() {
        let mut config = InputConfig::defaults_for(0);
        let new_key = InputSource::key(KeyCode::KeyJ);

        config.rebind(Action::Punch, new_key);

        assert_eq!(config.sources_for(Action::Punch), vec![new_key]);
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyF)), None);
    }

    #[test]
    fn test_unbind_action_removes_every_source() {
        let mut config = InputConfig::new(0);
        config.bind(InputSource::key(KeyCode::KeyA), Action::MoveLeft);
        config.bind(InputSource::key(KeyCode::KeyJ), Action::MoveLeft);

        config.unbind_action(Action::MoveLeft);
        assert!(config.sources_for(Action::MoveLeft).is_empty());
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::new(0);
        config.bind(InputSource::key(KeyCode::KeyZ), Action::MoveLeft);
        config.reset_to_defaults();

        assert!(config.has_binding(Action::Jump));
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyF)),
            Some(Action::Punch)
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyZ)), None);
    }

    #[test]
    fn test_second_player_uses_arrows() {
        let manager = InputConfigManager::new(2);
        let left = InputSource::key(KeyCode::ArrowLeft);

        assert_eq!(manager.get_action(1, left), Some(Action::MoveLeft));
        assert_eq!(manager.get_action(0, left), None);
    }

    #[test]
    fn test_global_bindings_apply_to_every_player() {
        let manager = InputConfigManager::new(2);
        let menu_key = InputSource::key(KeyCode::Escape);

        assert_eq!(manager.get_action(0, menu_key), Some(Action::Menu));
        assert_eq!(manager.get_action(1, menu_key), Some(Action::Menu));
    }

    #[test]
    fn test_manager_bounds_and_reset() {
        let mut manager = InputConfigManager::new(2);
        assert!(manager.get_config(2).is_none());

        if let Some(config) = manager.get_config_mut(0) {
            config.clear();
        }
        manager.reset_all_to_defaults();
        assert!(manager.get_config(0).unwrap().has_binding(Action::MoveLeft));
    }
}
