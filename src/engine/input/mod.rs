// Input handling system
//
// Keyboard events are routed through per-player binding tables into
// `PlayerInput`, which is frozen once per tick into an `InputSnapshot`.
// The character core only ever reads snapshots.
//
// ## Architecture
//
// - `action`: Game actions and default key bindings for two local players
// - `config`: Per-player binding tables and remapping
// - `player`: Per-player press/release bookkeeping
// - `snapshot`: Held / just-pressed view handed to the simulation
// - `manager`: Routes winit key events to players
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new(2);
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per fixed tick
// let snapshot = input.snapshot(0);
// if snapshot.just_pressed(Action::Punch) { /* ... */ }
// input.end_tick();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;
pub mod snapshot;

pub use action::{Action, InputSource};
pub use config::{InputConfig, InputConfigManager};
pub use manager::InputManager;
pub use player::PlayerInput;
pub use snapshot::{ActionSet, InputSnapshot};
