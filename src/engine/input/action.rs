// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    /// Climb up a ladder / raise aim
    Up,
    /// Sit, climb down a ladder / lower aim
    Down,
    Jump,
    Run,
    Roll,

    // Combat
    Punch,
    WeaponAttack,
    Kick,
    Special,

    // Overlay forms (toggles)
    GunMode,
    GrenadeMode,
    WerewolfForm,
    BatDemonForm,

    // Meta actions
    Pause,
    Menu,
}

impl Action {
    /// Every action, in bit order for `ActionSet`
    pub const ALL: [Action; 17] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Run,
        Action::Roll,
        Action::Punch,
        Action::WeaponAttack,
        Action::Kick,
        Action::Special,
        Action::GunMode,
        Action::GrenadeMode,
        Action::WerewolfForm,
        Action::BatDemonForm,
        Action::Pause,
        Action::Menu,
    ];

    pub(crate) fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Represents an input source (keyboard key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for Player 1 (left side of the keyboard)
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::Up),
        (InputSource::key(KeyCode::KeyS), Action::Down),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Run),
        (InputSource::key(KeyCode::KeyQ), Action::Roll),
        (InputSource::key(KeyCode::KeyF), Action::Punch),
        (InputSource::key(KeyCode::KeyG), Action::WeaponAttack),
        (InputSource::key(KeyCode::KeyH), Action::Kick),
        (InputSource::key(KeyCode::KeyE), Action::Special),
        (InputSource::key(KeyCode::Digit1), Action::GunMode),
        (InputSource::key(KeyCode::Digit2), Action::GrenadeMode),
        (InputSource::key(KeyCode::Digit3), Action::WerewolfForm),
        (InputSource::key(KeyCode::Digit4), Action::BatDemonForm),
    ]
}

/// Default keyboard bindings for Player 2 (arrows and numpad)
pub fn default_p2_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::Up),
        (InputSource::key(KeyCode::ArrowDown), Action::Down),
        (InputSource::key(KeyCode::Numpad0), Action::Jump),
        (InputSource::key(KeyCode::ShiftRight), Action::Run),
        (InputSource::key(KeyCode::NumpadDecimal), Action::Roll),
        (InputSource::key(KeyCode::Numpad1), Action::Punch),
        (InputSource::key(KeyCode::Numpad2), Action::WeaponAttack),
        (InputSource::key(KeyCode::Numpad3), Action::Kick),
        (InputSource::key(KeyCode::Numpad4), Action::Special),
        (InputSource::key(KeyCode::Numpad7), Action::GunMode),
        (InputSource::key(KeyCode::Numpad8), Action::GrenadeMode),
        (InputSource::key(KeyCode::Numpad9), Action::WerewolfForm),
        (InputSource::key(KeyCode::NumpadAdd), Action::BatDemonForm),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}
