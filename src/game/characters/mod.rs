// Character system
//
// Everything that makes up one fighter:
// - Movement, jumping, platforms, ladders and knockdowns
// - Combo chains, kicks and hit stun
// - Aiming and transformation forms
// - Animation tracks and per-frame animation selection
// - Attack hitboxes and pose-dependent hurtboxes

pub mod animation;
pub mod character;
pub mod combo;
pub mod form;
pub mod hitbox;
pub mod movement;
pub mod selector;
pub mod sprites;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationId, AnimationLibrary, AnimationTrack, SheetLayout, SheetRole};
pub use character::{
    Character, CharacterEvents, CharacterId, CharacterManager, HitOutcome, Shot, TickReport,
};
pub use combo::{AttackResult, ComboFamily, ComboResolver, GetHit, Weapon};
pub use form::{ActiveForm, AimWeapon, FormController, FormEvent, FormKind};
pub use hitbox::{BoxShape, HitboxSpec, HitboxState, HurtboxPose, HurtboxProfiles};
pub use movement::{MotionControl, MovementController, MovementEvents};
pub use selector::{AnimationSelector, SelectionContext};
pub use state::{DeathPhase, Facing, HardLandingPhase, MovementState};
pub use stats::{CharacterStats, CombatTuning};
