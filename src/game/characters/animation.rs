// Character animation system
//
// Animations are named by `AnimationId` and resolved to (sheet, index) once
// when a character is created. Playback state lives in `AnimationTrack`.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::engine::assets::{AnimationEntry, AnimationTableProvider, AssetError, SpriteSheet, UvRect};

/// Which sprite sheet an animation is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetRole {
    Body,
    Werewolf,
    BatDemon,
    /// Gun / grenade arms drawn on top of the body
    Overlay,
}

/// Every animation a character can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    // Body sheet
    Idle,
    Walk,
    Run,
    Jump,
    Sit,
    Roll,
    Climb,
    Kick,
    Punch1,
    Punch2,
    Punch3,
    Axe1,
    Axe2,
    Axe3,
    Sword1,
    Sword2,
    Sword3,
    Pipe1,
    Pipe2,
    Pipe3,
    Special1,
    Special2,
    Special3,
    GetHit1,
    GetHit2,
    Knockdown,
    Prone,
    HardLandingImpact,
    HardLandingRecover,
    GunStance,
    GrenadeStance,

    // Werewolf sheet
    WerewolfIdle,
    WerewolfRun,
    WerewolfJump,
    WerewolfFrenzy,
    WerewolfPounce,

    // Bat demon sheet
    BatHover,
    BatFly,
    BatFrenzy,
    BatDash,

    // Overlay sheet
    GunDraw,
    GunAim,
    GunRecoil,
    GunReload,
    GrenadeDraw,
    GrenadeAim,
    GrenadeThrow,
}

impl AnimationId {
    pub fn sheet_role(&self) -> SheetRole {
        use AnimationId::*;
        match self {
            WerewolfIdle | WerewolfRun | WerewolfJump | WerewolfFrenzy | WerewolfPounce => {
                SheetRole::Werewolf
            }
            BatHover | BatFly | BatFrenzy | BatDash => SheetRole::BatDemon,
            GunDraw | GunAim | GunRecoil | GunReload | GrenadeDraw | GrenadeAim | GrenadeThrow => {
                SheetRole::Overlay
            }
            _ => SheetRole::Body,
        }
    }

    /// Animations that restart when played again while already current.
    ///
    /// Everything else ignores a repeated play request, so calling play every
    /// tick with the same id never resets a cycle.
    pub fn always_replays(&self) -> bool {
        use AnimationId::*;
        matches!(
            self,
            Punch1
                | Punch2
                | Punch3
                | Axe1
                | Axe2
                | Axe3
                | Sword1
                | Sword2
                | Sword3
                | Pipe1
                | Pipe2
                | Pipe3
                | Special1
                | Special2
                | Special3
                | Kick
                | GetHit1
                | GetHit2
                | Sit
                | WerewolfFrenzy
                | WerewolfPounce
                | BatFrenzy
                | BatDash
        )
    }
}

/// Where one animation lives
#[derive(Debug, Clone)]
pub struct AnimationBinding {
    pub sheet: Arc<SpriteSheet>,
    pub index: usize,
}

impl AnimationBinding {
    pub fn entry(&self) -> Option<&AnimationEntry> {
        self.sheet.animation(self.index)
    }
}

/// Which animation ids a sheet provides, in table order
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub name: String,
    pub role: SheetRole,
    pub animations: Vec<AnimationId>,
}

/// Resolved animation tables for one character
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    bindings: HashMap<AnimationId, AnimationBinding>,
}

impl AnimationLibrary {
    /// A library with nothing bound; every lookup misses and nothing draws
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every sheet in `layouts` from `provider`.
    ///
    /// The body sheet is required. Other sheets are optional: a missing one
    /// only means that form or overlay cannot be shown.
    pub fn load(
        provider: &dyn AnimationTableProvider,
        layouts: &[SheetLayout],
    ) -> Result<Self, AssetError> {
        let mut library = Self::empty();

        for layout in layouts {
            let sheet = match provider.load_sheet(&layout.name) {
                Ok(sheet) => sheet,
                Err(AssetError::NotFound(name)) if layout.role != SheetRole::Body => {
                    warn!("Optional sheet '{}' not found, its animations are disabled", name);
                    continue;
                }
                Err(e) => return Err(e),
            };

            for (index, id) in layout.animations.iter().enumerate() {
                library.bind(*id, &sheet, index)?;
            }
        }

        debug!("Animation library resolved {} animations", library.len());
        Ok(library)
    }

    /// Bind `id` to table row `index` of `sheet`
    pub fn bind(
        &mut self,
        id: AnimationId,
        sheet: &Arc<SpriteSheet>,
        index: usize,
    ) -> Result<(), AssetError> {
        if sheet.animation(index).is_none() {
            return Err(AssetError::InvalidAnimation {
                sheet: sheet.name().to_string(),
                index,
                reason: format!("{:?} points past the end of the table", id),
            });
        }
        self.bindings.insert(
            id,
            AnimationBinding {
                sheet: Arc::clone(sheet),
                index,
            },
        );
        Ok(())
    }

    pub fn get(&self, id: AnimationId) -> Option<&AnimationBinding> {
        self.bindings.get(&id)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.bindings.contains_key(&id)
    }

    pub fn entry(&self, id: AnimationId) -> Option<&AnimationEntry> {
        self.get(id)?.entry()
    }

    pub fn frame_count(&self, id: AnimationId) -> Option<usize> {
        self.entry(id).map(|entry| entry.frame_count as usize)
    }

    pub fn frame_uv(&self, id: AnimationId, frame: usize) -> Option<UvRect> {
        let binding = self.get(id)?;
        binding.sheet.frame_uv(binding.index, frame)
    }

    pub fn sheet_name(&self, id: AnimationId) -> Option<&str> {
        self.get(id).map(|binding| binding.sheet.name())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Playback cursor over one animation at a time
#[derive(Debug, Clone, Default)]
pub struct AnimationTrack {
    current: Option<AnimationId>,
    frame: usize,
    frame_timer: f32,
    looping: bool,
    /// One-shot reached the end of its last frame
    finished: bool,
    /// Started this tick; the first update shows frame 0 without advancing
    fresh: bool,
}

impl AnimationTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play an animation.
    ///
    /// Ignored when `id` isn't bound in `library` (the current animation
    /// keeps playing) or when it is already current and not on the replay
    /// list. Returns whether playback (re)started.
    pub fn play(&mut self, id: AnimationId, looping: bool, library: &AnimationLibrary) -> bool {
        if self.current == Some(id) && !id.always_replays() {
            return false;
        }
        self.start(id, looping, library)
    }

    /// Switch to `id` only if something else is playing
    pub fn ensure(&mut self, id: AnimationId, looping: bool, library: &AnimationLibrary) -> bool {
        if self.current == Some(id) {
            return false;
        }
        self.start(id, looping, library)
    }

    fn start(&mut self, id: AnimationId, looping: bool, library: &AnimationLibrary) -> bool {
        if !library.contains(id) {
            debug!("Animation {:?} is not bound, keeping {:?}", id, self.current);
            return false;
        }
        self.current = Some(id);
        self.frame = 0;
        self.frame_timer = 0.0;
        self.looping = looping;
        self.finished = false;
        self.fresh = true;
        true
    }

    /// Stop showing anything
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pin the cursor to a frame chosen by game state (climbing, aim angle)
    pub fn hold_frame(&mut self, frame: usize, library: &AnimationLibrary) {
        let Some(count) = self.current.and_then(|id| library.frame_count(id)) else {
            return;
        };
        self.frame = frame.min(count.saturating_sub(1));
        self.frame_timer = 0.0;
        self.fresh = false;
    }

    /// Advance playback (called every tick)
    pub fn update(&mut self, dt: f32, library: &AnimationLibrary) {
        if self.fresh {
            self.fresh = false;
            return;
        }
        if self.finished {
            return;
        }

        let Some(entry) = self.current.and_then(|id| library.entry(id)) else {
            return;
        };
        let frame_duration = entry.frame_duration();
        if frame_duration <= 0.0 {
            return;
        }
        let frame_count = entry.frame_count as usize;

        self.frame_timer += dt;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.frame += 1;

            if self.frame >= frame_count {
                if self.looping {
                    self.frame = 0;
                } else {
                    // Stay on last frame
                    self.frame = frame_count - 1;
                    self.finished = true;
                    break;
                }
            }
        }
    }

    pub fn current(&self) -> Option<AnimationId> {
        self.current
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// The one-shot that has played through, if any
    pub fn finished(&self) -> Option<AnimationId> {
        if self.finished {
            self.current
        } else {
            None
        }
    }

    /// Unflipped UVs of the current frame
    pub fn uv(&self, library: &AnimationLibrary) -> Option<UvRect> {
        library.frame_uv(self.current?, self.frame)
    }
}
