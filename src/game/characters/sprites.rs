// Built-in sprite sheet layouts
//
// Frame counts and cycle durations for the stock fighter art. Each table is
// laid out row-major on a 16-column sheet of 64px cells, clips back to back.

use crate::engine::assets::{AnimationEntry, AssetError, SheetDescriptor, SheetRegistry};

use super::animation::{AnimationId, AnimationLibrary, SheetLayout, SheetRole};

pub const BODY_SHEET: &str = "fighter_body";
pub const WEREWOLF_SHEET: &str = "fighter_werewolf";
pub const BAT_DEMON_SHEET: &str = "fighter_bat_demon";
pub const OVERLAY_SHEET: &str = "fighter_overlay";

const CELL_SIZE: u32 = 64;
const SHEET_COLUMNS: u32 = 16;

/// (animation, frames, full cycle in ms)
type Clip = (AnimationId, u32, u32);

const BODY_CLIPS: &[Clip] = &[
    (AnimationId::Idle, 8, 800),
    (AnimationId::Walk, 8, 800),
    (AnimationId::Run, 8, 560),
    (AnimationId::Jump, 6, 750),
    (AnimationId::Sit, 3, 150),
    (AnimationId::Roll, 6, 400),
    (AnimationId::Climb, 4, 400),
    (AnimationId::Kick, 5, 300),
    (AnimationId::Punch1, 4, 240),
    (AnimationId::Punch2, 4, 240),
    (AnimationId::Punch3, 6, 420),
    (AnimationId::Axe1, 5, 350),
    (AnimationId::Axe2, 5, 350),
    (AnimationId::Axe3, 7, 560),
    (AnimationId::Sword1, 5, 300),
    (AnimationId::Sword2, 5, 300),
    (AnimationId::Sword3, 7, 490),
    (AnimationId::Pipe1, 5, 350),
    (AnimationId::Pipe2, 5, 350),
    (AnimationId::Pipe3, 7, 560),
    (AnimationId::Special1, 5, 300),
    (AnimationId::Special2, 5, 300),
    (AnimationId::Special3, 8, 560),
    (AnimationId::GetHit1, 3, 300),
    (AnimationId::GetHit2, 3, 300),
    (AnimationId::Knockdown, 6, 800),
    (AnimationId::Prone, 2, 400),
    (AnimationId::HardLandingImpact, 3, 250),
    (AnimationId::HardLandingRecover, 4, 350),
    (AnimationId::GunStance, 1, 1000),
    (AnimationId::GrenadeStance, 1, 1000),
];

const WEREWOLF_CLIPS: &[Clip] = &[
    (AnimationId::WerewolfIdle, 6, 600),
    (AnimationId::WerewolfRun, 8, 640),
    (AnimationId::WerewolfJump, 4, 500),
    (AnimationId::WerewolfFrenzy, 8, 560),
    (AnimationId::WerewolfPounce, 6, 480),
];

const BAT_DEMON_CLIPS: &[Clip] = &[
    (AnimationId::BatHover, 6, 600),
    (AnimationId::BatFly, 6, 480),
    (AnimationId::BatFrenzy, 8, 560),
    (AnimationId::BatDash, 5, 400),
];

// Aim clips hold one frame per 6 degrees from -90 to +90
const OVERLAY_CLIPS: &[Clip] = &[
    (AnimationId::GunDraw, 4, 250),
    (AnimationId::GunAim, 31, 1000),
    (AnimationId::GunRecoil, 3, 200),
    (AnimationId::GunReload, 6, 600),
    (AnimationId::GrenadeDraw, 4, 250),
    (AnimationId::GrenadeAim, 31, 1000),
    (AnimationId::GrenadeThrow, 4, 200),
];

fn sheets() -> [(&'static str, SheetRole, &'static [Clip]); 4] {
    [
        (BODY_SHEET, SheetRole::Body, BODY_CLIPS),
        (WEREWOLF_SHEET, SheetRole::Werewolf, WEREWOLF_CLIPS),
        (BAT_DEMON_SHEET, SheetRole::BatDemon, BAT_DEMON_CLIPS),
        (OVERLAY_SHEET, SheetRole::Overlay, OVERLAY_CLIPS),
    ]
}

/// Pack clips back to back into one sheet descriptor
fn descriptor(clips: &[Clip]) -> SheetDescriptor {
    let mut next_frame = 0;
    let animations: Vec<AnimationEntry> = clips
        .iter()
        .map(|&(_, frames, duration_ms)| {
            let entry = AnimationEntry::new(next_frame, frames, duration_ms);
            next_frame += frames;
            entry
        })
        .collect();
    let rows = next_frame.div_ceil(SHEET_COLUMNS).max(1);

    SheetDescriptor {
        texture_width: SHEET_COLUMNS * CELL_SIZE,
        texture_height: rows * CELL_SIZE,
        sprite_width: CELL_SIZE,
        sprite_height: CELL_SIZE,
        animations,
    }
}

/// Which ids each stock sheet provides
pub fn standard_layouts() -> Vec<SheetLayout> {
    sheets()
        .into_iter()
        .map(|(name, role, clips)| SheetLayout {
            name: name.to_string(),
            role,
            animations: clips.iter().map(|&(id, _, _)| id).collect(),
        })
        .collect()
}

/// Animation tables for the stock sheets
pub fn builtin_sheets() -> SheetRegistry {
    sheets()
        .into_iter()
        .fold(SheetRegistry::new(), |registry, (name, _, clips)| {
            registry.with_sheet(name, descriptor(clips))
        })
}

/// Library over the stock sheets
pub fn builtin_library() -> Result<AnimationLibrary, AssetError> {
    AnimationLibrary::load(&builtin_sheets(), &standard_layouts())
}
