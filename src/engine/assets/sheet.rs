// Sprite-sheet animation tables and UV computation

use super::AssetError;

/// Normalized texture rectangle; `u0 > u1` means horizontally flipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// Same rectangle with u0/u1 swapped when `flip` is set.
    ///
    /// Pure in `flip`: applying it to an unflipped rect always yields the
    /// same bytes no matter how often it is called.
    pub fn flipped(self, flip: bool) -> Self {
        if flip {
            Self {
                u0: self.u1,
                u1: self.u0,
                ..self
            }
        } else {
            self
        }
    }
}

/// One row of an animation table: where the clip starts and how long it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationEntry {
    pub start_frame: u32,
    pub frame_count: u32,
    /// Duration of one full cycle of the clip
    pub duration_ms: u32,
}

impl AnimationEntry {
    pub const fn new(start_frame: u32, frame_count: u32, duration_ms: u32) -> Self {
        Self {
            start_frame,
            frame_count,
            duration_ms,
        }
    }

    /// Seconds each frame stays on screen
    pub fn frame_duration(&self) -> f32 {
        self.duration_ms as f32 / 1000.0 / self.frame_count.max(1) as f32
    }
}

/// What the resource layer hands over for one sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDescriptor {
    pub texture_width: u32,
    pub texture_height: u32,
    pub sprite_width: u32,
    pub sprite_height: u32,
    pub animations: Vec<AnimationEntry>,
}

/// Validated, read-only animation table for one sheet.
///
/// Shared between characters behind an `Arc`; playback cursors live in
/// each character's tracks.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    name: String,
    columns: u32,
    rows: u32,
    animations: Vec<AnimationEntry>,
}

impl SpriteSheet {
    pub fn from_descriptor(name: &str, descriptor: &SheetDescriptor) -> Result<Self, AssetError> {
        if descriptor.sprite_width == 0 || descriptor.sprite_height == 0 {
            return Err(AssetError::InvalidSheet {
                sheet: name.to_string(),
                reason: "sprite size is zero".to_string(),
            });
        }

        let columns = descriptor.texture_width / descriptor.sprite_width;
        let rows = descriptor.texture_height / descriptor.sprite_height;
        if columns == 0 || rows == 0 {
            return Err(AssetError::InvalidSheet {
                sheet: name.to_string(),
                reason: format!(
                    "{}x{} texture holds no {}x{} sprite",
                    descriptor.texture_width,
                    descriptor.texture_height,
                    descriptor.sprite_width,
                    descriptor.sprite_height
                ),
            });
        }

        let capacity = columns.saturating_mul(rows);
        for (index, entry) in descriptor.animations.iter().enumerate() {
            if entry.frame_count == 0 {
                return Err(AssetError::InvalidAnimation {
                    sheet: name.to_string(),
                    index,
                    reason: "frame count is zero".to_string(),
                });
            }
            let end = entry.start_frame.checked_add(entry.frame_count);
            if end.map_or(true, |end| end > capacity) {
                return Err(AssetError::InvalidAnimation {
                    sheet: name.to_string(),
                    index,
                    reason: format!(
                        "{} frames from {} exceed sheet capacity {}",
                        entry.frame_count, entry.start_frame, capacity
                    ),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
            animations: descriptor.animations.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn animation(&self, index: usize) -> Option<&AnimationEntry> {
        self.animations.get(index)
    }

    /// UV rectangle of an absolute frame number on the sheet
    pub fn cell_uv(&self, frame: u32) -> UvRect {
        let col = frame % self.columns;
        let row = frame / self.columns;
        let u0 = col as f32 / self.columns as f32;
        let v0 = row as f32 / self.rows as f32;
        UvRect {
            u0,
            v0,
            u1: u0 + 1.0 / self.columns as f32,
            v1: v0 + 1.0 / self.rows as f32,
        }
    }

    /// UV rectangle of `frame` within animation `index`
    pub fn frame_uv(&self, index: usize, frame: usize) -> Option<UvRect> {
        let entry = self.animation(index)?;
        let frame = (frame as u32).min(entry.frame_count - 1);
        Some(self.cell_uv(entry.start_frame + frame))
    }
}
