// Asset layer
//
// Sprite-sheet animation tables come from an `AnimationTableProvider`, are
// validated once at load and then shared read-only between characters.

mod handle;
mod provider;
mod sheet;

pub use handle::{AssetHandle, AssetId, SheetAsset, SheetHandle};
pub use provider::{AnimationTableProvider, SheetRegistry};
pub use sheet::{AnimationEntry, SheetDescriptor, SpriteSheet, UvRect};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid sprite sheet '{sheet}': {reason}")]
    InvalidSheet { sheet: String, reason: String },

    #[error("Invalid animation {index} in sheet '{sheet}': {reason}")]
    InvalidAnimation {
        sheet: String,
        index: usize,
        reason: String,
    },
}
