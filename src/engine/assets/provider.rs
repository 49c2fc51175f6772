// Animation table provider: the seam to the resource layer

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::handle::SheetHandle;
use super::sheet::{SheetDescriptor, SpriteSheet};
use super::AssetError;

/// Looks up sprite-sheet animation tables by identifier.
///
/// Implemented by whatever loads sheet descriptors from disk; the core only
/// asks for descriptors once, at character creation.
pub trait AnimationTableProvider {
    fn descriptor(&self, sheet: SheetHandle) -> Option<SheetDescriptor>;

    /// Fetch and validate a sheet
    fn load_sheet(&self, name: &str) -> Result<Arc<SpriteSheet>, AssetError> {
        let descriptor = self
            .descriptor(SheetHandle::named(name))
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        let sheet = SpriteSheet::from_descriptor(name, &descriptor)?;
        debug!(
            "Loaded sheet '{}' ({}x{} cells, {} animations)",
            name,
            sheet.columns(),
            sheet.rows(),
            sheet.animation_count()
        );
        Ok(Arc::new(sheet))
    }
}

/// In-memory provider keyed by sheet name
#[derive(Debug, Default, Clone)]
pub struct SheetRegistry {
    sheets: HashMap<SheetHandle, SheetDescriptor>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one under the same name
    pub fn insert(&mut self, name: &str, descriptor: SheetDescriptor) -> SheetHandle {
        let handle = SheetHandle::named(name);
        self.sheets.insert(handle, descriptor);
        handle
    }

    pub fn with_sheet(mut self, name: &str, descriptor: SheetDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl AnimationTableProvider for SheetRegistry {
    fn descriptor(&self, sheet: SheetHandle) -> Option<SheetDescriptor> {
        self.sheets.get(&sheet).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AnimationEntry;

    fn small_sheet() -> SheetDescriptor {
        SheetDescriptor {
            texture_width: 128,
            texture_height: 64,
            sprite_width: 32,
            sprite_height: 32,
            animations: vec![AnimationEntry::new(0, 2, 200)],
        }
    }

    #[test]
    fn test_load_registered_sheet() {
        let registry = SheetRegistry::new().with_sheet("body", small_sheet());
        let sheet = registry.load_sheet("body").unwrap();
        assert_eq!(sheet.name(), "body");
        assert_eq!(sheet.columns(), 4);
    }

    #[test]
    fn test_unknown_sheet_is_not_found() {
        let registry = SheetRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.load_sheet("missing"),
            Err(AssetError::NotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = SheetRegistry::new();
        registry.insert("body", small_sheet());
        let mut bigger = small_sheet();
        bigger.animations.push(AnimationEntry::new(2, 2, 200));
        registry.insert("body", bigger);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.load_sheet("body").unwrap().animation_count(), 2);
    }
}
