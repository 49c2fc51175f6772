// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create an asset ID from a name or path
    pub fn from_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Typed handle to an asset; `T` keeps sheet handles from mixing with others
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls: derives would require `T: Clone/Copy` on the marker type
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Handle for the asset registered under `name`
    pub fn named(name: &str) -> Self {
        Self::new(AssetId::from_name(name))
    }

    pub fn id(&self) -> AssetId {
        self.id
    }
}

/// Marker for sprite-sheet animation tables
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SheetAsset;

pub type SheetHandle = AssetHandle<SheetAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_name() {
        let id1 = AssetId::from_name("sheets/body");
        let id2 = AssetId::from_name("sheets/body");
        let id3 = AssetId::from_name("sheets/werewolf");

        assert_eq!(id1, id2, "Same names should produce same IDs");
        assert_ne!(id1, id3, "Different names should produce different IDs");
    }

    #[test]
    fn test_named_handles_match() {
        let a = SheetHandle::named("overlay");
        let b = a;
        assert_eq!(a, b);
        assert_eq!(a.id(), AssetId::from_name("overlay"));
    }
}
