//! Asset readiness tracking
//!
//! Hosts load sprites and sounds on their own schedule; the catalog records
//! where each load stands so a draw call can check readiness once and fall
//! back to placeholder shapes. A host that never finishes loading anything
//! still renders: unknown and in-flight assets both answer `Loading`.

use std::collections::HashMap;

/// Where an asset load stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetState {
    /// Requested but not yet available; draw the placeholder
    #[default]
    Loading,
    /// Usable
    Ready,
    /// Load failed; the placeholder is permanent
    Failed,
}

/// Registry of asset keys to load states
#[derive(Debug, Default)]
pub struct AssetCatalog {
    states: HashMap<String, AssetState>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a load starting
    pub fn register(&mut self, key: &str) {
        self.states.insert(key.to_string(), AssetState::Loading);
    }

    pub fn mark_ready(&mut self, key: &str) {
        self.states.insert(key.to_string(), AssetState::Ready);
    }

    pub fn mark_failed(&mut self, key: &str) {
        log::warn!("asset '{key}' failed to load, using placeholder");
        self.states.insert(key.to_string(), AssetState::Failed);
    }

    /// Load state for a key; unknown keys are still loading
    pub fn state(&self, key: &str) -> AssetState {
        self.states.get(key).copied().unwrap_or_default()
    }

    /// Whether a draw call may use the real asset
    pub fn is_ready(&self, key: &str) -> bool {
        self.state(key) == AssetState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_assets_count_as_loading() {
        let catalog = AssetCatalog::new();
        assert_eq!(catalog.state("player"), AssetState::Loading);
        assert!(!catalog.is_ready("player"));
    }

    #[test]
    fn states_follow_the_load_lifecycle() {
        let mut catalog = AssetCatalog::new();
        catalog.register("enemy");
        assert_eq!(catalog.state("enemy"), AssetState::Loading);
        catalog.mark_ready("enemy");
        assert!(catalog.is_ready("enemy"));
        catalog.mark_failed("enemy");
        assert_eq!(catalog.state("enemy"), AssetState::Failed);
        assert!(!catalog.is_ready("enemy"));
    }
}
