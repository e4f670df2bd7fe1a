//! StorageRouter - resolves a temperature class to its ideal store.

use super::{BoundedStore, OrderStore, OverflowShelf};
use crate::constants::{SHELF_ORDERS_COUNT_DEFAULT, STORE_DEDICATED_ORDERS_COUNT_DEFAULT};
use crate::order::TempClass;

/// Capacities for the three stores.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Capacity of the dedicated Hot store
    pub hot_capacity: usize,
    /// Capacity of the dedicated Cold store
    pub cold_capacity: usize,
    /// Capacity of the shared overflow shelf
    pub shelf_capacity: usize,
}

impl StorageConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Hot store capacity.
    #[must_use]
    pub fn with_hot_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "hot_capacity must be positive");
        self.hot_capacity = capacity;
        self
    }

    /// Set the Cold store capacity.
    #[must_use]
    pub fn with_cold_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "cold_capacity must be positive");
        self.cold_capacity = capacity;
        self
    }

    /// Set the shelf capacity.
    #[must_use]
    pub fn with_shelf_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "shelf_capacity must be positive");
        self.shelf_capacity = capacity;
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            hot_capacity: STORE_DEDICATED_ORDERS_COUNT_DEFAULT,
            cold_capacity: STORE_DEDICATED_ORDERS_COUNT_DEFAULT,
            shelf_capacity: SHELF_ORDERS_COUNT_DEFAULT,
        }
    }
}

/// Owns the three stores and maps classes onto them.
///
/// Room's ideal store IS the shelf; Hot and Cold get dedicated stores.
#[derive(Debug)]
pub struct StorageRouter {
    hot: BoundedStore,
    cold: BoundedStore,
    shelf: OverflowShelf,
}

impl StorageRouter {
    /// Build the stores from `config`.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            hot: BoundedStore::new(TempClass::Hot, config.hot_capacity),
            cold: BoundedStore::new(TempClass::Cold, config.cold_capacity),
            shelf: OverflowShelf::new(config.shelf_capacity),
        }
    }

    /// The ideal store for `temp`.
    #[must_use]
    pub fn store_for(&self, temp: TempClass) -> &dyn OrderStore {
        match temp {
            TempClass::Room => &self.shelf,
            TempClass::Hot => &self.hot,
            TempClass::Cold => &self.cold,
        }
    }

    /// The ideal store for `temp`, mutably.
    pub fn store_for_mut(&mut self, temp: TempClass) -> &mut dyn OrderStore {
        match temp {
            TempClass::Room => &mut self.shelf,
            TempClass::Hot => &mut self.hot,
            TempClass::Cold => &mut self.cold,
        }
    }

    /// The dedicated store for a non-Room class.
    ///
    /// # Panics
    /// Panics on `Room` — the shelf is not a dedicated store.
    #[must_use]
    pub fn dedicated(&self, temp: TempClass) -> &BoundedStore {
        match temp {
            TempClass::Hot => &self.hot,
            TempClass::Cold => &self.cold,
            TempClass::Room => panic!("Room has no dedicated store"),
        }
    }

    /// The dedicated store for a non-Room class, mutably.
    ///
    /// # Panics
    /// Panics on `Room` — the shelf is not a dedicated store.
    pub fn dedicated_mut(&mut self, temp: TempClass) -> &mut BoundedStore {
        match temp {
            TempClass::Hot => &mut self.hot,
            TempClass::Cold => &mut self.cold,
            TempClass::Room => panic!("Room has no dedicated store"),
        }
    }

    /// The overflow shelf.
    #[must_use]
    pub fn shelf(&self) -> &OverflowShelf {
        &self.shelf
    }

    /// The overflow shelf, mutably.
    pub fn shelf_mut(&mut self) -> &mut OverflowShelf {
        &mut self.shelf
    }

    /// Total resident orders across all three stores.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.hot.len() + self.cold.len() + self.shelf.len()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Order, OrderRequest};

    #[test]
    fn test_room_routes_to_shelf() {
        let router = StorageRouter::new(&StorageConfig::default());
        assert_eq!(router.store_for(TempClass::Room).temp(), TempClass::Room);
        assert_eq!(
            router.store_for(TempClass::Room).has_space(),
            router.shelf().has_space()
        );
    }

    #[test]
    fn test_dedicated_routes() {
        let mut router = StorageRouter::new(&StorageConfig::default());
        let order = Order::new(OrderRequest::new("h1", "x", TempClass::Hot, 30), 0);
        router.store_for_mut(TempClass::Hot).store(order).unwrap();

        assert_eq!(router.dedicated(TempClass::Hot).len(), 1);
        assert_eq!(router.dedicated(TempClass::Cold).len(), 0);
        assert_eq!(router.total_len(), 1);
    }

    #[test]
    fn test_default_capacities() {
        let router = StorageRouter::new(&StorageConfig::default());
        assert_eq!(router.dedicated(TempClass::Hot).capacity(), 6);
        assert_eq!(router.dedicated(TempClass::Cold).capacity(), 6);
        assert_eq!(router.shelf().capacity(), 12);
    }

    #[test]
    fn test_config_builder() {
        let config = StorageConfig::new()
            .with_hot_capacity(2)
            .with_cold_capacity(3)
            .with_shelf_capacity(5);
        let router = StorageRouter::new(&config);

        assert_eq!(router.dedicated(TempClass::Hot).capacity(), 2);
        assert_eq!(router.dedicated(TempClass::Cold).capacity(), 3);
        assert_eq!(router.shelf().capacity(), 5);
    }

    #[test]
    #[should_panic(expected = "Room has no dedicated store")]
    fn test_room_dedicated_panics() {
        let router = StorageRouter::new(&StorageConfig::default());
        let _ = router.dedicated(TempClass::Room);
    }

    #[test]
    #[should_panic(expected = "shelf_capacity must be positive")]
    fn test_zero_shelf_capacity_rejected() {
        let _ = StorageConfig::new().with_shelf_capacity(0);
    }
}
