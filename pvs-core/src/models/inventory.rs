use std::hash::Hash;

/// Stock state of a variant within one warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockLevel {
    /// Units on hand.
    pub count: i64,
    /// Threshold below which the variant counts as low-stock.
    pub low_count: i64,
}

/// Per-warehouse stock for a variant, keyed by warehouse id.
///
/// Same newtype arrangement as [`AttributeCollection`](super::AttributeCollection):
/// an `indexmap::IndexMap` so iteration order is predictable, de-duplicated
/// by key so a warehouse appears at most once. This is the in-memory side of
/// reconciliation; the persisted side, with timestamps, is
/// [`InventoryRecord`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct InventoryCollection<WarehouseId: Eq + Hash>(
    indexmap::IndexMap<WarehouseId, StockLevel, rustc_hash::FxBuildHasher>,
);

impl<W: Eq + Hash> Default for InventoryCollection<W> {
    fn default() -> Self {
        Self(indexmap::IndexMap::default())
    }
}

impl<W: Eq + Hash> InventoryCollection<W> {
    /// Number of warehouses with a stock entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no warehouse holds stock for the variant.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the warehouse has a stock entry.
    pub fn contains(&self, warehouse_id: &W) -> bool {
        self.0.contains_key(warehouse_id)
    }

    /// Look up the stock level for a warehouse.
    pub fn get(&self, warehouse_id: &W) -> Option<&StockLevel> {
        self.0.get(warehouse_id)
    }

    /// Set the stock level for a warehouse, returning the previous level if
    /// one was present.
    pub fn set(&mut self, warehouse_id: W, stock: StockLevel) -> Option<StockLevel> {
        self.0.insert(warehouse_id, stock)
    }

    /// Drop the entry for a warehouse. Reconciliation will delete the
    /// corresponding persisted row on the next save.
    pub fn remove(&mut self, warehouse_id: &W) -> Option<StockLevel> {
        self.0.shift_remove(warehouse_id)
    }

    /// Iterate the (warehouse, stock) entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&W, &StockLevel)> {
        self.0.iter()
    }
}

impl<W: Eq + Hash> FromIterator<(W, StockLevel)> for InventoryCollection<W> {
    fn from_iter<I: IntoIterator<Item = (W, StockLevel)>>(iter: I) -> Self {
        Self(indexmap::IndexMap::from_iter(iter))
    }
}

impl<W: Eq + Hash> IntoIterator for InventoryCollection<W> {
    type Item = (W, StockLevel);
    type IntoIter = indexmap::map::IntoIter<W, StockLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A persisted warehouse-inventory row, timestamps included.
///
/// Returned by the repository's inventory queries so callers can observe
/// the reconciliation contract: the creation timestamp survives in-place
/// updates, the update timestamp is refreshed on every save.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryRecord<WarehouseId, DateTime> {
    /// Warehouse the row belongs to.
    pub warehouse_id: WarehouseId,
    /// Units on hand.
    pub count: i64,
    /// Low-stock threshold.
    pub low_count: i64,
    /// When the (variant, warehouse) association was first persisted.
    pub created_at: DateTime,
    /// When the row was last written.
    pub updated_at: DateTime,
}
