use crate::models::{
    AttributeCollection, InventoryRecord, NewVariant, VariantFilter, VariantRecord,
};

use super::Repository;

/// The persisted variant aggregate, spelled in a backend's concrete types.
pub type VariantOf<R> = VariantRecord<
    <R as Repository>::VariantId,
    <R as Repository>::ProductKey,
    <R as Repository>::AttributeId,
    <R as Repository>::OptionId,
    <R as Repository>::WarehouseId,
    <R as Repository>::DateTime,
>;

/// An unpersisted variant aggregate, spelled in a backend's concrete types.
pub type NewVariantOf<R> = NewVariant<
    <R as Repository>::ProductKey,
    <R as Repository>::AttributeId,
    <R as Repository>::OptionId,
    <R as Repository>::WarehouseId,
>;

/// A persisted inventory row, spelled in a backend's concrete types.
pub type InventoryRecordOf<R> =
    InventoryRecord<<R as Repository>::WarehouseId, <R as Repository>::DateTime>;

/// Repository interface for the variant aggregate.
///
/// The aggregate is the variant row plus its two child collections
/// (attribute associations, warehouse inventory); the repository is the
/// only component that reads or writes the children. All operations run
/// within one storage round-trip sequence on the caller's task — there is
/// no internal concurrency, locking, or retry. Multi-statement writes are
/// atomic only if the caller supplies a surrounding transaction boundary.
pub trait VariantRepository: Repository {
    /// Fetch one variant aggregate by id.
    ///
    /// Returns `Ok(None)` when no matching row exists — absence is not an
    /// error. The read surface addresses attribute-differentiated variants:
    /// master rows are not returned here (they are reached through the
    /// product side of the catalog).
    fn get_by_id(
        &self,
        id: Self::VariantId,
    ) -> impl Future<Output = Result<Option<VariantOf<Self>>, Self::Error>> + Send;

    /// Fetch variant aggregates by id, or every non-master variant when
    /// `ids` is empty.
    ///
    /// Each element is assembled with its own per-id round-trips; ids
    /// without a matching row are skipped. Ordering follows storage
    /// iteration order and is not guaranteed stable across calls.
    fn get_all(
        &self,
        ids: &[Self::VariantId],
    ) -> impl Future<Output = Result<Vec<VariantOf<Self>>, Self::Error>> + Send;

    /// Fetch the variants matching an abstract predicate.
    ///
    /// The filter is translated to a storage-level condition over the
    /// variant joined to its parent product; matches are de-duplicated by
    /// variant id (first occurrence wins) before aggregate assembly.
    fn get_by_query(
        &self,
        filter: &VariantFilter<Self::ProductKey>,
    ) -> impl Future<Output = Result<Vec<VariantOf<Self>>, Self::Error>> + Send;

    /// All non-master variants belonging to a product.
    fn find_by_product(
        &self,
        product_key: Self::ProductKey,
    ) -> impl Future<Output = Result<Vec<VariantOf<Self>>, Self::Error>> + Send;

    /// All variants holding an inventory row in the given warehouse.
    fn find_by_warehouse(
        &self,
        warehouse_id: Self::WarehouseId,
    ) -> impl Future<Output = Result<Vec<VariantOf<Self>>, Self::Error>> + Send;

    /// The single variant of the product (if any) whose attribute set has
    /// exactly the given ids — same cardinality, same membership.
    ///
    /// Used to check whether a specific option combination already has a
    /// corresponding variant.
    fn find_by_attribute_set(
        &self,
        product_key: Self::ProductKey,
        attribute_ids: &[Self::AttributeId],
    ) -> impl Future<Output = Result<Option<VariantOf<Self>>, Self::Error>> + Send;

    /// True if any variant of the product has an attribute set equal to the
    /// given collection. Used pre-creation to avoid duplicate variants for
    /// one combination.
    fn attribute_set_exists(
        &self,
        product_key: Self::ProductKey,
        attributes: &AttributeCollection<Self::AttributeId, Self::OptionId>,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// True if any variant row carries the SKU.
    ///
    /// With `excluding`, true only if a *different* row carries it — the
    /// update-path form of the uniqueness check. Unlike the read surface,
    /// this spans all rows, master variants included, so the uniqueness
    /// invariant stays global.
    fn sku_exists(
        &self,
        sku: &str,
        excluding: Option<Self::VariantId>,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// The persisted inventory rows for a variant, timestamps included.
    fn get_warehouse_inventory(
        &self,
        variant_id: Self::VariantId,
    ) -> impl Future<Output = Result<Vec<InventoryRecordOf<Self>>, Self::Error>> + Send;

    /// Persist a new variant aggregate.
    ///
    /// Validates the aggregate invariants and SKU uniqueness before any
    /// write, then writes the variant row (stamping both timestamps
    /// `as_of`), one association row per attribute, and reconciles the
    /// warehouse inventory. Returns the persisted record, storage-assigned
    /// id included.
    fn insert(
        &self,
        variant: NewVariantOf<Self>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<VariantOf<Self>, Self::Error>> + Send;

    /// Persist changes to an existing variant aggregate.
    ///
    /// Same checks as [`insert`](Self::insert), except the uniqueness check
    /// excludes the entity's own id. Rewrites the scalar fields and
    /// refreshes the update timestamp, then reconciles inventory. Attribute
    /// associations are insert-only in this design: they are *not*
    /// re-synchronized here.
    fn update(
        &self,
        variant: &VariantOf<Self>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<VariantOf<Self>, Self::Error>> + Send;

    /// Remove a variant aggregate: inventory rows, association rows, then
    /// the variant row, in that dependency order. Irreversible; there is no
    /// soft-delete.
    fn delete(
        &self,
        variant: VariantOf<Self>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
