mod variant;

pub use variant::{InventoryRecordOf, NewVariantOf, VariantOf, VariantRepository};

/// The associated-type bundle shared by every repository port.
///
/// A backend implements this once, binding its concrete identifier,
/// timestamp, and error types; the operation traits build on top of it.
pub trait Repository {
    /// Error type surfaced by every operation.
    type Error;
    /// Timestamp type used for creation/update stamps. Writes take the
    /// stamp as an explicit parameter; the repository never reads a clock.
    type DateTime;
    /// Storage-assigned variant identifier.
    type VariantId;
    /// External key of a parent product.
    type ProductKey;
    /// Key of a product attribute (an option-value).
    type AttributeId: Eq + std::hash::Hash;
    /// Key of an option dimension.
    type OptionId;
    /// Key of a warehouse.
    type WarehouseId: Eq + std::hash::Hash;
}
