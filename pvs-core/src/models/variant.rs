use std::hash::Hash;

use super::{AttributeCollection, InventoryCollection};

/// The mutable scalar fields of a variant.
///
/// These are the columns a save writes wholesale; identity (id, parent
/// product) and the child collections are handled separately by the
/// repository.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantData {
    /// Stock-keeping unit. Globally unique across all variants.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// List price.
    pub price: f64,
    /// Discounted price, if the variant can go on sale.
    pub sale_price: Option<f64>,
    /// Whether the sale price is currently in effect.
    pub on_sale: bool,
    /// Whether the variant can be purchased.
    pub available: bool,
    /// Whether warehouse inventory is tracked for this variant.
    pub track_inventory: bool,
    /// Scannable barcode, if assigned.
    pub barcode: Option<String>,
    /// Shipping weight, if known.
    pub weight: Option<f64>,
}

/// Role of a variant within its product.
///
/// A product without option combinations is represented by a single master
/// variant; every other variant is distinguished by at least one attribute.
/// Carrying the attribute set inside the `Attributed` case keeps the two
/// roles from sharing a half-meaningful field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantKind<AttributeId: Eq + Hash, OptionId> {
    /// The canonical "no distinguishing options" representation.
    Master,
    /// A variant distinguished by its attribute set. The set must be
    /// non-empty at persistence time.
    Attributed(AttributeCollection<AttributeId, OptionId>),
}

impl<A: Eq + Hash, O> VariantKind<A, O> {
    /// True for the master variant.
    pub fn is_master(&self) -> bool {
        matches!(self, Self::Master)
    }

    /// The attribute set, for attributed variants.
    pub fn attributes(&self) -> Option<&AttributeCollection<A, O>> {
        match self {
            Self::Master => None,
            Self::Attributed(attributes) => Some(attributes),
        }
    }
}

/// A variant aggregate awaiting first persistence: no identifier, no
/// timestamps. `insert` consumes it and returns the persisted
/// [`VariantRecord`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewVariant<ProductKey, AttributeId: Eq + Hash, OptionId, WarehouseId: Eq + Hash> {
    /// Key of the parent product. Must be set before persistence.
    pub product_key: ProductKey,
    /// Scalar fields.
    pub data: VariantData,
    /// Master or attributed role.
    pub kind: VariantKind<AttributeId, OptionId>,
    /// Per-warehouse stock to persist alongside the variant.
    pub inventory: InventoryCollection<WarehouseId>,
}

/// A persisted variant aggregate.
///
/// Every load and every successful save returns one of these, reflecting
/// exactly the persisted state — there is no dirty-tracking on the model;
/// a record is clean by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantRecord<
    VariantId,
    ProductKey,
    AttributeId: Eq + Hash,
    OptionId,
    WarehouseId: Eq + Hash,
    DateTime,
> {
    /// Storage-assigned identifier.
    pub id: VariantId,
    /// Key of the parent product.
    pub product_key: ProductKey,
    /// Scalar fields.
    pub data: VariantData,
    /// Master or attributed role.
    pub kind: VariantKind<AttributeId, OptionId>,
    /// Per-warehouse stock as persisted.
    pub inventory: InventoryCollection<WarehouseId>,
    /// When the variant row was first persisted.
    pub created_at: DateTime,
    /// When the variant row was last written.
    pub updated_at: DateTime,
}

/// Violation of an aggregate invariant, detected before any write.
///
/// Fully recoverable: the caller corrects the input and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The parent product reference is unset.
    #[error("product key must be set")]
    MissingProductKey,
    /// An attributed variant has an empty attribute set.
    #[error("product variant must have attributes")]
    EmptyAttributeSet,
}
