mod attribute;
mod inventory;
mod query;
mod variant;

pub use attribute::{AttributeCollection, ProductAttribute};
pub use inventory::{InventoryCollection, InventoryRecord, StockLevel};
pub use query::VariantFilter;
pub use variant::{NewVariant, ValidationError, VariantData, VariantKind, VariantRecord};
