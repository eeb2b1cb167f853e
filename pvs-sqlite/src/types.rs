//! Type definitions for the SQLite implementation.
//!
//! Public types are the strongly-typed identifiers and the [`DateTime`]
//! representation used across the crate; the private row structs map query
//! results onto the core models.

use pvs_core::models::{InventoryRecord, ProductAttribute};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{AttributeId, OptionId, ProductKey, VariantId, WarehouseId};

#[derive(sqlx::FromRow)]
pub(crate) struct VariantRow {
    pub id: VariantId,
    pub product_key: ProductKey,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub on_sale: bool,
    pub available: bool,
    pub track_inventory: bool,
    pub barcode: Option<String>,
    pub weight: Option<f64>,
    pub is_master: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(sqlx::FromRow)]
pub(crate) struct AttributeRow {
    pub id: AttributeId,
    pub option_id: OptionId,
    pub name: String,
    pub sort_order: i32,
}

impl From<AttributeRow> for ProductAttribute<AttributeId, OptionId> {
    fn from(row: AttributeRow) -> Self {
        Self {
            id: row.id,
            option_id: row.option_id,
            name: row.name,
            sort_order: row.sort_order,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct InventoryRow {
    pub warehouse_id: WarehouseId,
    pub count: i64,
    pub low_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<InventoryRow> for InventoryRecord<WarehouseId, DateTime> {
    fn from(row: InventoryRow) -> Self {
        Self {
            warehouse_id: row.warehouse_id,
            count: row.count,
            low_count: row.low_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
