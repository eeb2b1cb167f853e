//! Warehouse-inventory reconciliation.
//!
//! On every save, the variant's in-memory inventory collection is
//! reconciled against the persisted rows for that variant, keyed on
//! warehouse identity: rows whose warehouse is gone are deleted, new
//! warehouses are inserted, and rows present on both sides are updated in
//! place. The update statement never touches `created_at`, so the creation
//! timestamp survives in-place rewrites by construction.

use pvs_core::models::{InventoryCollection, InventoryRecord, StockLevel};
use tracing::debug;

use crate::types::{DateTime, InventoryRow, VariantId, WarehouseId};
use crate::{Db, Error};

impl Db {
    /// The persisted inventory rows for a variant, in storage order.
    pub(crate) async fn fetch_inventory(
        &self,
        variant_id: VariantId,
    ) -> Result<Vec<InventoryRecord<WarehouseId, DateTime>>, Error> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            select
                wi.warehouse_id, wi.count, wi.low_count, wi.created_at, wi.updated_at
            from
                warehouse_inventory wi
            join
                warehouse w on w.id = wi.warehouse_id
            where
                wi.variant_id = ?
            "#,
        )
        .bind(variant_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Reconcile the in-memory collection with the persisted set.
    ///
    /// Idempotent modulo the update branch's timestamp refresh: re-running
    /// with unchanged input rewrites `updated_at` but nothing else.
    pub(crate) async fn save_warehouse_inventory(
        &self,
        variant_id: VariantId,
        inventory: &InventoryCollection<WarehouseId>,
        as_of: DateTime,
    ) -> Result<(), Error> {
        let existing = self.fetch_inventory(variant_id).await?;

        for record in &existing {
            if !inventory.contains(&record.warehouse_id) {
                self.delete_inventory(variant_id, record.warehouse_id).await?;
            }
        }

        for (&warehouse_id, &stock) in inventory.iter() {
            if !existing.iter().any(|r| r.warehouse_id == warehouse_id) {
                self.add_inventory(variant_id, warehouse_id, stock, as_of).await?;
            }
        }

        for (&warehouse_id, &stock) in inventory.iter() {
            if existing.iter().any(|r| r.warehouse_id == warehouse_id) {
                self.update_inventory(variant_id, warehouse_id, stock, as_of).await?;
            }
        }

        Ok(())
    }

    async fn add_inventory(
        &self,
        variant_id: VariantId,
        warehouse_id: WarehouseId,
        stock: StockLevel,
        as_of: DateTime,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            insert into
                warehouse_inventory (variant_id, warehouse_id, count, low_count, created_at, updated_at)
            values
                (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(variant_id)
        .bind(warehouse_id)
        .bind(stock.count)
        .bind(stock.low_count)
        .bind(as_of)
        .bind(as_of)
        .execute(&self.writer)
        .await?;

        debug!(variant_id = %variant_id, warehouse_id = %warehouse_id, count = stock.count, "added warehouse inventory");
        Ok(())
    }

    async fn update_inventory(
        &self,
        variant_id: VariantId,
        warehouse_id: WarehouseId,
        stock: StockLevel,
        as_of: DateTime,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            update
                warehouse_inventory
            set
                count = ?, low_count = ?, updated_at = ?
            where
                variant_id = ? and warehouse_id = ?
            "#,
        )
        .bind(stock.count)
        .bind(stock.low_count)
        .bind(as_of)
        .bind(variant_id)
        .bind(warehouse_id)
        .execute(&self.writer)
        .await?;

        debug!(variant_id = %variant_id, warehouse_id = %warehouse_id, count = stock.count, "updated warehouse inventory");
        Ok(())
    }

    async fn delete_inventory(
        &self,
        variant_id: VariantId,
        warehouse_id: WarehouseId,
    ) -> Result<(), Error> {
        sqlx::query("delete from warehouse_inventory where variant_id = ? and warehouse_id = ?")
            .bind(variant_id)
            .bind(warehouse_id)
            .execute(&self.writer)
            .await?;

        debug!(variant_id = %variant_id, warehouse_id = %warehouse_id, "removed warehouse inventory");
        Ok(())
    }
}
