//! The variant-aggregate repository.
//!
//! Loads assemble the aggregate from three queries (variant row, attribute
//! associations, inventory rows); saves validate invariants and the SKU
//! uniqueness rule before the first write, then persist the row and
//! reconcile the inventory collection. Attribute associations are written
//! on insert only — they are immutable post-creation in this design.

use std::collections::HashSet;

use pvs_core::models::{
    InventoryRecord, NewVariant, ProductAttribute, StockLevel, ValidationError, VariantData,
    VariantFilter, VariantKind, VariantRecord,
};
use pvs_core::ports::{InventoryRecordOf, NewVariantOf, VariantOf, VariantRepository};
use sqlx::QueryBuilder;
use tracing::debug;

use super::filter::push_filter;
use crate::types::{AttributeId, AttributeRow, DateTime, OptionId, ProductKey, VariantId, VariantRow, WarehouseId};
use crate::{Db, Error};

type Variant = VariantOf<Db>;

/// The aggregate read surface: variant joined to its parent product,
/// restricted to non-master rows. Master variants are reached through the
/// product side of the catalog, not through this repository's reads.
const BASE_COLUMNS: &str = r#"
    pv.id, pv.product_key, pv.sku, pv.name, pv.price, pv.sale_price,
    pv.on_sale, pv.available, pv.track_inventory, pv.barcode, pv.weight,
    pv.is_master, pv.created_at, pv.updated_at
"#;

/// Child rows first, then the variant row itself.
const DELETE_CLAUSES: [&str; 3] = [
    "delete from warehouse_inventory where variant_id = ?",
    "delete from variant_attribute where variant_id = ?",
    "delete from product_variant where id = ?",
];

fn mandate_variant_rules(
    product_key: &ProductKey,
    kind: &VariantKind<AttributeId, OptionId>,
) -> Result<(), ValidationError> {
    if product_key.is_nil() {
        return Err(ValidationError::MissingProductKey);
    }

    if let VariantKind::Attributed(attributes) = kind {
        if attributes.is_empty() {
            return Err(ValidationError::EmptyAttributeSet);
        }
    }

    Ok(())
}

fn assemble(
    row: VariantRow,
    attributes: Vec<AttributeRow>,
    inventory: Vec<InventoryRecord<WarehouseId, DateTime>>,
) -> Variant {
    let kind = if row.is_master {
        VariantKind::Master
    } else {
        VariantKind::Attributed(attributes.into_iter().map(ProductAttribute::from).collect())
    };

    VariantRecord {
        id: row.id,
        product_key: row.product_key,
        data: VariantData {
            sku: row.sku,
            name: row.name,
            price: row.price,
            sale_price: row.sale_price,
            on_sale: row.on_sale,
            available: row.available,
            track_inventory: row.track_inventory,
            barcode: row.barcode,
            weight: row.weight,
        },
        kind,
        inventory: inventory
            .into_iter()
            .map(|r| (r.warehouse_id, StockLevel { count: r.count, low_count: r.low_count }))
            .collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

impl Db {
    /// Rebuild the in-memory inventory collection from the persisted rows,
    /// so a returned record reflects exactly what reconciliation left
    /// behind.
    async fn persisted_inventory(
        &self,
        variant_id: VariantId,
    ) -> Result<pvs_core::models::InventoryCollection<WarehouseId>, Error> {
        Ok(self
            .fetch_inventory(variant_id)
            .await?
            .into_iter()
            .map(|r| (r.warehouse_id, StockLevel { count: r.count, low_count: r.low_count }))
            .collect())
    }

    async fn fetch_attributes(
        &self,
        variant_id: VariantId,
    ) -> Result<Vec<AttributeRow>, Error> {
        let rows = sqlx::query_as::<_, AttributeRow>(
            r#"
            select
                a.id, a.option_id, a.name, a.sort_order
            from
                variant_attribute va
            join
                product_attribute a on a.id = va.attribute_id
            where
                va.variant_id = ?
            order by
                a.sort_order, a.id
            "#,
        )
        .bind(variant_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows)
    }
}

impl VariantRepository for Db {
    async fn get_by_id(&self, id: VariantId) -> Result<Option<Variant>, Error> {
        let mut query: QueryBuilder<'_, sqlx::Sqlite> = QueryBuilder::new("select ");
        query.push(BASE_COLUMNS);
        query.push(
            r#"
            from product_variant pv
            join product p on p.key = pv.product_key
            where pv.is_master = 0 and pv.id =
            "#,
        );
        query.push_bind(id);

        let Some(row) = query
            .build_query_as::<VariantRow>()
            .fetch_optional(&self.reader)
            .await?
        else {
            return Ok(None);
        };

        let attributes = self.fetch_attributes(id).await?;
        let inventory = self.fetch_inventory(id).await?;

        Ok(Some(assemble(row, attributes, inventory)))
    }

    async fn get_all(&self, ids: &[VariantId]) -> Result<Vec<Variant>, Error> {
        let ids: Vec<VariantId> = if ids.is_empty() {
            sqlx::query_scalar(
                r#"
                select pv.id
                from product_variant pv
                join product p on p.key = pv.product_key
                where pv.is_master = 0
                "#,
            )
            .fetch_all(&self.reader)
            .await?
        } else {
            ids.to_vec()
        };

        // TODO: batch the per-id loads if call sites ever hold large id sets
        let mut variants = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(variant) = self.get_by_id(id).await? {
                variants.push(variant);
            }
        }

        Ok(variants)
    }

    async fn get_by_query(&self, filter: &VariantFilter<ProductKey>) -> Result<Vec<Variant>, Error> {
        let mut query: QueryBuilder<'_, sqlx::Sqlite> = QueryBuilder::new(
            r#"
            select pv.id
            from product_variant pv
            join product p on p.key = pv.product_key
            where pv.is_master = 0 and
            "#,
        );
        push_filter(&mut query, filter);

        let matched: Vec<VariantId> = query
            .build_query_scalar()
            .fetch_all(&self.reader)
            .await?;

        let mut seen = HashSet::new();
        let mut variants = Vec::new();
        for id in matched {
            if seen.insert(id) {
                if let Some(variant) = self.get_by_id(id).await? {
                    variants.push(variant);
                }
            }
        }

        Ok(variants)
    }

    async fn find_by_product(&self, product_key: ProductKey) -> Result<Vec<Variant>, Error> {
        self.get_by_query(&VariantFilter::ProductIs(product_key)).await
    }

    async fn find_by_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<Variant>, Error> {
        let ids: Vec<VariantId> =
            sqlx::query_scalar("select variant_id from warehouse_inventory where warehouse_id = ?")
                .bind(warehouse_id)
                .fetch_all(&self.reader)
                .await?;

        let mut variants = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(variant) = self.get_by_id(id).await? {
                variants.push(variant);
            }
        }

        Ok(variants)
    }

    async fn find_by_attribute_set(
        &self,
        product_key: ProductKey,
        attribute_ids: &[AttributeId],
    ) -> Result<Option<Variant>, Error> {
        let variants = self.find_by_product(product_key).await?;

        Ok(variants
            .into_iter()
            .find(|v| v.kind.attributes().is_some_and(|a| a.matches_ids(attribute_ids))))
    }

    async fn attribute_set_exists(
        &self,
        product_key: ProductKey,
        attributes: &pvs_core::models::AttributeCollection<AttributeId, OptionId>,
    ) -> Result<bool, Error> {
        let variants = self.find_by_product(product_key).await?;

        Ok(variants.iter().any(|v| {
            v.kind.attributes().is_some_and(|candidate| {
                candidate.len() == attributes.len()
                    && attributes.ids().all(|id| candidate.contains(id))
            })
        }))
    }

    async fn sku_exists(&self, sku: &str, excluding: Option<VariantId>) -> Result<bool, Error> {
        let exists: bool = match excluding {
            Some(id) => {
                sqlx::query_scalar(
                    "select exists (select 1 from product_variant where sku = ? and id <> ?)",
                )
                .bind(sku)
                .bind(id)
                .fetch_one(&self.reader)
                .await?
            }
            None => {
                sqlx::query_scalar("select exists (select 1 from product_variant where sku = ?)")
                    .bind(sku)
                    .fetch_one(&self.reader)
                    .await?
            }
        };

        Ok(exists)
    }

    async fn get_warehouse_inventory(
        &self,
        variant_id: VariantId,
    ) -> Result<Vec<InventoryRecordOf<Db>>, Error> {
        self.fetch_inventory(variant_id).await
    }

    async fn insert(&self, variant: NewVariantOf<Db>, as_of: DateTime) -> Result<Variant, Error> {
        mandate_variant_rules(&variant.product_key, &variant.kind)?;

        if self.sku_exists(&variant.data.sku, None).await? {
            return Err(Error::Conflict("sku must be unique".to_owned()));
        }

        let NewVariant { product_key, data, kind, inventory } = variant;

        let id: VariantId = sqlx::query_scalar(
            r#"
            insert into product_variant
                (product_key, sku, name, price, sale_price, on_sale, available,
                 track_inventory, barcode, weight, is_master, created_at, updated_at)
            values
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            returning id
            "#,
        )
        .bind(product_key)
        .bind(data.sku.as_str())
        .bind(data.name.as_str())
        .bind(data.price)
        .bind(data.sale_price)
        .bind(data.on_sale)
        .bind(data.available)
        .bind(data.track_inventory)
        .bind(data.barcode.as_deref())
        .bind(data.weight)
        .bind(kind.is_master())
        .bind(as_of)
        .bind(as_of)
        .fetch_one(&self.writer)
        .await?;

        if let VariantKind::Attributed(attributes) = &kind {
            for attribute in attributes.iter() {
                sqlx::query(
                    r#"
                    insert into variant_attribute
                        (variant_id, attribute_id, option_id, created_at, updated_at)
                    values
                        (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(id)
                .bind(attribute.id)
                .bind(attribute.option_id)
                .bind(as_of)
                .bind(as_of)
                .execute(&self.writer)
                .await?;
            }
        }

        self.save_warehouse_inventory(id, &inventory, as_of).await?;

        debug!(variant_id = %id, sku = %data.sku, "inserted product variant");

        let inventory = self.persisted_inventory(id).await?;
        Ok(VariantRecord {
            id,
            product_key,
            data,
            kind,
            inventory,
            created_at: as_of,
            updated_at: as_of,
        })
    }

    async fn update(&self, variant: &Variant, as_of: DateTime) -> Result<Variant, Error> {
        mandate_variant_rules(&variant.product_key, &variant.kind)?;

        if self.sku_exists(&variant.data.sku, Some(variant.id)).await? {
            return Err(Error::Conflict("sku must be unique".to_owned()));
        }

        let result = sqlx::query(
            r#"
            update product_variant
            set
                product_key = ?, sku = ?, name = ?, price = ?, sale_price = ?,
                on_sale = ?, available = ?, track_inventory = ?, barcode = ?,
                weight = ?, is_master = ?, updated_at = ?
            where
                id = ?
            "#,
        )
        .bind(variant.product_key)
        .bind(variant.data.sku.as_str())
        .bind(variant.data.name.as_str())
        .bind(variant.data.price)
        .bind(variant.data.sale_price)
        .bind(variant.data.on_sale)
        .bind(variant.data.available)
        .bind(variant.data.track_inventory)
        .bind(variant.data.barcode.as_deref())
        .bind(variant.data.weight)
        .bind(variant.kind.is_master())
        .bind(as_of)
        .bind(variant.id)
        .execute(&self.writer)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        self.save_warehouse_inventory(variant.id, &variant.inventory, as_of).await?;

        debug!(variant_id = %variant.id, sku = %variant.data.sku, "updated product variant");

        let inventory = self.persisted_inventory(variant.id).await?;
        Ok(VariantRecord {
            id: variant.id,
            product_key: variant.product_key,
            data: variant.data.clone(),
            kind: variant.kind.clone(),
            inventory,
            created_at: variant.created_at,
            updated_at: as_of,
        })
    }

    async fn delete(&self, variant: Variant) -> Result<(), Error> {
        let id = variant.id;

        for clause in DELETE_CLAUSES {
            sqlx::query(clause).bind(id).execute(&self.writer).await?;
        }

        debug!(variant_id = %id, sku = %variant.data.sku, "deleted product variant");
        Ok(())
    }
}
