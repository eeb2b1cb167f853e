use pvs_core::models::{ProductAttribute, VariantData, VariantKind};
use pvs_sqlite::config::SqliteConfig;
use pvs_sqlite::types::{AttributeId, DateTime, OptionId, ProductKey, WarehouseId};
use pvs_sqlite::Db;

pub async fn open_db() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

/// The host catalog owns the product, attribute, and warehouse tables; the
/// seeding helpers below stand in for it.
pub async fn seed_product(db: &Db, as_of: DateTime) -> anyhow::Result<ProductKey> {
    let key = ProductKey(uuid::Uuid::new_v4());
    sqlx::query("insert into product (key, name, created_at, updated_at) values (?, ?, ?, ?)")
        .bind(key)
        .bind("test product")
        .bind(as_of)
        .bind(as_of)
        .execute(&db.writer)
        .await?;
    Ok(key)
}

pub async fn seed_attribute(
    db: &Db,
    option_id: OptionId,
    name: &str,
    sort_order: i32,
) -> anyhow::Result<ProductAttribute<AttributeId, OptionId>> {
    let id: AttributeId = sqlx::query_scalar(
        "insert into product_attribute (option_id, name, sort_order) values (?, ?, ?) returning id",
    )
    .bind(option_id)
    .bind(name)
    .bind(sort_order)
    .fetch_one(&db.writer)
    .await?;

    Ok(ProductAttribute {
        id,
        option_id,
        name: name.to_owned(),
        sort_order,
    })
}

pub async fn seed_warehouse(db: &Db, name: &str, as_of: DateTime) -> anyhow::Result<WarehouseId> {
    let id: WarehouseId = sqlx::query_scalar(
        "insert into warehouse (name, created_at, updated_at) values (?, ?, ?) returning id",
    )
    .bind(name)
    .bind(as_of)
    .bind(as_of)
    .fetch_one(&db.writer)
    .await?;
    Ok(id)
}

pub fn variant_data(sku: &str, name: &str, price: f64) -> VariantData {
    VariantData {
        sku: sku.to_owned(),
        name: name.to_owned(),
        price,
        sale_price: None,
        on_sale: false,
        available: true,
        track_inventory: true,
        barcode: None,
        weight: None,
    }
}

pub fn attributed(
    attributes: Vec<ProductAttribute<AttributeId, OptionId>>,
) -> VariantKind<AttributeId, OptionId> {
    VariantKind::Attributed(attributes.into_iter().collect())
}
