mod common;

use pvs_core::models::{InventoryCollection, NewVariant, StockLevel, ValidationError, VariantKind};
use pvs_core::ports::VariantRepository;
use pvs_sqlite::Error;
use pvs_sqlite::types::ProductKey;

#[tokio::test]
async fn insert_then_get_returns_assembled_aggregate() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;

    let color = common::seed_attribute(&db, 1.into(), "Red", 1).await?;
    let size = common::seed_attribute(&db, 2.into(), "M", 2).await?;

    let inserted = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("RED-M", "Red / M", 19.95),
                kind: common::attributed(vec![color.clone(), size.clone()]),
                inventory: InventoryCollection::default(),
            },
            now.into(),
        )
        .await?;

    assert!(db.sku_exists("RED-M", None).await?);

    let fetched = db.get_by_id(inserted.id).await?.expect("variant should exist");
    assert_eq!(fetched.product_key, product_key);
    assert_eq!(fetched.data.sku, "RED-M");
    assert_eq!(fetched.data.price, 19.95);
    assert!(fetched.inventory.is_empty());

    let attributes = fetched.kind.attributes().expect("attributed variant");
    assert_eq!(attributes.len(), 2);
    assert!(attributes.contains(&color.id));
    assert!(attributes.contains(&size.id));
    // assembled in sort order
    let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Red", "M"]);

    assert_eq!(fetched.created_at, fetched.updated_at);

    Ok(())
}

#[tokio::test]
async fn insert_rejects_duplicate_sku() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;

    let color = common::seed_attribute(&db, 1.into(), "Red", 1).await?;
    let size = common::seed_attribute(&db, 2.into(), "L", 2).await?;

    let first = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("RED-M", "Red / M", 19.95),
                kind: common::attributed(vec![color.clone()]),
                inventory: InventoryCollection::default(),
            },
            now.into(),
        )
        .await?;

    let duplicate = NewVariant {
        product_key,
        data: common::variant_data("RED-M", "Red / L", 21.95),
        kind: common::attributed(vec![size]),
        inventory: InventoryCollection::default(),
    };

    match db.insert(duplicate, now.into()).await {
        Err(Error::Conflict(message)) => assert_eq!(message, "sku must be unique"),
        other => panic!("expected conflict, got {other:?}"),
    }

    // the existing variant is unaffected
    let survivors = db.get_all(&[]).await?;
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, first.id);

    Ok(())
}

#[tokio::test]
async fn insert_requires_attributes_for_non_master() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;

    let variant = NewVariant {
        product_key,
        data: common::variant_data("EMPTY", "No options", 5.0),
        kind: common::attributed(vec![]),
        inventory: InventoryCollection::default(),
    };

    match db.insert(variant, now.into()).await {
        Err(Error::Validation(e)) => assert_eq!(e, ValidationError::EmptyAttributeSet),
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(!db.sku_exists("EMPTY", None).await?);

    Ok(())
}

#[tokio::test]
async fn insert_requires_product_key() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;

    let variant = NewVariant {
        product_key: ProductKey(uuid::Uuid::nil()),
        data: common::variant_data("ORPHAN", "Orphan", 5.0),
        kind: VariantKind::Master,
        inventory: InventoryCollection::default(),
    };

    match db.insert(variant, now.into()).await {
        Err(Error::Validation(e)) => assert_eq!(e, ValidationError::MissingProductKey),
        other => panic!("expected validation error, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn update_keeps_own_sku_and_refreshes_timestamp() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;
    let color = common::seed_attribute(&db, 1.into(), "Red", 1).await?;

    let mut variant = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("RED-M", "Red / M", 19.95),
                kind: common::attributed(vec![color]),
                inventory: InventoryCollection::default(),
            },
            now.into(),
        )
        .await?;

    variant.data.name = "Red / Medium".to_owned();
    variant.data.price = 17.5;

    let update_time = now + std::time::Duration::from_secs(5);
    let updated = db.update(&variant, update_time.into()).await?;

    assert_eq!(updated.created_at, variant.created_at);
    assert_eq!(updated.updated_at, update_time.into());

    let fetched = db.get_by_id(variant.id).await?.expect("variant should exist");
    assert_eq!(fetched.data.name, "Red / Medium");
    assert_eq!(fetched.data.price, 17.5);
    assert!(fetched.updated_at > fetched.created_at);

    Ok(())
}

#[tokio::test]
async fn update_rejects_sku_held_by_other_variant() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;
    let color = common::seed_attribute(&db, 1.into(), "Red", 1).await?;
    let size = common::seed_attribute(&db, 2.into(), "L", 2).await?;

    db.insert(
        NewVariant {
            product_key,
            data: common::variant_data("RED-M", "Red / M", 19.95),
            kind: common::attributed(vec![color]),
            inventory: InventoryCollection::default(),
        },
        now.into(),
    )
    .await?;

    let mut other = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("RED-L", "Red / L", 19.95),
                kind: common::attributed(vec![size]),
                inventory: InventoryCollection::default(),
            },
            now.into(),
        )
        .await?;

    other.data.sku = "RED-M".to_owned();

    match db.update(&other, now.into()).await {
        Err(Error::Conflict(_)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn update_of_missing_variant_is_not_found() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;
    let color = common::seed_attribute(&db, 1.into(), "Red", 1).await?;

    let variant = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("RED-M", "Red / M", 19.95),
                kind: common::attributed(vec![color]),
                inventory: InventoryCollection::default(),
            },
            now.into(),
        )
        .await?;

    db.delete(variant.clone()).await?;

    match db.update(&variant, now.into()).await {
        Err(Error::NotFound) => {}
        other => panic!("expected not-found, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn delete_leaves_no_residual_child_rows() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;
    let color = common::seed_attribute(&db, 1.into(), "Red", 1).await?;
    let warehouse = common::seed_warehouse(&db, "east", now.into()).await?;

    let variant = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("RED-M", "Red / M", 19.95),
                kind: common::attributed(vec![color]),
                inventory: [(warehouse, StockLevel { count: 10, low_count: 2 })]
                    .into_iter()
                    .collect(),
            },
            now.into(),
        )
        .await?;
    let id = variant.id;

    db.delete(variant).await?;

    assert!(db.get_by_id(id).await?.is_none());
    assert!(db.get_warehouse_inventory(id).await?.is_empty());

    let associations: i64 =
        sqlx::query_scalar("select count(*) from variant_attribute where variant_id = ?")
            .bind(id)
            .fetch_one(&db.reader)
            .await?;
    assert_eq!(associations, 0);

    let rows: i64 =
        sqlx::query_scalar("select count(*) from product_variant where id = ?")
            .bind(id)
            .fetch_one(&db.reader)
            .await?;
    assert_eq!(rows, 0);

    Ok(())
}

#[tokio::test]
async fn master_variant_persists_but_stays_off_the_read_surface() -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc();
    let db = common::open_db().await?;
    let product_key = common::seed_product(&db, now.into()).await?;

    let master = db
        .insert(
            NewVariant {
                product_key,
                data: common::variant_data("BASE", "Base product", 9.95),
                kind: VariantKind::Master,
                inventory: InventoryCollection::default(),
            },
            now.into(),
        )
        .await?;

    // the row exists and holds its sku globally...
    assert!(db.sku_exists("BASE", None).await?);
    // ...but the read surface only addresses attribute-bearing variants
    assert!(db.get_by_id(master.id).await?.is_none());
    assert!(db.get_all(&[]).await?.is_empty());

    Ok(())
}
