//! Repository trait implementations for the SQLite database.
//!
//! This module binds the concrete identifier, timestamp, and error types
//! and implements the `pvs-core` ports against [`Db`](crate::Db).

use crate::Db;
use crate::types::{AttributeId, DateTime, OptionId, ProductKey, VariantId, WarehouseId};
use pvs_core::ports::Repository;

mod filter;
mod inventory;
mod variant;

impl Repository for Db {
    type Error = crate::Error;
    type DateTime = DateTime;
    type VariantId = VariantId;
    type ProductKey = ProductKey;
    type AttributeId = AttributeId;
    type OptionId = OptionId;
    type WarehouseId = WarehouseId;
}
