//! Strongly-typed identifiers for the variant catalog.
//!
//! Newtype wrappers keep the various integer keys from being mixed up at
//! compile time. All of them serialize transparently and carry `sqlx`
//! codecs for SQLite; the integer ids are stored as INTEGER, the product
//! key as its canonical uuid string.

macro_rules! new_id {
    ($struct:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $struct(pub i64);

        impl From<i64> for $struct {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for i64 {
            fn from(value: $struct) -> i64 {
                value.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $struct {
            type Err = <i64 as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl sqlx::Type<sqlx::Sqlite> for $struct {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $struct {
            fn encode_by_ref(
                &self,
                args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0, args)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $struct {
            fn decode(
                value: sqlx::sqlite::SqliteValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let value = <i64 as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
                Ok(Self(value))
            }
        }
    };
}

new_id!(
    VariantId,
    "Storage-assigned identifier of a product variant"
);
new_id!(
    AttributeId,
    "Identifier of a product attribute (an option-value such as \"Red\")"
);
new_id!(
    OptionId,
    "Identifier of an option dimension (such as \"Color\")"
);
new_id!(WarehouseId, "Identifier of a warehouse");

/// External key of a parent product, as assigned by the host catalog.
///
/// The nil uuid is the "unset" sentinel; persistence rejects it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ProductKey(pub uuid::Uuid);

impl ProductKey {
    /// True for the nil (unset) key.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<uuid::Uuid> for ProductKey {
    fn from(value: uuid::Uuid) -> Self {
        Self(value)
    }
}

impl From<ProductKey> for uuid::Uuid {
    fn from(value: ProductKey) -> uuid::Uuid {
        value.0
    }
}

impl std::fmt::Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProductKey {
    type Err = <uuid::Uuid as std::str::FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl sqlx::Type<sqlx::Sqlite> for ProductKey {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ProductKey {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0.to_string(), args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ProductKey {
    fn decode(
        value: sqlx::sqlite::SqliteValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let string = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        let value = string.parse()?;
        Ok(value)
    }
}
