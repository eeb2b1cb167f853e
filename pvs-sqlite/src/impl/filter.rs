//! Translation of the abstract variant predicate into SQL.

use pvs_core::models::VariantFilter;
use sqlx::QueryBuilder;

use crate::types::ProductKey;

/// Append the SQL condition for `filter` to the builder, parenthesized and
/// fully parameterized. Column references assume the base query's aliases
/// (`pv` for the variant, `p` for the parent product).
pub(crate) fn push_filter(
    builder: &mut QueryBuilder<'_, sqlx::Sqlite>,
    filter: &VariantFilter<ProductKey>,
) {
    match filter {
        VariantFilter::ProductIs(key) => {
            builder.push("pv.product_key = ");
            builder.push_bind(*key);
        }
        VariantFilter::SkuIs(sku) => {
            builder.push("pv.sku = ");
            builder.push_bind(sku.clone());
        }
        VariantFilter::SkuLike(pattern) => {
            builder.push("pv.sku like ");
            builder.push_bind(pattern.clone());
        }
        VariantFilter::NameLike(pattern) => {
            builder.push("pv.name like ");
            builder.push_bind(pattern.clone());
        }
        VariantFilter::OnSale(value) => {
            builder.push("pv.on_sale = ");
            builder.push_bind(*value);
        }
        VariantFilter::Available(value) => {
            builder.push("pv.available = ");
            builder.push_bind(*value);
        }
        VariantFilter::All(filters) => push_group(builder, filters, " and ", "1 = 1"),
        VariantFilter::Any(filters) => push_group(builder, filters, " or ", "0 = 1"),
    }
}

fn push_group(
    builder: &mut QueryBuilder<'_, sqlx::Sqlite>,
    filters: &[VariantFilter<ProductKey>],
    separator: &str,
    empty: &str,
) {
    if filters.is_empty() {
        builder.push(empty);
        return;
    }

    builder.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, filter);
    }
    builder.push(")");
}
