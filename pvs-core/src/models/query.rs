/// An abstract predicate over variants, for
/// [`get_by_query`](crate::ports::VariantRepository::get_by_query).
///
/// Callers compose a tree of field conditions; the backend translates it
/// into a storage-level filter over the variant row joined to its parent
/// product. Matching is restricted to non-master variants, like the rest of
/// the read surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantFilter<ProductKey> {
    /// The variant belongs to the given product.
    ProductIs(ProductKey),
    /// Exact SKU match.
    SkuIs(String),
    /// SKU matches the given `LIKE` pattern (`%`/`_` wildcards).
    SkuLike(String),
    /// Name matches the given `LIKE` pattern.
    NameLike(String),
    /// The on-sale flag has the given value.
    OnSale(bool),
    /// The availability flag has the given value.
    Available(bool),
    /// Every sub-filter matches. Empty matches everything.
    All(Vec<VariantFilter<ProductKey>>),
    /// At least one sub-filter matches. Empty matches nothing.
    Any(Vec<VariantFilter<ProductKey>>),
}
