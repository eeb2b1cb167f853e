use std::hash::Hash;

/// One option-value that distinguishes a variant: the value "Red" within the
/// option dimension "Color", for example.
///
/// Attribute definitions are owned by the host catalog's option management;
/// the variant store only references them by id and carries enough of the
/// definition (name, ordering) to present a loaded aggregate without a
/// second lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductAttribute<AttributeId, OptionId> {
    /// Key of the attribute (the option-value itself).
    pub id: AttributeId,
    /// Key of the option dimension the value belongs to.
    pub option_id: OptionId,
    /// Display name of the value, e.g. "Red".
    pub name: String,
    /// Position of the value within its option's choices.
    pub sort_order: i32,
}

/// An ordered, de-duplicated set of product attributes, keyed by attribute id.
///
/// Iteration order is insertion order, which matters to callers presenting a
/// variant's choices, so this wraps `indexmap::IndexMap` rather than the
/// std HashMap. The map is an implementation detail hidden behind the
/// newtype, at the cost of some boiler-plate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AttributeCollection<AttributeId: Eq + Hash, OptionId>(
    indexmap::IndexMap<
        AttributeId,
        ProductAttribute<AttributeId, OptionId>,
        rustc_hash::FxBuildHasher,
    >,
);

impl<A: Eq + Hash, O> Default for AttributeCollection<A, O> {
    fn default() -> Self {
        Self(indexmap::IndexMap::default())
    }
}

impl<A: Eq + Hash, O> AttributeCollection<A, O> {
    /// Number of attributes in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the collection holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if an attribute with the given id is present.
    pub fn contains(&self, id: &A) -> bool {
        self.0.contains_key(id)
    }

    /// Look up an attribute by id.
    pub fn get(&self, id: &A) -> Option<&ProductAttribute<A, O>> {
        self.0.get(id)
    }

    /// Iterate the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductAttribute<A, O>> {
        self.0.values()
    }

    /// Iterate the attribute ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &A> {
        self.0.keys()
    }

    /// True if this collection has exactly the given attribute ids: same
    /// cardinality, same membership, in any order.
    pub fn matches_ids(&self, ids: &[A]) -> bool {
        self.0.len() == ids.len() && ids.iter().all(|id| self.0.contains_key(id))
    }
}

impl<A: Eq + Hash + Clone, O> AttributeCollection<A, O> {
    /// Add an attribute, keyed by its id.
    ///
    /// Re-adding an id already present replaces that entry in place without
    /// changing its position, and returns the replaced attribute.
    pub fn insert(
        &mut self,
        attribute: ProductAttribute<A, O>,
    ) -> Option<ProductAttribute<A, O>> {
        self.0.insert(attribute.id.clone(), attribute)
    }
}

impl<A: Eq + Hash + Clone, O> FromIterator<ProductAttribute<A, O>> for AttributeCollection<A, O> {
    fn from_iter<I: IntoIterator<Item = ProductAttribute<A, O>>>(iter: I) -> Self {
        let mut collection = Self::default();
        for attribute in iter {
            collection.insert(attribute);
        }
        collection
    }
}

impl<A: Eq + Hash, O> IntoIterator for AttributeCollection<A, O> {
    type Item = ProductAttribute<A, O>;
    type IntoIter = indexmap::map::IntoValues<A, ProductAttribute<A, O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}
