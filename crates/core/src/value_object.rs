//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values, never
/// by identity. A `PropertyValue` or an `OutlineItem` with equal fields is the
/// same value; a `CatalogProduct` with the same fields but a different id is a
/// different entity.
///
/// The bounds keep value objects cheap to copy, comparable, and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
