//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two instances
/// with the same attributes are the same value. To "modify" one, construct a
/// new one, which re-runs its validation.
///
/// Example: a person's name (no identity, only the characters matter) versus
/// a user (two users with identical names are still different users).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
