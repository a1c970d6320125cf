//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects holding the same
//! attributes are the same value (a barcode, a category). To "modify" one,
//! build a new one.

/// Marker trait for value objects.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Barcode(String);
///
/// impl ValueObject for Barcode {}
///
/// assert_eq!(Barcode("8901231234567".into()), Barcode("8901231234567".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
