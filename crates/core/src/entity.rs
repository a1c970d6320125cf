//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Position of the entity with `id` in an ordered slice.
pub fn position_of<E: Entity>(items: &[E], id: E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
