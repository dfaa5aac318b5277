//! Append-only store of the destinations clicked during a session.

use crate::Coordinate;

/// Ordered sequence of destinations in click order.
///
/// Duplicates are kept. There is no removal; a registry lives for one session
/// and is discarded with it.
///
/// # Examples
/// ```
/// use dropwise_core::{Coordinate, DestinationRegistry};
///
/// let mut registry = DestinationRegistry::new();
/// registry.append(Coordinate::new(3.20, 101.70));
/// registry.append(Coordinate::new(3.05, 101.75));
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.all()[0], Coordinate::new(3.20, 101.70));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationRegistry {
    destinations: Vec<Coordinate>,
}

impl DestinationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            destinations: Vec::new(),
        }
    }

    /// Add a destination to the end of the sequence.
    ///
    /// Appending never triggers a recomputation; the caller decides when to
    /// re-rank.
    pub fn append(&mut self, coordinate: Coordinate) {
        self.destinations.push(coordinate);
    }

    /// All destinations in click order.
    #[must_use]
    pub fn all(&self) -> &[Coordinate] {
        &self.destinations
    }

    /// Owned copy of the current destinations.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Coordinate> {
        self.destinations.clone()
    }

    /// Number of recorded destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether no destination has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_duplicates_in_click_order() {
        let a = Coordinate::new(1.0, 1.0);
        let b = Coordinate::new(2.0, 2.0);
        let mut registry = DestinationRegistry::new();
        registry.append(a);
        registry.append(b);
        registry.append(a);
        assert_eq!(registry.all(), &[a, b, a]);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut registry = DestinationRegistry::new();
        registry.append(Coordinate::new(1.0, 1.0));
        let snapshot = registry.snapshot();
        registry.append(Coordinate::new(2.0, 2.0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn starts_empty() {
        assert!(DestinationRegistry::new().is_empty());
    }
}
