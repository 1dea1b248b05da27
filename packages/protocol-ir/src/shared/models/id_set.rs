/*
 * Identifier Set
 *
 * Immutable finite set of capability / requirement / state identifiers.
 *
 * # Semantics
 * - Value type: structural equality, no duplicates, order-free
 * - Every operation is pure and returns a fresh set
 * - Backed by a BTreeSet so iteration order is the identifier order
 *
 * # Time Complexity
 * - union / intersection / difference: O(n + m)
 * - contains: O(m log n)
 */

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Opaque identifier (capability, requirement or state name)
pub type Ident = String;

/// Immutable set of identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdSet {
    items: BTreeSet<Ident>,
}

impl IdSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from any iterator of names
    ///
    /// # Example
    /// ```
    /// use protocol_ir::shared::models::IdSet;
    ///
    /// let reqs = IdSet::of(["db", "host", "db"]);
    /// assert_eq!(reqs.len(), 2);
    /// ```
    pub fn of<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Ident>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Membership test for a single identifier
    pub fn has(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Ident> {
        self.items.iter()
    }

    /// a ∪ b
    pub fn union(&self, other: &IdSet) -> IdSet {
        Self {
            items: self.items.union(&other.items).cloned().collect(),
        }
    }

    /// a ∩ b
    pub fn intersection(&self, other: &IdSet) -> IdSet {
        Self {
            items: self.items.intersection(&other.items).cloned().collect(),
        }
    }

    /// a \ b
    pub fn difference(&self, other: &IdSet) -> IdSet {
        Self {
            items: self.items.difference(&other.items).cloned().collect(),
        }
    }

    /// `other ⊆ self`
    pub fn contains(&self, other: &IdSet) -> bool {
        other.items.is_subset(&self.items)
    }

    /// `other ⊊ self`
    pub fn strictly_contains(&self, other: &IdSet) -> bool {
        self.items.len() > other.items.len() && self.contains(other)
    }

    pub fn equals(&self, other: &IdSet) -> bool {
        self == other
    }
}

impl<S: Into<Ident>> FromIterator<S> for IdSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl IntoIterator for IdSet {
    type Item = Ident;
    type IntoIter = btree_set::IntoIter<Ident>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = &'a Ident;
    type IntoIter = btree_set::Iter<'a, Ident>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl std::fmt::Display for IdSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_intersection_difference() {
        let a = IdSet::of(["r1", "r2"]);
        let b = IdSet::of(["r2", "r3"]);

        assert_eq!(a.union(&b), IdSet::of(["r1", "r2", "r3"]));
        assert_eq!(a.intersection(&b), IdSet::of(["r2"]));
        assert_eq!(a.difference(&b), IdSet::of(["r1"]));
        assert_eq!(b.difference(&a), IdSet::of(["r3"]));
    }

    #[test]
    fn test_operations_are_pure() {
        let a = IdSet::of(["x"]);
        let b = IdSet::of(["y"]);
        let _ = a.union(&b);
        let _ = a.intersection(&b);
        let _ = a.difference(&b);

        assert_eq!(a, IdSet::of(["x"]));
        assert_eq!(b, IdSet::of(["y"]));
    }

    #[test]
    fn test_contains_is_subset_of_receiver() {
        let big = IdSet::of(["r1", "r2"]);
        let small = IdSet::of(["r2"]);

        assert!(big.contains(&small));
        assert!(!small.contains(&big));
        assert!(big.contains(&big));
        assert!(big.contains(&IdSet::new()));
        assert!(IdSet::new().contains(&IdSet::new()));
    }

    #[test]
    fn test_strictly_contains() {
        let big = IdSet::of(["r1", "r2"]);
        let small = IdSet::of(["r1"]);

        assert!(big.strictly_contains(&small));
        assert!(!big.strictly_contains(&big));
        assert!(!small.strictly_contains(&big));
        assert!(!IdSet::new().strictly_contains(&IdSet::new()));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = IdSet::of(["b", "a", "c"]);
        let b = IdSet::of(["c", "b", "a", "a"]);
        assert!(a.equals(&b));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(IdSet::of(["b", "a"]).to_string(), "{a, b}");
        assert_eq!(IdSet::new().to_string(), "{}");
    }

    #[test]
    fn test_serde_as_plain_list() {
        let set = IdSet::of(["host", "db"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["db","host"]"#);

        let back: IdSet = serde_json::from_str(r#"["host","host","db"]"#).unwrap();
        assert_eq!(back, set);
    }
}
