//! The expense-to-friend assignment relation.
//!
//! Structurally this is a loose set of `(expense_id, friend_id)` pairs with
//! no foreign-key enforcement, so the no-orphan invariant has to be upheld by
//! the callers. [`AssignmentSet`] is the single chokepoint for that: every
//! cascade ("remove all entries referencing X") and every atomic replacement
//! goes through it instead of being re-implemented at each delete site.

use serde::Serialize;
use uuid::Uuid;

/// A record that a given expense is shared by a given friend.
///
/// Unique per pair; carries no ordering semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub expense_id: Uuid,
    pub friend_id: Uuid,
}

/// The committed many-to-many relation between expenses and friends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentSet {
    entries: Vec<Assignment>,
}

impl AssignmentSet {
    /// Insert a pair. Duplicate pairs are ignored.
    pub fn insert(&mut self, expense_id: Uuid, friend_id: Uuid) {
        if !self.contains(expense_id, friend_id) {
            self.entries.push(Assignment {
                expense_id,
                friend_id,
            });
        }
    }

    pub fn contains(&self, expense_id: Uuid, friend_id: Uuid) -> bool {
        self.entries
            .iter()
            .any(|a| a.expense_id == expense_id && a.friend_id == friend_id)
    }

    /// Remove every entry referencing the friend (cascade for friend removal).
    pub fn remove_friend(&mut self, friend_id: Uuid) {
        self.entries.retain(|a| a.friend_id != friend_id);
    }

    /// Remove every entry referencing the expense (cascade for expense removal).
    pub fn remove_expense(&mut self, expense_id: Uuid) {
        self.entries.retain(|a| a.expense_id != expense_id);
    }

    /// Atomically replace all entries for an expense with the given friends.
    ///
    /// An empty slice legally produces an unassigned expense.
    pub fn replace_for_expense(&mut self, expense_id: Uuid, friend_ids: &[Uuid]) {
        self.remove_expense(expense_id);
        for friend_id in friend_ids {
            self.insert(expense_id, *friend_id);
        }
    }

    /// Friends sharing an expense, in insertion order.
    pub fn friends_of(&self, expense_id: Uuid) -> Vec<Uuid> {
        self.entries
            .iter()
            .filter(|a| a.expense_id == expense_id)
            .map(|a| a.friend_id)
            .collect()
    }

    /// Number of friends sharing an expense.
    pub fn share_count(&self, expense_id: Uuid) -> usize {
        self.entries
            .iter()
            .filter(|a| a.expense_id == expense_id)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_unique_per_pair() {
        let mut set = AssignmentSet::default();
        let (e, f) = (Uuid::new_v4(), Uuid::new_v4());
        set.insert(e, f);
        set.insert(e, f);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn cascades_remove_only_matching_entries() {
        let mut set = AssignmentSet::default();
        let (e1, e2) = (Uuid::new_v4(), Uuid::new_v4());
        let (f1, f2) = (Uuid::new_v4(), Uuid::new_v4());
        set.insert(e1, f1);
        set.insert(e1, f2);
        set.insert(e2, f1);

        set.remove_friend(f1);
        assert_eq!(set.friends_of(e1), vec![f2]);
        assert_eq!(set.share_count(e2), 0);

        set.remove_expense(e1);
        assert!(set.is_empty());
    }

    #[test]
    fn replace_for_expense_is_atomic_and_allows_empty() {
        let mut set = AssignmentSet::default();
        let e = Uuid::new_v4();
        let (f1, f2) = (Uuid::new_v4(), Uuid::new_v4());
        set.insert(e, f1);

        set.replace_for_expense(e, &[f2]);
        assert_eq!(set.friends_of(e), vec![f2]);

        set.replace_for_expense(e, &[]);
        assert_eq!(set.share_count(e), 0);
    }
}
