//! Transient assignment edit session.
//!
//! Reassigning who shares an expense goes through a buffer decoupled from the
//! committed relation: toggles only touch the buffer, so a reader never sees
//! a half-edited selection, and cancel is exact with no side effects. The
//! buffer is written back in one atomic replacement on commit.

use uuid::Uuid;

/// An in-progress reassignment of one expense's sharers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub expense_id: Uuid,
    selection: Vec<Uuid>,
}

impl EditSession {
    /// Start a session seeded with the currently committed sharers.
    pub fn new(expense_id: Uuid, current: Vec<Uuid>) -> Self {
        Self {
            expense_id,
            selection: current,
        }
    }

    /// Toggle a friend in or out of the working selection.
    pub fn toggle(&mut self, friend_id: Uuid) {
        if let Some(pos) = self.selection.iter().position(|id| *id == friend_id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(friend_id);
        }
    }

    pub fn selection(&self) -> &[Uuid] {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let f = Uuid::new_v4();
        let mut session = EditSession::new(Uuid::new_v4(), vec![]);
        session.toggle(f);
        assert_eq!(session.selection(), &[f]);
        session.toggle(f);
        assert!(session.selection().is_empty());
    }
}
