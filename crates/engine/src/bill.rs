//! The bill aggregate: friends, expenses, assignments and shared costs.

use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    assignments::AssignmentSet,
    edit::EditSession,
    expenses::Expense,
    friends::Friend,
    groups,
    shared_costs::{DiscountType, SharedCosts},
    split::{self, SplitResult},
    util,
};

/// The aggregate being split.
///
/// All mutations go through the methods here so the no-orphan invariant of
/// the assignment relation holds at every observable state: removing a
/// friend or an expense cascades through [`AssignmentSet`], and reassignment
/// is buffered in an [`EditSession`] that only touches the committed relation
/// on commit.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill {
    pub declared_total: f64,
    friends: Vec<Friend>,
    expenses: Vec<Expense>,
    assignments: AssignmentSet,
    shared_costs: SharedCosts,
    edit: Option<EditSession>,
}

impl Bill {
    /// Create an empty bill from a user-committed starting amount.
    pub fn new(declared_total: f64) -> ResultEngine<Self> {
        let declared_total = util::validate_positive("bill amount", declared_total)?;
        Ok(Self::with_declared_total(declared_total))
    }

    pub(crate) fn with_declared_total(declared_total: f64) -> Self {
        Self {
            declared_total,
            friends: Vec::new(),
            expenses: Vec::new(),
            assignments: AssignmentSet::default(),
            shared_costs: SharedCosts::default(),
            edit: None,
        }
    }

    // ---- Friend registry ----

    /// Append a friend. The name is trimmed and must not be empty.
    pub fn add_friend(&mut self, name: &str) -> ResultEngine<Uuid> {
        let name = util::validate_label("friend name", name)?;
        let friend = Friend::new(name);
        let id = friend.id;
        self.friends.push(friend);
        Ok(id)
    }

    /// Append every member of a registered friend group.
    ///
    /// The lookup is case- and accent-insensitive. Each appended friend gets
    /// a fresh id, so repeated calls never collide.
    pub fn add_friend_group(&mut self, code: &str) -> ResultEngine<Vec<Uuid>> {
        let names =
            groups::lookup(code).ok_or_else(|| EngineError::InvalidGroupCode(code.to_string()))?;
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let friend = Friend::new((*name).to_string());
            ids.push(friend.id);
            self.friends.push(friend);
        }
        Ok(ids)
    }

    /// Remove a friend and every assignment referencing them.
    ///
    /// An absent id is an idempotent no-op. An open edit session drops the
    /// friend from its working selection as well, so a later commit cannot
    /// resurrect a reference to them.
    pub fn remove_friend(&mut self, friend_id: Uuid) {
        self.friends.retain(|f| f.id != friend_id);
        self.assignments.remove_friend(friend_id);
        if let Some(session) = self.edit.as_mut()
            && session.selection().contains(&friend_id)
        {
            session.toggle(friend_id);
        }
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    fn friend_exists(&self, friend_id: Uuid) -> bool {
        self.friends.iter().any(|f| f.id == friend_id)
    }

    // ---- Expense ledger ----

    /// Append an expense assigned to the given friends.
    ///
    /// Every id must name a registered friend and the list must not be empty;
    /// duplicates collapse into a single assignment entry.
    pub fn add_expense(
        &mut self,
        label: &str,
        cost: f64,
        assigned_friend_ids: &[Uuid],
    ) -> ResultEngine<Uuid> {
        let label = util::validate_label("expense label", label)?;
        let cost = util::validate_positive("expense cost", cost)?;
        if assigned_friend_ids.is_empty() {
            return Err(EngineError::Validation(
                "expense needs at least one assigned friend".to_string(),
            ));
        }
        for friend_id in assigned_friend_ids {
            if !self.friend_exists(*friend_id) {
                return Err(EngineError::KeyNotFound(friend_id.to_string()));
            }
        }

        let expense = Expense::new(label, cost);
        let expense_id = expense.id;
        self.expenses.push(expense);
        for friend_id in assigned_friend_ids {
            self.assignments.insert(expense_id, *friend_id);
        }
        Ok(expense_id)
    }

    /// Edit an expense's label and cost in place. Assignments are untouched.
    pub fn update_expense(&mut self, expense_id: Uuid, label: &str, cost: f64) -> ResultEngine<()> {
        let label = util::validate_label("expense label", label)?;
        let cost = util::validate_positive("expense cost", cost)?;
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(expense_id.to_string()))?;
        expense.label = label;
        expense.cost = cost;
        Ok(())
    }

    /// Remove an expense and all its assignment entries.
    ///
    /// An absent id is an idempotent no-op. If the expense was mid-edit the
    /// session is cancelled.
    pub fn remove_expense(&mut self, expense_id: Uuid) {
        self.expenses.retain(|e| e.id != expense_id);
        self.assignments.remove_expense(expense_id);
        if self
            .edit
            .as_ref()
            .is_some_and(|session| session.expense_id == expense_id)
        {
            self.edit = None;
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, expense_id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == expense_id)
    }

    pub fn assignments(&self) -> &AssignmentSet {
        &self.assignments
    }

    // ---- Assignment edit session ----

    /// Start reassigning who shares an expense.
    ///
    /// The session is seeded with the committed sharers. Starting a session
    /// while another is open discards the previous buffer.
    pub fn begin_edit_assignments(&mut self, expense_id: Uuid) -> ResultEngine<()> {
        if self.expense(expense_id).is_none() {
            return Err(EngineError::KeyNotFound(expense_id.to_string()));
        }
        let current = self.assignments.friends_of(expense_id);
        self.edit = Some(EditSession::new(expense_id, current));
        Ok(())
    }

    /// Toggle a friend in the open session's working selection.
    pub fn toggle_editing_friend(&mut self, friend_id: Uuid) -> ResultEngine<()> {
        if !self.friend_exists(friend_id) {
            return Err(EngineError::KeyNotFound(friend_id.to_string()));
        }
        let session = self.edit.as_mut().ok_or(EngineError::NoEditSession)?;
        session.toggle(friend_id);
        Ok(())
    }

    /// Atomically replace the expense's committed sharers with the buffer.
    ///
    /// An empty buffer is legal and produces an unassigned expense.
    pub fn commit_edit_assignments(&mut self) -> ResultEngine<()> {
        let session = self.edit.take().ok_or(EngineError::NoEditSession)?;
        self.assignments
            .replace_for_expense(session.expense_id, session.selection());
        Ok(())
    }

    /// Discard the open session, if any, with no mutation.
    pub fn cancel_edit_assignments(&mut self) {
        self.edit = None;
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    // ---- Shared costs ----

    pub fn set_tax(&mut self, value: f64) -> ResultEngine<()> {
        self.shared_costs.tax = util::validate_scalar("tax", value)?;
        Ok(())
    }

    pub fn set_service_fee(&mut self, value: f64) -> ResultEngine<()> {
        self.shared_costs.service_fee = util::validate_scalar("service fee", value)?;
        Ok(())
    }

    pub fn set_tip(&mut self, value: f64) -> ResultEngine<()> {
        self.shared_costs.tip = util::validate_scalar("tip", value)?;
        Ok(())
    }

    pub fn set_discount(&mut self, kind: DiscountType, value: f64) -> ResultEngine<()> {
        self.shared_costs.discount_value = util::validate_scalar("discount", value)?;
        self.shared_costs.discount_type = kind;
        Ok(())
    }

    pub fn shared_costs(&self) -> &SharedCosts {
        &self.shared_costs
    }

    pub(crate) fn shared_costs_mut(&mut self) -> &mut SharedCosts {
        &mut self.shared_costs
    }

    /// Scan import path: items land without any assignment entries.
    pub(crate) fn push_unassigned_expense(&mut self, label: String, cost: f64) {
        self.expenses.push(Expense::new(label, cost));
    }

    // ---- Split ----

    /// Compute the per-friend breakdown and reconciliation delta.
    pub fn split(&self) -> SplitResult {
        split::calculate_split(self)
    }
}
