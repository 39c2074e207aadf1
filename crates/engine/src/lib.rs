//! Split-allocation engine for ShareFare.
//!
//! The engine owns at most one [`Bill`] at a time: the aggregate of friends,
//! expenses, the expense-to-friend assignment relation and the bill-wide
//! shared costs. All mutations are synchronous and run to completion before
//! the next observable state, so there is exactly one logical owner of the
//! aggregate and no locking. The split itself is a pure function recomputed
//! on every read, not incrementally.

use uuid::Uuid;

pub use assignments::{Assignment, AssignmentSet};
pub use bill::Bill;
pub use edit::EditSession;
pub use error::EngineError;
pub use expenses::Expense;
pub use friends::Friend;
pub use scan::{ScanData, ScannedItem};
pub use shared_costs::{DiscountType, SharedCosts};
pub use share::share_message;
pub use split::{PersonShare, SplitResult, calculate_split};

mod assignments;
mod bill;
mod edit;
mod error;
mod expenses;
mod friends;
mod groups;
mod scan;
mod share;
mod shared_costs;
mod split;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Owner of the active bill.
///
/// Every operation that needs a live bill fails with
/// [`EngineError::NoBill`] when none exists; creating a bill (manually or
/// from a scan) replaces the previous one, and a failed scan leaves it
/// untouched because the replacement only happens once the new bill is fully
/// built.
#[derive(Debug, Default)]
pub struct Engine {
    bill: Option<Bill>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    fn bill_mut(&mut self) -> ResultEngine<&mut Bill> {
        self.bill.as_mut().ok_or(EngineError::NoBill)
    }

    pub fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    /// Start a bill from a user-committed starting amount.
    pub fn create_bill(&mut self, declared_total: f64) -> ResultEngine<()> {
        self.bill = Some(Bill::new(declared_total)?);
        Ok(())
    }

    /// Replace the active bill with one built from a completed scan.
    ///
    /// Only ever called with a fully parsed scan: a failed or malformed scan
    /// is rejected client-side and never reaches the engine.
    pub fn apply_scan(&mut self, data: ScanData) {
        self.bill = Some(Bill::from_scan(data));
    }

    /// Destroy the active bill and all its collections.
    pub fn reset(&mut self) {
        self.bill = None;
    }

    // ---- Friend registry ----

    pub fn add_friend(&mut self, name: &str) -> ResultEngine<Uuid> {
        self.bill_mut()?.add_friend(name)
    }

    pub fn add_friend_group(&mut self, code: &str) -> ResultEngine<Vec<Uuid>> {
        self.bill_mut()?.add_friend_group(code)
    }

    pub fn remove_friend(&mut self, friend_id: Uuid) -> ResultEngine<()> {
        self.bill_mut()?.remove_friend(friend_id);
        Ok(())
    }

    /// Current friend names, for mirroring into a session cache.
    pub fn friend_names(&self) -> Vec<String> {
        self.bill
            .as_ref()
            .map(|bill| bill.friends().iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }

    // ---- Expense ledger ----

    pub fn add_expense(
        &mut self,
        label: &str,
        cost: f64,
        assigned_friend_ids: &[Uuid],
    ) -> ResultEngine<Uuid> {
        self.bill_mut()?.add_expense(label, cost, assigned_friend_ids)
    }

    pub fn update_expense(&mut self, expense_id: Uuid, label: &str, cost: f64) -> ResultEngine<()> {
        self.bill_mut()?.update_expense(expense_id, label, cost)
    }

    pub fn remove_expense(&mut self, expense_id: Uuid) -> ResultEngine<()> {
        self.bill_mut()?.remove_expense(expense_id);
        Ok(())
    }

    // ---- Assignment edit session ----

    pub fn begin_edit_assignments(&mut self, expense_id: Uuid) -> ResultEngine<()> {
        self.bill_mut()?.begin_edit_assignments(expense_id)
    }

    pub fn toggle_editing_friend(&mut self, friend_id: Uuid) -> ResultEngine<()> {
        self.bill_mut()?.toggle_editing_friend(friend_id)
    }

    pub fn commit_edit_assignments(&mut self) -> ResultEngine<()> {
        self.bill_mut()?.commit_edit_assignments()
    }

    pub fn cancel_edit_assignments(&mut self) -> ResultEngine<()> {
        self.bill_mut()?.cancel_edit_assignments();
        Ok(())
    }

    // ---- Shared costs ----

    pub fn set_tax(&mut self, value: f64) -> ResultEngine<()> {
        self.bill_mut()?.set_tax(value)
    }

    pub fn set_service_fee(&mut self, value: f64) -> ResultEngine<()> {
        self.bill_mut()?.set_service_fee(value)
    }

    pub fn set_tip(&mut self, value: f64) -> ResultEngine<()> {
        self.bill_mut()?.set_tip(value)
    }

    pub fn set_discount(&mut self, kind: DiscountType, value: f64) -> ResultEngine<()> {
        self.bill_mut()?.set_discount(kind, value)
    }

    // ---- Split ----

    pub fn split(&self) -> ResultEngine<SplitResult> {
        Ok(self.bill.as_ref().ok_or(EngineError::NoBill)?.split())
    }
}
