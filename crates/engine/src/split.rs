//! The split calculator.
//!
//! A pure function over the bill's four collections plus the declared total.
//! No rounding happens here: amounts stay unrounded decimals and are only
//! formatted to two decimals at presentation and export boundaries.

use serde::Serialize;
use uuid::Uuid;

use crate::{bill::Bill, shared_costs::DiscountType};

/// One friend's computed share.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PersonShare {
    pub friend_id: Uuid,
    pub name: String,
    /// Final owed amount: item total - proportional discount + equal share of
    /// the common costs.
    pub amount: f64,
    /// Human-readable descriptors of the items contributing to the amount,
    /// tagged `(shared)` or `(solo)`.
    pub items: Vec<String>,
}

/// The full breakdown plus the reconciliation delta.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SplitResult {
    /// Per-friend shares in friend insertion order.
    pub shares: Vec<PersonShare>,
    /// Sum of cost over all expenses, including unassigned ones.
    pub total_expenses: f64,
    /// Resolved discount (flat value, or percentage of `total_expenses`).
    pub discount_amount: f64,
    /// Sum of all final per-friend amounts.
    pub calculated_total: f64,
    /// `declared_total - calculated_total`. A signed diagnostic: it is
    /// surfaced to the caller, never used to auto-correct the allocation.
    pub difference: f64,
}

impl SplitResult {
    pub fn share_for(&self, friend_id: Uuid) -> Option<&PersonShare> {
        self.shares.iter().find(|s| s.friend_id == friend_id)
    }
}

/// Compute each friend's owed amount and the reconciliation delta.
///
/// - An expense shared by `n > 0` friends contributes `cost / n` to each of
///   them. An unassigned expense (`n == 0`) contributes to `total_expenses`
///   (and therefore to percentage-discount and proportion math) but to no
///   individual's amount; the unallocated cost shows up in `difference`.
/// - The discount is allocated proportionally to each friend's item-total
///   share; with no expenses yet, proportions fall back to an equal split.
/// - Tax, service fee and tip are split equally across all friends.
///
/// With no friends the result is all-zero and empty: both user-controlled
/// denominators (`share_count` and `|friends|`) are guarded here.
pub fn calculate_split(bill: &Bill) -> SplitResult {
    let friends = bill.friends();
    if friends.is_empty() {
        return SplitResult::default();
    }

    let mut shares: Vec<PersonShare> = friends
        .iter()
        .map(|f| PersonShare {
            friend_id: f.id,
            name: f.name.clone(),
            amount: 0.0,
            items: Vec::new(),
        })
        .collect();

    let mut total_expenses = 0.0;
    for expense in bill.expenses() {
        total_expenses += expense.cost;

        let assigned = bill.assignments().friends_of(expense.id);
        let share_count = assigned.len();
        if share_count == 0 {
            continue;
        }

        let per_person_item_cost = expense.cost / share_count as f64;
        let tag = if share_count > 1 { "shared" } else { "solo" };
        for friend_id in assigned {
            if let Some(share) = shares.iter_mut().find(|s| s.friend_id == friend_id) {
                share.amount += per_person_item_cost;
                share.items.push(format!("{} ({tag})", expense.label));
            }
        }
    }

    let costs = bill.shared_costs();
    let discount_amount = match costs.discount_type {
        DiscountType::Flat => costs.discount_value,
        DiscountType::Percentage => total_expenses * costs.discount_value / 100.0,
    };
    let per_person_common_cost = costs.common_total() / friends.len() as f64;

    let mut calculated_total = 0.0;
    for share in &mut shares {
        let item_total = share.amount;
        let proportion = if total_expenses > 0.0 {
            item_total / total_expenses
        } else {
            1.0 / friends.len() as f64
        };
        share.amount = item_total - discount_amount * proportion + per_person_common_cost;
        calculated_total += share.amount;
    }

    SplitResult {
        shares,
        total_expenses,
        discount_amount,
        calculated_total,
        difference: bill.declared_total - calculated_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_discount_splits_proportionally() {
        let mut bill = Bill::new(440.0).unwrap();
        let a = bill.add_friend("A").unwrap();
        let b = bill.add_friend("B").unwrap();
        bill.add_expense("Starter", 100.0, &[a]).unwrap();
        bill.add_expense("Mains", 300.0, &[b]).unwrap();
        bill.set_discount(DiscountType::Flat, 40.0).unwrap();

        let result = bill.split();
        // A's proportion is 100/400 = 0.25, B's 0.75.
        assert_eq!(result.share_for(a).unwrap().amount, 100.0 - 10.0);
        assert_eq!(result.share_for(b).unwrap().amount, 300.0 - 30.0);
        assert_eq!(result.discount_amount, 40.0);
    }

    #[test]
    fn percentage_discount_resolves_against_total_expenses() {
        let mut bill = Bill::new(500.0).unwrap();
        let a = bill.add_friend("A").unwrap();
        bill.add_expense("Everything", 500.0, &[a]).unwrap();
        bill.set_discount(DiscountType::Percentage, 10.0).unwrap();

        let result = bill.split();
        assert_eq!(result.total_expenses, 500.0);
        assert_eq!(result.discount_amount, 50.0);
    }

    #[test]
    fn no_expenses_falls_back_to_equal_proportion() {
        let mut bill = Bill::new(30.0).unwrap();
        bill.add_friend("A").unwrap();
        bill.add_friend("B").unwrap();
        bill.add_friend("C").unwrap();
        bill.set_discount(DiscountType::Flat, 9.0).unwrap();
        bill.set_tip(30.0).unwrap();

        let result = bill.split();
        for share in &result.shares {
            assert_eq!(share.amount, -3.0 + 10.0);
        }
    }

    #[test]
    fn item_descriptors_tag_shared_and_solo() {
        let mut bill = Bill::new(30.0).unwrap();
        let a = bill.add_friend("A").unwrap();
        let b = bill.add_friend("B").unwrap();
        bill.add_expense("Pizza", 20.0, &[a, b]).unwrap();
        bill.add_expense("Coke", 10.0, &[a]).unwrap();

        let result = bill.split();
        assert_eq!(
            result.share_for(a).unwrap().items,
            vec!["Pizza (shared)".to_string(), "Coke (solo)".to_string()]
        );
        assert_eq!(
            result.share_for(b).unwrap().items,
            vec!["Pizza (shared)".to_string()]
        );
    }
}
