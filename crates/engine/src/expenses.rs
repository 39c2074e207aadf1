//! Billed line items.

use serde::Serialize;
use uuid::Uuid;

/// A single billed line item.
///
/// The cost is an unrounded decimal amount; rounding happens only at
/// presentation boundaries. Who shares the item lives in the assignment
/// relation, not here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expense {
    pub id: Uuid,
    pub label: String,
    pub cost: f64,
}

impl Expense {
    pub fn new(label: String, cost: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            cost,
        }
    }
}
