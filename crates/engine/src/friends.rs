//! Participants of the active bill.

use serde::Serialize;
use uuid::Uuid;

/// A participant in the split.
///
/// The id is generated on insertion and stays stable for the lifetime of the
/// bill; assignments reference it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Friend {
    pub id: Uuid,
    pub name: String,
}

impl Friend {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
