//! Bill-wide shared costs and discount parameters.

use serde::{Deserialize, Serialize};

/// How the discount value is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// A flat currency amount deducted from the item totals.
    #[default]
    Flat,
    /// A percentage of the item totals.
    Percentage,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Percentage => "percentage",
        }
    }
}

impl TryFrom<&str> for DiscountType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "flat" => Ok(Self::Flat),
            "percentage" | "percent" | "%" => Ok(Self::Percentage),
            other => Err(format!("unknown discount type: {other}")),
        }
    }
}

/// Tax, service fee, tip and discount, scoped to the active bill.
///
/// Tax, fee and tip are split equally across all friends regardless of what
/// they ordered; the discount is allocated proportionally to each friend's
/// item-total share. All scalars are `>= 0` and finite; mutation goes through
/// the bill so the checks are applied consistently.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SharedCosts {
    pub tax: f64,
    pub service_fee: f64,
    pub tip: f64,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

impl SharedCosts {
    /// Sum of the equally-split components (tax + service fee + tip).
    pub fn common_total(&self) -> f64 {
        self.tax + self.service_fee + self.tip
    }
}
