//! Structured output of the bill-scanning collaborator.
//!
//! The OCR service is opaque to the engine: it hands back an
//! optional total, optional shared-cost fields and an ordered item list. The
//! wire envelope lives in `api_types`; this module is the engine-side shape a
//! front end maps it into.

use crate::{bill::Bill, shared_costs::DiscountType};

/// One scanned line item.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedItem {
    pub name: String,
    pub price: f64,
}

/// Structured data extracted from a bill image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanData {
    pub total: Option<f64>,
    pub tax: Option<f64>,
    pub service_fee: Option<f64>,
    pub tips: Option<f64>,
    pub discount: Option<f64>,
    pub items: Vec<ScannedItem>,
}

impl Bill {
    /// Build a fresh bill from a completed scan.
    ///
    /// The declared total defaults to 0 when the scan found none. A scanned
    /// discount is always applied as a flat amount regardless of the original
    /// bill's discount semantics. Every item lands as an unassigned expense;
    /// items with a blank name or a non-positive price are dropped, as are
    /// non-finite or negative scalar fields.
    pub fn from_scan(data: ScanData) -> Self {
        let mut bill = Bill::with_declared_total(sanitize(data.total));

        let costs = bill.shared_costs_mut();
        costs.tax = sanitize(data.tax);
        costs.service_fee = sanitize(data.service_fee);
        costs.tip = sanitize(data.tips);
        costs.discount_value = sanitize(data.discount);
        costs.discount_type = DiscountType::Flat;

        for item in data.items {
            let name = item.name.trim();
            if name.is_empty() || !item.price.is_finite() || item.price <= 0.0 {
                continue;
            }
            bill.push_unassigned_expense(name.to_string(), item.price);
        }
        bill
    }
}

fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_populates_costs_and_unassigned_expenses() {
        let bill = Bill::from_scan(ScanData {
            total: Some(118.0),
            tax: Some(10.0),
            service_fee: None,
            tips: Some(8.0),
            discount: Some(5.0),
            items: vec![
                ScannedItem {
                    name: "Pizza".to_string(),
                    price: 100.0,
                },
                ScannedItem {
                    name: "  ".to_string(),
                    price: 3.0,
                },
            ],
        });

        assert_eq!(bill.declared_total, 118.0);
        assert_eq!(bill.shared_costs().tax, 10.0);
        assert_eq!(bill.shared_costs().service_fee, 0.0);
        assert_eq!(bill.shared_costs().tip, 8.0);
        assert_eq!(bill.shared_costs().discount_type, DiscountType::Flat);
        assert_eq!(bill.shared_costs().discount_value, 5.0);

        assert_eq!(bill.expenses().len(), 1);
        let pizza = &bill.expenses()[0];
        assert_eq!(pizza.label, "Pizza");
        assert_eq!(bill.assignments().share_count(pizza.id), 0);
    }

    #[test]
    fn missing_total_defaults_to_zero() {
        let bill = Bill::from_scan(ScanData::default());
        assert_eq!(bill.declared_total, 0.0);
        assert!(bill.expenses().is_empty());
    }
}
