//! Wire types for the external collaborators.
//!
//! Two HTTP services sit outside the core: the bill-scanning OCR backend and
//! the Splitwise-style ledger sync. Their payloads use camelCase field names;
//! these DTOs pin the JSON shape so clients and tests agree on it.

use serde::{Deserialize, Serialize};

pub mod scan {
    use super::*;

    /// Envelope returned by the bill-scan service.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ScanResponse {
        pub success: bool,
        pub bill_data: Option<BillData>,
    }

    /// Structured fields extracted from the bill image. Everything except the
    /// item list is optional: the OCR backend omits what it could not read.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BillData {
        pub total: Option<f64>,
        pub tax: Option<f64>,
        pub service_fee: Option<f64>,
        pub tips: Option<f64>,
        pub discount: Option<f64>,
        #[serde(default)]
        pub items: Vec<ScannedItem>,
    }

    /// One line item as read off the bill.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ScannedItem {
        pub name: String,
        pub price: f64,
    }
}

pub mod sync {
    use super::*;

    /// One friend's computed amount, as the ledger service expects it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PersonAmount {
        pub name: String,
        pub amount: f64,
    }

    /// Request body for the ledger-sync call.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SyncRequest {
        pub bill_amount: f64,
        pub bill_description: String,
        pub expenses: Vec<PersonAmount>,
    }

    /// Response from the ledger service: either a plain acknowledgement or a
    /// list of participant names it could not match.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SyncResponse {
        pub message: Option<String>,
        #[serde(default)]
        pub not_found: Vec<String>,
    }
}

/// Error body both services use on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_response_accepts_sparse_payloads() {
        let parsed: scan::ScanResponse = serde_json::from_str(
            r#"{"success": true, "billData": {"total": 118.0, "serviceFee": 3.5,
                "items": [{"name": "Pizza", "price": 100.0}]}}"#,
        )
        .unwrap();
        let data = parsed.bill_data.unwrap();
        assert_eq!(data.total, Some(118.0));
        assert_eq!(data.service_fee, Some(3.5));
        assert!(data.tax.is_none());
        assert_eq!(data.items.len(), 1);

        let minimal: scan::ScanResponse =
            serde_json::from_str(r#"{"success": false, "billData": null}"#).unwrap();
        assert!(minimal.bill_data.is_none());
    }

    #[test]
    fn sync_request_serializes_camel_case() {
        let request = sync::SyncRequest {
            bill_amount: 118.0,
            bill_description: "ShareFare Bill".to_string(),
            expenses: vec![sync::PersonAmount {
                name: "Ada".to_string(),
                amount: 59.0,
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["billAmount"], 118.0);
        assert_eq!(json["billDescription"], "ShareFare Bill");
        assert_eq!(json["expenses"][0]["name"], "Ada");
    }

    #[test]
    fn sync_response_defaults_not_found_to_empty() {
        let parsed: sync::SyncResponse =
            serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(parsed.not_found.is_empty());
    }
}
