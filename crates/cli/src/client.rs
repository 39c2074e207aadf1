//! HTTP client for the two external collaborators.
//!
//! Both calls share the same contract: issue the request, await the response
//! or failure, and never apply a partial result — a failure surfaces as a
//! [`ClientError`] and leaves the caller's bill untouched. No retries and no
//! client-side timeout; re-invocation is up to the user.

use std::path::Path;

use reqwest::{
    Url,
    multipart::{Form, Part},
};
use thiserror::Error;

use api_types::{ErrorResponse, scan::ScanResponse, sync::SyncRequest, sync::SyncResponse};
use engine::{ScanData, ScannedItem};

use crate::error::Result;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("scan failed: {0}")]
    Scan(String),
    #[error("sync failed: {0}")]
    Sync(String),
}

#[derive(Debug, Clone)]
pub struct Client {
    scan_url: Url,
    sync_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(scan_url: &str, sync_url: &str) -> Result<Self> {
        let scan_url = Url::parse(scan_url)?;
        let sync_url = Url::parse(sync_url)?;
        Ok(Self {
            scan_url,
            sync_url,
            http: reqwest::Client::new(),
        })
    }

    /// Upload a bill image and return the structured scan output.
    ///
    /// Non-2xx responses, `success: false`, a missing `billData` and
    /// transport/decode errors all map to [`ClientError::Scan`].
    pub async fn scan_bill(&self, image_path: &Path) -> std::result::Result<ScanData, ClientError> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|err| ClientError::Scan(format!("cannot read image: {err}")))?;
        let file_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "bill".to_string());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let res = self
            .http
            .post(self.scan_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| ClientError::Scan(err.to_string()))?;

        if !res.status().is_success() {
            let body = res
                .json::<ErrorResponse>()
                .await
                .map(|err| err.error)
                .unwrap_or_else(|_| "failed to process image".to_string());
            return Err(ClientError::Scan(body));
        }

        let payload = res
            .json::<ScanResponse>()
            .await
            .map_err(|err| ClientError::Scan(err.to_string()))?;
        if !payload.success {
            return Err(ClientError::Scan(
                "invalid response format from server".to_string(),
            ));
        }
        let data = payload.bill_data.ok_or_else(|| {
            ClientError::Scan("invalid response format from server".to_string())
        })?;

        Ok(ScanData {
            total: data.total,
            tax: data.tax,
            service_fee: data.service_fee,
            tips: data.tips,
            discount: data.discount,
            items: data
                .items
                .into_iter()
                .map(|item| ScannedItem {
                    name: item.name,
                    price: item.price,
                })
                .collect(),
        })
    }

    /// Push the per-friend breakdown to the ledger service.
    pub async fn sync_ledger(
        &self,
        request: &SyncRequest,
    ) -> std::result::Result<SyncResponse, ClientError> {
        let res = self
            .http
            .post(self.sync_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| ClientError::Sync(err.to_string()))?;

        if !res.status().is_success() {
            let body = res
                .json::<ErrorResponse>()
                .await
                .map(|err| err.error)
                .unwrap_or_else(|_| "failed to sync with ledger".to_string());
            return Err(ClientError::Sync(body));
        }

        res.json::<SyncResponse>()
            .await
            .map_err(|err| ClientError::Sync(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn malformed_endpoint_is_a_typed_error() {
        let err = Client::new("not a url", "https://example.com").unwrap_err();
        assert!(matches!(err, AppError::Url(_)));

        let err = Client::new("https://example.com", "::also bad::").unwrap_err();
        assert!(matches!(err, AppError::Url(_)));
    }
}
