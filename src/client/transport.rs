//! The seam between the screener and the network.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{RequestEnvelope, ScanResponse};
use crate::Result;

/// Sends a built request to the scan endpoint of its instrument class.
///
/// [`HttpTransport`](super::HttpTransport) is the production implementation.
/// Tests substitute a fixture so that screens run without network access.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one scan. Any network or backend failure is a request failure.
    async fn scan(&self, request: &RequestEnvelope) -> Result<ScanResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn scan(&self, request: &RequestEnvelope) -> Result<ScanResponse> {
        (**self).scan(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn scan(&self, request: &RequestEnvelope) -> Result<ScanResponse> {
        (**self).scan(request).await
    }
}
