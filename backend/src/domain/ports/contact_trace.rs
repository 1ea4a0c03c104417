//! Driving port for the contact-trace query.
//!
//! Inbound adapters validate raw input into a [`TraceRequest`] and call this
//! port; authorisation happens before the call, never inside it.

use async_trait::async_trait;

use crate::domain::{Error, TraceRequest, TraceResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactTrace: Send + Sync {
    /// Primary contacts of the request subject within its window.
    async fn trace(&self, request: &TraceRequest) -> Result<Vec<TraceResult>, Error>;
}
