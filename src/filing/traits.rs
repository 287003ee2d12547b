//! Trait abstraction for the submit effect to enable mocking in tests

use crate::state::FormData;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Proof that a filing office accepted an application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub application_number: String,
    pub submitted_at: DateTime<Utc>,
}

/// External operation that files a complete application.
///
/// Called once per submission attempt; retries are the caller's business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitEffect: Send + Sync {
    /// File the application, returning a receipt on success
    async fn submit(&self, form: FormData) -> Result<SubmissionReceipt>;
}
