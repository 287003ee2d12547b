//! Simulated filing office
//!
//! Stands in for a real patent-office integration: waits a configurable
//! latency, logs what would be filed, and issues an application number.

use super::traits::{SubmissionReceipt, SubmitEffect};
use crate::state::FormData;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Default simulated round-trip time
const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

pub struct SimulatedFilingOffice {
    latency: Duration,
}

impl SimulatedFilingOffice {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedFilingOffice {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl SubmitEffect for SimulatedFilingOffice {
    async fn submit(&self, form: FormData) -> Result<SubmissionReceipt> {
        let filing = &form.filing;
        let (Some(drawings), Some(specification)) = (&filing.drawings, &filing.specification)
        else {
            return Err(anyhow!("Application is missing required documents"));
        };

        tracing::info!(
            title = %form.invention.title,
            inventors = form.inventors.len(),
            country = filing.country_of_filing.code(),
            drawings = %drawings.name,
            specification = %specification.name,
            additional = filing.additional_documents.len(),
            "Submitting form data"
        );

        tokio::time::sleep(self.latency).await;

        let number = Uuid::new_v4().simple().to_string();
        Ok(SubmissionReceipt {
            application_number: format!("PA-{}", number[..8].to_uppercase()),
            submitted_at: Utc::now(),
        })
    }
}
