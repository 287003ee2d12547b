//! Submission workflow
//!
//! Drives the single terminal action of the wizard. The submit effect runs on
//! its own task; the owner polls for completion from its event loop and
//! performs the reset once the grace delay after success has elapsed.

use super::model::FormData;
use crate::filing::{SubmissionReceipt, SubmitEffect};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(SubmissionReceipt),
    Failed(String),
}

/// Something the owner of the workflow has to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    Succeeded(SubmissionReceipt),
    Failed(String),
    /// The grace delay after success has elapsed. The owner clears the form,
    /// the step index and the durable slot.
    ResetDue,
}

type InFlight = JoinHandle<anyhow::Result<SubmissionReceipt>>;

pub struct SubmissionWorkflow {
    effect: Arc<dyn SubmitEffect>,
    grace_delay: Duration,
    state: SubmissionState,
    in_flight: Option<InFlight>,
    reset_at: Option<Instant>,
}

impl SubmissionWorkflow {
    pub fn new(effect: Arc<dyn SubmitEffect>, grace_delay: Duration) -> Self {
        Self {
            effect,
            grace_delay,
            state: SubmissionState::Idle,
            in_flight: None,
            reset_at: None,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// True while an attempt is running or a post-success reset is pending
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.reset_at.is_some()
    }

    /// Start a submission attempt with a copy of the form.
    ///
    /// The caller checks `can_submit` first. Returns false, without touching
    /// the effect, when the workflow is busy.
    pub fn submit(&mut self, form: FormData) -> bool {
        if self.is_busy() {
            tracing::debug!(state = ?self.state, "Submission already in progress");
            return false;
        }

        let effect = Arc::clone(&self.effect);
        self.in_flight = Some(tokio::spawn(async move { effect.submit(form).await }));
        self.state = SubmissionState::Submitting;
        tracing::info!("Submission started");
        true
    }

    /// Report an event if one is ready, without waiting
    pub async fn poll(&mut self) -> Option<SubmissionEvent> {
        if self.in_flight.as_ref().is_some_and(|h| h.is_finished()) {
            return self.finish().await;
        }
        if self.reset_at.is_some_and(|at| Instant::now() >= at) {
            return Some(self.fire_reset());
        }
        None
    }

    /// Wait for the next event. Returns None when nothing is outstanding.
    pub async fn settle(&mut self) -> Option<SubmissionEvent> {
        if self.in_flight.is_some() {
            return self.finish().await;
        }
        if let Some(at) = self.reset_at {
            tokio::time::sleep_until(at).await;
            return Some(self.fire_reset());
        }
        None
    }

    async fn finish(&mut self) -> Option<SubmissionEvent> {
        let handle = self.in_flight.take()?;
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(anyhow::anyhow!("submit task aborted: {e}")),
        };

        match outcome {
            Ok(receipt) => {
                tracing::info!(
                    application_number = %receipt.application_number,
                    "Submission succeeded"
                );
                self.reset_at = Some(Instant::now() + self.grace_delay);
                self.state = SubmissionState::Succeeded(receipt.clone());
                Some(SubmissionEvent::Succeeded(receipt))
            }
            Err(e) => {
                tracing::error!("Error submitting form: {e:#}");
                let message = format!("{e:#}");
                self.state = SubmissionState::Failed(message.clone());
                Some(SubmissionEvent::Failed(message))
            }
        }
    }

    fn fire_reset(&mut self) -> SubmissionEvent {
        self.reset_at = None;
        self.state = SubmissionState::Idle;
        SubmissionEvent::ResetDue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filing::{MockSubmitEffect, SimulatedFilingOffice};
    use crate::state::FileRef;
    use chrono::Utc;
    use std::path::PathBuf;

    const GRACE: Duration = Duration::from_millis(2000);

    fn receipt() -> SubmissionReceipt {
        SubmissionReceipt {
            application_number: "PA-TEST0001".to_string(),
            submitted_at: Utc::now(),
        }
    }

    fn complete_form() -> FormData {
        let file = |name: &str| {
            Some(FileRef {
                name: name.to_string(),
                size: 1,
                path: PathBuf::from(name),
            })
        };
        let mut form = FormData::default();
        form.filing.drawings = file("fig.png");
        form.filing.specification = file("spec.pdf");
        form
    }

    fn workflow_with(mock: MockSubmitEffect) -> SubmissionWorkflow {
        SubmissionWorkflow::new(Arc::new(mock), GRACE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_then_reset_after_grace_delay() {
        let mut mock = MockSubmitEffect::new();
        mock.expect_submit().times(1).returning(|_| Ok(receipt()));
        let mut workflow = workflow_with(mock);

        assert!(workflow.submit(complete_form()));
        assert_eq!(workflow.state(), &SubmissionState::Submitting);

        let event = workflow.settle().await;
        assert!(matches!(event, Some(SubmissionEvent::Succeeded(_))));
        assert!(matches!(workflow.state(), SubmissionState::Succeeded(_)));

        let started = Instant::now();
        assert_eq!(workflow.settle().await, Some(SubmissionEvent::ResetDue));
        assert!(started.elapsed() >= GRACE);
        assert_eq!(workflow.state(), &SubmissionState::Idle);
        assert_eq!(workflow.settle().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_stays_failed() {
        let mut mock = MockSubmitEffect::new();
        mock.expect_submit()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("office unavailable")));
        let mut workflow = workflow_with(mock);

        workflow.submit(complete_form());
        let event = workflow.settle().await;
        assert_eq!(
            event,
            Some(SubmissionEvent::Failed("office unavailable".to_string()))
        );

        tokio::time::sleep(GRACE * 2).await;
        assert_eq!(workflow.poll().await, None);
        assert!(matches!(workflow.state(), SubmissionState::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failure_is_allowed() {
        let mut mock = MockSubmitEffect::new();
        let mut calls = 0;
        mock.expect_submit().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(anyhow::anyhow!("timeout"))
            } else {
                Ok(receipt())
            }
        });
        let mut workflow = workflow_with(mock);

        workflow.submit(complete_form());
        workflow.settle().await;
        assert!(workflow.submit(complete_form()));
        assert!(matches!(
            workflow.settle().await,
            Some(SubmissionEvent::Succeeded(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_refused_while_submitting() {
        let office = SimulatedFilingOffice::new(Duration::from_secs(1));
        let mut workflow = SubmissionWorkflow::new(Arc::new(office), GRACE);

        assert!(workflow.submit(complete_form()));
        assert!(!workflow.submit(complete_form()));
        assert_eq!(workflow.state(), &SubmissionState::Submitting);
        assert!(matches!(
            workflow.settle().await,
            Some(SubmissionEvent::Succeeded(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_refused_while_reset_pending() {
        let mut mock = MockSubmitEffect::new();
        mock.expect_submit().times(1).returning(|_| Ok(receipt()));
        let mut workflow = workflow_with(mock);

        workflow.submit(complete_form());
        workflow.settle().await;
        assert!(workflow.is_busy());
        assert!(!workflow.submit(complete_form()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_does_not_wait() {
        let office = SimulatedFilingOffice::new(Duration::from_secs(1));
        let mut workflow = SubmissionWorkflow::new(Arc::new(office), GRACE);

        assert_eq!(workflow.poll().await, None);
        workflow.submit(complete_form());
        assert_eq!(workflow.poll().await, None);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(matches!(
            workflow.poll().await,
            Some(SubmissionEvent::Succeeded(_))
        ));
        assert_eq!(workflow.poll().await, None);

        tokio::time::sleep(GRACE).await;
        assert_eq!(workflow.poll().await, Some(SubmissionEvent::ResetDue));
    }

    #[tokio::test]
    async fn test_settle_with_nothing_outstanding() {
        let mut workflow = workflow_with(MockSubmitEffect::new());
        assert_eq!(workflow.settle().await, None);
        assert_eq!(workflow.state(), &SubmissionState::Idle);
    }
}
