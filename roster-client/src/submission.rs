//! Two-phase submission
//!
//! Sends basic info (admin flow only) and then details, publishing progress
//! on a watch channel so any number of observers can render it.

use shared::models::{BasicInfo, Details, NOT_AVAILABLE, SubmitProgress, SubmitStep};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

use crate::config::WizardTiming;
use crate::service::RecordService;
use crate::{ClientError, ClientResult};

/// Submission state machine
///
/// `Idle → BasicInfo → Details → Complete`, or `Error` from either phase.
/// A new run is refused while one is in flight and after `Complete` until
/// [`Submission::reset`].
#[derive(Debug)]
pub struct Submission {
    progress: watch::Sender<SubmitProgress>,
    running: AtomicBool,
    timing: WizardTiming,
}

impl Submission {
    pub fn new(timing: WizardTiming) -> Self {
        let (progress, _) = watch::channel(SubmitProgress::idle());
        Self {
            progress,
            running: AtomicBool::new(false),
            timing,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmitProgress> {
        self.progress.subscribe()
    }

    pub fn progress(&self) -> SubmitProgress {
        self.progress.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Submit control enabled?
    pub fn can_submit(&self) -> bool {
        !self.is_running() && self.progress.borrow().step != SubmitStep::Complete
    }

    /// Back to `Idle`. No effect while a run is in flight.
    pub fn reset(&self) {
        if !self.is_running() {
            self.progress.send_replace(SubmitProgress::idle());
        }
    }

    fn publish(&self, progress: SubmitProgress) {
        tracing::debug!(step = ?progress.step, "{}", progress.message);
        self.progress.send_replace(progress);
    }

    /// Run both phases.
    ///
    /// `details` is sent with the employee id of `basic_info`, or `"N/A"`
    /// when there is none. `on_complete` runs once the completion delay has
    /// elapsed; on failure it does not run and the error is returned after
    /// being published as an `Error` step.
    pub async fn run<F: FnOnce()>(
        &self,
        service: &RecordService,
        basic_info: Option<&BasicInfo>,
        details: &Details,
        on_complete: F,
    ) -> ClientResult<()> {
        if self.progress.borrow().step == SubmitStep::Complete
            || self
                .running
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
        {
            return Err(ClientError::SubmissionInProgress);
        }

        let result = self.run_phases(service, basic_info, details).await;
        match result {
            Ok(()) => {
                self.publish(SubmitProgress::complete());
                tokio::time::sleep(self.timing.completion_delay).await;
                self.running.store(false, Ordering::Release);
                on_complete();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Submission failed");
                self.publish(SubmitProgress::error(e.to_string()));
                self.running.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    async fn run_phases(
        &self,
        service: &RecordService,
        basic_info: Option<&BasicInfo>,
        details: &Details,
    ) -> ClientResult<()> {
        let employee_id = match basic_info {
            Some(basic_info) => {
                self.publish(SubmitProgress::basic_info());
                tokio::time::sleep(self.timing.submit_step_delay).await;
                let created = service.create_basic_info(basic_info).await?;
                created.employee_id
            }
            None => NOT_AVAILABLE.to_string(),
        };

        self.publish(SubmitProgress::details());
        tokio::time::sleep(self.timing.submit_step_delay).await;
        let details = Details {
            employee_id,
            ..details.clone()
        };
        service.create_details(&details).await?;
        Ok(())
    }
}
