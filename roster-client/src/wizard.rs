//! Wizard facade
//!
//! Ties the draft controller, validation, employee-id generation and the
//! submission machine together behind the operations a form needs.

use shared::models::{
    BasicInfo, BasicInfoDraft, DetailsDraft, DraftData, EmployeeRole, EmploymentType,
    NOT_AVAILABLE, SubmitProgress,
};
use shared::validation::{validate_basic_info, validate_details, validate_email_field};
use shared::{FieldErrors, generate_employee_id, photo};
use tokio::time::Instant;

use crate::autocomplete::ReferenceLookup;
use crate::config::WizardTiming;
use crate::draft::{DraftController, DraftState, Role};
use crate::listing::EmployeeListing;
use crate::service::RecordService;
use crate::store::DurableStore;
use crate::submission::Submission;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BasicInfo,
    Details,
}

#[derive(Debug)]
pub struct Wizard {
    role: Role,
    step: WizardStep,
    service: RecordService,
    store: DurableStore,
    timing: WizardTiming,
    draft: DraftController,
    submission: Submission,
    errors: FieldErrors,
}

impl Wizard {
    /// Open the wizard for `role`, restoring its draft
    pub fn open(role: Role, service: RecordService, store: DurableStore, timing: WizardTiming) -> Self {
        let mut draft = DraftController::new(store.clone(), role, timing);
        draft.restore(Instant::now());
        tracing::info!(role = %role, "Wizard opened");
        Self {
            role,
            step: role.first_step(),
            service,
            store,
            timing,
            draft,
            submission: Submission::new(timing),
            errors: FieldErrors::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn data(&self) -> &DraftData {
        self.draft.data()
    }

    pub fn draft_state(&self) -> DraftState {
        self.draft.state()
    }

    /// Form generation; changes whenever the form must start over
    pub fn generation(&self) -> u64 {
        self.draft.generation()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn progress(&self) -> SubmitProgress {
        self.submission.progress()
    }

    pub fn service(&self) -> &RecordService {
        &self.service
    }

    pub fn department_lookup(&self) -> ReferenceLookup {
        ReferenceLookup::departments(self.service.clone())
    }

    pub fn location_lookup(&self) -> ReferenceLookup {
        ReferenceLookup::locations(self.service.clone())
    }

    pub fn listing(&self) -> EmployeeListing {
        EmployeeListing::new(self.service.clone())
    }

    /// Switch to another role's draft.
    ///
    /// An unsaved edit of the current role is written to its own slot first;
    /// nothing is carried over to the new role.
    pub fn switch_role(&mut self, role: Role) {
        if role == self.role {
            return;
        }
        self.draft.flush_now();

        let mut draft = DraftController::new(self.store.clone(), role, self.timing);
        draft.restore(Instant::now());
        self.draft = draft;
        self.role = role;
        self.step = role.first_step();
        self.errors = FieldErrors::new();
        self.submission.reset();
        tracing::info!(role = %role, "Role switched");
    }

    // ========== Step 1 fields ==========

    fn edit_basic_info(&mut self, field: &str, edit: impl FnOnce(&mut BasicInfoDraft)) {
        self.errors.clear_field(field);
        self.draft.update_basic_info(Instant::now(), edit);
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit_basic_info("fullName", |b| b.full_name = value);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit_basic_info("email", |b| b.email = value);
    }

    /// Set the department. Follow with [`Wizard::ensure_employee_id`].
    pub fn set_department(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit_basic_info("department", |b| b.department = value);
    }

    pub fn set_employee_role(&mut self, value: EmployeeRole) {
        self.edit_basic_info("role", |b| b.role = Some(value));
    }

    /// Email check on leaving the field
    pub fn blur_email(&mut self) -> Option<&str> {
        let email = self
            .draft
            .data()
            .basic_info
            .as_ref()
            .map(|b| b.email.as_str())
            .unwrap_or_default();
        match validate_email_field(email) {
            Some(message) => self.errors.insert("email", message),
            None => self.errors.clear_field("email"),
        }
        self.errors.get("email")
    }

    /// Generate the employee id once a department is chosen.
    ///
    /// An id already present is kept, even if the department changed since.
    pub async fn ensure_employee_id(&mut self) -> Option<String> {
        let basic_info = self.draft.data().basic_info.clone()?;
        if !basic_info.employee_id.is_empty() {
            return Some(basic_info.employee_id);
        }
        if basic_info.department.trim().is_empty() {
            return None;
        }

        let existing = self.service.list_basic_info(None, None).await;
        let employee_id = generate_employee_id(&basic_info.department, &existing.items);
        tracing::debug!(%employee_id, department = %basic_info.department, "Employee ID generated");

        let generated = employee_id.clone();
        self.edit_basic_info("employeeId", |b| b.employee_id = generated);
        Some(employee_id)
    }

    // ========== Step 2 fields ==========

    fn edit_details(&mut self, field: &str, edit: impl FnOnce(&mut DetailsDraft)) {
        self.errors.clear_field(field);
        self.draft.update_details(Instant::now(), edit);
    }

    pub fn set_photo(&mut self, data_url: impl Into<String>) {
        let value = data_url.into();
        self.edit_details("photo", |d| d.photo = value);
    }

    /// Attach a picked file. Non-image files are ignored.
    pub fn attach_photo(&mut self, mime: &str, bytes: &[u8]) -> bool {
        match photo::encode_data_url(mime, bytes) {
            Some(data_url) => {
                self.set_photo(data_url);
                true
            }
            None => {
                tracing::debug!(mime, "Ignoring non-image file");
                false
            }
        }
    }

    pub fn set_employment_type(&mut self, value: EmploymentType) {
        self.edit_details("employmentType", |d| d.employment_type = Some(value));
    }

    pub fn set_office_location(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit_details("officeLocation", |d| d.office_location = value);
    }

    pub fn set_notes(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit_details("notes", |d| d.notes = value);
    }

    // ========== Navigation ==========

    fn validated_basic_info(&mut self) -> Result<BasicInfo, FieldErrors> {
        let draft = self.draft.data().basic_info.clone().unwrap_or_default();
        validate_basic_info(&draft).inspect_err(|errors| self.errors = errors.clone())
    }

    /// Leave step 1. Stays put and records field errors when invalid.
    pub fn next(&mut self) -> Result<WizardStep, FieldErrors> {
        if self.role == Role::Admin && self.step == WizardStep::BasicInfo {
            self.validated_basic_info()?;
            self.errors = FieldErrors::new();
            self.step = WizardStep::Details;
        }
        Ok(self.step)
    }

    /// Back to step 1 (admin only)
    pub fn back(&mut self) -> WizardStep {
        if self.role == Role::Admin && self.step == WizardStep::Details {
            self.step = WizardStep::BasicInfo;
        }
        self.step
    }

    /// Submit control enabled?
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Details
            && self.draft.data().details.is_complete()
            && self.submission.can_submit()
    }

    // ========== Submission ==========

    /// Validate and submit. On success the draft is cleared before
    /// `on_complete` runs.
    pub async fn submit<F: FnOnce()>(&mut self, on_complete: F) -> ClientResult<()> {
        if !self.submission.can_submit() {
            return Err(ClientError::SubmissionInProgress);
        }

        let basic_info = match self.role {
            Role::Admin => Some(self.validated_basic_info()?),
            Role::Ops => None,
        };
        let employee_id = basic_info
            .as_ref()
            .map_or(NOT_AVAILABLE, |b| b.employee_id.as_str());
        let details = validate_details(&self.draft.data().details, employee_id)
            .inspect_err(|errors| self.errors = errors.clone())?;
        self.errors = FieldErrors::new();

        let Self {
            submission,
            service,
            draft,
            ..
        } = self;
        submission
            .run(service, basic_info.as_ref(), &details, || draft.clear())
            .await?;

        on_complete();
        Ok(())
    }

    /// Start over: drop the stored draft and reset the form
    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.errors = FieldErrors::new();
        self.submission.reset();
    }

    // ========== Autosave ==========

    /// Perform a due draft write
    pub fn poll_autosave(&mut self, now: Instant) -> Option<DraftData> {
        self.draft.poll(now)
    }

    /// Wait for pending draft timers and perform the write they lead to.
    /// Returns immediately with `None` when nothing is scheduled.
    pub async fn run_autosave(&mut self) -> Option<DraftData> {
        while let Some(deadline) = self.draft.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            if let Some(written) = self.draft.poll(Instant::now()) {
                return Some(written);
            }
        }
        None
    }
}
