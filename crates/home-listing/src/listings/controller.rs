//! Home listing form controller.
//!
//! Owns the draft and per-field validation state for one creation session,
//! gates submission on validation and profanity, and turns a successful
//! create response into navigation to the edit view.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::client::{HomeApi, HomeApiError};
use super::domain::{AuthenticatedUser, CreateHomePayload, HomeId};
use super::draft::{FieldStatus, HomeDraft, ValidationErrors};
use super::fields::{input_type_for, HomeFieldSpec, InputType, DESCRIPTION_FIELD, PHOTO_FIELD};
use super::navigation::{Navigator, Route};
use super::notify::{NotificationService, ToastOptions};
use super::photo::{DecodedPhoto, PhotoError, PhotoSource, PhotoUpload};
use super::profanity::ProfanityChecker;
use super::validation::FieldValidator;

pub const INVALID_VALUES_MESSAGE: &str = "Please enter valid values!";
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Unable to create your home listing. Please try again.";

/// Capabilities injected into a form at construction.
#[derive(Clone)]
pub struct FormCollaborators {
    pub api: Arc<dyn HomeApi>,
    pub validator: Arc<dyn FieldValidator>,
    pub profanity: Arc<dyn ProfanityChecker>,
    pub notifier: Arc<dyn NotificationService>,
    pub navigator: Arc<dyn Navigator>,
}

/// Lifecycle of one creation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Editing,
    Submitting,
    /// Last submission failed; editing and resubmitting are allowed.
    Failed,
    NavigatedAway,
    Closed,
}

impl FormPhase {
    fn is_active(&self) -> bool {
        matches!(self, FormPhase::Editing | FormPhase::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    PendingValidation,
    Profanity,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::PendingValidation => f.write_str("fields are missing or invalid"),
            BlockReason::Profanity => f.write_str("listing contains inappropriate language"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Guards stopped the submission before any request was made.
    Blocked(BlockReason),
    Created(HomeId),
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("form is no longer active")]
    Inactive,
    #[error(transparent)]
    Photo(#[from] PhotoError),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("form is no longer active")]
    Inactive,
    #[error("create response did not include a home id")]
    MissingHomeId { body: serde_json::Value },
    #[error(transparent)]
    Api(#[from] HomeApiError),
    #[error("form was torn down while the listing was being created")]
    Abandoned,
}

/// Cancels a form's pending work from outside (view unmounted).
#[derive(Debug, Clone)]
pub struct TeardownHandle(CancellationToken);

impl TeardownHandle {
    pub fn teardown(&self) {
        self.0.cancel();
    }
}

/// One row of the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRowView {
    pub label_name: &'static str,
    pub name: &'static str,
    pub input_type: InputType,
    pub value: String,
    pub error: Option<String>,
    pub test_id: &'static str,
}

/// Render model for the create-home form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeFormView {
    pub form_test_id: &'static str,
    pub photo_test_id: &'static str,
    pub photo_field: &'static str,
    pub has_photo: bool,
    pub rows: Vec<FieldRowView>,
    pub description: String,
    pub description_error: Option<String>,
    pub description_test_id: &'static str,
}

pub struct HomeFormController {
    user: AuthenticatedUser,
    fields: &'static [HomeFieldSpec],
    collaborators: FormCollaborators,
    draft: HomeDraft,
    errors: ValidationErrors,
    phase: FormPhase,
    lifecycle: CancellationToken,
}

impl HomeFormController {
    pub fn new(
        user: AuthenticatedUser,
        fields: &'static [HomeFieldSpec],
        collaborators: FormCollaborators,
    ) -> Self {
        let errors = ValidationErrors::for_fields(
            fields
                .iter()
                .map(|spec| spec.name)
                .chain(std::iter::once(DESCRIPTION_FIELD)),
        );

        Self {
            user,
            fields,
            collaborators,
            draft: HomeDraft::new(),
            errors,
            phase: FormPhase::Editing,
            lifecycle: CancellationToken::new(),
        }
    }

    pub fn draft(&self) -> &HomeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle(self.lifecycle.clone())
    }

    /// Tear the form down; pending photo encodes and requests are dropped.
    pub fn teardown(&mut self) {
        self.lifecycle.cancel();
        self.phase = FormPhase::Closed;
    }

    fn is_torn_down(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    fn ensure_active(&mut self) -> bool {
        if self.is_torn_down() {
            self.phase = FormPhase::Closed;
        }
        self.phase.is_active()
    }

    /// Merge a new value for a text field and validate it.
    pub fn change_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.ensure_active() {
            return Err(FormError::Inactive);
        }
        let input_type = input_type_for(self.fields, name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        let value = value.into();
        self.validate_field(name, input_type, &value);
        self.draft.set(name, value);
        self.phase = FormPhase::Editing;
        Ok(())
    }

    fn validate_field(&mut self, name: &str, input_type: InputType, value: &str) {
        let verdict = self.collaborators.validator.validate(input_type, value);
        if let Some(message) = verdict.as_deref().filter(|message| !message.is_empty()) {
            tracing::debug!(field = name, %input_type, message, "field invalid");
        }
        self.errors.record(name, verdict);
    }

    /// Start encoding the first selected file. `None` when nothing was
    /// selected or the form is no longer active.
    pub fn begin_photo_upload(&self, selection: Vec<PhotoSource>) -> Option<PhotoUpload> {
        if self.is_torn_down() || !self.phase.is_active() {
            return None;
        }
        PhotoUpload::from_selection(PHOTO_FIELD, selection, self.lifecycle.child_token())
    }

    /// Merge a finished encode into the draft. Ignored after teardown.
    pub fn apply_photo(&mut self, photo: DecodedPhoto) -> bool {
        if !self.ensure_active() {
            tracing::debug!(field = %photo.field, "dropping photo for inactive form");
            return false;
        }
        self.draft.set(photo.field, photo.data_url);
        true
    }

    /// Encode and merge a photo selection in one step.
    pub async fn upload_photo(&mut self, selection: Vec<PhotoSource>) -> Result<(), FormError> {
        if !self.ensure_active() {
            return Err(FormError::Inactive);
        }
        let Some(upload) = self.begin_photo_upload(selection) else {
            return Ok(());
        };

        let decoded = upload.decode().await?;
        if !self.apply_photo(decoded) {
            return Err(FormError::Inactive);
        }
        Ok(())
    }

    /// Validate the whole form and create the listing.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmissionError> {
        if !self.ensure_active() {
            return Err(SubmissionError::Inactive);
        }

        if !self.errors.is_empty() {
            let blocking: Vec<&str> = self.errors.blocking_fields().collect();
            tracing::info!(?blocking, "listing submission blocked by validation");
            self.collaborators
                .notifier
                .error(INVALID_VALUES_MESSAGE, ToastOptions::transient());
            return Ok(SubmitOutcome::Blocked(BlockReason::PendingValidation));
        }

        if self.collaborators.profanity.contains_profanity(&self.draft) {
            return Ok(SubmitOutcome::Blocked(BlockReason::Profanity));
        }

        let payload = CreateHomePayload::new(&self.draft, &self.user);
        self.phase = FormPhase::Submitting;
        tracing::info!(owner_id = self.user.id, fields = self.draft.len(), "creating home listing");

        let api = Arc::clone(&self.collaborators.api);
        let lifecycle = self.lifecycle.clone();
        let response = tokio::select! {
            _ = lifecycle.cancelled() => {
                self.phase = FormPhase::Closed;
                tracing::debug!("create request abandoned on teardown");
                return Err(SubmissionError::Abandoned);
            }
            response = api.create_home(&self.user, &payload) => response,
        };

        match response {
            Ok(body) => match HomeId::from_response(&body) {
                Some(home_id) => {
                    tracing::info!(%home_id, "home listing created");
                    self.phase = FormPhase::NavigatedAway;
                    self.collaborators.navigator.navigate(Route::EditHome {
                        home_id: home_id.clone(),
                    });
                    Ok(SubmitOutcome::Created(home_id))
                }
                None => Err(self.fail(SubmissionError::MissingHomeId { body })),
            },
            Err(err) => Err(self.fail(SubmissionError::Api(err))),
        }
    }

    fn fail(&mut self, error: SubmissionError) -> SubmissionError {
        tracing::warn!(error = %error, "home listing submission failed");
        self.phase = FormPhase::Failed;
        self.collaborators
            .notifier
            .error(SUBMISSION_FAILED_MESSAGE, ToastOptions::default());
        error
    }

    /// Current render model.
    pub fn view(&self) -> HomeFormView {
        let rows = self
            .fields
            .iter()
            .map(|spec| FieldRowView {
                label_name: spec.label_name,
                name: spec.name,
                input_type: spec.input_type,
                value: self.draft.get(spec.name).unwrap_or_default().to_string(),
                error: self.errors.message(spec.name).map(str::to_string),
                test_id: spec.test_id,
            })
            .collect();

        HomeFormView {
            form_test_id: "home-create-form",
            photo_test_id: "home-photo",
            photo_field: PHOTO_FIELD,
            has_photo: self.draft.contains(PHOTO_FIELD),
            rows,
            description: self
                .draft
                .get(DESCRIPTION_FIELD)
                .unwrap_or_default()
                .to_string(),
            description_error: self.errors.message(DESCRIPTION_FIELD).map(str::to_string),
            description_test_id: DESCRIPTION_FIELD,
        }
    }

    /// Status of a single field, for hosts that render their own controls.
    pub fn field_status(&self, name: &str) -> Option<&FieldStatus> {
        self.errors.status(name)
    }
}

impl std::fmt::Debug for HomeFormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeFormController")
            .field("user", &self.user)
            .field("draft_fields", &self.draft.len())
            .field("phase", &self.phase)
            .finish()
    }
}
