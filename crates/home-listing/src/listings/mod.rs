//! Home listing creation: form state, validation, photo encoding and
//! submission to the listing backend.

pub mod client;
pub mod controller;
pub mod domain;
pub mod draft;
pub mod fields;
pub mod navigation;
pub mod notify;
pub mod photo;
pub mod profanity;
pub mod validation;

#[cfg(test)]
mod tests;

pub use client::{HomeApi, HomeApiError, ReqwestHomeApi};
pub use controller::{
    BlockReason, FieldRowView, FormCollaborators, FormError, FormPhase, HomeFormController,
    HomeFormView, SubmissionError, SubmitOutcome, TeardownHandle, INVALID_VALUES_MESSAGE,
    SUBMISSION_FAILED_MESSAGE,
};
pub use domain::{AuthenticatedUser, CreateHomePayload, HomeId, OWNER_ID_FIELD};
pub use draft::{FieldStatus, HomeDraft, ValidationErrors};
pub use fields::{
    HomeFieldSpec, InputType, DESCRIPTION_FIELD, HOME_FIELDS, PHOTO_FIELD, SIGN_IN_FIELDS,
};
pub use navigation::{NavigationLog, Navigator, Route};
pub use notify::{Notification, NotificationLog, NotificationService, ToastOptions, TracingNotifier};
pub use photo::{DecodedPhoto, PhotoError, PhotoSource, PhotoUpload};
pub use profanity::{ProfanityChecker, WordListChecker, PROFANITY_MESSAGE};
pub use validation::{FieldValidator, StandardFieldValidator};
