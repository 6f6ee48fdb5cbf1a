use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::listings::client::{HomeApi, HomeApiError};
use crate::listings::domain::{AuthenticatedUser, CreateHomePayload};
use crate::listings::draft::HomeDraft;
use crate::listings::fields::{InputType, HOME_FIELDS};
use crate::listings::navigation::NavigationLog;
use crate::listings::notify::NotificationLog;
use crate::listings::profanity::{ProfanityChecker, WordListChecker};
use crate::listings::validation::{FieldValidator, StandardFieldValidator};
use crate::listings::{FormCollaborators, HomeFormController};

#[derive(Debug, Clone)]
pub(super) struct RecordedRequest {
    pub(super) user: AuthenticatedUser,
    pub(super) body: Value,
}

/// Backend double answering every create with a fixed body.
#[derive(Clone)]
pub(super) struct ScriptedApi {
    response: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedApi {
    pub(super) fn responding(response: Value) -> Self {
        Self {
            response,
            requests: Arc::default(),
        }
    }

    pub(super) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

#[async_trait]
impl HomeApi for ScriptedApi {
    async fn create_home(
        &self,
        user: &AuthenticatedUser,
        payload: &CreateHomePayload,
    ) -> Result<Value, HomeApiError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(RecordedRequest {
                user: user.clone(),
                body: payload.clone().into_json(),
            });
        Ok(self.response.clone())
    }
}

/// Backend double whose response never arrives.
pub(super) struct StalledApi;

#[async_trait]
impl HomeApi for StalledApi {
    async fn create_home(
        &self,
        _user: &AuthenticatedUser,
        _payload: &CreateHomePayload,
    ) -> Result<Value, HomeApiError> {
        std::future::pending().await
    }
}

/// Backend double answering with an HTML error page.
pub(super) struct HtmlErrorApi;

#[async_trait]
impl HomeApi for HtmlErrorApi {
    async fn create_home(
        &self,
        _user: &AuthenticatedUser,
        _payload: &CreateHomePayload,
    ) -> Result<Value, HomeApiError> {
        let source = serde_json::from_str::<Value>("<html>Bad Gateway</html>").unwrap_err();
        Err(HomeApiError::Malformed {
            status: 502,
            source,
        })
    }
}

/// Validator double returning a canned verdict for every value.
pub(super) struct FixedValidator(pub(super) Option<&'static str>);

impl FieldValidator for FixedValidator {
    fn validate(&self, _input_type: InputType, _value: &str) -> Option<String> {
        self.0.map(str::to_string)
    }
}

/// Profanity double with a fixed verdict that counts invocations.
#[derive(Default)]
pub(super) struct FixedProfanity {
    pub(super) verdict: bool,
    pub(super) calls: Mutex<usize>,
}

impl FixedProfanity {
    pub(super) fn flagging() -> Self {
        Self {
            verdict: true,
            calls: Mutex::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("profanity mutex poisoned")
    }
}

impl ProfanityChecker for FixedProfanity {
    fn contains_profanity(&self, _draft: &HomeDraft) -> bool {
        *self.calls.lock().expect("profanity mutex poisoned") += 1;
        self.verdict
    }
}

pub(super) struct Harness {
    pub(super) notifications: NotificationLog,
    pub(super) navigation: NavigationLog,
}

pub(super) fn user() -> AuthenticatedUser {
    AuthenticatedUser::new(42, "abc")
}

pub(super) fn wire(
    api: Arc<dyn HomeApi>,
    validator: Arc<dyn FieldValidator>,
    profanity: Arc<dyn ProfanityChecker>,
) -> (FormCollaborators, Harness) {
    let notifications = NotificationLog::default();
    let navigation = NavigationLog::default();
    let collaborators = FormCollaborators {
        api,
        validator,
        profanity,
        notifier: Arc::new(notifications.clone()),
        navigator: Arc::new(navigation.clone()),
    };
    (
        collaborators,
        Harness {
            notifications,
            navigation,
        },
    )
}

/// Form wired to the standard validator and word list.
pub(super) fn standard_form(api: Arc<dyn HomeApi>) -> (HomeFormController, Harness) {
    let (collaborators, harness) = wire(
        api,
        Arc::new(StandardFieldValidator),
        Arc::new(WordListChecker::default()),
    );
    (
        HomeFormController::new(user(), HOME_FIELDS, collaborators),
        harness,
    )
}

/// Valid values for every field of [`HOME_FIELDS`] plus the description.
pub(super) fn complete_listing() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Lake House"),
        ("address", "12 Shore Rd"),
        ("city", "Duluth"),
        ("state", "MN"),
        ("price", "185"),
        ("bedrooms", "3"),
        ("bathrooms", "2"),
        ("description", "Cozy"),
    ]
}

pub(super) fn fill(form: &mut HomeFormController, values: &[(&str, &str)]) {
    for (name, value) in values {
        form.change_field(name, *value).expect("known field");
    }
}

pub(super) fn created(id: u64) -> Value {
    json!({ "id": id })
}
