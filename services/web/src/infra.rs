use axum::http::{header, HeaderMap};
use home_listing::config::ApiConfig;
use home_listing::listings::{
    AuthenticatedUser, FieldValidator, FormCollaborators, HomeApi, Navigator, NotificationService,
    ReqwestHomeApi, StandardFieldValidator, WordListChecker,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) listings: ListingServices,
    pub(crate) api_url: String,
}

/// Shared backend handles; per-request sinks are supplied when a form is built.
#[derive(Clone)]
pub(crate) struct ListingServices {
    pub(crate) api: Arc<dyn HomeApi>,
    pub(crate) validator: Arc<dyn FieldValidator>,
}

impl ListingServices {
    pub(crate) fn from_config(config: &ApiConfig) -> Self {
        Self {
            api: Arc::new(ReqwestHomeApi::new(config)),
            validator: Arc::new(StandardFieldValidator),
        }
    }

    pub(crate) fn collaborators(
        &self,
        notifier: Arc<dyn NotificationService>,
        navigator: Arc<dyn Navigator>,
    ) -> FormCollaborators {
        FormCollaborators {
            api: Arc::clone(&self.api),
            validator: Arc::clone(&self.validator),
            profanity: Arc::new(WordListChecker::default().with_notifier(Arc::clone(&notifier))),
            notifier,
            navigator,
        }
    }
}

/// Signed-in user from `Authorization: Bearer <token>` and `X-User-Id`.
pub(crate) fn session_user(headers: &HeaderMap) -> Option<AuthenticatedUser> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() {
        return None;
    }

    let id = headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;

    Some(AuthenticatedUser::new(id, token))
}
