use crate::infra::{session_user, AppState};
use crate::pages;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use home_listing::listings::{
    HomeFormController, NavigationLog, NotificationLog, PhotoSource, Route, SubmitOutcome,
    HOME_FIELDS, PHOTO_FIELD,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct EditHomeQuery {
    #[serde(rename = "homeId")]
    pub(crate) home_id: String,
}

/// Page and probe routes; `/metrics` is attached by the server.
pub(crate) fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route(Route::HOME_PATH, get(landing_page))
        .route(Route::SIGN_IN_PATH, get(sign_in_page))
        .route(
            Route::CREATE_HOME_PATH,
            get(create_home_page).post(create_home_submit),
        )
        .route(Route::EDIT_HOME_PATH, get(edit_home_page))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(
    Extension(handle): Extension<Arc<PrometheusHandle>>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

async fn landing_page() -> Html<String> {
    Html(pages::landing())
}

async fn sign_in_page(Extension(state): Extension<AppState>) -> Html<String> {
    Html(pages::sign_in(&state.api_url))
}

async fn create_home_page(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    let Some(user) = session_user(&headers) else {
        return Redirect::to(Route::SIGN_IN_PATH).into_response();
    };

    let collaborators = state.listings.collaborators(
        Arc::new(NotificationLog::default()),
        Arc::new(NavigationLog::default()),
    );
    let form = HomeFormController::new(user, HOME_FIELDS, collaborators);
    Html(pages::create_home(&form.view(), &[])).into_response()
}

async fn create_home_submit(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, MultipartError> {
    let Some(user) = session_user(&headers) else {
        return Ok(Redirect::to(Route::SIGN_IN_PATH).into_response());
    };

    let notifications = NotificationLog::default();
    let navigation = NavigationLog::default();
    let collaborators = state
        .listings
        .collaborators(Arc::new(notifications.clone()), Arc::new(navigation.clone()));
    let mut form = HomeFormController::new(user, HOME_FIELDS, collaborators);

    let mut photos = Vec::new();
    while let Some(part) = multipart.next_field().await? {
        let Some(name) = part.name().map(str::to_string) else {
            continue;
        };

        if name == PHOTO_FIELD {
            let file_name = part.file_name().map(str::to_string);
            let content_type = part.content_type().map(str::to_string);
            let bytes = part.bytes().await?;
            // Browsers send an empty part when no file was picked.
            if !bytes.is_empty() {
                photos.push(PhotoSource::Bytes {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = part.text().await?;
        if let Err(err) = form.change_field(&name, value) {
            tracing::debug!(field = %name, error = %err, "ignoring form part");
        }
    }

    if let Err(err) = form.upload_photo(photos).await {
        tracing::warn!(error = %err, "photo could not be attached");
    }

    match form.submit().await {
        Ok(SubmitOutcome::Created(home_id)) => {
            let target = navigation
                .last()
                .map(|route| route.path())
                .unwrap_or_else(|| Route::EditHome { home_id }.path());
            Ok(Redirect::to(&target).into_response())
        }
        Ok(SubmitOutcome::Blocked(reason)) => {
            tracing::debug!(%reason, "re-rendering blocked listing form");
            Ok(rejected_form(&form, &notifications))
        }
        Err(_) => Ok(rejected_form(&form, &notifications)),
    }
}

fn rejected_form(form: &HomeFormController, notifications: &NotificationLog) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(pages::create_home(&form.view(), &notifications.entries())),
    )
        .into_response()
}

async fn edit_home_page(Query(query): Query<EditHomeQuery>) -> Html<String> {
    Html(pages::edit_home(&query.home_id))
}
