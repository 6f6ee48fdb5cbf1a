use std::fmt;
use std::sync::{Arc, Mutex};

use super::domain::HomeId;

/// Client-side routes of the listing application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    CreateHome,
    EditHome { home_id: HomeId },
}

impl Route {
    pub const HOME_PATH: &'static str = "/";
    pub const SIGN_IN_PATH: &'static str = "/signin";
    pub const CREATE_HOME_PATH: &'static str = "/create-home";
    pub const EDIT_HOME_PATH: &'static str = "/edit-home";

    pub fn path(&self) -> String {
        match self {
            Route::Home => Self::HOME_PATH.to_string(),
            Route::SignIn => Self::SIGN_IN_PATH.to_string(),
            Route::CreateHome => Self::CREATE_HOME_PATH.to_string(),
            Route::EditHome { home_id } => {
                format!("{}?homeId={}", Self::EDIT_HOME_PATH, encode_query(&home_id.0))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Moves the user to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Remembers requested routes; the host turns the last one into a redirect.
#[derive(Debug, Clone, Default)]
pub struct NavigationLog {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl NavigationLog {
    pub fn routes(&self) -> Vec<Route> {
        match self.routes.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().pop()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route, "navigating");
        match self.routes.lock() {
            Ok(mut guard) => guard.push(route),
            Err(poisoned) => poisoned.into_inner().push(route),
        }
    }
}
