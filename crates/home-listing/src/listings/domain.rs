use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::draft::HomeDraft;

/// Key stamped into every create request to record the listing owner.
pub const OWNER_ID_FIELD: &str = "owner_id";

/// Largest float that still converts to an integer id exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Signed-in user on whose behalf a listing is created.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: u64,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn new(id: u64, token: impl Into<String>) -> Self {
        Self {
            id,
            token: token.into(),
        }
    }
}

impl fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Server-assigned identifier of a created home.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeId(pub String);

impl HomeId {
    /// Read the `id` field of a create response.
    ///
    /// Any truthy value counts as an id: non-zero numbers (whole numbers
    /// render without a fraction), non-empty strings, `true`, objects and
    /// arrays. `null`, `false`, `0`, `""` and a missing key do not.
    pub fn from_response(body: &Value) -> Option<Self> {
        match body.get("id")? {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some(Self("true".to_string())),
            Value::Number(number) => Self::from_number(number),
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(Self(text.clone())),
            other => Some(Self(other.to_string())),
        }
    }

    fn from_number(number: &Number) -> Option<Self> {
        if let Some(whole) = number.as_i64() {
            return (whole != 0).then(|| Self(whole.to_string()));
        }
        if let Some(whole) = number.as_u64() {
            return Some(Self(whole.to_string()));
        }

        let value = number.as_f64()?;
        if value == 0.0 {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
            return Some(Self((value as i64).to_string()));
        }
        Some(Self(value.to_string()))
    }
}

impl fmt::Display for HomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON body of `POST /home`: the draft fields plus `owner_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CreateHomePayload(Map<String, Value>);

impl CreateHomePayload {
    pub fn new(draft: &HomeDraft, owner: &AuthenticatedUser) -> Self {
        let mut body: Map<String, Value> = draft
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        body.insert(OWNER_ID_FIELD.to_string(), Value::from(owner.id));
        Self(body)
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}
