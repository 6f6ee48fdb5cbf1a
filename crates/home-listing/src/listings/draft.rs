use std::collections::BTreeMap;

use serde::Serialize;

/// In-progress, unsaved values for a new listing keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HomeDraft {
    values: BTreeMap<String, String>,
}

impl HomeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a value under `name`, replacing whatever was there.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HomeDraft
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Validation state of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    /// Never validated since the form opened. Blocks submission.
    Unvalidated,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid)
    }
}

/// Per-field validation state for every known field of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, FieldStatus>,
}

impl ValidationErrors {
    /// Start every named field as [`FieldStatus::Unvalidated`].
    pub fn for_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names
                .into_iter()
                .map(|name| (name.into(), FieldStatus::Unvalidated))
                .collect(),
        }
    }

    /// Record a validator verdict. An empty message counts as no error.
    ///
    /// Returns `false` and leaves the state untouched when `name` is not a
    /// known field.
    pub fn record(&mut self, name: &str, verdict: Option<String>) -> bool {
        let Some(status) = self.fields.get_mut(name) else {
            return false;
        };

        *status = match verdict {
            Some(message) if !message.is_empty() => FieldStatus::Invalid(message),
            _ => FieldStatus::Valid,
        };
        true
    }

    pub fn status(&self, name: &str) -> Option<&FieldStatus> {
        self.fields.get(name)
    }

    /// Inline message to show next to a field, if it is invalid.
    pub fn message(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldStatus::Invalid(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Fields that are not yet valid, in name order.
    pub fn blocking_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, status)| !status.is_valid())
            .map(|(name, _)| name.as_str())
    }

    /// Error mapping view: every non-valid field with its message, `""` for
    /// fields that were never validated. Valid fields are absent.
    pub fn as_map(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .filter_map(|(name, status)| match status {
                FieldStatus::Valid => None,
                FieldStatus::Unvalidated => Some((name.as_str(), "")),
                FieldStatus::Invalid(message) => Some((name.as_str(), message.as_str())),
            })
            .collect()
    }

    /// `true` when no field blocks submission, whatever the message content.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(FieldStatus::is_valid)
    }
}
