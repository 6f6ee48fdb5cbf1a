use std::fmt;

use serde::{Deserialize, Serialize};

/// Draft key holding the encoded listing photo.
pub const PHOTO_FIELD: &str = "photo";
/// Draft key for the free-form listing description.
pub const DESCRIPTION_FIELD: &str = "description";

/// HTML input type of a form control; selects the validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    TextArea,
    Number,
    Email,
    Password,
    File,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::TextArea => "textarea",
            InputType::Number => "number",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::File => "file",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static descriptor for one rendered form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HomeFieldSpec {
    pub label_name: &'static str,
    pub name: &'static str,
    pub input_type: InputType,
    pub test_id: &'static str,
}

impl HomeFieldSpec {
    const fn new(label_name: &'static str, name: &'static str, input_type: InputType) -> Self {
        Self {
            label_name,
            name,
            input_type,
            test_id: name,
        }
    }
}

pub const HOME_FIELDS: &[HomeFieldSpec] = &[
    HomeFieldSpec::new("Name", "name", InputType::Text),
    HomeFieldSpec::new("Address", "address", InputType::Text),
    HomeFieldSpec::new("City", "city", InputType::Text),
    HomeFieldSpec::new("State", "state", InputType::Text),
    HomeFieldSpec::new("Price per night", "price", InputType::Number),
    HomeFieldSpec::new("Bedrooms", "bedrooms", InputType::Number),
    HomeFieldSpec::new("Bathrooms", "bathrooms", InputType::Number),
];

/// Sign-in form controls; the browser suite selects them by test id.
pub const SIGN_IN_FIELDS: &[HomeFieldSpec] = &[
    HomeFieldSpec::new("Email", "email", InputType::Email),
    HomeFieldSpec::new("Password", "password", InputType::Password),
];

/// Input type for a validated field name, or `None` when the name is unknown.
pub fn input_type_for(fields: &[HomeFieldSpec], name: &str) -> Option<InputType> {
    if name == DESCRIPTION_FIELD {
        return Some(InputType::TextArea);
    }

    fields
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.input_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_field_names() {
        for spec in HOME_FIELDS.iter().chain(SIGN_IN_FIELDS) {
            assert_eq!(spec.test_id, spec.name);
        }
    }

    #[test]
    fn description_is_a_textarea_even_outside_the_field_list() {
        assert_eq!(
            input_type_for(HOME_FIELDS, DESCRIPTION_FIELD),
            Some(InputType::TextArea)
        );
        assert_eq!(input_type_for(HOME_FIELDS, "price"), Some(InputType::Number));
        assert_eq!(input_type_for(HOME_FIELDS, PHOTO_FIELD), None);
        assert_eq!(input_type_for(HOME_FIELDS, "pool"), None);
    }
}
