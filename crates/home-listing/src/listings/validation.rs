use super::fields::InputType;

const MAX_TEXT_LEN: usize = 255;
const MAX_TEXTAREA_LEN: usize = 2000;
const MIN_PASSWORD_LEN: usize = 8;

/// Maps an input type and raw value to an optional error message.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, input_type: InputType, value: &str) -> Option<String>;
}

/// Default rules used by the listing and sign-in forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFieldValidator;

impl FieldValidator for StandardFieldValidator {
    fn validate(&self, input_type: InputType, value: &str) -> Option<String> {
        match input_type {
            InputType::Text => required(value).or_else(|| max_len(value, MAX_TEXT_LEN)),
            InputType::TextArea => required(value).or_else(|| max_len(value, MAX_TEXTAREA_LEN)),
            InputType::Number => number(value),
            InputType::Email => email(value),
            InputType::Password => password(value),
            InputType::File => None,
        }
    }
}

fn required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("This field is required".to_string())
    } else {
        None
    }
}

fn max_len(value: &str, limit: usize) -> Option<String> {
    if value.chars().count() > limit {
        Some(format!("Must be {limit} characters or fewer"))
    } else {
        None
    }
}

fn number(value: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => None,
        _ => Some("Please enter a valid number".to_string()),
    }
}

fn email(value: &str) -> Option<String> {
    let invalid = || Some("Please enter a valid email address".to_string());
    let value = value.trim();

    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') || value.contains(char::is_whitespace) {
        return invalid();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return invalid();
    }

    None
}

fn password(value: &str) -> Option<String> {
    let long_enough = value.chars().count() >= MIN_PASSWORD_LEN;
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());

    if long_enough && upper && lower && digit {
        None
    } else {
        Some(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters and include upper case, lower case and a number"
        ))
    }
}
