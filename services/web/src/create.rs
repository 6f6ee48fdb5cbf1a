use clap::Args;
use home_listing::config::AppConfig;
use home_listing::error::AppError;
use home_listing::listings::{
    AuthenticatedUser, HomeFormController, NavigationLog, PhotoSource, SubmitOutcome,
    TracingNotifier, DESCRIPTION_FIELD, HOME_FIELDS,
};
use home_listing::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::ListingServices;

#[derive(Args, Debug)]
pub(crate) struct CreateArgs {
    /// Identifier of the signed-in owner
    #[arg(long)]
    pub(crate) owner_id: u64,
    /// Bearer token issued at sign-in
    #[arg(long)]
    pub(crate) token: String,
    /// Listing field as name=value (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    pub(crate) fields: Vec<(String, String)>,
    /// Listing description
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Photo to attach to the listing
    #[arg(long)]
    pub(crate) photo: Option<PathBuf>,
}

pub(crate) fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub(crate) async fn run_create(args: CreateArgs) -> Result<(), AppError> {
    let CreateArgs {
        owner_id,
        token,
        fields,
        description,
        photo,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let services = ListingServices::from_config(&config.api);
    let notifier = Arc::new(TracingNotifier);
    let navigation = NavigationLog::default();
    let mut form = HomeFormController::new(
        AuthenticatedUser::new(owner_id, token),
        HOME_FIELDS,
        services.collaborators(notifier, Arc::new(navigation.clone())),
    );

    for (name, value) in fields {
        form.change_field(&name, value)?;
    }
    if let Some(description) = description {
        form.change_field(DESCRIPTION_FIELD, description)?;
    }
    if let Some(path) = photo {
        form.upload_photo(vec![PhotoSource::File(path)]).await?;
    }

    match form.submit().await? {
        SubmitOutcome::Created(home_id) => {
            let route = navigation
                .last()
                .map(|route| route.path())
                .unwrap_or_default();
            println!("Created home {home_id}");
            println!("Edit it at {route}");
            Ok(())
        }
        SubmitOutcome::Blocked(reason) => {
            for (field, message) in form.errors().as_map() {
                if message.is_empty() {
                    println!("- {field}: missing");
                } else {
                    println!("- {field}: {message}");
                }
            }
            Err(AppError::from(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_splits_on_first_equals() {
        assert_eq!(
            parse_field("name=Lake=House"),
            Ok(("name".to_string(), "Lake=House".to_string()))
        );
        assert_eq!(
            parse_field("description="),
            Ok(("description".to_string(), String::new()))
        );
    }

    #[test]
    fn parse_field_requires_a_name() {
        assert!(parse_field("=Lake House").is_err());
        assert!(parse_field("Lake House").is_err());
    }
}
