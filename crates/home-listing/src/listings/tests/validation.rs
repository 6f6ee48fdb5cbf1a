use super::common::*;
use std::sync::Arc;

use crate::listings::controller::{FormError, HomeFormController};
use crate::listings::draft::FieldStatus;
use crate::listings::fields::HOME_FIELDS;

#[test]
fn initial_errors_cover_every_field_and_description() {
    let (form, _harness) = standard_form(Arc::new(ScriptedApi::responding(created(1))));
    let map = form.errors().as_map();

    assert_eq!(map.len(), HOME_FIELDS.len() + 1);
    assert!(map.values().all(|message| message.is_empty()));
    assert!(map.contains_key("description"));
    assert!(form.draft().is_empty());
}

#[test]
fn last_write_wins_per_key() {
    let (mut form, _harness) = standard_form(Arc::new(ScriptedApi::responding(created(1))));
    fill(
        &mut form,
        &[
            ("name", "Cabin"),
            ("price", "90"),
            ("name", "Lake House"),
            ("price", "120"),
            ("name", "Lake House East"),
        ],
    );

    assert_eq!(form.draft().get("name"), Some("Lake House East"));
    assert_eq!(form.draft().get("price"), Some("120"));
    assert_eq!(form.draft().len(), 2);
}

#[test]
fn validator_message_is_recorded_verbatim() {
    let (collaborators, _harness) = wire(
        Arc::new(ScriptedApi::responding(created(1))),
        Arc::new(FixedValidator(Some("Too fancy"))),
        Arc::new(FixedProfanity::default()),
    );
    let mut form = HomeFormController::new(user(), HOME_FIELDS, collaborators);
    form.change_field("city", "Paris").expect("known field");

    assert_eq!(form.errors().as_map().get("city"), Some(&"Too fancy"));
    assert_eq!(
        form.field_status("city"),
        Some(&FieldStatus::Invalid("Too fancy".to_string()))
    );
    assert_eq!(form.view().rows[2].error.as_deref(), Some("Too fancy"));
}

#[test]
fn passing_validation_removes_the_key_instead_of_blanking_it() {
    let (mut form, _harness) = standard_form(Arc::new(ScriptedApi::responding(created(1))));

    form.change_field("price", "cheap").expect("known field");
    assert_eq!(
        form.errors().as_map().get("price"),
        Some(&"Please enter a valid number")
    );

    form.change_field("price", "150").expect("known field");
    assert!(!form.errors().as_map().contains_key("price"));
    assert_eq!(form.field_status("price"), Some(&FieldStatus::Valid));
}

#[test]
fn invalid_values_are_still_merged_into_the_draft() {
    let (mut form, _harness) = standard_form(Arc::new(ScriptedApi::responding(created(1))));
    form.change_field("bedrooms", "lots").expect("known field");

    assert_eq!(form.draft().get("bedrooms"), Some("lots"));
    assert_eq!(form.view().rows[5].value, "lots");
}

#[test]
fn unknown_fields_are_rejected_without_touching_state() {
    let (mut form, _harness) = standard_form(Arc::new(ScriptedApi::responding(created(1))));
    let before = form.errors().clone();

    match form.change_field("pool", "yes") {
        Err(FormError::UnknownField(name)) => assert_eq!(name, "pool"),
        other => panic!("expected unknown field error, got {other:?}"),
    }
    assert!(form.draft().is_empty());
    assert_eq!(form.errors(), &before);
}

#[test]
fn view_exposes_stable_test_ids() {
    let (mut form, _harness) = standard_form(Arc::new(ScriptedApi::responding(created(1))));
    form.change_field("description", "Cozy").expect("known field");
    let view = form.view();

    assert_eq!(view.form_test_id, "home-create-form");
    assert_eq!(view.photo_test_id, "home-photo");
    assert_eq!(view.description_test_id, "description");
    assert_eq!(view.description, "Cozy");
    assert!(view.description_error.is_none());
    assert!(!view.has_photo);
    let ids: Vec<&str> = view.rows.iter().map(|row| row.test_id).collect();
    assert_eq!(
        ids,
        vec!["name", "address", "city", "state", "price", "bedrooms", "bathrooms"]
    );
}
