#![forbid(unsafe_code)]

//! Integration tests: models bound to an external property source.

mod common;

use std::rc::Rc;

use common::{AUTO_RADIUS, Rocket, count_warnings, tally};
use unitview_model::{ChangeEvent, Listener, ModelConfig, ModelError, Observable, ValueModel};
use unitview_units::UnitGroup;

fn radius_model(rocket: &Rc<Rocket>) -> ValueModel {
    ValueModel::bind(
        rocket.clone(),
        "Radius",
        ModelConfig::default().with_units(UnitGroup::length()),
    )
    .expect("fixture resolves Radius")
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn unknown_property_fails_at_bind_time() {
    let rocket = Rocket::new(0.1);
    let err = ValueModel::bind(rocket, "Mass", ModelConfig::default()).expect_err("no Mass");
    assert!(matches!(err, ModelError::Binding { ref property, .. } if property == "Mass"));
}

#[test]
fn reads_and_writes_go_through() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    assert!(model.is_bound());
    assert_eq!(model.name(), "Radius");
    assert_eq!(model.value(), Ok(0.1));

    model.set_value(0.3).expect("Radius is writable");
    assert_eq!(rocket.radius(), 0.3);
    assert_eq!(rocket.radius_writes(), 1);
}

#[test]
fn multiplier_scales_raw_values() {
    let rocket = Rocket::new(0.1);
    let diameter = ValueModel::bind(
        rocket.clone(),
        "Radius",
        ModelConfig::default().with_multiplier(2.0),
    )
    .expect("resolves");
    assert_eq!(diameter.value(), Ok(0.2));
    diameter.set_value(0.5).expect("writable");
    assert_eq!(rocket.radius(), 0.25);
}

#[test]
fn read_only_property_rejects_writes() {
    let rocket = Rocket::new(0.1);
    let length = ValueModel::bind(rocket, "Length", ModelConfig::default()).expect("resolves");
    assert_eq!(
        length.set_value(2.0),
        Err(ModelError::Unsupported {
            property: "Length".into()
        })
    );
    assert!(!length.is_automatic_available());
}

#[test]
fn failing_reader_is_propagated() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    rocket.fail_reads(true);
    let err = model.value().expect_err("reader fails");
    assert!(matches!(err, ModelError::Binding { .. }));
    assert!(err.to_string().contains("radius unavailable"));
}

#[test]
fn display_names_the_property() {
    let rocket = Rocket::new(0.1);
    assert_eq!(radius_model(&rocket).to_string(), "ValueModel[Radius]");
}

// ============================================================================
// Source subscription
// ============================================================================

#[test]
fn source_subscription_follows_listeners() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    assert_eq!(rocket.source_listeners(), 0);

    let (_, first) = tally();
    let (_, second) = tally();
    let a = model.subscribe(first);
    assert_eq!(rocket.source_listeners(), 1);
    let b = model.subscribe(second);
    assert_eq!(rocket.source_listeners(), 1);

    drop(a);
    assert_eq!(rocket.source_listeners(), 1);
    drop(b);
    assert_eq!(rocket.source_listeners(), 0);
}

#[test]
fn external_changes_are_filtered() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let _sub = model.subscribe(listener);

    rocket.fire();
    assert_eq!(count.get(), 0, "no property changed");

    rocket.set_radius(0.2);
    assert_eq!(count.get(), 1);

    rocket.set_radius(0.2);
    assert_eq!(count.get(), 1, "same value again");

    rocket.set_length(3.0);
    assert_eq!(count.get(), 1, "a different property changed");
}

#[test]
fn snapshot_is_taken_on_first_listener() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    // Changed while nobody listened.
    rocket.set_radius(0.7);

    let (count, listener) = tally();
    let _sub = model.subscribe(listener);
    rocket.fire();
    assert_eq!(count.get(), 0);
}

#[test]
fn write_notifies_once_through_source() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let _sub = model.subscribe(listener);

    model.set_value(0.4).expect("writable");
    assert_eq!(count.get(), 1);
}

// ============================================================================
// Automatic flag
// ============================================================================

#[test]
fn automatic_switch_round_trip() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let _sub = model.subscribe(listener);

    assert!(model.is_automatic_available());
    assert!(!model.is_automatic());

    model.set_automatic(true);
    assert!(rocket.is_automatic());
    assert!(model.is_automatic());
    assert_eq!(model.value(), Ok(AUTO_RADIUS));
    assert_eq!(count.get(), 1);

    model.set_value(0.2).expect("writable");
    assert!(!model.is_automatic());
    assert_eq!(count.get(), 2);
}

#[test]
fn automatic_flag_change_alone_notifies() {
    let rocket = Rocket::new(AUTO_RADIUS);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let _sub = model.subscribe(listener);

    model.set_automatic(true);
    assert_eq!(model.value(), Ok(AUTO_RADIUS));
    assert!(model.is_automatic());
    assert_eq!(count.get(), 1);

    rocket.set_automatic(true);
    assert_eq!(count.get(), 1, "flag and value both unchanged");
}

#[test]
fn failing_automatic_reader_warns() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    rocket.fail_automatic(true);
    let warnings = count_warnings(|| assert!(!model.is_automatic()));
    assert_eq!(warnings, 1);
}

#[test]
fn failing_automatic_writer_warns_and_resyncs() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let _sub = model.subscribe(listener);

    rocket.fail_automatic(true);
    let warnings = count_warnings(|| model.set_automatic(true));
    assert_eq!(warnings, 1);
    assert_eq!(count.get(), 1, "observers are told to resync");
    assert!(!rocket.is_automatic());
}

#[test]
fn failing_read_during_notification_is_absorbed() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let _sub = model.subscribe(listener);

    rocket.fail_reads(true);
    let warnings = count_warnings(|| rocket.fire());
    assert_eq!(warnings, 1);
    assert_eq!(count.get(), 0);
}

#[test]
fn listener_ids_remove_exactly_one_registration() {
    let rocket = Rocket::new(0.1);
    let model = radius_model(&rocket);
    let (count, listener) = tally();
    let listener: Listener<ChangeEvent> = Rc::new(listener);

    let first = model.add_change_listener(Rc::clone(&listener));
    let _second = model.add_change_listener(listener);
    rocket.set_radius(0.5);
    assert_eq!(count.get(), 2, "duplicates are delivered twice");

    assert!(model.remove_change_listener(first));
    rocket.set_radius(0.6);
    assert_eq!(count.get(), 3);
    assert_eq!(model.listener_count(), 1);
}
