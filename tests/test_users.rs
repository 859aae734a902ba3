//! User management, two-factor enrollment and widget saving against the fake backend.

mod common;

use finboard_sdk::models::{ChartType, NewUser, Role, UserUpdate, WidgetConfig};
use finboard_sdk::{FinboardError, WidgetLayout};

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Nora New".into(),
        email: email.into(),
        role: Role::Accountant,
        password: Some("initial-pass".into()),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[test]
fn list_users() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let users = sdk.users().list().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].role, Role::Admin);
    assert_eq!(users[1].role, Role::Viewer);
}

#[test]
fn search_users_by_name_or_email() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let by_name = sdk.users().search("VICTOR").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, 2);

    let by_email = sdk.users().search("admin@").unwrap();
    assert_eq!(by_email[0].id, 1);

    assert_eq!(sdk.users().search("  ").unwrap().len(), 2);
    assert!(sdk.users().search("nobody").unwrap().is_empty());
}

#[test]
fn add_user() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let created = sdk.users().add(&new_user("nora@example.com")).unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.role, Role::Accountant);
    assert!(created.is_active);
    assert_eq!(sdk.users().list().unwrap().len(), 3);
}

#[test]
fn add_duplicate_user_conflicts() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let err = sdk.users().add(&new_user(common::ADMIN_EMAIL)).unwrap_err();
    match err {
        FinboardError::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Email already exists");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn invalid_user_is_rejected_locally() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let mut bad = new_user("not-an-email");
    assert!(matches!(
        sdk.users().add(&bad),
        Err(FinboardError::Validation(_))
    ));
    bad.email = "ok@example.com".into();
    bad.name = "   ".into();
    assert!(sdk.users().add(&bad).is_err());
    assert!(matches!(
        sdk.users().update(2, &UserUpdate::default()),
        Err(FinboardError::Validation(_))
    ));

    assert_eq!(backend.recorded.lock().unwrap().users.len(), 2);
}

#[test]
fn update_user() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let update = UserUpdate {
        role: Some(Role::Manager),
        ..UserUpdate::default()
    };
    let updated = sdk.users().update(2, &update).unwrap();
    assert_eq!(updated.role, Role::Manager);
    assert_eq!(updated.name, "Victor Viewer");
    // Someone else's profile leaves the session alone.
    assert_eq!(sdk.current_user().unwrap().name, "Ada Admin");
}

#[test]
fn updating_self_refreshes_current_user() {
    let backend = common::spawn_backend();
    let (sdk, tmp) = common::signed_in_sdk(&backend);

    let update = UserUpdate {
        name: Some("Ada Lovelace".into()),
        ..UserUpdate::default()
    };
    sdk.users().update(1, &update).unwrap();
    assert_eq!(sdk.current_user().unwrap().name, "Ada Lovelace");

    let raw = std::fs::read_to_string(tmp.path().join("currentUser.json")).unwrap();
    assert!(raw.contains("Ada Lovelace"));
}

#[test]
fn delete_user() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    sdk.users().delete(2).unwrap();
    assert_eq!(sdk.users().list().unwrap().len(), 1);

    let err = sdk.users().delete(2).unwrap_err();
    assert!(matches!(err, FinboardError::Api { status: 404, .. }));
}

#[test]
fn deactivate_user() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    sdk.users().set_active(2, false).unwrap();
    assert_eq!(backend.recorded.lock().unwrap().activation.get(&2), Some(&false));
    let users = sdk.users().list().unwrap();
    assert!(!users[1].is_active);
}

#[test]
fn user_calls_require_login() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::sdk_for(&backend);
    assert!(matches!(
        sdk.users().list(),
        Err(FinboardError::Unauthorized(_))
    ));
}

// ---------------------------------------------------------------------------
// Two-factor authentication
// ---------------------------------------------------------------------------

#[test]
fn two_factor_setup_returns_secret() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let setup = sdk.two_factor().setup().unwrap();
    assert_eq!(setup.secret, "JBSWY3DPEHPK3PXP");
    assert!(setup.otpauth_url.unwrap().starts_with("otpauth://"));
}

#[test]
fn two_factor_setup_requires_login() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::sdk_for(&backend);
    assert!(matches!(
        sdk.two_factor().setup(),
        Err(FinboardError::Unauthorized(_))
    ));
}

#[test]
fn enable_two_factor_updates_current_user() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    sdk.two_factor()
        .set_enabled(1, true, Some(common::TOTP_CODE))
        .unwrap();
    assert!(sdk.current_user().unwrap().two_factor_enabled);
    assert_eq!(backend.recorded.lock().unwrap().two_factor.get(&1), Some(&true));

    sdk.two_factor().set_enabled(1, false, None).unwrap();
    assert!(!sdk.current_user().unwrap().two_factor_enabled);
}

#[test]
fn enable_two_factor_needs_valid_code() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    assert!(matches!(
        sdk.two_factor().set_enabled(1, true, None),
        Err(FinboardError::Validation(_))
    ));
    let err = sdk
        .two_factor()
        .set_enabled(1, true, Some("000000"))
        .unwrap_err();
    assert!(matches!(err, FinboardError::Api { status: 400, .. }));
    assert!(!sdk.current_user().unwrap().two_factor_enabled);
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

#[test]
fn save_layout_sends_current_order() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    let mut layout = WidgetLayout::new();
    layout.reorder(4, 0).unwrap();
    layout.set_chart_type("revenue", ChartType::Area).unwrap();
    layout.set_enabled("profit", false).unwrap();
    sdk.widgets().save_layout(&layout).unwrap();

    let saved = backend.recorded.lock().unwrap().saved_widgets.clone();
    assert_eq!(saved.len(), 5);
    assert_eq!(saved[0]["widgetName"], "expenses");
    assert_eq!(saved[1]["chartType"], "area");
    assert_eq!(saved[3]["chartEnableOrDisable"], false);
}

#[test]
fn save_rejects_empty_or_unnamed_widgets() {
    let backend = common::spawn_backend();
    let (sdk, _tmp) = common::signed_in_sdk(&backend);

    assert!(matches!(
        sdk.widgets().save(&[]),
        Err(FinboardError::Validation(_))
    ));
    let unnamed = WidgetConfig {
        widget_name: " ".into(),
        chart_type: ChartType::Bar,
        chart_enable_or_disable: true,
    };
    assert!(sdk.widgets().save(&[unnamed]).is_err());
    assert!(backend.recorded.lock().unwrap().saved_widgets.is_empty());
}
