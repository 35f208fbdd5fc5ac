use std::rc::Rc;

use tutorconnect_core::{
    AccountError, AccountService, Event, EventBus, MemoryStorage, RegisterRequest, StorageTier,
    UserAccount, CURRENT_USER_KEY, USERS_KEY,
};

struct Fixture {
    durable: Rc<MemoryStorage>,
    session: Rc<MemoryStorage>,
    bus: Rc<EventBus>,
    service: AccountService,
}

fn fixture() -> Fixture {
    let bus = EventBus::new();
    let durable = Rc::new(MemoryStorage::new());
    let session = Rc::new(MemoryStorage::new());
    let service = AccountService::new(
        durable.clone() as Rc<dyn StorageTier>,
        session.clone() as Rc<dyn StorageTier>,
        bus.clone(),
    );
    Fixture {
        durable,
        session,
        bus,
        service,
    }
}

fn request(name: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "hunter22".to_string(),
    }
}

#[test]
fn register_persists_the_account_and_logs_it_in() {
    let fx = fixture();
    let probe = fx.bus.subscribe();

    let account = fx
        .service
        .register(&request("Pat Doe", "pat@example.com"))
        .unwrap();
    assert!(account.id.starts_with("user-"));

    let stored: Vec<UserAccount> =
        serde_json::from_str(&fx.durable.get(USERS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "pat@example.com");

    assert_eq!(fx.service.current_user().unwrap().id, account.id);
    assert_eq!(probe.drain(), vec![Event::AuthChanged]);
}

#[test]
fn duplicate_email_is_rejected_without_state_change() {
    let fx = fixture();
    fx.service
        .register(&request("Pat Doe", "pat@example.com"))
        .unwrap();
    let before = fx.durable.get(USERS_KEY).unwrap().unwrap();

    let error = fx
        .service
        .register(&request("Other Pat", "pat@example.com"))
        .unwrap_err();
    assert!(matches!(error, AccountError::DuplicateEmail(email) if email == "pat@example.com"));

    assert_eq!(fx.durable.get(USERS_KEY).unwrap().unwrap(), before);
}

#[test]
fn registration_validation_reports_fields() {
    let fx = fixture();
    let error = fx
        .service
        .register(&RegisterRequest {
            name: "P".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        })
        .unwrap_err();

    let AccountError::Validation(errors) = error else {
        panic!("expected validation error");
    };
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
}

#[test]
fn login_matches_stored_credentials() {
    let fx = fixture();
    fx.service
        .register(&request("Pat Doe", "pat@example.com"))
        .unwrap();
    fx.service.logout().unwrap();
    assert!(fx.service.current_user().is_none());

    let wrong = fx.service.login("pat@example.com", "wrong-password");
    assert!(matches!(wrong, Err(AccountError::InvalidCredentials)));
    assert!(fx.service.current_user().is_none());

    let account = fx.service.login("pat@example.com", "hunter22").unwrap();
    assert_eq!(fx.service.current_user().unwrap().id, account.id);
}

#[test]
fn logout_is_idempotent_and_always_announced() {
    let fx = fixture();
    fx.service
        .register(&request("Pat Doe", "pat@example.com"))
        .unwrap();

    let probe = fx.bus.subscribe();
    fx.service.logout().unwrap();
    fx.service.logout().unwrap();

    assert!(fx.service.current_user().is_none());
    assert_eq!(probe.drain().len(), 2);
}

#[test]
fn malformed_session_blob_degrades_to_logged_out() {
    let fx = fixture();
    fx.session.set(CURRENT_USER_KEY, "{not json").unwrap();
    assert!(fx.service.current_user().is_none());
}

#[test]
fn malformed_user_list_is_treated_as_empty() {
    let fx = fixture();
    fx.durable.set(USERS_KEY, "][").unwrap();

    // Registration still succeeds against the degraded (empty) list.
    fx.service
        .register(&request("Pat Doe", "pat@example.com"))
        .unwrap();
    let stored: Vec<UserAccount> =
        serde_json::from_str(&fx.durable.get(USERS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
}
