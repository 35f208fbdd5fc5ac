//! Registration, login, and session handling over the storage tiers.
//!
//! # Responsibility
//! - Maintain the registered-account list in the durable tier.
//! - Mirror the logged-in identity into the session namespace.
//! - Announce every identity change on the bus.
//!
//! # Invariants
//! - A rejected registration leaves the stored account list unchanged.
//! - Absence of the session key means logged out; a malformed session blob
//!   degrades to logged out.

use crate::event::{Event, EventBus};
use crate::ids;
use crate::model::account::{RegisterRequest, UserAccount};
use crate::model::submission::{is_valid_email, FieldError};
use crate::service::read_json_array;
use crate::storage::{StorageError, StorageTier, CURRENT_USER_KEY, USERS_KEY};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Account-flow error. `DuplicateEmail` and `InvalidCredentials` are
/// user-facing rejections with no partial state change.
#[derive(Debug)]
pub enum AccountError {
    Validation(Vec<FieldError>),
    DuplicateEmail(String),
    InvalidCredentials,
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "registration rejected: ")?;
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", error.field, error.message)?;
                }
                Ok(())
            }
            Self::DuplicateEmail(email) => {
                write!(f, "a user with email {email} already exists")
            }
            Self::InvalidCredentials => write!(f, "email or password did not match"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode account data: {err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AccountError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for AccountError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Account use-case service. Holds the durable tier (account list) and the
/// session namespace (logged-in identity).
pub struct AccountService {
    durable: Rc<dyn StorageTier>,
    session: Rc<dyn StorageTier>,
    bus: Rc<EventBus>,
}

impl AccountService {
    pub fn new(
        durable: Rc<dyn StorageTier>,
        session: Rc<dyn StorageTier>,
        bus: Rc<EventBus>,
    ) -> Self {
        Self {
            durable,
            session,
            bus,
        }
    }

    /// Registers a new account and logs it in.
    ///
    /// # Contract
    /// - A duplicate email is rejected with [`AccountError::DuplicateEmail`]
    ///   and no change to the stored account list.
    /// - On success the account is appended to the durable list, mirrored
    ///   into the session namespace, and `AuthChanged` is published.
    pub fn register(&self, request: &RegisterRequest) -> Result<UserAccount, AccountError> {
        validate_registration(request)?;

        let mut users: Vec<UserAccount> =
            read_json_array(self.durable.as_ref(), USERS_KEY, "users");
        if users.iter().any(|user| user.email == request.email) {
            return Err(AccountError::DuplicateEmail(request.email.clone()));
        }

        let account = UserAccount {
            id: ids::account_id(),
            name: request.name.clone(),
            email: request.email.clone(),
            // Stored verbatim: real credential handling is out of scope.
            password: request.password.clone(),
            created: ids::now_ms().to_string(),
        };
        users.push(account.clone());

        self.durable
            .set(USERS_KEY, &serde_json::to_string(&users)?)?;
        self.set_session(&account)?;

        info!(
            "event=account_register module=account status=ok id={}",
            account.id
        );
        self.bus.publish(Event::AuthChanged);
        Ok(account)
    }

    /// Logs in against the stored account list.
    pub fn login(&self, email: &str, password: &str) -> Result<UserAccount, AccountError> {
        let users: Vec<UserAccount> = read_json_array(self.durable.as_ref(), USERS_KEY, "users");
        let account = users
            .into_iter()
            .find(|user| user.email == email && user.password == password)
            .ok_or(AccountError::InvalidCredentials)?;

        self.set_session(&account)?;
        info!(
            "event=account_login module=account status=ok id={}",
            account.id
        );
        self.bus.publish(Event::AuthChanged);
        Ok(account)
    }

    /// Clears the session. Idempotent; always publishes `AuthChanged`.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.session.remove(CURRENT_USER_KEY)?;
        info!("event=account_logout module=account status=ok");
        self.bus.publish(Event::AuthChanged);
        Ok(())
    }

    /// Returns the logged-in account, or `None` when logged out or when the
    /// session blob cannot be parsed.
    pub fn current_user(&self) -> Option<UserAccount> {
        let raw = match self.session.get(CURRENT_USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=session_read module=account status=skipped error={err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(account) => Some(account),
            Err(err) => {
                warn!("event=session_parse module=account status=skipped error={err}");
                None
            }
        }
    }

    fn set_session(&self, account: &UserAccount) -> Result<(), AccountError> {
        self.session
            .set(CURRENT_USER_KEY, &serde_json::to_string(account)?)?;
        Ok(())
    }
}

fn validate_registration(request: &RegisterRequest) -> Result<(), AccountError> {
    let mut errors = Vec::new();

    if request.name.trim().len() < 2 {
        errors.push(FieldError {
            field: "name",
            message: "Name must be at least 2 characters".to_string(),
        });
    }
    if !is_valid_email(&request.email) {
        errors.push(FieldError {
            field: "email",
            message: "Please enter a valid email address".to_string(),
        });
    }
    if request.password.len() < 6 {
        errors.push(FieldError {
            field: "password",
            message: "Password must be at least 6 characters".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AccountError::Validation(errors))
    }
}
