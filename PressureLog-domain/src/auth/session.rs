use chrono::Utc;
use pressure_log_data::models::{StoredAccount, StoredUser};
use pressure_log_data::repository::AccountRepository;
use pressure_log_data::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::logging::{
    log_failed_login, log_logout, log_profile_update, log_registration, log_session_restored,
    log_successful_login,
};
use super::AuthError;
use crate::entities::account::{LoginRequest, ProfileUpdate, RegisterRequest, User};
use crate::entities::conversions::{convert_to_data_user, convert_to_domain_user, format_timestamp};
use crate::services::ids::{generate_unique_id, USER_ID_PREFIX};
use crate::services::validation::validate_input;

/// The signed-in user, passed explicitly to the services that need it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Account that owns every record created in this session
    pub fn owner_id(&self) -> &str {
        &self.user.id
    }
}

/// Login, registration and session persistence
pub struct SessionManager<S> {
    accounts: AccountRepository<S>,
    builtin: Vec<StoredAccount>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Create a manager with no built-in accounts
    pub fn new(store: S) -> Self {
        Self {
            accounts: AccountRepository::new(store),
            builtin: Vec::new(),
        }
    }

    /// Accounts that can always sign in and are never written to the store
    pub fn with_builtin_accounts(mut self, accounts: Vec<StoredAccount>) -> Self {
        self.builtin = accounts;
        self
    }

    /// Sign in with an email and password
    ///
    /// Built-in accounts are checked before registered ones. Nothing is written
    /// when the credentials do not match.
    pub fn login(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        let credentials_match = |account: &StoredAccount| {
            account.email == request.email && account.password == request.password
        };

        let account = match self.builtin.iter().find(|account| credentials_match(*account)) {
            Some(account) => account.clone(),
            None => {
                let registered = self.accounts.registered()?;
                match registered.into_iter().find(|account| credentials_match(account)) {
                    Some(account) => account,
                    None => {
                        log_failed_login(&request.email, "Invalid email or password");
                        return Err(AuthError::InvalidCredentials);
                    }
                }
            }
        };

        let session = self.start_session(account.to_user())?;
        log_successful_login(session.owner_id());
        Ok(session)
    }

    /// Create an account and sign it in
    ///
    /// If the session cannot be written the registered accounts list is put
    /// back the way it was.
    pub fn register(&self, request: &RegisterRequest) -> Result<Session, AuthError> {
        if let Err(message) = validate_input(request) {
            log_registration(&request.email, false, Some(&message));
            return Err(AuthError::Validation(message));
        }

        let previous = self.accounts.registered_raw()?;
        let mut registered = self.accounts.registered()?;
        if self.email_taken(&registered, &request.email, None) {
            log_registration(&request.email, false, Some("Email already in use"));
            return Err(AuthError::EmailInUse(request.email.clone()));
        }

        let account = StoredAccount {
            id: generate_unique_id(USER_ID_PREFIX),
            name: request.name.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            created_at: format_timestamp(&Utc::now()),
        };
        registered.push(account.clone());
        self.accounts.save_registered(&registered)?;

        match self.start_session(account.to_user()) {
            Ok(session) => {
                info!("Registered account {}", session.owner_id());
                log_registration(session.owner_id(), true, None);
                Ok(session)
            }
            Err(err) => {
                self.roll_back_registered(previous.as_deref());
                log_registration(&request.email, false, Some(&err.to_string()));
                Err(err)
            }
        }
    }

    /// Sign out
    pub fn logout(&self, session: &Session) -> Result<(), AuthError> {
        self.accounts.clear_session()?;
        log_logout(session.owner_id());
        Ok(())
    }

    /// Pick up the session left in the store, if any
    ///
    /// A snapshot that cannot be read is removed and treated as signed out.
    pub fn restore(&self) -> Result<Option<Session>, AuthError> {
        let stored = match self.accounts.session() {
            Ok(stored) => stored,
            Err(err) if err.is_corrupt_snapshot() => {
                warn!("Discarding unreadable session: {}", err);
                self.accounts.clear_session()?;
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let Some(stored) = stored else {
            return Ok(None);
        };

        match convert_to_domain_user(stored) {
            Ok(user) => {
                log_session_restored(&user.id);
                Ok(Some(Session::new(user)))
            }
            Err(err) => {
                warn!("Discarding unreadable session: {}", err);
                self.accounts.clear_session()?;
                Ok(None)
            }
        }
    }

    /// Change the name and email of the signed-in account
    ///
    /// Registered accounts are updated in the store as well; built-in accounts
    /// only change for the current session.
    pub fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Session, AuthError> {
        if let Err(message) = validate_input(update) {
            log_profile_update(session.owner_id(), false, Some(&message));
            return Err(AuthError::Validation(message));
        }

        let previous = self.accounts.registered_raw()?;
        let mut registered = self.accounts.registered()?;
        if self.email_taken(&registered, &update.email, Some(session.owner_id())) {
            log_profile_update(session.owner_id(), false, Some("Email already in use"));
            return Err(AuthError::EmailInUse(update.email.clone()));
        }

        let mut user = session.user().clone();
        user.name = update.name.clone();
        user.email = update.email.clone();

        let mut touched_registered = false;
        if let Some(account) = registered
            .iter_mut()
            .find(|account| account.id == session.owner_id())
        {
            account.name = user.name.clone();
            account.email = user.email.clone();
            self.accounts.save_registered(&registered)?;
            touched_registered = true;
        }

        if let Err(err) = self.accounts.save_session(&convert_to_data_user(&user)) {
            if touched_registered {
                self.roll_back_registered(previous.as_deref());
            }
            log_profile_update(session.owner_id(), false, Some(&err.to_string()));
            return Err(err.into());
        }

        log_profile_update(session.owner_id(), true, None);
        Ok(Session::new(user))
    }

    fn start_session(&self, stored: StoredUser) -> Result<Session, AuthError> {
        let user = convert_to_domain_user(stored.clone())?;
        self.accounts.save_session(&stored)?;
        Ok(Session::new(user))
    }

    fn email_taken(&self, registered: &[StoredAccount], email: &str, except_id: Option<&str>) -> bool {
        self.builtin
            .iter()
            .chain(registered.iter())
            .any(|account| account.email == email && Some(account.id.as_str()) != except_id)
    }

    fn roll_back_registered(&self, previous: Option<&str>) {
        if let Err(err) = self.accounts.restore_registered_raw(previous) {
            error!("Failed to restore registered accounts: {}", err);
        }
    }
}
