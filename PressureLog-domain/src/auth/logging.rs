use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Types of authentication events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEventType {
    /// Successful login
    Login,
    /// Failed login attempt
    FailedLogin,
    /// New account registered
    Registration,
    /// Registration rejected
    FailedRegistration,
    /// User logout
    Logout,
    /// Session picked up from the store
    SessionRestored,
    /// Name or email changed
    ProfileUpdate,
}

impl std::fmt::Display for AuthEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEventType::Login => write!(f, "LOGIN"),
            AuthEventType::FailedLogin => write!(f, "FAILED_LOGIN"),
            AuthEventType::Registration => write!(f, "REGISTRATION"),
            AuthEventType::FailedRegistration => write!(f, "FAILED_REGISTRATION"),
            AuthEventType::Logout => write!(f, "LOGOUT"),
            AuthEventType::SessionRestored => write!(f, "SESSION_RESTORED"),
            AuthEventType::ProfileUpdate => write!(f, "PROFILE_UPDATE"),
        }
    }
}

/// Authentication event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    /// Type of authentication event
    pub event_type: AuthEventType,
    /// User ID or email (if available)
    pub user_id: Option<String>,
    /// Timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
    /// Whether the event was successful
    pub success: bool,
    /// Additional details about the event
    pub details: Option<String>,
    /// Authentication method used
    pub auth_method: Option<String>,
}

impl AuthEvent {
    /// Create a new authentication event
    pub fn new(event_type: AuthEventType, user_id: Option<&str>, success: bool) -> Self {
        Self {
            event_type,
            user_id: user_id.map(String::from),
            timestamp: Utc::now(),
            success,
            details: None,
            auth_method: None,
        }
    }

    /// Set the details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Set the authentication method
    pub fn with_auth_method(mut self, auth_method: impl Into<String>) -> Self {
        self.auth_method = Some(auth_method.into());
        self
    }

    /// Render the event as a single log line
    pub fn log_line(&self) -> String {
        let user_id_str = self.user_id.as_deref().unwrap_or("anonymous");
        let status = if self.success { "SUCCESS" } else { "FAILURE" };
        let details = self.details.as_deref().unwrap_or("");

        format!(
            "AUTH-LOG [{}] [{}] [{}] [{}] {}",
            self.event_type,
            user_id_str,
            status,
            self.timestamp.to_rfc3339(),
            details
        )
    }
}

/// Log an authentication event
pub fn log_auth_event(event: AuthEvent) {
    let line = event.log_line();
    if event.success {
        info!("{}", line);
    } else {
        warn!("{}", line);
    }
}

/// Log a successful login
pub fn log_successful_login(user_id: &str) {
    let event = AuthEvent::new(AuthEventType::Login, Some(user_id), true).with_auth_method("password");
    log_auth_event(event);
}

/// Log a failed login attempt
pub fn log_failed_login(email: &str, reason: &str) {
    let event = AuthEvent::new(AuthEventType::FailedLogin, Some(email), false)
        .with_details(reason)
        .with_auth_method("password");
    log_auth_event(event);
}

/// Log a registration attempt
pub fn log_registration(user: &str, success: bool, details: Option<&str>) {
    let event_type = if success {
        AuthEventType::Registration
    } else {
        AuthEventType::FailedRegistration
    };
    let mut event = AuthEvent::new(event_type, Some(user), success);

    if let Some(d) = details {
        event = event.with_details(d);
    }

    log_auth_event(event);
}

/// Log a logout event
pub fn log_logout(user_id: &str) {
    let event = AuthEvent::new(AuthEventType::Logout, Some(user_id), true);
    log_auth_event(event);
}

/// Log a restored session
pub fn log_session_restored(user_id: &str) {
    let event = AuthEvent::new(AuthEventType::SessionRestored, Some(user_id), true);
    log_auth_event(event);
}

/// Log a profile update
pub fn log_profile_update(user_id: &str, success: bool, details: Option<&str>) {
    let mut event = AuthEvent::new(AuthEventType::ProfileUpdate, Some(user_id), success);

    if let Some(d) = details {
        event = event.with_details(d);
    }

    log_auth_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_auth_event() {
        let event = AuthEvent::new(AuthEventType::Login, Some("user-1"), true)
            .with_details("Login from dashboard")
            .with_auth_method("password");

        assert_eq!(event.event_type, AuthEventType::Login);
        assert_eq!(event.user_id, Some("user-1".to_string()));
        assert!(event.success);
        assert_eq!(event.details, Some("Login from dashboard".to_string()));
        assert_eq!(event.auth_method, Some("password".to_string()));
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(AuthEventType::Login.to_string(), "LOGIN");
        assert_eq!(AuthEventType::Logout.to_string(), "LOGOUT");
        assert_eq!(AuthEventType::FailedLogin.to_string(), "FAILED_LOGIN");
        assert_eq!(AuthEventType::SessionRestored.to_string(), "SESSION_RESTORED");
    }

    #[test]
    fn test_log_line_format() {
        let event = AuthEvent::new(AuthEventType::FailedRegistration, None, false)
            .with_details("Email already in use");
        let line = event.log_line();

        assert!(line.starts_with("AUTH-LOG [FAILED_REGISTRATION] [anonymous] [FAILURE] ["));
        assert!(line.ends_with("] Email already in use"));
    }
}
