use crate::models::{LoginRequest, RegisterRequest, SessionUser, User};
use crate::store::AppStore;
use crate::utils::AppError;
use chrono::Utc;

/// Pluggable credential check consulted before the stored user collection.
/// The admin bypass is one implementation; tests inject their own.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<SessionUser>;
}

fn get_admin_email() -> String {
    std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin".to_string())
}

fn get_admin_password() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "thittuoi2025".to_string())
}

/// Administrator bypass credentials. The resulting identity lives only in the
/// session; it is never written into the user collection.
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(get_admin_email(), get_admin_password())
    }
}

impl CredentialVerifier for AdminCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<SessionUser> {
        if email == self.email && password == self.password {
            Some(SessionUser {
                id: "admin".to_string(),
                email: "admin@thittuoi.com".to_string(),
                full_name: "Administrator".to_string(),
                is_admin: true,
                created_at: None,
                last_login: None,
            })
        } else {
            None
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

fn validate_register(request: &RegisterRequest) -> Result<(), AppError> {
    if request.email.trim().is_empty()
        || request.password.is_empty()
        || request.full_name.trim().is_empty()
    {
        return Err(AppError::InvalidRequest(
            "Email, password and full name are required".to_string(),
        ));
    }
    if request.password.chars().count() < 6 {
        return Err(AppError::InvalidRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::InvalidRequest("Invalid email address".to_string()));
    }
    Ok(())
}

/// Creates an account, signs the new user in and persists both the session
/// and the full user collection.
pub async fn register(
    store: &mut AppStore,
    request: &RegisterRequest,
) -> Result<SessionUser, AppError> {
    validate_register(request)?;

    if store
        .users
        .users
        .iter()
        .any(|user| user.email == request.email)
    {
        return Err(AppError::DuplicateEmail);
    }

    let now = Utc::now();
    let new_user = User {
        id: format!("user-{:06}", store.users.next_user_id),
        email: request.email.clone(),
        password: request.password.clone(),
        full_name: request.full_name.clone(),
        created_at: now,
        last_login: now,
    };

    let session_user = new_user.to_session_user();
    store.users.users.push(new_user);
    store.users.next_user_id += 1;

    store.current_user = Some(session_user.clone());
    store.persist_session().await?;
    store.persist_users().await?;

    log::info!("✅ User registered: {}", session_user.email);

    Ok(session_user)
}

/// Signs a user in. The injected verifier is consulted first; a verifier
/// match produces a session-only identity. Otherwise both email and password
/// must match a stored record exactly.
pub async fn login(
    store: &mut AppStore,
    verifier: &dyn CredentialVerifier,
    request: &LoginRequest,
) -> Result<SessionUser, AppError> {
    if let Some(session_user) = verifier.verify(&request.email, &request.password) {
        store.current_user = Some(session_user.clone());
        store.persist_session().await?;
        log::info!("✅ Admin login: {}", session_user.email);
        return Ok(session_user);
    }

    let user = store
        .users
        .users
        .iter_mut()
        .find(|user| user.email == request.email && user.password == request.password)
        .ok_or(AppError::InvalidCredentials)?;

    user.last_login = Utc::now();
    let session_user = user.to_session_user();

    store.current_user = Some(session_user.clone());
    store.persist_session().await?;
    store.persist_users().await?;

    log::info!("✅ User logged in: {}", session_user.email);

    Ok(session_user)
}

/// Clears the session and removes its persisted snapshot.
pub async fn logout(store: &mut AppStore) -> Result<(), AppError> {
    store.current_user = None;
    store.persist_session().await?;
    log::info!("User logged out");
    Ok(())
}
