//! Request authentication for protected routes.
//!
//! Credentials arrive per request in a Basic authorization header carrying
//! the account's email address and password. Verification resolves the
//! account by email, compares the password against the stored hash, and
//! attaches the resolved account to the request. Every denial is surfaced as
//! the same generic 401 body so callers cannot distinguish an unknown email
//! from a wrong password; the internal reason differs only in the logs.

use std::fmt;

use actix_web::http::header;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::future::LocalBoxFuture;
use tracing::{info, warn};

use crate::domain::password::verify_password;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;

/// Body of every authentication denial, regardless of the internal reason.
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied!";

/// Parsed transport credentials: the account email and submitted password.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parse the request's Basic authorization header.
    ///
    /// Returns `None` for an absent or malformed header; the two cases are
    /// indistinguishable to the caller by design.
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
        let encoded = header.strip_prefix("Basic ")?;
        let decoded = BASE64.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (email, password) = decoded.split_once(':')?;
        if email.is_empty() {
            return None;
        }
        Some(Self::new(email, password))
    }
}

/// Internal denial reason, logged but never surfaced to the caller.
#[derive(Debug)]
enum AuthDenial {
    MissingCredentials,
    UnknownAccount { email: String },
    PasswordMismatch { email: String },
}

impl fmt::Display for AuthDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "authorization header missing or malformed"),
            Self::UnknownAccount { email } => write!(f, "no account for email: {email}"),
            Self::PasswordMismatch { email } => {
                write!(f, "password mismatch for email: {email}")
            }
        }
    }
}

fn deny(reason: AuthDenial) -> Error {
    warn!(%reason, "authentication denied");
    Error::unauthorized(ACCESS_DENIED_MESSAGE)
}

fn map_lookup_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        other => Error::internal(other.to_string()),
    }
}

/// Resolve and verify the request's credentials against the account store.
///
/// Lookup failures are infrastructure errors and keep their own status;
/// every authentication failure collapses into the uniform denial.
pub async fn authenticate(
    users: &dyn UserRepository,
    credentials: Option<Credentials>,
) -> Result<User, Error> {
    let Some(credentials) = credentials else {
        return Err(deny(AuthDenial::MissingCredentials));
    };

    let account = users
        .find_by_email(credentials.email())
        .await
        .map_err(map_lookup_error)?;

    let Some(account) = account else {
        return Err(deny(AuthDenial::UnknownAccount {
            email: credentials.email().to_owned(),
        }));
    };

    if !verify_password(credentials.password(), account.password()) {
        return Err(deny(AuthDenial::PasswordMismatch {
            email: credentials.email().to_owned(),
        }));
    }

    info!(email = %account.email_address(), "authentication succeeded");
    Ok(account)
}

/// The authenticated account for the lifetime of one request.
///
/// Extracting `CurrentUser` runs the full credential check; the resolved
/// account is cached in the request's extensions so later extractions within
/// the same request reuse it instead of re-verifying.
#[derive(Clone)]
pub struct CurrentUser(User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn id(&self) -> i32 {
        self.0.id()
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if let Some(cached) = req.extensions().get::<CurrentUser>() {
                return Ok(cached.clone());
            }

            let state = req
                .app_data::<web::Data<HttpState>>()
                .cloned()
                .ok_or_else(|| Error::internal("HttpState is not registered"))?;

            let credentials = Credentials::from_request(&req);
            let account = authenticate(state.users.as_ref(), credentials).await?;
            let current = CurrentUser(account);
            req.extensions_mut().insert(current.clone());
            Ok(current)
        })
    }
}
