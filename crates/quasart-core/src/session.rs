// Login stub. Stands in for a real auth backend: any non-empty pair gets in.
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Who is logged in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub name: String,
    pub role: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// `admin` is the shop owner; everyone else is staff
    pub fn for_user(username: &str, at: DateTime<Utc>) -> Self {
        let (name, role) = if username == "admin" {
            ("Administrator".to_string(), "Founder".to_string())
        } else {
            (username.to_string(), "Staff".to_string())
        };

        Self {
            username: username.to_string(),
            name,
            role,
            logged_in_at: at,
        }
    }
}

/// Pretend to authenticate.
///
/// Waits `delay` like a network round trip would, then accepts any
/// non-empty username and password.
pub async fn login(credentials: &Credentials, delay: Duration) -> Result<Session> {
    let username = credentials.username.trim();
    if username.is_empty() || credentials.password.is_empty() {
        return Err(Error::AuthError(
            "username and password are required".to_string(),
        ));
    }

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let session = Session::for_user(username, Utc::now());
    tracing::info!(user = %session.username, role = %session.role, "logged in");
    Ok(session)
}
