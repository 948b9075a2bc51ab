use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use spendflow_core::config::SessionConfig;

/// The opaque logged-in-identity record. Persisted between runs but carries
/// no workflow state; losing it only signs the user out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub country: String,
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not read session file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write session file `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("session file `{path}` is corrupt: {source}")]
    Corrupt { path: PathBuf, source: serde_json::Error },
}

/// Mock sign-in with file-backed persistence. Roles are inferred from the
/// email local part, exactly as capricious as the stub it replaces; nothing
/// here is an authorization decision.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self { path: config.store_path.clone() }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The persisted session, if one exists.
    pub fn current(&self) -> Result<Option<SessionUser>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SessionError::Read { path: self.path.clone(), source }),
        };
        let user = serde_json::from_str(&raw)
            .map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })?;
        Ok(Some(user))
    }

    pub fn login(&self, email: &str, _password: &str) -> Result<SessionUser, SessionError> {
        let role = infer_role(email);
        let user = SessionUser {
            id: Uuid::new_v4().to_string(),
            name: display_name_for_role(role).to_string(),
            email: email.to_string(),
            role: role.to_string(),
            country: "United States".to_string(),
            currency: "USD".to_string(),
        };
        self.persist(&user)?;
        info!(email, role, "session opened");
        Ok(user)
    }

    pub fn signup(
        &self,
        name: &str,
        email: &str,
        _password: &str,
        country: &str,
    ) -> Result<SessionUser, SessionError> {
        let user = SessionUser {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: "employee".to_string(),
            country: country.to_string(),
            currency: currency_for_country(country).to_string(),
        };
        self.persist(&user)?;
        info!(email, country, "account created");
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("session closed");
                Ok(())
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write { path: self.path.clone(), source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, user: &SessionUser) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(user)
            .map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })?;
        fs::write(&self.path, raw)
            .map_err(|source| SessionError::Write { path: self.path.clone(), source })
    }
}

fn infer_role(email: &str) -> &'static str {
    let local_part = email.split('@').next().unwrap_or_default().to_ascii_lowercase();
    if local_part.contains("admin") {
        "admin"
    } else if local_part.contains("manager") {
        "manager"
    } else {
        "employee"
    }
}

fn display_name_for_role(role: &str) -> &'static str {
    match role {
        "admin" => "Admin User",
        "manager" => "Manager User",
        _ => "Employee User",
    }
}

fn currency_for_country(country: &str) -> &'static str {
    match country {
        "United States" => "USD",
        "United Kingdom" => "GBP",
        "India" => "INR",
        "Canada" => "CAD",
        "Australia" => "AUD",
        "Germany" | "France" => "EUR",
        "Japan" => "JPY",
        "China" => "CNY",
        _ => "USD",
    }
}
