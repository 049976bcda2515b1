//! Session management.
//!
//! A session is the explicit `{username, role}` object every gated operation
//! receives; nothing in the core reads ambient login state. The CLI persists
//! the session as `session.json` in the data directory between invocations,
//! and every command re-resolves it against the accounts collection, so a
//! deleted account or a changed role takes effect immediately.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::account::Role;
use crate::auth;
use crate::error::{Error, Result};
use crate::project::Project;
use crate::store::Repository;

const SESSION_FILE: &str = "session.json";

/// An authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Build a session for an account without persisting it.
    pub fn for_account(username: impl Into<String>, role: Role) -> Self {
        Self {
            id: Ulid::new().to_string(),
            username: username.into(),
            role,
            logged_in_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "{} is not an admin",
                self.username
            )))
        }
    }

    pub fn require_owner_or_admin(&self, project: &Project) -> Result<()> {
        if self.is_admin() || self.username == project.owner {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "project {} is owned by {}",
                project.name, project.owner
            )))
        }
    }
}

fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

/// Verify credentials and persist the session.
pub fn login<R: Repository>(
    repo: &R,
    data_dir: &Path,
    username: &str,
    password: &str,
) -> Result<Session> {
    let account = auth::authenticate(repo, username, password)?;
    let session = Session::for_account(account.username, account.role);
    let data = serde_json::to_vec_pretty(&session)?;
    crate::lock::write_atomic(session_path(data_dir), &data)?;
    Ok(session)
}

/// Remove the persisted session. Returns whether one existed.
pub fn logout(data_dir: &Path) -> Result<bool> {
    let path = session_path(data_dir);
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)?;
    Ok(true)
}

/// Load the persisted session and re-resolve it against the accounts
/// collection. Missing file, deleted account, or unreadable session all
/// surface as `NotLoggedIn`; the role always comes from the current account
/// row, not the file.
pub fn current<R: Repository>(repo: &R, data_dir: &Path) -> Result<Session> {
    let path = session_path(data_dir);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(Error::NotLoggedIn),
        Err(err) => return Err(Error::Io(err)),
    };
    let mut session: Session = serde_json::from_str(&raw).map_err(|_| Error::NotLoggedIn)?;

    let account = repo
        .load_accounts()?
        .into_iter()
        .find(|account| account.username == session.username);
    match account {
        Some(account) => {
            session.role = account.role;
            Ok(session)
        }
        None => {
            // The account is gone; the stale session file goes with it.
            let _ = std::fs::remove_file(path);
            Err(Error::NotLoggedIn)
        }
    }
}
