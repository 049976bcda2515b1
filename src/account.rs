//! Account records and the account directory.
//!
//! Accounts are created and deleted by admins only; there is no self-service
//! signup. Deleting an account that still owns projects requires a successor,
//! which inherits every owned project before the account row is removed. The
//! bootstrap admin (recorded at `td init`) and the last remaining admin can
//! never be deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::auth;
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::store::Repository;

/// Account role. Admins manage accounts and projects; users work tasks on
/// projects they own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(Error::InvalidArgument(format!("unknown role: {other}"))),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One account row. The password field holds an argon2id PHC string, never
/// plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Admin-facing account operations over a repository.
#[derive(Debug, Clone)]
pub struct AccountDirectory<R> {
    repo: R,
    auth: AuthConfig,
}

impl<R: Repository> AccountDirectory<R> {
    pub fn new(repo: R, auth: AuthConfig) -> Self {
        Self { repo, auth }
    }

    /// Create an account. Admin only; usernames are case-sensitive and
    /// unique.
    pub fn create(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Account> {
        session.require_admin()?;
        let account = self.new_account(username, password, role)?;
        self.repo.upsert_account(account.clone())?;
        debug!(username = %account.username, role = %account.role, "account created");
        Ok(account)
    }

    /// Create the bootstrap admin without a session. Fails when the store
    /// already has accounts.
    pub fn bootstrap(&self, username: &str, password: &str) -> Result<Account> {
        if !self.repo.load_accounts()?.is_empty() {
            return Err(Error::InvalidArgument(
                "store already initialized: accounts exist".to_string(),
            ));
        }
        let account = self.new_account(username, password, Role::Admin)?;
        self.repo.upsert_account(account.clone())?;
        Ok(account)
    }

    /// List all accounts. Admin only.
    pub fn list(&self, session: &Session) -> Result<Vec<Account>> {
        session.require_admin()?;
        self.repo.load_accounts()
    }

    /// Delete an account, transferring owned projects to `successor` first.
    ///
    /// Rejected for the bootstrap admin and for the last remaining admin.
    /// Without a successor the account must not own any project.
    pub fn delete(
        &self,
        session: &Session,
        username: &str,
        successor: Option<&str>,
    ) -> Result<usize> {
        session.require_admin()?;
        let accounts = self.repo.load_accounts()?;
        let target = accounts
            .iter()
            .find(|account| account.username == username)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))?;

        if let Some(meta) = self.repo.load_meta()? {
            if meta.bootstrap_admin == username {
                return Err(Error::BootstrapAdmin(username.to_string()));
            }
        }
        if target.role == Role::Admin {
            let admins = accounts
                .iter()
                .filter(|account| account.role == Role::Admin)
                .count();
            if admins <= 1 {
                return Err(Error::LastAdmin(username.to_string()));
            }
        }

        let owned = self
            .repo
            .load_projects()?
            .into_iter()
            .filter(|project| project.owner == username)
            .count();
        let mut transferred = 0;
        if owned > 0 {
            let successor = successor.ok_or(Error::HasOwnedProjects {
                username: username.to_string(),
                count: owned,
            })?;
            if successor == username {
                return Err(Error::InvalidArgument(
                    "successor must be a different account".to_string(),
                ));
            }
            if !accounts.iter().any(|account| account.username == successor) {
                return Err(Error::AccountNotFound(successor.to_string()));
            }
            transferred = self.repo.reassign_projects(username, successor)?;
            debug!(from = username, to = successor, transferred, "projects reassigned");
        }

        self.repo.remove_account(username)?;
        debug!(username, "account deleted");
        Ok(transferred)
    }

    /// Look up one account by exact username.
    pub fn get(&self, username: &str) -> Result<Account> {
        self.repo
            .load_accounts()?
            .into_iter()
            .find(|account| account.username == username)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))
    }

    fn new_account(&self, username: &str, password: &str, role: Role) -> Result<Account> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidArgument(
                "username cannot be empty".to_string(),
            ));
        }
        auth::validate_password(password, self.auth.min_password_len)?;
        if self
            .repo
            .load_accounts()?
            .iter()
            .any(|account| account.username == username)
        {
            return Err(Error::DuplicateUsername(username.to_string()));
        }
        Ok(Account {
            username: username.to_string(),
            password: auth::hash_password(password)?,
            role,
            created_at: Utc::now(),
        })
    }
}
