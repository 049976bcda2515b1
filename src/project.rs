//! Project records and the ownership manager.
//!
//! Projects are admin-managed: create, transfer ownership, delete. Deleting a
//! project cascades to every task that references it; orphaned tasks must
//! never remain. Ownership transfer touches only the project row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::Session;
use crate::store::Repository;

/// One project row. `id` is assigned by the repository allocator and `owner`
/// references an account by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

/// Report produced by a cascading project deletion.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDeleteReport {
    pub id: u64,
    pub name: String,
    pub tasks_deleted: usize,
}

/// Admin-facing project operations over a repository.
#[derive(Debug, Clone)]
pub struct ProjectManager<R> {
    repo: R,
}

impl<R: Repository> ProjectManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a project. Admin only. Names are globally unique
    /// (case-sensitive exact match) and the owner must be a known account.
    pub fn create(&self, session: &Session, name: &str, owner: &str) -> Result<Project> {
        session.require_admin()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "project name cannot be empty".to_string(),
            ));
        }
        if self
            .repo
            .load_projects()?
            .iter()
            .any(|project| project.name == name)
        {
            return Err(Error::DuplicateName(name.to_string()));
        }
        if !self
            .repo
            .load_accounts()?
            .iter()
            .any(|account| account.username == owner)
        {
            return Err(Error::AccountNotFound(owner.to_string()));
        }

        let project = Project {
            id: self.repo.next_project_id()?,
            name: name.to_string(),
            owner: owner.to_string(),
            created_at: Utc::now(),
        };
        self.repo.upsert_project(project.clone())?;
        debug!(id = project.id, name = %project.name, owner = %project.owner, "project created");
        Ok(project)
    }

    /// Reassign a project to a new owner. Admin only; tasks are unaffected.
    pub fn transfer(&self, session: &Session, reference: &str, new_owner: &str) -> Result<Project> {
        session.require_admin()?;
        let mut project = self.resolve(reference)?;
        if !self
            .repo
            .load_accounts()?
            .iter()
            .any(|account| account.username == new_owner)
        {
            return Err(Error::AccountNotFound(new_owner.to_string()));
        }
        project.owner = new_owner.to_string();
        self.repo.upsert_project(project.clone())?;
        debug!(id = project.id, owner = %project.owner, "project transferred");
        Ok(project)
    }

    /// Delete a project and every task that references it. Admin only.
    pub fn delete(&self, session: &Session, reference: &str) -> Result<ProjectDeleteReport> {
        session.require_admin()?;
        let project = self.resolve(reference)?;
        let tasks_deleted = self.repo.remove_project_tasks(project.id)?;
        self.repo.remove_project(project.id)?;
        debug!(id = project.id, tasks_deleted, "project deleted");
        Ok(ProjectDeleteReport {
            id: project.id,
            name: project.name,
            tasks_deleted,
        })
    }

    /// Projects visible to the session: all of them for an admin, owned ones
    /// otherwise.
    pub fn list(&self, session: &Session) -> Result<Vec<Project>> {
        let projects = self.repo.load_projects()?;
        if session.is_admin() {
            return Ok(projects);
        }
        Ok(projects
            .into_iter()
            .filter(|project| project.owner == session.username)
            .collect())
    }

    /// Resolve a project by numeric id or exact name.
    pub fn resolve(&self, reference: &str) -> Result<Project> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::InvalidArgument(
                "project reference cannot be empty".to_string(),
            ));
        }
        let projects = self.repo.load_projects()?;
        if let Ok(id) = reference.parse::<u64>() {
            if let Some(project) = projects.iter().find(|project| project.id == id) {
                return Ok(project.clone());
            }
        }
        projects
            .into_iter()
            .find(|project| project.name == reference)
            .ok_or_else(|| Error::ProjectNotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, Role};
    use crate::store::MemoryRepository;

    fn manager_with_accounts(users: &[&str]) -> ProjectManager<MemoryRepository> {
        let repo = MemoryRepository::new();
        for user in users {
            repo.upsert_account(Account {
                username: user.to_string(),
                password: "hash".to_string(),
                role: Role::User,
                created_at: Utc::now(),
            })
            .unwrap();
        }
        ProjectManager::new(repo)
    }

    fn admin_session() -> Session {
        Session::for_account("root", Role::Admin)
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let manager = manager_with_accounts(&["alice"]);
        let session = admin_session();
        let first = manager.create(&session, "Alpha", "alice").unwrap();
        let second = manager.create(&session, "Beta", "alice").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let manager = manager_with_accounts(&["alice"]);
        let session = admin_session();
        manager.create(&session, "Alpha", "alice").unwrap();
        let err = manager.create(&session, "Alpha", "alice").unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[test]
    fn unknown_owner_is_rejected() {
        let manager = manager_with_accounts(&["alice"]);
        let session = admin_session();
        let err = manager.create(&session, "Alpha", "ghost").unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(_)));
    }

    #[test]
    fn transfer_round_trip_restores_owner() {
        let manager = manager_with_accounts(&["alice", "bob"]);
        let session = admin_session();
        let project = manager.create(&session, "Alpha", "alice").unwrap();

        let moved = manager
            .transfer(&session, &project.id.to_string(), "bob")
            .unwrap();
        assert_eq!(moved.owner, "bob");

        let back = manager
            .transfer(&session, &project.id.to_string(), "alice")
            .unwrap();
        assert_eq!(back.owner, "alice");
    }

    #[test]
    fn list_filters_by_owner_for_users() {
        let manager = manager_with_accounts(&["alice", "bob"]);
        let session = admin_session();
        manager.create(&session, "Alpha", "alice").unwrap();
        manager.create(&session, "Beta", "bob").unwrap();

        let alice = Session::for_account("alice", Role::User);
        let mine = manager.list(&alice).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Alpha");

        assert_eq!(manager.list(&session).unwrap().len(), 2);
    }

    #[test]
    fn resolve_by_id_and_name() {
        let manager = manager_with_accounts(&["alice"]);
        let session = admin_session();
        let project = manager.create(&session, "Alpha", "alice").unwrap();
        assert_eq!(manager.resolve("Alpha").unwrap().id, project.id);
        assert_eq!(manager.resolve(&project.id.to_string()).unwrap().name, "Alpha");
        assert!(manager.resolve("Gamma").is_err());
    }
}
