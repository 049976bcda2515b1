//! Read-only projections over repository rows.
//!
//! Everything here is a pure function of its inputs: no store access, no
//! caching. Callers load fresh rows and derive views, so a view can never be
//! staler than the last acknowledged write.

use serde::Serialize;

use crate::account::{Account, Role};
use crate::project::Project;
use crate::task::{Category, Status, Task};

/// Task list filter. Empty fields mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<Status>,
    /// Include a task when its category is in the set; empty means all.
    pub categories: Vec<Category>,
    /// Case-insensitive substring match against description and task id.
    pub search: Option<String>,
}

impl TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&task.category) {
            return false;
        }
        if let Some(query) = self.search.as_deref() {
            let query = query.to_lowercase();
            let haystack_desc = task.description.to_lowercase();
            let haystack_id = task.task_id.to_lowercase();
            if !haystack_desc.contains(&query) && !haystack_id.contains(&query) {
                return false;
            }
        }
        true
    }
}

/// Tasks of one project matching a filter, lazily, in stored order.
/// Restartable by calling again over the same slice.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    project_id: u64,
    filter: &'a TaskFilter,
) -> impl Iterator<Item = &'a Task> + 'a {
    tasks
        .iter()
        .filter(move |task| task.project_id == project_id && filter.matches(task))
}

/// Projects owned by an identity, in stored order.
pub fn projects_owned_by<'a>(
    projects: &'a [Project],
    username: &'a str,
) -> impl Iterator<Item = &'a Project> + 'a {
    projects.iter().filter(move |project| project.owner == username)
}

/// Account listing row. Never exposes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct AccountRow {
    pub username: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The admin account table.
pub fn account_table(accounts: &[Account]) -> Vec<AccountRow> {
    accounts
        .iter()
        .map(|account| AccountRow {
            username: account.username.clone(),
            role: account.role,
            created_at: account.created_at,
        })
        .collect()
}
