//! Task records and the lifecycle engine.
//!
//! Tasks belong to a project and move pending -> completed -> closed. The
//! pending/completed edge is reversible; closed is terminal for owners, with
//! an optional admin-only unlock back to pending and an optional delete from
//! closed (both config toggles). Editing is only allowed while pending.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::config::FeaturesConfig;
use crate::error::{Error, Result};
use crate::ident;
use crate::project::Project;
use crate::session::Session;
use crate::store::Repository;
use crate::view::{self, TaskFilter};

/// Sub-category labels valid when category is `Report`.
pub const REPORT_SUBS: [&str; 6] = [
    "Weekly report",
    "PPC report",
    "CP aggregation report",
    "Pre-Sales report",
    "TVA",
    "Others",
];

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
    Closed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
            Status::Closed => "closed",
        }
    }

    pub const ALL: [Status; 3] = [Status::Pending, Status::Completed, Status::Closed];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            "closed" => Ok(Status::Closed),
            other => Err(Error::InvalidArgument(format!("unknown status: {other}"))),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Work category. The label drives the task id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Design,
    Copy,
    Video,
    Ppc,
    WebDev,
    Report,
    Others,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Design => "Design",
            Category::Copy => "Copy",
            Category::Video => "Video",
            Category::Ppc => "PPC",
            Category::WebDev => "Web Dev",
            Category::Report => "Report",
            Category::Others => "Others",
        }
    }

    pub const ALL: [Category; 7] = [
        Category::Design,
        Category::Copy,
        Category::Video,
        Category::Ppc,
        Category::WebDev,
        Category::Report,
        Category::Others,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept "Web Dev", "web-dev", "webdev", etc.
        let needle: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match needle.as_str() {
            "design" => Ok(Category::Design),
            "copy" => Ok(Category::Copy),
            "video" => Ok(Category::Video),
            "ppc" => Ok(Category::Ppc),
            "webdev" => Ok(Category::WebDev),
            "report" => Ok(Category::Report),
            "others" => Ok(Category::Others),
            _ => Err(Error::UnknownCategory(s.trim().to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Deadline granularity finer than a date: first or second half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    First,
    Second,
}

impl Half {
    pub fn as_str(&self) -> &'static str {
        match self {
            Half::First => "FH",
            Half::Second => "SH",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Half {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fh" => Ok(Half::First),
            "sh" => Ok(Half::Second),
            other => Err(Error::InvalidArgument(format!(
                "deadline half must be FH or SH, got: {other}"
            ))),
        }
    }
}

impl Serialize for Half {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Half {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One task row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub project_id: u64,
    pub category: Category,
    /// Populated only when `category` is `Report`, empty otherwise.
    #[serde(default)]
    pub sub_category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_half: Option<Half>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

/// Input for task creation.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub category: Category,
    pub sub_category: Option<String>,
    pub description: String,
    pub deadline_date: Option<NaiveDate>,
    pub deadline_half: Option<Half>,
}

/// Field changes for `edit`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EditTask {
    pub description: Option<String>,
    pub category: Option<Category>,
    pub sub_category: Option<String>,
    pub deadline_date: Option<NaiveDate>,
    pub deadline_half: Option<Half>,
}

impl EditTask {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.sub_category.is_none()
            && self.deadline_date.is_none()
            && self.deadline_half.is_none()
    }
}

/// The task lifecycle engine over a repository.
#[derive(Debug, Clone)]
pub struct TaskEngine<R> {
    repo: R,
    features: FeaturesConfig,
}

impl<R: Repository> TaskEngine<R> {
    pub fn new(repo: R, features: FeaturesConfig) -> Self {
        Self { repo, features }
    }

    /// Create a pending task on a project the session owns.
    pub fn create(&self, session: &Session, project_id: u64, input: NewTask) -> Result<Task> {
        self.authorize(session, project_id)?;
        self.check_category(input.category)?;
        let description = input.description.trim().to_string();
        if description.is_empty() {
            return Err(Error::InvalidArgument(
                "task description cannot be empty".to_string(),
            ));
        }
        let sub_category = resolve_sub_category(input.category, input.sub_category.as_deref())?;

        let task_id = ident::next_task_id(&self.repo, input.category)?;
        let now = Utc::now();
        let task = Task {
            task_id,
            project_id,
            category: input.category,
            sub_category,
            description,
            deadline_date: input.deadline_date,
            deadline_half: input.deadline_half,
            status: Status::Pending,
            created_at: now,
            updated_at: now,
            created_by: session.username.clone(),
        };
        self.repo.upsert_task(task.clone())?;
        debug!(task_id = %task.task_id, project_id, "task created");
        Ok(task)
    }

    /// Pending -> Completed.
    pub fn complete(&self, session: &Session, task_id: &str) -> Result<Task> {
        self.transition(session, task_id, "complete", Status::Pending, Status::Completed)
    }

    /// Completed -> Pending (re-open).
    pub fn reopen(&self, session: &Session, task_id: &str) -> Result<Task> {
        self.transition(session, task_id, "reopen", Status::Completed, Status::Pending)
    }

    /// Pending or Completed -> Closed. Closing a closed task is rejected, so
    /// the operation never double-applies.
    pub fn close(&self, session: &Session, task_id: &str) -> Result<Task> {
        let mut task = self.get(task_id)?;
        self.authorize(session, task.project_id)?;
        if task.status == Status::Closed {
            return Err(Error::InvalidTransition {
                task_id: task.task_id,
                status: Status::Closed.to_string(),
                action: "close".to_string(),
            });
        }
        task.status = Status::Closed;
        task.updated_at = Utc::now();
        self.repo.upsert_task(task.clone())?;
        debug!(task_id = %task.task_id, "task closed");
        Ok(task)
    }

    /// Closed -> Pending. Admin only, and only when enabled by config.
    pub fn unlock(&self, session: &Session, task_id: &str) -> Result<Task> {
        if !self.features.admin_unlock {
            return Err(Error::CapabilityDisabled("admin unlock".to_string()));
        }
        session.require_admin()?;
        let mut task = self.get(task_id)?;
        if task.status != Status::Closed {
            return Err(Error::InvalidTransition {
                task_id: task.task_id,
                status: task.status.to_string(),
                action: "unlock".to_string(),
            });
        }
        task.status = Status::Pending;
        task.updated_at = Utc::now();
        self.repo.upsert_task(task.clone())?;
        debug!(task_id = %task.task_id, "task unlocked");
        Ok(task)
    }

    /// Delete a closed task. Only when enabled by config.
    pub fn delete(&self, session: &Session, task_id: &str) -> Result<()> {
        if !self.features.closed_delete {
            return Err(Error::CapabilityDisabled("closed task deletion".to_string()));
        }
        let task = self.get(task_id)?;
        self.authorize(session, task.project_id)?;
        if task.status != Status::Closed {
            return Err(Error::InvalidTransition {
                task_id: task.task_id,
                status: task.status.to_string(),
                action: "delete".to_string(),
            });
        }
        self.repo.remove_task(task_id)?;
        debug!(task_id, "task deleted");
        Ok(())
    }

    /// Edit task fields. Only pending tasks may change.
    pub fn edit(&self, session: &Session, task_id: &str, changes: EditTask) -> Result<Task> {
        let mut task = self.get(task_id)?;
        self.authorize(session, task.project_id)?;
        if task.status != Status::Pending {
            return Err(Error::InvalidStateForEdit(task.task_id));
        }
        if changes.is_empty() {
            return Err(Error::InvalidArgument("no fields to edit".to_string()));
        }

        if let Some(description) = changes.description {
            let description = description.trim().to_string();
            if description.is_empty() {
                return Err(Error::InvalidArgument(
                    "task description cannot be empty".to_string(),
                ));
            }
            task.description = description;
        }
        if let Some(category) = changes.category {
            self.check_category(category)?;
            task.category = category;
            // Changing away from Report drops the sub-category; changing to
            // Report requires one (either kept or supplied below).
            if category != Category::Report {
                task.sub_category = String::new();
            }
        }
        if let Some(sub) = changes.sub_category.as_deref() {
            task.sub_category = resolve_sub_category(task.category, Some(sub))?;
        } else if task.category == Category::Report && task.sub_category.is_empty() {
            return Err(Error::InvalidArgument(
                "category Report requires a sub-category".to_string(),
            ));
        }
        if let Some(date) = changes.deadline_date {
            task.deadline_date = Some(date);
        }
        if let Some(half) = changes.deadline_half {
            task.deadline_half = Some(half);
        }

        task.updated_at = Utc::now();
        self.repo.upsert_task(task.clone())?;
        debug!(task_id = %task.task_id, "task edited");
        Ok(task)
    }

    /// Filtered task list for a project the session may see, in stored order.
    pub fn list(&self, session: &Session, project_id: u64, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.authorize(session, project_id)?;
        let tasks = self.repo.load_tasks()?;
        Ok(view::filter_tasks(&tasks, project_id, filter)
            .cloned()
            .collect())
    }

    /// Look up one task by id.
    pub fn get(&self, task_id: &str) -> Result<Task> {
        self.repo
            .load_tasks()?
            .into_iter()
            .find(|task| task.task_id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }

    fn transition(
        &self,
        session: &Session,
        task_id: &str,
        action: &str,
        from: Status,
        to: Status,
    ) -> Result<Task> {
        let mut task = self.get(task_id)?;
        self.authorize(session, task.project_id)?;
        if task.status != from {
            return Err(Error::InvalidTransition {
                task_id: task.task_id,
                status: task.status.to_string(),
                action: action.to_string(),
            });
        }
        task.status = to;
        task.updated_at = Utc::now();
        self.repo.upsert_task(task.clone())?;
        debug!(task_id = %task.task_id, action, status = %task.status, "task transition");
        Ok(task)
    }

    fn authorize(&self, session: &Session, project_id: u64) -> Result<Project> {
        let project = self
            .repo
            .load_projects()?
            .into_iter()
            .find(|project| project.id == project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))?;
        session.require_owner_or_admin(&project)?;
        Ok(project)
    }

    fn check_category(&self, category: Category) -> Result<()> {
        if category == Category::Others && !self.features.others_category {
            return Err(Error::UnknownCategory(category.label().to_string()));
        }
        Ok(())
    }
}

/// Normalize a sub-category against the category it belongs to.
///
/// Non-Report categories must not carry one; Report requires one of
/// [`REPORT_SUBS`] (matched case-insensitively, stored canonically).
fn resolve_sub_category(category: Category, sub: Option<&str>) -> Result<String> {
    let sub = sub.map(str::trim).filter(|s| !s.is_empty());
    if category != Category::Report {
        return match sub {
            None => Ok(String::new()),
            Some(_) => Err(Error::InvalidArgument(format!(
                "sub-category only applies to Report tasks, not {category}"
            ))),
        };
    }
    let sub = sub.ok_or_else(|| {
        Error::InvalidArgument("category Report requires a sub-category".to_string())
    })?;
    REPORT_SUBS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(sub))
        .map(|known| known.to_string())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "unknown report sub-category: {sub} (expected one of: {})",
                REPORT_SUBS.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, Role};
    use crate::store::MemoryRepository;

    fn engine() -> (TaskEngine<MemoryRepository>, Session, Session) {
        let repo = MemoryRepository::new();
        for (user, role) in [("alice", Role::User), ("root", Role::Admin)] {
            repo.upsert_account(Account {
                username: user.to_string(),
                password: "hash".to_string(),
                role,
                created_at: Utc::now(),
            })
            .unwrap();
        }
        repo.upsert_project(Project {
            id: 1,
            name: "Launch".to_string(),
            owner: "alice".to_string(),
            created_at: Utc::now(),
        })
        .unwrap();
        let engine = TaskEngine::new(repo, FeaturesConfig::default());
        (
            engine,
            Session::for_account("alice", Role::User),
            Session::for_account("root", Role::Admin),
        )
    }

    fn ppc_task(description: &str) -> NewTask {
        NewTask {
            category: Category::Ppc,
            sub_category: None,
            description: description.to_string(),
            deadline_date: None,
            deadline_half: None,
        }
    }

    #[test]
    fn first_task_id_is_prefix_101() {
        let (engine, alice, _) = engine();
        let task = engine.create(&alice, 1, ppc_task("draft ad copy")).unwrap();
        assert_eq!(task.task_id, "PPC-101");
        assert_eq!(task.status, Status::Pending);
        assert!(task.sub_category.is_empty());
    }

    #[test]
    fn empty_description_is_rejected() {
        let (engine, alice, _) = engine();
        let err = engine.create(&alice, 1, ppc_task("   ")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(engine.repo.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn report_requires_known_sub_category() {
        let (engine, alice, _) = engine();
        let mut input = ppc_task("weekly numbers");
        input.category = Category::Report;
        assert!(engine.create(&alice, 1, input.clone()).is_err());

        input.sub_category = Some("weekly REPORT".to_string());
        let task = engine.create(&alice, 1, input.clone()).unwrap();
        assert_eq!(task.sub_category, "Weekly report");

        input.sub_category = Some("Quarterly report".to_string());
        assert!(engine.create(&alice, 1, input).is_err());
    }

    #[test]
    fn sub_category_rejected_outside_report() {
        let (engine, alice, _) = engine();
        let mut input = ppc_task("draft");
        input.sub_category = Some("TVA".to_string());
        assert!(engine.create(&alice, 1, input).is_err());
    }

    #[test]
    fn non_owner_cannot_touch_project_tasks() {
        let (engine, alice, _) = engine();
        engine.repo
            .upsert_account(Account {
                username: "bob".to_string(),
                password: "hash".to_string(),
                role: Role::User,
                created_at: Utc::now(),
            })
            .unwrap();
        let bob = Session::for_account("bob", Role::User);
        assert!(matches!(
            engine.create(&bob, 1, ppc_task("sneaky")).unwrap_err(),
            Error::Unauthorized(_)
        ));
        let task = engine.create(&alice, 1, ppc_task("real")).unwrap();
        assert!(matches!(
            engine.complete(&bob, &task.task_id).unwrap_err(),
            Error::Unauthorized(_)
        ));
    }

    #[test]
    fn admin_may_act_on_any_project() {
        let (engine, alice, root) = engine();
        let task = engine.create(&alice, 1, ppc_task("draft")).unwrap();
        engine.complete(&root, &task.task_id).unwrap();
    }

    #[test]
    fn lifecycle_transitions() {
        let (engine, alice, _) = engine();
        let task = engine.create(&alice, 1, ppc_task("draft")).unwrap();
        let id = task.task_id.clone();

        // reopen before completion is invalid
        assert!(matches!(
            engine.reopen(&alice, &id).unwrap_err(),
            Error::InvalidTransition { .. }
        ));

        let task = engine.complete(&alice, &id).unwrap();
        assert_eq!(task.status, Status::Completed);

        // completing twice is invalid
        assert!(engine.complete(&alice, &id).is_err());

        let task = engine.reopen(&alice, &id).unwrap();
        assert_eq!(task.status, Status::Pending);

        let task = engine.close(&alice, &id).unwrap();
        assert_eq!(task.status, Status::Closed);

        // closing a closed task is rejected, never double-applied
        assert!(matches!(
            engine.close(&alice, &id).unwrap_err(),
            Error::InvalidTransition { .. }
        ));
    }

    #[test]
    fn unlock_is_admin_only_and_gated() {
        let (engine, alice, root) = engine();
        let task = engine.create(&alice, 1, ppc_task("draft")).unwrap();
        engine.close(&alice, &task.task_id).unwrap();

        assert!(matches!(
            engine.unlock(&alice, &task.task_id).unwrap_err(),
            Error::Unauthorized(_)
        ));
        let task = engine.unlock(&root, &task.task_id).unwrap();
        assert_eq!(task.status, Status::Pending);

        let disabled = TaskEngine::new(
            engine.repo.clone(),
            FeaturesConfig {
                admin_unlock: false,
                ..FeaturesConfig::default()
            },
        );
        engine.close(&alice, &task.task_id).unwrap();
        assert!(matches!(
            disabled.unlock(&root, &task.task_id).unwrap_err(),
            Error::CapabilityDisabled(_)
        ));
    }

    #[test]
    fn delete_requires_toggle_and_closed_state() {
        let (engine, alice, _) = engine();
        let task = engine.create(&alice, 1, ppc_task("draft")).unwrap();
        assert!(matches!(
            engine.delete(&alice, &task.task_id).unwrap_err(),
            Error::CapabilityDisabled(_)
        ));

        let enabled = TaskEngine::new(
            engine.repo.clone(),
            FeaturesConfig {
                closed_delete: true,
                ..FeaturesConfig::default()
            },
        );
        assert!(matches!(
            enabled.delete(&alice, &task.task_id).unwrap_err(),
            Error::InvalidTransition { .. }
        ));
        enabled.close(&alice, &task.task_id).unwrap();
        enabled.delete(&alice, &task.task_id).unwrap();
        assert!(enabled.get(&task.task_id).is_err());
    }

    #[test]
    fn edit_only_while_pending() {
        let (engine, alice, _) = engine();
        let task = engine.create(&alice, 1, ppc_task("draft")).unwrap();
        let id = task.task_id.clone();

        let edited = engine
            .edit(
                &alice,
                &id,
                EditTask {
                    description: Some("draft ad copy v2".to_string()),
                    deadline_date: Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
                    deadline_half: Some(Half::First),
                    ..EditTask::default()
                },
            )
            .unwrap();
        assert_eq!(edited.description, "draft ad copy v2");
        assert_eq!(edited.deadline_half, Some(Half::First));

        engine.complete(&alice, &id).unwrap();
        let err = engine
            .edit(
                &alice,
                &id,
                EditTask {
                    description: Some("nope".to_string()),
                    ..EditTask::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidStateForEdit(_)));
        assert_eq!(engine.get(&id).unwrap().description, "draft ad copy v2");
    }

    #[test]
    fn edit_category_manages_sub_category() {
        let (engine, alice, _) = engine();
        let task = engine
            .create(
                &alice,
                1,
                NewTask {
                    category: Category::Report,
                    sub_category: Some("TVA".to_string()),
                    description: "numbers".to_string(),
                    deadline_date: None,
                    deadline_half: None,
                },
            )
            .unwrap();

        // leaving Report clears the sub-category
        let edited = engine
            .edit(
                &alice,
                &task.task_id,
                EditTask {
                    category: Some(Category::Design),
                    ..EditTask::default()
                },
            )
            .unwrap();
        assert!(edited.sub_category.is_empty());

        // coming back to Report needs a sub-category again
        assert!(engine
            .edit(
                &alice,
                &task.task_id,
                EditTask {
                    category: Some(Category::Report),
                    ..EditTask::default()
                },
            )
            .is_err());
    }

    #[test]
    fn others_category_can_be_disabled() {
        let (engine, alice, _) = engine();
        let strict = TaskEngine::new(
            engine.repo.clone(),
            FeaturesConfig {
                others_category: false,
                ..FeaturesConfig::default()
            },
        );
        let mut input = ppc_task("misc");
        input.category = Category::Others;
        assert!(matches!(
            strict.create(&alice, 1, input).unwrap_err(),
            Error::UnknownCategory(_)
        ));
    }

    #[test]
    fn list_filters_by_status() {
        let (engine, alice, _) = engine();
        let a = engine.create(&alice, 1, ppc_task("one")).unwrap();
        let _b = engine.create(&alice, 1, ppc_task("two")).unwrap();
        engine.complete(&alice, &a.task_id).unwrap();

        let pending = engine
            .list(
                &alice,
                1,
                &TaskFilter {
                    status: Some(Status::Pending),
                    ..TaskFilter::default()
                },
            )
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].description, "two");
    }

    #[test]
    fn category_parsing_variants() {
        assert_eq!("web-dev".parse::<Category>().unwrap(), Category::WebDev);
        assert_eq!("Web Dev".parse::<Category>().unwrap(), Category::WebDev);
        assert_eq!("ppc".parse::<Category>().unwrap(), Category::Ppc);
        assert!("gardening".parse::<Category>().is_err());
    }
}
