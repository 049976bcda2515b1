//! The entity repository.
//!
//! The rest of the crate talks to storage through the [`Repository`] trait:
//! row-keyed load/upsert/remove per collection plus repository-owned id
//! allocators. There is deliberately no whole-collection save; two sessions
//! updating different rows can never clobber each other at the interface.
//!
//! [`JsonRepository`] is the file backend. Each collection is one JSON array
//! in the data directory:
//!
//! ```text
//! <data dir>/
//!   accounts.json               # account rows
//!   projects.json               # project rows
//!   tasks.json                  # task rows
//!   project.seq / task.seq      # allocator state
//!   meta.json                   # bootstrap admin identity
//!   session.json                # persisted login (see session module)
//!   .td.toml                    # optional configuration
//! ```
//!
//! Every mutation holds an exclusive lock on `<file>.lock` across its
//! read-modify-write cycle and lands with an atomic rename, so concurrent
//! processes serialize on the collection and readers never observe a torn
//! file. Object keys are normalized (trimmed, lowercased) on load so files
//! produced by hand or by imports with sloppy headers still parse.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::account::Account;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock};
use crate::project::Project;
use crate::task::Task;

/// First value handed out by the task sequence, so an empty store yields
/// ids like `PPC-101`.
pub const TASK_SEQ_START: u64 = 101;

/// First project id.
pub const PROJECT_SEQ_START: u64 = 1;

/// The three entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Accounts,
    Projects,
    Tasks,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Projects => "projects",
            Collection::Tasks => "tasks",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts.json",
            Collection::Projects => "projects.json",
            Collection::Tasks => "tasks.json",
        }
    }
}

/// Store-level metadata, written once by `td init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub bootstrap_admin: String,
}

/// Row-keyed storage contract for the three entity collections.
///
/// Implementations must make each method atomic with respect to concurrent
/// callers, and must keep the allocators strictly monotonic so generated
/// identifiers never collide.
pub trait Repository {
    fn load_accounts(&self) -> Result<Vec<Account>>;
    fn upsert_account(&self, account: Account) -> Result<()>;
    fn remove_account(&self, username: &str) -> Result<bool>;

    fn load_projects(&self) -> Result<Vec<Project>>;
    fn upsert_project(&self, project: Project) -> Result<()>;
    fn remove_project(&self, id: u64) -> Result<bool>;
    /// Move every project owned by `from` to `to`, returning how many moved.
    fn reassign_projects(&self, from: &str, to: &str) -> Result<usize>;
    fn next_project_id(&self) -> Result<u64>;

    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn upsert_task(&self, task: Task) -> Result<()>;
    fn remove_task(&self, task_id: &str) -> Result<bool>;
    /// Delete every task of a project in one step, returning the count.
    fn remove_project_tasks(&self, project_id: u64) -> Result<usize>;
    fn next_task_seq(&self) -> Result<u64>;

    fn load_meta(&self) -> Result<Option<Meta>>;
    fn save_meta(&self, meta: &Meta) -> Result<()>;
}

// =============================================================================
// JSON file backend
// =============================================================================

/// File-backed repository rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    data_dir: PathBuf,
    lock_timeout_ms: u64,
}

impl JsonRepository {
    pub fn open(data_dir: impl Into<PathBuf>, config: &StoreConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            lock_timeout_ms: config.lock_timeout_ms,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    fn meta_path(&self) -> PathBuf {
        self.data_dir.join("meta.json")
    }

    fn read_rows<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.collection_path(collection);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            // Missing collection = empty collection, not a failure.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::Io(err)),
        };
        let value: Value = serde_json::from_str(&raw).map_err(|err| {
            warn!(collection = collection.name(), %err, "malformed collection file");
            Error::StoreUnavailable {
                collection: collection.name().to_string(),
                reason: err.to_string(),
            }
        })?;
        let rows = match value {
            Value::Array(rows) => rows,
            other => {
                return Err(Error::StoreUnavailable {
                    collection: collection.name().to_string(),
                    reason: format!("expected a JSON array, found {}", type_name(&other)),
                })
            }
        };
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(normalize_keys(row)).map_err(|err| Error::StoreUnavailable {
                    collection: collection.name().to_string(),
                    reason: err.to_string(),
                })
            })
            .collect()
    }

    fn write_rows<T: Serialize>(&self, collection: Collection, rows: &[T]) -> Result<()> {
        let path = self.collection_path(collection);
        let mut data = serde_json::to_vec_pretty(rows)?;
        data.push(b'\n');
        lock::write_atomic(&path, &data)
    }

    /// Lock the collection, apply `apply` to its rows, write them back.
    fn mutate<T, O, F>(&self, collection: Collection, apply: F) -> Result<O>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> O,
    {
        let path = self.collection_path(collection);
        let _lock = FileLock::acquire(lock::lock_path_for(&path), self.lock_timeout_ms)?;
        let mut rows: Vec<T> = self.read_rows(collection)?;
        let outcome = apply(&mut rows);
        self.write_rows(collection, &rows)?;
        debug!(collection = collection.name(), rows = rows.len(), "collection written");
        Ok(outcome)
    }

    /// Allocate the next value from a counter file, starting at `start`.
    fn next_counter(&self, file_name: &str, start: u64) -> Result<u64> {
        let path = self.data_dir.join(file_name);
        let _lock = FileLock::acquire(lock::lock_path_for(&path), self.lock_timeout_ms)?;
        let next = match std::fs::read_to_string(&path) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| Error::StoreUnavailable {
                collection: file_name.to_string(),
                reason: format!("counter file is not a number: {}", raw.trim()),
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => start,
            Err(err) => return Err(Error::Io(err)),
        };
        lock::write_atomic(&path, format!("{}\n", next + 1).as_bytes())?;
        Ok(next)
    }
}

impl Repository for JsonRepository {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.read_rows(Collection::Accounts)
    }

    fn upsert_account(&self, account: Account) -> Result<()> {
        self.mutate(Collection::Accounts, |rows: &mut Vec<Account>| {
            match rows.iter_mut().find(|row| row.username == account.username) {
                Some(row) => *row = account,
                None => rows.push(account),
            }
        })
    }

    fn remove_account(&self, username: &str) -> Result<bool> {
        self.mutate(Collection::Accounts, |rows: &mut Vec<Account>| {
            let before = rows.len();
            rows.retain(|row| row.username != username);
            rows.len() != before
        })
    }

    fn load_projects(&self) -> Result<Vec<Project>> {
        self.read_rows(Collection::Projects)
    }

    fn upsert_project(&self, project: Project) -> Result<()> {
        self.mutate(Collection::Projects, |rows: &mut Vec<Project>| {
            match rows.iter_mut().find(|row| row.id == project.id) {
                Some(row) => *row = project,
                None => rows.push(project),
            }
        })
    }

    fn remove_project(&self, id: u64) -> Result<bool> {
        self.mutate(Collection::Projects, |rows: &mut Vec<Project>| {
            let before = rows.len();
            rows.retain(|row| row.id != id);
            rows.len() != before
        })
    }

    fn reassign_projects(&self, from: &str, to: &str) -> Result<usize> {
        self.mutate(Collection::Projects, |rows: &mut Vec<Project>| {
            let mut moved = 0;
            for row in rows.iter_mut() {
                if row.owner == from {
                    row.owner = to.to_string();
                    moved += 1;
                }
            }
            moved
        })
    }

    fn next_project_id(&self) -> Result<u64> {
        self.next_counter("project.seq", PROJECT_SEQ_START)
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read_rows(Collection::Tasks)
    }

    fn upsert_task(&self, task: Task) -> Result<()> {
        self.mutate(Collection::Tasks, |rows: &mut Vec<Task>| {
            match rows.iter_mut().find(|row| row.task_id == task.task_id) {
                Some(row) => *row = task,
                None => rows.push(task),
            }
        })
    }

    fn remove_task(&self, task_id: &str) -> Result<bool> {
        self.mutate(Collection::Tasks, |rows: &mut Vec<Task>| {
            let before = rows.len();
            rows.retain(|row| row.task_id != task_id);
            rows.len() != before
        })
    }

    fn remove_project_tasks(&self, project_id: u64) -> Result<usize> {
        self.mutate(Collection::Tasks, |rows: &mut Vec<Task>| {
            let before = rows.len();
            rows.retain(|row| row.project_id != project_id);
            before - rows.len()
        })
    }

    fn next_task_seq(&self) -> Result<u64> {
        self.next_counter("task.seq", TASK_SEQ_START)
    }

    fn load_meta(&self) -> Result<Option<Meta>> {
        let path = self.meta_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::Io(err)),
        };
        let meta = serde_json::from_str(&raw).map_err(|err| Error::StoreUnavailable {
            collection: "meta".to_string(),
            reason: err.to_string(),
        })?;
        Ok(Some(meta))
    }

    fn save_meta(&self, meta: &Meta) -> Result<()> {
        let path = self.meta_path();
        let _lock = FileLock::acquire(lock::lock_path_for(&path), self.lock_timeout_ms)?;
        lock::write_atomic(&path, &serde_json::to_vec_pretty(meta)?)
    }
}

/// Trim and lowercase the keys of a row object so schema lookups are
/// insensitive to source formatting. Non-object rows pass through and fail
/// typed deserialization with a useful message.
fn normalize_keys(row: Value) -> Value {
    match row {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.trim().to_ascii_lowercase(), value))
                .collect(),
        ),
        other => other,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// In-memory backend
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    accounts: Vec<Account>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    project_seq: u64,
    task_seq: u64,
    meta: Option<Meta>,
}

/// In-memory repository. Clones share state, which mirrors how two
/// `JsonRepository` handles share one data directory. Used by engine unit
/// tests and available as a seam for alternative backends.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<O>(&self, f: impl FnOnce(&mut MemoryInner) -> O) -> Result<O> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| Error::OperationFailed("memory repository poisoned".to_string()))?;
        Ok(f(&mut inner))
    }
}

impl Repository for MemoryRepository {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.with(|inner| inner.accounts.clone())
    }

    fn upsert_account(&self, account: Account) -> Result<()> {
        self.with(|inner| {
            match inner
                .accounts
                .iter_mut()
                .find(|row| row.username == account.username)
            {
                Some(row) => *row = account,
                None => inner.accounts.push(account),
            }
        })
    }

    fn remove_account(&self, username: &str) -> Result<bool> {
        self.with(|inner| {
            let before = inner.accounts.len();
            inner.accounts.retain(|row| row.username != username);
            inner.accounts.len() != before
        })
    }

    fn load_projects(&self) -> Result<Vec<Project>> {
        self.with(|inner| inner.projects.clone())
    }

    fn upsert_project(&self, project: Project) -> Result<()> {
        self.with(|inner| {
            match inner.projects.iter_mut().find(|row| row.id == project.id) {
                Some(row) => *row = project,
                None => inner.projects.push(project),
            }
        })
    }

    fn remove_project(&self, id: u64) -> Result<bool> {
        self.with(|inner| {
            let before = inner.projects.len();
            inner.projects.retain(|row| row.id != id);
            inner.projects.len() != before
        })
    }

    fn reassign_projects(&self, from: &str, to: &str) -> Result<usize> {
        self.with(|inner| {
            let mut moved = 0;
            for row in inner.projects.iter_mut() {
                if row.owner == from {
                    row.owner = to.to_string();
                    moved += 1;
                }
            }
            moved
        })
    }

    fn next_project_id(&self) -> Result<u64> {
        self.with(|inner| {
            let next = PROJECT_SEQ_START + inner.project_seq;
            inner.project_seq += 1;
            next
        })
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        self.with(|inner| inner.tasks.clone())
    }

    fn upsert_task(&self, task: Task) -> Result<()> {
        self.with(|inner| {
            match inner.tasks.iter_mut().find(|row| row.task_id == task.task_id) {
                Some(row) => *row = task,
                None => inner.tasks.push(task),
            }
        })
    }

    fn remove_task(&self, task_id: &str) -> Result<bool> {
        self.with(|inner| {
            let before = inner.tasks.len();
            inner.tasks.retain(|row| row.task_id != task_id);
            inner.tasks.len() != before
        })
    }

    fn remove_project_tasks(&self, project_id: u64) -> Result<usize> {
        self.with(|inner| {
            let before = inner.tasks.len();
            inner.tasks.retain(|row| row.project_id != project_id);
            before - inner.tasks.len()
        })
    }

    fn next_task_seq(&self) -> Result<u64> {
        self.with(|inner| {
            let next = TASK_SEQ_START + inner.task_seq;
            inner.task_seq += 1;
            next
        })
    }

    fn load_meta(&self) -> Result<Option<Meta>> {
        self.with(|inner| inner.meta.clone())
    }

    fn save_meta(&self, meta: &Meta) -> Result<()> {
        self.with(|inner| inner.meta = Some(meta.clone()))
    }
}
