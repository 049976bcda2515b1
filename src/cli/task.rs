//! `td task` - lifecycle commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::ProjectManager;
use crate::session;
use crate::task::{Category, EditTask, Half, NewTask, Status, Task, TaskEngine, REPORT_SUBS};
use crate::view::TaskFilter;

pub struct NewOptions {
    pub project: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub description: String,
    pub deadline: Option<String>,
    pub half: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub project: String,
    pub status: Option<String>,
    pub categories: Vec<String>,
    pub search: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub task_id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Which status edge a `run_transition` call walks.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    Complete,
    Reopen,
    Close,
    Unlock,
}

impl Action {
    fn command(&self) -> &'static str {
        match self {
            Action::Complete => "task complete",
            Action::Reopen => "task reopen",
            Action::Close => "task close",
            Action::Unlock => "task unlock",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Action::Complete => "completed",
            Action::Reopen => "reopened",
            Action::Close => "closed",
            Action::Unlock => "unlocked",
        }
    }
}

pub struct TransitionOptions {
    pub task_id: String,
    pub action: Action,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub task_id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub task_id: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub deadline: Option<String>,
    pub half: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

fn parse_deadline(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(format!("deadline must be YYYY-MM-DD, got: {raw}")))
}

fn task_human(header: String, task: &Task) -> HumanOutput {
    let mut human = HumanOutput::new(header);
    human.push_summary("id", &task.task_id);
    human.push_summary("status", task.status.as_str());
    human.push_summary("category", task.category.label());
    if !task.sub_category.is_empty() {
        human.push_summary("sub-category", &task.sub_category);
    }
    human.push_summary("description", &task.description);
    if let Some(date) = task.deadline_date {
        let deadline = match task.deadline_half {
            Some(half) => format!("{date} {half}"),
            None => date.to_string(),
        };
        human.push_summary("deadline", deadline);
    }
    human
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let project = ProjectManager::new(ctx.repo.clone()).resolve(&options.project)?;

    let input = NewTask {
        category: options.category.parse::<Category>()?,
        sub_category: options.sub_category,
        description: options.description,
        deadline_date: options.deadline.as_deref().map(parse_deadline).transpose()?,
        deadline_half: options
            .half
            .as_deref()
            .map(str::parse::<Half>)
            .transpose()?,
    };

    let engine = TaskEngine::new(ctx.repo, ctx.config.features);
    let task = engine.create(&session, project.id, input)?;

    let mut human = task_human(format!("Created task {}", task.task_id), &task);
    human.push_summary("project", &project.name);
    human.push_next_step(format!("td task complete {}", task.task_id));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task new",
        &task,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let project = ProjectManager::new(ctx.repo.clone()).resolve(&options.project)?;

    let filter = TaskFilter {
        status: options
            .status
            .as_deref()
            .map(str::parse::<Status>)
            .transpose()?,
        categories: options
            .categories
            .iter()
            .map(|raw| raw.parse::<Category>())
            .collect::<Result<Vec<_>>>()?,
        search: options.search,
    };

    let engine = TaskEngine::new(ctx.repo, ctx.config.features);
    let tasks = engine.list(&session, project.id, &filter)?;

    let mut human = HumanOutput::new(format!(
        "{} task(s) in {}",
        tasks.len(),
        project.name
    ));
    for task in &tasks {
        let mut line = format!(
            "{} [{}] {} - {}",
            task.task_id,
            task.status,
            task.category.label(),
            task.description
        );
        if let Some(date) = task.deadline_date {
            line.push_str(&format!(" (due {date}"));
            if let Some(half) = task.deadline_half {
                line.push_str(&format!(" {half}"));
            }
            line.push(')');
        }
        human.push_detail(line);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task list",
        &tasks,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let engine = TaskEngine::new(ctx.repo.clone(), ctx.config.features);
    let task = engine.get(&options.task_id)?;
    // visibility follows project ownership
    let filter = TaskFilter::default();
    engine.list(&session, task.project_id, &filter)?;

    let mut human = task_human(format!("Task {}", task.task_id), &task);
    human.push_summary("created by", &task.created_by);
    human.push_summary("updated", task.updated_at.to_rfc3339());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task show",
        &task,
        Some(&human),
    )
}

pub fn run_transition(options: TransitionOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let engine = TaskEngine::new(ctx.repo, ctx.config.features);

    let task = match options.action {
        Action::Complete => engine.complete(&session, &options.task_id)?,
        Action::Reopen => engine.reopen(&session, &options.task_id)?,
        Action::Close => engine.close(&session, &options.task_id)?,
        Action::Unlock => engine.unlock(&session, &options.task_id)?,
    };

    let human = task_human(
        format!("Task {} {}", task.task_id, options.action.past_tense()),
        &task,
    );

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        options.action.command(),
        &task,
        Some(&human),
    )
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let engine = TaskEngine::new(ctx.repo, ctx.config.features);
    engine.delete(&session, &options.task_id)?;

    #[derive(Serialize)]
    struct DeleteData {
        task_id: String,
        deleted: bool,
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task delete",
        &DeleteData {
            task_id: options.task_id.clone(),
            deleted: true,
        },
        Some(&HumanOutput::new(format!(
            "Deleted task {}",
            options.task_id
        ))),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;

    let changes = EditTask {
        description: options.description,
        category: options
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?,
        sub_category: options.sub_category,
        deadline_date: options.deadline.as_deref().map(parse_deadline).transpose()?,
        deadline_half: options
            .half
            .as_deref()
            .map(str::parse::<Half>)
            .transpose()?,
    };

    let engine = TaskEngine::new(ctx.repo, ctx.config.features);
    let task = engine.edit(&session, &options.task_id, changes)?;

    let human = task_human(format!("Updated task {}", task.task_id), &task);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task edit",
        &task,
        Some(&human),
    )
}

pub fn run_categories(data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let ctx = super::load_ctx(data_dir)?;

    let categories: Vec<&str> = Category::ALL
        .iter()
        .filter(|category| {
            ctx.config.features.others_category || **category != Category::Others
        })
        .map(Category::label)
        .collect();

    #[derive(Serialize)]
    struct CategoriesData {
        categories: Vec<&'static str>,
        report_sub_categories: Vec<&'static str>,
    }

    let mut human = HumanOutput::new("Task categories");
    for label in &categories {
        human.push_detail(*label);
    }
    human.push_summary("report sub-categories", REPORT_SUBS.join(", "));

    emit_success(
        OutputOptions { json, quiet },
        "task categories",
        &CategoriesData {
            categories,
            report_sub_categories: REPORT_SUBS.to_vec(),
        },
        Some(&human),
    )
}
