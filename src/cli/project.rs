//! `td project` - admin project management.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::ProjectManager;
use crate::session;

pub struct NewOptions {
    pub name: String,
    pub owner: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct TransferOptions {
    pub project: String,
    pub new_owner: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub project: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let manager = ProjectManager::new(ctx.repo);
    let project = manager.create(&session, &options.name, &options.owner)?;

    let mut human = HumanOutput::new(format!("Created project {}", project.name));
    human.push_summary("id", project.id.to_string());
    human.push_summary("owner", &project.owner);
    human.push_next_step(format!(
        "td task new {} --category <category> --description <text>",
        project.id
    ));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project new",
        &project,
        Some(&human),
    )
}

pub fn run_list(mine: bool, data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let ctx = super::load_ctx(data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let manager = ProjectManager::new(ctx.repo);
    let mut projects = manager.list(&session)?;
    if mine {
        projects.retain(|project| project.owner == session.username);
    }

    let mut human = HumanOutput::new(format!("{} project(s)", projects.len()));
    for project in &projects {
        human.push_detail(format!(
            "{} {} (owner: {})",
            project.id, project.name, project.owner
        ));
    }

    emit_success(
        OutputOptions { json, quiet },
        "project list",
        &projects,
        Some(&human),
    )
}

pub fn run_transfer(options: TransferOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let manager = ProjectManager::new(ctx.repo);
    let project = manager.transfer(&session, &options.project, &options.new_owner)?;

    let mut human = HumanOutput::new(format!(
        "Transferred project {} to {}",
        project.name, project.owner
    ));
    human.push_summary("id", project.id.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project transfer",
        &project,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let manager = ProjectManager::new(ctx.repo);
    let report = manager.delete(&session, &options.project)?;

    let mut human = HumanOutput::new(format!("Deleted project {}", report.name));
    human.push_summary("tasks deleted", report.tasks_deleted.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project rm",
        &report,
        Some(&human),
    )
}
