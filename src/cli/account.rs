//! `td account` - admin account management.

use std::path::PathBuf;

use serde::Serialize;

use crate::account::{AccountDirectory, Role};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session;
use crate::view;

pub struct NewOptions {
    pub username: String,
    pub password: String,
    pub role: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub username: String,
    pub successor: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let role = options.role.parse::<Role>()?;
    let directory = AccountDirectory::new(ctx.repo, ctx.config.auth.clone());
    let account = directory.create(&session, &options.username, &options.password, role)?;

    let mut human = HumanOutput::new(format!("Created account {}", account.username));
    human.push_summary("role", account.role.as_str());

    #[derive(Serialize)]
    struct AccountData {
        username: String,
        role: Role,
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "account new",
        &AccountData {
            username: account.username.clone(),
            role: account.role,
        },
        Some(&human),
    )
}

pub fn run_list(data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let ctx = super::load_ctx(data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let directory = AccountDirectory::new(ctx.repo, ctx.config.auth.clone());
    let accounts = directory.list(&session)?;
    let table = view::account_table(&accounts);

    let mut human = HumanOutput::new(format!("{} account(s)", table.len()));
    for row in &table {
        human.push_detail(format!("{} ({})", row.username, row.role));
    }

    emit_success(
        OutputOptions { json, quiet },
        "account list",
        &table,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;
    let directory = AccountDirectory::new(ctx.repo, ctx.config.auth.clone());
    let transferred =
        directory.delete(&session, &options.username, options.successor.as_deref())?;

    #[derive(Serialize)]
    struct RmData {
        username: String,
        projects_transferred: usize,
    }

    let mut human = HumanOutput::new(format!("Deleted account {}", options.username));
    if transferred > 0 {
        human.push_summary("projects transferred", transferred.to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "account rm",
        &RmData {
            username: options.username.clone(),
            projects_transferred: transferred,
        },
        Some(&human),
    )
}
