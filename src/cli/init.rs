//! `td init` - create the data directory and the bootstrap admin.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::account::AccountDirectory;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::{Meta, Repository};

pub struct InitOptions {
    pub admin: String,
    pub password: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct InitData {
    data_dir: String,
    bootstrap_admin: String,
}

pub fn run(options: InitOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    std::fs::create_dir_all(&ctx.data_dir)?;

    if ctx.repo.load_meta()?.is_some() {
        return Err(Error::InvalidArgument(format!(
            "store at {} is already initialized",
            ctx.data_dir.display()
        )));
    }

    let directory = AccountDirectory::new(ctx.repo.clone(), ctx.config.auth.clone());
    let account = directory.bootstrap(&options.admin, &options.password)?;
    ctx.repo.save_meta(&Meta {
        bootstrap_admin: account.username.clone(),
    })?;
    info!(data_dir = %ctx.data_dir.display(), admin = %account.username, "store initialized");

    let mut human = HumanOutput::new(format!(
        "Initialized store at {}",
        ctx.data_dir.display()
    ));
    human.push_summary("bootstrap admin", &account.username);
    human.push_next_step(format!(
        "td login {} --password <password>",
        account.username
    ));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "init",
        &InitData {
            data_dir: ctx.data_dir.display().to_string(),
            bootstrap_admin: account.username,
        },
        Some(&human),
    )
}
