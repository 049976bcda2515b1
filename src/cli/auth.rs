//! `td login`, `td logout`, and `td whoami`.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session;

pub struct LoginOptions {
    pub username: String,
    pub password: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct SessionData {
    username: String,
    role: String,
    logged_in_at: chrono::DateTime<chrono::Utc>,
}

pub fn run_login(options: LoginOptions) -> Result<()> {
    let ctx = super::load_ctx(options.data_dir)?;
    let session = session::login(&ctx.repo, &ctx.data_dir, &options.username, &options.password)?;
    info!(username = %session.username, "logged in");

    let mut human = HumanOutput::new(format!("Logged in as {}", session.username));
    human.push_summary("role", session.role.as_str());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "login",
        &SessionData {
            username: session.username.clone(),
            role: session.role.to_string(),
            logged_in_at: session.logged_in_at,
        },
        Some(&human),
    )
}

pub fn run_logout(data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let ctx = super::load_ctx(data_dir)?;
    let existed = session::logout(&ctx.data_dir)?;

    #[derive(Serialize)]
    struct LogoutData {
        session_cleared: bool,
    }

    let header = if existed {
        "Logged out"
    } else {
        "No active session"
    };

    emit_success(
        OutputOptions { json, quiet },
        "logout",
        &LogoutData {
            session_cleared: existed,
        },
        Some(&HumanOutput::new(header)),
    )
}

pub fn run_whoami(data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let ctx = super::load_ctx(data_dir)?;
    let session = session::current(&ctx.repo, &ctx.data_dir)?;

    let mut human = HumanOutput::new(format!("Logged in as {}", session.username));
    human.push_summary("role", session.role.as_str());
    human.push_summary("since", session.logged_in_at.to_rfc3339());

    emit_success(
        OutputOptions { json, quiet },
        "whoami",
        &SessionData {
            username: session.username.clone(),
            role: session.role.to_string(),
            logged_in_at: session.logged_in_at,
        },
        Some(&human),
    )
}
