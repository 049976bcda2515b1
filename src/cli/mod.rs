//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command family is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::JsonRepository;

mod account;
mod auth;
mod init;
mod project;
mod task;

/// td - team task desk
///
/// Projects, tasks, and accounts from the command line: users work tasks on
/// projects they own, admins manage accounts and ownership.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the store and create the bootstrap admin
    Init {
        /// Bootstrap admin username
        #[arg(long)]
        admin: String,

        /// Bootstrap admin password
        #[arg(long)]
        password: String,
    },

    /// Log in and persist the session
    Login {
        /// Username
        username: String,

        /// Password
        #[arg(long)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the current session
    Whoami,

    /// Task lifecycle commands
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project management commands
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a pending task on a project you own
    New {
        /// Project id or exact name
        project: String,

        /// Category: design, copy, video, ppc, web-dev, report, others
        #[arg(long)]
        category: String,

        /// Report sub-category (required when category is report)
        #[arg(long)]
        sub_category: Option<String>,

        /// Task description
        #[arg(long)]
        description: String,

        /// Deadline date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,

        /// Deadline half of day: FH or SH
        #[arg(long)]
        half: Option<String>,
    },

    /// List tasks of a project
    List {
        /// Project id or exact name
        project: String,

        /// Filter by status: pending, completed, closed
        #[arg(long)]
        status: Option<String>,

        /// Filter by category (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Case-insensitive substring search over description and id
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one task
    Show {
        /// Task id (e.g. PPC-101)
        task_id: String,
    },

    /// Mark a pending task completed
    Complete {
        /// Task id
        task_id: String,
    },

    /// Re-open a completed task
    Reopen {
        /// Task id
        task_id: String,
    },

    /// Close a task (terminal)
    Close {
        /// Task id
        task_id: String,
    },

    /// Unlock a closed task back to pending (admin)
    Unlock {
        /// Task id
        task_id: String,
    },

    /// Delete a closed task (when enabled)
    Delete {
        /// Task id
        task_id: String,
    },

    /// Edit a pending task
    Edit {
        /// Task id
        task_id: String,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New report sub-category
        #[arg(long)]
        sub_category: Option<String>,

        /// New deadline date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,

        /// New deadline half: FH or SH
        #[arg(long)]
        half: Option<String>,
    },

    /// List known categories and report sub-categories
    Categories,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project (admin)
    New {
        /// Project name (globally unique)
        name: String,

        /// Owning account
        #[arg(long)]
        owner: String,
    },

    /// List projects (admins see all, users see their own)
    List {
        /// Only projects owned by the current session
        #[arg(long)]
        mine: bool,
    },

    /// Transfer a project to a new owner (admin)
    Transfer {
        /// Project id or exact name
        project: String,

        /// New owner account
        new_owner: String,
    },

    /// Delete a project and all of its tasks (admin)
    Rm {
        /// Project id or exact name
        project: String,
    },
}

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Create an account (admin)
    New {
        /// Username
        username: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Role: user or admin
        #[arg(long, default_value = "user")]
        role: String,
    },

    /// List accounts (admin)
    List,

    /// Delete an account (admin)
    Rm {
        /// Username
        username: String,

        /// Account inheriting any owned projects
        #[arg(long)]
        successor: Option<String>,
    },
}

/// Shared per-invocation context: resolved data dir, config, repository.
pub(crate) struct Ctx {
    pub data_dir: PathBuf,
    pub config: Config,
    pub repo: JsonRepository,
}

pub(crate) fn load_ctx(data_dir: Option<PathBuf>) -> Result<Ctx> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => directories::ProjectDirs::from("", "", "td")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                Error::OperationFailed(
                    "could not determine a data directory; pass --data-dir".to_string(),
                )
            })?,
    };
    let config = Config::load_from_dir(&data_dir);
    let repo = JsonRepository::open(&data_dir, &config.store);
    Ok(Ctx {
        data_dir,
        config,
        repo,
    })
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init { admin, password } => init::run(init::InitOptions {
                admin,
                password,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Login { username, password } => auth::run_login(auth::LoginOptions {
                username,
                password,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Logout => auth::run_logout(self.data_dir, self.json, self.quiet),
            Commands::Whoami => auth::run_whoami(self.data_dir, self.json, self.quiet),
            Commands::Task(cmd) => match cmd {
                TaskCommands::New {
                    project,
                    category,
                    sub_category,
                    description,
                    deadline,
                    half,
                } => task::run_new(task::NewOptions {
                    project,
                    category,
                    sub_category,
                    description,
                    deadline,
                    half,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::List {
                    project,
                    status,
                    category,
                    search,
                } => task::run_list(task::ListOptions {
                    project,
                    status,
                    categories: category,
                    search,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Show { task_id } => task::run_show(task::ShowOptions {
                    task_id,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Complete { task_id } => {
                    task::run_transition(task::TransitionOptions {
                        task_id,
                        action: task::Action::Complete,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                TaskCommands::Reopen { task_id } => {
                    task::run_transition(task::TransitionOptions {
                        task_id,
                        action: task::Action::Reopen,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                TaskCommands::Close { task_id } => {
                    task::run_transition(task::TransitionOptions {
                        task_id,
                        action: task::Action::Close,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                TaskCommands::Unlock { task_id } => {
                    task::run_transition(task::TransitionOptions {
                        task_id,
                        action: task::Action::Unlock,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                TaskCommands::Delete { task_id } => task::run_delete(task::DeleteOptions {
                    task_id,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    task_id,
                    description,
                    category,
                    sub_category,
                    deadline,
                    half,
                } => task::run_edit(task::EditOptions {
                    task_id,
                    description,
                    category,
                    sub_category,
                    deadline,
                    half,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Categories => {
                    task::run_categories(self.data_dir, self.json, self.quiet)
                }
            },
            Commands::Project(cmd) => match cmd {
                ProjectCommands::New { name, owner } => {
                    project::run_new(project::NewOptions {
                        name,
                        owner,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                ProjectCommands::List { mine } => {
                    project::run_list(mine, self.data_dir, self.json, self.quiet)
                }
                ProjectCommands::Transfer { project, new_owner } => {
                    project::run_transfer(project::TransferOptions {
                        project,
                        new_owner,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                ProjectCommands::Rm { project } => {
                    project::run_rm(project::RmOptions {
                        project,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
            },
            Commands::Account(cmd) => match cmd {
                AccountCommands::New {
                    username,
                    password,
                    role,
                } => account::run_new(account::NewOptions {
                    username,
                    password,
                    role,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AccountCommands::List => {
                    account::run_list(self.data_dir, self.json, self.quiet)
                }
                AccountCommands::Rm {
                    username,
                    successor,
                } => account::run_rm(account::RmOptions {
                    username,
                    successor,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
        }
    }
}
