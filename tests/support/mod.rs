use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A fresh data directory plus helpers for driving the binary against it.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    /// A data directory initialized with a bootstrap admin `root`/`rootpass1`.
    pub fn initialized() -> Self {
        let env = Self::new();
        env.td()
            .args(["init", "--admin", "root", "--password", "rootpass1"])
            .assert()
            .success();
        env
    }

    /// Initialized, with admin `root` logged in.
    pub fn logged_in_admin() -> Self {
        let env = Self::initialized();
        env.login("root", "rootpass1");
        env
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn td(&self) -> Command {
        let mut cmd = Command::cargo_bin("td").expect("td binary");
        cmd.env("TD_DATA_DIR", self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn login(&self, username: &str, password: &str) {
        self.td()
            .args(["login", username, "--password", password])
            .assert()
            .success();
    }

    pub fn create_account(&self, username: &str, password: &str, role: &str) {
        self.td()
            .args([
                "account", "new", username, "--password", password, "--role", role,
            ])
            .assert()
            .success();
    }

    pub fn create_project(&self, name: &str, owner: &str) -> u64 {
        let value = self.td_json(&["project", "new", name, "--owner", owner]);
        value["data"]["id"].as_u64().expect("project id")
    }

    /// Run a command with `--json` appended and parse the envelope.
    pub fn td_json(&self, args: &[&str]) -> Value {
        let output = self
            .td()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json envelope")
    }

    /// Run a command expected to fail and parse the JSON error envelope.
    pub fn td_json_err(&self, args: &[&str]) -> Value {
        let output = self
            .td()
            .args(args)
            .arg("--json")
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json error envelope")
    }
}
