mod support;

use predicates::str::contains;
use support::TestEnv;

/// The full happy path: bootstrap, accounts, a project, and a task walked
/// through its whole lifecycle.
#[test]
fn end_to_end_task_lifecycle() {
    let env = TestEnv::logged_in_admin();
    env.create_account("alice", "alicepass1", "user");
    env.create_project("Launch", "alice");

    env.login("alice", "alicepass1");

    // First task on an empty store gets the -101 id.
    let value = env.td_json(&[
        "task",
        "new",
        "Launch",
        "--category",
        "ppc",
        "--description",
        "draft ad copy",
    ]);
    assert_eq!(value["data"]["task_id"].as_str(), Some("PPC-101"));
    assert_eq!(value["data"]["status"].as_str(), Some("pending"));
    assert_eq!(value["schema_version"].as_str(), Some("td.v1"));

    env.td()
        .args(["task", "complete", "PPC-101"])
        .assert()
        .success();
    let value = env.td_json(&["task", "show", "PPC-101"]);
    assert_eq!(value["data"]["status"].as_str(), Some("completed"));

    // Completed tasks cannot be edited.
    env.td()
        .args(["task", "edit", "PPC-101", "--description", "v2"])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("PPC-101"));

    env.td()
        .args(["task", "reopen", "PPC-101"])
        .assert()
        .success();
    env.td()
        .args(["task", "edit", "PPC-101", "--description", "draft ad copy v2"])
        .assert()
        .success();

    env.td().args(["task", "close", "PPC-101"]).assert().success();

    // Closed is terminal for the owner.
    env.td()
        .args(["task", "complete", "PPC-101"])
        .assert()
        .failure()
        .code(3);
    env.td()
        .args(["task", "close", "PPC-101"])
        .assert()
        .failure()
        .code(3);

    // Owners cannot unlock; the admin can.
    env.td()
        .args(["task", "unlock", "PPC-101"])
        .assert()
        .failure()
        .code(3);
    env.login("root", "rootpass1");
    env.td()
        .args(["task", "unlock", "PPC-101"])
        .assert()
        .success();
    let value = env.td_json(&["task", "show", "PPC-101"]);
    assert_eq!(value["data"]["status"].as_str(), Some("pending"));
}

#[test]
fn task_ids_are_sequential_across_categories() {
    let env = TestEnv::logged_in_admin();
    env.create_project("Launch", "root");

    for (category, expected) in [("ppc", "PPC-101"), ("design", "DES-102"), ("ppc", "PPC-103")] {
        let value = env.td_json(&[
            "task",
            "new",
            "Launch",
            "--category",
            category,
            "--description",
            "work item",
        ]);
        assert_eq!(value["data"]["task_id"].as_str(), Some(expected));
    }
}

#[test]
fn report_tasks_require_a_known_sub_category() {
    let env = TestEnv::logged_in_admin();
    env.create_project("Launch", "root");

    env.td()
        .args([
            "task",
            "new",
            "Launch",
            "--category",
            "report",
            "--description",
            "numbers",
        ])
        .assert()
        .failure()
        .code(2);

    let value = env.td_json(&[
        "task",
        "new",
        "Launch",
        "--category",
        "report",
        "--sub-category",
        "weekly REPORT",
        "--description",
        "numbers",
    ]);
    // Sub-categories are stored with canonical casing.
    assert_eq!(
        value["data"]["sub_category"].as_str(),
        Some("Weekly report")
    );
}

#[test]
fn unknown_category_points_at_the_category_list() {
    let env = TestEnv::logged_in_admin();
    env.create_project("Launch", "root");

    let value = env.td_json_err(&[
        "task",
        "new",
        "Launch",
        "--category",
        "gardening",
        "--description",
        "weeds",
    ]);
    assert_eq!(value["error"]["kind"].as_str(), Some("user_error"));
    assert!(value["next_steps"]
        .as_array()
        .unwrap()
        .iter()
        .any(|step| step.as_str() == Some("td task categories")));

    let value = env.td_json(&["task", "categories"]);
    let categories = value["data"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 7);
    assert!(categories.iter().any(|c| c.as_str() == Some("Web Dev")));
}

#[test]
fn list_filters_by_status_and_search() {
    let env = TestEnv::logged_in_admin();
    env.create_project("Launch", "root");

    for desc in ["draft ad copy", "hero banner", "retargeting"] {
        env.td()
            .args([
                "task",
                "new",
                "Launch",
                "--category",
                "ppc",
                "--description",
                desc,
            ])
            .assert()
            .success();
    }
    env.td()
        .args(["task", "complete", "PPC-101"])
        .assert()
        .success();

    let value = env.td_json(&["task", "list", "Launch", "--status", "pending"]);
    assert_eq!(value["data"].as_array().unwrap().len(), 2);

    let value = env.td_json(&["task", "list", "Launch", "--search", "BANNER"]);
    let rows = value["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["task_id"].as_str(), Some("PPC-102"));
}

#[test]
fn closed_delete_is_disabled_by_default_and_honors_config() {
    let env = TestEnv::logged_in_admin();
    env.create_project("Launch", "root");
    env.td()
        .args([
            "task",
            "new",
            "Launch",
            "--category",
            "video",
            "--description",
            "teaser cut",
        ])
        .assert()
        .success();
    env.td().args(["task", "close", "VID-101"]).assert().success();

    let value = env.td_json_err(&["task", "delete", "VID-101"]);
    assert_eq!(value["error"]["kind"].as_str(), Some("policy_blocked"));

    std::fs::write(
        env.path().join(".td.toml"),
        "[features]\nclosed_delete = true\n",
    )
    .unwrap();
    env.td()
        .args(["task", "delete", "VID-101"])
        .assert()
        .success();
    env.td()
        .args(["task", "show", "VID-101"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn non_owner_is_rejected_with_policy_exit_code() {
    let env = TestEnv::logged_in_admin();
    env.create_account("alice", "alicepass1", "user");
    env.create_account("bob", "bobpass12", "user");
    env.create_project("Launch", "alice");

    env.login("bob", "bobpass12");
    env.td()
        .args([
            "task",
            "new",
            "Launch",
            "--category",
            "copy",
            "--description",
            "sneaky",
        ])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("owned by alice"));
}
