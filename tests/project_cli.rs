mod support;

use predicates::str::contains;
use support::TestEnv;

#[test]
fn project_ids_start_at_one_and_names_are_unique() {
    let env = TestEnv::logged_in_admin();
    env.create_account("alice", "alicepass1", "user");

    assert_eq!(env.create_project("Launch", "alice"), 1);
    assert_eq!(env.create_project("Rebrand", "alice"), 2);

    env.td()
        .args(["project", "new", "Launch", "--owner", "alice"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Launch"));
}

#[test]
fn project_creation_requires_admin_and_known_owner() {
    let env = TestEnv::logged_in_admin();
    env.create_account("alice", "alicepass1", "user");

    env.td()
        .args(["project", "new", "Ghost", "--owner", "nobody"])
        .assert()
        .failure()
        .code(2);

    env.login("alice", "alicepass1");
    env.td()
        .args(["project", "new", "Mine", "--owner", "alice"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn list_is_scoped_to_the_session() {
    let env = TestEnv::logged_in_admin();
    env.create_account("alice", "alicepass1", "user");
    env.create_account("bob", "bobpass12", "user");
    env.create_project("Alpha", "alice");
    env.create_project("Beta", "bob");

    // admin sees both
    let value = env.td_json(&["project", "list"]);
    assert_eq!(value["data"].as_array().unwrap().len(), 2);

    // --mine narrows even the admin view
    let value = env.td_json(&["project", "list", "--mine"]);
    assert_eq!(value["data"].as_array().unwrap().len(), 0);

    env.login("alice", "alicepass1");
    let value = env.td_json(&["project", "list"]);
    let rows = value["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"].as_str(), Some("Alpha"));
}

#[test]
fn transfer_moves_ownership_but_not_tasks() {
    let env = TestEnv::logged_in_admin();
    env.create_account("alice", "alicepass1", "user");
    env.create_account("bob", "bobpass12", "user");
    let id = env.create_project("Launch", "alice");

    env.login("alice", "alicepass1");
    env.td()
        .args([
            "task",
            "new",
            "Launch",
            "--category",
            "design",
            "--description",
            "logo",
        ])
        .assert()
        .success();

    env.login("root", "rootpass1");
    let value = env.td_json(&["project", "transfer", &id.to_string(), "bob"]);
    assert_eq!(value["data"]["owner"].as_str(), Some("bob"));

    // The old owner lost access, the new owner gained it, the task survived.
    env.login("alice", "alicepass1");
    env.td()
        .args(["task", "list", "Launch"])
        .assert()
        .failure()
        .code(3);

    env.login("bob", "bobpass12");
    let value = env.td_json(&["task", "list", "Launch"]);
    assert_eq!(value["data"].as_array().unwrap().len(), 1);
}

#[test]
fn rm_cascades_to_tasks() {
    let env = TestEnv::logged_in_admin();
    env.create_project("Launch", "root");
    env.create_project("Rebrand", "root");

    for (project, desc) in [("Launch", "one"), ("Launch", "two"), ("Rebrand", "keep")] {
        env.td()
            .args([
                "task",
                "new",
                project,
                "--category",
                "ppc",
                "--description",
                desc,
            ])
            .assert()
            .success();
    }

    let value = env.td_json(&["project", "rm", "Launch"]);
    assert_eq!(value["data"]["tasks_deleted"].as_u64(), Some(2));

    env.td()
        .args(["task", "show", "PPC-101"])
        .assert()
        .failure()
        .code(2);
    // The other project's task is untouched.
    let value = env.td_json(&["task", "show", "PPC-103"]);
    assert_eq!(value["data"]["description"].as_str(), Some("keep"));
}

#[test]
fn resolve_accepts_id_or_exact_name() {
    let env = TestEnv::logged_in_admin();
    let id = env.create_project("Launch", "root");

    env.td()
        .args([
            "task",
            "new",
            &id.to_string(),
            "--category",
            "copy",
            "--description",
            "by id",
        ])
        .assert()
        .success();

    env.td()
        .args(["task", "list", "launch"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("launch"));
}
