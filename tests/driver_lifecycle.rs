//! End-to-end runs of the built-in scenarios against paired fake tools.
//!
//! The fake tools behave identically, so a correct harness completes every
//! scenario with no divergence; the skewed variant plants an extra file in
//! one working tree to verify the harness actually catches divergences.

#![cfg(unix)]

use std::fs;

use lockstep::command::Command;
use lockstep::driver::{run_commands, run_scenario};
use lockstep::scenario;
use lockstep::test_support::{fake_pair, skewed_pair};

#[test]
fn simple_scenario_keeps_both_trees_identical() {
    let pair = fake_pair().expect("fake pair");
    let scenario = scenario::find("simple").expect("scenario");

    let report = run_scenario(&pair.config, &scenario).expect("run");
    assert!(report.succeeded(), "failures: {:?}", report.failures);
    assert_eq!(report.steps_completed, 9);

    // After the final checkout of branch-1, b.txt only exists on the trunk.
    for root in [&pair.config.reference.root, &pair.config.subject.root] {
        assert!(root.join("a.txt").exists(), "a.txt present on the branch");
        assert!(
            !root.join("b.txt").exists(),
            "b.txt must not survive the checkout"
        );
    }
}

#[test]
fn many_branches_reproduces_each_branchs_content() {
    let pair = fake_pair().expect("fake pair");
    let scenario = scenario::find("many-branches").expect("scenario");

    let report = run_scenario(&pair.config, &scenario).expect("run");
    assert!(report.succeeded(), "failures: {:?}", report.failures);

    // The run ends having just checked out branch-9.
    for root in [&pair.config.reference.root, &pair.config.subject.root] {
        let contents = fs::read_to_string(root.join("a.txt")).expect("read a.txt");
        assert_eq!(contents, "branch-9 content");
    }
}

#[test]
fn many_files_scenario_survives_large_deltas() {
    let pair = fake_pair().expect("fake pair");
    let scenario = scenario::find("many-files").expect("scenario");

    let report = run_scenario(&pair.config, &scenario).expect("run");
    assert!(report.succeeded(), "failures: {:?}", report.failures);
    assert_eq!(report.steps_completed, 871);

    // The run ends back on the trunk, where every file was committed.
    for root in [&pair.config.reference.root, &pair.config.subject.root] {
        assert!(root.join("z.txt").exists());
        let contents = fs::read_to_string(root.join("file-199")).expect("read file-199");
        assert_eq!(contents, "file-199 content");
    }
}

#[test]
fn checkout_of_missing_branch_aborts_the_run() {
    let pair = fake_pair().expect("fake pair");
    let commands = vec![Command::Checkout {
        name: "ghost".to_string(),
    }];

    let report = run_commands(&pair.config, "missing-branch", &commands).expect("run");
    assert!(!report.succeeded());
    assert_eq!(report.steps_completed, 0);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.step, 0);
    assert!(failure.command.contains("checkout ghost"));
    assert!(format!("{:#}", failure.error).contains("failed"));
}

#[test]
fn skewed_subject_is_caught_at_the_first_commit() {
    let pair = skewed_pair().expect("skewed pair");
    let scenario = scenario::find("simple").expect("scenario");

    let report = run_scenario(&pair.config, &scenario).expect("run");
    assert!(!report.succeeded());
    // create a.txt and add succeed; the commit plants the skew file.
    assert_eq!(report.steps_completed, 2);
    let failure = &report.failures[0];
    assert_eq!(failure.step, 2);
    let msg = format!("{:#}", failure.error);
    assert!(msg.contains("diverged"), "{msg}");
    assert!(msg.contains("skewed-commit.txt"), "{msg}");
    assert!(msg.contains("only under subject"), "{msg}");

    // Both roots survive for post-mortem inspection.
    assert!(pair.config.subject.root.join("skewed-commit.txt").exists());
}

#[test]
fn keep_going_records_every_failure() {
    let mut pair = skewed_pair().expect("skewed pair");
    pair.config.fail_fast = false;
    let scenario = scenario::find("simple").expect("scenario");

    let report = run_scenario(&pair.config, &scenario).expect("run");
    assert!(!report.succeeded());
    assert!(
        report.failures.len() > 1,
        "keep-going should record more than the first failure, got {:?}",
        report.failures
    );
    // Later steps still ran.
    assert_eq!(
        report.steps_completed + report.failures.len(),
        9,
        "every step must be accounted for"
    );
}
