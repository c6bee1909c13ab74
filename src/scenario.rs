//! Canned command sequences exercising classes of repository operations.

use crate::command::Command;

/// Branches created by `many-branches`.
const BRANCH_COUNT: usize = 10;
/// Files created before the first big commit in `many-files`.
const FIRST_BATCH: usize = 200;
/// Overlapping files re-created before the second big commit.
const SECOND_BATCH: usize = 120;

/// A named, fixed sequence of commands.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub summary: &'static str,
    build: fn(&str) -> Vec<Command>,
}

impl Scenario {
    /// Materialize the command sequence, returning to `trunk` wherever the
    /// scenario leaves a branch.
    pub fn commands(&self, trunk: &str) -> Vec<Command> {
        (self.build)(trunk)
    }
}

const BUILTIN: &[Scenario] = &[
    Scenario {
        name: "simple",
        summary: "one branch, one trunk commit, checkout back to the branch",
        build: simple,
    },
    Scenario {
        name: "many-branches",
        summary: "a commit on each of many branches, then revisit every branch",
        build: many_branches,
    },
    Scenario {
        name: "many-files",
        summary: "large working-tree deltas with partial staging across two branches",
        build: many_files,
    },
];

/// All built-in scenarios.
pub fn builtin() -> &'static [Scenario] {
    BUILTIN
}

/// Look up a built-in scenario by name.
pub fn find(name: &str) -> Option<Scenario> {
    BUILTIN.iter().copied().find(|scenario| scenario.name == name)
}

fn create(name: &str) -> Command {
    Command::CreateFile {
        name: name.to_string(),
    }
}

fn modify(name: &str, content: &str) -> Command {
    Command::ModifyFile {
        name: name.to_string(),
        content: content.to_string(),
    }
}

fn add(files: &[&str]) -> Command {
    Command::Add {
        files: files.iter().map(|file| file.to_string()).collect(),
    }
}

fn commit(message: &str) -> Command {
    Command::Commit {
        message: message.to_string(),
    }
}

fn branch(name: &str) -> Command {
    Command::Branch {
        name: name.to_string(),
    }
}

fn checkout(name: &str) -> Command {
    Command::Checkout {
        name: name.to_string(),
    }
}

fn initial_commit() -> Vec<Command> {
    vec![create("z.txt"), add(&["z.txt"]), commit("Initial commit")]
}

fn simple(_trunk: &str) -> Vec<Command> {
    vec![
        create("a.txt"),
        add(&["a.txt"]),
        commit("Initial commit"),
        branch("branch-1"),
        create("b.txt"),
        modify("b.txt", "b-content"),
        add(&["b.txt"]),
        commit("Master commit"),
        checkout("branch-1"),
    ]
}

/// One commit per branch, each rewriting `a.txt`, then a second pass
/// checking out every branch (repeated checkout after divergent histories).
fn many_branches(trunk: &str) -> Vec<Command> {
    let mut commands = initial_commit();
    for index in 0..BRANCH_COUNT {
        let name = format!("branch-{index}");
        commands.push(branch(&name));
        commands.push(checkout(&name));
        commands.push(create("a.txt"));
        commands.push(modify("a.txt", &format!("{name} content")));
        commands.push(add(&["a.txt"]));
        commands.push(commit(&format!("{name} commit")));
        commands.push(checkout(trunk));
    }
    for index in 0..BRANCH_COUNT {
        commands.push(checkout(&format!("branch-{index}")));
    }
    commands
}

/// Two large file batches: the first stages only every other file, the
/// second (overlapping the first) stages everything, then checkouts bounce
/// across the two feature branches and back to the trunk.
fn many_files(trunk: &str) -> Vec<Command> {
    let mut commands = initial_commit();

    for index in 0..FIRST_BATCH {
        let name = format!("file-{index}");
        commands.push(create(&name));
        commands.push(modify(&name, &format!("{name} content")));
        if index % 2 == 0 {
            commands.push(add(&[name.as_str()]));
        }
    }
    commands.push(commit("Big commit"));
    commands.push(branch("big-branch"));

    for index in 0..SECOND_BATCH {
        let name = format!("file-{index}");
        commands.push(create(&name));
        commands.push(modify(&name, &format!("{name} content")));
        commands.push(add(&[name.as_str()]));
    }
    commands.push(commit("Second big commit"));
    commands.push(branch("second-big-branch"));

    commands.push(checkout("big-branch"));
    commands.push(checkout("second-big-branch"));
    commands.push(checkout("big-branch"));
    commands.push(checkout(trunk));

    commands
}
