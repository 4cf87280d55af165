//! Integration tests for the git adapter against real temporary repositories.

mod common;

use common::TestRepo;
use gch::error::GitError;
use gch::git::{GitRunner, SystemGit};

// =============================================================================
// STATUS AND DIFFS
// =============================================================================

#[test]
fn test_modified_files_lists_changed_and_untracked() {
    let test_repo = TestRepo::new();
    test_repo.commit_file(".gitignore", "target/\n", "chore: ignore target");
    test_repo.commit_file("src/lib.rs", "pub fn a() {}\n", "feat: add lib");

    test_repo.write("src/lib.rs", "pub fn a() {}\npub fn b() {}\n");
    test_repo.write("notes with spaces.md", "todo\n");
    test_repo.write("target/debug.log", "ignored\n");

    let files = test_repo.git().modified_files();

    assert_eq!(files.len(), 2, "got {files:?}");
    assert!(files.contains(&"src/lib.rs".to_string()));
    assert!(files.contains(&"notes with spaces.md".to_string()));
}

#[test]
fn test_modified_files_reports_rename_destination() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("old name.txt", "hello\n", "feat: add file");

    let output = SystemGit::in_dir(test_repo.path())
        .run(&["mv", "old name.txt", "new name.txt"])
        .unwrap();
    assert!(output.success, "git mv failed: {}", output.stderr);

    let files = test_repo.git().modified_files();
    assert_eq!(files, vec!["new name.txt".to_string()]);
}

#[test]
fn test_staged_deletion_does_not_break_staging() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("keep.txt", "keep\n", "feat: add keep");
    test_repo.commit_file("old.txt", "old\n", "feat: add old");

    let output = SystemGit::in_dir(test_repo.path())
        .run(&["rm", "--quiet", "old.txt"])
        .unwrap();
    assert!(output.success, "git rm failed: {}", output.stderr);
    test_repo.write("keep.txt", "keep\nmore\n");
    let git = test_repo.git();

    let files = git.modified_files();
    assert_eq!(files, vec!["keep.txt".to_string()]);

    git.stage_files(&files).unwrap();
    let staged = git.diff(true).unwrap();
    assert!(staged.contains("+more"));
    assert!(staged.contains("deleted file mode"));
}

#[test]
fn test_clean_tree_has_no_modified_files() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");

    assert!(test_repo.git().modified_files().is_empty());
    assert_eq!(test_repo.git().diff(false).as_deref(), Some(""));
    assert_eq!(test_repo.git().diff(true).as_deref(), Some(""));
}

#[test]
fn test_diff_for_files_is_restricted_to_paths() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.commit_file("b.txt", "b\n", "feat: add b");
    test_repo.write("a.txt", "a\nmore a\n");
    test_repo.write("b.txt", "b\nmore b\n");

    let diff = test_repo
        .git()
        .diff_for_files(&["a.txt".to_string()])
        .unwrap();

    assert!(diff.contains("+more a"));
    assert!(!diff.contains("more b"));
}

#[test]
fn test_staged_diff_follows_stage_files() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.write("a.txt", "a\nstaged line\n");
    let git = test_repo.git();

    git.stage_files(&["a.txt".to_string()]).unwrap();

    assert!(git.diff(true).unwrap().contains("+staged line"));
    assert_eq!(git.diff(false).as_deref(), Some(""));
}

// =============================================================================
// COMMITS AND HISTORY
// =============================================================================

#[test]
fn test_commit_writes_subject_and_body() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.write("a.txt", "a\nb\n");
    let git = test_repo.git();

    git.stage_files(&["a.txt".to_string()]).unwrap();
    git.commit("fix: handle \"quoted\" input\n\nExplains the change.")
        .unwrap();

    assert_eq!(
        test_repo.head_message().trim_end(),
        "fix: handle \"quoted\" input\n\nExplains the change."
    );
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");

    let err = test_repo.git().commit("feat: nothing").unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
}

#[test]
fn test_undo_last_commit_keeps_changes_staged() {
    let test_repo = TestRepo::new();
    let first = test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.commit_file("a.txt", "a\nb\n", "feat: add b");
    let git = test_repo.git();

    assert!(!git.is_last_commit_pushed());
    git.undo_last_commit().unwrap();

    assert_eq!(test_repo.head_id(), first);
    assert!(git.diff(true).unwrap().contains("+b"));
}

#[test]
fn test_unpushed_commits_without_upstream() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");

    assert!(test_repo.git().has_commits_to_push());
}

#[test]
fn test_latest_logs_shows_recent_subjects() {
    let test_repo = TestRepo::new();
    for i in 0..7 {
        test_repo.commit_file("a.txt", &format!("{i}\n"), &format!("feat: change {i}"));
    }

    let logs = test_repo.git().latest_logs().unwrap();

    assert_eq!(logs.lines().count(), 5);
    assert!(logs.contains("feat: change 6"));
    assert!(!logs.contains("feat: change 1"));
}

// =============================================================================
// BRANCHES
// =============================================================================

#[test]
fn test_current_branch_fails_without_commits() {
    let test_repo = TestRepo::new();
    let err = test_repo.git().current_branch().unwrap_err();
    assert!(matches!(err, GitError::CannotDetermineBranch(_)));
}

#[test]
fn test_create_branch_switches_to_it() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "a\n", "feat: add a");
    let git = test_repo.git();

    git.create_branch("feat/login").unwrap();

    assert_eq!(git.current_branch().unwrap(), "feat/login");
}

#[test]
fn test_create_existing_branch_fails() {
    let test_repo = TestRepo::new();
    let head = test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.branch("taken", head);

    let err = test_repo.git().create_branch("taken").unwrap_err();
    assert!(matches!(err, GitError::BranchCreationFailed { ref branch, .. } if branch == "taken"));
}

#[test]
fn test_local_branches_and_checkout() {
    let test_repo = TestRepo::new();
    let head = test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.branch("dev", head);
    test_repo.branch("feature/x", head);
    let git = test_repo.git();
    let start = git.current_branch().unwrap();

    let branches = git.local_branches().unwrap();
    assert_eq!(branches.len(), 3);
    assert!(branches.iter().any(|b| b.name == start && b.is_current));
    assert!(branches.iter().any(|b| b.name == "feature/x" && !b.is_current));

    git.checkout_branch("feature/x").unwrap();
    assert_eq!(git.current_branch().unwrap(), "feature/x");
}

#[test]
fn test_rebase_onto_branch() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit_file("a.txt", "a\n", "feat: add a");
    test_repo.branch("topic", base);
    test_repo.commit_file("b.txt", "b\n", "feat: add b");
    let git = test_repo.git();
    let main = git.current_branch().unwrap();

    git.checkout_branch("topic").unwrap();
    test_repo.commit_file("c.txt", "c\n", "feat: add c");
    git.rebase(&main).unwrap();

    assert!(test_repo.path().join("b.txt").exists());
    assert_eq!(test_repo.head_message().trim_end(), "feat: add c");
}
