//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use gch::git::{GitRepo, SystemGit};
use git2::{Oid, Repository, Signature};

/// A throwaway git repository driven through git2 for setup and the
/// system `git` for the code under test.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository with a committer identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }
        Self { dir, repo }
    }

    /// A [`GitRepo`] running the system `git` inside this repository.
    pub fn git(&self) -> GitRepo {
        GitRepo::new(Box::new(SystemGit::in_dir(self.dir.path())))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` (relative to the work tree).
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Write `name` and commit it on HEAD. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write(name, content);

        let mut index = self.repo.index().expect("Failed to get index");
        // The CLI may have rewritten the index since git2 last read it.
        index.read(true).expect("Failed to reload index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch pointing to the given OID.
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo.branch(name, &commit, false).expect("Failed to create branch");
    }

    /// Full message of the commit HEAD points at.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or_default().to_string())
            .expect("Failed to read HEAD commit")
    }

    pub fn head_id(&self) -> Oid {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.id())
            .expect("Failed to read HEAD commit")
    }
}
