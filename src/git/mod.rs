//! Git repository access through the system `git` binary.

pub mod repo;
pub mod runner;
pub mod status;

pub use repo::{GitRepo, LocalBranch, PushOutcome};
pub use runner::{GitOutput, GitRunner, SystemGit, check_git_installed};
