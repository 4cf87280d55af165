//! Conventional commit types.

use std::fmt;
use std::str::FromStr;

/// The fixed set of commit types accepted in subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    BreakingChange,
}

impl CommitType {
    /// All types in the order they are offered for selection.
    pub const ALL: [CommitType; 9] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
        CommitType::BreakingChange,
    ];

    /// The tag as written in a subject line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::BreakingChange => "BREAKING CHANGE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "A new feature",
            CommitType::Fix => "A bug fix",
            CommitType::Docs => "Documentation only changes",
            CommitType::Style => "Changes that do not affect the meaning of the code",
            CommitType::Refactor => "A code change that neither fixes a bug nor adds a feature",
            CommitType::Perf => "A code change that improves performance",
            CommitType::Test => "Adding missing tests or correcting existing tests",
            CommitType::Chore => "Changes to the build process or auxiliary tools",
            CommitType::BreakingChange => "A change that breaks backward compatibility",
        }
    }

    /// Every tag accepted in a subject, including the `breaking` alias.
    pub fn tags() -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = Self::ALL.iter().map(CommitType::as_str).collect();
        tags.push("breaking");
        tags
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    /// Case-sensitive: `Feat` is not a commit type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breaking" => Ok(CommitType::BreakingChange),
            _ => Self::ALL
                .iter()
                .copied()
                .find(|t| t.as_str() == s)
                .ok_or_else(|| format!("unknown commit type '{s}'")),
        }
    }
}
