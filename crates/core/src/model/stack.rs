use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Technology stack a tutorial belongs to.
///
/// The set is closed: every stack has its own content and its own
/// progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialStack {
    Node,
    Spring,
    Ansible,
    Docker,
    Linux,
    Sql,
    NoSql,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tutorial stack: {0}")]
pub struct UnknownStackError(pub String);

impl TutorialStack {
    /// All stacks in navigation order.
    pub const ALL: [TutorialStack; 7] = [
        TutorialStack::Node,
        TutorialStack::Spring,
        TutorialStack::Ansible,
        TutorialStack::Docker,
        TutorialStack::Linux,
        TutorialStack::Sql,
        TutorialStack::NoSql,
    ];

    /// Number of stacks.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable identifier used in routes and storage keys.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            TutorialStack::Node => "node",
            TutorialStack::Spring => "spring",
            TutorialStack::Ansible => "ansible",
            TutorialStack::Docker => "docker",
            TutorialStack::Linux => "linux",
            TutorialStack::Sql => "sql",
            TutorialStack::NoSql => "nosql",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TutorialStack::Node => "Node.js",
            TutorialStack::Spring => "Spring Boot",
            TutorialStack::Ansible => "Ansible",
            TutorialStack::Docker => "Docker",
            TutorialStack::Linux => "Linux",
            TutorialStack::Sql => "SQL",
            TutorialStack::NoSql => "NoSQL",
        }
    }

    /// Position of the stack in [`TutorialStack::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            TutorialStack::Node => 0,
            TutorialStack::Spring => 1,
            TutorialStack::Ansible => 2,
            TutorialStack::Docker => 3,
            TutorialStack::Linux => 4,
            TutorialStack::Sql => 5,
            TutorialStack::NoSql => 6,
        }
    }

    /// Parses a slug, falling back to the first known stack.
    #[must_use]
    pub fn from_slug_or_default(slug: &str) -> Self {
        slug.parse().unwrap_or(Self::ALL[0])
    }
}

impl Default for TutorialStack {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for TutorialStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TutorialStack {
    type Err = UnknownStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let needle = match needle.as_str() {
            "nodejs" | "node.js" => "node",
            "springboot" | "spring-boot" => "spring",
            "no-sql" => "nosql",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|stack| stack.slug() == needle)
            .ok_or_else(|| UnknownStackError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for stack in TutorialStack::ALL {
            assert_eq!(stack.slug().parse::<TutorialStack>(), Ok(stack));
        }
    }

    #[test]
    fn index_matches_position() {
        for (pos, stack) in TutorialStack::ALL.into_iter().enumerate() {
            assert_eq!(stack.index(), pos);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("Docker".parse::<TutorialStack>(), Ok(TutorialStack::Docker));
        assert_eq!("node.js".parse::<TutorialStack>(), Ok(TutorialStack::Node));
        assert_eq!("NoSQL".parse::<TutorialStack>(), Ok(TutorialStack::NoSql));
    }

    #[test]
    fn unknown_slug_falls_back_to_first_stack() {
        assert!("cobol".parse::<TutorialStack>().is_err());
        assert_eq!(
            TutorialStack::from_slug_or_default("cobol"),
            TutorialStack::Node
        );
    }
}
