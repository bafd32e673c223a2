//! Template sources and the references used to fetch them.

use regex::Regex;
use std::{fmt, sync::OnceLock};

use crate::error::RefError;

/// Every template source is pinned to this branch.
pub const BRANCH: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Gitee = 1,
    Github = 2,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::Gitee, Template::Github];

    pub fn label(self) -> &'static str {
        match self {
            Template::Gitee => "gitee",
            Template::Github => "github",
        }
    }

    pub fn remote(self) -> &'static str {
        match self {
            Template::Gitee => "https://gitee.com/theGreatWallCCG/vue3-template-cli.git",
            Template::Github => "https://github.com/BenjaminCCG/vue3-template-cli.git",
        }
    }

    pub fn direct_ref(self) -> DirectRef {
        DirectRef {
            url: self.remote().to_string(),
            branch: BRANCH.to_string(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `direct:<url>#<branch>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRef {
    pub url: String,
    pub branch: String,
}

impl DirectRef {
    pub fn archive_url(&self) -> Result<String, RefError> {
        Repository::parse(&self.url)
            .and_then(|repo| repo.archive_url(&self.branch))
            .ok_or_else(|| RefError::UnknownRemote(self.url.clone()))
    }
}

impl fmt::Display for DirectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "direct:{}#{}", self.url, self.branch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub host: String,
    pub owner: String,
    pub name: String,
}

fn longhand() -> &'static Regex {
    static LONGHAND: OnceLock<Regex> = OnceLock::new();
    LONGHAND.get_or_init(|| {
        Regex::new(
            r"(?x)
        ^https://
        (?P<host>[\w\.]+)/
        (?P<owner>[\w\-]+)/(?P<name>[\w\-\.]+?)(\.git)?/?$",
        )
        .expect("repository pattern is valid")
    })
}

impl Repository {
    pub fn parse(src: &str) -> Option<Repository> {
        let captures = longhand().captures(src)?;
        Some(Repository {
            host: captures.name("host")?.as_str().to_string(),
            owner: captures.name("owner")?.as_str().to_string(),
            name: captures.name("name")?.as_str().to_string(),
        })
    }

    /// Tarball of `branch` without history, for the hosts we know.
    pub fn archive_url(&self, branch: &str) -> Option<String> {
        match self.host.as_str() {
            "github.com" => Some(format!(
                "https://github.com/{}/{}/archive/refs/heads/{}.tar.gz",
                self.owner, self.name, branch
            )),
            "gitee.com" => Some(format!(
                "https://gitee.com/{}/{}/repository/archive/{}.tar.gz",
                self.owner, self.name, branch
            )),
            _ => None,
        }
    }
}
