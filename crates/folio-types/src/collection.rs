use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The editable collections of a [`crate::PortfolioDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    BlogPosts,
    Projects,
    Experiences,
    LeadRequests,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Self::BlogPosts,
        Self::Projects,
        Self::Experiences,
        Self::LeadRequests,
    ];

    /// The document key this collection is stored under.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BlogPosts => "blogPosts",
            Self::Projects => "projects",
            Self::Experiences => "experiences",
            Self::LeadRequests => "leadRequests",
        }
    }

    /// Prefix used when generating ids for new entries.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::BlogPosts => "blog",
            Self::Projects => "project",
            Self::Experiences => "experience",
            Self::LeadRequests => "lead",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Collection {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blog" | "blogs" | "blogposts" | "posts" => Ok(Self::BlogPosts),
            "project" | "projects" => Ok(Self::Projects),
            "experience" | "experiences" => Ok(Self::Experiences),
            "lead" | "leads" | "leadrequests" => Ok(Self::LeadRequests),
            _ => Err(TypeError::UnknownCollection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("blogs".parse::<Collection>().unwrap(), Collection::BlogPosts);
        assert_eq!("blogPosts".parse::<Collection>().unwrap(), Collection::BlogPosts);
        assert_eq!("Experience".parse::<Collection>().unwrap(), Collection::Experiences);
        assert_eq!("leads".parse::<Collection>().unwrap(), Collection::LeadRequests);
        assert!("packages".parse::<Collection>().is_err());
    }

    #[test]
    fn display_uses_document_key() {
        assert_eq!(Collection::LeadRequests.to_string(), "leadRequests");
    }
}
