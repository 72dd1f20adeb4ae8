use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::ItemId;

/// A blog article. The body is markdown-subset text that may embed fenced
/// code blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, alias = "content")]
    pub body: String,
    /// Publish date as displayed (e.g. `16 October 2026`).
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read_time: String,
    /// Cover image URL.
    #[serde(default)]
    pub image: String,
}

impl BlogPost {
    /// Returns `true` if the post carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Where a project sits in the portfolio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[default]
    Professional,
    Personal,
    #[serde(rename = "Open Source", alias = "OpenSource")]
    OpenSource,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [Self::Professional, Self::Personal, Self::OpenSource];
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Professional => "Professional",
            Self::Personal => "Personal",
            Self::OpenSource => "Open Source",
        };
        f.write_str(s)
    }
}

impl FromStr for ProjectCategory {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "professional" => Ok(Self::Professional),
            "personal" => Ok(Self::Personal),
            "opensource" => Ok(Self::OpenSource),
            _ => Err(TypeError::UnknownProjectCategory(s.to_string())),
        }
    }
}

/// A showcased project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Technology-stack labels.
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, alias = "githubUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub featured: bool,
}

/// A position held, shown on the career timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: ItemId,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_category_wire_names() {
        let json = serde_json::to_string(&ProjectCategory::OpenSource).unwrap();
        assert_eq!(json, "\"Open Source\"");
        let parsed: ProjectCategory = serde_json::from_str("\"OpenSource\"").unwrap();
        assert_eq!(parsed, ProjectCategory::OpenSource);
    }

    #[test]
    fn project_category_from_str_is_lenient() {
        assert_eq!("open-source".parse::<ProjectCategory>().unwrap(), ProjectCategory::OpenSource);
        assert_eq!("PERSONAL".parse::<ProjectCategory>().unwrap(), ProjectCategory::Personal);
        assert!("hobby".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn blog_post_accepts_legacy_content_key() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id":"blog-1","title":"T","content":"body text","readTime":"5 min"}"#,
        )
        .unwrap();
        assert_eq!(post.body, "body text");
        assert_eq!(post.read_time, "5 min");
    }

    #[test]
    fn project_accepts_legacy_github_url_and_missing_id() {
        let project: Project = serde_json::from_str(
            r#"{"title":"ServCraft","githubUrl":"https://example.com/x","category":"Open Source"}"#,
        )
        .unwrap();
        assert!(project.id.is_blank());
        assert_eq!(project.source_url.as_deref(), Some("https://example.com/x"));
        assert_eq!(project.category, ProjectCategory::OpenSource);
    }

    #[test]
    fn optional_urls_are_omitted_when_absent() {
        let project = Project {
            title: "p".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&project).unwrap();
        assert!(!json.contains("demoUrl"));
        assert!(!json.contains("sourceUrl"));
    }
}
