use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::content::{BlogPost, Experience, Project};
use crate::id::ItemId;

/// Working copy of an entry open in the console editor.
///
/// `id` is `None` for an entry being created and `Some` for the entry being
/// edited; the save resolves its target by that id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Draft {
    BlogPost { id: Option<ItemId>, post: BlogPost },
    Project { id: Option<ItemId>, project: Project },
    Experience { id: Option<ItemId>, experience: Experience },
}

impl Draft {
    /// A blank draft with the collection's defaults. Leads cannot be drafted.
    pub fn blank(collection: Collection) -> Option<Self> {
        match collection {
            Collection::BlogPosts => Some(Self::BlogPost {
                id: None,
                post: BlogPost {
                    category: "Code".into(),
                    read_time: "5 min".into(),
                    ..Default::default()
                },
            }),
            Collection::Projects => Some(Self::Project {
                id: None,
                project: Project::default(),
            }),
            Collection::Experiences => Some(Self::Experience {
                id: None,
                experience: Experience::default(),
            }),
            Collection::LeadRequests => None,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            Self::BlogPost { .. } => Collection::BlogPosts,
            Self::Project { .. } => Collection::Projects,
            Self::Experience { .. } => Collection::Experiences,
        }
    }

    /// Id of the entry being edited; `None` while creating.
    pub fn id(&self) -> Option<&ItemId> {
        match self {
            Self::BlogPost { id, .. } | Self::Project { id, .. } | Self::Experience { id, .. } => {
                id.as_ref()
            }
        }
    }

    pub fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Display title used in notifications.
    pub fn title(&self) -> &str {
        match self {
            Self::BlogPost { post, .. } => &post.title,
            Self::Project { project, .. } => &project.title,
            Self::Experience { experience, .. } => &experience.role,
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required: Vec<(&'static str, &str)> = match self {
            Self::BlogPost { post, .. } => vec![
                ("title", post.title.as_str()),
                ("excerpt", post.excerpt.as_str()),
                ("body", post.body.as_str()),
            ],
            Self::Project { project, .. } => vec![
                ("title", project.title.as_str()),
                ("description", project.description.as_str()),
            ],
            Self::Experience { experience, .. } => vec![
                ("role", experience.role.as_str()),
                ("company", experience.company.as_str()),
                ("description", experience.description.as_str()),
            ],
        };
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_blog_draft_has_defaults() {
        let Some(Draft::BlogPost { id, post }) = Draft::blank(Collection::BlogPosts) else {
            panic!("expected a blog draft");
        };
        assert!(id.is_none());
        assert_eq!(post.category, "Code");
        assert_eq!(post.read_time, "5 min");
    }

    #[test]
    fn leads_have_no_draft() {
        assert!(Draft::blank(Collection::LeadRequests).is_none());
    }

    #[test]
    fn missing_fields_lists_blank_required_fields() {
        let mut draft = Draft::blank(Collection::Projects).unwrap();
        assert_eq!(draft.missing_fields(), vec!["title", "description"]);
        if let Draft::Project { project, .. } = &mut draft {
            project.title = "Folio".into();
            project.description = "  ".into();
        }
        assert_eq!(draft.missing_fields(), vec!["description"]);
    }

    #[test]
    fn experience_title_is_role() {
        let draft = Draft::Experience {
            id: Some(ItemId::new("experience-1")),
            experience: Experience {
                role: "Engineer".into(),
                ..Default::default()
            },
        };
        assert_eq!(draft.title(), "Engineer");
        assert!(!draft.is_new());
        assert_eq!(draft.collection(), Collection::Experiences);
    }
}
