use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::content::{BlogPost, Experience, Project};
use crate::id::ItemId;
use crate::lead::LeadRequest;

/// Contact block shown on the profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// GitHub handle.
    #[serde(default)]
    pub github: String,
    /// LinkedIn handle.
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub address: String,
}

/// Owner profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Role title (e.g. "Fullstack Developer").
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, alias = "cvUrl")]
    pub resume_url: String,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A published package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<String>,
}

/// The single aggregate holding all site content and inbound leads.
///
/// The document is immutable-by-replacement: callers clone it, change one
/// collection, and hand the whole value back to the content store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, alias = "npmPackages")]
    pub packages: Vec<Package>,
    #[serde(default, alias = "blogs")]
    pub blog_posts: Vec<BlogPost>,
    #[serde(default)]
    pub lead_requests: Vec<LeadRequest>,
}

impl PortfolioDocument {
    /// Give every entry that lacks one a stable id.
    ///
    /// Documents written before projects, experiences and leads carried ids
    /// identify those entries only by position. Returns how many ids were
    /// assigned.
    pub fn normalize(&mut self) -> usize {
        let mut assigned = 0;
        let mut assign = |id: &mut ItemId, collection: Collection| {
            if id.is_blank() {
                *id = ItemId::generate(collection.id_prefix());
                assigned += 1;
            }
        };
        for post in &mut self.blog_posts {
            assign(&mut post.id, Collection::BlogPosts);
        }
        for project in &mut self.projects {
            assign(&mut project.id, Collection::Projects);
        }
        for experience in &mut self.experiences {
            assign(&mut experience.id, Collection::Experiences);
        }
        for lead in &mut self.lead_requests {
            assign(&mut lead.id, Collection::LeadRequests);
        }
        assigned
    }

    /// Number of entries in a collection.
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::BlogPosts => self.blog_posts.len(),
            Collection::Projects => self.projects.len(),
            Collection::Experiences => self.experiences.len(),
            Collection::LeadRequests => self.lead_requests.len(),
        }
    }

    /// Ids of a collection, in document order.
    pub fn ids_of(&self, collection: Collection) -> Vec<&ItemId> {
        match collection {
            Collection::BlogPosts => self.blog_posts.iter().map(|p| &p.id).collect(),
            Collection::Projects => self.projects.iter().map(|p| &p.id).collect(),
            Collection::Experiences => self.experiences.iter().map(|e| &e.id).collect(),
            Collection::LeadRequests => self.lead_requests.iter().map(|l| &l.id).collect(),
        }
    }

    /// Position of the entry with `id`, if present.
    pub fn position(&self, collection: Collection, id: &ItemId) -> Option<usize> {
        self.ids_of(collection).iter().position(|candidate| *candidate == id)
    }

    pub fn post(&self, id: &ItemId) -> Option<&BlogPost> {
        self.blog_posts.iter().find(|p| &p.id == id)
    }

    pub fn project(&self, id: &ItemId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn experience(&self, id: &ItemId) -> Option<&Experience> {
        self.experiences.iter().find(|e| &e.id == id)
    }

    pub fn lead(&self, id: &ItemId) -> Option<&LeadRequest> {
        self.lead_requests.iter().find(|l| &l.id == id)
    }

    /// A copy of this document without the entry `id`, or `None` if the
    /// collection has no such entry. Relative order of the remaining entries
    /// is preserved.
    pub fn without(&self, collection: Collection, id: &ItemId) -> Option<Self> {
        let index = self.position(collection, id)?;
        let mut next = self.clone();
        match collection {
            Collection::BlogPosts => {
                next.blog_posts.remove(index);
            }
            Collection::Projects => {
                next.projects.remove(index);
            }
            Collection::Experiences => {
                next.experiences.remove(index);
            }
            Collection::LeadRequests => {
                next.lead_requests.remove(index);
            }
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ProjectCategory;
    use proptest::prelude::*;

    fn project(title: &str) -> Project {
        Project {
            id: ItemId::generate("project"),
            title: title.into(),
            category: ProjectCategory::Personal,
            ..Default::default()
        }
    }

    #[test]
    fn empty_json_parses_to_default() {
        let doc: PortfolioDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, PortfolioDocument::default());
    }

    #[test]
    fn legacy_keys_are_accepted() {
        let doc: PortfolioDocument = serde_json::from_str(
            r#"{"blogs":[{"id":"blog-1","title":"A"}],"npmPackages":[{"name":"n","version":"1.0.0"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.blog_posts.len(), 1);
        assert_eq!(doc.packages.len(), 1);
    }

    #[test]
    fn normalize_assigns_missing_ids_once() {
        let mut doc: PortfolioDocument = serde_json::from_str(
            r#"{"projects":[{"title":"A"},{"title":"B"}],"experiences":[{"company":"C","role":"R"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.normalize(), 3);
        assert!(doc.projects.iter().all(|p| p.id.as_str().starts_with("project-")));
        assert_ne!(doc.projects[0].id, doc.projects[1].id);
        assert_eq!(doc.normalize(), 0);
    }

    #[test]
    fn without_removes_only_the_target() {
        let mut doc = PortfolioDocument::default();
        doc.projects = vec![project("a"), project("b"), project("c")];
        let target = doc.projects[1].id.clone();
        let next = doc.without(Collection::Projects, &target).unwrap();
        let titles: Vec<_> = next.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(doc.projects.len(), 3);
    }

    #[test]
    fn without_unknown_id_is_none() {
        let doc = PortfolioDocument::default();
        assert!(doc.without(Collection::BlogPosts, &ItemId::new("blog-x")).is_none());
    }

    proptest! {
        #[test]
        fn delete_preserves_relative_order(len in 1usize..12, pick in 0usize..12) {
            let index = pick % len;
            let mut doc = PortfolioDocument::default();
            doc.projects = (0..len).map(|i| project(&i.to_string())).collect();
            let target = doc.projects[index].id.clone();

            let next = doc.without(Collection::Projects, &target).unwrap();
            prop_assert_eq!(next.projects.len(), len - 1);

            let expected: Vec<_> = doc
                .projects
                .iter()
                .filter(|p| p.id != target)
                .map(|p| p.title.clone())
                .collect();
            let actual: Vec<_> = next.projects.iter().map(|p| p.title.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
