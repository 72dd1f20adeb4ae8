use serde::{Deserialize, Serialize};

use folio_types::{BlogPost, PortfolioDocument, Project};

/// Maximum hits returned per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    pub projects: usize,
    pub posts: usize,
    pub skills: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            projects: 5,
            posts: 5,
            skills: 5,
        }
    }
}

/// Hits of a cross-collection search, each list in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub projects: Vec<Project>,
    pub posts: Vec<BlogPost>,
    pub skills: Vec<String>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.posts.is_empty() && self.skills.is_empty()
    }

    pub fn total(&self) -> usize {
        self.projects.len() + self.posts.len() + self.skills.len()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive substring search over projects (title, description,
/// stack), posts (title, excerpt, tags) and skill labels.
///
/// A blank query finds nothing.
pub fn search(doc: &PortfolioDocument, query: &str, limits: SearchLimits) -> SearchResults {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::default();
    }

    let projects = doc
        .projects
        .iter()
        .filter(|p| {
            contains(&p.title, &needle)
                || contains(&p.description, &needle)
                || p.stack.iter().any(|s| contains(s, &needle))
        })
        .take(limits.projects)
        .cloned()
        .collect();

    let posts = doc
        .blog_posts
        .iter()
        .filter(|p| {
            contains(&p.title, &needle)
                || contains(&p.excerpt, &needle)
                || p.tags.iter().any(|t| contains(t, &needle))
        })
        .take(limits.posts)
        .cloned()
        .collect();

    let skills = doc
        .skills
        .iter()
        .flat_map(|category| category.skills.iter())
        .filter(|s| contains(s, &needle))
        .take(limits.skills)
        .cloned()
        .collect();

    SearchResults {
        projects,
        posts,
        skills,
    }
}

/// Blog list filter over title, category and tags. A blank query keeps all.
pub fn filter_posts<'a>(doc: &'a PortfolioDocument, query: &str) -> Vec<&'a BlogPost> {
    let needle = query.trim().to_lowercase();
    doc.blog_posts
        .iter()
        .filter(|p| {
            needle.is_empty()
                || contains(&p.title, &needle)
                || contains(&p.category, &needle)
                || p.tags.iter().any(|t| contains(t, &needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::default_document;
    use folio_types::SkillCategory;

    #[test]
    fn blank_query_finds_nothing() {
        let doc = default_document();
        assert!(search(&doc, "", SearchLimits::default()).is_empty());
        assert!(search(&doc, "   ", SearchLimits::default()).is_empty());
    }

    #[test]
    fn search_spans_collections() {
        let doc = default_document();
        let results = search(&doc, "REACT", SearchLimits::default());
        assert!(results.projects.iter().any(|p| p.title == "RunWeek"));
        assert!(results.posts.iter().any(|p| p.id.as_str() == "blog-nextjs-rsc"));
        assert!(results.skills.contains(&"React".to_string()));
        assert!(results.skills.contains(&"React Native".to_string()));
    }

    #[test]
    fn search_matches_stack_and_tags() {
        let doc = default_document();
        let results = search(&doc, "prisma", SearchLimits::default());
        assert_eq!(results.projects.len(), 1);
        assert_eq!(results.projects[0].title, "ServCraft");

        let results = search(&doc, "grpc", SearchLimits::default());
        assert_eq!(results.posts.len(), 1);
    }

    #[test]
    fn results_are_capped_per_category() {
        let mut doc = default_document();
        doc.skills = vec![SkillCategory {
            title: "Many".into(),
            skills: (0..20).map(|i| format!("Skill {i}")).collect(),
        }];
        let results = search(&doc, "skill", SearchLimits::default());
        assert_eq!(results.skills.len(), 5);
        assert_eq!(results.skills[0], "Skill 0");

        let tight = SearchLimits {
            skills: 2,
            ..Default::default()
        };
        assert_eq!(search(&doc, "skill", tight).skills.len(), 2);
    }

    #[test]
    fn post_filter_matches_tags() {
        let doc = default_document();
        let hits = filter_posts(&doc, "architecture");
        let ids: Vec<_> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["blog-security", "blog-bun-grpc"]);
        assert_eq!(filter_posts(&doc, "").len(), doc.blog_posts.len());
    }
}
