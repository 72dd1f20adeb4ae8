use folio_types::{Collection, PortfolioDocument};

use crate::outcome::ItemSummary;

fn matches(query: &str, fields: &[&str]) -> bool {
    query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(query))
}

/// Entries of `collection` whose searchable fields contain `query`
/// (case-insensitive), in document order. An empty query keeps everything.
///
/// Searched fields: title and category for posts, title and description for
/// projects, role and company for experiences, name, email and category for
/// leads.
pub fn filter_items(doc: &PortfolioDocument, collection: Collection, query: &str) -> Vec<ItemSummary> {
    let query = query.trim().to_lowercase();
    match collection {
        Collection::BlogPosts => doc
            .blog_posts
            .iter()
            .filter(|p| matches(&query, &[p.title.as_str(), p.category.as_str()]))
            .map(|p| ItemSummary {
                id: p.id.clone(),
                title: p.title.clone(),
                subtitle: format!("{} · {}", p.category, p.date),
            })
            .collect(),
        Collection::Projects => doc
            .projects
            .iter()
            .filter(|p| matches(&query, &[p.title.as_str(), p.description.as_str()]))
            .map(|p| ItemSummary {
                id: p.id.clone(),
                title: p.title.clone(),
                subtitle: p.category.to_string(),
            })
            .collect(),
        Collection::Experiences => doc
            .experiences
            .iter()
            .filter(|e| matches(&query, &[e.role.as_str(), e.company.as_str()]))
            .map(|e| ItemSummary {
                id: e.id.clone(),
                title: e.role.clone(),
                subtitle: format!("{} · {}", e.company, e.period),
            })
            .collect(),
        Collection::LeadRequests => doc
            .lead_requests
            .iter()
            .filter(|l| {
                let category = l.category.to_string();
                matches(&query, &[l.client_name.as_str(), l.client_email.as_str(), category.as_str()])
            })
            .map(|l| ItemSummary {
                id: l.id.clone(),
                title: l.client_name.clone(),
                subtitle: format!("{} · {} · {}", l.category, l.status, l.client_email),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::default_document;

    #[test]
    fn empty_query_keeps_all() {
        let doc = default_document();
        assert_eq!(filter_items(&doc, Collection::BlogPosts, "  ").len(), doc.blog_posts.len());
    }

    #[test]
    fn blog_filter_matches_title_or_category() {
        let doc = default_document();
        let by_category = filter_items(&doc, Collection::BlogPosts, "BACKEND");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id.as_str(), "blog-bun-grpc");

        let by_title = filter_items(&doc, Collection::BlogPosts, "owasp");
        assert_eq!(by_title[0].id.as_str(), "blog-security");
    }

    #[test]
    fn blog_filter_ignores_excerpt() {
        let doc = default_document();
        assert!(filter_items(&doc, Collection::BlogPosts, "deep dive").is_empty());
    }

    #[test]
    fn experience_filter_matches_company() {
        let doc = default_document();
        let hits = filter_items(&doc, Collection::Experiences, "nexus");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Fullstack Developer & Software Architect");
    }

    #[test]
    fn project_filter_matches_description() {
        let doc = default_document();
        let hits = filter_items(&doc, Collection::Projects, "rbac");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "project-servcraft");
    }
}
