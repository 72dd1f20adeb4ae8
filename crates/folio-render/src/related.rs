use folio_types::{BlogPost, PortfolioDocument};

/// Number of related posts shown under an article.
pub const RELATED_LIMIT: usize = 3;

/// Score of `candidate` against `post`: +5 for the same category, +2 per
/// shared tag.
pub fn relatedness(post: &BlogPost, candidate: &BlogPost) -> u32 {
    let category = if candidate.category == post.category { 5 } else { 0 };
    let shared = candidate.tags.iter().filter(|t| post.has_tag(t)).count() as u32;
    category + shared * 2
}

/// The posts most related to `post`, best first.
///
/// The post itself is excluded. Ties keep document order.
pub fn related_posts<'a>(doc: &'a PortfolioDocument, post: &BlogPost, limit: usize) -> Vec<&'a BlogPost> {
    let mut scored: Vec<(u32, &BlogPost)> = doc
        .blog_posts
        .iter()
        .filter(|candidate| candidate.id != post.id)
        .map(|candidate| (relatedness(post, candidate), candidate))
        .collect();
    // `sort_by` is stable.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::ItemId;

    fn post(id: &str, category: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            id: ItemId::new(id),
            title: id.into(),
            category: category.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn doc(posts: Vec<BlogPost>) -> PortfolioDocument {
        PortfolioDocument {
            blog_posts: posts,
            ..Default::default()
        }
    }

    #[test]
    fn category_outweighs_two_tags() {
        let target = post("t", "Backend", &["Go", "gRPC"]);
        let same_category = post("a", "Backend", &[]);
        let two_tags = post("b", "Frontend", &["Go", "gRPC"]);
        assert_eq!(relatedness(&target, &same_category), 5);
        assert_eq!(relatedness(&target, &two_tags), 4);
    }

    #[test]
    fn shared_category_and_tag_rank_first() {
        let a = post("a", "Code", &["x"]);
        let d = doc(vec![a.clone(), post("b", "Code", &["x"]), post("c", "Other", &[])]);
        let ids: Vec<_> = related_posts(&d, &a, RELATED_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn excludes_self_and_caps() {
        let target = post("t", "AI", &["LLM"]);
        let d = doc(vec![
            target.clone(),
            post("a", "AI", &[]),
            post("b", "AI", &["LLM"]),
            post("c", "Web", &["LLM"]),
            post("d", "Web", &[]),
        ]);
        let ids: Vec<_> = related_posts(&d, &target, RELATED_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn ties_keep_document_order() {
        let target = post("t", "AI", &[]);
        let d = doc(vec![
            post("x", "Web", &[]),
            post("y", "Web", &[]),
            target.clone(),
            post("z", "Web", &[]),
        ]);
        let ids: Vec<_> = related_posts(&d, &target, RELATED_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn lone_post_has_no_relations() {
        let target = post("t", "AI", &[]);
        assert!(related_posts(&doc(vec![target.clone()]), &target, RELATED_LIMIT).is_empty());
    }
}
