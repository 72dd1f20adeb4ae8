use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use folio_types::{display_date, Comment, ItemId};

use crate::error::{RenderError, RenderResult};

const COMMENT_ID_LEN: usize = 9;

/// Session-scoped reader comments. Nothing here is persisted.
#[derive(Clone, Default)]
pub struct CommentBoard {
    comments: Arc<RwLock<Vec<Comment>>>,
    latency: Duration,
}

impl CommentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board whose submissions settle after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Post a comment on `post_id`.
    ///
    /// The submission runs as its own task and resolves to the stored
    /// comment. Blank author or body is rejected before anything is spawned.
    pub async fn submit(
        &self,
        post_id: ItemId,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> RenderResult<Comment> {
        let author = author.into().trim().to_string();
        let body = body.into().trim().to_string();
        if author.is_empty() {
            return Err(RenderError::Invalid("author is required".into()));
        }
        if body.is_empty() {
            return Err(RenderError::Invalid("comment body is required".into()));
        }

        let comments = Arc::clone(&self.comments);
        let latency = self.latency;
        let task = tokio::spawn(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let comment = Comment {
                id: comment_id(),
                post_id,
                author,
                body,
                date: display_date(Utc::now()),
            };
            comments
                .write()
                .expect("lock poisoned")
                .insert(0, comment.clone());
            comment
        });

        let comment = task.await.map_err(|e| RenderError::Task(e.to_string()))?;
        debug!(post = %comment.post_id, id = %comment.id, "comment added");
        Ok(comment)
    }

    /// Comments on `post_id`, newest first.
    pub fn comments_for(&self, post_id: &ItemId) -> Vec<Comment> {
        self.comments
            .read()
            .expect("lock poisoned")
            .iter()
            .filter(|c| &c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.comments.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for CommentBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentBoard")
            .field("comment_count", &self.len())
            .field("latency", &self.latency)
            .finish()
    }
}

fn comment_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(COMMENT_ID_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}
