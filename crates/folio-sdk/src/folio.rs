use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use folio_editor::ContentEditor;
use folio_feed::NotificationLog;
use folio_gate::{AdminNavigator, MutationGate, Permissions, Section, Session, SessionResolver};
use folio_render::{
    filter_posts, related_posts, search, CommentBoard, LeadForm, LeadIntake, MarkdownRenderer,
    SearchResults, RELATED_LIMIT,
};
use folio_store::{BlobStore, ContentStore, FileBlobStore, InMemoryBlobStore, Theme};
use folio_types::{BlogPost, Comment, ItemId, LeadRequest, PortfolioDocument};

use crate::assistant::Assistant;
use crate::config::{FolioConfig, STORE_DIR};
use crate::error::{SdkError, SdkResult};

/// A blog post ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub post: BlogPost,
    pub html: String,
    pub related: Vec<BlogPost>,
    pub comments: Vec<Comment>,
}

/// High-level Folio API.
///
/// Owns one content store and the session, editor and renderer handles
/// that share it.
pub struct Folio {
    config: FolioConfig,
    blobs: Arc<dyn BlobStore>,
    store: Arc<ContentStore>,
    feed: Arc<NotificationLog>,
    sessions: Arc<SessionResolver>,
    navigator: AdminNavigator,
    gate: Arc<MutationGate>,
    editor: ContentEditor,
    comments: CommentBoard,
    intake: LeadIntake,
    renderer: MarkdownRenderer,
    assistant: Assistant,
}

impl Folio {
    /// Open the data directory `data_dir`: `folio.toml` plus a file-backed store.
    pub fn open(data_dir: &Path) -> SdkResult<Self> {
        let config = FolioConfig::load(data_dir)?;
        let blobs = FileBlobStore::open(data_dir.join(STORE_DIR))?;
        Self::with_blobs(Arc::new(blobs), config)
    }

    /// A throwaway instance over an in-memory store.
    pub fn in_memory() -> SdkResult<Self> {
        Self::with_blobs(Arc::new(InMemoryBlobStore::new()), FolioConfig::default())
    }

    /// Wire every subsystem over `blobs` and restore any persisted session.
    pub fn with_blobs(blobs: Arc<dyn BlobStore>, config: FolioConfig) -> SdkResult<Self> {
        let feed = Arc::new(match (config.feed.seed, config.feed.capacity) {
            (true, Some(cap)) => NotificationLog::with_capacity(cap),
            (true, None) => NotificationLog::new(),
            (false, Some(cap)) => NotificationLog::empty_with_capacity(cap),
            (false, None) => NotificationLog::empty(),
        });
        let store = Arc::new(ContentStore::load(Arc::clone(&blobs)));
        let sessions = Arc::new(SessionResolver::new(
            Arc::clone(&blobs),
            config.gate.credentials.clone(),
            Arc::clone(&feed),
        ));
        sessions.restore()?;
        let navigator = AdminNavigator::new(Arc::clone(&sessions), Arc::clone(&feed));
        let gate = Arc::new(MutationGate::with_default_stages(config.gate.clone()));
        let editor = ContentEditor::new(
            Arc::clone(&store),
            Arc::clone(&sessions),
            Arc::clone(&gate),
            Arc::clone(&feed),
        );
        let comments = CommentBoard::with_latency(Duration::from_millis(config.comment_latency_ms));
        let intake = LeadIntake::new(Arc::clone(&store), Arc::clone(&gate), Arc::clone(&feed));
        let renderer = MarkdownRenderer::new()?;

        info!(
            revision = store.revision(),
            session = %sessions.current(),
            "folio opened"
        );

        Ok(Self {
            config,
            blobs,
            store,
            feed,
            sessions,
            navigator,
            gate,
            editor,
            comments,
            intake,
            renderer,
            assistant: Assistant::offline(),
        })
    }

    /// Attach external generation services.
    pub fn with_assistant(mut self, assistant: Assistant) -> Self {
        self.assistant = assistant;
        self
    }

    // ---- Session ----

    pub fn login(&self, credential: &str) -> SdkResult<Session> {
        let session = self.sessions.login(credential)?;
        self.navigator.recheck();
        Ok(session)
    }

    pub fn logout(&self) -> SdkResult<()> {
        self.sessions.logout()?;
        self.navigator.recheck();
        Ok(())
    }

    pub fn session(&self) -> Session {
        self.sessions.current()
    }

    pub fn permissions(&self) -> Permissions {
        self.sessions.permissions()
    }

    /// Open an admin section; denied sections land on the overview.
    pub fn navigate(&self, section: Section) -> Section {
        self.navigator.navigate(section)
    }

    pub fn active_section(&self) -> Section {
        self.navigator.active()
    }

    pub fn visible_sections(&self) -> Vec<Section> {
        self.navigator.visible_sections()
    }

    // ---- Public views ----

    pub fn document(&self) -> Arc<PortfolioDocument> {
        self.store.snapshot()
    }

    pub fn search(&self, query: &str) -> SearchResults {
        search(&self.store.snapshot(), query, self.config.search)
    }

    pub fn filter_posts(&self, query: &str) -> Vec<BlogPost> {
        let doc = self.store.snapshot();
        filter_posts(&doc, query).into_iter().cloned().collect()
    }

    /// Render post `id` with its related posts and comments.
    pub fn post_page(&self, id: &ItemId) -> SdkResult<PostPage> {
        let doc = self.store.snapshot();
        let post = doc
            .post(id)
            .ok_or_else(|| SdkError::PostNotFound(id.to_string()))?;
        let html = self.renderer.render(&post.body);
        let related = related_posts(&doc, post, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect();
        debug!(post = %id, "rendered post page");
        Ok(PostPage {
            post: post.clone(),
            html,
            related,
            comments: self.comments.comments_for(id),
        })
    }

    pub async fn comment(
        &self,
        post_id: &ItemId,
        author: &str,
        body: &str,
    ) -> SdkResult<Comment> {
        if self.store.snapshot().post(post_id).is_none() {
            return Err(SdkError::PostNotFound(post_id.to_string()));
        }
        Ok(self.comments.submit(post_id.clone(), author, body).await?)
    }

    pub async fn submit_lead(&self, form: LeadForm) -> SdkResult<LeadRequest> {
        Ok(self.intake.submit(form).await?)
    }

    pub async fn ask(&self, question: &str) -> String {
        self.assistant.ask(&self.store.snapshot(), question).await
    }

    // ---- Theme ----

    pub fn theme(&self) -> SdkResult<Theme> {
        Ok(Theme::load(self.blobs.as_ref())?)
    }

    pub fn set_theme(&self, theme: Theme) -> SdkResult<()> {
        theme.save(self.blobs.as_ref())?;
        Ok(())
    }

    pub fn toggle_theme(&self) -> SdkResult<Theme> {
        let next = self.theme()?.toggle();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Adopt a document written to the blob store by another handle.
    pub fn sync(&self) -> SdkResult<bool> {
        Ok(self.store.sync_external()?)
    }

    // ---- Subsystems ----

    pub fn editor(&self) -> &ContentEditor {
        &self.editor
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.feed
    }

    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    pub fn gate(&self) -> &MutationGate {
        &self.gate
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }
}

impl std::fmt::Debug for Folio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Folio")
            .field("revision", &self.store.revision())
            .field("session", &self.sessions.current())
            .field("notifications", &self.feed.len())
            .field("assistant", &self.assistant)
            .finish()
    }
}
