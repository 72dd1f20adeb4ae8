use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use folio_feed::NotificationLog;
use folio_gate::{Action, GateResult, MutationGate, MutationRequest, SessionResolver};
use folio_store::ContentStore;
use folio_types::{display_date, Collection, Draft, ItemId, LeadStatus, PortfolioDocument, Profile};

use crate::error::{EditorError, EditorResult};
use crate::filter;
use crate::outcome::{EditOutcome, Export, ItemSummary, Overview};

const RECENT_POSTS: usize = 4;

/// Whether a draft is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    Editing(Draft),
}

/// The console's edit protocol over the shared [`ContentStore`].
///
/// Every mutation is authorized by the [`MutationGate`] for the current
/// session, applied to a fresh copy of the document, written back whole,
/// and announced in the [`NotificationLog`].
pub struct ContentEditor {
    store: Arc<ContentStore>,
    sessions: Arc<SessionResolver>,
    gate: Arc<MutationGate>,
    feed: Arc<NotificationLog>,
    state: RwLock<EditorState>,
}

impl ContentEditor {
    pub fn new(
        store: Arc<ContentStore>,
        sessions: Arc<SessionResolver>,
        gate: Arc<MutationGate>,
        feed: Arc<NotificationLog>,
    ) -> Self {
        Self {
            store,
            sessions,
            gate,
            feed,
            state: RwLock::new(EditorState::Idle),
        }
    }

    pub fn state(&self) -> EditorState {
        self.state.read().expect("lock poisoned").clone()
    }

    /// The open draft, if any.
    pub fn draft(&self) -> Option<Draft> {
        match &*self.state.read().expect("lock poisoned") {
            EditorState::Editing(draft) => Some(draft.clone()),
            EditorState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(*self.state.read().expect("lock poisoned"), EditorState::Editing(_))
    }

    /// Open a blank draft for a new entry.
    pub fn begin_create(&self, collection: Collection) -> EditorResult<EditOutcome> {
        let request = MutationRequest {
            collection: Some(collection),
            ..MutationRequest::action(Action::Create)
        };
        if let Some(denied) = self.authorize(&request)? {
            return Ok(denied);
        }
        let draft = Draft::blank(collection).ok_or(EditorError::NotDraftable(collection))?;
        debug!(%collection, "create draft opened");
        self.set_state(EditorState::Editing(draft));
        Ok(EditOutcome::Editing)
    }

    /// Open a draft holding a copy of the entry `id`.
    pub fn begin_edit(&self, collection: Collection, id: &ItemId) -> EditorResult<EditOutcome> {
        let doc = self.store.snapshot();
        let not_found = || EditorError::NotFound {
            collection,
            id: id.clone(),
        };
        let draft = match collection {
            Collection::BlogPosts => Draft::BlogPost {
                id: Some(id.clone()),
                post: doc.post(id).cloned().ok_or_else(not_found)?,
            },
            Collection::Projects => Draft::Project {
                id: Some(id.clone()),
                project: doc.project(id).cloned().ok_or_else(not_found)?,
            },
            Collection::Experiences => Draft::Experience {
                id: Some(id.clone()),
                experience: doc.experience(id).cloned().ok_or_else(not_found)?,
            },
            Collection::LeadRequests => return Err(EditorError::NotDraftable(collection)),
        };
        debug!(%collection, id = %id.short_id(), "edit draft opened");
        self.set_state(EditorState::Editing(draft));
        Ok(EditOutcome::Editing)
    }

    /// Mutate the open draft in place.
    pub fn update_draft(&self, f: impl FnOnce(&mut Draft)) -> EditorResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        match &mut *state {
            EditorState::Editing(draft) => {
                f(draft);
                Ok(())
            }
            EditorState::Idle => Err(EditorError::NotEditing),
        }
    }

    /// Discard the open draft. Returns `true` if one was open.
    pub fn cancel(&self) -> bool {
        let previous = std::mem::take(&mut *self.state.write().expect("lock poisoned"));
        matches!(previous, EditorState::Editing(_))
    }

    /// Save the open draft, stamping new entries with the current time.
    pub fn save(&self) -> EditorResult<EditOutcome> {
        self.save_at(Utc::now())
    }

    /// Save the open draft, stamping new entries with `now`.
    ///
    /// New entries are prepended with a generated id; existing entries are
    /// replaced at their id. If the entry being edited no longer exists the
    /// save fails with [`EditorError::NotFound`] and the document is untouched.
    pub fn save_at(&self, now: DateTime<Utc>) -> EditorResult<EditOutcome> {
        let draft = self.draft().ok_or(EditorError::NotEditing)?;
        let request = MutationRequest::save(draft.clone());
        if let Some(rejected) = self.authorize(&request)? {
            return Ok(rejected);
        }

        let mut doc = (*self.store.snapshot()).clone();
        let created = draft.is_new();
        let id = apply_draft(&mut doc, &draft, now)?;
        let revision = self.store.replace(doc)?;

        let (title, message) = save_message(&draft, created);
        if created {
            self.feed.success(title, message);
        } else {
            self.feed.info(title, message);
        }
        info!(collection = %draft.collection(), id = %id.short_id(), created, revision, "entry saved");

        self.set_state(EditorState::Idle);
        Ok(EditOutcome::Saved { id, created, revision })
    }

    /// Remove entry `id` once `confirm` agrees.
    ///
    /// `confirm` receives the entry's display title.
    pub fn delete(
        &self,
        collection: Collection,
        id: &ItemId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> EditorResult<EditOutcome> {
        if let Some(denied) = self.authorize(&MutationRequest::delete(collection))? {
            return Ok(denied);
        }

        let doc = self.store.snapshot();
        let label = entry_label(&doc, collection, id).ok_or_else(|| EditorError::NotFound {
            collection,
            id: id.clone(),
        })?;
        if !confirm(&label) {
            debug!(%collection, id = %id.short_id(), "delete declined");
            return Ok(EditOutcome::Declined);
        }

        let next = doc.without(collection, id).ok_or_else(|| EditorError::NotFound {
            collection,
            id: id.clone(),
        })?;
        let revision = self.store.replace(next)?;
        self.feed.warning("Deletion", "The item has been deleted.");
        info!(%collection, id = %id.short_id(), revision, "entry deleted");
        Ok(EditOutcome::Deleted {
            id: id.clone(),
            revision,
        })
    }

    /// Advance lead `id` along New → Contacted → Archived → New.
    pub fn toggle_lead_status(&self, id: &ItemId) -> EditorResult<EditOutcome> {
        let request = MutationRequest {
            collection: Some(Collection::LeadRequests),
            ..MutationRequest::action(Action::ToggleLeadStatus)
        };
        if let Some(denied) = self.authorize(&request)? {
            return Ok(denied);
        }

        let mut doc = (*self.store.snapshot()).clone();
        let lead = doc
            .lead_requests
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| EditorError::NotFound {
                collection: Collection::LeadRequests,
                id: id.clone(),
            })?;
        lead.status = lead.status.next();
        let (name, status) = (lead.client_name.clone(), lead.status);

        let revision = self.store.replace(doc)?;
        self.feed.info("Leads", format!("Request from {name} marked {status}."));
        info!(id = %id.short_id(), %status, revision, "lead status changed");
        Ok(EditOutcome::LeadUpdated {
            id: id.clone(),
            revision,
        })
    }

    /// Replace the owner profile.
    pub fn update_profile(&self, profile: Profile) -> EditorResult<EditOutcome> {
        if let Some(denied) = self.authorize(&MutationRequest::action(Action::UpdateProfile))? {
            return Ok(denied);
        }
        let mut doc = (*self.store.snapshot()).clone();
        doc.profile = profile;
        let revision = self.store.replace(doc)?;
        self.feed.success("System", "Profile settings updated.");
        info!(revision, "profile updated");
        Ok(EditOutcome::ProfileUpdated { revision })
    }

    /// Serialize the whole document as `backup-<timestamp-ms>.json`.
    pub fn export(&self, now: DateTime<Utc>) -> EditorResult<EditOutcome> {
        if let Some(denied) = self.authorize(&MutationRequest::action(Action::Export))? {
            return Ok(denied);
        }
        let contents = serde_json::to_string_pretty(&*self.store.snapshot())
            .map_err(|e| EditorError::Serialization(e.to_string()))?;
        let export = Export {
            file_name: format!("backup-{}.json", now.timestamp_millis()),
            contents,
        };
        self.feed.success("Export", "Data exported successfully.");
        info!(file = %export.file_name, bytes = export.contents.len(), "document exported");
        Ok(EditOutcome::Exported(export))
    }

    /// Entries of `collection` matching `query`. Leads are only listed for
    /// sessions that may view them.
    pub fn filter_items(&self, collection: Collection, query: &str) -> Vec<ItemSummary> {
        if collection == Collection::LeadRequests
            && !self.sessions.permissions().allows(Action::ViewLeads)
        {
            return Vec::new();
        }
        filter::filter_items(&self.store.snapshot(), collection, query)
    }

    /// Dashboard counters for the current document.
    pub fn overview(&self) -> Overview {
        let doc = self.store.snapshot();
        Overview {
            post_count: doc.blog_posts.len(),
            project_count: doc.projects.len(),
            experience_count: doc.experiences.len(),
            new_lead_count: doc
                .lead_requests
                .iter()
                .filter(|l| l.status == LeadStatus::New)
                .count(),
            recent_posts: doc.blog_posts.iter().take(RECENT_POSTS).cloned().collect(),
        }
    }

    /// Run `request` through the gate. Returns the outcome to report when
    /// it is rejected, after warning the operator.
    fn authorize(&self, request: &MutationRequest) -> EditorResult<Option<EditOutcome>> {
        let session = self.sessions.current();
        let result: GateResult = self.gate.evaluate(request, session)?;
        if result.is_accepted() {
            return Ok(None);
        }
        let reason = result.reason().unwrap_or_default().to_string();
        warn!(action = %request.action, %session, %reason, "mutation rejected");
        if result.is_denied() {
            self.feed.warning("Security", "Insufficient permissions for this action.");
            Ok(Some(EditOutcome::Denied { reason }))
        } else {
            self.feed.warning("Validation", format!("Cannot save: {reason}."));
            Ok(Some(EditOutcome::Invalid { reason }))
        }
    }

    fn set_state(&self, state: EditorState) {
        *self.state.write().expect("lock poisoned") = state;
    }
}

impl fmt::Debug for ContentEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentEditor")
            .field("editing", &self.is_editing())
            .field("session", &self.sessions.current())
            .finish()
    }
}

/// Write `draft` into `doc`, returning the id it was stored under.
fn apply_draft(doc: &mut PortfolioDocument, draft: &Draft, now: DateTime<Utc>) -> EditorResult<ItemId> {
    let collection = draft.collection();
    let not_found = |id: &ItemId| EditorError::NotFound {
        collection,
        id: id.clone(),
    };

    match draft {
        Draft::BlogPost { id: None, post } => {
            let mut post = post.clone();
            post.id = next_blog_id(doc, now);
            post.date = display_date(now);
            let id = post.id.clone();
            doc.blog_posts.insert(0, post);
            Ok(id)
        }
        Draft::BlogPost { id: Some(id), post } => {
            let slot = doc
                .blog_posts
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| not_found(id))?;
            *slot = post.clone();
            slot.id = id.clone();
            Ok(id.clone())
        }
        Draft::Project { id: None, project } => {
            let mut project = project.clone();
            project.id = ItemId::generate(collection.id_prefix());
            let id = project.id.clone();
            doc.projects.insert(0, project);
            Ok(id)
        }
        Draft::Project { id: Some(id), project } => {
            let slot = doc
                .projects
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| not_found(id))?;
            *slot = project.clone();
            slot.id = id.clone();
            Ok(id.clone())
        }
        Draft::Experience { id: None, experience } => {
            let mut experience = experience.clone();
            experience.id = ItemId::generate(collection.id_prefix());
            let id = experience.id.clone();
            doc.experiences.insert(0, experience);
            Ok(id)
        }
        Draft::Experience { id: Some(id), experience } => {
            let slot = doc
                .experiences
                .iter_mut()
                .find(|e| &e.id == id)
                .ok_or_else(|| not_found(id))?;
            *slot = experience.clone();
            slot.id = id.clone();
            Ok(id.clone())
        }
    }
}

/// `blog-<ms>`, advancing the timestamp past any id already taken.
fn next_blog_id(doc: &PortfolioDocument, now: DateTime<Utc>) -> ItemId {
    let mut ms = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    loop {
        let candidate = ItemId::blog(ms);
        if doc.post(&candidate).is_none() {
            return candidate;
        }
        ms += 1;
    }
}

fn save_message(draft: &Draft, created: bool) -> (&'static str, String) {
    match (draft, created) {
        (Draft::BlogPost { post, .. }, true) => ("Content", format!("Post \"{}\" created.", post.title)),
        (Draft::BlogPost { post, .. }, false) => ("Content", format!("Post \"{}\" updated.", post.title)),
        (Draft::Project { project, .. }, true) => ("Portfolio", format!("Project \"{}\" added.", project.title)),
        (Draft::Project { project, .. }, false) => ("Portfolio", format!("Project \"{}\" updated.", project.title)),
        (Draft::Experience { .. }, true) => ("Experience", "New experience added.".to_string()),
        (Draft::Experience { .. }, false) => ("Experience", "Experience updated.".to_string()),
    }
}

fn entry_label(doc: &PortfolioDocument, collection: Collection, id: &ItemId) -> Option<String> {
    match collection {
        Collection::BlogPosts => doc.post(id).map(|p| p.title.clone()),
        Collection::Projects => doc.project(id).map(|p| p.title.clone()),
        Collection::Experiences => doc.experience(id).map(|e| format!("{} at {}", e.role, e.company)),
        Collection::LeadRequests => doc.lead(id).map(|l| l.client_name.clone()),
    }
}
