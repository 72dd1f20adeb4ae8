use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use folio_feed::NotificationLog;
use folio_gate::{MutationGate, MutationRequest, Session};
use folio_store::ContentStore;
use folio_types::{display_date, Collection, ItemId, LeadCategory, LeadRequest, LeadStatus};

use crate::error::{RenderError, RenderResult};

/// What a visitor fills in on the contact form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub client_name: String,
    pub client_email: String,
    pub category: LeadCategory,
    pub description: String,
    #[serde(default)]
    pub budget: Option<String>,
}

impl LeadForm {
    fn into_lead(self) -> LeadRequest {
        LeadRequest {
            id: ItemId::generate(Collection::LeadRequests.id_prefix()),
            client_name: self.client_name.trim().to_string(),
            client_email: self.client_email.trim().to_string(),
            category: self.category,
            description: self.description.trim().to_string(),
            budget: self.budget.filter(|b| !b.trim().is_empty()),
            date: display_date(Utc::now()),
            status: LeadStatus::New,
        }
    }
}

/// Public contact-form intake. Submitted leads are appended to the document.
#[derive(Clone)]
pub struct LeadIntake {
    store: Arc<ContentStore>,
    gate: Arc<MutationGate>,
    feed: Arc<NotificationLog>,
}

impl LeadIntake {
    pub fn new(store: Arc<ContentStore>, gate: Arc<MutationGate>, feed: Arc<NotificationLog>) -> Self {
        Self { store, gate, feed }
    }

    /// Validate `form` and append it as a `New` lead.
    ///
    /// Runs as its own task; existing leads are left untouched.
    pub async fn submit(&self, form: LeadForm) -> RenderResult<LeadRequest> {
        let lead = form.into_lead();
        let verdict = self
            .gate
            .evaluate(&MutationRequest::submit_lead(lead.clone()), Session::Unauthenticated)?;
        if let Some(reason) = verdict.reason() {
            return Err(RenderError::Invalid(reason.to_string()));
        }

        let store = Arc::clone(&self.store);
        let feed = Arc::clone(&self.feed);
        let task = tokio::spawn(async move {
            let mut doc = (*store.snapshot()).clone();
            doc.lead_requests.push(lead.clone());
            let revision = store.replace(doc)?;
            feed.info("Leads", format!("New project request from {}.", lead.client_name));
            info!(id = %lead.id.short_id(), category = %lead.category, revision, "lead received");
            Ok::<_, RenderError>(lead)
        });

        task.await.map_err(|e| RenderError::Task(e.to_string()))?
    }
}

impl fmt::Debug for LeadIntake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadIntake")
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::InMemoryBlobStore;

    fn intake() -> (Arc<ContentStore>, LeadIntake) {
        let store = Arc::new(ContentStore::load(Arc::new(InMemoryBlobStore::new())));
        let intake = LeadIntake::new(
            store.clone(),
            Arc::new(MutationGate::default()),
            Arc::new(NotificationLog::empty()),
        );
        (store, intake)
    }

    fn form(email: &str) -> LeadForm {
        LeadForm {
            client_name: "Sam Rivera".into(),
            client_email: email.into(),
            category: LeadCategory::AiIntegration,
            description: "Chat assistant for support".into(),
            budget: Some("5k".into()),
        }
    }

    #[tokio::test]
    async fn submission_appends_new_lead() {
        let (store, intake) = intake();
        let first = intake.submit(form("sam@example.com")).await.unwrap();
        let second = intake.submit(form("ops@example.com")).await.unwrap();

        let doc = store.snapshot();
        assert_eq!(doc.lead_requests.len(), 2);
        assert_eq!(doc.lead_requests[0], first);
        assert_eq!(doc.lead_requests[1], second);
        assert_eq!(first.status, LeadStatus::New);
        assert!(first.id.as_str().starts_with("lead-"));
        assert_ne!(first.id, second.id);
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn email_without_at_sign_is_rejected() {
        let (store, intake) = intake();
        let err = intake.submit(form("sam.example.com")).await.unwrap_err();
        assert!(matches!(err, RenderError::Invalid(_)));
        assert!(store.snapshot().lead_requests.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let (_, intake) = intake();
        let mut f = form("sam@example.com");
        f.description = "   ".into();
        assert!(matches!(intake.submit(f).await, Err(RenderError::Invalid(_))));
    }

    #[tokio::test]
    async fn existing_leads_are_untouched() {
        let (store, intake) = intake();
        let earlier = intake.submit(form("sam@example.com")).await.unwrap();

        let jane = intake
            .submit(LeadForm {
                client_name: "Jane".into(),
                client_email: "jane@x.com".into(),
                category: LeadCategory::MobileApp,
                description: "d".into(),
                budget: None,
            })
            .await
            .unwrap();

        let doc = store.snapshot();
        assert_eq!(doc.lead_requests, vec![earlier, jane.clone()]);
        assert_eq!(jane.status, LeadStatus::New);
        assert!(!jane.id.is_blank());
    }
}
