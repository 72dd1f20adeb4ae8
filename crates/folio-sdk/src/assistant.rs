//! The portfolio assistant.
//!
//! Text and image generation are external services. They are reached
//! through [`TextGenerator`] and [`MediaGenerator`]; any failure is logged
//! and replaced with a fixed fallback so the public pages never surface a
//! service error.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use folio_types::{BlogPost, PortfolioDocument};

/// Shown when the text service fails.
pub const BUSY_MESSAGE: &str = "Sorry, my servers are a bit busy. Try again in a moment!";

/// Shown when the text service answers with nothing.
pub const EMPTY_REPLY_MESSAGE: &str = "Sorry, I ran into a small technical error.";

/// Error reported by an external generation service.
#[derive(Debug, Error)]
#[error("generation service failed: {0}")]
pub struct AssistantError(pub String);

/// Produces a text answer for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Produces an image URL (or data URI) for a prompt.
#[async_trait]
pub trait MediaGenerator: Send + Sync {
    async fn illustrate(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Answers visitor questions about the portfolio owner.
#[derive(Clone, Default)]
pub struct Assistant {
    text: Option<Arc<dyn TextGenerator>>,
    media: Option<Arc<dyn MediaGenerator>>,
}

impl Assistant {
    /// An assistant with no services attached. Every answer is the fallback.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: Arc<dyn TextGenerator>) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_media(mut self, media: Arc<dyn MediaGenerator>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn is_online(&self) -> bool {
        self.text.is_some()
    }

    /// Opening line of a conversation.
    pub fn greeting(doc: &PortfolioDocument) -> String {
        format!(
            "Hello! I'm the virtual assistant of {}. Ask me about experience, projects or skills.",
            doc.profile.name
        )
    }

    /// Build the prompt sent to the text service.
    ///
    /// Lead requests are private and never leave the process.
    pub fn prompt(doc: &PortfolioDocument, question: &str) -> String {
        let mut public = doc.clone();
        public.lead_requests.clear();
        let data = serde_json::to_string(&public).unwrap_or_default();
        format!(
            "You are the assistant of {name}, a {role}. \
             Answer using only the portfolio data below.\n\
             DATA: {data}\n\
             RULES:\n\
             - Use markdown **bold** for key terms and [links](url) where useful.\n\
             - Stay professional and concise.\n\
             - Only answer questions about {name}; politely decline anything else.\n\
             QUESTION: {question}",
            name = doc.profile.name,
            role = doc.profile.role,
        )
    }

    /// Answer `question`, falling back to a fixed message on any failure.
    pub async fn ask(&self, doc: &PortfolioDocument, question: &str) -> String {
        let Some(text) = &self.text else {
            return BUSY_MESSAGE.to_string();
        };
        match text.generate(&Self::prompt(doc, question)).await {
            Ok(answer) if answer.trim().is_empty() => EMPTY_REPLY_MESSAGE.to_string(),
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "assistant text generation failed");
                BUSY_MESSAGE.to_string()
            }
        }
    }

    /// Generate a cover illustration for `post`, keeping the current image on failure.
    pub async fn cover_image(&self, post: &BlogPost) -> String {
        let Some(media) = &self.media else {
            return post.image.clone();
        };
        let prompt = format!("Professional tech illustration for: {}", post.title);
        match media.illustrate(&prompt).await {
            Ok(url) if !url.trim().is_empty() => {
                debug!(post = %post.id, "generated cover image");
                url
            }
            Ok(_) => post.image.clone(),
            Err(e) => {
                warn!(post = %post.id, error = %e, "cover generation failed");
                post.image.clone()
            }
        }
    }

    /// Plain text for reading `post` aloud: code blocks are announced, not read.
    pub fn narration_text(post: &BlogPost) -> String {
        let mut body = String::new();
        let mut in_fence = false;
        for line in post.body.lines() {
            if line.trim_start().starts_with("```") {
                if !in_fence {
                    body.push_str(" [technical code block omitted] ");
                }
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            body.push_str(line);
            body.push(' ');
        }
        let body: String = body.chars().filter(|c| *c != '#' && *c != '*').collect();
        let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
        format!(
            "An article titled {}. Introduction: {}. Content: {}",
            post.title, post.excerpt, body
        )
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("text", &self.text.is_some())
            .field("media", &self.media.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use folio_store::default_document;
    use folio_types::{ItemId, LeadCategory, LeadRequest, LeadStatus};

    struct Echo {
        prompts: Mutex<Vec<String>>,
        reply: Result<String, String>,
    }

    impl Echo {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(reply.to_string()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err("quota exceeded".into()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(AssistantError)
        }
    }

    #[async_trait]
    impl MediaGenerator for Echo {
        async fn illustrate(&self, prompt: &str) -> Result<String, AssistantError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(AssistantError)
        }
    }

    fn post() -> BlogPost {
        default_document().blog_posts[0].clone()
    }

    #[tokio::test]
    async fn offline_assistant_answers_with_fallback() {
        let doc = default_document();
        let answer = Assistant::offline().ask(&doc, "What does Alex do?").await;
        assert_eq!(answer, BUSY_MESSAGE);
    }

    #[tokio::test]
    async fn answer_passes_through() {
        let echo = Echo::replying("**Alex** builds web apps.");
        let assistant = Assistant::offline().with_text(echo.clone());
        let answer = assistant.ask(&default_document(), "Who?").await;
        assert_eq!(answer, "**Alex** builds web apps.");
        let prompts = echo.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("QUESTION: Who?"));
    }

    #[tokio::test]
    async fn failure_and_empty_reply_fall_back() {
        let doc = default_document();
        let failing = Assistant::offline().with_text(Echo::failing());
        assert_eq!(failing.ask(&doc, "?").await, BUSY_MESSAGE);

        let empty = Assistant::offline().with_text(Echo::replying("   "));
        assert_eq!(empty.ask(&doc, "?").await, EMPTY_REPLY_MESSAGE);
    }

    #[test]
    fn prompt_excludes_lead_requests() {
        let mut doc = default_document();
        doc.lead_requests.push(LeadRequest {
            id: ItemId::new("lead-1"),
            client_name: "Dana".into(),
            client_email: "dana@private.example".into(),
            category: LeadCategory::WebApp,
            description: "Shop".into(),
            budget: None,
            date: String::new(),
            status: LeadStatus::New,
        });
        let prompt = Assistant::prompt(&doc, "Contact?");
        assert!(!prompt.contains("dana@private.example"));
        assert!(prompt.contains(&doc.profile.name));
    }

    #[tokio::test]
    async fn cover_image_keeps_original_on_failure() {
        let post = post();
        let failing = Assistant::offline().with_media(Echo::failing());
        assert_eq!(failing.cover_image(&post).await, post.image);
        assert_eq!(Assistant::offline().cover_image(&post).await, post.image);
    }

    #[tokio::test]
    async fn cover_image_uses_title_prompt() {
        let post = post();
        let echo = Echo::replying("https://img.example/cover.png");
        let assistant = Assistant::offline().with_media(echo.clone());
        assert_eq!(assistant.cover_image(&post).await, "https://img.example/cover.png");
        let prompts = echo.prompts.lock().unwrap();
        assert_eq!(prompts[0], format!("Professional tech illustration for: {}", post.title));
    }

    #[test]
    fn narration_skips_code_and_markup() {
        let mut post = post();
        post.title = "Typed APIs".into();
        post.excerpt = "Why types".into();
        post.body = "## Setup\nUse **strict** mode.\n```ts\nconst x = 1;\n```\nDone.".into();
        let text = Assistant::narration_text(&post);
        assert_eq!(
            text,
            "An article titled Typed APIs. Introduction: Why types. Content: Setup Use strict mode. [technical code block omitted] Done."
        );
        assert!(!text.contains("const x"));
    }

    #[test]
    fn greeting_names_owner() {
        let doc = default_document();
        assert!(Assistant::greeting(&doc).starts_with(&format!(
            "Hello! I'm the virtual assistant of {}.",
            doc.profile.name
        )));
    }
}
