use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("post not found: {0}")]
    PostNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Login(#[from] folio_gate::LoginError),

    #[error("store error: {0}")]
    Store(#[from] folio_store::StoreError),

    #[error("gate error: {0}")]
    Gate(#[from] folio_gate::GateError),

    #[error("editor error: {0}")]
    Editor(#[from] folio_editor::EditorError),

    #[error("render error: {0}")]
    Render(#[from] folio_render::RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
