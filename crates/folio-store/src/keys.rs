//! Blob store keys used by Folio.

/// Serialized [`PortfolioDocument`](folio_types::PortfolioDocument) (JSON).
pub const PORTFOLIO_DATA: &str = "portfolio_data";

/// Theme preference: `"dark"` or `"light"`.
pub const THEME: &str = "theme";

/// `"true"` while an operator session is active; absent otherwise.
pub const ADMIN_AUTH: &str = "admin_auth";

/// Role of the active session: `SUPER_ADMIN`, `EDITOR` or `VIEWER`.
pub const ADMIN_ROLE: &str = "admin_role";
