//! Registrar configuration.

use crate::handler::{AuthRequest, BoxedAuth};

/// What happens when two routes derive the same name in one mount pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConflictPolicy {
    /// Abort the mount with an error. The default.
    #[default]
    Reject,
    /// Keep the first registration, skip the duplicate with a warning.
    FirstWins,
}

/// Configuration for a mount pass.
///
/// ```rust
/// use http::StatusCode;
/// use restree::{ConflictPolicy, Request, Response, RestConfig};
///
/// let config = RestConfig::new()
///     .prefix("/api")
///     .auth(|req: Request| async move {
///         if req.header("authorization").is_some() {
///             Ok(req)
///         } else {
///             Err(Response::status(StatusCode::UNAUTHORIZED))
///         }
///     })
///     .on_conflict(ConflictPolicy::FirstWins);
/// ```
#[derive(Clone, Default)]
pub struct RestConfig {
    pub(crate) url_prefix: String,
    pub(crate) auth: Option<BoxedAuth>,
    pub(crate) dir: Option<String>,
    pub(crate) legacy_dir: Option<String>,
    pub(crate) conflict: ConflictPolicy,
}

impl RestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL prefix every derived route starts with.
    ///
    /// Normalized once at mount time: `"/api/"` and `"///api"` both mean
    /// `/api`, and `"/"` means no prefix at all.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Installs an authentication hook, normalized immediately into its
    /// uniformly awaitable form. The default request adapter runs it before
    /// validation and the handler.
    pub fn auth(mut self, hook: impl AuthRequest) -> Self {
        self.auth = Some(hook.into_boxed_auth());
        self
    }

    /// Overrides the handler directory name (default `api`).
    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Overrides the fallback directory name (default `apis`).
    pub fn legacy_dir(mut self, dir: impl Into<String>) -> Self {
        self.legacy_dir = Some(dir.into());
        self
    }

    /// Sets the duplicate-route policy.
    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.conflict = policy;
        self
    }

    /// The configured (un-normalized) URL prefix.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub(crate) fn handler_dir(&self) -> &str {
        self.dir.as_deref().unwrap_or("api")
    }

    pub(crate) fn fallback_dir(&self) -> &str {
        self.legacy_dir.as_deref().unwrap_or("apis")
    }
}
