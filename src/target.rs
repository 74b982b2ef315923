//! The routing capability the registrar writes into.
//!
//! The registrar does not match requests — an existing router does. This
//! module is the seam between the two: the binder produces one
//! [`RegisteredRoute`] per derived route and hands it over through
//! [`RouteTarget::register`]. Once handed over, the route is owned by the
//! target; the registrar keeps only a lightweight
//! [`RouteRecord`](crate::RouteRecord) for its summary.

use std::fmt;

use http::Method;

use crate::handler::BoxedHandler;

/// A fully derived route, ready for the router's table.
pub struct RegisteredRoute {
    /// The HTTP verb.
    pub method: Method,
    /// Registration identity, `METHOD:url` (e.g. `GET:/api/widgets/:id`).
    pub name: String,
    /// URL template with `:name` parameter segments.
    pub path: String,
    /// The bound handler (auth + validation + user function).
    pub handler: BoxedHandler,
}

impl fmt::Debug for RegisteredRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRoute")
            .field("method", &self.method)
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Something that can accept route registrations.
///
/// Implement this for your router of choice. The one obligation: routes
/// registered here must be matchable later under the `:name` parameter
/// syntax (translate to your router's own syntax inside `register` if it
/// differs). Duplicate handling below [`ConflictPolicy`] level is the
/// target's own business — the registrar applies its policy before calling.
///
/// [`ConflictPolicy`]: crate::ConflictPolicy
pub trait RouteTarget {
    fn register(&mut self, route: RegisteredRoute) -> Result<(), RegisterError>;
}

/// A route target's refusal to accept a registration.
#[derive(Debug)]
pub struct RegisterError {
    message: String,
}

impl RegisterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RegisterError {}
