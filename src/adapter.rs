//! The request-handling adapter.
//!
//! The binder derives *what* to register; the adapter decides what one
//! request-time invocation looks like. It receives everything known about
//! a route at bind time and returns the final handler the route target
//! will store. Swap in your own implementation via
//! [`Rest::adapter`](crate::Rest::adapter) to change parameter coercion,
//! validation responses, or auth wiring for every route at once.

use std::sync::Arc;

use http::StatusCode;

use crate::catalog::MethodKey;
use crate::handler::{Authenticate as _, BoxedAuth, BoxedHandler, Handler, Invoke as _};
use crate::module::Rule;
use crate::request::Request;
use crate::response::Response;

/// Everything the adapter knows about one route at bind time.
pub struct BindContext<'a> {
    /// Which lifecycle method this route serves.
    pub key: MethodKey,
    /// The resource name the route belongs to.
    pub resource: &'a str,
    /// The user's handler, already normalized.
    pub handler: BoxedHandler,
    /// The `<key>Rule` companion, if the module carries one.
    pub rule: Option<Rule>,
    /// The configured authentication hook, if any.
    pub auth: Option<BoxedAuth>,
}

/// Builds the final request handler for one route.
pub trait RequestAdapter {
    fn bind(&self, ctx: BindContext<'_>) -> BoxedHandler;
}

/// The stock adapter: authentication, then validation, then the handler.
///
/// - The auth hook runs first; an `Err` response short-circuits the call.
/// - The rule runs next; a failure yields `422 Unprocessable Content`
///   carrying the rule's message.
/// - Only then does the user handler run.
///
/// The wrapper captures nothing but `Arc`s and caches nothing across
/// calls, so concurrent invocation needs no coordination.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAdapter;

impl RequestAdapter for DefaultAdapter {
    fn bind(&self, ctx: BindContext<'_>) -> BoxedHandler {
        let BindContext { handler, rule, auth, .. } = ctx;

        let bound = move |req: Request| {
            let handler = Arc::clone(&handler);
            let rule = rule.clone();
            let auth = auth.clone();
            async move {
                let req = match &auth {
                    Some(hook) => match hook.check(req).await {
                        Ok(req) => req,
                        Err(denied) => return denied,
                    },
                    None => req,
                };
                if let Some(rule) = &rule {
                    if let Err(message) = (rule.as_ref())(&req) {
                        return Response::builder()
                            .status(StatusCode::UNPROCESSABLE_ENTITY)
                            .text(message);
                    }
                }
                handler.call(req).await
            }
        };
        bound.into_boxed_handler()
    }
}
