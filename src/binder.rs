//! The route binder.
//!
//! Takes one resolved resource at a time and turns its handler slots into
//! registrations: URL, identity, bound handler. Registration happens
//! immediately — a failure mid-pass aborts the mount, and routes already
//! handed to the target stay there, which is why a failed mount must be
//! treated as fatal by the caller.

use std::collections::HashSet;
use std::sync::Arc;

use http::Method;
use tracing::{info, warn};

use crate::adapter::{BindContext, RequestAdapter};
use crate::catalog::MethodKey;
use crate::config::{ConflictPolicy, RestConfig};
use crate::error::Error;
use crate::resolver::ResolvedResource;
use crate::target::{RegisteredRoute, RouteTarget};

/// One registration, as reported back by [`Rest::mount`](crate::Rest::mount).
#[derive(Clone, Debug)]
pub struct RouteRecord {
    pub method: Method,
    /// Registration identity, `METHOD:url`.
    pub name: String,
    /// URL template with `:name` parameter segments.
    pub path: String,
    pub resource: String,
    pub key: MethodKey,
}

/// Accumulates registrations for one mount pass.
pub(crate) struct Binder<'a, T, A> {
    target: &'a mut T,
    adapter: &'a A,
    config: &'a RestConfig,
    seen: HashSet<String>,
    records: Vec<RouteRecord>,
}

impl<'a, T: RouteTarget, A: RequestAdapter> Binder<'a, T, A> {
    pub(crate) fn new(target: &'a mut T, adapter: &'a A, config: &'a RestConfig) -> Self {
        Self {
            target,
            adapter,
            config,
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    /// Registers every canonical handler the module carries, in catalog
    /// order. Returns the error that aborted the pass, if any.
    pub(crate) fn bind(&mut self, resolved: ResolvedResource) -> Result<(), Error> {
        let ResolvedResource { prefix, resource, module } = resolved;

        for key in MethodKey::ALL {
            let Some(handler) = module.handler(key) else { continue };

            let spec = key.spec();
            let path = spec.url(&prefix, &resource).to_string();
            let name = format!("{}:{}", spec.method, path);

            if !self.seen.insert(name.clone()) {
                match self.config.conflict {
                    ConflictPolicy::Reject => return Err(Error::DuplicateRoute { name }),
                    ConflictPolicy::FirstWins => {
                        warn!(route = %name, "skipping duplicate route, first registration wins");
                        continue;
                    }
                }
            }

            let bound = self.adapter.bind(BindContext {
                key,
                resource: &resource,
                handler: Arc::clone(handler),
                rule: module.rule_for(key).cloned(),
                auth: self.config.auth.clone(),
            });

            self.target
                .register(RegisteredRoute {
                    method: spec.method.clone(),
                    name: name.clone(),
                    path: path.clone(),
                    handler: bound,
                })
                .map_err(|e| Error::Register { name: name.clone(), source: e })?;

            info!(method = %spec.method, url = %path, resource = %resource, handler = %key,
                "register rest route");

            self.records.push(RouteRecord {
                method: spec.method,
                name,
                path,
                resource: resource.clone(),
                key,
            });
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<RouteRecord> {
        self.records
    }
}
