//! The mount entry point.

use tracing::info;

use crate::adapter::{DefaultAdapter, RequestAdapter};
use crate::binder::{Binder, RouteRecord};
use crate::config::RestConfig;
use crate::error::Error;
use crate::path::UrlPath;
use crate::resolver::{resolve, NestingLevel};
use crate::source::ModuleSource;
use crate::target::RouteTarget;

/// The registrar.
///
/// Build one with a [`RestConfig`], optionally swap the request adapter,
/// then run [`mount`](Rest::mount) once at startup:
///
/// ```rust
/// use restree::{
///     HandlerModule, MemorySource, RegisterError, RegisteredRoute, Request,
///     Response, Rest, RestConfig, RouteTarget,
/// };
///
/// struct Table(Vec<RegisteredRoute>);
///
/// impl RouteTarget for Table {
///     fn register(&mut self, route: RegisteredRoute) -> Result<(), RegisterError> {
///         self.0.push(route);
///         Ok(())
///     }
/// }
///
/// let source = MemorySource::new().module(
///     "api/widgets.rs",
///     HandlerModule::new().index(|_req: Request| async { Response::json("[]") }),
/// );
///
/// let mut table = Table(Vec::new());
/// let mounted = Rest::new(RestConfig::new().prefix("/api"))
///     .mount(&source, &mut table)
///     .unwrap();
///
/// assert_eq!(mounted.routes()[0].path, "/api/widgets");
/// ```
pub struct Rest<A = DefaultAdapter> {
    config: RestConfig,
    adapter: A,
}

impl Rest<DefaultAdapter> {
    pub fn new(config: RestConfig) -> Self {
        Self { config, adapter: DefaultAdapter }
    }
}

impl<A: RequestAdapter> Rest<A> {
    /// Replaces the request adapter for every route this registrar binds.
    pub fn adapter<B: RequestAdapter>(self, adapter: B) -> Rest<B> {
        Rest { config: self.config, adapter }
    }

    /// Resolves the handler tree and registers every derived route.
    ///
    /// The URL prefix is normalized exactly once, here. The handler
    /// directory is the configured name first, the legacy name second; if
    /// neither exists the mount succeeds with zero routes. Any other
    /// failure aborts the pass — treat it as a startup failure.
    pub fn mount<S, T>(&self, source: &S, target: &mut T) -> Result<Mounted, Error>
    where
        S: ModuleSource,
        T: RouteTarget,
    {
        let prefix = UrlPath::parse(&self.config.url_prefix);

        let dir = if source.has_dir(self.config.handler_dir()) {
            self.config.handler_dir()
        } else if source.has_dir(self.config.fallback_dir()) {
            self.config.fallback_dir()
        } else {
            info!(prefix = %prefix, "no handler directory found, mounting zero routes");
            return Ok(Mounted { routes: Vec::new() });
        };

        info!(prefix = %prefix, dir, "mount rest api");

        let mut binder = Binder::new(target, &self.adapter, &self.config);
        resolve(
            source,
            &self.config,
            dir,
            &prefix,
            NestingLevel::Root,
            &mut |resolved| binder.bind(resolved),
        )?;

        Ok(Mounted { routes: binder.finish() })
    }
}

/// Summary of one completed mount pass.
#[derive(Clone, Debug, Default)]
pub struct Mounted {
    routes: Vec<RouteRecord>,
}

impl Mounted {
    /// Every registration, in the order it happened.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
