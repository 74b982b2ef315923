//! # restree
//!
//! Convention-over-configuration REST route registration. Nothing more.
//! Nothing less.
//!
//! ## The contract
//!
//! Your router matches requests. restree does not — by design. Given a
//! tree of handler modules, it derives the routes the tree implies and
//! registers them against whatever routing capability you hand it. The
//! router does router things; the registrar does registrar things.
//!
//! What your router / runtime already owns — restree intentionally ignores:
//!
//! - **Request matching** — radix trees, priorities, fallbacks
//! - **Serving** — connections, concurrency, shutdown
//! - **Parameter extraction** — the target matched `:id`, it fills it in
//!
//! What's left for restree — the only part that changes between trees:
//!
//! - Convention derivation — file and directory names become URLs
//! - Method binding — `index`, `show`, `create`, `update`, `destroy`
//!   become GET/POST/PUT/DELETE routes
//! - Wiring — auth hook and per-method validation rules folded into one
//!   bound handler per route
//!
//! ## The conventions
//!
//! | tree entry                     | routes at                              |
//! |--------------------------------|----------------------------------------|
//! | `api/widgets.rs`               | `/widgets`                             |
//! | `api/parents/widgets.rs`       | `/parents/:parent_id/widgets`          |
//! | `api/parents/kids/objects.rs`  | `/parents/:parent_id/kids/:child_id/objects` |
//! | `api/sites/index.rs`           | `/sites` (the directory's own routes)  |
//!
//! Nesting stops at two levels; deeper directories are skipped with a
//! warning. Within a module, each canonical method maps to one route:
//! `index` → `GET /{resource}`, `show` → `GET /{resource}/:id`,
//! `create` → `POST /{resource}`, `update` → `PUT /{resource}/:id`,
//! `destroy` → `DELETE /{resource}/:id`.
//!
//! ## Quick start
//!
//! ```rust
//! use restree::{
//!     HandlerModule, MemorySource, MethodKey, RegisterError, RegisteredRoute,
//!     Request, Response, Rest, RestConfig, RouteTarget,
//! };
//!
//! // The routing capability restree writes into — yours to implement.
//! struct Table(Vec<RegisteredRoute>);
//!
//! impl RouteTarget for Table {
//!     fn register(&mut self, route: RegisteredRoute) -> Result<(), RegisterError> {
//!         self.0.push(route);
//!         Ok(())
//!     }
//! }
//!
//! let source = MemorySource::new()
//!     .module("api/widgets.rs", HandlerModule::new()
//!         .index(|_req: Request| async { Response::json("[]") })
//!         .show(|req: Request| async move {
//!             let id = req.param("id").unwrap_or("unknown").to_owned();
//!             Response::json(format!(r#"{{"id":"{id}"}}"#))
//!         })
//!         .rule(MethodKey::Show, |req| {
//!             req.param("id")
//!                 .filter(|id| id.chars().all(|c| c.is_ascii_digit()))
//!                 .map(|_| ())
//!                 .ok_or_else(|| "id must be numeric".to_owned())
//!         }));
//!
//! let mut table = Table(Vec::new());
//! let mounted = Rest::new(RestConfig::new().prefix("/api"))
//!     .mount(&source, &mut table)
//!     .unwrap();
//!
//! let names: Vec<&str> = mounted.routes().iter().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, ["GET:/api/widgets", "GET:/api/widgets/:id"]);
//! ```

mod adapter;
mod binder;
mod catalog;
mod config;
mod error;
mod handler;
mod module;
mod mount;
mod path;
mod request;
mod resolver;
mod response;
mod source;
mod target;

pub use adapter::{BindContext, DefaultAdapter, RequestAdapter};
pub use binder::RouteRecord;
pub use catalog::{MethodKey, RouteSpec};
pub use config::{ConflictPolicy, RestConfig};
pub use error::{Error, LoadError};
pub use handler::{
    blocking, AuthFuture, AuthRequest, Authenticate, BoxedAuth, BoxedHandler, Handler,
    HandlerFuture, Invoke,
};
pub use module::{HandlerModule, ModuleInit, Rule};
pub use mount::{Mounted, Rest};
pub use path::{Segment, UrlPath};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use resolver::NestingLevel;
pub use source::{DirSource, EntryKind, HandlerLoader, MemorySource, ModuleSource, SourceEntry};
pub use target::{RegisterError, RegisteredRoute, RouteTarget};
