//! Handler modules.
//!
//! A [`HandlerModule`] is the Rust rendition of one handler file: up to
//! five lifecycle handlers in typed slots, plus optional per-method
//! validation rules. Handlers are normalized into their erased form the
//! moment they are added, so by the time a module reaches the binder there
//! is exactly one calling convention left.
//!
//! ```rust
//! use restree::{HandlerModule, MethodKey, Request, Response};
//!
//! let widgets = HandlerModule::new()
//!     .index(|_req: Request| async { Response::json("[]") })
//!     .show(|req: Request| async move {
//!         let id = req.param("id").unwrap_or("unknown").to_owned();
//!         Response::json(format!(r#"{{"id":"{id}"}}"#))
//!     })
//!     .rule(MethodKey::Show, |req| {
//!         req.param("id")
//!             .filter(|id| id.chars().all(|c| c.is_ascii_digit()))
//!             .map(|_| ())
//!             .ok_or_else(|| "id must be numeric".to_owned())
//!     });
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::MethodKey;
use crate::config::RestConfig;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;

/// A per-method validation rule, checked before the handler runs.
///
/// The companion of a handler slot: a module may carry a rule for `show`
/// without carrying one for `index`. An `Err` carries the message the
/// request adapter turns into a validation-failure response.
pub type Rule = Arc<dyn Fn(&Request) -> Result<(), String> + Send + Sync + 'static>;

/// One handler file's worth of lifecycle handlers and rules.
#[derive(Clone, Default)]
pub struct HandlerModule {
    handlers: HashMap<MethodKey, BoxedHandler>,
    rules: HashMap<MethodKey, Rule>,
}

impl HandlerModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a method key. Returns `self` for chaining.
    pub fn on(mut self, key: MethodKey, handler: impl Handler) -> Self {
        self.handlers.insert(key, handler.into_boxed_handler());
        self
    }

    pub fn index(self, handler: impl Handler) -> Self {
        self.on(MethodKey::Index, handler)
    }

    pub fn show(self, handler: impl Handler) -> Self {
        self.on(MethodKey::Show, handler)
    }

    pub fn create(self, handler: impl Handler) -> Self {
        self.on(MethodKey::Create, handler)
    }

    pub fn update(self, handler: impl Handler) -> Self {
        self.on(MethodKey::Update, handler)
    }

    pub fn destroy(self, handler: impl Handler) -> Self {
        self.on(MethodKey::Destroy, handler)
    }

    /// Attaches a validation rule to a method key.
    pub fn rule(
        mut self,
        key: MethodKey,
        rule: impl Fn(&Request) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.insert(key, Arc::new(rule));
        self
    }

    /// Registers a handler under a name, ignoring non-canonical names.
    ///
    /// This is the bridge for code that carries handler names as strings:
    /// `"show"` lands in the show slot; anything else (say `"archive"`) is
    /// dropped without routing and without error.
    pub fn export(self, name: &str, handler: impl Handler) -> Self {
        match name.parse::<MethodKey>() {
            Ok(key) => self.on(key, handler),
            Err(()) => {
                debug!(name, "ignoring export with non-canonical name");
                self
            }
        }
    }

    pub fn handler(&self, key: MethodKey) -> Option<&BoxedHandler> {
        self.handlers.get(&key)
    }

    pub fn rule_for(&self, key: MethodKey) -> Option<&Rule> {
        self.rules.get(&key)
    }

    /// True when no canonical handler is present.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// How a location yields its module: a ready-made map or a factory.
///
/// The factory form covers handlers that need late-bound context — it is
/// invoked with the active [`RestConfig`] during resolution, once per
/// mount.
#[derive(Clone)]
pub enum ModuleInit {
    /// A module built up front.
    Module(HandlerModule),
    /// A function producing the module at resolution time.
    Factory(Arc<dyn Fn(&RestConfig) -> HandlerModule + Send + Sync + 'static>),
}

impl ModuleInit {
    /// Wraps a factory function.
    pub fn factory(f: impl Fn(&RestConfig) -> HandlerModule + Send + Sync + 'static) -> Self {
        Self::Factory(Arc::new(f))
    }

    /// Produces the module, invoking the factory if there is one.
    pub fn build(&self, config: &RestConfig) -> HandlerModule {
        match self {
            Self::Module(module) => module.clone(),
            Self::Factory(f) => (f.as_ref())(config),
        }
    }
}

impl From<HandlerModule> for ModuleInit {
    fn from(module: HandlerModule) -> Self {
        Self::Module(module)
    }
}
