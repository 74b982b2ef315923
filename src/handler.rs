//! Handler normalization and type erasure.
//!
//! # One invocable shape
//!
//! Handler modules are authored in two styles: `async fn`s (or closures
//! returning futures) and plain synchronous functions wrapped through
//! [`blocking`]. The registrar must not care which one it was handed, and
//! the route target must be able to store handlers for *different*
//! resources in one table. Both problems are solved the same way: every
//! handler is normalized **once**, when its module is built, into a
//! [`BoxedHandler`] — a heap-allocated trait object with a single uniform
//! entry point, [`Invoke::call`], returning a future.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn show(req: Request) -> Response { … }    ← user writes this
//!        ↓ HandlerModule::new().show(show)
//! show.into_boxed_handler()                        ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(show))                        ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn Invoke>
//! handler.call(req)  at request time               ← one vtable dispatch
//! ```
//!
//! Nothing here is polled during registration; futures are constructed at
//! request time by whatever runtime the route target lives in. A
//! `BoxedHandler` owns no mutable state, so concurrent invocation is safe
//! by construction.
//!
//! The same normalization applies to the optional authentication hook:
//! [`AuthRequest`] erases to a [`BoxedAuth`] when the configuration is
//! built, never per call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Invocation interface ──────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// The uniform invocation interface.
///
/// Route targets hold [`BoxedHandler`]s and call them through this trait
/// at request time — one `Arc` clone and one vtable dispatch per call.
pub trait Invoke {
    fn call(&self, req: Request) -> HandlerFuture;
}

/// A normalized handler, shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Invoke + Send + Sync + 'static>;

// ── Handler trait ─────────────────────────────────────────────────────────────

/// Implemented for every valid handler function.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` (or future-returning closure) with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// For a synchronous function, wrap it with [`blocking`]. The trait is
/// sealed: only the blanket impl below can satisfy it, which keeps the
/// normalization guarantee airtight.
pub trait Handler: sealed::Handler + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod sealed {
    pub trait Handler {}
    pub trait Auth {}
}

impl<F, Fut, R> sealed::Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Adapts a synchronous function to the [`Handler`] calling convention.
///
/// ```rust
/// use http::StatusCode;
/// use restree::{blocking, HandlerModule, Request};
///
/// let module = HandlerModule::new()
///     .destroy(blocking(|_req: Request| StatusCode::NO_CONTENT));
/// ```
pub fn blocking<F, R>(f: F) -> impl Handler
where
    F: Fn(Request) -> R + Send + Sync + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| std::future::ready(f(req))
}

/// Newtype bridging a concrete handler `F` into the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> Invoke for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> HandlerFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── Authentication hook ───────────────────────────────────────────────────────

/// A heap-allocated, type-erased future for authentication outcomes.
///
/// `Ok` passes the (possibly enriched) request through; `Err` is the
/// response that short-circuits the call.
pub type AuthFuture = Pin<Box<dyn Future<Output = Result<Request, Response>> + Send + 'static>>;

/// The uniform authentication interface, the hook-side twin of [`Invoke`].
///
/// Request adapters call the configured hook through this trait before
/// anything else runs.
pub trait Authenticate {
    fn check(&self, req: Request) -> AuthFuture;
}

/// A normalized authentication hook.
pub type BoxedAuth = Arc<dyn Authenticate + Send + Sync + 'static>;

/// Implemented for every valid authentication hook.
///
/// Automatically satisfied for any `async fn` with the signature:
///
/// ```text
/// async fn auth(req: Request) -> Result<Request, Response>
/// ```
///
/// Sealed, like [`Handler`], and normalized once — when the hook is set on
/// the configuration, not per request.
pub trait AuthRequest: sealed::Auth + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_auth(self) -> BoxedAuth;
}

impl<F, Fut> sealed::Auth for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Request, Response>> + Send + 'static,
{
}

impl<F, Fut> AuthRequest for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Request, Response>> + Send + 'static,
{
    fn into_boxed_auth(self) -> BoxedAuth {
        Arc::new(FnAuth(self))
    }
}

struct FnAuth<F>(F);

impl<F, Fut> Authenticate for FnAuth<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Request, Response>> + Send + 'static,
{
    fn check(&self, req: Request) -> AuthFuture {
        Box::pin((self.0)(req))
    }
}
