//! Minimal restree example — a handler tree mounted onto a matchit router.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! There is no HTTP server here: the example mounts the tree, prints the
//! registered routes, then dispatches a few requests by hand the way a
//! server loop would.

use std::collections::HashMap;

use http::{Method, StatusCode};
use restree::{
    blocking, BoxedHandler, HandlerModule, Invoke, MemorySource, MethodKey, RegisterError,
    RegisteredRoute, Request, Response, Rest, RestConfig, RouteTarget,
};

/// A matchit-backed route target: one radix tree per HTTP method.
struct RadixTarget {
    trees: HashMap<Method, matchit::Router<BoxedHandler>>,
}

impl RadixTarget {
    fn new() -> Self {
        Self { trees: HashMap::new() }
    }

    /// Dispatches one request the way a server loop would.
    async fn dispatch(&self, req: Request) -> Response {
        let Some(tree) = self.trees.get(req.method()) else {
            return Response::status(StatusCode::NOT_FOUND);
        };
        let path = req.path().to_owned();
        match tree.at(&path) {
            Ok(found) => {
                let mut req = req;
                for (name, value) in found.params.iter() {
                    req = req.with_param(name, value);
                }
                found.value.call(req).await
            }
            Err(_) => Response::status(StatusCode::NOT_FOUND),
        }
    }
}

impl RouteTarget for RadixTarget {
    fn register(&mut self, route: RegisteredRoute) -> Result<(), RegisterError> {
        // restree spells parameters `:id`; matchit spells them `{id}`.
        let path: Vec<String> = route
            .path
            .split('/')
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => format!("{{{name}}}"),
                None => seg.to_owned(),
            })
            .collect();

        self.trees
            .entry(route.method)
            .or_default()
            .insert(path.join("/"), route.handler)
            .map_err(|e| RegisterError::new(e.to_string()))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let source = MemorySource::new()
        .module(
            "api/users.rs",
            HandlerModule::new()
                .index(|_req: Request| async { Response::json(r#"[{"id":"1"},{"id":"2"}]"#) })
                .show(|req: Request| async move {
                    let id = req.param("id").unwrap_or("unknown").to_owned();
                    Response::json(format!(r#"{{"id":"{id}"}}"#))
                })
                .rule(MethodKey::Show, |req| {
                    req.param("id")
                        .filter(|id| id.chars().all(|c| c.is_ascii_digit()))
                        .map(|_| ())
                        .ok_or_else(|| "id must be numeric".to_owned())
                })
                .create(|req: Request| async move {
                    if req.body().is_empty() {
                        return Response::status(StatusCode::BAD_REQUEST);
                    }
                    Response::builder()
                        .status(StatusCode::CREATED)
                        .header("location", "/api/users/99")
                        .json(r#"{"id":"99"}"#)
                })
                // destroy has no await point; `blocking` adapts it.
                .destroy(blocking(|_req: Request| StatusCode::NO_CONTENT)),
        )
        // sites/index.rs folds onto the `sites` collection itself.
        .module(
            "api/sites/index.rs",
            HandlerModule::new()
                .index(|_req: Request| async { Response::json(r#"["alpha","beta"]"#) }),
        )
        // sites/pages.rs nests under /sites/:parent_id.
        .module(
            "api/sites/pages.rs",
            HandlerModule::new().index(|req: Request| async move {
                let site = req.param("parent_id").unwrap_or("unknown").to_owned();
                Response::json(format!(r#"{{"site":"{site}","pages":[]}}"#))
            }),
        );

    let config = RestConfig::new().prefix("/api").auth(|req: Request| async move {
        match req.header("x-api-key") {
            Some("sekret") => Ok(req),
            _ => Err(Response::status(StatusCode::UNAUTHORIZED)),
        }
    });

    let mut target = RadixTarget::new();
    let mounted = Rest::new(config)
        .mount(&source, &mut target)
        .expect("mount failed");

    println!("mounted {} routes:", mounted.len());
    for route in mounted.routes() {
        println!("  {:<6} {}", route.method.as_str(), route.path);
    }
    println!();

    let calls = [
        (Method::GET, "/api/users", "sekret"),
        (Method::GET, "/api/users/42", "sekret"),
        (Method::GET, "/api/users/forty-two", "sekret"),
        (Method::GET, "/api/sites", "sekret"),
        (Method::GET, "/api/sites/9/pages", "sekret"),
        (Method::DELETE, "/api/users/42", "sekret"),
        (Method::GET, "/api/users", "wrong-key"),
    ];

    for (method, path, key) in calls {
        let req = Request::new(method.clone(), path).with_header("x-api-key", key);
        let resp = target.dispatch(req).await;
        println!(
            "{:<6} {:<22} -> {} {}",
            method.as_str(),
            path,
            resp.status_code().as_u16(),
            String::from_utf8_lossy(resp.body()),
        );
    }
}
