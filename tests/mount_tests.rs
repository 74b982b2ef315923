//! Integration tests for restree.
//!
//! Everything here goes through the public API: build a source, mount it,
//! inspect what reached the route target — and for the request-time
//! behavior, invoke the bound handlers the way a server loop would.

use std::collections::HashMap;

use http::{Method, StatusCode};
use restree::{
    ConflictPolicy, Error, HandlerModule, Invoke, LoadError, MemorySource, MethodKey, ModuleInit,
    RegisterError, RegisteredRoute, Request, Response, Rest, RestConfig, RouteTarget,
};

/// Records every registration; keeps the handlers so tests can invoke them.
#[derive(Default)]
struct Table {
    routes: Vec<RegisteredRoute>,
}

impl Table {
    fn names(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.name.as_str()).collect()
    }

    fn route(&self, name: &str) -> &RegisteredRoute {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no route named {name}"))
    }
}

impl RouteTarget for Table {
    fn register(&mut self, route: RegisteredRoute) -> Result<(), RegisterError> {
        self.routes.push(route);
        Ok(())
    }
}

fn full_module() -> HandlerModule {
    HandlerModule::new()
        .index(|_req: Request| async { Response::text("index") })
        .show(|_req: Request| async { Response::text("show") })
        .create(|_req: Request| async { Response::text("create") })
        .update(|_req: Request| async { Response::text("update") })
        .destroy(|_req: Request| async { Response::text("destroy") })
}

fn index_only() -> HandlerModule {
    HandlerModule::new().index(|_req: Request| async { Response::text("index") })
}

fn mount(source: &MemorySource, config: RestConfig) -> (Table, restree::Mounted) {
    let mut table = Table::default();
    let mounted = Rest::new(config).mount(source, &mut table).unwrap();
    (table, mounted)
}

#[test]
fn full_catalog_registers_five_routes_in_order() {
    let source = MemorySource::new().module("api/widgets.rs", full_module());
    let (table, mounted) = mount(&source, RestConfig::new());

    assert_eq!(
        table.names(),
        vec![
            "GET:/widgets",
            "GET:/widgets/:id",
            "POST:/widgets",
            "PUT:/widgets/:id",
            "DELETE:/widgets/:id",
        ]
    );
    assert_eq!(mounted.len(), 5);
    assert_eq!(
        mounted.routes().iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![
            MethodKey::Index,
            MethodKey::Show,
            MethodKey::Create,
            MethodKey::Update,
            MethodKey::Destroy,
        ]
    );
}

#[test]
fn partial_module_registers_only_its_exports() {
    let source = MemorySource::new().module(
        "api/widgets.rs",
        HandlerModule::new()
            .index(|_req: Request| async { Response::text("index") })
            .show(|_req: Request| async { Response::text("show") }),
    );
    let (table, _) = mount(&source, RestConfig::new());
    assert_eq!(table.names(), vec!["GET:/widgets", "GET:/widgets/:id"]);
}

#[test]
fn non_canonical_export_registers_nothing() {
    let source = MemorySource::new().module(
        "api/widgets.rs",
        HandlerModule::new().export("archive", |_req: Request| async { Response::text("no") }),
    );
    let (table, mounted) = mount(&source, RestConfig::new());
    assert!(table.routes.is_empty());
    assert!(mounted.is_empty());
}

#[test]
fn nested_file_registers_under_parent_prefix() {
    let source = MemorySource::new().module(
        "api/parents/widgets.rs",
        HandlerModule::new().create(|_req: Request| async { Response::text("create") }),
    );
    let (table, _) = mount(&source, RestConfig::new());
    assert_eq!(table.names(), vec!["POST:/parents/:parent_id/widgets"]);
}

#[test]
fn index_file_folds_onto_its_directory() {
    let source = MemorySource::new().module("api/sites/index.rs", index_only());
    let (table, _) = mount(&source, RestConfig::new().prefix("/api"));
    assert_eq!(table.names(), vec!["GET:/api/sites"]);
}

#[test]
fn prefix_is_normalized_before_resolution() {
    let source = MemorySource::new().module("api/widgets.rs", index_only());
    let (table, _) = mount(&source, RestConfig::new().prefix("///api//"));
    assert_eq!(table.names(), vec!["GET:/api/widgets"]);

    let source = MemorySource::new().module("api/widgets.rs", index_only());
    let (table, _) = mount(&source, RestConfig::new().prefix("/"));
    assert_eq!(table.names(), vec!["GET:/widgets"]);
}

#[test]
fn legacy_directory_is_the_fallback() {
    let source = MemorySource::new().module("apis/widgets.rs", index_only());
    let (table, _) = mount(&source, RestConfig::new());
    assert_eq!(table.names(), vec!["GET:/widgets"]);
}

#[test]
fn canonical_directory_beats_the_legacy_one() {
    let source = MemorySource::new()
        .module("api/widgets.rs", index_only())
        .module("apis/anchors.rs", index_only());
    let (table, _) = mount(&source, RestConfig::new());
    assert_eq!(table.names(), vec!["GET:/widgets"]);
}

#[test]
fn missing_directories_mount_zero_routes() {
    let source = MemorySource::new();
    let (table, mounted) = mount(&source, RestConfig::new());
    assert!(table.routes.is_empty());
    assert!(mounted.is_empty());
}

#[test]
fn route_identity_is_deterministic_across_mounts() {
    let source = MemorySource::new()
        .module("api/widgets.rs", full_module())
        .module("api/parents/sites.rs", full_module())
        .module("api/parents/children/objects.rs", index_only());

    let (first, _) = mount(&source, RestConfig::new().prefix("/api"));
    let (second, _) = mount(&source, RestConfig::new().prefix("/api"));
    assert_eq!(first.names(), second.names());
}

#[test]
fn colliding_routes_reject_by_default() {
    // widgets.rs and widgets/index.rs both derive GET:/widgets.
    let source = MemorySource::new()
        .module("api/widgets.rs", index_only())
        .module("api/widgets/index.rs", index_only());

    let mut table = Table::default();
    let err = Rest::new(RestConfig::new())
        .mount(&source, &mut table)
        .unwrap_err();
    match err {
        Error::DuplicateRoute { name } => assert_eq!(name, "GET:/widgets"),
        other => panic!("expected DuplicateRoute, got {other}"),
    }
}

#[test]
fn colliding_routes_keep_the_first_under_first_wins() {
    let source = MemorySource::new()
        .module("api/widgets.rs", index_only())
        .module("api/widgets/index.rs", index_only());

    let (table, mounted) = mount(
        &source,
        RestConfig::new().on_conflict(ConflictPolicy::FirstWins),
    );
    assert_eq!(table.names(), vec!["GET:/widgets"]);
    assert_eq!(mounted.len(), 1);
}

#[test]
fn load_failure_aborts_the_mount() {
    let root = unique_dir("load-failure");
    std::fs::create_dir_all(root.join("api")).unwrap();
    std::fs::write(root.join("api/widgets.rs"), b"").unwrap();

    let failing = restree::DirSource::new(
        &root,
        |_location: &str, _config: &RestConfig| -> Result<ModuleInit, LoadError> {
            Err(LoadError::new("boom"))
        },
    );

    let mut table = Table::default();
    let err = Rest::new(RestConfig::new())
        .mount(&failing, &mut table)
        .unwrap_err();
    assert!(matches!(err, Error::ModuleLoad { .. }));
    std::fs::remove_dir_all(&root).ok();
}

#[tokio::test]
async fn factory_modules_observe_the_mount_config() {
    let source = MemorySource::new().factory("api/echo.rs", |config| {
        let prefix = config.url_prefix().to_owned();
        HandlerModule::new().index(move |_req: Request| {
            let prefix = prefix.clone();
            async move { Response::text(prefix) }
        })
    });

    let (table, _) = mount(&source, RestConfig::new().prefix("/v3"));
    let route = table.route("GET:/v3/echo");
    let resp = route
        .handler
        .call(Request::new(Method::GET, "/v3/echo"))
        .await;
    assert_eq!(resp.body(), b"/v3");
}

#[tokio::test]
async fn rules_and_auth_travel_with_the_bound_handler() {
    let source = MemorySource::new().module(
        "api/widgets.rs",
        HandlerModule::new()
            .show(|req: Request| async move {
                Response::text(req.param("id").unwrap_or("?").to_owned())
            })
            .rule(MethodKey::Show, |req| {
                req.param("id")
                    .filter(|id| id.chars().all(|c| c.is_ascii_digit()))
                    .map(|_| ())
                    .ok_or_else(|| "id must be numeric".to_owned())
            }),
    );
    let config = RestConfig::new().auth(|req: Request| async move {
        match req.header("x-api-key") {
            Some("sekret") => Ok(req),
            _ => Err(Response::status(StatusCode::UNAUTHORIZED)),
        }
    });

    let (table, _) = mount(&source, config);
    let handler = &table.route("GET:/widgets/:id").handler;

    let denied = handler.call(Request::new(Method::GET, "/widgets/1")).await;
    assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);

    let invalid = handler
        .call(
            Request::new(Method::GET, "/widgets/x")
                .with_header("x-api-key", "sekret")
                .with_param("id", "x"),
        )
        .await;
    assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let ok = handler
        .call(
            Request::new(Method::GET, "/widgets/42")
                .with_header("x-api-key", "sekret")
                .with_param("id", "42"),
        )
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    assert_eq!(ok.body(), b"42");
}

// ── matchit round trip ────────────────────────────────────────────────────────

/// A matchit-backed target, the shape a real embedding would use.
#[derive(Default)]
struct RadixTarget {
    trees: HashMap<Method, matchit::Router<restree::BoxedHandler>>,
}

impl RadixTarget {
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

#[tokio::test]
async fn mounted_routes_answer_through_a_radix_router() {
    let source = MemorySource::new()
        .module(
            "api/parents/widgets.rs",
            HandlerModule::new().show(|req: Request| async move {
                let parent = req.param("parent_id").unwrap_or("?").to_owned();
                let id = req.param("id").unwrap_or("?").to_owned();
                Response::text(format!("{parent}/{id}"))
            }),
        )
        .module("api/sites/index.rs", index_only());

    let mut target = RadixTarget::default();
    Rest::new(RestConfig::new().prefix("/api"))
        .mount(&source, &mut target)
        .unwrap();

    let shown = target
        .dispatch(Request::new(Method::GET, "/api/parents/7/widgets/42"))
        .await;
    assert_eq!(shown.body(), b"7/42");

    let folded = target.dispatch(Request::new(Method::GET, "/api/sites")).await;
    assert_eq!(folded.status_code(), StatusCode::OK);

    let missing = target
        .dispatch(Request::new(Method::GET, "/api/nowhere"))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

// ── DirSource round trip ──────────────────────────────────────────────────────

fn unique_dir(tag: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static SEQ: AtomicUsize = AtomicUsize::new(0);
    std::env::temp_dir().join(format!(
        "restree-it-{tag}-{}-{}",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ))
}

#[test]
fn directory_trees_drive_conventions_with_a_manifest_loader() {
    let root = unique_dir("manifest");
    std::fs::create_dir_all(root.join("api/parents")).unwrap();
    std::fs::write(root.join("api/widgets.rs"), b"").unwrap();
    std::fs::write(root.join("api/parents/sites.rs"), b"").unwrap();
    std::fs::write(root.join("api/notes.txt"), b"").unwrap();

    let mut manifest: HashMap<String, ModuleInit> = HashMap::new();
    manifest.insert("api/widgets.rs".into(), index_only().into());
    manifest.insert("api/parents/sites.rs".into(), index_only().into());

    let source = restree::DirSource::new(&root, move |location: &str, _config: &RestConfig| {
        manifest
            .get(location)
            .cloned()
            .ok_or_else(|| LoadError::new(format!("no handler registered for `{location}`")))
    });

    let mut table = Table::default();
    let mounted = Rest::new(RestConfig::new()).mount(&source, &mut table).unwrap();

    assert_eq!(
        table.names(),
        vec!["GET:/parents/:parent_id/sites", "GET:/widgets"]
    );
    assert_eq!(mounted.len(), 2);

    std::fs::remove_dir_all(&root).ok();
}
