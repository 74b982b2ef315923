//! Module sources — where handler trees come from.
//!
//! The resolver walks an abstract tree: "given a location, produce a
//! mapping of named functions". Two implementations ship:
//!
//! - [`MemorySource`] — the tree is declared in code against virtual paths.
//!   The natural choice for compiled programs, where handlers are plain
//!   functions and the convention is a registration detail.
//! - [`DirSource`] — a real directory tree drives the conventions while a
//!   [`HandlerLoader`] supplies the module for each discovered file. Useful
//!   when the on-disk layout is the source of truth (scaffolding tools,
//!   mirrored project trees).
//!
//! Locations are `/`-separated paths relative to the source root, e.g.
//! `api/parents/widgets.rs`. Only files whose extension the source
//! recognizes count as handler files; everything else is skipped silently.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::RestConfig;
use crate::error::LoadError;
use crate::module::{HandlerModule, ModuleInit};

/// Whether a tree entry is a directory or a file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry of a tree directory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// A tree of handler module locations.
pub trait ModuleSource {
    /// True when `dir` exists at the root of this source. Drives the
    /// canonical-then-legacy directory selection at mount time.
    fn has_dir(&self, dir: &str) -> bool;

    /// Lists the entries of `dir` in a stable, name-sorted order.
    fn entries(&self, dir: &str) -> io::Result<Vec<SourceEntry>>;

    /// True when `name` carries a recognized handler-file extension.
    fn is_handler_file(&self, name: &str) -> bool;

    /// Produces the module for a file previously listed under `dir`.
    /// Factories are resolved here, with the active configuration.
    fn load(&self, location: &str, config: &RestConfig) -> Result<HandlerModule, LoadError>;
}

fn has_extension(name: &str, extensions: &[impl AsRef<str>]) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && extensions.iter().any(|e| e.as_ref() == ext),
        None => false,
    }
}

const DEFAULT_EXTENSION: &str = "rs";

// ── MemorySource ──────────────────────────────────────────────────────────────

/// An in-code handler tree.
///
/// Directories are implied by the registered paths — registering
/// `api/parents/widgets.rs` creates the `api` and `api/parents`
/// directories as far as the walk is concerned.
///
/// ```rust
/// use restree::{HandlerModule, MemorySource, Request, Response};
///
/// let source = MemorySource::new()
///     .module("api/widgets.rs", HandlerModule::new()
///         .index(|_req: Request| async { Response::json("[]") }))
///     .factory("api/tokens.rs", |config| {
///         let prefix = config.url_prefix().to_owned();
///         HandlerModule::new()
///             .index(move |_req: Request| {
///                 let prefix = prefix.clone();
///                 async move { Response::text(prefix) }
///             })
///     });
/// ```
#[derive(Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, ModuleInit>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a ready-made module at a virtual path.
    pub fn module(self, path: impl Into<String>, module: HandlerModule) -> Self {
        self.register(path, ModuleInit::Module(module))
    }

    /// Registers a factory at a virtual path; it runs at resolution time
    /// with the active configuration.
    pub fn factory(
        self,
        path: impl Into<String>,
        f: impl Fn(&RestConfig) -> HandlerModule + Send + Sync + 'static,
    ) -> Self {
        self.register(path, ModuleInit::factory(f))
    }

    /// Registers any [`ModuleInit`] at a virtual path.
    pub fn register(mut self, path: impl Into<String>, init: ModuleInit) -> Self {
        let path = path.into();
        let path = path.trim_matches('/').to_owned();
        self.files.insert(path, init);
        self
    }
}

impl ModuleSource for MemorySource {
    fn has_dir(&self, dir: &str) -> bool {
        let prefix = format!("{dir}/");
        self.files.keys().any(|k| k.starts_with(&prefix))
    }

    fn entries(&self, dir: &str) -> io::Result<Vec<SourceEntry>> {
        let prefix = format!("{dir}/");
        let mut listing: BTreeMap<&str, EntryKind> = BTreeMap::new();
        for key in self.files.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else { continue };
            match rest.split_once('/') {
                // A deeper path implies a directory at this level; a name
                // used both ways resolves to the directory.
                Some((first, _)) => {
                    listing.insert(first, EntryKind::Directory);
                }
                None => {
                    listing.entry(rest).or_insert(EntryKind::File);
                }
            }
        }
        Ok(listing
            .into_iter()
            .map(|(name, kind)| SourceEntry { name: name.to_owned(), kind })
            .collect())
    }

    fn is_handler_file(&self, name: &str) -> bool {
        has_extension(name, &[DEFAULT_EXTENSION])
    }

    fn load(&self, location: &str, config: &RestConfig) -> Result<HandlerModule, LoadError> {
        match self.files.get(location) {
            Some(init) => Ok(init.build(config)),
            None => Err(LoadError::new(format!("no module registered at `{location}`"))),
        }
    }
}

// ── DirSource ─────────────────────────────────────────────────────────────────

/// Supplies the module for a file a [`DirSource`] discovered on disk.
///
/// Any closure of the right shape qualifies; a map-backed manifest is one
/// closure away:
///
/// ```rust
/// use std::collections::HashMap;
/// use restree::{DirSource, LoadError, ModuleInit, RestConfig};
///
/// let manifest: HashMap<String, ModuleInit> = HashMap::new();
/// let source = DirSource::new("app", move |location: &str, _config: &RestConfig| {
///     manifest.get(location).cloned().ok_or_else(|| {
///         LoadError::new(format!("no handler registered for `{location}`"))
///     })
/// });
/// ```
pub trait HandlerLoader {
    fn load(&self, location: &str, config: &RestConfig) -> Result<ModuleInit, LoadError>;
}

impl<F> HandlerLoader for F
where
    F: Fn(&str, &RestConfig) -> Result<ModuleInit, LoadError>,
{
    fn load(&self, location: &str, config: &RestConfig) -> Result<ModuleInit, LoadError> {
        self(location, config)
    }
}

/// A handler tree backed by a real directory.
///
/// The walk reads the filesystem (names, directory/file kinds, extensions)
/// while the [`HandlerLoader`] turns each discovered location into a
/// module. Entries are sorted by name so repeated mounts of the same tree
/// derive identical route identities.
pub struct DirSource<L> {
    root: PathBuf,
    loader: L,
    extensions: Vec<String>,
}

impl<L: HandlerLoader> DirSource<L> {
    pub fn new(root: impl Into<PathBuf>, loader: L) -> Self {
        Self {
            root: root.into(),
            loader,
            extensions: vec![DEFAULT_EXTENSION.to_owned()],
        }
    }

    /// Replaces the recognized handler-file extensions (default: `rs`).
    pub fn extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

impl<L: HandlerLoader> ModuleSource for DirSource<L> {
    fn has_dir(&self, dir: &str) -> bool {
        self.root.join(dir).is_dir()
    }

    fn entries(&self, dir: &str) -> io::Result<Vec<SourceEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.root.join(dir))? {
            let entry = entry?;
            let kind = if entry.file_type()?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(SourceEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_handler_file(&self, name: &str) -> bool {
        has_extension(name, &self.extensions)
    }

    fn load(&self, location: &str, config: &RestConfig) -> Result<HandlerModule, LoadError> {
        Ok(self.loader.load(location, config)?.build(config))
    }
}
