//! The convention resolver.
//!
//! Walks a handler tree top-down and derives, for every handler file, the
//! URL prefix and resource name its routes will use. Two conventions do
//! all the work:
//!
//! - **Nesting**: descending into a directory appends `/{dir}/:parent_id`
//!   (first level) or `/{dir}/:child_id` (second level) to the prefix.
//!   Two levels is the cap — a directory seen any deeper is skipped with a
//!   warning, though files *beside* it still resolve normally.
//! - **Index-folding**: an `index` file inside a resource directory
//!   addresses that directory's own collection. Its resource name becomes
//!   the directory name and the prefix drops the segment pair the descent
//!   appended, so `api/sites/index.rs` registers at `/sites`, not
//!   `/sites/:parent_id/index`.

use tracing::warn;

use crate::config::RestConfig;
use crate::error::Error;
use crate::module::HandlerModule;
use crate::path::UrlPath;
use crate::source::{EntryKind, ModuleSource};

/// Depth of parent/child resource nesting at the current walk position.
///
/// The two-level cap is encoded in the variants: there is no level below
/// [`Child`](Self::Child), so "too deep" is the absence of a level to
/// descend to rather than an integer comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NestingLevel {
    /// The handler directory itself.
    Root,
    /// Inside a first-level resource directory (`/parents/:parent_id/…`).
    Parent,
    /// Inside a second-level resource directory
    /// (`/parents/:parent_id/children/:child_id/…`).
    Child,
}

impl NestingLevel {
    /// The level reached by descending into a directory, paired with the
    /// URL parameter that descent appends. `None` at the cap.
    fn descend(self) -> Option<(NestingLevel, &'static str)> {
        match self {
            Self::Root   => Some((Self::Parent, "parent_id")),
            Self::Parent => Some((Self::Child, "child_id")),
            Self::Child  => None,
        }
    }

    fn is_nested(self) -> bool {
        !matches!(self, Self::Root)
    }
}

/// One handler file, resolved to its routing coordinates.
pub(crate) struct ResolvedResource {
    pub prefix: UrlPath,
    pub resource: String,
    pub module: HandlerModule,
}

/// Recursively resolves `dir`, handing each qualifying file to `emit`.
pub(crate) fn resolve<S, F>(
    source: &S,
    config: &RestConfig,
    dir: &str,
    prefix: &UrlPath,
    level: NestingLevel,
    emit: &mut F,
) -> Result<(), Error>
where
    S: ModuleSource,
    F: FnMut(ResolvedResource) -> Result<(), Error>,
{
    for entry in source.entries(dir)? {
        let location = format!("{dir}/{}", entry.name);
        match entry.kind {
            EntryKind::Directory => match level.descend() {
                Some((next, param)) => {
                    let next_prefix = prefix.with_literal(&entry.name).with_param(param);
                    resolve(source, config, &location, &next_prefix, next, emit)?;
                }
                None => {
                    warn!(directory = %location, "nesting too deep, one layer at most");
                }
            },
            EntryKind::File => {
                if !source.is_handler_file(&entry.name) {
                    continue;
                }
                let module = source
                    .load(&location, config)
                    .map_err(|e| Error::ModuleLoad { location: location.clone(), source: e })?;

                let stem = file_stem(&entry.name);
                let (prefix, resource) = if level.is_nested() && stem == "index" {
                    (prefix.without_last_pair(), dir_basename(dir).to_owned())
                } else {
                    (prefix.clone(), stem.to_owned())
                };
                emit(ResolvedResource { prefix, resource, module })?;
            }
        }
    }
    Ok(())
}

fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

fn dir_basename(dir: &str) -> &str {
    dir.rsplit('/').next().unwrap_or(dir)
}
