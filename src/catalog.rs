//! The canonical method catalog.
//!
//! Exactly five handler names produce routes. Each maps to a fixed HTTP
//! verb and URL shape:
//!
//! | key       | verb   | url                |
//! |-----------|--------|--------------------|
//! | `index`   | GET    | `/{resource}`      |
//! | `show`    | GET    | `/{resource}/:id`  |
//! | `create`  | POST   | `/{resource}`      |
//! | `update`  | PUT    | `/{resource}/:id`  |
//! | `destroy` | DELETE | `/{resource}/:id`  |
//!
//! Anything else a handler module carries is invisible to routing.

use std::fmt;
use std::str::FromStr;

use http::Method;

use crate::path::UrlPath;

/// A canonical handler-method name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MethodKey {
    Index,
    Show,
    Create,
    Update,
    Destroy,
}

impl MethodKey {
    /// Every key, in registration order. The order is part of the crate's
    /// contract: route identities are derived the same way on every run.
    pub const ALL: [MethodKey; 5] = [
        Self::Index,
        Self::Show,
        Self::Create,
        Self::Update,
        Self::Destroy,
    ];

    /// Returns the lowercase handler name (e.g. `"show"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index   => "index",
            Self::Show    => "show",
            Self::Create  => "create",
            Self::Update  => "update",
            Self::Destroy => "destroy",
        }
    }

    /// Returns the route spec this key maps to.
    pub fn spec(self) -> RouteSpec {
        match self {
            Self::Index   => RouteSpec { method: Method::GET,    with_id: false },
            Self::Show    => RouteSpec { method: Method::GET,    with_id: true },
            Self::Create  => RouteSpec { method: Method::POST,   with_id: false },
            Self::Update  => RouteSpec { method: Method::PUT,    with_id: true },
            Self::Destroy => RouteSpec { method: Method::DELETE, with_id: true },
        }
    }
}

/// Parses a lowercase handler name (e.g. `"show"`). Anything outside the
/// five canonical names is rejected.
impl FromStr for MethodKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index"   => Ok(Self::Index),
            "show"    => Ok(Self::Show),
            "create"  => Ok(Self::Create),
            "update"  => Ok(Self::Update),
            "destroy" => Ok(Self::Destroy),
            _         => Err(()),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verb and URL shape one [`MethodKey`] contributes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteSpec {
    /// The HTTP verb the route answers to.
    pub method: Method,
    /// Whether the URL carries a trailing `:id` parameter.
    pub with_id: bool,
}

impl RouteSpec {
    /// Builds the full route URL: `prefix` + `/{resource}` (+ `/:id`).
    pub fn url(&self, prefix: &UrlPath, resource: &str) -> UrlPath {
        let url = prefix.with_literal(resource);
        if self.with_id { url.with_param("id") } else { url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_exactly_the_five_rest_routes() {
        let prefix = UrlPath::root();
        let urls: Vec<(Method, String)> = MethodKey::ALL
            .iter()
            .map(|key| {
                let spec = key.spec();
                let url = spec.url(&prefix, "widgets").to_string();
                (spec.method, url)
            })
            .collect();

        assert_eq!(
            urls,
            vec![
                (Method::GET, "/widgets".to_owned()),
                (Method::GET, "/widgets/:id".to_owned()),
                (Method::POST, "/widgets".to_owned()),
                (Method::PUT, "/widgets/:id".to_owned()),
                (Method::DELETE, "/widgets/:id".to_owned()),
            ]
        );
    }

    #[test]
    fn url_extends_the_prefix() {
        let prefix = UrlPath::parse("/parents/:parent_id");
        let url = MethodKey::Update.spec().url(&prefix, "widgets");
        assert_eq!(url.to_string(), "/parents/:parent_id/widgets/:id");
    }

    #[test]
    fn only_canonical_names_parse() {
        assert_eq!("destroy".parse::<MethodKey>(), Ok(MethodKey::Destroy));
        assert!("archive".parse::<MethodKey>().is_err());
        assert!("Index".parse::<MethodKey>().is_err());
        assert!("".parse::<MethodKey>().is_err());
    }
}
