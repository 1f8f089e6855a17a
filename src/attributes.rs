//! # Declarations
//!
//! The declaration vocabulary attached to controller types and their operations.
//! These are plain data records; nothing here validates. The discovery engine
//! decides what is acceptable when it registers routes.
//!
//! | Declaration         | Attaches to          | Repeatable |
//! |---------------------|----------------------|------------|
//! | [`Route`]           | operation            | no         |
//! | [`Middleware`]      | type, operation      | yes        |
//! | [`WithoutMiddleware`] | type, operation    | yes        |
//!
//! ```rust
//! use attroute::attributes::{Middleware, Route, WithoutMiddleware};
//!
//! let route = Route::new(["PUT", "PATCH"], "/users/{id}").with_name("users.update");
//! let auth = Middleware::new(["App\\Http\\AuthMiddleware"]);
//! let public = WithoutMiddleware::new(["App\\Http\\AuthMiddleware"]);
//! assert_eq!(route.methods.len(), 2);
//! assert_eq!(auth.classes, public.classes);
//! ```

use serde::{Deserialize, Serialize};

/// Declares an HTTP route on a controller operation.
///
/// `path` may carry router-specific capture syntax (`/users/{id:\d+}`); it is
/// passed through verbatim after slash trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// HTTP methods, matched case-insensitively (`GET`, `post`, ...)
    pub methods: Vec<String>,
    /// Route pattern relative to the prefix
    pub path: String,
    /// Optional prefix prepended to `path`
    #[serde(default)]
    pub prefix: Option<String>,
    /// Optional route name for URL generation
    #[serde(default)]
    pub name: Option<String>,
}

impl Route {
    pub fn new<I, S>(methods: I, path: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Route {
            methods: methods.into_iter().map(Into::into).collect(),
            path: path.into(),
            prefix: None,
            name: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(["GET"], path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(["POST"], path)
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Applies middleware to a controller type or operation.
///
/// Type-level middleware runs for every route of the controller and always
/// precedes operation-level middleware in the effective chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Middleware {
    pub classes: Vec<String>,
}

impl Middleware {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Middleware {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Removes middleware from the effective chain of a type or operation.
///
/// Exclusions apply to the combined stack, so an operation-level exclusion
/// also removes middleware declared on the type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WithoutMiddleware {
    pub classes: Vec<String>,
}

impl WithoutMiddleware {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WithoutMiddleware {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }
}
