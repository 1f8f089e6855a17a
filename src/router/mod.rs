//! # Router Module
//!
//! The narrow interface discovery uses to drive an HTTP router.
//!
//! Discovery never matches requests. It calls [`RouteRegistrar::map`] once per
//! `(method, path)` pair, optionally names the returned [`RouteHandle`], and
//! attaches resolved middleware to it in chain order. Any router can be
//! adapted by implementing these two traits; [`RouteTable`] is the in-memory
//! implementation used by the CLI and by tests.
//!
//! ## Example
//!
//! ```rust
//! use attroute::router::{HandlerRef, RouteRegistrar, RouteHandle, RouteTable};
//! use http::Method;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut table: RouteTable<String> = RouteTable::new();
//! let route = table.map(&Method::GET, "/users", HandlerRef::new("App\\UserController", "index"))?;
//! route.set_name("users.index");
//! route.add_middleware("App\\AuthMiddleware".to_string());
//!
//! let registered = table.find(&Method::GET, "/users").unwrap();
//! assert_eq!(registered.handler.to_string(), "App\\UserController::index");
//! # Ok(())
//! # }
//! ```

mod table;

pub use table::{RegisteredRoute, RouteTable};

use http::Method;
use serde::Serialize;
use std::fmt;

/// Late-bound reference to a controller operation.
///
/// Routers store this instead of a controller instance; the controller is
/// resolved when a request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HandlerRef {
    pub controller: String,
    pub operation: String,
}

impl HandlerRef {
    pub fn new(controller: impl Into<String>, operation: impl Into<String>) -> Self {
        HandlerRef {
            controller: controller.into(),
            operation: operation.into(),
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.operation)
    }
}

/// A router that accepts route registrations.
pub trait RouteRegistrar {
    type Route: RouteHandle;

    /// Register `handler` for `method` and `path`, returning the route object
    /// so it can be named and given middleware.
    fn map(
        &mut self,
        method: &Method,
        path: &str,
        handler: HandlerRef,
    ) -> anyhow::Result<&mut Self::Route>;
}

/// The route object returned by [`RouteRegistrar::map`].
pub trait RouteHandle {
    /// Middleware instance type accepted by this route
    type Middleware;

    /// Whether [`set_name`](RouteHandle::set_name) is supported.
    fn supports_naming(&self) -> bool {
        false
    }

    /// Name the route. Only called when `supports_naming` is `true`.
    fn set_name(&mut self, _name: &str) {}

    /// Append middleware; called in effective-chain order.
    fn add_middleware(&mut self, middleware: Self::Middleware);
}
