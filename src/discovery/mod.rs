//! # Discovery Module
//!
//! Finds controller types under a directory and registers their routes with
//! a [`RouteRegistrar`](crate::router::RouteRegistrar), resolving middleware
//! through a [`DependencyResolver`](crate::container::DependencyResolver).
//!
//! ## Pipeline
//!
//! 1. **Walk** - every file under the root whose extension is configured
//!    (default `php`), sorted by file name.
//! 2. **Extract** - the first named type declared in the file
//!    ([`scanner`](crate::scanner)).
//! 3. **Filter** - the name must end with `Controller`; anything else is
//!    skipped silently.
//! 4. **Load** - the [`TypeCatalog`](crate::catalog::TypeCatalog) must know the
//!    controller. A file that looks like a controller but cannot be loaded is a
//!    fatal error. Abstract and interface types are skipped.
//! 5. **Plan** - per public operation declared directly on the controller:
//!    exactly zero or one `Route`, validated; final path from prefix and path;
//!    effective middleware chain.
//! 6. **Register** - per HTTP method: conflict check on `"METHOD /path"`,
//!    `map`, optional name, then middleware attached in chain order.
//!
//! ## Middleware Order
//!
//! Type-level declarations come first, then operation-level ones, each group
//! in declaration order. Exclusions from both levels are removed from the
//! combined list, then duplicates collapse to their first occurrence:
//!
//! ```text
//! type:      Middleware([A, B])
//! operation: Middleware([C, B]), WithoutMiddleware([A])
//! chain:     [B, C]
//! ```
//!
//! ## Failure Policy
//!
//! The first violation aborts the run with a [`DiscoveryError`](crate::error::DiscoveryError).
//! Routes registered before the failure remain registered. Discovering the
//! same controller twice with one engine (a second scan, or a symlinked file)
//! registers it once.
//!
//! ## Example
//!
//! ```rust
//! use attroute::attributes::{Middleware, Route};
//! use attroute::catalog::{ControllerRegistry, ControllerType, Operation, TypeCatalog};
//! use attroute::container::Container;
//! use attroute::discovery::RouteDiscovery;
//! use attroute::router::RouteTable;
//! use http::Method;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut catalog = ControllerRegistry::new();
//! catalog.register_type("Auth").register(
//!     ControllerType::concrete("App\\UserController")
//!         .middleware(Middleware::new(["Auth"]))
//!         .operation(Operation::new("index").route(Route::new(["GET", "HEAD"], "/users"))),
//! );
//! let mut container: Container<&'static str> = Container::new();
//! container.instance("Auth", "auth-middleware");
//! let mut table: RouteTable<&'static str> = RouteTable::new();
//!
//! let controller = catalog.controller("App\\UserController").unwrap();
//! let mut discovery = RouteDiscovery::new(&catalog, &mut table, &container);
//! assert_eq!(discovery.register_controller(controller)?, 2);
//! drop(discovery);
//!
//! let route = table.find(&Method::HEAD, "/users").unwrap();
//! assert_eq!(route.middleware, vec!["auth-middleware"]);
//! # Ok(())
//! # }
//! ```

mod chain;
mod core;
mod path;
mod validate;

pub use self::core::{
    plan_controller, DiscoveryReport, PlannedRoute, RouteDiscovery, SkipReason, SkippedController,
};
pub use chain::{effective_chain, MiddlewareChain, MAX_INLINE_MIDDLEWARE};
pub use path::build_route_path;
pub use validate::{allowed_methods_list, parse_http_method, ALLOWED_METHODS};
