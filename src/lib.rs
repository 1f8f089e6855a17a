//! # attroute
//!
//! **attroute** discovers HTTP routes from declarations attached to controller
//! types and registers them, with their middleware, on an external router.
//!
//! ## Overview
//!
//! Point the engine at a directory of controller source files. Each file is
//! scanned lexically for the type it declares; types whose name ends in
//! `Controller` are loaded from a [`catalog`], and every public operation
//! carrying a [`Route`](attributes::Route) declaration is mapped on the router.
//! Middleware declared on the type and on the operation is composed into one
//! chain, resolved through a dependency container and attached to the route.
//!
//! ## Architecture
//!
//! - **[`attributes`]** - `Route`, `Middleware` and `WithoutMiddleware` declarations
//! - **[`catalog`]** - controller types as seen by discovery, registry and manifests
//! - **[`scanner`]** - lexical extraction of the type declared in a source file
//! - **[`discovery`]** - the discovery engine: walk, validate, compose, register
//! - **[`router`]** - the registrar interface and an in-memory route table
//! - **[`container`]** - the resolver interface and a factory container
//! - **[`config`]** - walk settings from the environment or a file
//! - **[`error`]** - discovery failures and their categories
//! - **[`logging`]** - `tracing-subscriber` setup for the binary
//! - **[`cli`]** - the `attroute` command line
//!
//! ### Discovery Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Disc as RouteDiscovery
//!     participant Scan as scanner
//!     participant Cat as TypeCatalog
//!     participant Router as RouteRegistrar
//!     participant DI as DependencyResolver
//!
//!     App->>Disc: discover("app/Controllers")
//!     loop every candidate file
//!         Disc->>Scan: extract_type_name_from_file(path)
//!         Scan-->>Disc: App\UserController
//!         Disc->>Cat: controller("App\UserController")
//!         Cat-->>Disc: ControllerType
//!     end
//!     loop every route of every concrete controller
//!         Disc->>Router: map(GET, "/users", UserController::index)
//!         Router-->>Disc: &mut Route
//!         Disc->>DI: resolve("App\AuthMiddleware")
//!         DI-->>Disc: middleware instance
//!         Disc->>Router: add_middleware(instance)
//!     end
//!     Disc-->>App: DiscoveryReport
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attroute::catalog::ControllerRegistry;
//! use attroute::container::Container;
//! use attroute::discovery::RouteDiscovery;
//! use attroute::router::RouteTable;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = ControllerRegistry::from_manifest("controllers.yaml")?;
//! let mut container: Container<String> = Container::new();
//! container.instance("App\\AuthMiddleware", "auth".to_string());
//! let mut routes: RouteTable<String> = RouteTable::new();
//!
//! let report = RouteDiscovery::new(&catalog, &mut routes, &container).discover("app/Controllers")?;
//! println!("{} routes from {} controllers", report.routes, report.controllers.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Semantics
//!
//! Discovery stops at the first problem and returns a
//! [`DiscoveryError`](error::DiscoveryError). Controllers are loaded before any
//! route is registered, and each controller is validated before its first
//! route is mapped; route conflicts and middleware failures can still leave
//! earlier routes registered.

pub mod attributes;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod container;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod router;
pub mod scanner;

pub use catalog::{ControllerRegistry, ControllerType, TypeCatalog};
pub use container::{Container, DependencyResolver};
pub use discovery::{DiscoveryReport, RouteDiscovery};
pub use error::{DiscoveryError, ErrorCategory};
pub use router::{HandlerRef, RouteHandle, RouteRegistrar, RouteTable};
