//! # Catalog Module
//!
//! The catalog is the host environment as seen by discovery: it answers
//! "is there a loadable type with this name" and "what does this controller
//! declare". Rust has no runtime reflection, so controllers describe
//! themselves as [`ControllerType`] values and are collected into a
//! [`ControllerRegistry`] at process start, either from code or from a
//! [`Manifest`] file.
//!
//! ## Example
//!
//! ```rust
//! use attroute::attributes::{Middleware, Route};
//! use attroute::catalog::{ControllerRegistry, ControllerType, Operation, TypeCatalog};
//!
//! let mut registry = ControllerRegistry::new();
//! registry
//!     .register_type("App\\AuthMiddleware")
//!     .register(
//!         ControllerType::concrete("App\\UserController")
//!             .middleware(Middleware::new(["App\\AuthMiddleware"]))
//!             .operation(Operation::new("index").route(Route::get("/users"))),
//!     );
//!
//! assert!(registry.type_exists("App\\AuthMiddleware"));
//! assert!(registry.controller("App\\UserController").is_some());
//! ```

mod manifest;
mod registry;
mod types;

pub use manifest::{Manifest, ManifestController, ManifestOperation};
pub use registry::{is_qualified_name, normalize_type_name, ControllerRegistry};
pub use types::{ControllerType, Operation, TypeKind, Visibility};

/// Type resolution by fully-qualified name.
pub trait TypeCatalog {
    /// Load a controller type. `None` means the host cannot load it.
    fn controller(&self, name: &str) -> Option<&ControllerType>;

    /// Whether a loadable type with this name exists (controller or plain type).
    fn type_exists(&self, name: &str) -> bool;
}

impl<T: TypeCatalog + ?Sized> TypeCatalog for &T {
    fn controller(&self, name: &str) -> Option<&ControllerType> {
        (**self).controller(name)
    }

    fn type_exists(&self, name: &str) -> bool {
        (**self).type_exists(name)
    }
}
