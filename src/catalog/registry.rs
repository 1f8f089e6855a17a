use super::manifest::Manifest;
use super::types::ControllerType;
use super::TypeCatalog;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

#[allow(clippy::expect_used)]
static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\\[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("qualified name pattern is valid")
});

/// Strip the leading namespace separator from a fully-qualified name.
///
/// `\App\UserController` and `App\UserController` name the same type.
#[inline]
#[must_use]
pub fn normalize_type_name(name: &str) -> &str {
    name.trim().trim_start_matches('\\')
}

/// Whether `name` is a well-formed qualified type name (`Segment(\Segment)*`).
#[must_use]
pub fn is_qualified_name(name: &str) -> bool {
    QUALIFIED_NAME.is_match(normalize_type_name(name))
}

/// In-memory [`TypeCatalog`] populated by explicit registration.
///
/// Controllers register themselves at process start; middleware and other
/// plain types are registered by name so discovery can check they exist.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, ControllerType>,
    types: HashSet<String>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a YAML or JSON manifest file.
    pub fn from_manifest(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Manifest::load(path)?.into_registry()
    }

    /// Register a controller type, replacing any previous entry with the same name.
    pub fn register(&mut self, mut controller: ControllerType) -> &mut Self {
        let name = normalize_type_name(&controller.name).to_string();
        for op in &mut controller.operations {
            op.declared_in = normalize_type_name(&op.declared_in).to_string();
        }
        controller.name = name.clone();
        if self.controllers.contains_key(&name) {
            warn!(controller = %name, "Replaced existing controller registration");
        } else {
            debug!(controller = %name, kind = %controller.kind, "Controller registered");
        }
        self.controllers.insert(name, controller);
        self
    }

    /// Register a plain type (typically a middleware class) by name.
    pub fn register_type(&mut self, name: impl AsRef<str>) -> &mut Self {
        let name = normalize_type_name(name.as_ref()).to_string();
        debug!(type_name = %name, "Type registered");
        self.types.insert(name);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// All known type names (controllers and plain types), sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .controllers
            .keys()
            .chain(self.types.iter())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl TypeCatalog for ControllerRegistry {
    fn controller(&self, name: &str) -> Option<&ControllerType> {
        self.controllers.get(normalize_type_name(name))
    }

    fn type_exists(&self, name: &str) -> bool {
        let name = normalize_type_name(name);
        self.controllers.contains_key(name) || self.types.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Route;
    use crate::catalog::Operation;

    #[test]
    fn test_qualified_names() {
        assert!(is_qualified_name("UserController"));
        assert!(is_qualified_name("App\\Http\\UserController"));
        assert!(is_qualified_name("\\App\\Http\\UserController"));
        assert!(!is_qualified_name(""));
        assert!(!is_qualified_name("App\\\\UserController"));
        assert!(!is_qualified_name("App\\9Controller"));
        assert!(!is_qualified_name("App.UserController"));
    }

    #[test]
    fn test_lookup_ignores_leading_separator() {
        let mut registry = ControllerRegistry::new();
        registry
            .register(ControllerType::concrete("\\App\\UserController"))
            .register_type("App\\AuthMiddleware");

        assert!(registry.controller("App\\UserController").is_some());
        assert!(registry.controller("\\App\\UserController").is_some());
        assert!(registry.type_exists("\\App\\AuthMiddleware"));
        assert!(registry.type_exists("App\\UserController"));
        assert!(!registry.type_exists("App\\Missing"));
        assert!(registry.controller("App\\AuthMiddleware").is_none());
    }

    #[test]
    fn test_registered_name_is_normalized() {
        let base = ControllerType::abstract_type("\\App\\BaseController")
            .operation(Operation::new("health").route(Route::get("/health")));
        let mut registry = ControllerRegistry::new();
        registry.register(
            ControllerType::concrete("\\App\\UserController")
                .operation(Operation::new("index").route(Route::get("/users")))
                .extends(&base),
        );

        let users = registry.controller("App\\UserController").unwrap();
        assert_eq!(users.name, "App\\UserController");
        let declared_in: Vec<_> = users.operations.iter().map(|op| op.declared_in.as_str()).collect();
        assert_eq!(declared_in, vec!["App\\UserController", "App\\BaseController"]);
        let declared: Vec<_> = users.declared_operations().map(|op| op.name.as_str()).collect();
        assert_eq!(declared, vec!["index"]);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ControllerRegistry::new();
        registry.register(ControllerType::concrete("App\\UserController"));
        registry.register(ControllerType::abstract_type("App\\UserController"));
        assert_eq!(registry.len(), 1);
        assert!(!registry
            .controller("App\\UserController")
            .map(ControllerType::is_instantiable)
            .unwrap_or(true));
    }

    #[test]
    fn test_type_names_sorted_and_unique() {
        let mut registry = ControllerRegistry::new();
        registry
            .register(ControllerType::concrete("B\\Controller"))
            .register_type("A\\Middleware")
            .register_type("B\\Controller");
        assert_eq!(registry.type_names(), vec!["A\\Middleware", "B\\Controller"]);
    }
}
