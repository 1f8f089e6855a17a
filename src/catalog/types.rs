use crate::attributes::{Middleware, Route, WithoutMiddleware};
use serde::{Deserialize, Serialize};

/// Instantiability of a catalogued type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Concrete,
    Abstract,
    Interface,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Concrete => write!(f, "concrete"),
            TypeKind::Abstract => write!(f, "abstract"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

/// Visibility of an operation. Only `Public` operations can carry routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// An operation (method) exposed by a controller type, with its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    /// Fully-qualified name of the type that declares this operation
    pub declared_in: String,
    pub visibility: Visibility,
    pub routes: Vec<Route>,
    pub middleware: Vec<Middleware>,
    pub without_middleware: Vec<WithoutMiddleware>,
}

impl Operation {
    /// A public operation without declarations. `declared_in` is filled in when
    /// the operation is attached to a type with [`ControllerType::operation`].
    pub fn new(name: impl Into<String>) -> Self {
        Operation {
            name: name.into(),
            declared_in: String::new(),
            visibility: Visibility::Public,
            routes: Vec::new(),
            middleware: Vec::new(),
            without_middleware: Vec::new(),
        }
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    #[must_use]
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    #[must_use]
    pub fn without_middleware(mut self, excluded: WithoutMiddleware) -> Self {
        self.without_middleware.push(excluded);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A type known to the host, described the way reflection would see it.
///
/// `operations` is in member-enumeration order and includes inherited
/// operations (their `declared_in` names the base type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerType {
    pub name: String,
    pub kind: TypeKind,
    pub middleware: Vec<Middleware>,
    pub without_middleware: Vec<WithoutMiddleware>,
    pub operations: Vec<Operation>,
}

impl ControllerType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        ControllerType {
            name: name.into(),
            kind,
            middleware: Vec::new(),
            without_middleware: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn concrete(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Concrete)
    }

    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Abstract)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    #[must_use]
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    #[must_use]
    pub fn without_middleware(mut self, excluded: WithoutMiddleware) -> Self {
        self.without_middleware.push(excluded);
        self
    }

    /// Attach an operation declared by this type.
    ///
    /// Redeclaring an operation that was inherited replaces it in place.
    #[must_use]
    pub fn operation(mut self, mut operation: Operation) -> Self {
        if operation.declared_in.is_empty() {
            operation.declared_in = self.name.clone();
        }
        match self.operations.iter_mut().find(|op| op.name == operation.name) {
            Some(existing) => *existing = operation,
            None => self.operations.push(operation),
        }
        self
    }

    /// Inherit the operations of `base` that this type does not redeclare.
    ///
    /// Inherited operations keep their original `declared_in`, so discovery
    /// can tell them apart from the type's own operations.
    #[must_use]
    pub fn extends(mut self, base: &ControllerType) -> Self {
        for op in &base.operations {
            if !self.operations.iter().any(|own| own.name == op.name) {
                self.operations.push(op.clone());
            }
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn is_instantiable(&self) -> bool {
        self.kind == TypeKind::Concrete
    }

    /// Public operations declared directly on this type, in enumeration order.
    pub fn declared_operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(move |op| op.is_public() && op.declared_in == self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_records_declaring_type() {
        let ty = ControllerType::concrete("App\\UserController").operation(Operation::new("index"));
        assert_eq!(ty.operations[0].declared_in, "App\\UserController");
    }

    #[test]
    fn test_extends_skips_redeclared_operations() {
        let base = ControllerType::abstract_type("App\\BaseController")
            .operation(Operation::new("health").route(Route::get("/health")))
            .operation(Operation::new("index"));
        let derived = ControllerType::concrete("App\\UserController")
            .operation(Operation::new("index").route(Route::get("/users")))
            .extends(&base);

        let names: Vec<_> = derived.operations.iter().map(|op| op.name.as_str()).collect();
        assert_eq!(names, vec!["index", "health"]);

        let own: Vec<_> = derived.declared_operations().map(|op| op.name.as_str()).collect();
        assert_eq!(own, vec!["index"]);
    }

    #[test]
    fn test_declared_operations_skip_non_public() {
        let ty = ControllerType::concrete("App\\UserController")
            .operation(Operation::new("helper").visibility(Visibility::Private))
            .operation(Operation::new("show"));
        let own: Vec<_> = ty.declared_operations().map(|op| op.name.as_str()).collect();
        assert_eq!(own, vec!["show"]);
    }

    #[test]
    fn test_redeclared_operation_replaces_in_place() {
        let ty = ControllerType::concrete("App\\UserController")
            .operation(Operation::new("index"))
            .operation(Operation::new("show"))
            .operation(Operation::new("index").route(Route::get("/users")));
        assert_eq!(ty.operations.len(), 2);
        assert_eq!(ty.operations[0].routes.len(), 1);
    }
}
