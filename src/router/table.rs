use super::{HandlerRef, RouteHandle, RouteRegistrar};
use anyhow::bail;
use http::Method;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A route recorded by [`RouteTable`].
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredRoute<M> {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub handler: HandlerRef,
    pub name: Option<String>,
    pub middleware: Vec<M>,
}

fn serialize_method<S: serde::Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

impl<M> RouteHandle for RegisteredRoute<M> {
    type Middleware = M;

    fn supports_naming(&self) -> bool {
        true
    }

    fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    fn add_middleware(&mut self, middleware: M) {
        self.middleware.push(middleware);
    }
}

/// In-memory route table.
///
/// Keeps routes in registration order and refuses a second registration of
/// the same `(method, path)`; route names must be unique as well.
#[derive(Debug, Clone)]
pub struct RouteTable<M> {
    routes: Vec<RegisteredRoute<M>>,
    index: HashMap<(Method, String), usize>,
}

impl<M> Default for RouteTable<M> {
    fn default() -> Self {
        RouteTable {
            routes: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<M> RouteTable<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn routes(&self) -> &[RegisteredRoute<M>] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn find(&self, method: &Method, path: &str) -> Option<&RegisteredRoute<M>> {
        self.index
            .get(&(method.clone(), path.to_string()))
            .and_then(|&i| self.routes.get(i))
    }

    /// Look up a route by name. Names are checked for uniqueness only here,
    /// since they are assigned after [`map`](RouteRegistrar::map) returns.
    pub fn find_by_name(&self, name: &str) -> anyhow::Result<Option<&RegisteredRoute<M>>> {
        let mut matches = self
            .routes
            .iter()
            .filter(|r| r.name.as_deref() == Some(name));
        let first = matches.next();
        if first.is_some() && matches.next().is_some() {
            bail!("route name '{name}' is assigned to more than one route");
        }
        Ok(first)
    }
}

impl<M> RouteRegistrar for RouteTable<M> {
    type Route = RegisteredRoute<M>;

    fn map(
        &mut self,
        method: &Method,
        path: &str,
        handler: HandlerRef,
    ) -> anyhow::Result<&mut RegisteredRoute<M>> {
        let key = (method.clone(), path.to_string());
        if let Some(&existing) = self.index.get(&key) {
            let owner = self.routes.get(existing).map(|r| r.handler.to_string());
            bail!(
                "{} {} is already mapped to {}",
                method,
                path,
                owner.unwrap_or_default()
            );
        }

        debug!(method = %method, path = %path, handler = %handler, "Route mapped");
        self.index.insert(key, self.routes.len());
        self.routes.push(RegisteredRoute {
            method: method.clone(),
            path: path.to_string(),
            handler,
            name: None,
            middleware: Vec::new(),
        });
        let last = self.routes.len() - 1;
        Ok(&mut self.routes[last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_records_in_order() {
        let mut table: RouteTable<&'static str> = RouteTable::new();
        table
            .map(&Method::GET, "/users", HandlerRef::new("UserController", "index"))
            .unwrap()
            .add_middleware("A");
        table
            .map(&Method::POST, "/users", HandlerRef::new("UserController", "store"))
            .unwrap();

        let methods: Vec<_> = table.routes().iter().map(|r| r.method.clone()).collect();
        assert_eq!(methods, vec![Method::GET, Method::POST]);
        assert_eq!(table.routes()[0].middleware, vec!["A"]);
    }

    #[test]
    fn test_duplicate_mapping_is_rejected() {
        let mut table: RouteTable<()> = RouteTable::new();
        table
            .map(&Method::GET, "/x", HandlerRef::new("A", "a"))
            .unwrap();
        let err = table
            .map(&Method::GET, "/x", HandlerRef::new("B", "b"))
            .unwrap_err();
        assert!(err.to_string().contains("A::a"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_find_by_name() {
        let mut table: RouteTable<()> = RouteTable::new();
        table
            .map(&Method::GET, "/x", HandlerRef::new("A", "a"))
            .unwrap()
            .set_name("x");
        assert_eq!(table.find_by_name("x").unwrap().unwrap().path, "/x");
        assert!(table.find_by_name("y").unwrap().is_none());

        table
            .map(&Method::GET, "/y", HandlerRef::new("A", "b"))
            .unwrap()
            .set_name("x");
        assert!(table.find_by_name("x").is_err());
    }
}
