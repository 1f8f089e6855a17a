use super::chain::{declared_exclusions, declared_middleware, effective_chain, MiddlewareChain};
use super::path::build_route_path;
use super::validate::{allowed_methods_list, parse_http_method, validate_route};
use crate::catalog::{ControllerType, TypeCatalog, TypeKind};
use crate::config::{DiscoveryConfig, CONTROLLER_SUFFIX};
use crate::container::DependencyResolver;
use crate::error::DiscoveryError;
use crate::router::{HandlerRef, RouteHandle, RouteRegistrar};
use crate::scanner::extract_type_name_from_file;
use http::Method;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// A route ready for registration: validated, with its final path and
/// effective middleware chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRoute {
    pub method: Method,
    pub path: String,
    pub handler: HandlerRef,
    pub name: Option<String>,
    pub middleware: MiddlewareChain,
}

impl PlannedRoute {
    /// Deduplication key, `"GET /users"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Why a discovered controller produced no routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Abstract,
    Interface,
    AlreadyRegistered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedController {
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of one [`RouteDiscovery::discover`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Candidate source files read
    pub files_scanned: usize,
    /// Controllers whose routes were registered by this call, in order
    pub controllers: Vec<String>,
    pub skipped: Vec<SkippedController>,
    /// Routes registered by this call
    pub routes: usize,
}

/// Build the routes declared by `controller` without registering anything.
///
/// Fails on the first invalid declaration, so a controller with a bad
/// operation registers no routes at all.
pub fn plan_controller(controller: &ControllerType) -> Result<Vec<PlannedRoute>, DiscoveryError> {
    let mut planned = Vec::new();

    for op in controller.declared_operations() {
        let handler = HandlerRef::new(controller.name.clone(), op.name.clone());

        let route = match op.routes.as_slice() {
            [] => continue,
            [route] => route,
            many => {
                return Err(DiscoveryError::MultipleRoutes {
                    count: many.len(),
                    handler: handler.to_string(),
                })
            }
        };

        let prefix = validate_route(route, &handler.to_string())?;
        let path = build_route_path(prefix, &route.path);

        let chain = effective_chain(
            declared_middleware(&controller.middleware).chain(declared_middleware(&op.middleware)),
            declared_exclusions(&controller.without_middleware)
                .chain(declared_exclusions(&op.without_middleware)),
        );

        let name = route.name.clone().filter(|n| !n.is_empty());

        for raw in &route.methods {
            let method = parse_http_method(raw).ok_or_else(|| DiscoveryError::InvalidMethod {
                method: raw.clone(),
                handler: handler.to_string(),
                allowed: allowed_methods_list(),
            })?;
            planned.push(PlannedRoute {
                method,
                path: path.clone(),
                handler: handler.clone(),
                name: name.clone(),
                middleware: chain.clone(),
            });
        }
    }

    Ok(planned)
}

/// Discovers controllers and registers their routes and middleware.
///
/// One engine owns the set of registered `(method, path)` keys; create one
/// per application boot and serialize calls on it. The router and resolver
/// are borrowed for the engine's lifetime and never owned.
pub struct RouteDiscovery<'a, C, R, D> {
    catalog: &'a C,
    router: &'a mut R,
    resolver: &'a D,
    config: DiscoveryConfig,
    registered: HashMap<String, HandlerRef>,
    completed: HashSet<String>,
}

impl<'a, C, R, D> RouteDiscovery<'a, C, R, D>
where
    C: TypeCatalog,
    R: RouteRegistrar,
    D: DependencyResolver<<R::Route as RouteHandle>::Middleware>,
{
    pub fn new(catalog: &'a C, router: &'a mut R, resolver: &'a D) -> Self {
        Self::with_config(catalog, router, resolver, DiscoveryConfig::default())
    }

    pub fn with_config(
        catalog: &'a C,
        router: &'a mut R,
        resolver: &'a D,
        config: DiscoveryConfig,
    ) -> Self {
        RouteDiscovery {
            catalog,
            router,
            resolver,
            config,
            registered: HashMap::new(),
            completed: HashSet::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Registered route keys (`"GET /users"`), sorted.
    #[must_use]
    pub fn registered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.registered.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Whether this engine has already registered every route of `controller`.
    #[must_use]
    pub fn is_registered(&self, controller: &str) -> bool {
        self.completed.contains(controller)
    }

    /// Discover controllers under `root` and register their routes.
    ///
    /// A missing root is not an error: it registers nothing. All controllers
    /// are loaded before any route is registered, so a load failure leaves the
    /// router untouched. Later failures keep routes registered so far.
    pub fn discover(&mut self, root: impl AsRef<Path>) -> Result<DiscoveryReport, DiscoveryError> {
        let root = root.as_ref();
        let mut report = DiscoveryReport::default();

        if !root.is_dir() {
            debug!(root = %root.display(), "Controller directory does not exist; nothing to discover");
            return Ok(report);
        }

        let controllers = self.discover_controllers(root, &mut report)?;

        for controller in controllers {
            if self.is_registered(&controller.name) {
                debug!(controller = %controller.name, "Controller already registered; skipping");
                report.skipped.push(SkippedController {
                    name: controller.name.clone(),
                    reason: SkipReason::AlreadyRegistered,
                });
                continue;
            }
            report.routes += self.register_controller(controller)?;
            report.controllers.push(controller.name.clone());
        }

        info!(
            root = %root.display(),
            files_scanned = report.files_scanned,
            controllers = report.controllers.len(),
            skipped = report.skipped.len(),
            routes = report.routes,
            "Route discovery complete"
        );
        Ok(report)
    }

    fn discover_controllers(
        &self,
        root: &Path,
        report: &mut DiscoveryReport,
    ) -> Result<Vec<&'a ControllerType>, DiscoveryError> {
        let catalog: &'a C = self.catalog;
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut controllers = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| DiscoveryError::Io {
                root: root.to_path_buf(),
                source,
            })?;
            if !self.config.is_candidate(&entry) {
                continue;
            }
            let path = entry.path();

            report.files_scanned += 1;
            let Some(class) = extract_type_name_from_file(path) else {
                debug!(file = %path.display(), "No type declaration found");
                continue;
            };
            if !class.ends_with(CONTROLLER_SUFFIX) {
                debug!(file = %path.display(), class = %class, "Not a controller; skipping");
                continue;
            }

            let controller = catalog.controller(&class).ok_or_else(|| {
                DiscoveryError::ControllerNotLoadable {
                    class: class.clone(),
                    file: path.to_path_buf(),
                }
            })?;

            match controller.kind {
                TypeKind::Concrete => controllers.push(controller),
                TypeKind::Abstract | TypeKind::Interface => {
                    debug!(class = %class, kind = %controller.kind, "Controller is not instantiable; skipping");
                    report.skipped.push(SkippedController {
                        name: controller.name.clone(),
                        reason: if controller.kind == TypeKind::Abstract {
                            SkipReason::Abstract
                        } else {
                            SkipReason::Interface
                        },
                    });
                }
            }
        }

        Ok(controllers)
    }

    /// Register every route declared by `controller` and attach its middleware.
    ///
    /// Returns the number of routes registered. Non-instantiable controllers
    /// and controllers this engine already registered yield `0`.
    pub fn register_controller(&mut self, controller: &ControllerType) -> Result<usize, DiscoveryError> {
        if !controller.is_instantiable() || self.is_registered(&controller.name) {
            return Ok(0);
        }

        let planned = plan_controller(controller)?;
        let count = planned.len();
        for route in planned {
            self.register_route(route)?;
        }

        self.completed.insert(controller.name.clone());
        debug!(controller = %controller.name, routes = count, "Controller registered");
        Ok(count)
    }

    fn register_route(&mut self, route: PlannedRoute) -> Result<(), DiscoveryError> {
        let key = route.key();
        if let Some(existing) = self.registered.get(&key) {
            return Err(DiscoveryError::RouteConflict {
                key,
                handler: route.handler.to_string(),
                existing: existing.to_string(),
            });
        }
        self.registered.insert(key.clone(), route.handler.clone());

        let handler_name = route.handler.to_string();
        let handle = self
            .router
            .map(&route.method, &route.path, route.handler)
            .map_err(|source| DiscoveryError::Router {
                key: key.clone(),
                source,
            })?;

        if let Some(name) = &route.name {
            if !handle.supports_naming() {
                return Err(DiscoveryError::NamingUnsupported { key });
            }
            handle.set_name(name);
        }

        for class in &route.middleware {
            check_middleware::<C, <R::Route as RouteHandle>::Middleware, D>(
                self.catalog,
                self.resolver,
                class,
                &handler_name,
                &key,
            )?;
            let instance = self
                .resolver
                .resolve(class)
                .map_err(|source| DiscoveryError::Resolver {
                    class: class.clone(),
                    key: key.clone(),
                    source,
                })?;
            handle.add_middleware(instance);
        }

        info!(
            method = %route.method,
            path = %route.path,
            handler = %handler_name,
            name = route.name.as_deref().unwrap_or(""),
            middleware = route.middleware.len(),
            "Route registered"
        );
        Ok(())
    }
}

fn check_middleware<C, T, D>(
    catalog: &C,
    resolver: &D,
    class: &str,
    handler: &str,
    key: &str,
) -> Result<(), DiscoveryError>
where
    C: TypeCatalog,
    D: DependencyResolver<T>,
{
    if class.trim().is_empty() {
        return Err(DiscoveryError::EmptyMiddleware {
            handler: handler.to_string(),
            key: key.to_string(),
        });
    }
    if !catalog.type_exists(class) {
        return Err(DiscoveryError::UnknownMiddleware {
            class: class.to_string(),
            handler: handler.to_string(),
            key: key.to_string(),
        });
    }
    if resolver.has_entry(class) == Some(false) {
        return Err(DiscoveryError::MissingContainerEntry {
            class: class.to_string(),
            handler: handler.to_string(),
            key: key.to_string(),
        });
    }
    Ok(())
}
