#![allow(dead_code)]

pub mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A temporary controller directory, removed on drop.
    pub struct ControllerDir {
        dir: TempDir,
    }

    impl ControllerDir {
        pub fn new() -> Self {
            ControllerDir {
                dir: TempDir::new().unwrap(),
            }
        }

        pub fn path(&self) -> &Path {
            self.dir.path()
        }

        /// Write `source` at `relative`, creating parent directories.
        pub fn file(&self, relative: &str, source: &str) -> PathBuf {
            let path = self.dir.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, source).unwrap();
            path
        }

        /// Write a source file declaring `class` (fully qualified) as a concrete class.
        pub fn class(&self, relative: &str, class: &str) -> PathBuf {
            self.file(relative, &class_source("class", class))
        }

        pub fn abstract_class(&self, relative: &str, class: &str) -> PathBuf {
            self.file(relative, &class_source("abstract class", class))
        }

        pub fn interface(&self, relative: &str, class: &str) -> PathBuf {
            self.file(relative, &class_source("interface", class))
        }
    }

    fn class_source(keyword: &str, class: &str) -> String {
        let (ns, short) = class.rsplit_once('\\').unwrap_or(("", class));
        let mut source = String::from("<?php\n\ndeclare(strict_types=1);\n\n");
        if !ns.is_empty() {
            source.push_str(&format!("namespace {ns};\n\nuse Some\\Dependency;\n\n"));
        }
        source.push_str(&format!(
            "#[Route(methods: ['GET'], path: '/')]\n{keyword} {short}\n{{\n    public function index() {{}}\n}}\n"
        ));
        source
    }
}

pub mod recording {
    use attroute::container::DependencyResolver;
    use attroute::router::{HandlerRef, RouteHandle, RouteRegistrar};
    use http::Method;
    use std::cell::RefCell;

    /// One observed collaborator call, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Map(String),
        Name(String),
        Middleware(String),
    }

    #[derive(Debug, Default)]
    pub struct RecordingRoute {
        pub method: Option<Method>,
        pub path: String,
        pub handler: Option<HandlerRef>,
        pub name: Option<String>,
        pub middleware: Vec<String>,
        pub naming: bool,
    }

    impl RouteHandle for RecordingRoute {
        type Middleware = String;

        fn supports_naming(&self) -> bool {
            self.naming
        }

        fn set_name(&mut self, name: &str) {
            self.name = Some(name.to_string());
        }

        fn add_middleware(&mut self, middleware: String) {
            self.middleware.push(middleware);
        }
    }

    /// Router that keeps every mapped route and accepts duplicates, so tests
    /// can check that conflicts are caught before the router sees them.
    #[derive(Debug, Default)]
    pub struct RecordingRouter {
        pub routes: Vec<RecordingRoute>,
        pub naming: bool,
    }

    impl RecordingRouter {
        pub fn with_naming() -> Self {
            RecordingRouter {
                naming: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            let mut calls = Vec::new();
            for route in &self.routes {
                let method = route.method.as_ref().map(Method::as_str).unwrap_or("?");
                calls.push(Call::Map(format!("{method} {}", route.path)));
                if let Some(name) = &route.name {
                    calls.push(Call::Name(name.clone()));
                }
                calls.extend(route.middleware.iter().cloned().map(Call::Middleware));
            }
            calls
        }

        pub fn keys(&self) -> Vec<String> {
            self.routes
                .iter()
                .map(|r| format!("{} {}", r.method.as_ref().map(Method::as_str).unwrap_or("?"), r.path))
                .collect()
        }
    }

    impl RouteRegistrar for RecordingRouter {
        type Route = RecordingRoute;

        fn map(
            &mut self,
            method: &Method,
            path: &str,
            handler: HandlerRef,
        ) -> anyhow::Result<&mut RecordingRoute> {
            self.routes.push(RecordingRoute {
                method: Some(method.clone()),
                path: path.to_string(),
                handler: Some(handler),
                naming: self.naming,
                ..RecordingRoute::default()
            });
            let last = self.routes.len() - 1;
            Ok(&mut self.routes[last])
        }
    }

    /// Resolver with no pre-check that returns `"<id>#<n>"`, numbering each resolution.
    #[derive(Debug, Default)]
    pub struct RecordingResolver {
        pub resolved: RefCell<Vec<String>>,
    }

    impl DependencyResolver<String> for RecordingResolver {
        fn resolve(&self, id: &str) -> anyhow::Result<String> {
            let mut resolved = self.resolved.borrow_mut();
            resolved.push(id.to_string());
            Ok(format!("{id}#{}", resolved.len()))
        }
    }
}
