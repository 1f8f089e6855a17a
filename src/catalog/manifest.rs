//! Catalog manifests.
//!
//! A manifest describes controller types and their declarations in YAML or
//! JSON, for hosts that cannot register controllers from code (and for the
//! `attroute` CLI).
//!
//! ```yaml
//! types:
//!   - App\Http\AuthMiddleware
//! controllers:
//!   - name: App\Http\BaseController
//!     kind: abstract
//!     operations:
//!       - name: health
//!         routes:
//!           - { methods: [GET], path: /health }
//!   - name: App\Http\UserController
//!     extends: App\Http\BaseController
//!     middleware:
//!       - [App\Http\AuthMiddleware]
//!     operations:
//!       - name: index
//!         routes:
//!           - { methods: [GET], path: /users, name: users.index }
//!       - name: publicList
//!         routes:
//!           - { methods: [GET], path: /users/public }
//!         without_middleware:
//!           - [App\Http\AuthMiddleware]
//! ```

use super::registry::{is_qualified_name, normalize_type_name, ControllerRegistry};
use super::types::{ControllerType, Operation, TypeKind, Visibility};
use crate::attributes::{Middleware, Route, WithoutMiddleware};
use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Plain types (middleware classes) known to the host
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub controllers: Vec<ManifestController>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestController {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Base type whose operations are inherited
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub middleware: Vec<Middleware>,
    #[serde(default)]
    pub without_middleware: Vec<WithoutMiddleware>,
    #[serde(default)]
    pub operations: Vec<ManifestOperation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestOperation {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub middleware: Vec<Middleware>,
    #[serde(default)]
    pub without_middleware: Vec<WithoutMiddleware>,
}

impl From<&ManifestOperation> for Operation {
    fn from(op: &ManifestOperation) -> Self {
        Operation {
            name: op.name.clone(),
            declared_in: String::new(),
            visibility: op.visibility,
            routes: op.routes.clone(),
            middleware: op.middleware.clone(),
            without_middleware: op.without_middleware.clone(),
        }
    }
}

impl Manifest {
    /// Parse a manifest from text. `yaml` selects YAML, otherwise JSON.
    pub fn parse(content: &str, yaml: bool) -> anyhow::Result<Self> {
        let manifest = if yaml {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        Ok(manifest)
    }

    /// Load a manifest file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        Self::parse(&content, yaml)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }

    /// Build the controller types, resolving `extends` chains.
    pub fn into_registry(self) -> anyhow::Result<ControllerRegistry> {
        let mut registry = ControllerRegistry::new();

        for name in &self.types {
            if !is_qualified_name(name) {
                bail!("invalid type name '{name}' in manifest types");
            }
            registry.register_type(name);
        }

        let mut by_name: HashMap<&str, &ManifestController> = HashMap::new();
        for controller in &self.controllers {
            if !is_qualified_name(&controller.name) {
                bail!("invalid controller name '{}' in manifest", controller.name);
            }
            let key = normalize_type_name(&controller.name);
            if by_name.insert(key, controller).is_some() {
                bail!("controller '{key}' is declared more than once in manifest");
            }
        }

        let mut built: HashMap<String, ControllerType> = HashMap::new();
        for controller in &self.controllers {
            let mut visiting = HashSet::new();
            build_controller(controller, &by_name, &mut built, &mut visiting)?;
        }

        // Register in manifest order so registry logs follow the file.
        for controller in &self.controllers {
            let key = normalize_type_name(&controller.name);
            if let Some(ty) = built.remove(key) {
                registry.register(ty);
            }
        }

        info!(
            controllers = registry.len(),
            types = self.types.len(),
            "Manifest catalog loaded"
        );
        Ok(registry)
    }
}

fn build_controller<'m>(
    controller: &'m ManifestController,
    by_name: &HashMap<&'m str, &'m ManifestController>,
    built: &mut HashMap<String, ControllerType>,
    visiting: &mut HashSet<&'m str>,
) -> anyhow::Result<ControllerType> {
    let key = normalize_type_name(&controller.name);
    if let Some(ty) = built.get(key) {
        return Ok(ty.clone());
    }
    if !visiting.insert(key) {
        bail!("inheritance cycle detected at '{key}'");
    }

    let mut ty = ControllerType::new(key, controller.kind);
    ty.middleware = controller.middleware.clone();
    ty.without_middleware = controller.without_middleware.clone();
    for op in &controller.operations {
        ty = ty.operation(Operation::from(op));
    }

    if let Some(base_name) = &controller.extends {
        let base_key = normalize_type_name(base_name);
        let base = by_name
            .get(base_key)
            .copied()
            .ok_or_else(|| anyhow!("controller '{key}' extends unknown type '{base_name}'"))?;
        let base = build_controller(base, by_name, built, visiting)?;
        ty = ty.extends(&base);
    }

    visiting.remove(key);
    built.insert(key.to_string(), ty.clone());
    Ok(ty)
}
