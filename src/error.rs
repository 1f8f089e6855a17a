//! Discovery failures.
//!
//! Every condition here is fatal to the discovery run that raised it. Routes
//! registered before the failure stay registered.

use std::path::PathBuf;
use thiserror::Error;

/// Broad cause of a [`DiscoveryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A file matches the controller naming convention but its type cannot be loaded
    Load,
    /// More than one route declaration on one operation
    DeclarationConflict,
    /// Empty path, empty method list or an invalid HTTP method
    Validation,
    /// Duplicate `(method, path)` key
    RegistrationConflict,
    /// Blank, unknown or unresolvable middleware, or unsupported route naming
    MiddlewareResolution,
    /// Directory walk failure
    Io,
    /// The router or dependency resolver reported an error
    Collaborator,
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Controller class '{class}' was found in '{}' but is not loadable.", .file.display())]
    ControllerNotLoadable { class: String, file: PathBuf },

    #[error("Multiple route declarations are not allowed. Found {count} on {handler}().")]
    MultipleRoutes { count: usize, handler: String },

    #[error("Empty route path on {handler}().")]
    EmptyPath { handler: String },

    #[error("Route methods cannot be empty on {handler}().")]
    EmptyMethods { handler: String },

    #[error("Invalid HTTP method '{method}' on {handler}(). Allowed: {allowed}")]
    InvalidMethod {
        method: String,
        handler: String,
        allowed: String,
    },

    #[error("Route conflict: '{key}' is already registered by {existing}() (attempted again in {handler}()).")]
    RouteConflict {
        key: String,
        handler: String,
        existing: String,
    },

    #[error("Route naming requested for '{key}' but the route handle does not support names.")]
    NamingUnsupported { key: String },

    #[error("Empty middleware class on {handler}() for {key}.")]
    EmptyMiddleware { handler: String, key: String },

    #[error("Middleware class '{class}' does not exist (referenced by {handler}() for {key}).")]
    UnknownMiddleware {
        class: String,
        handler: String,
        key: String,
    },

    #[error("Container has no entry for middleware '{class}' (referenced by {handler}() for {key}).")]
    MissingContainerEntry {
        class: String,
        handler: String,
        key: String,
    },

    #[error("Failed to resolve middleware '{class}' for {key}: {source}")]
    Resolver {
        class: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Router rejected '{key}': {source}")]
    Router {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to walk controller directory '{}': {source}", .root.display())]
    Io {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl DiscoveryError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            DiscoveryError::ControllerNotLoadable { .. } => ErrorCategory::Load,
            DiscoveryError::MultipleRoutes { .. } => ErrorCategory::DeclarationConflict,
            DiscoveryError::EmptyPath { .. }
            | DiscoveryError::EmptyMethods { .. }
            | DiscoveryError::InvalidMethod { .. } => ErrorCategory::Validation,
            DiscoveryError::RouteConflict { .. } => ErrorCategory::RegistrationConflict,
            DiscoveryError::NamingUnsupported { .. }
            | DiscoveryError::EmptyMiddleware { .. }
            | DiscoveryError::UnknownMiddleware { .. }
            | DiscoveryError::MissingContainerEntry { .. } => ErrorCategory::MiddlewareResolution,
            DiscoveryError::Resolver { .. } | DiscoveryError::Router { .. } => {
                ErrorCategory::Collaborator
            }
            DiscoveryError::Io { .. } => ErrorCategory::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_handler() {
        let err = DiscoveryError::MultipleRoutes {
            count: 2,
            handler: "App\\UserController::index".into(),
        };
        assert_eq!(
            err.to_string(),
            "Multiple route declarations are not allowed. Found 2 on App\\UserController::index()."
        );
        assert_eq!(err.category(), ErrorCategory::DeclarationConflict);
    }

    #[test]
    fn test_load_failure_names_the_file() {
        let err = DiscoveryError::ControllerNotLoadable {
            class: "App\\GhostController".into(),
            file: PathBuf::from("/srv/app/GhostController.php"),
        };
        let msg = err.to_string();
        assert!(msg.contains("App\\GhostController"));
        assert!(msg.contains("/srv/app/GhostController.php"));
        assert_eq!(err.category(), ErrorCategory::Load);
    }

    #[test]
    fn test_collaborator_errors_keep_source() {
        let err = DiscoveryError::Resolver {
            class: "Auth".into(),
            key: "GET /x".into(),
            source: anyhow::anyhow!("boom"),
        };
        assert!(err.to_string().ends_with("boom"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.category(), ErrorCategory::Collaborator);
    }
}
