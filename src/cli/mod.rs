//! # CLI Module
//!
//! Command-line front end for route discovery, used to inspect what a
//! controller directory would register without booting an application.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Discover controllers and print the resulting route table:
//!
//! ```bash
//! attroute routes --dir app/Controllers --manifest controllers.yaml
//! ```
//!
//! Options:
//! - `--dir <DIR>` - Controller directory to scan (required)
//! - `--manifest <FILE>` - YAML or JSON catalog describing the controller types (required)
//! - `--config <FILE>` - YAML or TOML discovery settings; defaults come from the environment
//! - `--format <FORMAT>` - `table` (default) or `json`
//!
//! The CLI has no application container, so every type in the manifest is
//! bound to its own name and the middleware column shows class identifiers.
//!
//! ### `scan`
//!
//! List every candidate file and the type name extracted from it:
//!
//! ```bash
//! attroute scan --dir app/Controllers
//! ```
//!
//! ## Exit Status
//!
//! Any discovery failure (unloadable controller, route conflict, invalid
//! declaration, unknown middleware) prints the error and exits non-zero.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use attroute::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{
    discover_routes, execute, render_table, run_cli, scan_directory, Cli, Commands, OutputFormat,
};
