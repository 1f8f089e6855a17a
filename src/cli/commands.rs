use crate::catalog::ControllerRegistry;
use crate::config::DiscoveryConfig;
use crate::container::Container;
use crate::discovery::{DiscoveryReport, RouteDiscovery};
use crate::router::{RegisteredRoute, RouteTable};
use crate::scanner::extract_type_name_from_file;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Command-line interface for attribute route discovery
#[derive(Parser)]
#[command(name = "attroute")]
#[command(about = "Discover controller routes from declarations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover controllers and print the registered routes
    Routes {
        /// Controller directory to scan
        #[arg(short, long)]
        dir: PathBuf,

        /// Catalog of controller types (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Discovery settings (YAML or TOML); environment defaults otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List candidate files and the type name each declares
    Scan {
        /// Directory to scan
        #[arg(short, long)]
        dir: PathBuf,

        /// Discovery settings (YAML or TOML); environment defaults otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminals
    Table,
    /// One JSON array of routes
    Json,
}

/// Parse the process arguments and execute the command against stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The manifest or config file cannot be read or parsed
/// - Discovery fails (load failure, conflict, invalid declaration, middleware)
/// - Writing to stdout fails
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Execute a parsed command, writing its output to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Routes {
            dir,
            manifest,
            config,
            format,
        } => {
            let config = load_config(config.as_deref())?;
            let (table, report) = discover_routes(dir, manifest, config)?;
            match format {
                OutputFormat::Table => render_table(table.routes(), out)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut *out, table.routes())
                        .context("failed to serialize routes")?;
                    writeln!(out)?;
                }
            }
            info!(
                routes = report.routes,
                controllers = report.controllers.len(),
                "Routes listed"
            );
            Ok(())
        }
        Commands::Scan { dir, config } => {
            let config = load_config(config.as_deref())?;
            for (path, name) in scan_directory(dir, &config)? {
                writeln!(
                    out,
                    "{}\t{}",
                    path.display(),
                    name.as_deref().unwrap_or("-")
                )?;
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DiscoveryConfig> {
    match path {
        Some(path) => DiscoveryConfig::load(path),
        None => Ok(DiscoveryConfig::from_env()),
    }
}

/// Run discovery over `dir` with the controllers described by `manifest`.
///
/// Every known type is bound to its own name, so the middleware recorded on
/// each route is the chain of class identifiers.
pub fn discover_routes(
    dir: &Path,
    manifest: &Path,
    config: DiscoveryConfig,
) -> anyhow::Result<(RouteTable<String>, DiscoveryReport)> {
    let catalog = ControllerRegistry::from_manifest(manifest)
        .with_context(|| format!("failed to load manifest {}", manifest.display()))?;

    let mut container: Container<String> = Container::new();
    for name in catalog.type_names() {
        container.instance(name, name.to_string());
    }

    let mut table = RouteTable::new();
    let report = RouteDiscovery::with_config(&catalog, &mut table, &container, config)
        .discover(dir)?;
    Ok((table, report))
}

/// Candidate files under `dir` with the type name each declares, in walk order.
pub fn scan_directory(
    dir: &Path,
    config: &DiscoveryConfig,
) -> anyhow::Result<Vec<(PathBuf, Option<String>)>> {
    let mut walker = WalkDir::new(dir)
        .follow_links(config.follow_links)
        .sort_by_file_name();
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if config.is_candidate(&entry) {
            let path = entry.path();
            found.push((path.to_path_buf(), extract_type_name_from_file(path)));
        }
    }
    Ok(found)
}

/// Print routes as aligned columns.
pub fn render_table<W: Write>(routes: &[RegisteredRoute<String>], out: &mut W) -> io::Result<()> {
    const HEADERS: [&str; 5] = ["METHOD", "PATH", "HANDLER", "NAME", "MIDDLEWARE"];

    let rows: Vec<[String; 5]> = routes
        .iter()
        .map(|r| {
            [
                r.method.to_string(),
                r.path.clone(),
                r.handler.to_string(),
                r.name.clone().unwrap_or_else(|| "-".to_string()),
                if r.middleware.is_empty() {
                    "-".to_string()
                } else {
                    r.middleware.join(", ")
                },
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 5]| {
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i + 1 == cells.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{cell:<width$}  "));
            }
        }
        line
    };

    writeln!(out, "{}", line(HEADERS))?;
    for row in &rows {
        writeln!(out, "{}", line(row.each_ref().map(String::as_str)))?;
    }
    Ok(())
}
