use crate::config::load_routes;
use crate::hot_reload::watch_routes;
use crate::logging::{init_logging, LogFormat};
use crate::request::Request;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use anyhow::{anyhow, Context};
use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use tracing::debug;

/// Command-line interface for routedispatch
#[derive(Parser, Debug)]
#[command(name = "routedispatch")]
#[command(about = "Inspect and test route tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log level: trace/debug/info/warn/error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format: pretty/json
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the routing table in match order
    Routes {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep running and print the table again whenever the file changes
        #[arg(short, long, default_value_t = false)]
        watch: bool,
    },
    /// Show which route a request matches
    Match {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path
        #[arg(short, long)]
        path: String,

        /// Request protocol
        #[arg(long, default_value = "http")]
        protocol: String,

        /// Request host
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Print the match as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load a route table and report problems
    Check {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// How a command finished when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NoMatch,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NoMatch => ExitCode::from(2),
        }
    }
}

/// Parse arguments, set up logging and run the selected command
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let runtime = RuntimeConfig::from_env();

    let mut log = runtime.log.clone();
    if let Some(level) = &cli.log_level {
        log.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        log.format = LogFormat::parse(format);
    }
    init_logging(&log)?;

    let stdout = std::io::stdout();
    let outcome = run(&cli, &runtime, &mut stdout.lock())?;
    Ok(outcome.into())
}

/// Run a parsed command, writing its report to `out`
///
/// `runtime` supplies the route file when `--config` is absent and turns on
/// watching for `routes`.
pub fn run<W: Write>(
    cli: &Cli,
    runtime: &RuntimeConfig,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    match &cli.command {
        Commands::Routes { config, watch } => {
            let config = routes_path(config.as_deref(), runtime)?;
            let router = load_router(config)?;
            router.dump_routes(out)?;
            if *watch || runtime.watch {
                follow_routes(config, router, out, None)?;
            }
            Ok(Outcome::Success)
        }
        Commands::Match {
            config,
            method,
            path,
            protocol,
            host,
            json,
        } => {
            let router = load_router(routes_path(config.as_deref(), runtime)?)?;
            let request = Request::new(method.as_str(), path.as_str())
                .with_protocol(protocol.as_str())
                .with_host(host.as_str());
            let Some(m) = router.match_request(&request) else {
                if *json {
                    writeln!(out, "{}", json!({ "matched": false }))?;
                } else {
                    writeln!(out, "no match")?;
                }
                return Ok(Outcome::NoMatch);
            };
            if *json {
                let report = json!({
                    "matched": true,
                    "route": m.name.as_deref(),
                    "handler": m.route.handler(),
                    "action": m.route.action(),
                    "params": &m.params,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "route:   {}", m.name.as_deref().unwrap_or("-"))?;
                writeln!(out, "handler: {}", m.route.handler())?;
                writeln!(out, "action:  {}", m.route.action())?;
                let params: Vec<String> =
                    m.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                writeln!(out, "params:  {}", params.join(" "))?;
            }
            Ok(Outcome::Success)
        }
        Commands::Check { config } => {
            let config = routes_path(config.as_deref(), runtime)?;
            let router = load_router(config)?;
            writeln!(out, "ok: {} routes in {}", router.len(), config.display())?;
            Ok(Outcome::Success)
        }
    }
}

pub(crate) fn load_router(config: &Path) -> anyhow::Result<Router> {
    let routes = load_routes(config)
        .with_context(|| format!("cannot build routing table from {}", config.display()))?;
    Ok(Router::from_collection(routes))
}

fn routes_path<'a>(
    config: Option<&'a Path>,
    runtime: &'a RuntimeConfig,
) -> anyhow::Result<&'a Path> {
    config
        .or(runtime.routes_path.as_deref())
        .ok_or_else(|| anyhow!("no route table given: pass --config or set ROUTEDISPATCH_ROUTES"))
}

/// Watch `config` and print the routing table after every applied reload
///
/// Returns after `reloads` reloads, or runs until interrupted when `None`.
pub(crate) fn follow_routes<W: Write>(
    config: &Path,
    router: Router,
    out: &mut W,
    reloads: Option<usize>,
) -> anyhow::Result<()> {
    let handle = Arc::new(ArcSwap::from_pointee(router));
    let (tx, rx) = mpsc::channel();
    let _watcher = watch_routes(config, Arc::clone(&handle), move |_router| {
        if tx.send(()).is_err() {
            debug!("Route listing finished, reload not printed");
        }
    })
    .with_context(|| format!("cannot watch {}", config.display()))?;
    writeln!(out, "watching {} for changes", config.display())?;
    out.flush()?;

    for () in rx.iter().take(reloads.unwrap_or(usize::MAX)) {
        handle.load().dump_routes(out)?;
        out.flush()?;
    }
    Ok(())
}
