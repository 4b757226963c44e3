//! path-router CLI.
//!
//! Loads a route table from TOML and replays navigations against it with the
//! in-memory browser, printing JSON reports.
//!
//! ```text
//! path-router --config routes.toml check
//! path-router --config routes.toml routes
//! path-router --config routes.toml dispatch /users/42 /about?x=1
//! path-router --config routes.toml click /docs /static/app.js '#top'
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use url::Url;

use path_router::config::{load_config, RouterConfig};
use path_router::navigation::{Environment, Location, MemoryAnchor};
use path_router::observability::logging;
use path_router::{handler, CompileError, CompiledMatcher, ListenOptions, Router, RouterError};

#[derive(Parser)]
#[command(name = "path-router")]
#[command(about = "Replay client-side navigations against a route table", long_about = None)]
struct Cli {
    /// Route table (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration
    Check,
    /// List compiled routes and their parameters
    Routes,
    /// Dispatch each path in order
    Dispatch {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Simulate in-page link clicks
    Click {
        #[arg(required = true)]
        hrefs: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
struct MatchReport {
    route: String,
    params: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct DispatchReport {
    path: String,
    matches: Vec<MatchReport>,
    query: BTreeMap<String, String>,
    previous: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClickReport {
    href: String,
    intercepted: bool,
    matches: Vec<MatchReport>,
    history: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RouteReport {
    name: String,
    pattern: String,
    params: Vec<String>,
}

type Recorder = Rc<RefCell<Vec<MatchReport>>>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    logging::init(&level);

    tracing::debug!(
        routes = config.routes.len(),
        ignored = config.ignored.len(),
        "Configuration ready"
    );

    match cli.command {
        Commands::Check => {
            let summary = serde_json::json!({
                "valid": true,
                "routes": config.routes.len(),
                "ignored": config.ignored,
                "scope": config.scope,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Routes => {
            let mut reports = Vec::with_capacity(config.routes.len());
            for route in &config.routes {
                let matcher = CompiledMatcher::compile(&route.pattern)?;
                reports.push(RouteReport {
                    name: route.name.clone(),
                    pattern: route.pattern.clone(),
                    params: matcher.param_names().to_vec(),
                });
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Commands::Dispatch { paths } => {
            let (env, _) = Environment::in_memory(&config.base_url)?;
            let router = Router::from_config(&config, env);
            let reports = dispatch_all(&router, &config, paths)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Commands::Click { hrefs } => {
            let (env, mem) = Environment::in_memory(&config.base_url)?;
            let router = Router::from_config(&config, env);
            let recorder = start_listening(&router, &config)?;

            let base = Url::parse(&config.base_url)?;
            let mut reports = Vec::with_capacity(hrefs.len());
            for href in hrefs {
                recorder.borrow_mut().clear();
                let document = mem.history.current().href;
                let resolved = Url::parse(&document).unwrap_or_else(|_| base.clone()).join(&href)?;
                let click = mem
                    .links
                    .click(&MemoryAnchor::new(resolved.to_string(), document));

                reports.push(ClickReport {
                    href,
                    intercepted: click.default_prevented,
                    matches: recorder.borrow().clone(),
                    history: mem.history.entries(),
                });
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}

/// Register the routes, then dispatch `paths` in order.
fn dispatch_all(
    router: &Router,
    config: &RouterConfig,
    paths: Vec<String>,
) -> Result<Vec<DispatchReport>, RouterError> {
    let recorder = register_routes(router, config)?;

    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        recorder.borrow_mut().clear();
        // Keeps the outgoing context alive so the back-reference resolves.
        let _outgoing = router.current();
        router.dispatch(&path)?;

        let current = router.current();
        reports.push(DispatchReport {
            path,
            matches: recorder.borrow().clone(),
            query: current
                .as_ref()
                .map(|ctx| ctx.query().clone().into_iter().collect())
                .unwrap_or_default(),
            previous: current
                .and_then(|ctx| ctx.previous())
                .map(|prev| prev.path().to_string()),
        });
    }
    Ok(reports)
}

/// Register the routes and start intercepting link clicks.
fn start_listening(router: &Router, config: &RouterConfig) -> Result<Recorder, RouterError> {
    let recorder = register_routes(router, config)?;
    router.listen(ListenOptions {
        scope: config.scope.clone(),
        initial_dispatch: config.initial_dispatch,
    })?;
    if config.listen_popstate {
        router.listen_pop_state();
    }
    Ok(recorder)
}

/// Register every configured route with a handler that records the match.
fn register_routes(router: &Router, config: &RouterConfig) -> Result<Recorder, CompileError> {
    let recorder: Recorder = Rc::new(RefCell::new(Vec::new()));

    for route in &config.routes {
        let log = recorder.clone();
        let name = route.name.clone();
        let continue_chain = route.continue_chain;

        router.register(
            &route.pattern,
            [handler(move |ctx, next| {
                log.borrow_mut().push(MatchReport {
                    route: name.clone(),
                    params: ctx.params.clone().into_iter().collect(),
                });
                if continue_chain {
                    next.run(ctx)
                } else {
                    Ok(())
                }
            })],
        )?;
    }

    Ok(recorder)
}
