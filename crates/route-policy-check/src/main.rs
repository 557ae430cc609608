mod cli;
mod config;

use std::net::IpAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use route_policy::{
    loader, DefaultPolicy, PolicyDecision, PolicyTable, Route, RouteType, TracingObserver,
};

use crate::cli::Cli;
use crate::config::{Config, ConfigSource, LogFormat};

/// Exit status for a rejected route. Errors exit with 1.
const EXIT_REJECTED: u8 = 2;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What gets printed for one evaluated route.
#[derive(Debug, Serialize)]
struct Report {
    prefix: String,
    neighbor: IpAddr,
    decision: RouteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement: Option<String>,
}

impl Report {
    fn new(prefix: &str, neighbor: IpAddr, decision: &PolicyDecision<Route>) -> Self {
        Self {
            prefix: prefix.to_string(),
            neighbor,
            decision: decision.route_type,
            policy: decision.policy.clone(),
            statement: decision.statement.clone(),
        }
    }

    fn to_text(&self) -> String {
        let by = match (&self.policy, &self.statement) {
            (Some(p), Some(s)) => format!("policy '{p}', statement '{s}'"),
            _ => "default policy".to_string(),
        };
        format!("{} from {}: {} ({by})", self.prefix, self.neighbor, self.decision)
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

/// Command-line flags take precedence over the config file.
fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(ref policy) = cli.policy {
        cfg.policy_file = policy.clone();
    }
    if !cli.apply.is_empty() {
        cfg.evaluation.policies = cli.apply.clone();
    }
    if cli.default_reject {
        cfg.evaluation.default_action = DefaultPolicy::RejectRoute;
    }
}

fn report_config_source(path: &Path, source: ConfigSource) {
    match source {
        ConfigSource::File => info!(config_file = %path.display(), "configuration loaded"),
        ConfigSource::Defaults => warn!(
            path = %path.display(),
            "configuration file not found; using defaults"
        ),
    }
}

/// 0 when the route is accepted, [`EXIT_REJECTED`] otherwise.
fn exit_status<P>(decision: &PolicyDecision<P>) -> u8 {
    if decision.is_accepted() {
        0
    } else {
        EXIT_REJECTED
    }
}

fn main() -> Result<ExitCode> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let (mut cfg, source) = config::load(&cli.config)?;
    apply_overrides(&mut cfg, &cli);

    // 3. Init tracing-subscriber; RUST_LOG wins over the configured level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    match cfg.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    report_config_source(&cli.config, source);
    info!(
        policy_file = %cfg.policy_file.display(),
        policies = ?cfg.evaluation.policies,
        default_action = ?cfg.evaluation.default_action,
        "route-policy-check starting"
    );

    // 4. Build the policy table.
    let policy_config = loader::load_policy(&cfg.policy_file)?;
    let table = PolicyTable::from_config(&policy_config, Arc::new(TracingObserver));

    // 5. Evaluate the route.
    let route = Route::from_cidr(&cli.prefix, cli.neighbor)
        .with_context(|| format!("invalid route prefix: {}", cli.prefix))?;
    let decision = table.evaluate(
        cfg.evaluation.policies.as_slice(),
        cfg.evaluation.default_action,
        &route,
    );

    let report = Report::new(&cli.prefix, cli.neighbor, &decision);
    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.to_text());
    }

    Ok(ExitCode::from(exit_status(&decision)))
}
